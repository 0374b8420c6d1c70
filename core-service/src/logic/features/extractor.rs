//! Email Feature Extraction
//!
//! Turns raw email text (headers and body mixed) into the signal bundle the
//! heuristic scorer consumes. Pure and infallible: anything unparseable just
//! contributes nothing.

use serde::{Deserialize, Serialize};

use super::patterns::{
    ATTACHMENT_RE, EMAIL_RE, FROM_HEADER_RE, PHONE_RE, REPLY_TO_HEADER_RE, SUSPICIOUS_TLDS,
    URGENCY_WORDS, URL_RE,
};

/// Signals extracted from one email
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailFeatures {
    pub url_count: usize,
    pub email_count: usize,
    pub phone_count: usize,
    pub urgency_count: usize,
    pub has_attachment_phrase: bool,
    pub replyto_mismatch: bool,
    pub suspicious_tld: bool,
}

/// Raw text plus the features derived from it
#[derive(Debug, Clone, Serialize)]
pub struct EmailSample {
    pub text: String,
    pub features: EmailFeatures,
}

impl EmailSample {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let features = extract_features(&text);
        Self { text, features }
    }
}

/// Extract the full feature bundle from raw email text
pub fn extract_features(text: &str) -> EmailFeatures {
    let lowered = text.to_lowercase();

    EmailFeatures {
        url_count: URL_RE.find_iter(text).count(),
        email_count: EMAIL_RE.find_iter(text).count(),
        phone_count: PHONE_RE.find_iter(text).count(),
        urgency_count: URGENCY_WORDS.iter().filter(|w| lowered.contains(*w)).count(),
        has_attachment_phrase: ATTACHMENT_RE.is_match(&lowered),
        replyto_mismatch: replyto_mismatch(text),
        suspicious_tld: SUSPICIOUS_TLDS.iter().any(|tld| lowered.contains(tld)),
    }
}

/// True iff both `From:` and `Reply-To:` carry an address and the domains
/// differ (byte-for-byte, so `Bank.com` and `bank.com` differ)
pub fn replyto_mismatch(text: &str) -> bool {
    let from = header_address(&FROM_HEADER_RE, text);
    let reply = header_address(&REPLY_TO_HEADER_RE, text);

    match (from, reply) {
        (Some(from), Some(reply)) => domain_of(from) != domain_of(reply),
        _ => false,
    }
}

/// First address found on the first matching header line
fn header_address<'a>(header: &regex::Regex, text: &'a str) -> Option<&'a str> {
    let value = header.captures(text)?.get(1)?.as_str();
    EMAIL_RE.find(value).map(|m| m.as_str())
}

fn domain_of(address: &str) -> &str {
    address.rsplit('@').next().unwrap_or(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_of() {
        assert_eq!(domain_of("a@x.com"), "x.com");
        assert_eq!(domain_of("weird@name@y.org"), "y.org");
    }

    #[test]
    fn test_header_address_skips_display_name() {
        let text = "From: \"Rahul Mehta (CFO)\" <rahul@company.example>\n";
        assert_eq!(header_address(&FROM_HEADER_RE, text), Some("rahul@company.example"));
    }

    #[test]
    fn test_header_without_address() {
        let text = "From: Accounts Team\nReply-To: someone@y.com\n";
        assert!(!replyto_mismatch(text));
    }
}
