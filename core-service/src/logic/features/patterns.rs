//! Pattern tables for signal extraction
//!
//! Regexes are compiled once and shared by every request.

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// KEYWORD TABLES
// ============================================================================

/// Urgency phrases, matched as lowercase substrings
pub const URGENCY_WORDS: &[&str] = &[
    "urgent",
    "immediate",
    "right now",
    "asap",
    "eod",
    "end of day",
    "expires",
    "payment failed",
    "process now",
    "wire transfer",
    "transfer",
    "verify your account",
    "update your payment",
    "password reset",
    "reset your password",
];

/// Weak-signal top-level domains, matched as lowercase substrings
pub const SUSPICIOUS_TLDS: &[&str] = &[".ru", ".cn", ".tk", ".xyz", ".top", ".test"];

// ============================================================================
// REGEXES
// ============================================================================

pub static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://[^\s]+").expect("valid url regex"));

pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("valid email regex"));

pub static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\s\-()]{6,}\d").expect("valid phone regex"));

/// Applied to lowercased text
pub static ATTACHMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\battach(ed|ment)|attachment:|\bpdf\b|\bdocx?\b|\bxlsx?\b")
        .expect("valid attachment regex")
});

pub static FROM_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^from:\s*(.+)$").expect("valid from regex"));

pub static REPLY_TO_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^reply-?to:\s*(.+)$").expect("valid reply-to regex"));
