//! Built-in demo corpus
//!
//! Six hand-written emails, enough to produce a working artifact pair when
//! no real dataset has been built yet.

use super::TrainingSample;

pub const PHISH: &str = "phish";
pub const SAFE: &str = "safe";

const SYNTHETIC: &[(&str, &str)] = &[
    (
        "From: billing@vendor-payments.example.test\nSubject: Invoice #INV-9012 - Payment Failed\nDear Accounts Payable, update your payment details here: https://vendor-payments.example.test/update?ref=INV-9012",
        PHISH,
    ),
    (
        "From: \"Rahul Mehta (CFO)\" <rahul.mehta@company-payments.example.test>\nReply-To: rahul.mehta@gmail-example.test\nSubject: Immediate: Wire transfer needed - today\nPlease process an urgent wire transfer of INR 50,00,000 RIGHT NOW",
        PHISH,
    ),
    (
        "From: security@bank.example.test\nSubject: Account verification required\nClick https://example.test/verify to avoid suspension",
        PHISH,
    ),
    (
        "From: priya.kumar@evonics.com\nSubject: Team lunch on Friday\nHi team, reply with preferences.",
        SAFE,
    ),
    (
        "From: hr@evonics.com\nSubject: Payroll processed - payslip attached\nHello Aravind, your payslip is attached.",
        SAFE,
    ),
    (
        "From: maria@evonics.com\nSubject: Project sync - weekly update\nPlease find attached the weekly report and agenda for tomorrow's meeting.",
        SAFE,
    ),
];

pub fn synthetic_samples() -> Vec<TrainingSample> {
    SYNTHETIC
        .iter()
        .map(|(text, label)| TrainingSample::new(*text, *label))
        .collect()
}
