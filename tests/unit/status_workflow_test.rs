// Invoice lifecycle: draft -> sent -> paid, with sent -> overdue -> paid for
// late settlement. Anything else is rejected.

use std::str::FromStr;

use billforge::invoices::models::InvoiceStatus;

#[test]
fn happy_path_draft_sent_paid() {
    assert!(InvoiceStatus::Draft.can_transition(InvoiceStatus::Sent));
    assert!(InvoiceStatus::Sent.can_transition(InvoiceStatus::Paid));
}

#[test]
fn overdue_branch_and_settlement() {
    assert!(InvoiceStatus::Sent.can_transition(InvoiceStatus::Overdue));
    assert!(InvoiceStatus::Overdue.can_transition(InvoiceStatus::Paid));
}

#[test]
fn no_shortcuts_or_reversals() {
    assert!(!InvoiceStatus::Draft.can_transition(InvoiceStatus::Paid));
    assert!(!InvoiceStatus::Draft.can_transition(InvoiceStatus::Overdue));
    assert!(!InvoiceStatus::Sent.can_transition(InvoiceStatus::Draft));
    assert!(!InvoiceStatus::Paid.can_transition(InvoiceStatus::Draft));
    assert!(!InvoiceStatus::Paid.can_transition(InvoiceStatus::Sent));
    assert!(!InvoiceStatus::Paid.can_transition(InvoiceStatus::Overdue));
    assert!(!InvoiceStatus::Overdue.can_transition(InvoiceStatus::Draft));
    assert!(!InvoiceStatus::Overdue.can_transition(InvoiceStatus::Sent));
}

#[test]
fn wire_format_is_lowercase() {
    for (status, text) in [
        (InvoiceStatus::Draft, "draft"),
        (InvoiceStatus::Sent, "sent"),
        (InvoiceStatus::Paid, "paid"),
        (InvoiceStatus::Overdue, "overdue"),
    ] {
        assert_eq!(status.to_string(), text);
        assert_eq!(InvoiceStatus::from_str(text), Ok(status));
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            format!("\"{}\"", text)
        );
    }
}

#[test]
fn unknown_status_is_rejected() {
    assert!(InvoiceStatus::from_str("cancelled").is_err());
    assert!(InvoiceStatus::from_str("Draft").is_err());
    assert!(InvoiceStatus::from_str("").is_err());
}
