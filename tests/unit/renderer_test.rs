// Rendering tests: the document is a pure function of the invoice record,
// with a fixed section order and a uniform blank policy for missing fields.

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use billforge::invoices::models::{BankDetails, Customer, Invoice, InvoiceStatus, LineItem};
use billforge::invoices::services::renderer::{render, RenderMode};
use billforge::invoices::services::pdf;
use billforge::profile::models::BusinessProfile;

fn profile() -> BusinessProfile {
    BusinessProfile {
        company_name: "Sharma Enterprises".to_string(),
        gst_number: Some("27AABCS1234A1Z5".to_string()),
        pan_number: Some("AABCS1234A".to_string()),
        address: Some("Plot 7, Industrial Estate".to_string()),
        city: Some("Mumbai".to_string()),
        state: Some("Maharashtra".to_string()),
        pincode: Some("400001".to_string()),
        phone: Some("+91 98765 43210".to_string()),
        email: Some("accounts@sharma.example".to_string()),
        bank_name: Some("State Bank of India".to_string()),
        account_number: Some("12345678901".to_string()),
        ifsc_code: Some("SBIN0001234".to_string()),
        account_holder: Some("Sharma Enterprises".to_string()),
        updated_at: None,
    }
}

fn invoice() -> Invoice {
    Invoice {
        id: "inv-1".to_string(),
        invoice_number: "INV-0042".to_string(),
        customer: Customer {
            name: "Acme Traders".to_string(),
            email: Some("billing@acme.example".to_string()),
            phone: None,
            address: Some("14 MG Road".to_string()),
            city: Some("Pune".to_string()),
            state: Some("Maharashtra".to_string()),
            pincode: Some("411001".to_string()),
        },
        items: vec![
            LineItem::new(
                Some("p-1".to_string()),
                "Steel pipe".to_string(),
                Some("20mm galvanized".to_string()),
                dec!(2),
                dec!(100),
            )
            .unwrap(),
            LineItem::new(None, "Elbow joint".to_string(), None, dec!(1), dec!(50)).unwrap(),
        ],
        subtotal: dec!(250.00),
        tax_rate: dec!(18),
        tax_amount: dec!(45.00),
        total_amount: dec!(295.00),
        bank_details: None,
        notes: None,
        status: InvoiceStatus::Sent,
        invoice_date: Utc.with_ymd_and_hms(2025, 4, 1, 6, 0, 0).unwrap(),
        due_date: Some(Utc.with_ymd_and_hms(2025, 4, 15, 6, 0, 0).unwrap()),
        business_profile: Some(profile()),
        created_by: "admin".to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 4, 1, 6, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 4, 1, 6, 0, 0).unwrap(),
    }
}

#[test]
fn identical_input_renders_identical_output() {
    let inv = invoice();
    assert_eq!(render(&inv, RenderMode::Print), render(&inv, RenderMode::Print));
    assert_eq!(render(&inv, RenderMode::Screen), render(&inv, RenderMode::Screen));
}

#[test]
fn sections_appear_in_fixed_order() {
    let html = render(&invoice(), RenderMode::Print);

    let header = html.find("TAX INVOICE").unwrap();
    let bill_to = html.find("Bill To").unwrap();
    let ship_to = html.find("Ship To").unwrap();
    let table = html.find("<th>S.No</th>").unwrap();
    let totals = html.find("Subtotal").unwrap();
    let bank = html.find("Bank Details").unwrap();
    let footer = html.find("computer generated invoice").unwrap();

    assert!(header < bill_to);
    assert!(bill_to < ship_to);
    assert!(ship_to < table);
    assert!(table < totals);
    assert!(totals < bank);
    assert!(bank < footer);
}

#[test]
fn header_carries_identity_and_metadata() {
    let html = render(&invoice(), RenderMode::Print);

    assert!(html.contains("Sharma Enterprises"));
    assert!(html.contains("27AABCS1234A1Z5"));
    assert!(html.contains("AABCS1234A"));
    assert!(html.contains("INV-0042"));
    assert!(html.contains("01/04/2025"));
    assert!(html.contains("15/04/2025"));
}

#[test]
fn ship_to_duplicates_bill_to_address() {
    let html = render(&invoice(), RenderMode::Print);
    assert_eq!(html.matches("Acme Traders").count(), 2);
    assert_eq!(html.matches("14 MG Road").count(), 2);
}

#[test]
fn line_items_numbered_one_to_n() {
    let html = render(&invoice(), RenderMode::Print);
    let first = html.find("<tr><td>1</td><td>Steel pipe").unwrap();
    let second = html.find("<tr><td>2</td><td>Elbow joint").unwrap();
    assert!(first < second);
    assert!(html.contains("20mm galvanized"));
}

#[test]
fn totals_block_shows_split_and_two_decimals() {
    let html = render(&invoice(), RenderMode::Print);
    assert!(html.contains("CGST (9%)"));
    assert!(html.contains("SGST (9%)"));
    assert!(html.contains("22.50"));
    assert!(html.contains("250.00"));
    assert!(html.contains("295.00"));
}

#[test]
fn empty_notes_render_no_notes_block() {
    let mut inv = invoice();
    inv.notes = None;
    assert!(!render(&inv, RenderMode::Print).contains("<h3>Notes</h3>"));

    inv.notes = Some(String::new());
    assert!(!render(&inv, RenderMode::Print).contains("<h3>Notes</h3>"));
}

#[test]
fn non_empty_notes_render_exactly_one_block() {
    let mut inv = invoice();
    inv.notes = Some("Thank you".to_string());

    let html = render(&inv, RenderMode::Print);
    assert_eq!(html.matches("<h3>Notes</h3>").count(), 1);
    assert!(html.contains("Thank you"));
}

#[test]
fn invoice_bank_details_win_over_profile_bank() {
    let mut inv = invoice();
    inv.bank_details = Some(BankDetails {
        bank_name: "HDFC Bank".to_string(),
        account_number: "999000111".to_string(),
        ifsc_code: "HDFC0000123".to_string(),
        account_holder: "Sharma Enterprises".to_string(),
    });

    let html = render(&inv, RenderMode::Print);
    assert!(html.contains("HDFC Bank"));
    assert!(!html.contains("State Bank of India"));
}

#[test]
fn profile_bank_used_when_invoice_has_none() {
    let html = render(&invoice(), RenderMode::Print);
    assert!(html.contains("State Bank of India"));
}

#[test]
fn no_bank_block_when_neither_source_has_bank() {
    let mut inv = invoice();
    inv.business_profile = None;
    let html = render(&inv, RenderMode::Print);
    assert!(!html.contains("Bank Details"));
}

#[test]
fn missing_profile_renders_blank_not_placeholder() {
    let mut inv = invoice();
    inv.business_profile = None;

    let html = render(&inv, RenderMode::Print);
    assert!(!html.contains("undefined"));
    assert!(!html.contains("Your Company"));
    assert!(!html.contains("Your Address"));
    // document content is still complete
    assert!(html.contains("TAX INVOICE"));
    assert!(html.contains("INV-0042"));
}

#[test]
fn screen_and_print_share_document_content() {
    let inv = invoice();
    let screen = render(&inv, RenderMode::Screen);
    let print = render(&inv, RenderMode::Print);

    for fragment in [
        "Sharma Enterprises",
        "Acme Traders",
        "Steel pipe",
        "CGST (9%)",
        "295.00",
        "State Bank of India",
    ] {
        assert!(screen.contains(fragment), "screen missing {}", fragment);
        assert!(print.contains(fragment), "print missing {}", fragment);
    }

    assert!(screen.contains("data-action=\"print\""));
    assert!(!print.contains("data-action=\"print\""));
}

#[test]
fn pdf_stream_is_non_empty() {
    let bytes = pdf::render(&invoice()).unwrap();

    assert!(!bytes.is_empty());
    assert!(bytes.starts_with(b"%PDF"));
}
