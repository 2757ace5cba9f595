// Contract tests for the invoice API payloads.
//
// These pin the wire shapes: field names, optionality and enum values, so a
// client built against the API keeps working.

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use serde_json::json;

use billforge::invoices::models::{
    CreateInvoiceRequest, Customer, Invoice, InvoiceStatus, LineItem,
};

#[test]
fn create_invoice_request_accepts_the_documented_shape() {
    let body = json!({
        "customer": {
            "name": "Acme Traders",
            "email": "billing@acme.example",
            "phone": "+91 98000 00000",
            "address": "14 MG Road",
            "city": "Pune",
            "state": "Maharashtra",
            "pincode": "411001"
        },
        "items": [
            {
                "product_id": "p-1",
                "product_name": "Steel pipe",
                "description": "20mm galvanized",
                "quantity": "2",
                "rate": "100.00"
            },
            {
                "product_name": "Elbow joint",
                "quantity": "1",
                "rate": "50.00"
            }
        ],
        "tax_rate": "18",
        "bank_details": null,
        "notes": "Thank you"
    });

    let request: CreateInvoiceRequest = serde_json::from_value(body).unwrap();
    assert_eq!(request.customer.name, "Acme Traders");
    assert_eq!(request.items.len(), 2);
    assert_eq!(request.items[1].product_id, None);
    assert_eq!(request.tax_rate, dec!(18));
    assert!(request.bank_details.is_none());
    assert_eq!(request.notes.as_deref(), Some("Thank you"));
}

#[test]
fn tax_rate_defaults_to_eighteen_when_omitted() {
    let body = json!({
        "customer": { "name": "Acme Traders" },
        "items": [
            { "product_name": "Steel pipe", "quantity": "1", "rate": "10" }
        ]
    });

    let request: CreateInvoiceRequest = serde_json::from_value(body).unwrap();
    assert_eq!(request.tax_rate, dec!(18));
}

#[test]
fn invoice_response_carries_server_owned_fields() {
    let invoice = Invoice {
        id: "b9c7a1f2-0000-0000-0000-000000000000".to_string(),
        invoice_number: "INV-0007".to_string(),
        customer: Customer {
            name: "Acme Traders".to_string(),
            ..Customer::default()
        },
        items: vec![LineItem::new(None, "Steel pipe".to_string(), None, dec!(2), dec!(100)).unwrap()],
        subtotal: dec!(200.00),
        tax_rate: dec!(18),
        tax_amount: dec!(36.00),
        total_amount: dec!(236.00),
        bank_details: None,
        notes: None,
        status: InvoiceStatus::Draft,
        invoice_date: Utc.with_ymd_and_hms(2025, 4, 1, 6, 0, 0).unwrap(),
        due_date: None,
        business_profile: None,
        created_by: "admin".to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 4, 1, 6, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 4, 1, 6, 0, 0).unwrap(),
    };

    let value = serde_json::to_value(&invoice).unwrap();

    for field in [
        "id",
        "invoice_number",
        "customer",
        "items",
        "subtotal",
        "tax_rate",
        "tax_amount",
        "total_amount",
        "status",
        "invoice_date",
        "created_by",
        "created_at",
        "updated_at",
    ] {
        assert!(value.get(field).is_some(), "missing field {}", field);
    }

    assert_eq!(value["status"], "draft");
    assert_eq!(value["invoice_number"], "INV-0007");
    assert_eq!(value["items"][0]["product_name"], "Steel pipe");
    assert!(value["items"][0].get("amount").is_some());
}

#[test]
fn status_enum_matches_wire_values() {
    for (status, wire) in [
        (InvoiceStatus::Draft, json!("draft")),
        (InvoiceStatus::Sent, json!("sent")),
        (InvoiceStatus::Paid, json!("paid")),
        (InvoiceStatus::Overdue, json!("overdue")),
    ] {
        assert_eq!(serde_json::to_value(status).unwrap(), wire);
        let parsed: InvoiceStatus = serde_json::from_value(wire).unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn unknown_item_fields_are_ignored_not_fatal() {
    // clients may send the derived amount; the server recomputes it
    let body = json!({
        "customer": { "name": "Acme Traders" },
        "items": [
            { "product_name": "Steel pipe", "quantity": "2", "rate": "100", "amount": "9999" }
        ]
    });

    let request: CreateInvoiceRequest = serde_json::from_value(body).unwrap();
    let draft = request.into_draft().unwrap();
    assert_eq!(draft.items[0].amount, dec!(200));
}
