// Server-side PDF rendering of an invoice.
//
// A4 pages built with printpdf's builtin Helvetica; the section order matches
// the HTML document exactly: header, bill-to/ship-to, item table, CGST/SGST
// totals, notes, bank details, footer. Long item lists overflow onto
// additional pages.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use rust_decimal::Decimal;

use crate::core::money;
use crate::core::timezone;
use crate::core::{AppError, Result};
use crate::modules::invoices::models::{BankDetails, Invoice};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;

// item table column x-positions
const X_SNO: f32 = MARGIN;
const X_DESC: f32 = 28.0;
const X_QTY: f32 = 120.0;
const X_RATE: f32 = 145.0;
const X_AMOUNT: f32 = 172.0;

// a new page is started below this line
const PAGE_BREAK_AT: f32 = 30.0;

fn push_line(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    x: f32,
    y: f32,
) {
    layer.use_text(text, font_size, Mm(x), Mm(y), font);
}

fn draw_rule(layer: &PdfLayerReference, y: f32) {
    layer.add_line(printpdf::Line {
        points: vec![
            (printpdf::Point::new(Mm(MARGIN), Mm(y)), false),
            (printpdf::Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
        ],
        is_closed: false,
    });
}

/// Renders the invoice as PDF bytes. Deterministic for a given invoice value.
pub fn render(invoice: &Invoice) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice {}", invoice.invoice_number),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Page 1",
    );
    let mut layer = doc.get_page(page).get_layer(layer);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::internal(format!("PDF font error: {}", e)))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::internal(format!("PDF font error: {}", e)))?;

    let mut y: f32 = PAGE_HEIGHT - 12.0;

    // Header: business identity (left)
    if let Some(profile) = &invoice.business_profile {
        push_line(&layer, &font_bold, &profile.company_name, 16.0, MARGIN, y);
        y -= 7.0;
        for line in [
            profile.address.clone(),
            locality_line(profile),
            profile.gst_number.as_ref().map(|g| format!("GSTIN: {}", g)),
            profile.pan_number.as_ref().map(|p| format!("PAN: {}", p)),
            profile.phone.as_ref().map(|p| format!("Phone: {}", p)),
            profile.email.as_ref().map(|e| format!("Email: {}", e)),
        ]
        .into_iter()
        .flatten()
        .filter(|l| !l.trim().is_empty())
        {
            push_line(&layer, &font, &line, 10.0, MARGIN, y);
            y -= 5.0;
        }
    }

    // Header: invoice metadata (right)
    push_line(&layer, &font_bold, "TAX INVOICE", 20.0, 138.0, PAGE_HEIGHT - 12.0);
    let mut meta_y = PAGE_HEIGHT - 20.0;
    push_line(
        &layer,
        &font_bold,
        &format!("Invoice #: {}", invoice.invoice_number),
        10.0,
        138.0,
        meta_y,
    );
    meta_y -= 5.0;
    push_line(
        &layer,
        &font,
        &format!("Date: {}", timezone::format_document_date(invoice.invoice_date)),
        10.0,
        138.0,
        meta_y,
    );
    if let Some(due) = invoice.due_date {
        meta_y -= 5.0;
        push_line(
            &layer,
            &font,
            &format!("Due Date: {}", timezone::format_document_date(due)),
            10.0,
            138.0,
            meta_y,
        );
    }
    if let Some(state) = invoice
        .business_profile
        .as_ref()
        .and_then(|p| p.state.as_deref())
    {
        meta_y -= 5.0;
        push_line(&layer, &font, &format!("State: {}", state), 10.0, 138.0, meta_y);
    }

    y = y.min(meta_y) - 6.0;
    draw_rule(&layer, y);
    y -= 8.0;

    // Bill To / Ship To
    push_line(&layer, &font_bold, "Bill To:", 11.0, MARGIN, y);
    push_line(&layer, &font_bold, "Ship To:", 11.0, 110.0, y);
    y -= 6.0;

    let customer = &invoice.customer;
    let mut address_lines = vec![customer.name.clone()];
    if let Some(address) = &customer.address {
        address_lines.push(address.clone());
    }
    let locality = [
        customer.city.as_deref(),
        customer.state.as_deref(),
        customer.pincode.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ");
    if !locality.is_empty() {
        address_lines.push(locality);
    }

    for line in &address_lines {
        // ship-to mirrors bill-to; no separate shipping address is modeled
        push_line(&layer, &font, line, 10.0, MARGIN, y);
        push_line(&layer, &font, line, 10.0, 110.0, y);
        y -= 5.0;
    }

    y -= 6.0;

    // Item table header
    push_line(&layer, &font_bold, "S.No", 10.0, X_SNO, y);
    push_line(&layer, &font_bold, "Description", 10.0, X_DESC, y);
    push_line(&layer, &font_bold, "Qty", 10.0, X_QTY, y);
    push_line(&layer, &font_bold, "Rate", 10.0, X_RATE, y);
    push_line(&layer, &font_bold, "Amount", 10.0, X_AMOUNT, y);
    y -= 2.5;
    draw_rule(&layer, y);
    y -= 6.0;

    let mut page_no = 1;
    for (idx, item) in invoice.items.iter().enumerate() {
        if y < PAGE_BREAK_AT {
            page_no += 1;
            let (next_page, next_layer) = doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Page {}", page_no),
            );
            layer = doc.get_page(next_page).get_layer(next_layer);
            y = PAGE_HEIGHT - 20.0;
        }

        push_line(&layer, &font, &format!("{}", idx + 1), 10.0, X_SNO, y);
        push_line(&layer, &font, &item.product_name, 10.0, X_DESC, y);
        push_line(&layer, &font, &format_quantity(item.quantity), 10.0, X_QTY, y);
        push_line(&layer, &font, &money::format_amount(item.rate), 10.0, X_RATE, y);
        push_line(&layer, &font, &money::format_amount(item.amount), 10.0, X_AMOUNT, y);
        y -= 5.0;

        if let Some(description) = item.description.as_deref() {
            if !description.is_empty() {
                push_line(&layer, &font, description, 8.0, X_DESC, y);
                y -= 4.5;
            }
        }
    }

    y -= 2.0;
    draw_rule(&layer, y);
    y -= 8.0;

    // Totals
    let totals = invoice.totals();
    let split_rate = invoice.split_rate().normalize();

    push_line(&layer, &font, "Subtotal:", 10.0, X_RATE, y);
    push_line(&layer, &font, &money::format_grouped(totals.subtotal), 10.0, X_AMOUNT, y);
    y -= 5.5;
    push_line(&layer, &font, &format!("CGST ({}%):", split_rate), 10.0, X_RATE, y);
    push_line(&layer, &font, &money::format_grouped(totals.cgst_amount()), 10.0, X_AMOUNT, y);
    y -= 5.5;
    push_line(&layer, &font, &format!("SGST ({}%):", split_rate), 10.0, X_RATE, y);
    push_line(&layer, &font, &money::format_grouped(totals.sgst_amount()), 10.0, X_AMOUNT, y);
    y -= 6.5;
    push_line(&layer, &font_bold, "Total:", 12.0, X_RATE, y);
    push_line(&layer, &font_bold, &money::format_grouped(totals.total), 12.0, X_AMOUNT, y);

    // Notes
    if let Some(notes) = invoice.notes.as_deref() {
        if !notes.trim().is_empty() {
            y -= 12.0;
            push_line(&layer, &font_bold, "Notes:", 11.0, MARGIN, y);
            y -= 5.5;
            for line in notes.lines() {
                if y < PAGE_BREAK_AT {
                    break;
                }
                push_line(&layer, &font, line, 10.0, MARGIN, y);
                y -= 5.0;
            }
        }
    }

    // Bank details
    let bank: Option<BankDetails> = invoice
        .bank_details
        .clone()
        .or_else(|| invoice.business_profile.as_ref().and_then(|p| p.bank_details()));
    if let Some(details) = bank {
        y -= 12.0;
        push_line(&layer, &font_bold, "Bank Details:", 11.0, MARGIN, y);
        y -= 5.5;
        for line in [
            format!("Bank Name: {}", details.bank_name),
            format!("A/C No: {}", details.account_number),
            format!("IFSC: {}", details.ifsc_code),
            format!("Account Holder: {}", details.account_holder),
        ] {
            push_line(&layer, &font, &line, 10.0, MARGIN, y);
            y -= 5.0;
        }
    }

    // Footer
    push_line(
        &layer,
        &font,
        "This is a computer generated invoice and does not require a signature.",
        8.0,
        MARGIN,
        10.0,
    );

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| AppError::internal(format!("PDF save error: {}", e)))?;
    writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("PDF buffer error: {}", e)))
}

fn locality_line(profile: &crate::modules::profile::models::BusinessProfile) -> Option<String> {
    let joined = [
        profile.city.as_deref(),
        profile.state.as_deref(),
        profile.pincode.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ");

    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}
