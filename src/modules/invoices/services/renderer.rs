// Invoice document renderer.
//
// `render` is a pure function of the invoice record: the same value always
// produces byte-identical HTML, and every date on the document comes from the
// record itself, never from the clock. Both output modes carry identical
// document content; screen mode only adds a non-printing action toolbar for
// the status workflow.
//
// Absent optional fields render as nothing at all. No placeholder labels, no
// "undefined" artifacts.

use rust_decimal::Decimal;

use crate::core::money;
use crate::core::timezone;
use crate::modules::invoices::models::{BankDetails, Invoice};

/// Fine print at the foot of every document.
const FOOTER_TEXT: &str = "This is a computer generated invoice and does not require a signature.";

/// How the document will be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// In-app view with the status/print controls attached.
    Screen,
    /// Standalone document for browser printing or PDF capture.
    Print,
}

/// Renders an invoice as a self-contained HTML document.
pub fn render(invoice: &Invoice, mode: RenderMode) -> String {
    let toolbar = match mode {
        RenderMode::Screen => render_toolbar(invoice),
        RenderMode::Print => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Invoice {number}</title>
<style>
body {{ font-family: Arial, sans-serif; margin: 40px; color: #222; }}
.toolbar {{ display: flex; gap: 8px; justify-content: flex-end; margin-bottom: 20px; }}
.header {{ display: flex; justify-content: space-between; margin-bottom: 30px; }}
.header h1 {{ margin: 0 0 8px 0; font-size: 1.6em; letter-spacing: 2px; }}
.header h2 {{ margin: 0 0 8px 0; }}
.invoice-meta {{ text-align: right; }}
.parties {{ display: flex; justify-content: space-between; margin-bottom: 24px; }}
.parties h3 {{ margin: 0 0 6px 0; border-bottom: 1px solid #ccc; }}
p {{ margin: 2px 0; }}
table {{ width: 100%; border-collapse: collapse; margin: 16px 0; }}
th, td {{ padding: 8px; border-bottom: 1px solid #ddd; text-align: left; }}
th {{ background-color: #f0f0f0; }}
td.num, th.num {{ text-align: right; }}
.item-desc {{ color: #666; font-size: 0.9em; }}
.totals {{ margin-left: auto; width: 280px; }}
.totals .row {{ display: flex; justify-content: space-between; margin: 4px 0; }}
.totals .grand {{ font-weight: bold; font-size: 1.15em; border-top: 1px solid #222; padding-top: 4px; }}
.notes, .bank-details {{ margin-top: 24px; }}
.notes h3, .bank-details h3 {{ margin: 0 0 6px 0; }}
.footer {{ margin-top: 40px; text-align: center; color: #888; font-size: 0.85em; }}
@media print {{ .no-print {{ display: none; }} body {{ margin: 20px; }} }}
</style>
</head>
<body>
{toolbar}{header}
{parties}
{items}
{totals}
{notes}{bank}<div class="footer">{footer}</div>
</body>
</html>
"#,
        number = escape_html(&invoice.invoice_number),
        toolbar = toolbar,
        header = render_header(invoice),
        parties = render_parties(invoice),
        items = render_items_table(invoice),
        totals = render_totals(invoice),
        notes = render_notes(invoice),
        bank = render_bank_details(invoice),
        footer = FOOTER_TEXT,
    )
}

fn render_toolbar(invoice: &Invoice) -> String {
    format!(
        r#"<div class="toolbar no-print">
<span class="status" data-status="{status}">Status: {status}</span>
<button type="button" data-action="print">Print</button>
<button type="button" data-action="download-pdf">Download PDF</button>
</div>
"#,
        status = invoice.status,
    )
}

fn render_header(invoice: &Invoice) -> String {
    let mut business = String::new();
    let mut meta = String::new();

    if let Some(profile) = &invoice.business_profile {
        push_heading(&mut business, &profile.company_name);
        push_line_opt(&mut business, profile.address.as_deref());
        push_line(&mut business, &locality_line(
            profile.city.as_deref(),
            profile.state.as_deref(),
            profile.pincode.as_deref(),
        ));
        push_labeled_opt(&mut business, "GSTIN", profile.gst_number.as_deref());
        push_labeled_opt(&mut business, "PAN", profile.pan_number.as_deref());
        push_labeled_opt(&mut business, "Phone", profile.phone.as_deref());
        push_labeled_opt(&mut business, "Email", profile.email.as_deref());
    }

    meta.push_str("<h1>TAX INVOICE</h1>\n");
    push_labeled_opt(&mut meta, "Invoice #", Some(&invoice.invoice_number));
    push_labeled_opt(
        &mut meta,
        "Date",
        Some(timezone::format_document_date(invoice.invoice_date).as_str()),
    );
    if let Some(due) = invoice.due_date {
        push_labeled_opt(
            &mut meta,
            "Due Date",
            Some(timezone::format_document_date(due).as_str()),
        );
    }
    if let Some(profile) = &invoice.business_profile {
        push_labeled_opt(&mut meta, "State", profile.state.as_deref());
    }

    format!(
        "<div class=\"header\">\n<div class=\"business\">\n{}</div>\n<div class=\"invoice-meta\">\n{}</div>\n</div>",
        business, meta
    )
}

fn render_parties(invoice: &Invoice) -> String {
    let customer = &invoice.customer;

    let mut address_block = String::new();
    push_line(&mut address_block, &format!("<strong>{}</strong>", escape_html(&customer.name)));
    push_line_opt(&mut address_block, customer.address.as_deref());
    push_line(&mut address_block, &locality_line(
        customer.city.as_deref(),
        customer.state.as_deref(),
        customer.pincode.as_deref(),
    ));

    let mut bill_to = address_block.clone();
    push_labeled_opt(&mut bill_to, "Phone", customer.phone.as_deref());
    push_labeled_opt(&mut bill_to, "Email", customer.email.as_deref());

    // no separate shipping address is modeled; ship-to mirrors bill-to
    format!(
        "<div class=\"parties\">\n<div class=\"bill-to\">\n<h3>Bill To</h3>\n{}</div>\n<div class=\"ship-to\">\n<h3>Ship To</h3>\n{}</div>\n</div>",
        bill_to, address_block
    )
}

fn render_items_table(invoice: &Invoice) -> String {
    let mut rows = String::new();

    for (idx, item) in invoice.items.iter().enumerate() {
        let description = match item.description.as_deref() {
            Some(d) if !d.is_empty() => format!(
                "{}<br><span class=\"item-desc\">{}</span>",
                escape_html(&item.product_name),
                escape_html(d)
            ),
            _ => escape_html(&item.product_name),
        };

        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            idx + 1,
            description,
            format_quantity(item.quantity),
            money::format_amount(item.rate),
            money::format_amount(item.amount),
        ));
    }

    format!(
        "<table>\n<thead>\n<tr><th>S.No</th><th>Description</th><th class=\"num\">Qty</th><th class=\"num\">Rate</th><th class=\"num\">Amount</th></tr>\n</thead>\n<tbody>\n{}</tbody>\n</table>",
        rows
    )
}

fn render_totals(invoice: &Invoice) -> String {
    let totals = invoice.totals();
    let split_rate = format_rate(invoice.split_rate());

    format!(
        r#"<div class="totals">
<div class="row"><span>Subtotal</span><span>{subtotal}</span></div>
<div class="row"><span>CGST ({rate}%)</span><span>{cgst}</span></div>
<div class="row"><span>SGST ({rate}%)</span><span>{sgst}</span></div>
<div class="row grand"><span>Total</span><span>{total}</span></div>
</div>"#,
        subtotal = money::format_grouped(totals.subtotal),
        rate = split_rate,
        cgst = money::format_grouped(totals.cgst_amount()),
        sgst = money::format_grouped(totals.sgst_amount()),
        total = money::format_grouped(totals.total),
    )
}

fn render_notes(invoice: &Invoice) -> String {
    match invoice.notes.as_deref() {
        Some(notes) if !notes.is_empty() => format!(
            "<div class=\"notes\">\n<h3>Notes</h3>\n<p>{}</p>\n</div>\n",
            escape_html(notes)
        ),
        _ => String::new(),
    }
}

fn render_bank_details(invoice: &Invoice) -> String {
    // invoice-level details win over the profile's bank fields
    let details: Option<BankDetails> = invoice
        .bank_details
        .clone()
        .or_else(|| invoice.business_profile.as_ref().and_then(|p| p.bank_details()));

    let Some(details) = details else {
        return String::new();
    };

    let mut body = String::new();
    push_labeled_opt(&mut body, "Bank Name", Some(&details.bank_name));
    push_labeled_opt(&mut body, "A/C No", Some(&details.account_number));
    push_labeled_opt(&mut body, "IFSC", Some(&details.ifsc_code));
    push_labeled_opt(&mut body, "Account Holder", Some(&details.account_holder));

    format!(
        "<div class=\"bank-details\">\n<h3>Bank Details</h3>\n{}</div>\n",
        body
    )
}

/// City, state and pincode on one escaped line, skipping whatever is absent.
fn locality_line(city: Option<&str>, state: Option<&str>, pincode: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::new();
    for part in [city, state, pincode] {
        if let Some(value) = part {
            if !value.trim().is_empty() {
                parts.push(escape_html(value));
            }
        }
    }
    parts.join(", ")
}

fn push_heading(out: &mut String, text: &str) {
    if !text.is_empty() {
        out.push_str(&format!("<h2>{}</h2>\n", escape_html(text)));
    }
}

fn push_line(out: &mut String, html: &str) {
    if !html.is_empty() {
        out.push_str(&format!("<p>{}</p>\n", html));
    }
}

fn push_line_opt(out: &mut String, text: Option<&str>) {
    if let Some(text) = text {
        if !text.is_empty() {
            out.push_str(&format!("<p>{}</p>\n", escape_html(text)));
        }
    }
}

fn push_labeled_opt(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            out.push_str(&format!(
                "<p><strong>{}:</strong> {}</p>\n",
                label,
                escape_html(value)
            ));
        }
    }
}

/// Quantities print without trailing zeros: 2 not 2.00, 2.5 not 2.50.
fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

/// Tax rates print without trailing zeros: 9% not 9.0%, 2.5% stays 2.5%.
fn format_rate(rate: Decimal) -> String {
    rate.normalize().to_string()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
