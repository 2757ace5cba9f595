use chrono::{DateTime, FixedOffset, Utc};

/// All timestamps are stored internally as UTC; invoice documents display
/// dates in Indian Standard Time (UTC+5:30).
pub fn utc_to_ist(utc_time: DateTime<Utc>) -> DateTime<FixedOffset> {
    let ist_offset = FixedOffset::east_opt(5 * 3600 + 1800).expect("Valid offset");
    utc_time.with_timezone(&ist_offset)
}

/// Formats a timestamp as the dd/mm/yyyy date shown on documents.
pub fn format_document_date(utc_time: DateTime<Utc>) -> String {
    utc_to_ist(utc_time).format("%d/%m/%Y").to_string()
}

/// Format timestamp as ISO 8601 UTC for API responses
pub fn format_iso8601(utc_time: DateTime<Utc>) -> String {
    utc_time.to_rfc3339()
}
