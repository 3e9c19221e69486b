//! Presentation helpers shared by both report renderers

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Runs of anything that is not an ASCII letter or digit
    static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^a-zA-Z0-9]+").unwrap();
}

const MAX_FILENAME_ADDRESS_LEN: usize = 50;

/// Report date as "D-Mon-YYYY", e.g. "5-Mar-2025"
pub fn format_report_date(date: &DateTime<Utc>) -> String {
    date.format("%-d-%b-%Y").to_string()
}

/// Lowercase, dash-separated address fragment safe for use in a filename
pub fn sanitize_address_for_filename(address: &str) -> String {
    let dashed = NON_ALPHANUMERIC.replace_all(address, "-");
    dashed
        .trim_matches('-')
        .chars()
        .take(MAX_FILENAME_ADDRESS_LEN)
        .collect::<String>()
        .to_lowercase()
}

/// "landlord-audit-report-{address}-{YYYY-MM-DD}.pdf"
pub fn report_filename(property_address: &str, report_date: &DateTime<Utc>) -> String {
    format!(
        "landlord-audit-report-{}-{}.pdf",
        sanitize_address_for_filename(property_address),
        report_date.format("%Y-%m-%d")
    )
}
