//! Time related utils.

/// DateTime used across winazure, always in UTC.
pub type DateTime = chrono::DateTime<chrono::Utc>;

/// Create a datetime of now.
pub fn now() -> DateTime {
    chrono::Utc::now()
}

/// Format time into RFC 1123 as used by the `x-ms-date` header: "Sun, 06 Nov 1994 08:49:37 GMT"
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
