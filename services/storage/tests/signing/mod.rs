mod shared_key;
mod table;

use chrono::TimeZone;
use winazure_core::time::DateTime;
use winazure_storage::{Credential, DEVSTORE_ACCOUNT, DEVSTORE_SECRET_KEY};

/// Tue, 01 Mar 2022 08:12:34 GMT
fn signing_time() -> DateTime {
    chrono::Utc
        .with_ymd_and_hms(2022, 3, 1, 8, 12, 34)
        .single()
        .expect("valid time")
}

fn devstore_credential() -> Credential {
    Credential::with_shared_key(DEVSTORE_ACCOUNT, DEVSTORE_SECRET_KEY)
        .expect("devstore key must decode")
}

fn authorization(parts: &http::request::Parts) -> &str {
    parts
        .headers
        .get(http::header::AUTHORIZATION)
        .expect("authorization must be set")
        .to_str()
        .expect("authorization must be ascii")
}
