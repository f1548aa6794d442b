use http::request::Parts;
use pretty_assertions::assert_eq;
use winazure_storage::{CanonicalizationMode, RequestSigner, X_MS_DATE};

use super::{authorization, devstore_credential, signing_time};

fn query_tables() -> Parts {
    http::Request::get("http://127.0.0.1:10002/devstoreaccount1/Tables")
        .header("x-ms-version", "2009-09-19")
        .header("Content-Type", "application/atom+xml")
        .body(())
        .expect("request must build")
        .into_parts()
        .0
}

fn sign(mode: CanonicalizationMode) -> Parts {
    let mut parts = query_tables();
    RequestSigner::new(mode)
        .with_time(signing_time())
        .sign(&mut parts, &devstore_credential())
        .expect("sign must succeed");
    parts
}

#[test]
fn test_query_tables() {
    let parts = sign(CanonicalizationMode::Table);

    assert_eq!(
        authorization(&parts),
        "SharedKey devstoreaccount1:3fnEgKJVbI5hPtHEvWsKSOsOATb4m9WS+wGfDPDKfiE="
    );
    // Still sent even though the header block is not signed.
    assert_eq!(
        parts.headers[X_MS_DATE].to_str().expect("ascii"),
        "Tue, 01 Mar 2022 08:12:34 GMT"
    );
}

#[test]
fn test_table_ignores_ms_headers() {
    let mut parts = query_tables();
    parts
        .headers
        .insert("x-ms-client-request-id", "abc".parse().expect("valid value"));
    RequestSigner::new(CanonicalizationMode::Table)
        .with_time(signing_time())
        .sign(&mut parts, &devstore_credential())
        .expect("sign must succeed");

    assert_eq!(
        authorization(&parts),
        authorization(&sign(CanonicalizationMode::Table))
    );
}

#[test]
fn test_modes_differ() {
    assert_ne!(
        authorization(&sign(CanonicalizationMode::Table)),
        authorization(&sign(CanonicalizationMode::Storage))
    );
}
