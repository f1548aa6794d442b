use http::request::Parts;
use pretty_assertions::assert_eq;
use winazure_core::{Context, Signer};
use winazure_storage::{
    CanonicalizationMode, Credential, RequestSigner, StaticCredentialProvider, X_MS_DATE,
};

use super::{authorization, devstore_credential, signing_time};

fn storage_signer() -> RequestSigner {
    RequestSigner::new(CanonicalizationMode::Storage).with_time(signing_time())
}

fn put_blob(headers: &[(&str, &str)]) -> Parts {
    let mut builder =
        http::Request::put("http://127.0.0.1:10000/devstoreaccount1/mycontainer/hello.txt");
    for (k, v) in headers {
        builder = builder.header(*k, *v);
    }
    builder.body(()).expect("request must build").into_parts().0
}

#[test]
fn test_put_blob_path_style() {
    let mut parts = put_blob(&[
        ("Content-Type", "text/plain"),
        ("x-ms-version", "2009-09-19"),
        ("x-ms-blob-type", "BlockBlob"),
    ]);

    storage_signer()
        .sign(&mut parts, &devstore_credential())
        .expect("sign must succeed");

    assert_eq!(
        parts.headers[X_MS_DATE].to_str().expect("ascii"),
        "Tue, 01 Mar 2022 08:12:34 GMT"
    );
    assert_eq!(
        authorization(&parts),
        "SharedKey devstoreaccount1:RgqOnilxEof7gGS5jH+0X2bqrz0HkoaNMPx2idoIYZU="
    );
}

#[test]
fn test_header_order_and_case_do_not_matter() {
    let mut a = put_blob(&[
        ("Content-Type", "text/plain"),
        ("x-ms-version", "2009-09-19"),
        ("x-ms-blob-type", "BlockBlob"),
    ]);
    let mut b = put_blob(&[
        ("X-MS-Blob-Type", "BlockBlob"),
        ("content-type", "text/plain"),
        ("X-Ms-Version", " 2009-09-19"),
    ]);

    let signer = storage_signer();
    signer
        .sign(&mut a, &devstore_credential())
        .expect("sign must succeed");
    signer
        .sign(&mut b, &devstore_credential())
        .expect("sign must succeed");

    assert_eq!(authorization(&a), authorization(&b));
}

#[test]
fn test_signing_is_deterministic() {
    let signer = storage_signer();
    let sign = || {
        let mut parts = put_blob(&[("x-ms-version", "2009-09-19")]);
        signer
            .sign(&mut parts, &devstore_credential())
            .expect("sign must succeed");
        authorization(&parts).to_string()
    };

    assert_eq!(sign(), sign());
}

#[test]
fn test_list_queues_keeps_comp_only() {
    let mut parts =
        http::Request::get("http://127.0.0.1:10001/devstoreaccount1/?comp=list&maxresults=5")
            .header("x-ms-version", "2009-09-19")
            .body(())
            .expect("request must build")
            .into_parts()
            .0;

    storage_signer()
        .sign(&mut parts, &devstore_credential())
        .expect("sign must succeed");

    assert_eq!(
        authorization(&parts),
        "SharedKey devstoreaccount1:4RzrL1/hwkvKU2Xw2igtIZfrBaeGnJZMbsNd1lJXe+U="
    );
}

#[test]
fn test_virtual_host_style() {
    let cred = Credential::with_shared_key("myaccount", winazure_storage::DEVSTORE_SECRET_KEY)
        .expect("key must decode");
    let mut parts = http::Request::get(
        "https://myaccount.blob.core.windows.net/mycontainer?restype=container&comp=metadata",
    )
    .header("x-ms-version", "2009-09-19")
    .header("x-ms-meta-a", "1")
    .body(())
    .expect("request must build")
    .into_parts()
    .0;

    storage_signer()
        .sign(&mut parts, &cred)
        .expect("sign must succeed");

    assert_eq!(
        authorization(&parts),
        "SharedKey myaccount:WrmkTy9PmG11yzZ8Si1Yw8j0J3du4XTUNd+EoqHUXf0="
    );
}

#[test]
fn test_explicit_path_style_overrides_inference() {
    let mut inferred = put_blob(&[("x-ms-version", "2009-09-19")]);
    let mut forced = put_blob(&[("x-ms-version", "2009-09-19")]);

    storage_signer()
        .sign(&mut inferred, &devstore_credential())
        .expect("sign must succeed");
    storage_signer()
        .with_path_style_uris(false)
        .sign(&mut forced, &devstore_credential())
        .expect("sign must succeed");

    assert_ne!(authorization(&inferred), authorization(&forced));
}

#[tokio::test]
async fn test_signer_with_static_provider() {
    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::from(devstore_credential()),
        storage_signer(),
    );

    let mut parts = put_blob(&[
        ("Content-Type", "text/plain"),
        ("x-ms-version", "2009-09-19"),
        ("x-ms-blob-type", "BlockBlob"),
    ]);
    signer.sign(&mut parts).await.expect("sign must succeed");

    assert_eq!(
        authorization(&parts),
        "SharedKey devstoreaccount1:RgqOnilxEof7gGS5jH+0X2bqrz0HkoaNMPx2idoIYZU="
    );
}
