use anyhow::Result;
use bytes::Bytes;
use winazure_core::{Context, OsEnv, Signer};
use winazure_http_send_reqwest::ReqwestHttpSend;
use winazure_storage::{Config, ConfigCredentialProvider, RequestSigner, Service};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    // Falls back to the local storage emulator when no account is configured.
    let mut config = Config::default().from_env(&ctx);
    if config.account_name.is_none() {
        println!("AZURE_STORAGE_ACCOUNT is not set, using the development storage");
        config = Config::development();
    }

    let base_url = config.base_url(Service::Blob)?;
    let signer = Signer::new(
        ctx.clone(),
        ConfigCredentialProvider::new(config),
        RequestSigner::new(Service::Blob.mode()),
    );

    let (mut parts, body) = http::Request::get(format!("{base_url}/?comp=list"))
        .header("x-ms-version", "2009-09-19")
        .body(Bytes::new())?
        .into_parts();
    signer.sign(&mut parts).await?;

    let resp = ctx.http_send(http::Request::from_parts(parts, body)).await?;
    println!("status: {}", resp.status());
    println!("{}", String::from_utf8_lossy(resp.body()));

    Ok(())
}
