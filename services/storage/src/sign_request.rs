use std::fmt::Write;

use async_trait::async_trait;
use http::header;
use http::request::Parts;
use http::HeaderValue;
use log::debug;
use winazure_core::hash::base64_hmac_sha256;
use winazure_core::time::{format_http_date, now, DateTime};
use winazure_core::{Context, Error, Result, SignRequest, SigningRequest};

use crate::constants::*;
use crate::Credential;

/// Layout of the string to sign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CanonicalizationMode {
    /// Blob and Queue services: canonicalized `x-ms-` headers are signed.
    #[default]
    Storage,
    /// Table service: `x-ms-date` is signed in the date slot, no header block.
    Table,
}

/// RequestSigner that implements Azure Storage Shared Key Authorization.
///
/// - [Authorize with Shared Key](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key)
#[derive(Debug, Clone, Default)]
pub struct RequestSigner {
    mode: CanonicalizationMode,
    use_path_style_uris: Option<bool>,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for the given canonicalization mode.
    pub fn new(mode: CanonicalizationMode) -> Self {
        Self {
            mode,
            use_path_style_uris: None,
            time: None,
        }
    }

    /// Force path style uris on or off.
    ///
    /// When unset, path style is used for hosts that are a literal IP address,
    /// such as the local storage emulator.
    pub fn with_path_style_uris(mut self, use_path_style_uris: bool) -> Self {
        self.use_path_style_uris = Some(use_path_style_uris);
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Canonicalization mode of this signer.
    pub fn mode(&self) -> CanonicalizationMode {
        self.mode
    }

    /// Sign the request in place with the given credential.
    ///
    /// Adds `x-ms-date` and `Authorization`; the method and uri are left untouched.
    pub fn sign(&self, req: &mut Parts, cred: &Credential) -> Result<()> {
        let mut ctx = SigningRequest::build(req)?;

        // Headers live in `ctx` until applied, give them back on failure too.
        let signed = self.sign_headers(&mut ctx, cred);
        ctx.apply(req)?;
        signed
    }

    fn sign_headers(&self, ctx: &mut SigningRequest, cred: &Credential) -> Result<()> {
        let use_path_style_uris = self
            .use_path_style_uris
            .unwrap_or_else(|| is_path_style_host(ctx.authority.as_str()));
        let now_time = self.time.unwrap_or_else(now);

        let string_to_sign = string_to_sign(
            ctx,
            cred.account_name(),
            self.mode,
            use_path_style_uris,
            now_time,
        )?;
        let signature = base64_hmac_sha256(cred.account_key(), string_to_sign.as_bytes());

        ctx.headers.insert(header::AUTHORIZATION, {
            let mut value: HeaderValue =
                format!("SharedKey {}:{}", cred.account_name(), signature.trim())
                    .parse()
                    .map_err(|e| {
                        Error::unexpected("failed to parse authorization header").with_source(e)
                    })?;
            value.set_sensitive(true);
            value
        });

        Ok(())
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Err(Error::request_invalid("credential is required"));
        };

        self.sign(req, cred)
    }
}

/// Check whether the authority is a literal `ip[:port]`.
///
/// Such hosts cannot carry the account as a subdomain, so the account
/// name is expected as the first path segment instead.
pub fn is_path_style_host(authority: &str) -> bool {
    !authority.is_empty()
        && authority
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ':')
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-MD5 (always empty) + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +                  (x-ms-date for tables, empty for storage)
/// CanonicalizedHeaders + "\n" +  (storage only)
/// CanonicalizedResource;
/// ```
fn string_to_sign(
    ctx: &mut SigningRequest,
    account_name: &str,
    mode: CanonicalizationMode,
    use_path_style_uris: bool,
    now_time: DateTime,
) -> Result<String> {
    ctx.headers.insert(
        X_MS_DATE,
        format_http_date(now_time)
            .parse()
            .map_err(|e| Error::unexpected("failed to parse x-ms-date header").with_source(e))?,
    );

    let mut s = String::with_capacity(128);

    writeln!(&mut s, "{}", ctx.method.as_str().to_uppercase())?;
    writeln!(&mut s)?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&header::CONTENT_TYPE))?;
    match mode {
        CanonicalizationMode::Table => {
            writeln!(
                &mut s,
                "{}",
                ctx.header_get_or_default(&header::HeaderName::from_static(X_MS_DATE))
            )?;
        }
        CanonicalizationMode::Storage => {
            writeln!(&mut s)?;
            writeln!(&mut s, "{}", canonicalize_header(ctx))?;
        }
    }
    write!(
        &mut s,
        "{}",
        canonicalize_resource(ctx, account_name, use_path_style_uris)
    )?;

    debug!("string to sign: {}", &s);

    Ok(s)
}

/// Sorted `name:value` lines of every `x-ms-` header.
///
/// Repeated headers share one line with their values joined by `,`.
///
/// ## Reference
///
/// - [Constructing the canonicalized headers string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-headers-string)
fn canonicalize_header(ctx: &SigningRequest) -> String {
    SigningRequest::header_to_string(
        ctx.header_to_vec_with_prefix(X_MS_HEADER_PREFIX),
        ":",
        "\n",
    )
}

/// Only the `comp` query parameter takes part in the canonicalized resource.
///
/// ## Reference
///
/// - [Constructing the canonicalized resource string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-resource-string)
fn canonicalize_resource(
    ctx: &SigningRequest,
    account_name: &str,
    use_path_style_uris: bool,
) -> String {
    let path = if use_path_style_uris {
        strip_account_segment(&ctx.path)
    } else {
        ctx.path.as_str()
    };

    match ctx.query_get("comp") {
        Some(comp) => format!("/{account_name}{path}?comp={comp}"),
        None => format!("/{account_name}{path}"),
    }
}

/// "/devstoreaccount1/container/blob" => "/container/blob"
fn strip_account_segment(path: &str) -> &str {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.find('/') {
        Some(idx) => &trimmed[idx..],
        None => "",
    }
}
