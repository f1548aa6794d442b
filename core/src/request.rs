use std::borrow::Cow;
use std::collections::BTreeMap;
use std::mem;

use http::header::HeaderName;
use http::uri::Authority;
use http::HeaderMap;
use http::Method;

use crate::{Error, Result};

/// Signing context for request.
///
/// Only headers are taken out of the request and given back by
/// [`SigningRequest::apply`]; method and URI are read but never rewritten.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path.
    pub path: String,
    /// Raw HTTP query string without the leading `?`.
    pub query: Option<String>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let authority = parts.uri.authority().cloned().ok_or_else(|| {
            Error::request_invalid("request without authority is invalid for signing")
                .with_context(format!("uri: {}", parts.uri))
        })?;

        Ok(SigningRequest {
            method: parts.method.clone(),
            authority,
            path: match parts.uri.path() {
                "" => "/".to_string(),
                v => v.to_string(),
            },
            query: parts.uri.query().map(|v| v.to_string()),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        mem::swap(&mut parts.headers, &mut self.headers);
        Ok(())
    }

    /// Host of the request without the port.
    pub fn host(&self) -> &str {
        self.authority.host()
    }

    /// Iterate raw `key=value` pairs of the query string.
    ///
    /// Values are neither decoded nor re-encoded.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query
            .as_deref()
            .unwrap_or_default()
            .split('&')
            .filter(|v| !v.is_empty())
            .map(|kv| kv.split_once('=').unwrap_or((kv, "")))
    }

    /// Get the raw value of the first query parameter named `key`.
    pub fn query_get(&self, key: &str) -> Option<&str> {
        self.query_pairs().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Get header value by name.
    ///
    /// Returns empty string if header not found. Opaque bytes are replaced
    /// rather than rejected, so a header the `http` crate accepted never
    /// fails here.
    #[inline]
    pub fn header_get_or_default(&self, key: &HeaderName) -> Cow<'_, str> {
        match self.headers.get(key) {
            Some(v) => String::from_utf8_lossy(v.as_bytes()),
            None => Cow::Borrowed(""),
        }
    }

    /// Get headers whose lowercased name starts with the given prefix.
    ///
    /// Names are returned lowercased, once each. Values are trimmed of
    /// surrounding whitespace, and repeated values of the same name are
    /// joined with `,` in the order they were inserted.
    pub fn header_to_vec_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        let mut grouped: BTreeMap<String, Vec<Cow<'_, str>>> = BTreeMap::new();
        for (k, v) in self.headers.iter() {
            let name = k.as_str().to_lowercase();
            if !name.starts_with(prefix) {
                continue;
            }
            let value = match String::from_utf8_lossy(v.as_bytes()) {
                Cow::Borrowed(v) => Cow::Borrowed(v.trim()),
                Cow::Owned(v) => Cow::Owned(v.trim().to_string()),
            };
            grouped.entry(name).or_default().push(value);
        }

        grouped
            .into_iter()
            .map(|(k, vs)| (k, vs.join(",")))
            .collect()
    }

    /// Convert sorted headers to string.
    ///
    /// ```shell
    /// [(a, b), (c, d)] => "a:b\nc:d"
    /// ```
    pub fn header_to_string(mut headers: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        // Sort via header name.
        headers.sort();

        for (idx, (k, v)) in headers.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            s.push_str(sep);
            s.push_str(&v);
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parts(uri: &str) -> http::request::Parts {
        http::Request::get(uri)
            .header("x-ms-version", " 2009-09-19 ")
            .header("Content-Type", "text/plain")
            .header("X-MS-Meta-Name", "value")
            .body(())
            .expect("request must build")
            .into_parts()
            .0
    }

    #[test]
    fn test_build_and_apply_keeps_uri() {
        let mut p = parts("http://127.0.0.1:10000/devstoreaccount1/c?restype=container&comp=list");
        let req = SigningRequest::build(&mut p).expect("must build");

        assert!(p.headers.is_empty());
        assert_eq!(req.host(), "127.0.0.1");
        assert_eq!(req.authority.as_str(), "127.0.0.1:10000");
        assert_eq!(req.path, "/devstoreaccount1/c");
        assert_eq!(req.query_get("comp"), Some("list"));
        assert_eq!(req.query_get("prefix"), None);

        req.apply(&mut p).expect("must apply");
        assert_eq!(p.headers.len(), 3);
        assert_eq!(
            p.uri,
            "http://127.0.0.1:10000/devstoreaccount1/c?restype=container&comp=list"
        );
    }

    #[test]
    fn test_build_without_authority() {
        let mut p = parts("/container/blob");
        let err = SigningRequest::build(&mut p).expect_err("must fail");
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_header_to_string() {
        let mut p = parts("https://acct.blob.core.windows.net/");
        let req = SigningRequest::build(&mut p).expect("must build");

        let s = SigningRequest::header_to_string(req.header_to_vec_with_prefix("x-ms-"), ":", "\n");
        assert_eq!(s, "x-ms-meta-name:value\nx-ms-version:2009-09-19");
    }

    #[test]
    fn test_header_to_vec_joins_repeated_names() {
        let mut p = parts("https://acct.blob.core.windows.net/");
        p.headers
            .append("x-ms-meta-name", http::HeaderValue::from_static(" other "));
        p.headers
            .append("X-Ms-Meta-Name", http::HeaderValue::from_static("third"));
        let req = SigningRequest::build(&mut p).expect("must build");

        assert_eq!(
            req.header_to_vec_with_prefix("x-ms-"),
            vec![
                (
                    "x-ms-meta-name".to_string(),
                    "value,other,third".to_string()
                ),
                ("x-ms-version".to_string(), "2009-09-19".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_values_with_opaque_bytes() {
        let mut p = parts("https://acct.blob.core.windows.net/");
        p.headers.insert(
            "x-ms-meta-city",
            http::HeaderValue::from_bytes(b"caf\xe9").expect("opaque bytes are valid"),
        );
        p.headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_bytes(b"text/\xff").expect("opaque bytes are valid"),
        );
        let req = SigningRequest::build(&mut p).expect("must build");

        assert_eq!(
            req.header_get_or_default(&http::header::CONTENT_TYPE),
            "text/\u{fffd}"
        );
        assert_eq!(
            req.header_get_or_default(&http::header::CONTENT_LENGTH),
            ""
        );
        assert!(req
            .header_to_vec_with_prefix("x-ms-")
            .contains(&("x-ms-meta-city".to_string(), "caf\u{fffd}".to_string())));
    }
}
