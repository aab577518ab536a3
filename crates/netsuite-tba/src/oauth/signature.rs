//! OAuth 1.0 signature generation (RFC 5849) with HMAC-SHA256.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use hmac::{Hmac, Mac};
use percent_encoding::percent_decode_str;
use rand::RngExt;
use sha2::Sha256;
use ureq::http::Uri;

use super::{HttpMethod, oauth_encode};
use crate::credential::OAuthIdentity;
use crate::error::NetSuiteError;

/// Value of `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA256";

/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

type HmacSha256 = Hmac<Sha256>;

/// Body parameter value: a single string or a repeated parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ParamValue {
    fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multiple(values) => values,
        }
    }
}

/// Request to be signed.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: HttpMethod,
    uri: Uri,
    body_parameters: Option<Vec<(String, ParamValue)>>,
}

impl RequestDescriptor {
    /// Parse an absolute URL (query string allowed) into a request descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`NetSuiteError::InvalidUrl`] if the URL is not absolute.
    pub fn parse(method: HttpMethod, url: &str) -> Result<Self, NetSuiteError> {
        let uri: Uri = url
            .parse()
            .map_err(|_| NetSuiteError::InvalidUrl(url.to_owned()))?;
        if uri.scheme().is_none() || uri.host().is_none() {
            return Err(NetSuiteError::InvalidUrl(url.to_owned()));
        }
        Ok(Self {
            method,
            uri,
            body_parameters: None,
        })
    }

    /// Attach form body parameters that take part in the signature.
    #[must_use]
    pub fn with_body_parameters(mut self, params: Vec<(String, ParamValue)>) -> Self {
        self.body_parameters = Some(params);
        self
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Base URL per RFC 5849 Section 3.4.1.2: lower-case scheme and host,
    /// default port dropped, no query string.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = self
            .uri
            .scheme_str()
            .unwrap_or("https")
            .to_ascii_lowercase();
        let host = self.uri.host().unwrap_or_default().to_ascii_lowercase();
        let port = match (scheme.as_str(), self.uri.port_u16()) {
            (_, None) | ("http", Some(80)) | ("https", Some(443)) => String::new(),
            (_, Some(port)) => format!(":{port}"),
        };
        format!("{scheme}://{host}{port}{}", self.uri.path())
    }

    /// Query parameters of the URL, percent-decoded.
    fn query_parameters(&self) -> Vec<(String, String)> {
        self.uri
            .query()
            .map(|q| {
                q.split('&')
                    .filter(|param| !param.is_empty())
                    .map(|param| {
                        let (key, value) = param.split_once('=').unwrap_or((param, ""));
                        (decode_query_component(key), decode_query_component(value))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Decode a form-urlencoded query component (`+` is a space).
fn decode_query_component(input: &str) -> String {
    let input = input.replace('+', " ");
    percent_decode_str(&input).decode_utf8_lossy().into_owned()
}

/// Signed OAuth protocol parameters, ready for the `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedParameters {
    pub consumer_key: String,
    pub token: String,
    pub signature_method: &'static str,
    pub timestamp: String,
    pub nonce: String,
    pub version: &'static str,
    pub signature: String,
    /// Normalized realm; emitted in the header only, not signed (RFC 5849 Section 3.4.1.3.1).
    pub realm: String,
}

/// Generate cryptographically random nonce (32 hex characters).
fn generate_nonce() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}

/// Generate Unix timestamp.
fn generate_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
        .to_string()
}

/// Sign data with HMAC-SHA256 and return base64-encoded signature.
fn sign_hmac_sha256(key: &str, data: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(data.as_bytes());
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}

/// Build signing key: `encode(consumer_secret)&encode(token_secret)`.
fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        oauth_encode(consumer_secret),
        oauth_encode(token_secret)
    )
}

/// Build OAuth signature base string per RFC 5849 Section 3.4.1.
///
/// Format: `HTTP_METHOD&encoded_base_url&encoded_parameters`
fn build_signature_base_string(
    method: &str,
    base_url: &str,
    params: &[(String, String)],
) -> String {
    // Normalize parameters: encode keys/values, sort by key then value
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (oauth_encode(k), oauth_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        oauth_encode(base_url),
        oauth_encode(&param_string)
    )
}

/// Sign a request with a fresh timestamp and nonce.
#[must_use]
pub fn sign(request: &RequestDescriptor, identity: &OAuthIdentity) -> SignedParameters {
    sign_at(request, identity, &generate_timestamp(), &generate_nonce())
}

/// Sign a request with the given timestamp and nonce.
///
/// Identical inputs produce identical signatures.
#[must_use]
pub fn sign_at(
    request: &RequestDescriptor,
    identity: &OAuthIdentity,
    timestamp: &str,
    nonce: &str,
) -> SignedParameters {
    let mut params: Vec<(String, String)> = vec![
        (
            "oauth_consumer_key".to_owned(),
            identity.consumer_key().to_owned(),
        ),
        ("oauth_nonce".to_owned(), nonce.to_owned()),
        (
            "oauth_signature_method".to_owned(),
            SIGNATURE_METHOD.to_owned(),
        ),
        ("oauth_timestamp".to_owned(), timestamp.to_owned()),
        ("oauth_token".to_owned(), identity.token_id().to_owned()),
        ("oauth_version".to_owned(), OAUTH_VERSION.to_owned()),
    ];

    // Query and body parameters are signed alongside OAuth params (RFC 5849 Section 3.4.1.3)
    params.extend(request.query_parameters());
    if let Some(body) = &request.body_parameters {
        for (name, value) in body {
            params.extend(value.values().iter().map(|v| (name.clone(), v.clone())));
        }
    }

    let base_string =
        build_signature_base_string(request.method.as_str(), &request.base_url(), &params);
    let key = signing_key(identity.consumer_secret(), identity.token_secret());

    SignedParameters {
        consumer_key: identity.consumer_key().to_owned(),
        token: identity.token_id().to_owned(),
        signature_method: SIGNATURE_METHOD,
        timestamp: timestamp.to_owned(),
        nonce: nonce.to_owned(),
        version: OAUTH_VERSION,
        signature: sign_hmac_sha256(&key, &base_string),
        realm: identity.realm().to_owned(),
    }
}
