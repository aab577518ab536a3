//! OAuth 1.0 HMAC-SHA256 authentication for NetSuite.
//!
//! NetSuite Token-Based Authentication signs every request individually with
//! the consumer key/secret of an integration record and the token ID/secret
//! of an access token. JSON bodies are not part of the signature base string;
//! only form parameters passed explicitly in [`RequestDescriptor`] are.

mod header;
mod signature;

pub use header::format_authorization_header;
pub use signature::{
    OAUTH_VERSION, ParamValue, RequestDescriptor, SIGNATURE_METHOD, SignedParameters, sign,
    sign_at,
};

use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode};

use crate::credential::OAuthIdentity;

/// OAuth unreserved characters: A-Z a-z 0-9 - . _ ~
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode string per RFC 3986.
pub(crate) fn oauth_encode(input: &str) -> String {
    percent_encode(input.as_bytes(), OAUTH_ENCODE_SET).to_string()
}

/// HTTP methods used by NetSuite endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!("unsupported HTTP method: {other}")),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NetSuite TBA request authenticator.
pub struct TbaAuth {
    identity: OAuthIdentity,
}

impl TbaAuth {
    /// Create an authenticator for the given identity.
    #[must_use]
    pub fn new(identity: OAuthIdentity) -> Self {
        Self { identity }
    }

    /// Identity used for signing.
    #[must_use]
    pub fn identity(&self) -> &OAuthIdentity {
        &self.identity
    }

    /// Sign a request with a fresh timestamp and nonce and return the
    /// `Authorization` header value.
    #[must_use]
    pub fn authorization_header(&self, request: &RequestDescriptor) -> String {
        let signed = sign(request, &self.identity);
        format_authorization_header(&signed)
    }
}
