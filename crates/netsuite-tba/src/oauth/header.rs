//! `Authorization: OAuth ...` header formatting.

use super::oauth_encode;
use super::signature::SignedParameters;

/// Build OAuth Authorization header value from signed parameters.
///
/// The realm comes first and is inserted as is; every other value is
/// percent-encoded and quoted. Attribute order is fixed.
#[must_use]
pub fn format_authorization_header(signed: &SignedParameters) -> String {
    let params = [
        ("oauth_consumer_key", signed.consumer_key.as_str()),
        ("oauth_token", signed.token.as_str()),
        ("oauth_signature_method", signed.signature_method),
        ("oauth_timestamp", signed.timestamp.as_str()),
        ("oauth_nonce", signed.nonce.as_str()),
        ("oauth_version", signed.version),
        ("oauth_signature", signed.signature.as_str()),
    ];

    let mut header_parts = Vec::with_capacity(params.len() + 1);
    header_parts.push(format!("realm=\"{}\"", signed.realm));
    header_parts.extend(
        params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, oauth_encode(v))),
    );
    format!("OAuth {}", header_parts.join(", "))
}
