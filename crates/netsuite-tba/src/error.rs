//! Error types for NetSuite integration.

/// Error from NetSuite operations.
#[derive(Debug, thiserror::Error)]
pub enum NetSuiteError {
    /// User-supplied JSON text failed to parse.
    #[error("Invalid JSON in {field} (item {item}): {message}")]
    MalformedInput {
        /// Index of the work item.
        item: usize,
        /// Name of the offending field (e.g. `recordData`).
        field: &'static str,
        /// Parser error message.
        message: String,
    },

    /// A parameter required by the selected operation is missing or empty.
    #[error("Missing required parameter {field} (item {item})")]
    MissingField {
        /// Index of the work item.
        item: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// Operation name not recognized.
    #[error("Unknown operation: {operation} (item {item})")]
    UnknownOperation {
        /// Index of the work item.
        item: usize,
        /// Operation name as supplied.
        operation: String,
    },

    /// RESTlet call requested without a script/deploy target.
    #[error("RESTlet target requires non-empty {0}")]
    MissingRestletTarget(&'static str),

    /// URL could not be parsed as an absolute URI.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Server rejected the request signature or token (401/403).
    #[error("Authentication failed: {status} - {body}")]
    Authentication {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by NetSuite.
        body: String,
    },

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] ureq::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NetSuiteError {
    /// Map a NetSuite error response to the matching variant.
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::Authentication { status, body },
            _ => Self::Http { status, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_input_names_field() {
        let err = NetSuiteError::MalformedInput {
            item: 2,
            field: "recordData",
            message: "expected value at line 1 column 1".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("recordData"));
        assert!(msg.contains("item 2"));
    }

    #[test]
    fn test_from_status_authentication() {
        let err = NetSuiteError::from_status(401, "INVALID_LOGIN_ATTEMPT".to_owned());
        assert!(matches!(err, NetSuiteError::Authentication { status: 401, .. }));
        assert!(err.to_string().contains("INVALID_LOGIN_ATTEMPT"));
    }

    #[test]
    fn test_from_status_other() {
        let err = NetSuiteError::from_status(404, "not found".to_owned());
        assert!(matches!(err, NetSuiteError::Http { status: 404, .. }));
    }
}
