//! CLI error types.

use netsuite_config::ConfigError;
use netsuite_tba::NetSuiteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    NetSuite(#[from] NetSuiteError),

    #[error("Invalid items input: {0}")]
    Items(#[from] serde_json::Error),
}
