//! CLI command implementations.

pub(crate) mod rest;
pub(crate) mod restlet;
pub(crate) mod sign;

pub(crate) use rest::RestArgs;
pub(crate) use restlet::{RestletArgs, RestletCallArgs};
pub(crate) use sign::SignArgs;

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use netsuite_config::{CliSettings, Config, CredentialsConfig, RestletConfig};
use netsuite_tba::{Credential, Dispatcher, FailurePolicy, ItemResult, UreqTransport};
use serde::de::DeserializeOwned;

use crate::error::CliError;
use crate::output::Output;

/// Connection settings shared by all commands.
#[derive(Args)]
pub(crate) struct ConnectionArgs {
    /// Path to configuration file (default: auto-discover netsuite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// NetSuite account ID (overrides config).
    #[arg(long, env = "NETSUITE_ACCOUNT_ID")]
    account_id: Option<String>,

    /// HTTP timeout in seconds (overrides config).
    #[arg(long)]
    timeout: Option<u64>,
}

impl ConnectionArgs {
    /// Load config with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            account_id: self.account_id.clone(),
            timeout_secs: self.timeout,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Arguments shared by batch commands.
#[derive(Args)]
pub(crate) struct BatchArgs {
    /// JSON file with an array of work items ("-" reads stdin).
    #[arg(short, long, default_value = "-")]
    items: PathBuf,

    /// Record per-item errors and continue instead of aborting the batch.
    #[arg(long)]
    continue_on_fail: bool,

    #[command(flatten)]
    connection: ConnectionArgs,
}

impl BatchArgs {
    fn policy(&self) -> FailurePolicy {
        if self.continue_on_fail {
            FailurePolicy::CollectErrors
        } else {
            FailurePolicy::FailFast
        }
    }

    /// Read and parse the work items.
    fn read_items<T: DeserializeOwned>(&self) -> Result<Vec<T>, CliError> {
        let text = if self.items.as_os_str() == "-" {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        } else {
            std::fs::read_to_string(&self.items)?
        };
        tracing::debug!(path = %self.items.display(), bytes = text.len(), "Read work items");
        parse_items(&text)
    }
}

/// Parse a JSON array of items; a single object is treated as one item.
fn parse_items<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, CliError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let items = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(items)
}

/// Build the credential record from config sections.
fn credential(credentials: &CredentialsConfig, restlet: Option<&RestletConfig>) -> Credential {
    Credential {
        account_id: credentials.account_id.clone(),
        realm: credentials.realm.clone(),
        consumer_key: credentials.consumer_key.clone(),
        consumer_secret: credentials.consumer_secret.clone(),
        token_id: credentials.token_id.clone(),
        token_secret: credentials.token_secret.clone(),
        script_id: restlet.map(|r| r.script_id.clone()),
        deploy_id: restlet.map(|r| r.deploy_id.clone()),
    }
}

/// Create a dispatcher backed by the HTTP transport.
fn dispatcher(config: &Config, credential: &Credential) -> Dispatcher<UreqTransport> {
    let transport = UreqTransport::new(Duration::from_secs(config.http.timeout_secs));
    Dispatcher::new(transport, credential.identity())
}

/// Write results to stdout and a summary to stderr.
fn print_results(output: &Output, results: &[ItemResult]) -> Result<(), CliError> {
    output.result(&serde_json::to_string_pretty(results)?)?;

    let failed = results
        .iter()
        .filter(|r| r.json.get("error").is_some())
        .count();
    let succeeded = results.len() - failed;

    output.success(&format!("{succeeded} item(s) succeeded"));
    if failed > 0 {
        output.warning(&format!("{failed} item(s) failed"));
    }
    Ok(())
}
