//! `netsuite restlet` and `netsuite restlet-call` command implementations.

use clap::Args;
use netsuite_config::Config;
use netsuite_tba::{Credential, RestletItem, RestletMethod, RestletTarget};

use super::{BatchArgs, credential, dispatcher, print_results};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generic RESTlet batch command.
#[derive(Args)]
pub(crate) struct RestletArgs {
    /// HTTP method for every item: get, post, put or delete.
    #[arg(short, long, default_value = "get")]
    method: RestletMethod,

    #[command(flatten)]
    batch: BatchArgs,
}

impl RestletArgs {
    /// Execute the restlet command.
    ///
    /// # Errors
    ///
    /// Returns an error if config loading fails or, without
    /// `--continue-on-fail`, if any item fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.batch.connection.load_config()?;
        let (credential, target) = restlet_credential(&config)?;
        let items: Vec<RestletItem> = self.batch.read_items()?;

        output.info(&format!(
            "Running {} RESTlet {} item(s) against {}",
            items.len(),
            self.method,
            target.script_id()
        ));

        let results = dispatcher(&config, &credential).run_restlet(
            items,
            self.method,
            &target,
            self.batch.policy(),
        )?;
        print_results(&output, &results)
    }
}

/// Arguments for the RESTlet call command (always POST with `requestBody`).
#[derive(Args)]
pub(crate) struct RestletCallArgs {
    #[command(flatten)]
    batch: BatchArgs,
}

impl RestletCallArgs {
    /// Execute the restlet-call command.
    ///
    /// # Errors
    ///
    /// Returns an error if config loading fails or, without
    /// `--continue-on-fail`, if any item fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.batch.connection.load_config()?;
        let (credential, target) = restlet_credential(&config)?;
        let items: Vec<RestletItem> = self.batch.read_items()?;

        output.info(&format!(
            "Posting {} item(s) to RESTlet {}",
            items.len(),
            target.script_id()
        ));

        let results = dispatcher(&config, &credential).run_restlet_calls(
            items,
            &target,
            self.batch.policy(),
        )?;
        print_results(&output, &results)
    }
}

/// Credential with the RESTlet extension validated.
fn restlet_credential(config: &Config) -> Result<(Credential, RestletTarget), CliError> {
    let credential = credential(config.require_credentials()?, Some(config.require_restlet()?));
    let target = credential.restlet_target()?;
    Ok((credential, target))
}
