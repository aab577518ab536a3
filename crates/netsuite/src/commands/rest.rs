//! `netsuite rest` command implementation.

use clap::Args;
use netsuite_tba::RestItem;

use super::{BatchArgs, credential, dispatcher, print_results};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the REST Record / SuiteQL batch command.
#[derive(Args)]
pub(crate) struct RestArgs {
    #[command(flatten)]
    batch: BatchArgs,
}

impl RestArgs {
    /// Execute the rest command.
    ///
    /// # Errors
    ///
    /// Returns an error if config loading fails or, without
    /// `--continue-on-fail`, if any item fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.batch.connection.load_config()?;
        let credential = credential(config.require_credentials()?, None);
        let items: Vec<RestItem> = self.batch.read_items()?;

        output.info(&format!(
            "Running {} REST item(s) for account {}",
            items.len(),
            credential.account_id
        ));

        let results = dispatcher(&config, &credential).run_rest(items, self.batch.policy())?;
        print_results(&output, &results)
    }
}
