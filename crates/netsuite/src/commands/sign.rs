//! `netsuite sign` command implementation.

use clap::Args;
use netsuite_tba::oauth::RequestDescriptor;
use netsuite_tba::{HttpMethod, TbaAuth};

use super::{ConnectionArgs, credential};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sign command.
#[derive(Args)]
pub(crate) struct SignArgs {
    /// Absolute request URL, query string included.
    url: String,

    /// HTTP method.
    #[arg(short, long, default_value = "GET")]
    method: HttpMethod,

    #[command(flatten)]
    connection: ConnectionArgs,
}

impl SignArgs {
    /// Print the `Authorization` header value for a request.
    ///
    /// # Errors
    ///
    /// Returns an error if config loading fails or the URL is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.connection.load_config()?;
        let credential = credential(config.require_credentials()?, None);
        let request = RequestDescriptor::parse(self.method, &self.url)?;

        let auth = TbaAuth::new(credential.identity());
        output.info(&format!("Signing {} {}", self.method, request.base_url()));
        output.result(&auth.authorization_header(&request))?;
        Ok(())
    }
}
