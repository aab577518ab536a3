//! NetSuite credential record and the views derived from it.

use std::fmt;

use crate::error::NetSuiteError;
use crate::realm;

/// Stored NetSuite TBA credential.
///
/// Fields are taken as supplied. Use [`Credential::identity`] for signing and
/// [`Credential::restlet_target`] when a RESTlet URL is needed.
#[derive(Clone, Default)]
pub struct Credential {
    /// Account ID (e.g. `1234567` or `1234567_SB1`).
    pub account_id: String,
    /// OAuth realm, may contain hyphens.
    pub realm: String,
    /// Consumer key of the integration record.
    pub consumer_key: String,
    /// Consumer secret of the integration record.
    pub consumer_secret: String,
    /// Token ID of the access token.
    pub token_id: String,
    /// Token secret of the access token.
    pub token_secret: String,
    /// RESTlet script ID.
    pub script_id: Option<String>,
    /// RESTlet deployment ID.
    pub deploy_id: Option<String>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("account_id", &self.account_id)
            .field("realm", &self.realm)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token_id", &self.token_id)
            .field("token_secret", &"<redacted>")
            .field("script_id", &self.script_id)
            .field("deploy_id", &self.deploy_id)
            .finish()
    }
}

impl Credential {
    /// OAuth identity with the realm normalized once.
    #[must_use]
    pub fn identity(&self) -> OAuthIdentity {
        OAuthIdentity {
            account_id: self.account_id.clone(),
            realm: realm::normalize(&self.realm),
            consumer_key: self.consumer_key.clone(),
            consumer_secret: self.consumer_secret.clone(),
            token_id: self.token_id.clone(),
            token_secret: self.token_secret.clone(),
        }
    }

    /// RESTlet script/deploy target.
    ///
    /// # Errors
    ///
    /// Returns [`NetSuiteError::MissingRestletTarget`] if either ID is absent or empty.
    pub fn restlet_target(&self) -> Result<RestletTarget, NetSuiteError> {
        RestletTarget::new(
            self.script_id.as_deref().unwrap_or_default(),
            self.deploy_id.as_deref().unwrap_or_default(),
        )
    }
}

/// Common OAuth 1.0 identity used for every signed request.
///
/// The realm held here is already normalized, so the signer and the header
/// formatter read the same value.
#[derive(Clone)]
pub struct OAuthIdentity {
    account_id: String,
    realm: String,
    consumer_key: String,
    consumer_secret: String,
    token_id: String,
    token_secret: String,
}

impl fmt::Debug for OAuthIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthIdentity")
            .field("account_id", &self.account_id)
            .field("realm", &self.realm)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token_id", &self.token_id)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

impl OAuthIdentity {
    /// Account ID as configured.
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Normalized realm (underscores only).
    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Consumer key.
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Token ID, sent as `oauth_token`.
    #[must_use]
    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    pub(crate) fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub(crate) fn token_secret(&self) -> &str {
        &self.token_secret
    }
}

/// RESTlet script and deployment to call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestletTarget {
    script_id: String,
    deploy_id: String,
}

impl RestletTarget {
    /// Create a target, rejecting empty IDs.
    ///
    /// # Errors
    ///
    /// Returns [`NetSuiteError::MissingRestletTarget`] naming the empty field.
    pub fn new(script_id: &str, deploy_id: &str) -> Result<Self, NetSuiteError> {
        if script_id.is_empty() {
            return Err(NetSuiteError::MissingRestletTarget("scriptId"));
        }
        if deploy_id.is_empty() {
            return Err(NetSuiteError::MissingRestletTarget("deployId"));
        }
        Ok(Self {
            script_id: script_id.to_owned(),
            deploy_id: deploy_id.to_owned(),
        })
    }

    /// Script ID (e.g. `customscript_my_restlet`).
    #[must_use]
    pub fn script_id(&self) -> &str {
        &self.script_id
    }

    /// Deploy ID (e.g. `customdeploy_my_restlet`).
    #[must_use]
    pub fn deploy_id(&self) -> &str {
        &self.deploy_id
    }
}
