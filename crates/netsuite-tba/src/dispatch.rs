//! Request dispatching and per-batch failure handling.

use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::credential::{OAuthIdentity, RestletTarget};
use crate::error::NetSuiteError;
use crate::input::{RestItem, RestletItem};
use crate::oauth::{RequestDescriptor, TbaAuth};
use crate::operation::{RestletMethod, RoutedRequest};
use crate::transport::{HttpRequest, Transport};

/// What to do when a work item fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the batch with the first error.
    #[default]
    FailFast,
    /// Record `{"error": message}` for the item and continue.
    CollectErrors,
}

/// Result of one work item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemResult {
    /// Index of the input item.
    pub item: usize,
    /// Response JSON, or `{"error": message}` for collected failures.
    pub json: Value,
}

/// Run `process` over every item, aggregating results according to `policy`.
///
/// # Errors
///
/// With [`FailurePolicy::FailFast`], returns the first item error.
pub fn collect_results<I, F>(
    items: I,
    policy: FailurePolicy,
    mut process: F,
) -> Result<Vec<ItemResult>, NetSuiteError>
where
    I: IntoIterator,
    F: FnMut(usize, I::Item) -> Result<Value, NetSuiteError>,
{
    let mut results = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        match process(index, item) {
            Ok(json) => results.push(ItemResult { item: index, json }),
            Err(err) if policy == FailurePolicy::CollectErrors => {
                warn!(item = index, "Item failed: {err}");
                results.push(ItemResult {
                    item: index,
                    json: json!({ "error": err.to_string() }),
                });
            }
            Err(err) => return Err(err),
        }
    }
    Ok(results)
}

/// Signs routed requests and sends them over a [`Transport`].
pub struct Dispatcher<T> {
    transport: T,
    auth: TbaAuth,
}

impl<T: Transport> Dispatcher<T> {
    /// Create a dispatcher for the given identity.
    #[must_use]
    pub fn new(transport: T, identity: OAuthIdentity) -> Self {
        Self {
            transport,
            auth: TbaAuth::new(identity),
        }
    }

    /// Sign and send one routed request, returning the response JSON.
    ///
    /// Every call signs with a fresh timestamp and nonce. Empty response
    /// bodies (e.g. `204 No Content`) yield an empty JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`NetSuiteError::Authentication`] for 401/403, [`NetSuiteError::Http`]
    /// for other error statuses, [`NetSuiteError::Transport`] for network failures
    /// and [`NetSuiteError::Json`] if the response is not JSON.
    pub fn send(&self, item: usize, routed: &RoutedRequest) -> Result<Value, NetSuiteError> {
        let descriptor = RequestDescriptor::parse(routed.method, &routed.url)?;

        let mut headers = vec![(
            "Authorization".to_owned(),
            self.auth.authorization_header(&descriptor),
        )];
        headers.extend(
            routed
                .headers()
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned())),
        );

        let body = routed.body.as_ref().map(serde_json::to_vec).transpose()?;

        info!(item, method = %routed.method, url = %routed.url, "Sending NetSuite request");

        let response = self.transport.send(&HttpRequest {
            method: routed.method,
            url: routed.url.clone(),
            headers,
            body,
        })?;

        debug!(item, status = response.status, "Received NetSuite response");

        if response.status >= 400 {
            return Err(NetSuiteError::from_status(response.status, response.body));
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    /// Run a batch of REST Record / SuiteQL items.
    ///
    /// # Errors
    ///
    /// With [`FailurePolicy::FailFast`], returns the first item error.
    pub fn run_rest(
        &self,
        items: Vec<RestItem>,
        policy: FailurePolicy,
    ) -> Result<Vec<ItemResult>, NetSuiteError> {
        let account_id = self.auth.identity().account_id();
        collect_results(items, policy, |index, item| {
            let operation = item.into_operation(index)?;
            self.send(index, &operation.route(account_id))
        })
    }

    /// Run a batch of generic RESTlet items with the given method.
    ///
    /// # Errors
    ///
    /// With [`FailurePolicy::FailFast`], returns the first item error.
    pub fn run_restlet(
        &self,
        items: Vec<RestletItem>,
        method: RestletMethod,
        target: &RestletTarget,
        policy: FailurePolicy,
    ) -> Result<Vec<ItemResult>, NetSuiteError> {
        let account_id = self.auth.identity().account_id();
        collect_results(items, policy, |index, item| {
            let operation = item.into_operation(method, index)?;
            self.send(index, &operation.route(account_id, target))
        })
    }

    /// Run a batch of RESTlet POST calls carrying `requestBody`.
    ///
    /// # Errors
    ///
    /// With [`FailurePolicy::FailFast`], returns the first item error.
    pub fn run_restlet_calls(
        &self,
        items: Vec<RestletItem>,
        target: &RestletTarget,
        policy: FailurePolicy,
    ) -> Result<Vec<ItemResult>, NetSuiteError> {
        let account_id = self.auth.identity().account_id();
        collect_results(items, policy, |index, item| {
            let operation = item.into_call(index)?;
            self.send(index, &operation.route(account_id, target))
        })
    }
}
