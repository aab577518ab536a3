//! NetSuite Token-Based Authentication client.
//!
//! This crate signs and dispatches calls to NetSuite's REST Record, SuiteQL
//! and RESTlet endpoints:
//! - [`oauth`]: OAuth 1.0 HMAC-SHA256 signing and `Authorization` header formatting
//! - [`realm`]: realm normalization (hyphens to underscores)
//! - [`operation`]: mapping of logical operations to HTTP method and URL
//! - [`Dispatcher`]: batch execution over a [`Transport`] with a [`FailurePolicy`]
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use netsuite_tba::{Credential, Dispatcher, FailurePolicy, RestItem, UreqTransport};
//!
//! let credential = Credential {
//!     account_id: "1234567_SB1".to_owned(),
//!     realm: "1234567-SB1".to_owned(),
//!     consumer_key: "ck".to_owned(),
//!     consumer_secret: "cs".to_owned(),
//!     token_id: "tid".to_owned(),
//!     token_secret: "ts".to_owned(),
//!     ..Default::default()
//! };
//!
//! let dispatcher = Dispatcher::new(UreqTransport::new(Duration::from_secs(30)), credential.identity());
//! let items: Vec<RestItem> = serde_json::from_str(r#"[{"operation": "get", "recordType": "customer", "recordId": "123"}]"#)?;
//! let results = dispatcher.run_rest(items, FailurePolicy::FailFast)?;
//! ```

// Credentials
mod credential;
pub use credential::{Credential, OAuthIdentity, RestletTarget};

// Realm normalization
pub mod realm;

// OAuth
pub mod oauth;
pub use oauth::{HttpMethod, TbaAuth};

// Operation routing
pub mod operation;
pub use operation::{RestOperation, RestletMethod, RestletOperation, RoutedRequest};

// Work item parsing
mod input;
pub use input::{AdditionalOptions, RestItem, RestletItem};

// Transport
mod transport;
pub use transport::{HttpRequest, HttpResponse, Transport, UreqTransport};

// Dispatching
mod dispatch;
pub use dispatch::{Dispatcher, FailurePolicy, ItemResult, collect_results};

// Errors
pub mod error;
pub use error::NetSuiteError;
