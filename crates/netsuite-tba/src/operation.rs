//! Mapping of logical NetSuite operations to HTTP method and URL.
//!
//! Two API surfaces are supported:
//! - REST Record and SuiteQL (`https://{host}.suitetalk.api.netsuite.com/services/rest`)
//! - RESTlet scripts (`https://{host}.restlets.api.netsuite.com/app/site/hosting/restlet.nl`)

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::credential::RestletTarget;
use crate::oauth::{HttpMethod, oauth_encode};

/// Path of the RESTlet dispatcher, relative to the RESTlet domain.
const RESTLET_PATH: &str = "/app/site/hosting/restlet.nl";

/// Host prefix for an account: lower-case, underscores replaced by hyphens.
///
/// `1234567_SB1` becomes `1234567-sb1`.
#[must_use]
pub fn account_host(account_id: &str) -> String {
    account_id.to_ascii_lowercase().replace('_', "-")
}

/// Base URL of the REST Record / SuiteQL API.
#[must_use]
pub fn rest_base_url(account_id: &str) -> String {
    format!(
        "https://{}.suitetalk.api.netsuite.com/services/rest",
        account_host(account_id)
    )
}

/// URL of the RESTlet dispatcher, without query string.
#[must_use]
pub fn restlet_base_url(account_id: &str) -> String {
    format!(
        "https://{}.restlets.api.netsuite.com{RESTLET_PATH}",
        account_host(account_id)
    )
}

/// API surface a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiSurface {
    Rest,
    Restlet,
}

/// Fully routed request, ready to be signed and sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedRequest {
    pub method: HttpMethod,
    pub url: String,
    /// JSON body; never part of the OAuth signature.
    pub body: Option<Value>,
    pub surface: ApiSurface,
}

impl RoutedRequest {
    /// Headers sent in addition to `Authorization`.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, &'static str)> {
        let mut headers = vec![("Content-Type", "application/json")];
        if self.surface == ApiSurface::Rest {
            headers.push(("Accept", "application/json"));
            headers.push(("Prefer", "transient"));
        }
        headers
    }
}

/// REST Record API and SuiteQL operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RestOperation {
    Get {
        record_type: String,
        record_id: String,
        expand_sub_resources: bool,
        fields: Option<String>,
    },
    Create {
        record_type: String,
        data: Value,
    },
    Update {
        record_type: String,
        record_id: String,
        data: Value,
    },
    Delete {
        record_type: String,
        record_id: String,
    },
    Upsert {
        record_type: String,
        external_id_field: String,
        external_id_value: String,
        data: Value,
    },
    Search {
        query: String,
        limit: Option<u32>,
        offset: Option<u32>,
    },
    Transform {
        source_record_type: String,
        source_record_id: String,
        target_record_type: String,
        data: Value,
    },
}

impl RestOperation {
    /// Operation name as used in work items.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Get { .. } => "get",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Upsert { .. } => "upsert",
            Self::Search { .. } => "search",
            Self::Transform { .. } => "transform",
        }
    }

    /// HTTP method for the operation.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Get { .. } => HttpMethod::Get,
            Self::Create { .. } | Self::Search { .. } | Self::Transform { .. } => HttpMethod::Post,
            Self::Update { .. } => HttpMethod::Patch,
            Self::Delete { .. } => HttpMethod::Delete,
            Self::Upsert { .. } => HttpMethod::Put,
        }
    }

    /// Endpoint path relative to `/services/rest`, including any query string.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Get {
                record_type,
                record_id,
                expand_sub_resources,
                fields,
            } => {
                let mut query = Vec::new();
                if *expand_sub_resources {
                    query.push("expandSubResources=true".to_owned());
                }
                if let Some(fields) = fields.as_deref().filter(|f| !f.is_empty()) {
                    query.push(format!("fields={}", oauth_encode(fields)));
                }
                with_query(record_path(&[record_type, record_id]), &query)
            }
            Self::Create { record_type, .. } => record_path(&[record_type]),
            Self::Update {
                record_type,
                record_id,
                ..
            }
            | Self::Delete {
                record_type,
                record_id,
            } => record_path(&[record_type, record_id]),
            Self::Upsert {
                record_type,
                external_id_field,
                external_id_value,
                ..
            } => record_path(&[record_type, external_id_field, external_id_value]),
            Self::Search { limit, offset, .. } => {
                // Pagination goes in the query string, not the body
                let query: Vec<String> = [("limit", *limit), ("offset", *offset)]
                    .into_iter()
                    .filter_map(|(name, value)| {
                        value.filter(|n| *n > 0).map(|n| format!("{name}={n}"))
                    })
                    .collect();
                with_query("/query/v1/suiteql".to_owned(), &query)
            }
            Self::Transform {
                source_record_type,
                source_record_id,
                target_record_type,
                ..
            } => format!(
                "{}/!transform/{}",
                record_path(&[source_record_type, source_record_id]),
                oauth_encode(target_record_type)
            ),
        }
    }

    /// JSON body sent with the request.
    #[must_use]
    pub fn body(&self) -> Option<Value> {
        match self {
            Self::Get { .. } | Self::Delete { .. } => None,
            Self::Create { data, .. }
            | Self::Update { data, .. }
            | Self::Upsert { data, .. }
            | Self::Transform { data, .. } => Some(data.clone()),
            Self::Search { query, .. } => Some(serde_json::json!({ "q": query })),
        }
    }

    /// Route the operation for the given account.
    #[must_use]
    pub fn route(&self, account_id: &str) -> RoutedRequest {
        RoutedRequest {
            method: self.method(),
            url: format!("{}{}", rest_base_url(account_id), self.path()),
            body: self.body(),
            surface: ApiSurface::Rest,
        }
    }
}

fn record_path(segments: &[&String]) -> String {
    let mut path = "/record/v1".to_owned();
    for segment in segments {
        path.push('/');
        path.push_str(&oauth_encode(segment));
    }
    path
}

fn with_query(path: String, query: &[String]) -> String {
    if query.is_empty() {
        path
    } else {
        format!("{path}?{}", query.join("&"))
    }
}

/// HTTP method selected for a generic RESTlet call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestletMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl FromStr for RestletMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "delete" => Ok(Self::Delete),
            other => Err(format!("unknown RESTlet method: {other}")),
        }
    }
}

impl fmt::Display for RestletMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// RESTlet call.
///
/// GET and DELETE carry extra query parameters; POST and PUT carry a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub enum RestletOperation {
    Get { params: Vec<(String, String)> },
    Post { body: Value },
    Put { body: Value },
    Delete { params: Vec<(String, String)> },
}

impl RestletOperation {
    /// HTTP method for the call.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Get { .. } => HttpMethod::Get,
            Self::Post { .. } => HttpMethod::Post,
            Self::Put { .. } => HttpMethod::Put,
            Self::Delete { .. } => HttpMethod::Delete,
        }
    }

    /// Route the call to the given script deployment.
    #[must_use]
    pub fn route(&self, account_id: &str, target: &RestletTarget) -> RoutedRequest {
        let mut query: Vec<(&str, &str)> = vec![
            ("script", target.script_id()),
            ("deploy", target.deploy_id()),
        ];

        let body = match self {
            Self::Get { params } | Self::Delete { params } => {
                // A parameter with an existing name replaces its value
                for (name, value) in params {
                    match query.iter_mut().find(|(k, _)| *k == name.as_str()) {
                        Some(existing) => existing.1 = value.as_str(),
                        None => query.push((name.as_str(), value.as_str())),
                    }
                }
                None
            }
            Self::Post { body } | Self::Put { body } => Some(body.clone()),
        };

        let query = query
            .iter()
            .map(|(k, v)| format!("{}={}", oauth_encode(k), oauth_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        RoutedRequest {
            method: self.method(),
            url: format!("{}?{query}", restlet_base_url(account_id)),
            body,
            surface: ApiSurface::Restlet,
        }
    }
}
