//! Work item parameters and their validation into operations.
//!
//! Items arrive as loosely-typed JSON objects with camelCase parameter names.
//! Each one is validated into a [`RestOperation`] or [`RestletOperation`]
//! before anything is signed or sent.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::NetSuiteError;
use crate::operation::{RestOperation, RestletMethod, RestletOperation};

/// Optional settings for `get` and `search`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalOptions {
    /// Expand sublists (`get`).
    pub expand_subresources: bool,
    /// Comma-separated field list (`get`).
    pub fields: Option<String>,
    /// Page size (`search`).
    pub limit: Option<u32>,
    /// Page offset (`search`).
    pub offset: Option<u32>,
}

/// Parameters of one REST Record / SuiteQL work item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RestItem {
    /// Operation name; defaults to `get`.
    pub operation: Option<String>,
    pub record_type: Option<String>,
    pub record_id: Option<String>,
    pub external_id_field: Option<String>,
    pub external_id_value: Option<String>,
    /// Record body as JSON text.
    pub record_data: Option<String>,
    pub source_record_type: Option<String>,
    pub source_record_id: Option<String>,
    pub target_record_type: Option<String>,
    /// Transform body as JSON text; defaults to `{}`.
    pub transform_data: Option<String>,
    pub suiteql_query: Option<String>,
    pub additional_options: AdditionalOptions,
}

impl RestItem {
    /// Validate the item into a [`RestOperation`].
    ///
    /// # Errors
    ///
    /// Returns [`NetSuiteError::UnknownOperation`] for unrecognized operation names,
    /// [`NetSuiteError::MissingField`] when a required parameter is absent or empty,
    /// and [`NetSuiteError::MalformedInput`] when JSON text fails to parse.
    pub fn into_operation(self, item: usize) -> Result<RestOperation, NetSuiteError> {
        let operation = self.operation.as_deref().unwrap_or("get");
        let op = match operation {
            "get" => RestOperation::Get {
                record_type: required(self.record_type, "recordType", item)?,
                record_id: required(self.record_id, "recordId", item)?,
                expand_sub_resources: self.additional_options.expand_subresources,
                fields: self.additional_options.fields,
            },
            "create" => RestOperation::Create {
                record_type: required(self.record_type, "recordType", item)?,
                data: parse_json(
                    &required(self.record_data, "recordData", item)?,
                    "recordData",
                    item,
                )?,
            },
            "update" => RestOperation::Update {
                record_type: required(self.record_type, "recordType", item)?,
                record_id: required(self.record_id, "recordId", item)?,
                data: parse_json(
                    &required(self.record_data, "recordData", item)?,
                    "recordData",
                    item,
                )?,
            },
            "delete" => RestOperation::Delete {
                record_type: required(self.record_type, "recordType", item)?,
                record_id: required(self.record_id, "recordId", item)?,
            },
            "upsert" => RestOperation::Upsert {
                record_type: required(self.record_type, "recordType", item)?,
                external_id_field: required(self.external_id_field, "externalIdField", item)?,
                external_id_value: required(self.external_id_value, "externalIdValue", item)?,
                data: parse_json(
                    &required(self.record_data, "recordData", item)?,
                    "recordData",
                    item,
                )?,
            },
            "search" => RestOperation::Search {
                query: required(self.suiteql_query, "suiteqlQuery", item)?,
                limit: self.additional_options.limit,
                offset: self.additional_options.offset,
            },
            "transform" => RestOperation::Transform {
                source_record_type: required(self.source_record_type, "sourceRecordType", item)?,
                source_record_id: required(self.source_record_id, "sourceRecordId", item)?,
                target_record_type: required(self.target_record_type, "targetRecordType", item)?,
                data: parse_optional_json(self.transform_data.as_deref(), "transformData", item)?,
            },
            other => {
                return Err(NetSuiteError::UnknownOperation {
                    item,
                    operation: other.to_owned(),
                });
            }
        };
        Ok(op)
    }
}

/// Parameters of one RESTlet work item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RestletItem {
    /// Body for RESTlet calls, as JSON text; defaults to `{}`.
    pub request_body: Option<String>,
    /// Query parameters (GET/DELETE) or body (POST/PUT) for generic calls,
    /// as JSON text; defaults to `{}`.
    pub additional_parameters: Option<String>,
}

impl RestletItem {
    /// Validate the item into a generic RESTlet call with the given method.
    ///
    /// # Errors
    ///
    /// Returns [`NetSuiteError::MalformedInput`] if `additionalParameters` is not
    /// valid JSON, or not a JSON object for GET/DELETE.
    pub fn into_operation(
        self,
        method: RestletMethod,
        item: usize,
    ) -> Result<RestletOperation, NetSuiteError> {
        const FIELD: &str = "additionalParameters";
        let params = parse_optional_json(self.additional_parameters.as_deref(), FIELD, item)?;

        let op = match method {
            RestletMethod::Get => RestletOperation::Get {
                params: query_params(params, FIELD, item)?,
            },
            RestletMethod::Delete => RestletOperation::Delete {
                params: query_params(params, FIELD, item)?,
            },
            RestletMethod::Post => RestletOperation::Post { body: params },
            RestletMethod::Put => RestletOperation::Put { body: params },
        };
        Ok(op)
    }

    /// Validate the item into a RESTlet POST call carrying `requestBody`.
    ///
    /// # Errors
    ///
    /// Returns [`NetSuiteError::MalformedInput`] if `requestBody` is not valid JSON.
    pub fn into_call(self, item: usize) -> Result<RestletOperation, NetSuiteError> {
        let body = parse_optional_json(self.request_body.as_deref(), "requestBody", item)?;
        Ok(RestletOperation::Post { body })
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    item: usize,
) -> Result<String, NetSuiteError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(NetSuiteError::MissingField { item, field })
}

fn parse_json(text: &str, field: &'static str, item: usize) -> Result<Value, NetSuiteError> {
    serde_json::from_str(text).map_err(|e| NetSuiteError::MalformedInput {
        item,
        field,
        message: e.to_string(),
    })
}

/// Parse optional JSON text, treating absent or blank text as `{}`.
fn parse_optional_json(
    text: Option<&str>,
    field: &'static str,
    item: usize,
) -> Result<Value, NetSuiteError> {
    match text.map(str::trim) {
        None | Some("") => Ok(Value::Object(Map::new())),
        Some(text) => parse_json(text, field, item),
    }
}

/// Flatten a JSON object into query parameters; non-string values are stringified.
fn query_params(
    value: Value,
    field: &'static str,
    item: usize,
) -> Result<Vec<(String, String)>, NetSuiteError> {
    let Value::Object(map) = value else {
        return Err(NetSuiteError::MalformedInput {
            item,
            field,
            message: "expected a JSON object".to_owned(),
        });
    };
    Ok(map
        .into_iter()
        .map(|(k, v)| {
            let v = match v {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (k, v)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn item(value: Value) -> RestItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_get_defaults() {
        let op = item(json!({"recordType": "customer", "recordId": "123"}))
            .into_operation(0)
            .unwrap();
        assert_eq!(
            op,
            RestOperation::Get {
                record_type: "customer".to_owned(),
                record_id: "123".to_owned(),
                expand_sub_resources: false,
                fields: None,
            }
        );
    }

    #[test]
    fn test_get_additional_options() {
        let op = item(json!({
            "operation": "get",
            "recordType": "customer",
            "recordId": "123",
            "additionalOptions": {"expandSubresources": true, "fields": "id"}
        }))
        .into_operation(0)
        .unwrap();
        assert_eq!(op.path(), "/record/v1/customer/123?expandSubResources=true&fields=id");
    }

    #[test]
    fn test_search_item() {
        let op = item(json!({
            "operation": "search",
            "suiteqlQuery": "SELECT id FROM customer",
            "additionalOptions": {"limit": 50, "offset": 10}
        }))
        .into_operation(0)
        .unwrap();
        assert_eq!(op.path(), "/query/v1/suiteql?limit=50&offset=10");
        assert_eq!(op.body(), Some(json!({"q": "SELECT id FROM customer"})));
    }

    #[test]
    fn test_create_parses_record_data() {
        let op = item(json!({
            "operation": "create",
            "recordType": "customer",
            "recordData": r#"{"companyName": "Acme"}"#
        }))
        .into_operation(0)
        .unwrap();
        assert_eq!(op.body(), Some(json!({"companyName": "Acme"})));
    }

    #[test]
    fn test_malformed_record_data() {
        let err = item(json!({
            "operation": "update",
            "recordType": "customer",
            "recordId": "1",
            "recordData": "{not json"
        }))
        .into_operation(3)
        .unwrap_err();
        assert!(matches!(
            err,
            NetSuiteError::MalformedInput {
                item: 3,
                field: "recordData",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_record_id() {
        let err = item(json!({"operation": "delete", "recordType": "customer"}))
            .into_operation(1)
            .unwrap_err();
        assert!(matches!(
            err,
            NetSuiteError::MissingField {
                item: 1,
                field: "recordId"
            }
        ));
    }

    #[test]
    fn test_empty_field_is_missing() {
        let err = item(json!({"operation": "get", "recordType": "", "recordId": "1"}))
            .into_operation(0)
            .unwrap_err();
        assert!(matches!(
            err,
            NetSuiteError::MissingField {
                field: "recordType",
                ..
            }
        ));
    }

    #[test]
    fn test_upsert_requires_external_id() {
        let err = item(json!({
            "operation": "upsert",
            "recordType": "customer",
            "externalIdField": "eid",
            "recordData": "{}"
        }))
        .into_operation(0)
        .unwrap_err();
        assert!(matches!(
            err,
            NetSuiteError::MissingField {
                field: "externalIdValue",
                ..
            }
        ));
    }

    #[test]
    fn test_transform_defaults_to_empty_body() {
        let op = item(json!({
            "operation": "transform",
            "sourceRecordType": "salesOrder",
            "sourceRecordId": "5",
            "targetRecordType": "invoice",
            "transformData": ""
        }))
        .into_operation(0)
        .unwrap();
        assert_eq!(op.body(), Some(json!({})));
    }

    #[test]
    fn test_malformed_transform_data() {
        let err = item(json!({
            "operation": "transform",
            "sourceRecordType": "salesOrder",
            "sourceRecordId": "5",
            "targetRecordType": "invoice",
            "transformData": "[1,"
        }))
        .into_operation(0)
        .unwrap_err();
        assert!(err.to_string().contains("transformData"));
    }

    #[test]
    fn test_unknown_operation() {
        let err = item(json!({"operation": "merge"}))
            .into_operation(4)
            .unwrap_err();
        assert!(matches!(err, NetSuiteError::UnknownOperation { item: 4, .. }));
    }

    #[test]
    fn test_restlet_get_params_stringified() {
        let op = RestletItem {
            additional_parameters: Some(r#"{"id": 123, "type": "customer"}"#.to_owned()),
            ..Default::default()
        }
        .into_operation(RestletMethod::Get, 0)
        .unwrap();
        assert_eq!(
            op,
            RestletOperation::Get {
                params: vec![
                    ("id".to_owned(), "123".to_owned()),
                    ("type".to_owned(), "customer".to_owned()),
                ]
            }
        );
    }

    #[test]
    fn test_restlet_delete_rejects_array() {
        let err = RestletItem {
            additional_parameters: Some("[1, 2]".to_owned()),
            ..Default::default()
        }
        .into_operation(RestletMethod::Delete, 2)
        .unwrap_err();
        assert!(matches!(
            err,
            NetSuiteError::MalformedInput {
                item: 2,
                field: "additionalParameters",
                ..
            }
        ));
    }

    #[test]
    fn test_restlet_put_body() {
        let op = RestletItem {
            additional_parameters: Some(r#"{"a": [1]}"#.to_owned()),
            ..Default::default()
        }
        .into_operation(RestletMethod::Put, 0)
        .unwrap();
        assert_eq!(op, RestletOperation::Put { body: json!({"a": [1]}) });
    }

    #[test]
    fn test_restlet_call_defaults_to_empty_body() {
        let op = RestletItem::default().into_call(0).unwrap();
        assert_eq!(op, RestletOperation::Post { body: json!({}) });
    }

    #[test]
    fn test_restlet_call_malformed_body() {
        let err = RestletItem {
            request_body: Some("{oops".to_owned()),
            ..Default::default()
        }
        .into_call(0)
        .unwrap_err();
        assert!(err.to_string().contains("requestBody"));
    }
}
