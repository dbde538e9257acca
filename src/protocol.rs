//! GraphQL-over-HTTP wire types.
//!
//! Requests are `{"query": "..."}` POST bodies. Responses are decoded into a
//! passthrough envelope whose `data` and `errors` members are kept as raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// POST body sent to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

impl QueryRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Response envelope. Missing members decode as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryEnvelope {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub errors: Value,
}

impl QueryEnvelope {
    /// Whether the server reported any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        match &self.errors {
            Value::Null => false,
            Value::Array(errors) => !errors.is_empty(),
            _ => true,
        }
    }
}

/// Renders as compact JSON with both members present.
impl fmt::Display for QueryEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"data\":{},\"errors\":{}}}", self.data, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body() {
        let body = serde_json::to_string(&QueryRequest::new(r#"{ User(id: "x") { name } }"#))
            .expect("serialize");
        assert_eq!(body, r#"{"query":"{ User(id: \"x\") { name } }"}"#);
    }

    #[test]
    fn test_envelope_missing_members_are_null() {
        let envelope: QueryEnvelope = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(envelope.data, Value::Null);
        assert_eq!(envelope.errors, Value::Null);
        assert!(!envelope.has_errors());
    }

    #[test]
    fn test_envelope_keeps_arbitrary_json() {
        let envelope: QueryEnvelope = serde_json::from_str(
            r#"{"data": {"user": null}, "errors": [{"message": "boom", "path": ["user"]}], "extensions": {}}"#,
        )
        .expect("deserialize");

        assert_eq!(envelope.data, json!({"user": null}));
        assert_eq!(envelope.errors[0]["message"], "boom");
        assert!(envelope.has_errors());
    }

    #[test]
    fn test_envelope_errors_of_any_shape() {
        let envelope: QueryEnvelope =
            serde_json::from_str(r#"{"errors": "Internal Server Error"}"#).expect("deserialize");
        assert!(envelope.has_errors());

        let envelope: QueryEnvelope =
            serde_json::from_str(r#"{"data": 1, "errors": []}"#).expect("deserialize");
        assert!(!envelope.has_errors());
    }

    #[test]
    fn test_envelope_rejects_non_json() {
        assert!(serde_json::from_str::<QueryEnvelope>("<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_envelope_display() {
        let envelope = QueryEnvelope {
            data: json!({"user": {"name": "alice"}}),
            errors: Value::Null,
        };
        assert_eq!(
            envelope.to_string(),
            r#"{"data":{"user":{"name":"alice"}},"errors":null}"#
        );
    }
}
