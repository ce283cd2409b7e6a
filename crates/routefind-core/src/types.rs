//! Core data types: the canonical [`Route`] record and the validated
//! provider envelope it is extracted from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::{Error, Result};

/// One discovered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Pathname plus query plus fragment; `"/"` when all three are empty.
    pub path: String,
    /// Absolute URL exactly as the provider supplied it.
    pub url: String,
    /// Whether the URL's host differs from the queried domain's host.
    pub is_external: bool,
    /// Provider-supplied page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Provider-supplied snippet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single organic search result, reduced to the fields routes are built from.
///
/// Fields with the wrong JSON type are treated as absent rather than failing
/// the whole envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawResult {
    /// Result URL, if the provider sent one as a string.
    pub url: Option<String>,
    /// Result title.
    pub title: Option<String>,
    /// Result snippet.
    pub description: Option<String>,
}

impl RawResult {
    /// Convenience constructor for a record that only carries a URL.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            url: text("url"),
            title: text("title"),
            description: text("description"),
        }
    }
}

/// Search results as returned by the provider, validated at the client boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderEnvelope {
    /// Organic results in provider relevance order.
    pub organic_results: Vec<RawResult>,
    /// Provider metadata, passed through untouched.
    pub meta_data: Option<Value>,
}

impl ProviderEnvelope {
    /// Build an envelope directly from already-validated records.
    #[must_use]
    pub const fn new(organic_results: Vec<RawResult>) -> Self {
        Self {
            organic_results,
            meta_data: None,
        }
    }

    /// Parse a raw response body.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::MalformedResponse(format!("body is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Validate a decoded JSON value.
    ///
    /// A missing or `null` `organic_results` is an empty result set. Records
    /// that are not objects are dropped with a warning.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(Error::MalformedResponse(format!(
                "expected a JSON object, found {}",
                json_kind(&value)
            )));
        };

        let organic_results = match map.remove("organic_results") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .filter_map(|(position, item)| match item {
                    Value::Object(obj) => Some(RawResult::from_object(&obj)),
                    other => {
                        warn!(
                            position,
                            kind = json_kind(&other),
                            "dropping search result that is not an object"
                        );
                        None
                    },
                })
                .collect(),
            Some(other) => {
                return Err(Error::MalformedResponse(format!(
                    "`organic_results` must be an array, found {}",
                    json_kind(&other)
                )));
            },
        };

        let meta_data = map.remove("meta_data").filter(|v| !v.is_null());

        Ok(Self {
            organic_results,
            meta_data,
        })
    }

    /// Number of result records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.organic_results.len()
    }

    /// Whether the provider returned no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.organic_results.is_empty()
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
