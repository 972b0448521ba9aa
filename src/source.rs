//! Option data sources.
//!
//! The admin API returns plain JSON records (`{"id": 3, "nama": "..."}`),
//! either as a bare array or wrapped in `{"data": [...]}`. An [`OptionFeed`]
//! says which keys to read; an [`OptionSource`] fetches the records.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::dropdown::SelectOption;
use crate::error::SourceError;

/// How to turn one API resource into dropdown options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionFeed {
    /// Resource path relative to the API base, e.g. `institutions`.
    pub resource: String,
    pub value_key: String,
    pub label_key: String,
    /// Boolean key marking records as unselectable.
    pub disabled_key: Option<String>,
}

impl OptionFeed {
    pub fn new(
        resource: impl Into<String>,
        value_key: impl Into<String>,
        label_key: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            value_key: value_key.into(),
            label_key: label_key.into(),
            disabled_key: None,
        }
    }

    pub fn disabled_key(mut self, key: impl Into<String>) -> Self {
        self.disabled_key = Some(key.into());
        self
    }

    /// Maps records to options, skipping records without a value or label.
    pub fn map_records(&self, records: &[Value]) -> Vec<SelectOption> {
        records
            .iter()
            .filter_map(|record| {
                let option = self.map_record(record);
                if option.is_none() {
                    tracing::warn!(
                        resource = %self.resource,
                        "Skipping record without `{}`/`{}`",
                        self.value_key,
                        self.label_key
                    );
                }
                option
            })
            .collect()
    }

    /// Maps records that belong to a parent, e.g. regionals of an institution.
    pub fn map_grouped(&self, records: &[Value], parent_key: &str) -> Vec<(String, SelectOption)> {
        records
            .iter()
            .filter_map(|record| {
                let parent = scalar_to_string(record.get(parent_key)?)?;
                Some((parent, self.map_record(record)?))
            })
            .collect()
    }

    fn map_record(&self, record: &Value) -> Option<SelectOption> {
        let value = scalar_to_string(record.get(&self.value_key)?)?;
        let label = scalar_to_string(record.get(&self.label_key)?)?;
        let disabled = self
            .disabled_key
            .as_ref()
            .and_then(|key| record.get(key))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Some(SelectOption::new(value, label).disabled(disabled))
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Unwraps a response body into its list of records.
pub fn records_from_body(resource: &str, body: Value) -> Result<Vec<Value>, SourceError> {
    match body {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(SourceError::UnexpectedShape {
                resource: resource.to_string(),
            }),
        },
        _ => Err(SourceError::UnexpectedShape {
            resource: resource.to_string(),
        }),
    }
}

/// Fetches raw records for a resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OptionSource: Send + Sync {
    async fn fetch(&self, resource: &str) -> Result<Vec<Value>, SourceError>;
}

/// Loads and maps the options of one feed.
pub async fn load_options(
    source: &dyn OptionSource,
    feed: &OptionFeed,
) -> Result<Vec<SelectOption>, SourceError> {
    let records = source.fetch(&feed.resource).await?;
    let options = feed.map_records(&records);
    tracing::info!(
        resource = %feed.resource,
        count = options.len(),
        "Loaded dropdown options"
    );
    Ok(options)
}

/// Fetches records from the admin REST API.
pub struct HttpSource {
    client: reqwest::Client,
    base: String,
}

impl HttpSource {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.base, resource.trim_start_matches('/'))
    }
}

#[async_trait]
impl OptionSource for HttpSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<Value>, SourceError> {
        let body: Value = self
            .client
            .get(self.url(resource))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        records_from_body(resource, body)
    }
}

/// In-memory records, keyed by resource.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    resources: HashMap<String, Value>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resource: impl Into<String>, body: Value) -> Self {
        self.resources.insert(resource.into(), body);
        self
    }
}

#[async_trait]
impl OptionSource for StaticSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<Value>, SourceError> {
        let body = self
            .resources
            .get(resource)
            .cloned()
            .ok_or_else(|| SourceError::UnknownResource(resource.to_string()))?;
        records_from_body(resource, body)
    }
}
