//! Search request parameters
//!
//! [`SearchParams`] is the raw JSON object a caller sends; [`SearchRequest`]
//! is the validated form with every default applied.

use schemars::{JsonSchema, Schema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SearchError;

/// Hard ceiling on results per invocation
pub const MAX_RESULTS_LIMIT: u32 = 10;

/// Sort field understood by the repository search endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    Stars,
    Forks,
    Updated,
    HelpWantedIssues,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::Forks => "forks",
            Self::Updated => "updated",
            Self::HelpWantedIssues => "help-wanted-issues",
        }
    }
}

/// Raw search parameters as received from the agent
///
/// Every field is optional on the wire so a missing `keywords` surfaces as a
/// validation error; the published schema still lists it as required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[schemars(transform = require_keywords)]
pub struct SearchParams {
    #[schemars(description = "Free-text search keywords (required), e.g. \"python web framework\"")]
    pub keywords: Option<String>,

    #[schemars(description = "Filter by primary language, e.g. \"python\", \"typescript\"")]
    pub language: Option<String>,

    #[schemars(description = "Minimum star count (default: 0)")]
    pub min_stars: Option<i64>,

    #[schemars(description = "Filter by GitHub topic, e.g. \"machine-learning\"")]
    pub topic: Option<String>,

    #[schemars(description = "Sort field: stars, forks, updated or help-wanted-issues (default: stars)")]
    pub sort_by: Option<SortBy>,

    #[schemars(description = "Number of repositories to return, 1-10 (default: 5)")]
    pub max_results: Option<i64>,

    #[schemars(description = "Fetch README content for each result (default: true)")]
    pub include_readme: Option<bool>,

    #[schemars(description = "Suggest alternative searches when nothing matches (default: true)")]
    pub fallback_search: Option<bool>,
}

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub keywords: String,
    pub language: Option<String>,
    pub min_stars: u64,
    pub topic: Option<String>,
    pub sort_by: SortBy,
    /// Always within `1..=MAX_RESULTS_LIMIT`
    pub max_results: u32,
    pub include_readme: bool,
    pub fallback_search: bool,
}

impl SearchParams {
    /// Parse the JSON object handed over by the caller
    pub fn from_json(input: &str) -> Result<Self, SearchError> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| SearchError::Validation(format!("Invalid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Read parameters from an already-parsed JSON value
    ///
    /// A well-formed value with a field of the wrong type or an unknown
    /// `sort_by` is reported against the offending field.
    pub fn from_value(value: Value) -> Result<Self, SearchError> {
        let Value::Object(fields) = value else {
            return Err(SearchError::Validation(
                "parameters must be a JSON object".into(),
            ));
        };

        serde_json::from_value(Value::Object(fields.clone())).map_err(|e| {
            match fields.iter().find(|(key, value)| !field_is_valid(key, value)) {
                Some((key, _)) => {
                    SearchError::Validation(format!("invalid value for '{}': {}", key, e))
                }
                None => SearchError::Validation(format!("invalid parameters: {}", e)),
            }
        })
    }

    /// Check required fields and apply defaults
    ///
    /// `max_results` is clamped rather than rejected; `default_max_results`
    /// is used when the caller leaves it out.
    pub fn validate(self, default_max_results: u32) -> Result<SearchRequest, SearchError> {
        let keywords = match self.keywords.as_deref().map(str::trim) {
            Some(k) if !k.is_empty() => k.to_string(),
            Some(_) => return Err(SearchError::Validation("'keywords' must not be empty".into())),
            None => return Err(SearchError::Validation("'keywords' is required".into())),
        };

        let min_stars = match self.min_stars {
            None => 0,
            Some(n) if n < 0 => {
                return Err(SearchError::Validation(format!(
                    "'min_stars' must be >= 0, got {}",
                    n
                )))
            }
            Some(n) => n as u64,
        };

        let max_results = self
            .max_results
            .unwrap_or(i64::from(default_max_results))
            .clamp(1, i64::from(MAX_RESULTS_LIMIT)) as u32;

        Ok(SearchRequest {
            keywords,
            language: non_empty(self.language),
            min_stars,
            topic: non_empty(self.topic),
            sort_by: self.sort_by.unwrap_or_default(),
            max_results,
            include_readme: self.include_readme.unwrap_or(true),
            fallback_search: self.fallback_search.unwrap_or(true),
        })
    }
}

fn field_is_valid(key: &str, value: &Value) -> bool {
    let mut single = Map::new();
    single.insert(key.to_string(), value.clone());
    serde_json::from_value::<SearchParams>(Value::Object(single)).is_ok()
}

fn require_keywords(schema: &mut Schema) {
    if let Some(object) = schema.as_object_mut() {
        let required = object
            .entry("required")
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Some(list) = required.as_array_mut() {
            if !list.iter().any(|v| v == "keywords") {
                list.push(Value::from("keywords"));
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
