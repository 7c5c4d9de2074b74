use crate::parser::{RenderError, extract_variables, parse_template};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stored prompt, optionally associated with a collection.
///
/// Timestamps are ISO-8601 strings supplied by the caller (the external request
/// layer generates ids and initial timestamps). `updated_at` is `None` for a
/// prompt that has never been updated; recency sorting falls back to
/// `created_at` in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub template: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub collection_id: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// A partial update for a [`Prompt`].
///
/// Every field is optional; `None` leaves the corresponding prompt field
/// unchanged. Unknown fields are rejected when deserializing, so a payload
/// carrying anything outside this schema never reaches the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptUpdate {
    pub title: Option<String>,
    pub template: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub collection_id: Option<String>,
}

impl Prompt {
    pub fn new(id: String, title: String, template: String) -> Prompt {
        let created_at = now_timestamp();
        Prompt {
            id,
            title,
            template,
            description: None,
            tags: Vec::new(),
            collection_id: None,
            updated_at: Some(created_at.clone()),
            created_at,
        }
    }

    /// Returns the variable names found in the template, in order of occurrence.
    pub fn variables(&self) -> Vec<String> {
        extract_variables(&self.template)
    }

    /// Renders the template against the given variable values.
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, RenderError> {
        parse_template(&self.template).render(values)
    }
}

impl PromptUpdate {
    /// Merges the fields present in this update into `prompt`.
    ///
    /// Fields that are `None` are left untouched. The caller is responsible
    /// for refreshing `updated_at` after a merge.
    pub fn apply_to(self, prompt: &mut Prompt) {
        if let Some(title) = self.title {
            prompt.title = title;
        }
        if let Some(template) = self.template {
            prompt.template = template;
        }
        if let Some(description) = self.description {
            prompt.description = Some(description);
        }
        if let Some(tags) = self.tags {
            prompt.tags = tags;
        }
        if let Some(collection_id) = self.collection_id {
            prompt.collection_id = Some(collection_id);
        }
    }
}

/// Current UTC time as an ISO-8601 string, the format used for entity timestamps.
pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
