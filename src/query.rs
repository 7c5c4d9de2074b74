//! Sorting, filtering, and searching over caller-supplied prompt lists.
//!
//! These are pure functions used by the request layer to shape responses.
//! They never touch the store and never mutate their input.

use crate::prompt::Prompt;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Returns a new list sorted by recency, newest first when `descending` is true.
///
/// A prompt's recency is its `updated_at`, falling back to `created_at` when
/// `updated_at` is absent or empty. Timestamps that cannot be parsed are
/// treated as the oldest possible value, so with `descending` they end up at
/// the tail. The sort is stable: prompts with equal timestamps keep their
/// input order.
pub fn sort_by_recency(prompts: &[Prompt], descending: bool) -> Vec<Prompt> {
    let mut sorted = prompts.to_vec();
    if descending {
        sorted.sort_by(|a, b| recency_key(b).cmp(&recency_key(a)));
    } else {
        sorted.sort_by(|a, b| recency_key(a).cmp(&recency_key(b)));
    }
    sorted
}

/// Returns the prompts whose `collection_id` equals `collection_id`.
///
/// Exact match only: prompts without a collection never match.
pub fn filter_by_collection(prompts: &[Prompt], collection_id: &str) -> Vec<Prompt> {
    prompts
        .iter()
        .filter(|prompt| prompt.collection_id.as_deref() == Some(collection_id))
        .cloned()
        .collect()
}

/// Returns the prompts whose title or description contains `query`,
/// case-insensitively.
///
/// Descriptions are only matched when present. An empty query matches every
/// prompt; input order is preserved.
pub fn search(prompts: &[Prompt], query: &str) -> Vec<Prompt> {
    let query = query.to_lowercase();
    prompts
        .iter()
        .filter(|prompt| {
            prompt.title.to_lowercase().contains(&query)
                || prompt
                    .description
                    .as_deref()
                    .map_or(false, |description| {
                        description.to_lowercase().contains(&query)
                    })
        })
        .cloned()
        .collect()
}

fn recency_key(prompt: &Prompt) -> NaiveDateTime {
    let timestamp = prompt
        .updated_at
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(&prompt.created_at);
    parse_timestamp(timestamp)
}

// Accepts RFC 3339, naive ISO-8601, bare dates, and numeric Unix epochs;
// anything else sorts as the minimum sentinel.
fn parse_timestamp(value: &str) -> NaiveDateTime {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return datetime.naive_utc();
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return datetime;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MIN);
    }
    if let Ok(epoch_seconds) = value.parse::<f64>() {
        if let Some(datetime) = DateTime::from_timestamp_millis((epoch_seconds * 1000.0) as i64) {
            return datetime.naive_utc();
        }
    }
    NaiveDateTime::MIN
}
