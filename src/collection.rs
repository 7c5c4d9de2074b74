use crate::prompt::now_timestamp;
use serde::{Deserialize, Serialize};

/// A named grouping of prompts.
///
/// Prompts point at a collection through their `collection_id`; the collection
/// itself holds no list of members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl Collection {
    pub fn new(id: String, name: String) -> Collection {
        Collection {
            id,
            name,
            created_at: now_timestamp(),
        }
    }
}
