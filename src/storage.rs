//! # Memory Storage
//!
//! This module provides the in-process store for prompts and collections.
//!
//! The main component is the [`MemoryStorage`] struct, a pair of id → entity
//! maps with CRUD operations and one cascading rule: deleting a collection
//! detaches its prompts instead of deleting them.
//!
//! A [`MemoryStorage`] is explicitly instantiated and owned by the caller,
//! typically once per process or once per test. Access is single-threaded;
//! any concurrent request layer on top is responsible for serializing calls.
//! No operation fails for a missing id; absence is reported through
//! `Option` and `bool` return values.

use crate::collection::Collection;
use crate::prompt::{Prompt, PromptUpdate, now_timestamp};
use std::collections::HashMap;
use tracing::debug;

/// In-memory storage for prompts and collections.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    prompts: HashMap<String, Prompt>,
    collections: HashMap<String, Collection>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }

    /// Stores a prompt under its id and returns the stored prompt.
    ///
    /// An existing prompt with the same id is silently overwritten.
    pub fn create_prompt(&mut self, prompt: Prompt) -> Prompt {
        debug!(id = %prompt.id, "storing prompt");
        self.prompts.insert(prompt.id.clone(), prompt.clone());
        prompt
    }

    /// Gets a prompt by id, or `None` if it does not exist.
    pub fn get_prompt(&self, id: &str) -> Option<Prompt> {
        self.prompts.get(id).cloned()
    }

    /// Gets all stored prompts. Order is unspecified.
    pub fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts.values().cloned().collect()
    }

    /// Applies a partial update to the prompt with the given id.
    ///
    /// Only the fields present in `update` are merged into the stored record;
    /// everything else is left unchanged. `updated_at` is refreshed to the
    /// current time.
    ///
    /// # Returns
    ///
    /// * `Some(Prompt)` - The merged record, as now stored.
    /// * `None` - If no prompt with this id exists.
    pub fn update_prompt(&mut self, id: &str, update: PromptUpdate) -> Option<Prompt> {
        let prompt = self.prompts.get_mut(id)?;
        update.apply_to(prompt);
        prompt.updated_at = Some(now_timestamp());
        debug!(id, "updated prompt");
        Some(prompt.clone())
    }

    /// Deletes a prompt by id, returning whether it existed.
    pub fn delete_prompt(&mut self, id: &str) -> bool {
        let removed = self.prompts.remove(id).is_some();
        if removed {
            debug!(id, "deleted prompt");
        }
        removed
    }

    /// Stores a collection under its id and returns the stored collection.
    ///
    /// An existing collection with the same id is silently overwritten.
    pub fn create_collection(&mut self, collection: Collection) -> Collection {
        debug!(id = %collection.id, "storing collection");
        self.collections
            .insert(collection.id.clone(), collection.clone());
        collection
    }

    /// Gets a collection by id, or `None` if it does not exist.
    pub fn get_collection(&self, id: &str) -> Option<Collection> {
        self.collections.get(id).cloned()
    }

    /// Gets all stored collections. Order is unspecified.
    pub fn list_collections(&self) -> Vec<Collection> {
        self.collections.values().cloned().collect()
    }

    /// Deletes a collection by id and detaches its prompts.
    ///
    /// Every prompt whose `collection_id` equals this id has that field
    /// cleared and its `updated_at` refreshed; the prompts themselves are
    /// kept.
    ///
    /// # Returns
    ///
    /// * `true` - If the collection existed and was removed.
    /// * `false` - If no collection with this id exists; nothing is touched.
    pub fn delete_collection(&mut self, id: &str) -> bool {
        if self.collections.remove(id).is_none() {
            return false;
        }

        let now = now_timestamp();
        let mut detached = 0;
        for prompt in self.prompts.values_mut() {
            if prompt.collection_id.as_deref() == Some(id) {
                prompt.collection_id = None;
                prompt.updated_at = Some(now.clone());
                detached += 1;
            }
        }

        debug!(id, detached, "deleted collection");
        true
    }

    /// Gets all prompts whose `collection_id` equals `collection_id`.
    ///
    /// Exact match only: prompts without a collection never match.
    pub fn prompts_by_collection(&self, collection_id: &str) -> Vec<Prompt> {
        self.prompts
            .values()
            .filter(|prompt| prompt.collection_id.as_deref() == Some(collection_id))
            .cloned()
            .collect()
    }

    /// Empties both maps. Intended for test isolation.
    pub fn clear(&mut self) {
        self.prompts.clear();
        self.collections.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_prompt(id: &str) -> Prompt {
        Prompt {
            id: id.to_string(),
            title: format!("Prompt {}", id),
            template: "Write about {{topic}}".to_string(),
            description: Some("A sample prompt".to_string()),
            tags: vec!["sample".to_string()],
            collection_id: None,
            created_at: "2024-01-01T00:00:00".to_string(),
            updated_at: Some("2024-01-02T00:00:00".to_string()),
        }
    }

    fn sample_collection(id: &str) -> Collection {
        Collection {
            id: id.to_string(),
            name: format!("Collection {}", id),
            created_at: "2024-01-01T00:00:00".to_string(),
        }
    }

    #[test]
    fn test_create_and_get_prompt() {
        let mut storage = MemoryStorage::new();

        let created = storage.create_prompt(sample_prompt("p-1"));
        let fetched = storage.get_prompt("p-1").unwrap();

        assert_eq!(created, fetched);
    }

    #[test]
    fn test_get_prompt_missing() {
        let storage = MemoryStorage::new();
        assert!(storage.get_prompt("missing").is_none());
    }

    #[test]
    fn test_create_prompt_overwrites_existing() {
        let mut storage = MemoryStorage::new();
        storage.create_prompt(sample_prompt("p-1"));

        let mut replacement = sample_prompt("p-1");
        replacement.title = "Second version".to_string();
        storage.create_prompt(replacement);

        assert_eq!(1, storage.list_prompts().len());
        assert_eq!("Second version", storage.get_prompt("p-1").unwrap().title);
    }

    #[test]
    fn test_list_prompts() {
        let mut storage = MemoryStorage::new();
        storage.create_prompt(sample_prompt("p-1"));
        storage.create_prompt(sample_prompt("p-2"));

        let mut ids: Vec<String> = storage.list_prompts().into_iter().map(|p| p.id).collect();
        ids.sort();
        assert_eq!(vec!["p-1".to_string(), "p-2".to_string()], ids);
    }

    #[test]
    fn test_update_prompt_merges_only_provided_fields() {
        let mut storage = MemoryStorage::new();
        let original = storage.create_prompt(sample_prompt("p-1"));

        let update = PromptUpdate {
            title: Some("New title".to_string()),
            ..Default::default()
        };
        let updated = storage.update_prompt("p-1", update).unwrap();

        assert_eq!("New title", updated.title);
        assert_eq!(original.template, updated.template);
        assert_eq!(original.description, updated.description);
        assert_eq!(original.tags, updated.tags);
        assert_eq!(original.collection_id, updated.collection_id);
        assert_eq!(original.created_at, updated.created_at);
        assert_ne!(original.updated_at, updated.updated_at);

        // The merged record is what the store now holds
        assert_eq!(updated, storage.get_prompt("p-1").unwrap());
    }

    #[test]
    fn test_update_prompt_missing() {
        let mut storage = MemoryStorage::new();

        let update = PromptUpdate {
            title: Some("New title".to_string()),
            ..Default::default()
        };

        assert!(storage.update_prompt("missing", update).is_none());
        assert!(storage.list_prompts().is_empty());
    }

    #[test]
    fn test_delete_prompt() {
        let mut storage = MemoryStorage::new();
        storage.create_prompt(sample_prompt("p-1"));

        assert!(storage.delete_prompt("p-1"));
        assert!(storage.get_prompt("p-1").is_none());
        assert!(!storage.delete_prompt("p-1"));
    }

    #[test]
    fn test_create_and_get_collection() {
        let mut storage = MemoryStorage::new();

        let created = storage.create_collection(sample_collection("c-1"));
        let fetched = storage.get_collection("c-1").unwrap();

        assert_eq!(created, fetched);
        assert!(storage.get_collection("missing").is_none());
    }

    #[test]
    fn test_list_collections() {
        let mut storage = MemoryStorage::new();
        storage.create_collection(sample_collection("c-1"));
        storage.create_collection(sample_collection("c-2"));

        assert_eq!(2, storage.list_collections().len());
    }

    #[test]
    fn test_delete_collection_detaches_prompts() {
        let mut storage = MemoryStorage::new();
        storage.create_collection(sample_collection("c-1"));
        storage.create_collection(sample_collection("c-2"));

        let mut member1 = sample_prompt("p-1");
        member1.collection_id = Some("c-1".to_string());
        let mut member2 = sample_prompt("p-2");
        member2.collection_id = Some("c-1".to_string());
        let mut other = sample_prompt("p-3");
        other.collection_id = Some("c-2".to_string());

        let old_updated_at = member1.updated_at.clone();
        storage.create_prompt(member1);
        storage.create_prompt(member2);
        storage.create_prompt(other);

        assert!(storage.delete_collection("c-1"));

        assert!(storage.get_collection("c-1").is_none());
        assert_eq!(1, storage.list_collections().len());

        for id in ["p-1", "p-2"] {
            let prompt = storage.get_prompt(id).unwrap();
            assert!(prompt.collection_id.is_none());
            assert_ne!(old_updated_at, prompt.updated_at);
        }

        // Prompts in other collections keep their membership
        let untouched = storage.get_prompt("p-3").unwrap();
        assert_eq!(Some("c-2".to_string()), untouched.collection_id);
    }

    #[test]
    fn test_delete_collection_missing() {
        let mut storage = MemoryStorage::new();

        let mut member = sample_prompt("p-1");
        member.collection_id = Some("c-1".to_string());
        storage.create_prompt(member);

        assert!(!storage.delete_collection("missing"));
        assert_eq!(
            Some("c-1".to_string()),
            storage.get_prompt("p-1").unwrap().collection_id
        );
    }

    #[test]
    fn test_prompts_by_collection() {
        let mut storage = MemoryStorage::new();

        let mut member = sample_prompt("p-1");
        member.collection_id = Some("c-1".to_string());
        storage.create_prompt(member);
        storage.create_prompt(sample_prompt("p-2"));

        let members = storage.prompts_by_collection("c-1");
        assert_eq!(1, members.len());
        assert_eq!("p-1", members[0].id);

        // Prompts without a collection never match
        assert!(storage.prompts_by_collection("").is_empty());
        assert!(storage.prompts_by_collection("missing").is_empty());
    }

    #[test]
    fn test_clear() {
        let mut storage = MemoryStorage::new();
        storage.create_prompt(sample_prompt("p-1"));
        storage.create_collection(sample_collection("c-1"));

        storage.clear();

        assert!(storage.list_prompts().is_empty());
        assert!(storage.list_collections().is_empty());
    }
}
