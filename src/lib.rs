//! # promptlab
//!
//! This crate provides the core functionality for the PromptLab system.
//!
//! PromptLab is a prompt management core that keeps prompts and collections in an
//! in-process store and offers template capabilities for dynamic content generation.
//! An external request layer owns id generation, payload validation, and the wire
//! protocol; this crate owns the data model, the store, and the query utilities.
//!
//! # Modules
//!
//! - [`collection`] - Collection data structure
//! - [`parser`] - Template parsing and variable extraction
//! - [`prompt`] - Core prompt data structures and partial updates
//! - [`query`] - Sorting, filtering, and searching over prompt lists
//! - [`storage`] - In-memory storage for prompts and collections
//! - [`validate`] - Prompt content validation
//!
//! # Examples
//!
//! ```rust
//! use promptlab::prompt::Prompt;
//! use promptlab::storage::MemoryStorage;
//!
//! // Create a store with caller-managed lifetime
//! let mut storage = MemoryStorage::new();
//!
//! // Create a prompt
//! let prompt = Prompt::new(
//!     "greeting".to_string(),
//!     "Greeting".to_string(),
//!     "Hello {{name}}, welcome to {{place}}!".to_string(),
//! );
//! storage.create_prompt(prompt);
//!
//! let stored = storage.get_prompt("greeting").expect("prompt was just created");
//! assert_eq!(stored.variables(), vec!["name", "place"]);
//! ```

pub mod collection;
pub mod parser;
pub mod prompt;
pub mod query;
pub mod storage;
pub mod validate;
