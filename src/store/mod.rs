//! Storage abstraction layer.
//!
//! Trait interfaces for post and featured-registry persistence, with
//! file-based implementations in the `file` submodule. Queries that the
//! document store is expected to answer (slug lookup, title search, tag
//! overlap) live on the traits so backends can push them down.
//!
//! # Naming Conventions
//!
//! - `list` - enumerate entities
//! - `load` - read a single entity, returns `Option` if not found
//! - `save` - create or update (upsert semantics)
//! - `delete` - remove an entity

pub mod error;

mod featured;
mod post;

pub mod file;

pub use error::{StorageError, StorageResult};
pub use featured::FeaturedStore;
pub use post::PostStore;
