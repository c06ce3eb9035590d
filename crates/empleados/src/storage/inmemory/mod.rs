//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of the repository traits
//! that stores all data in BTreeMaps wrapped in `Arc<RwLock<_>>`. Records are
//! kept in identifier order, the order DynamoDB returns them in. This is
//! useful for testing and local runs where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use empleados::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
