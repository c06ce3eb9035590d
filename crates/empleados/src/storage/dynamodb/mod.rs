//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the repository traits
//! using `aws-sdk-dynamodb`. Employees and logs share a single table keyed by
//! `hk` (record type marker) and `sk` (record identifier).

mod conversions;
mod error;
mod expressions;
mod keys;
mod repository;

pub use repository::DynamoDbRepository;
