//! Employee and audit log access layer.
//!
//! Storage backends implementing the repository traits from
//! `empleados_core::storage`, plus the environment configuration and output
//! helpers used by the `empleados` binary.

pub mod cli;
pub mod config;
pub mod output;
pub mod storage;
