//! Core types for the empleados access layer.
//!
//! Everything in this crate is pure: domain records, the search tokenizer,
//! record keys, and the repository contracts that storage backends implement.

pub mod empleado;
pub mod storage;
