//! Persistence boundary for todo rows.
//!
//! # Responsibility
//! - Keep SQL details behind the repository contract.
//! - Surface absence as data (`Option`/`bool`), not as errors.

pub mod todo_repo;
