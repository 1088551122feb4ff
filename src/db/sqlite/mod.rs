//! SQLite implementation of the database traits.
//!
//! This module provides a SQLx-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod helpers;
mod project;

#[cfg(test)]
mod project_test;

pub use connection::SqliteDatabase;
pub use project::SqliteProjectRepository;
