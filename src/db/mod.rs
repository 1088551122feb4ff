//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for project storage,
//! allowing the backing store to be swapped without changing the HTTP
//! handlers that sit on top of it.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Project) and their input shapes
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx-backed implementation

mod error;
mod models;
mod repository;
pub mod sqlite;
pub mod utils;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
