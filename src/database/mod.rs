/*!
 * Database module for persistent storage of translatable records.
 *
 * This module provides SQLite-based persistence for:
 * - Translatable records (language plus translation_of self-reference)
 * - Translation traversal (siblings, original, per-language lookup)
 * - Write-time uniqueness validation of (original, language) pairs
 */

// Allow dead code and unused imports - database types are for library consumers
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::{NewRecord, Record, Translatable};
pub use repository::Repository;
