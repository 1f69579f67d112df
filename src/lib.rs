/*!
 * # lingua-link
 *
 * A Rust library for linking multilingual records that represent the same
 * logical content in different languages.
 *
 * ## Features
 *
 * - Persisted records carrying a language code and an optional
 *   `translation_of` link to their primary-language original
 * - Traversal helpers: sibling translations, the canonical record,
 *   per-language lookup
 * - Write-time validation of the (original, language) uniqueness invariant
 * - Admin-panel integration: language-aware list columns, filters,
 *   fieldsets and rendered link strings
 * - Template tag helpers and language-name filters
 * - Language-prefixed URL generation
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management and three-tier setting resolution
 * - `language_utils`: Configured language registry and ISO code helpers
 * - `database`: SQLite-backed record storage:
 *   - `database::connection`: Thread-safe connection wrapper
 *   - `database::schema`: Schema creation and migration
 *   - `database::models`: Record types and the `Translatable` trait
 *   - `database::repository`: CRUD, traversal and validation
 * - `admin`: Admin-panel list/fieldset decoration and link rendering
 * - `template_tags`: Template-facing tag helpers and filters
 * - `urls`: Language-prefixed URL helpers
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod language_utils;
pub mod database;
pub mod admin;
pub mod template_tags;
pub mod urls;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, LanguageEntry, Setting, SettingValue, Settings};
pub use database::{DatabaseConnection, NewRecord, Record, Repository, Translatable};
pub use language_utils::{LanguageRegistry, local_language_name, short_language_code};
pub use errors::{AppError, TemplateError, ValidationError};
