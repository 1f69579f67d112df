/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for record storage and translation
 * traversal, abstracting away the SQL details and providing type-safe access.
 *
 * Traversal contract: a missing translation is `Ok(None)` or an empty
 * collection, never an error. Store failures propagate.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{Connection, OptionalExtension, params};

use crate::errors::ValidationError;
use crate::language_utils::LanguageRegistry;

use super::connection::DatabaseConnection;
use super::models::{NewRecord, Record};

/// Column list shared by every record SELECT
const RECORD_COLUMNS: &str =
    "id, collection, title, slug, body, language, translation_of, created_at, updated_at";

/// Repository for record storage and translation traversal
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
    /// Configured language registry
    registry: LanguageRegistry,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection, registry: LanguageRegistry) -> Self {
        Self { db, registry }
    }

    /// Create a repository with the default database location
    pub fn new_default(registry: LanguageRegistry) -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db, registry))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory(registry: LanguageRegistry) -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db, registry))
    }

    /// The configured language registry
    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// The underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<Record> {
        Ok(Record {
            id: row.get(0)?,
            collection: row.get(1)?,
            title: row.get(2)?,
            slug: row.get(3)?,
            body: row.get(4)?,
            language: row.get(5)?,
            translation_of: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    // =========================================================================
    // Record CRUD
    // =========================================================================

    /// Insert a new record, validating its language slot first
    pub async fn insert_record(&self, new_record: NewRecord) -> Result<Record> {
        let registry = self.registry.clone();

        self.db
            .execute_async(move |conn| {
                Self::validate_language_sync(
                    conn,
                    &registry,
                    None,
                    &new_record.language,
                    new_record.translation_of,
                )?;

                let mut record = new_record.into_record();
                conn.execute(
                    r#"
                    INSERT INTO records (
                        collection, title, slug, body, language, translation_of,
                        created_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                    params![
                        record.collection,
                        record.title,
                        record.slug,
                        record.body,
                        record.language,
                        record.translation_of,
                        record.created_at,
                        record.updated_at,
                    ],
                )?;
                record.id = conn.last_insert_rowid();

                debug!(
                    "Inserted record {} ({}, {})",
                    record.id, record.slug, record.language
                );
                Ok(record)
            })
            .await
    }

    /// Update an existing record, re-validating its language slot
    pub async fn update_record(&self, record: &Record) -> Result<()> {
        let registry = self.registry.clone();
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                Self::validate_language_sync(
                    conn,
                    &registry,
                    Some(record.id),
                    &record.language,
                    record.translation_of,
                )?;

                let now = chrono::Utc::now().to_rfc3339();
                conn.execute(
                    r#"
                    UPDATE records
                    SET collection = ?2, title = ?3, slug = ?4, body = ?5,
                        language = ?6, translation_of = ?7, updated_at = ?8
                    WHERE id = ?1
                    "#,
                    params![
                        record.id,
                        record.collection,
                        record.title,
                        record.slug,
                        record.body,
                        record.language,
                        record.translation_of,
                        now,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Get a record by ID
    pub async fn get_record(&self, id: i64) -> Result<Option<Record>> {
        self.db
            .execute_async(move |conn| Self::get_record_sync(conn, id))
            .await
    }

    /// Get a record by ID (synchronous version for use within closures)
    fn get_record_sync(conn: &Connection, id: i64) -> Result<Option<Record>> {
        let result = conn
            .query_row(
                &format!("SELECT {} FROM records WHERE id = ?1", RECORD_COLUMNS),
                [id],
                Self::row_to_record,
            )
            .optional()?;

        Ok(result)
    }

    /// Get a record by collection and slug
    pub async fn get_by_slug(&self, collection: &str, slug: &str) -> Result<Option<Record>> {
        let collection = collection.to_string();
        let slug = slug.to_string();

        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        &format!(
                            "SELECT {} FROM records WHERE collection = ?1 AND slug = ?2",
                            RECORD_COLUMNS
                        ),
                        params![collection, slug],
                        Self::row_to_record,
                    )
                    .optional()?;

                Ok(result)
            })
            .await
    }

    /// List records in a collection, optionally filtered by language
    pub async fn list_records(
        &self,
        collection: &str,
        language: Option<&str>,
    ) -> Result<Vec<Record>> {
        let collection = collection.to_string();
        let language = language.map(str::to_string);

        self.db
            .execute_async(move |conn| {
                let mut records = Vec::new();
                match language {
                    Some(language) => {
                        let mut stmt = conn.prepare(&format!(
                            "SELECT {} FROM records WHERE collection = ?1 AND language = ?2 ORDER BY id",
                            RECORD_COLUMNS
                        ))?;
                        let rows = stmt.query_map(params![collection, language], Self::row_to_record)?;
                        for row in rows {
                            records.push(row?);
                        }
                    }
                    None => {
                        let mut stmt = conn.prepare(&format!(
                            "SELECT {} FROM records WHERE collection = ?1 ORDER BY id",
                            RECORD_COLUMNS
                        ))?;
                        let rows = stmt.query_map(params![collection], Self::row_to_record)?;
                        for row in rows {
                            records.push(row?);
                        }
                    }
                }
                Ok(records)
            })
            .await
    }

    /// Delete a record by ID. Returns whether a row was removed.
    pub async fn delete_record(&self, id: i64) -> Result<bool> {
        self.db
            .execute_async(move |conn| {
                let affected = conn.execute("DELETE FROM records WHERE id = ?1", [id])?;
                Ok(affected > 0)
            })
            .await
    }

    // =========================================================================
    // Translation traversal
    // =========================================================================

    /// All sibling translations of a record.
    ///
    /// An unsaved record has no translations. For a primary-language record
    /// these are all records linking to it. For a translation these are its
    /// original followed by the original's other translations.
    pub async fn available_translations(&self, record: &Record) -> Result<Vec<Record>> {
        if !record.is_saved() {
            return Ok(Vec::new());
        }

        let registry = self.registry.clone();
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                if registry.is_primary(&record.language) {
                    return Self::children_sync(conn, record.id, None);
                }

                match record.translation_of {
                    Some(original_id) => {
                        let Some(original) = Self::get_record_sync(conn, original_id)? else {
                            return Ok(Vec::new());
                        };
                        let mut siblings = vec![original];
                        siblings.extend(Self::children_sync(
                            conn,
                            original_id,
                            Some(&record.language),
                        )?);
                        Ok(siblings)
                    }
                    None => Ok(Vec::new()),
                }
            })
            .await
    }

    /// The canonical primary-language record: the record itself when it is
    /// in the primary language, otherwise the record behind `translation_of`
    pub async fn original_translation(&self, record: &Record) -> Result<Option<Record>> {
        if self.registry.is_primary(&record.language) {
            return Ok(Some(record.clone()));
        }

        match record.translation_of {
            Some(original_id) => self.get_record(original_id).await,
            None => Ok(None),
        }
    }

    /// The sibling of a record in the given language, if one exists.
    ///
    /// Returns `Ok(None)` for unconfigured languages and for languages with
    /// no persisted sibling; store failures propagate.
    pub async fn translation_for(&self, record: &Record, language: &str) -> Result<Option<Record>> {
        if !self.registry.contains(language) {
            return Ok(None);
        }
        if record.language == language {
            return Ok(Some(record.clone()));
        }

        let Some(original) = self.original_translation(record).await? else {
            return Ok(None);
        };
        if original.language == language {
            return Ok(Some(original));
        }

        let language = language.to_string();
        let original_id = original.id;

        self.db
            .execute_async(move |conn| Self::child_for_language_sync(conn, original_id, &language))
            .await
    }

    /// Children of an original, optionally excluding one language
    fn children_sync(
        conn: &Connection,
        original_id: i64,
        exclude_language: Option<&str>,
    ) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        match exclude_language {
            Some(language) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM records WHERE translation_of = ?1 AND language != ?2 ORDER BY id",
                    RECORD_COLUMNS
                ))?;
                let rows = stmt.query_map(params![original_id, language], Self::row_to_record)?;
                for row in rows {
                    records.push(row?);
                }
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM records WHERE translation_of = ?1 ORDER BY id",
                    RECORD_COLUMNS
                ))?;
                let rows = stmt.query_map(params![original_id], Self::row_to_record)?;
                for row in rows {
                    records.push(row?);
                }
            }
        }
        Ok(records)
    }

    fn child_for_language_sync(
        conn: &Connection,
        original_id: i64,
        language: &str,
    ) -> Result<Option<Record>> {
        let result = conn
            .query_row(
                &format!(
                    "SELECT {} FROM records WHERE translation_of = ?1 AND language = ?2",
                    RECORD_COLUMNS
                ),
                params![original_id, language],
                Self::row_to_record,
            )
            .optional()?;

        Ok(result)
    }

    // =========================================================================
    // Write-time validation
    // =========================================================================

    /// Validate the (original, language) slot of a candidate write.
    ///
    /// The candidate's original is the record behind `translation_of` when
    /// set. If that original (or one of its translations) already occupies
    /// the target language and is not the record being written, the write is
    /// rejected. A record without a translation link only needs its language
    /// code checked.
    fn validate_language_sync(
        conn: &Connection,
        registry: &LanguageRegistry,
        candidate_id: Option<i64>,
        language: &str,
        translation_of: Option<i64>,
    ) -> Result<()> {
        if !registry.contains(language) {
            return Err(ValidationError::UnknownLanguage(language.to_string()).into());
        }

        let Some(original_id) = translation_of else {
            return Ok(());
        };

        let original = Self::get_record_sync(conn, original_id)?
            .ok_or(ValidationError::MissingTarget(original_id))?;

        if !registry.is_primary(&original.language) {
            return Err(ValidationError::NonPrimaryTarget {
                target: original.id,
                language: original.language,
            }
            .into());
        }

        let occupant = if original.language == language {
            Some(original)
        } else {
            Self::child_for_language_sync(conn, original_id, language)?
        };

        if let Some(occupant) = occupant {
            // Editing a record into its own existing slot is allowed;
            // records are compared by primary key.
            if Some(occupant.id) != candidate_id {
                return Err(ValidationError::DuplicateTranslation {
                    language: language.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}
