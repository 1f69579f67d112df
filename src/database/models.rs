/*!
 * Database entity models and the multilingual capability trait.
 *
 * These structures map directly to the records table and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};

/// Explicit multilingual capability.
///
/// A type implementing this trait carries a language code and an optional
/// link to its primary-language original, which is all the traversal
/// helpers need. Implement it per entity type; capability is never
/// retrofitted at runtime.
pub trait Translatable {
    /// The record's language code
    fn language(&self) -> &str;

    /// The primary key, if the record has been persisted
    fn primary_key(&self) -> Option<i64>;

    /// The primary key of the primary-language original, if this record
    /// is a translation
    fn translation_of(&self) -> Option<i64>;

    /// Marker for the multilingual capability
    fn is_multilingual(&self) -> bool {
        true
    }
}

/// A persisted translatable record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Database ID (0 until assigned by the database)
    pub id: i64,
    /// Collection the record belongs to, used as the admin URL namespace
    pub collection: String,
    /// Record title
    pub title: String,
    /// URL slug, unique within the collection
    pub slug: String,
    /// Record body
    pub body: String,
    /// Language code, one of the configured languages
    pub language: String,
    /// Primary key of the primary-language original, for translations
    pub translation_of: Option<i64>,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl Record {
    /// Whether the record has been persisted
    pub fn is_saved(&self) -> bool {
        self.id > 0
    }
}

impl Translatable for Record {
    fn language(&self) -> &str {
        &self.language
    }

    fn primary_key(&self) -> Option<i64> {
        if self.is_saved() { Some(self.id) } else { None }
    }

    fn translation_of(&self) -> Option<i64> {
        self.translation_of
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Input for inserting a new record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecord {
    /// Collection the record belongs to
    pub collection: String,
    /// Record title
    pub title: String,
    /// URL slug, unique within the collection
    pub slug: String,
    /// Record body
    pub body: String,
    /// Language code
    pub language: String,
    /// Primary key of the primary-language original, for translations
    pub translation_of: Option<i64>,
}

impl NewRecord {
    /// Create a new record in the given language
    pub fn new<C, T, S>(collection: C, title: T, slug: S, language: &str) -> Self
    where
        C: Into<String>,
        T: Into<String>,
        S: Into<String>,
    {
        Self {
            collection: collection.into(),
            title: title.into(),
            slug: slug.into(),
            body: String::new(),
            language: language.to_string(),
            translation_of: None,
        }
    }

    /// Set the body text
    pub fn with_body<B: Into<String>>(mut self, body: B) -> Self {
        self.body = body.into();
        self
    }

    /// Link this record to its primary-language original
    pub fn with_translation_of(mut self, original_id: i64) -> Self {
        self.translation_of = Some(original_id);
        self
    }

    /// Turn the input into an unsaved record with fresh timestamps
    pub fn into_record(self) -> Record {
        let now = chrono::Utc::now().to_rfc3339();
        Record {
            id: 0, // Will be assigned by database
            collection: self.collection,
            title: self.title,
            slug: self.slug,
            body: self.body,
            language: self.language,
            translation_of: self.translation_of,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl Translatable for NewRecord {
    fn language(&self) -> &str {
        &self.language
    }

    fn primary_key(&self) -> Option<i64> {
        None
    }

    fn translation_of(&self) -> Option<i64> {
        self.translation_of
    }
}
