/*!
 * Admin-panel integration.
 *
 * Builds the language-aware list columns, filters, fieldsets and the
 * rendered HTML link strings an admin panel shows next to translatable
 * records: change links for existing translations and add links for
 * configured languages that have none yet.
 */

use anyhow::Result;

use crate::database::{Record, Repository};
use crate::language_utils::LanguageRegistry;

/// Build an admin change URL for a record, or an `<a>` tag when a title
/// is given
pub fn admin_change_url(
    collection: &str,
    record_id: i64,
    extra_path: &str,
    url_title: Option<&str>,
) -> String {
    let url = format!("/admin/{}/{}/change/{}", collection, record_id, extra_path);
    match url_title {
        Some(title) => format!("<a href=\"{}\">{}</a>", url, title),
        None => url,
    }
}

/// Build an admin add URL for a collection, or an `<a>` tag when a title
/// is given
pub fn admin_add_url(collection: &str, extra_path: &str, url_title: Option<&str>) -> String {
    let url = format!("/admin/{}/add/{}", collection, extra_path);
    match url_title {
        Some(title) => format!("<a href=\"{}\">{}</a>", url, title),
        None => url,
    }
}

/// HTML link to the record's original translation, or an empty string when
/// the record has no translation link
pub async fn translation_admin(repo: &Repository, record: &Record) -> Result<String> {
    let Some(original_id) = record.translation_of else {
        return Ok(String::new());
    };

    let Some(original) = repo.get_record(original_id).await? else {
        return Ok(String::new());
    };

    Ok(admin_change_url(
        &original.collection,
        original.id,
        "",
        Some(&original.to_string()),
    ))
}

/// Pipe-separated HTML links for all translations of a record.
///
/// Existing translations get change links titled with the language display
/// name; configured languages without a translation get an add link
/// pre-filling the original and language. An unsaved record renders as an
/// empty string. Store failures propagate.
pub async fn available_translations_admin(
    repo: &Repository,
    record: &Record,
    include_self: bool,
) -> Result<String> {
    if !record.is_saved() {
        return Ok(String::new());
    }

    let registry = repo.registry();
    let Some(original) = repo.original_translation(record).await? else {
        return Ok(String::new());
    };

    let mut available = repo.available_translations(record).await?;
    if include_self {
        available.push(record.clone());
    }

    let mut remaining = registry.codes();
    let mut output = Vec::new();

    // Edit links for every existing translation
    for translation in &available {
        let title = registry
            .display_name(&translation.language)
            .unwrap_or_else(|| translation.language.clone());
        output.push(admin_change_url(
            &translation.collection,
            translation.id,
            "",
            Some(&title),
        ));
        remaining.retain(|code| code != &translation.language);
    }

    // The record's own language is taken even when it was not listed
    remaining.retain(|code| code != &record.language);

    // Add links for all languages the original has no translations for
    for language in &remaining {
        let url = admin_add_url(
            &record.collection,
            &format!("?translation_of={}&amp;language={}", original.id, language),
            None,
        );
        let name = registry
            .display_name(language)
            .unwrap_or_else(|| language.clone());
        output.push(format!(
            "<a href=\"{}\" style=\"color:#baa\">{}</a>",
            url, name
        ));
    }

    Ok(output.join(" | "))
}

/// One admin fieldset: an optional title, CSS classes and field names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fieldset {
    /// Fieldset caption, None for the unnamed leading fieldset
    pub title: Option<String>,
    /// CSS classes applied to the fieldset
    pub classes: Vec<String>,
    /// Field names shown in the fieldset
    pub fields: Vec<String>,
}

/// Options controlling how the admin configuration is decorated
#[derive(Debug, Clone)]
pub struct AdminOptions {
    /// If set, only primary-language records are shown in the list view
    pub list_view_primary_only: bool,
    /// Name of the language field on the model
    pub language_field: String,
    /// If set, language columns are appended to the list view
    pub auto_add_list_view: bool,
    /// If set, a translations fieldset is appended to the edit view
    pub auto_add_edit_view: bool,
    /// If set, the translations fieldset renders collapsed
    pub collapse_translations_fieldset: bool,
}

impl Default for AdminOptions {
    fn default() -> Self {
        Self {
            list_view_primary_only: false,
            language_field: "language".to_string(),
            auto_add_list_view: true,
            auto_add_edit_view: true,
            collapse_translations_fieldset: true,
        }
    }
}

impl AdminOptions {
    /// Extend the list columns with the language field and the
    /// translations column
    pub fn list_display(&self, base: &[&str]) -> Vec<String> {
        let mut columns: Vec<String> = base.iter().map(|c| c.to_string()).collect();
        if self.auto_add_list_view {
            columns.push(self.language_field.clone());
            columns.push("available_translations_admin".to_string());
        }
        columns
    }

    /// Extend the read-only fields with the translations column
    pub fn readonly_fields(&self, base: &[&str]) -> Vec<String> {
        let mut fields: Vec<String> = base.iter().map(|f| f.to_string()).collect();
        if self.auto_add_list_view {
            fields.push("available_translations_exclude_current_admin".to_string());
        }
        fields
    }

    /// Extend the list filters with the language field
    pub fn list_filter(&self, base: &[&str]) -> Vec<String> {
        let mut filters: Vec<String> = base.iter().map(|f| f.to_string()).collect();
        filters.push(self.language_field.clone());
        filters
    }

    /// Extend the edit-view fieldsets with the translations fieldset
    pub fn fieldsets(&self, base: Vec<Fieldset>) -> Vec<Fieldset> {
        let mut fieldsets = base;
        if self.auto_add_edit_view {
            let classes = if self.collapse_translations_fieldset {
                vec!["collapse".to_string()]
            } else {
                Vec::new()
            };
            fieldsets.push(Fieldset {
                title: Some("Translations".to_string()),
                classes,
                fields: vec![
                    self.language_field.clone(),
                    "translation_of".to_string(),
                    "available_translations_exclude_current_admin".to_string(),
                ],
            });
        }
        fieldsets
    }

    /// The list-view language filter, when the list is restricted to
    /// primary-language records
    pub fn list_queryset_language<'a>(&self, registry: &'a LanguageRegistry) -> Option<&'a str> {
        if self.list_view_primary_only {
            Some(registry.primary())
        } else {
            None
        }
    }
}
