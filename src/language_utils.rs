/*!
 * Language utilities for the configured language list.
 *
 * Provides the registry built from the configured languages (the first
 * entry being the primary language) and free helpers for ISO 639-1 code
 * validation and display names.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

use crate::app_config::{Config, LanguageEntry};

/// Registry over the configured language list.
///
/// Built once from the configuration and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    entries: Vec<LanguageEntry>,
    use_local_names: bool,
}

impl LanguageRegistry {
    /// Build a registry from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entries: config.languages.clone(),
            use_local_names: config.use_local_language_names,
        })
    }

    /// Build a registry from explicit entries (mostly for tests)
    pub fn new(entries: Vec<LanguageEntry>) -> Result<Self> {
        let config = Config::with_languages(entries);
        Self::from_config(&config)
    }

    /// The primary language code (first configured entry)
    pub fn primary(&self) -> &str {
        &self.entries[0].code
    }

    /// Whether the given code is the primary language
    pub fn is_primary(&self, code: &str) -> bool {
        code == self.primary()
    }

    /// Whether the given code is configured at all
    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|entry| entry.code == code)
    }

    /// All configured language codes, in configuration order
    pub fn codes(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.code.clone()).collect()
    }

    /// The configured entries with display names applied.
    ///
    /// When local names are enabled the name is replaced by the
    /// locale-native one where isolang knows it.
    pub fn entries(&self) -> Vec<LanguageEntry> {
        if !self.use_local_names {
            return self.entries.clone();
        }
        self.entries
            .iter()
            .map(|entry| {
                let name = local_language_name_opt(&entry.code)
                    .unwrap_or_else(|| entry.name.clone());
                LanguageEntry::new(entry.code.clone(), name)
            })
            .collect()
    }

    /// Display name for a configured code, or None for unknown codes
    pub fn display_name(&self, code: &str) -> Option<String> {
        self.entries()
            .into_iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.name)
    }

    /// True when more than one language is configured
    pub fn multilingual_enabled(&self) -> bool {
        self.entries.len() > 1
    }
}

/// Extract the short language code from a full one: "de-at" becomes "de"
pub fn short_language_code(code: &str) -> &str {
    match code.find('-') {
        Some(pos) => &code[..pos],
        None => code,
    }
}

/// Validate that a code is a known ISO 639-1 two-letter code,
/// ignoring any regional suffix
pub fn validate_language_code(code: &str) -> Result<()> {
    let short = short_language_code(code.trim()).to_lowercase();
    if short.len() == 2 && Language::from_639_1(&short).is_some() {
        return Ok(());
    }
    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English language name for a code
pub fn language_name(code: &str) -> Result<String> {
    let short = short_language_code(code.trim()).to_lowercase();
    let lang = Language::from_639_1(&short)
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))?;
    Ok(lang.to_name().to_string())
}

/// Get the locale-native language name for a code, if isolang knows it
fn local_language_name_opt(code: &str) -> Option<String> {
    let short = short_language_code(code.trim()).to_lowercase();
    Language::from_639_1(&short)
        .and_then(|lang| lang.to_autonym())
        .map(|name| name.to_string())
}

/// Get the locale-native language name for a code, falling back to the
/// code itself when no native name is known
pub fn local_language_name(code: &str) -> String {
    local_language_name_opt(code).unwrap_or_else(|| code.to_string())
}
