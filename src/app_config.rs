/*!
 * Application configuration module.
 *
 * Handles the library configuration including loading, validating and
 * saving configuration settings, and the three-tier setting resolution
 * (call-site override, host override, built-in default).
 */

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One configured language: a code and the display name shown for it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LanguageEntry {
    /// Language code, e.g. "en" or "pt-br"
    pub code: String,

    /// Display name, e.g. "English"
    pub name: String,
}

impl LanguageEntry {
    pub fn new<C: Into<String>, N: Into<String>>(code: C, name: N) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Represents the library configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Configured languages. The first entry is the primary language.
    #[serde(default = "default_languages")]
    pub languages: Vec<LanguageEntry>,

    /// Whether generated URLs go through the locale-rewriting scheme
    /// instead of plain language prefixing
    #[serde(default = "default_use_localeurl")]
    pub use_localeurl: bool,

    /// Whether language names are rendered in their own language
    #[serde(default)]
    pub use_local_language_names: bool,

    /// Accepted for compatibility with the setting surface of older
    /// deployments. Capability always comes from implementing the
    /// `Translatable` trait, so this flag changes nothing here.
    #[serde(default)]
    pub enable_monkey_patching: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_languages() -> Vec<LanguageEntry> {
    vec![LanguageEntry::new("en", "English")]
}

fn default_use_localeurl() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            use_localeurl: default_use_localeurl(),
            use_local_language_names: false,
            enable_monkey_patching: false,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Create a configuration with the given language list
    pub fn with_languages(languages: Vec<LanguageEntry>) -> Self {
        Self {
            languages,
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(anyhow!("Configuration must list at least one language"));
        }

        let mut seen = std::collections::HashSet::new();
        for entry in &self.languages {
            if entry.code.trim().is_empty() {
                return Err(anyhow!("Language codes must not be empty"));
            }
            if !seen.insert(entry.code.as_str()) {
                return Err(anyhow!("Duplicate language code: {}", entry.code));
            }
        }

        Ok(())
    }

    /// The primary language code (first configured entry)
    pub fn default_language(&self) -> &str {
        &self.languages[0].code
    }
}

/// Recognized settings, each with a built-in default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// Whether URL generation goes through the locale-rewriting scheme
    UseLocaleurl,
    /// Whether language names are rendered in their own language
    UseLocalLanguageNames,
    /// Legacy capability-retrofitting flag, accepted but inert
    EnableMonkeyPatching,
    /// The configured language list
    Languages,
}

/// A resolved setting value
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Languages(Vec<LanguageEntry>),
}

impl SettingValue {
    /// The boolean payload, if this is a boolean setting
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(value) => Some(*value),
            SettingValue::Languages(_) => None,
        }
    }

    /// The language list payload, if this is the language setting
    pub fn as_languages(&self) -> Option<&[LanguageEntry]> {
        match self {
            SettingValue::Languages(entries) => Some(entries),
            SettingValue::Bool(_) => None,
        }
    }
}

/// Three-tier setting resolution: an explicit call-site override wins,
/// then a host-supplied override, then the built-in default.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    overrides: HashMap<Setting, SettingValue>,
}

impl Settings {
    /// Settings with no host overrides, resolving everything to defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the host override map from a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        let mut overrides = HashMap::new();
        overrides.insert(Setting::UseLocaleurl, SettingValue::Bool(config.use_localeurl));
        overrides.insert(
            Setting::UseLocalLanguageNames,
            SettingValue::Bool(config.use_local_language_names),
        );
        overrides.insert(
            Setting::EnableMonkeyPatching,
            SettingValue::Bool(config.enable_monkey_patching),
        );
        overrides.insert(
            Setting::Languages,
            SettingValue::Languages(config.languages.clone()),
        );
        Self { overrides }
    }

    /// Register a host override for a single setting
    pub fn with_override(mut self, setting: Setting, value: SettingValue) -> Self {
        self.overrides.insert(setting, value);
        self
    }

    /// The built-in default for a setting
    pub fn default_for(setting: Setting) -> SettingValue {
        match setting {
            Setting::UseLocaleurl => SettingValue::Bool(true),
            Setting::UseLocalLanguageNames => SettingValue::Bool(false),
            Setting::EnableMonkeyPatching => SettingValue::Bool(false),
            Setting::Languages => SettingValue::Languages(default_languages()),
        }
    }

    /// Resolve a setting. If `call_site` is given it is used as-is, else the
    /// host override applies, else the built-in default.
    pub fn resolve(&self, setting: Setting, call_site: Option<SettingValue>) -> SettingValue {
        if let Some(value) = call_site {
            return value;
        }
        if let Some(value) = self.overrides.get(&setting) {
            return value.clone();
        }
        Self::default_for(setting)
    }

    /// Resolve a boolean setting
    pub fn resolve_bool(&self, setting: Setting, call_site: Option<bool>) -> bool {
        self.resolve(setting, call_site.map(SettingValue::Bool))
            .as_bool()
            .unwrap_or_else(|| {
                Self::default_for(setting).as_bool().unwrap_or(false)
            })
    }

    /// Resolve the configured language list
    pub fn resolve_languages(&self) -> Vec<LanguageEntry> {
        match self.resolve(Setting::Languages, None) {
            SettingValue::Languages(entries) => entries,
            SettingValue::Bool(_) => default_languages(),
        }
    }
}
