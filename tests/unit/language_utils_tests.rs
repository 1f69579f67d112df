/*!
 * Tests for the language registry and code helpers
 */

use lingua_link::app_config::{Config, LanguageEntry};
use lingua_link::language_utils::{
    LanguageRegistry, language_name, local_language_name, short_language_code,
    validate_language_code,
};

use crate::common::test_registry;

/// Test that the first configured language is the primary one
#[test]
fn test_primary_shouldBeFirstConfiguredLanguage() {
    let registry = test_registry();

    assert_eq!(registry.primary(), "en");
    assert!(registry.is_primary("en"));
    assert!(!registry.is_primary("hy"));
    assert!(!registry.is_primary("de"));
}

/// Test membership and code listing
#[test]
fn test_codes_shouldPreserveConfigurationOrder() {
    let registry = test_registry();

    assert_eq!(registry.codes(), vec!["en", "hy", "nl", "ru"]);
    assert!(registry.contains("nl"));
    assert!(!registry.contains("de"));
}

/// Test display names with and without local names
#[test]
fn test_displayName_shouldFollowLocalNamesSetting() {
    let registry = test_registry();
    assert_eq!(registry.display_name("nl").as_deref(), Some("Dutch"));

    let mut config = Config::with_languages(vec![
        LanguageEntry::new("en", "English"),
        LanguageEntry::new("nl", "Dutch"),
    ]);
    config.use_local_language_names = true;
    let localized = LanguageRegistry::from_config(&config).expect("Failed to build registry");

    // Dutch renders as its autonym when local names are on
    let name = localized.display_name("nl").expect("Missing display name");
    assert_ne!(name, "Dutch");
}

/// Test multilingual detection
#[test]
fn test_multilingualEnabled_requiresMoreThanOneLanguage() {
    assert!(test_registry().multilingual_enabled());

    let single = LanguageRegistry::new(vec![LanguageEntry::new("en", "English")]).unwrap();
    assert!(!single.multilingual_enabled());
}

/// Test short code extraction
#[test]
fn test_shortLanguageCode_shouldStripRegionalSuffix() {
    assert_eq!(short_language_code("de"), "de");
    assert_eq!(short_language_code("de-at"), "de");
    assert_eq!(short_language_code("en-gb"), "en");
}

/// Test ISO code validation
#[test]
fn test_validateLanguageCode_shouldAcceptIso639_1Codes() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("hy").is_ok());
    assert!(validate_language_code(" NL ").is_ok());
    assert!(validate_language_code("pt-br").is_ok());

    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("123").is_err());
    assert!(validate_language_code("").is_err());
}

/// Test language names from isolang
#[test]
fn test_languageName_shouldReturnEnglishName() {
    assert_eq!(language_name("en").unwrap(), "English");
    assert_eq!(language_name("nl").unwrap(), "Dutch");
    assert!(language_name("zz").is_err());
}

/// Test local name fallback behavior
#[test]
fn test_localLanguageName_withUnknownCode_shouldReturnCodeItself() {
    assert_eq!(local_language_name("zz"), "zz");
    assert_ne!(local_language_name("ru"), "ru");
}
