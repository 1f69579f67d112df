/*!
 * Tests for language-prefixed URL helpers
 */

use lingua_link::app_config::{Config, LanguageEntry, Setting, Settings};
use lingua_link::urls::{change_locale, localized_url, prepend_language};

use crate::common::test_registry;

/// Plain prefixing always prepends
#[test]
fn test_prependLanguage_shouldPrefix() {
    assert_eq!(prepend_language("hy", "/foo/foo-title-hy/"), "/hy/foo/foo-title-hy/");
    assert_eq!(prepend_language("en", "/"), "/en/");
}

/// Locale rewriting strips a configured prefix before prepending
#[test]
fn test_changeLocale_shouldRewriteConfiguredPrefix() {
    let registry = test_registry();

    assert_eq!(change_locale(&registry, "ru", "/en/foo/bar/"), "/ru/foo/bar/");
    assert_eq!(change_locale(&registry, "ru", "/foo/bar/"), "/ru/foo/bar/");
    // Unconfigured leading segment is content
    assert_eq!(change_locale(&registry, "ru", "/de/foo/"), "/ru/de/foo/");
}

/// The setting picks the scheme
#[test]
fn test_localizedUrl_shouldFollowUseLocaleurl() {
    let registry = test_registry();

    assert_eq!(localized_url(&registry, true, "nl", "/hy/foo/"), "/nl/foo/");
    assert_eq!(localized_url(&registry, false, "nl", "/foo/"), "/nl/foo/");
}

/// A loaded configuration drives the scheme through settings resolution
#[test]
fn test_localizedUrl_shouldFollowResolvedConfigSetting() {
    let registry = test_registry();

    let mut config = Config::with_languages(vec![
        LanguageEntry::new("en", "English"),
        LanguageEntry::new("nl", "Dutch"),
    ]);

    let settings = Settings::from_config(&config);
    let use_localeurl = settings.resolve_bool(Setting::UseLocaleurl, None);
    assert_eq!(
        localized_url(&registry, use_localeurl, "nl", "/en/foo/"),
        "/nl/foo/"
    );

    config.use_localeurl = false;
    let settings = Settings::from_config(&config);
    let use_localeurl = settings.resolve_bool(Setting::UseLocaleurl, None);
    assert_eq!(
        localized_url(&registry, use_localeurl, "nl", "/en/foo/"),
        "/nl/en/foo/"
    );
}
