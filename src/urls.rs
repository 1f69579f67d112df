/*!
 * Language-prefixed URL helpers.
 *
 * Two schemes for localizing a resolved path: plain prefixing, and the
 * locale-rewriting variant that first strips an existing configured
 * locale prefix. `localized_url` picks between them per the
 * `USE_LOCALEURL` setting.
 */

use crate::language_utils::LanguageRegistry;

/// Prepend the language to a resolved path: `/foo/bar/` becomes
/// `/{language}/foo/bar/`
pub fn prepend_language(language: &str, path: &str) -> String {
    format!("/{}{}", language, path)
}

/// Rewrite the locale of a path: strip an existing configured locale
/// prefix, then prepend the given language
pub fn change_locale(registry: &LanguageRegistry, language: &str, path: &str) -> String {
    let stripped = strip_locale_prefix(registry, path);
    prepend_language(language, stripped)
}

/// Remove a leading `/{code}/` segment when the code is configured
fn strip_locale_prefix<'a>(registry: &LanguageRegistry, path: &'a str) -> &'a str {
    let Some(rest) = path.strip_prefix('/') else {
        return path;
    };

    let (head, _) = rest.split_once('/').unwrap_or((rest, ""));
    if registry.contains(head) {
        &path[1 + head.len()..]
    } else {
        path
    }
}

/// Localize a path for the given language, honoring the resolved
/// `USE_LOCALEURL` setting
pub fn localized_url(
    registry: &LanguageRegistry,
    use_localeurl: bool,
    language: &str,
    path: &str,
) -> String {
    if use_localeurl {
        change_locale(registry, language, path)
    } else {
        prepend_language(language, path)
    }
}
