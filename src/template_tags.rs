/*!
 * Template-facing helpers.
 *
 * The tag operations of the rendering layer: resolving a translated object
 * into the context, binding the sibling collection, switching the active
 * language, and the language-name filters. Tag argument parsing mirrors the
 * `{% tag object language=xx as var %}` syntax.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::database::{Record, Repository, Translatable};
use crate::errors::TemplateError;
use crate::language_utils::{LanguageRegistry, local_language_name};

static LANGUAGE_ARG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"language=(\w+)").expect("Invalid language argument pattern"));

/// The request-derived inputs a template render sees
#[derive(Debug, Clone, Default)]
pub struct RequestInfo {
    /// Language negotiated for the request, if any
    pub language_code: Option<String>,
}

impl RequestInfo {
    pub fn with_language<L: Into<String>>(language: L) -> Self {
        Self {
            language_code: Some(language.into()),
        }
    }
}

/// Mutable rendering state shared by the tag helpers
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// The inbound request, when rendering happens inside one
    pub request: Option<RequestInfo>,
    /// The language activated by `set_language`
    pub active_language: Option<String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request(request: RequestInfo) -> Self {
        Self {
            request: Some(request),
            active_language: None,
        }
    }
}

/// Resolve the current language from a request, falling back to the
/// primary language
pub fn language_from_request(request: Option<&RequestInfo>, registry: &LanguageRegistry) -> String {
    request
        .and_then(|req| req.language_code.clone())
        .unwrap_or_else(|| registry.primary().to_string())
}

/// Resolve the translation of `obj` for an explicit language, or for the
/// request-derived language when none is given.
///
/// Fails when the object is not multilingual, or when neither an explicit
/// language nor a request is available.
pub async fn translated_object_for(
    repo: &Repository,
    ctx: &RenderContext,
    obj: &Record,
    language: Option<&str>,
) -> Result<Option<Record>, TemplateError> {
    if !obj.is_multilingual() {
        return Err(TemplateError::NotMultilingual);
    }

    if language.is_none() && ctx.request.is_none() {
        return Err(TemplateError::MissingLanguageContext);
    }

    let language = match language {
        Some(language) => language.to_string(),
        None => language_from_request(ctx.request.as_ref(), repo.registry()),
    };

    repo.translation_for(obj, &language)
        .await
        .map_err(|e| TemplateError::Lookup(e.to_string()))
}

/// Bind the sibling-translations collection of `obj`
pub async fn translations_for(
    repo: &Repository,
    obj: &Record,
) -> Result<Vec<Record>, TemplateError> {
    if !obj.is_multilingual() {
        return Err(TemplateError::NotMultilingual);
    }

    repo.available_translations(obj)
        .await
        .map_err(|e| TemplateError::Lookup(e.to_string()))
}

/// Set the active rendering language.
///
/// The request-derived language wins; otherwise the explicit fallback is
/// used when it is configured, else the primary language.
pub fn set_language(
    ctx: &mut RenderContext,
    registry: &LanguageRegistry,
    fallback: Option<&str>,
) -> String {
    let language = match ctx.request.as_ref().and_then(|req| req.language_code.clone()) {
        Some(language) => language,
        None => match fallback {
            Some(code) if registry.contains(code) => code.to_string(),
            _ => registry.primary().to_string(),
        },
    };

    ctx.active_language = Some(language.clone());
    language
}

/// True when more than one language is configured
pub fn multiling_is_enabled(registry: &LanguageRegistry) -> bool {
    registry.multilingual_enabled()
}

/// Configured display name for a language code
pub fn language_name_filter(registry: &LanguageRegistry, code: &str) -> Option<String> {
    registry.display_name(code)
}

/// Locale-native display name for a language code, falling back to the
/// code itself
pub fn language_local_name_filter(code: &str) -> String {
    local_language_name(code)
}

/// Parsed form of a `{% tag object [language=xx] as var %}` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTag {
    /// Context variable naming the object to translate
    pub object_var: String,
    /// Explicit language argument, if given
    pub language: Option<String>,
    /// Context variable the result is bound to
    pub as_var: String,
}

/// Parse `{% get_translated_object_for object [language=xx] as var %}`
pub fn parse_translated_object_tag(contents: &str) -> Result<ParsedTag, TemplateError> {
    parse_object_tag(contents, "get_translated_object_for", true)
}

/// Parse `{% get_translated_objects_for object as var %}`
pub fn parse_translated_objects_tag(contents: &str) -> Result<ParsedTag, TemplateError> {
    parse_object_tag(contents, "get_translated_objects_for", false)
}

fn parse_object_tag(
    contents: &str,
    tag: &str,
    allow_language: bool,
) -> Result<ParsedTag, TemplateError> {
    let bits: Vec<&str> = contents.split_whitespace().collect();

    if bits.first() != Some(&tag) {
        return Err(TemplateError::InvalidSyntax {
            tag: tag.to_string(),
            message: format!("expected tag name {}", tag),
        });
    }
    if bits.len() < 4 || bits[bits.len() - 2] != "as" {
        return Err(TemplateError::InvalidSyntax {
            tag: tag.to_string(),
            message: "you must specify a name for the translated object".to_string(),
        });
    }

    let object_var = bits[1].to_string();
    let as_var = bits[bits.len() - 1].to_string();

    let middle = bits[2..bits.len() - 2].join(" ");
    let language = LANGUAGE_ARG_RE
        .captures(&middle)
        .map(|captures| captures[1].to_string());

    if language.is_some() && !allow_language {
        return Err(TemplateError::InvalidSyntax {
            tag: tag.to_string(),
            message: "this tag takes no language argument".to_string(),
        });
    }

    Ok(ParsedTag {
        object_var,
        language,
        as_var,
    })
}

/// Parse `{% set_language [language] %}`
pub fn parse_set_language_tag(contents: &str) -> Result<Option<String>, TemplateError> {
    let bits: Vec<&str> = contents.split_whitespace().collect();

    if bits.first() != Some(&"set_language") || bits.len() > 2 {
        return Err(TemplateError::InvalidSyntax {
            tag: "set_language".to_string(),
            message: "this tag takes one argument at most".to_string(),
        });
    }

    Ok(bits.get(1).map(|language| language.to_string()))
}
