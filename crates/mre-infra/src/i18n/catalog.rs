//! Fluent translation catalogs.
//!
//! English and French `.ftl` catalogs are built in. The configured locale is
//! matched by its language subtag; an optional `.ftl` file from the
//! configuration overrides individual messages. Messages missing from the
//! selected catalog are looked up in English, then returned as their id.

use std::path::Path;

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

use mre_core::ports::TranslatorPort;

type Bundle = FluentBundle<FluentResource>;

const FALLBACK_LOCALE: &str = "en";

const BUILTIN_CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("catalogs/en.ftl")),
    ("fr", include_str!("catalogs/fr.ftl")),
];

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {name}: {reason}")]
    Parse { name: String, reason: String },
}

pub struct CatalogTranslator {
    locale: &'static str,
    bundle: Bundle,
    fallback: Option<Bundle>,
}

impl CatalogTranslator {
    /// Built-in catalog for `locale` (`fr-FR` and `fr_FR` use `fr`, unknown
    /// locales English), with messages from `overrides` layered on top.
    pub fn load(locale: &str, overrides: Option<&Path>) -> Result<Self, CatalogError> {
        let (locale, source) = builtin_catalog(locale);
        let mut bundle = new_bundle(locale, source)?;

        if let Some(path) = overrides {
            let name = path.display().to_string();
            let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
                path: name.clone(),
                source,
            })?;
            bundle.add_resource_overriding(parse_resource(&name, content)?);
            debug!(path = %name, "catalog overrides loaded");
        }

        let fallback = if locale == FALLBACK_LOCALE {
            None
        } else {
            Some(new_bundle(FALLBACK_LOCALE, fallback_source())?)
        };

        Ok(Self {
            locale,
            bundle,
            fallback,
        })
    }

    /// Language of the selected built-in catalog.
    pub fn locale(&self) -> &str {
        self.locale
    }
}

impl TranslatorPort for CatalogTranslator {
    fn translate(&self, key: &str) -> String {
        if let Some(text) = format_message(&self.bundle, key) {
            return text;
        }
        if let Some(text) = self.fallback.as_ref().and_then(|b| format_message(b, key)) {
            debug!(key, locale = self.locale, "translation taken from {FALLBACK_LOCALE}");
            return text;
        }
        debug!(key, locale = self.locale, "missing translation");
        key.to_string()
    }
}

fn format_message(bundle: &Bundle, key: &str) -> Option<String> {
    let pattern = bundle.get_message(key)?.value()?;
    let mut errors = vec![];
    let text = bundle.format_pattern(pattern, None, &mut errors);
    if !errors.is_empty() {
        warn!(key, ?errors, "message could not be formatted");
        return None;
    }
    Some(text.into_owned())
}

fn builtin_catalog(locale: &str) -> (&'static str, &'static str) {
    let requested = match locale.trim().parse::<LanguageIdentifier>() {
        Ok(requested) => requested,
        Err(err) => {
            warn!(locale, error = %err, "invalid locale, falling back to {FALLBACK_LOCALE}");
            return (FALLBACK_LOCALE, fallback_source());
        }
    };

    match BUILTIN_CATALOGS
        .iter()
        .find(|(name, _)| requested.language.as_str() == *name)
    {
        Some(&catalog) => catalog,
        None => {
            warn!(locale, "no catalog for locale, falling back to {FALLBACK_LOCALE}");
            (FALLBACK_LOCALE, fallback_source())
        }
    }
}

fn fallback_source() -> &'static str {
    BUILTIN_CATALOGS
        .iter()
        .find(|(name, _)| *name == FALLBACK_LOCALE)
        .map(|(_, source)| *source)
        .unwrap_or_default()
}

fn new_bundle(name: &str, source: &str) -> Result<Bundle, CatalogError> {
    let langid = name
        .parse::<LanguageIdentifier>()
        .map_err(|err| CatalogError::Parse {
            name: name.to_string(),
            reason: err.to_string(),
        })?;

    let mut bundle = FluentBundle::new_concurrent(vec![langid]);
    // Isolation marks would otherwise end up in saved filenames.
    bundle.set_use_isolating(false);
    bundle
        .add_resource(parse_resource(name, source.to_string())?)
        .map_err(|errors| CatalogError::Parse {
            name: name.to_string(),
            reason: format!("{errors:?}"),
        })?;
    Ok(bundle)
}

fn parse_resource(name: &str, source: String) -> Result<FluentResource, CatalogError> {
    FluentResource::try_new(source).map_err(|(_, errors)| CatalogError::Parse {
        name: name.to_string(),
        reason: format!("{errors:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn override_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn builtin_catalogs_parse() {
        for (name, source) in BUILTIN_CATALOGS {
            let bundle = new_bundle(name, source).unwrap();
            for key in ["document-not-found", "cannot-save-document", "invoice"] {
                assert!(bundle.has_message(key), "{name} lacks {key}");
            }
        }
    }

    #[test]
    fn english_texts() {
        let translator = CatalogTranslator::load("en", None).unwrap();
        assert_eq!(translator.translate("document-not-found"), "Document not found");
        assert_eq!(translator.translate("cannot-save-document"), "Cannot save document");
        assert_eq!(translator.translate("invoice"), "invoice");
    }

    #[test]
    fn french_region_uses_french_catalog() {
        for tag in ["fr_FR", "fr-CA", "FR"] {
            let translator = CatalogTranslator::load(tag, None).unwrap();
            assert_eq!(translator.locale(), "fr", "{tag}");
            assert_eq!(translator.translate("invoice"), "facture");
            assert_eq!(
                translator.translate("document-not-found"),
                "Document introuvable"
            );
        }
    }

    #[test]
    fn unknown_or_invalid_locale_falls_back_to_english() {
        for tag in ["pt-BR", "not a locale!", ""] {
            let translator = CatalogTranslator::load(tag, None).unwrap();
            assert_eq!(translator.locale(), "en", "{tag:?}");
            assert_eq!(translator.translate("invoice"), "invoice");
        }
    }

    #[test]
    fn missing_key_returns_key() {
        let translator = CatalogTranslator::load("fr", None).unwrap();
        assert_eq!(translator.translate("rent-schedule"), "rent-schedule");
    }

    #[test]
    fn overrides_replace_builtin_entries() {
        let file = override_file("invoice = Rechnung\n");

        let translator = CatalogTranslator::load("en", Some(file.path())).unwrap();

        assert_eq!(translator.translate("invoice"), "Rechnung");
        assert_eq!(translator.translate("document-not-found"), "Document not found");
    }

    #[test]
    fn message_only_in_english_is_used_for_other_locales() {
        let translator = CatalogTranslator {
            locale: "fr",
            bundle: new_bundle("fr", "invoice = facture\n").unwrap(),
            fallback: Some(new_bundle(FALLBACK_LOCALE, fallback_source()).unwrap()),
        };

        assert_eq!(translator.translate("invoice"), "facture");
        assert_eq!(translator.translate("cannot-save-document"), "Cannot save document");
    }

    #[test]
    fn malformed_override_is_a_parse_error() {
        let file = override_file("invoice = facture\n{ broken\n");

        let err = CatalogTranslator::load("fr", Some(file.path())).err();

        assert!(matches!(err, Some(CatalogError::Parse { .. })));
    }

    #[test]
    fn unreadable_override_is_an_error() {
        let err = CatalogTranslator::load("en", Some(Path::new("/nonexistent/catalog.ftl"))).err();
        assert!(matches!(err, Some(CatalogError::Read { .. })));
    }
}
