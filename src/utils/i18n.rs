use crate::error::{locale_error, AppResult};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Bundled locale files
const EMBEDDED_LOCALES: [(&str, &str); 2] = [
    ("en", include_str!("../../locales/en.toml")),
    ("fi", include_str!("../../locales/fi.toml")),
];

/// Messages of a single locale
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locale: String,
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Create a catalog from already loaded entries
    pub fn new(locale: impl Into<String>, entries: HashMap<String, String>) -> Self {
        Self {
            locale: normalize_locale(&locale.into()),
            entries,
        }
    }

    /// Parse a flat `key = "text"` TOML table
    pub fn from_toml(locale: &str, source: &str) -> AppResult<Self> {
        let entries = toml::from_str::<HashMap<String, String>>(source).map_err(|e| {
            locale_error(&format!("Failed to parse locale '{}': {}", locale, e))
        })?;
        Ok(Self::new(locale, entries))
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First hit for `key` in `sources`, or a text derived from the key itself
pub fn lookup(sources: &[&Catalog], key: &str) -> String {
    sources
        .iter()
        .find_map(|catalog| catalog.get(key))
        .map(str::to_string)
        .unwrap_or_else(|| humanize_key(key))
}

/// Turn `late_reschedule` into `Late reschedule`
pub fn humanize_key(key: &str) -> String {
    let words = key.replace(['_', '.', '-'], " ");
    let mut chars = words.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replace `%{name}` placeholders with their values
pub fn interpolate(text: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(text.to_string(), |acc, (name, value)| {
        acc.replace(&format!("%{{{}}}", name), value)
    })
}

/// Lowercase and use `-` as the region separator: `fi_FI` becomes `fi-fi`
fn normalize_locale(locale: &str) -> String {
    locale.trim().replace('_', "-").to_lowercase()
}

/// Language part of a locale tag: `fi-fi` gives `fi`
fn language_of(locale: &str) -> &str {
    locale.split('-').next().unwrap_or(locale)
}

/// Translation catalogs with a default locale to fall back on
#[derive(Debug, Clone)]
pub struct Translator {
    catalogs: Vec<Catalog>,
    default_locale: String,
}

impl Translator {
    /// Create a translator over the given catalogs
    pub fn new(catalogs: Vec<Catalog>, default_locale: &str) -> Self {
        Self {
            catalogs,
            default_locale: normalize_locale(default_locale),
        }
    }

    /// Translator over the locale files bundled with the binary
    pub fn embedded(default_locale: &str) -> AppResult<Self> {
        let catalogs = EMBEDDED_LOCALES
            .iter()
            .map(|(locale, source)| Catalog::from_toml(locale, source))
            .collect::<AppResult<Vec<_>>>()?;

        let translator = Self::new(catalogs, default_locale);
        if translator.find(&translator.default_locale).is_none() {
            return Err(locale_error(&format!(
                "Default locale '{}' is not available",
                default_locale
            )));
        }

        for catalog in &translator.catalogs {
            if catalog.is_empty() {
                warn!("Locale {} has no entries", catalog.locale());
            }
        }
        debug!(
            "Loaded locales [{}], default {}",
            translator.locales().collect::<Vec<_>>().join(", "),
            translator.default_locale
        );
        Ok(translator)
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Locales with a catalog
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.catalogs.iter().map(Catalog::locale)
    }

    fn find(&self, locale: &str) -> Option<&Catalog> {
        self.catalogs.iter().find(|c| c.locale == locale)
    }

    /// Ordered sources for a locale: the exact locale, its language, then
    /// the default locale
    pub fn chain(&self, locale: &str) -> Vec<&Catalog> {
        let locale = normalize_locale(locale);
        let candidates = [
            locale.as_str(),
            language_of(&locale),
            self.default_locale.as_str(),
        ];

        let mut chain: Vec<&Catalog> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if let Some(catalog) = self.find(candidate) {
                if !chain.iter().any(|c| c.locale == catalog.locale) {
                    chain.push(catalog);
                }
            }
        }
        chain
    }

    /// Whether the locale resolves to something other than the default
    pub fn has_locale(&self, locale: &str) -> bool {
        self.chain(locale)
            .iter()
            .any(|c| c.locale != self.default_locale)
            || language_of(&normalize_locale(locale)) == language_of(&self.default_locale)
    }

    /// Translate a key for the given locale
    pub fn translate(&self, locale: &str, key: &str) -> String {
        lookup(&self.chain(locale), key)
    }

    /// Translate a key and fill in its placeholders
    pub fn translate_with(&self, locale: &str, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(&self.translate(locale, key), args)
    }
}
