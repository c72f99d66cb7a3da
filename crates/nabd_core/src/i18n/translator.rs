//! Translation collaborators.

use crate::i18n::locale::Language;
use std::collections::{BTreeMap, HashMap};

/// Total translation function: unknown keys come back verbatim.
pub trait Translator {
    fn language(&self) -> Language;
    fn translate(&self, key: &str) -> String;
}

/// Translator that echoes every key; used when a host supplies no tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawKeyTranslator;

impl Translator for RawKeyTranslator {
    fn language(&self) -> Language {
        Language::English
    }

    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// In-memory translation tables keyed by language.
///
/// Lookup order: active language, then English, then the raw key.
#[derive(Debug, Clone)]
pub struct StaticTranslator {
    language: Language,
    tables: BTreeMap<Language, HashMap<String, String>>,
}

impl StaticTranslator {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            tables: BTreeMap::new(),
        }
    }

    /// Adds or replaces one table entry.
    pub fn insert(
        &mut self,
        language: Language,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.tables
            .entry(language)
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    /// Adds many entries for one language.
    pub fn extend<K, V>(&mut self, language: Language, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let table = self.tables.entry(language).or_default();
        for (key, value) in entries {
            table.insert(key.into(), value.into());
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        self.tables
            .get(&language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}

impl Translator for StaticTranslator {
    fn language(&self) -> Language {
        self.language
    }

    fn translate(&self, key: &str) -> String {
        self.lookup(self.language, key)
            .or_else(|| self.lookup(Language::English, key))
            .unwrap_or(key)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{RawKeyTranslator, StaticTranslator, Translator};
    use crate::i18n::Language;

    #[test]
    fn falls_back_to_english_then_raw_key() {
        let mut translator = StaticTranslator::new(Language::Arabic);
        translator
            .insert(Language::English, "views.table", "Table")
            .insert(Language::English, "views.kanban", "Kanban")
            .insert(Language::Arabic, "views.table", "جدول");

        assert_eq!(translator.translate("views.table"), "جدول");
        assert_eq!(translator.translate("views.kanban"), "Kanban");
        assert_eq!(translator.translate("views.unknown"), "views.unknown");
    }

    #[test]
    fn raw_key_translator_echoes_input() {
        assert_eq!(RawKeyTranslator.translate("sales.title"), "sales.title");
    }
}
