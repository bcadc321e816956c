//! 词库：每种目标语言一份只读词条列表，按词性分组。

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CATALOG_EN: &str = include_str!("../../data/catalog/en.json");
const CATALOG_ES: &str = include_str!("../../data/catalog/es.json");
const CATALOG_DE: &str = include_str!("../../data/catalog/de.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    De,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Es, Language::De];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            "de" => Ok(Self::De),
            other => Err(CatalogError::UnknownLanguage(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Verb,
    Noun,
    Adjective,
    Adverb,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verb => "verb",
            Self::Noun => "noun",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub term: String,
    pub translation: String,
    pub category: Category,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog parse error: {0}")]
    Parse(String),
    #[error("catalog for {0} is empty")]
    Empty(Language),
    #[error("duplicate term in {language} catalog: {term}")]
    DuplicateTerm { language: Language, term: String },
    #[error("duplicate translation in {language} catalog: {translation}")]
    DuplicateTranslation {
        language: Language,
        translation: String,
    },
    #[error("unknown language: {0}")]
    UnknownLanguage(String),
}

/// Immutable, validated word list for one language.
#[derive(Debug, Clone)]
pub struct Catalog {
    language: Language,
    entries: Vec<WordEntry>,
}

impl Catalog {
    /// Validates and wraps the entries. Terms and translations must both be unique, otherwise
    /// option generation could show two correct answers.
    pub fn new(language: Language, entries: Vec<WordEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty(language));
        }

        let mut terms = HashSet::with_capacity(entries.len());
        let mut translations = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !terms.insert(entry.term.as_str()) {
                return Err(CatalogError::DuplicateTerm {
                    language,
                    term: entry.term.clone(),
                });
            }
            if !translations.insert(entry.translation.as_str()) {
                return Err(CatalogError::DuplicateTranslation {
                    language,
                    translation: entry.translation.clone(),
                });
            }
        }

        Ok(Self { language, entries })
    }

    pub fn from_json(language: Language, raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<WordEntry> =
            serde_json::from_str(raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(language, entries)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }

    pub fn position_of(&self, term: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.term == term)
    }

    /// Indices of entries in the given category; `None` means every entry.
    pub fn indices_in(&self, category: Option<Category>) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| category.map_or(true, |c| e.category == c))
            .map(|(i, _)| i)
            .collect()
    }
}

/// All built-in catalogs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct CatalogSet {
    en: Arc<Catalog>,
    es: Arc<Catalog>,
    de: Arc<Catalog>,
}

impl CatalogSet {
    pub fn builtin() -> Result<Self, CatalogError> {
        let set = Self {
            en: Arc::new(Catalog::from_json(Language::En, CATALOG_EN)?),
            es: Arc::new(Catalog::from_json(Language::Es, CATALOG_ES)?),
            de: Arc::new(Catalog::from_json(Language::De, CATALOG_DE)?),
        };
        for lang in Language::ALL {
            tracing::info!(language = %lang, words = set.get(lang).len(), "Catalog loaded");
        }
        Ok(set)
    }

    pub fn get(&self, language: Language) -> &Arc<Catalog> {
        match language {
            Language::En => &self.en,
            Language::Es => &self.es,
            Language::De => &self.de,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_catalog(size: usize) -> Catalog {
    let categories = [
        Category::Verb,
        Category::Noun,
        Category::Adjective,
        Category::Adverb,
    ];
    let entries = (0..size)
        .map(|i| WordEntry {
            term: format!("term-{i}"),
            translation: format!("translation-{i}"),
            category: categories[i % categories.len()],
        })
        .collect();
    Catalog::new(Language::En, entries).expect("valid test catalog")
}
