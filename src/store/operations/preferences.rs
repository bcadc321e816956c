use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Language};
use crate::constants::DEFAULT_OPTIONS_COUNT;
use crate::quiz::{is_valid_options_count, Direction};
use crate::store::keys;
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub language: Language,
    pub category: Option<Category>,
    pub direction: Direction,
    pub options_count: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: Language::En,
            category: None,
            direction: Direction::Forward,
            options_count: DEFAULT_OPTIONS_COUNT,
        }
    }
}

impl Store {
    pub fn load_preferences(&self) -> Preferences {
        let mut prefs = self
            .read_or_warn(keys::PREFERENCES, Self::deserialize::<Preferences>)
            .unwrap_or_default();
        if !is_valid_options_count(prefs.options_count) {
            tracing::warn!(
                options_count = prefs.options_count,
                "Stored options count not allowed, using default"
            );
            prefs.options_count = DEFAULT_OPTIONS_COUNT;
        }
        prefs
    }

    pub fn save_preferences(&self, prefs: &Preferences) -> Result<(), StoreError> {
        self.set(keys::PREFERENCES, &Self::serialize(prefs)?)
    }
}
