use std::collections::HashSet;

use crate::catalog::Language;
use crate::store::keys;
use crate::store::{Store, StoreError};

impl Store {
    /// Terms marked known for `language`; unreadable entries are skipped.
    pub fn load_known_words(&self, language: Language) -> HashSet<String> {
        let prefix = keys::known_word_prefix(language);
        let mut terms = HashSet::new();
        for item in self.known_words.scan_prefix(prefix.as_bytes()) {
            let key = match item {
                Ok((key, _)) => key,
                Err(e) => {
                    tracing::warn!(error = %e, language = %language, "Known words scan failed");
                    break;
                }
            };
            match std::str::from_utf8(&key) {
                Ok(full) => {
                    if let Some(term) = full.strip_prefix(&prefix) {
                        terms.insert(term.to_string());
                    }
                }
                Err(_) => tracing::warn!("Skipping non UTF-8 known word key"),
            }
        }
        terms
    }

    pub fn set_word_known(&self, language: Language, term: &str, known: bool) -> Result<(), StoreError> {
        let key = keys::known_word_key(language, term)?;
        if known {
            self.known_words.insert(key.as_bytes(), &b""[..])?;
        } else {
            self.known_words.remove(key.as_bytes())?;
        }
        Ok(())
    }
}
