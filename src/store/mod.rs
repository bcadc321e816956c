pub mod keys;
pub mod migrate;
pub mod operations;
pub mod trees;
pub mod writer;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::Db;
use thiserror::Error;

pub use writer::{StoreWriter, WriteOp};

#[derive(Debug)]
pub struct Store {
    db: Db,
    /// 字符串键值对：统计快照、偏好、提醒设置等
    pub kv: sled::Tree,
    /// `{lang}:{term}` → 空值
    pub known_words: sled::Tree,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("corrupt value: key={key}")]
    Corrupt { key: String },
    #[error("validation error: {0}")]
    Validation(String),
    #[error("migration error at version {version}: {message}")]
    Migration { version: u32, message: String },
    #[error("store writer has shut down")]
    WriterClosed,
}

impl Store {
    pub fn open(sled_path: &str) -> Result<Self, StoreError> {
        let db = sled::open(sled_path)?;
        let kv = db.open_tree(trees::KV)?;
        let known_words = db.open_tree(trees::KNOWN_WORDS)?;

        Ok(Self {
            db,
            kv,
            known_words,
        })
    }

    pub fn run_migrations(&self) -> Result<(), StoreError> {
        migrate::run(self)
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    pub(crate) fn serialize<T: Serialize>(value: &T) -> Result<String, StoreError> {
        Ok(serde_json::to_string(value)?)
    }

    pub(crate) fn deserialize<T: DeserializeOwned>(raw: &str) -> Result<T, StoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Typed read that never fails: absence, sled errors and bad values all yield `None`,
    /// the latter two with a warning.
    pub(crate) fn read_or_warn<T, F>(&self, key: &str, parse: F) -> Option<T>
    where
        F: FnOnce(&str) -> Result<T, StoreError>,
    {
        let raw = match self.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Store read failed, using default");
                return None;
            }
        };
        match parse(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored value unreadable, using default");
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn temp_store() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("db");
    let store = Store::open(path.to_str().expect("utf8 path")).expect("open store");
    (dir, store)
}
