//! 原始字符串键值能力：get / set / remove / multi_get / multi_remove。

use crate::store::{Store, StoreError};

impl Store {
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.kv.get(key.as_bytes())? {
            Some(raw) => String::from_utf8(raw.to_vec())
                .map(Some)
                .map_err(|_| StoreError::Corrupt {
                    key: key.to_string(),
                }),
            None => Ok(None),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.kv.insert(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.kv.remove(key.as_bytes())?;
        Ok(())
    }

    /// Values in the same order as `keys`; non-UTF-8 values read as absent.
    pub fn multi_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StoreError> {
        keys.iter()
            .map(|key| match self.get(key) {
                Err(StoreError::Corrupt { key }) => {
                    tracing::warn!(key = %key, "Non UTF-8 value ignored");
                    Ok(None)
                }
                other => other,
            })
            .collect()
    }

    /// Applies all pairs atomically.
    pub fn multi_set(&self, pairs: &[(&str, String)]) -> Result<(), StoreError> {
        let mut batch = sled::Batch::default();
        for (key, value) in pairs {
            batch.insert(key.as_bytes(), value.as_bytes());
        }
        self.kv.apply_batch(batch)?;
        Ok(())
    }

    pub fn multi_remove(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut batch = sled::Batch::default();
        for key in keys {
            batch.remove(key.as_bytes());
        }
        self.kv.apply_batch(batch)?;
        Ok(())
    }
}
