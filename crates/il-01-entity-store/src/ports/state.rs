//! # State Access Ports
//!
//! Handlers never see the raw store. They read through a [`StateReader`]
//! (committed state, or committed + pending + own writes) and write through
//! a [`StateWriter`] that only stages changes.

use crate::domain::errors::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Point-in-time read access.
pub trait StateReader {
    /// Raw value at `key`.
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// All live entries under `prefix`, in key order.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError>;
}

/// Staged write access.
pub trait StateWriter: StateReader {
    /// Stage a put.
    fn put_raw(&mut self, key: Vec<u8>, value: Vec<u8>);

    /// Stage a delete.
    fn delete_raw(&mut self, key: Vec<u8>);
}

/// Typed decoding on top of any reader.
pub trait StateReaderExt: StateReader {
    /// Decode the entity at `key`.
    fn get_entity<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, StoreError> {
        match self.get_raw(key)? {
            Some(bytes) => decode(key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Decode every entity under `prefix`.
    fn scan_entities<T: DeserializeOwned>(&self, prefix: &[u8]) -> Result<Vec<T>, StoreError> {
        self.scan_prefix(prefix)?
            .into_iter()
            .map(|(key, bytes)| decode(&key, &bytes))
            .collect()
    }

    /// Whether `key` holds a value.
    fn contains(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.get_raw(key)?.is_some())
    }
}

impl<R: StateReader + ?Sized> StateReaderExt for R {}

/// Typed encoding on top of any writer.
pub trait StateWriterExt: StateWriter {
    /// Encode and stage `value` at `key`.
    fn put_entity<T: Serialize>(&mut self, key: Vec<u8>, value: &T) -> Result<(), StoreError> {
        let bytes =
            bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.put_raw(key, bytes);
        Ok(())
    }
}

impl<W: StateWriter + ?Sized> StateWriterExt for W {}

fn decode<T: DeserializeOwned>(key: &[u8], bytes: &[u8]) -> Result<T, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Corrupted {
        key: String::from_utf8_lossy(key).into_owned(),
        reason: e.to_string(),
    })
}
