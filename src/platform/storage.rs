//! LocalStorage backend

use wasm_bindgen::JsValue;

use crate::highscores::{KeyValueStore, StorageError};

/// `window.localStorage`, looked up on every access so a revoked or missing
/// storage degrades to errors instead of panics
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(rejected)?
            .ok_or(StorageError::Unavailable)
    }
}

fn rejected(err: JsValue) -> StorageError {
    StorageError::Rejected(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(rejected)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(rejected)
    }
}
