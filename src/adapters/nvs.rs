//! Non-volatile settings adapter.
//!
//! Implements [`SettingsPort`] over a namespaced key/value store.  The
//! settings blob is the `postcard` encoding of [`PersistedSettings`], whose
//! geometry record keeps its fixed seven-field order.
//!
//! This is the simulation backend (host builds and tests): a `HashMap`
//! behind a `RefCell`.  Writes replace the whole blob, so a save is atomic
//! from the reader's point of view.

use std::cell::RefCell;
use std::collections::HashMap;

use log::{info, warn};

use crate::app::ports::{SettingsError, SettingsPort};
use crate::config::PersistedSettings;

const SETTINGS_NAMESPACE: &str = "cncconf";
const SETTINGS_KEY: &str = "settings";

/// Default partition budget for the simulation backend.
const DEFAULT_CAPACITY: usize = 4000;

pub struct NvsSettingsStore {
    store: RefCell<HashMap<String, Vec<u8>>>,
    capacity: usize,
}

impl NvsSettingsStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Store that rejects blobs larger than `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        info!("NvsSettingsStore: simulation backend ({} bytes)", capacity);
        Self {
            store: RefCell::new(HashMap::new()),
            capacity,
        }
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }

    /// Drop the stored settings (factory reset).
    pub fn erase(&self) {
        let key = Self::composite_key(SETTINGS_NAMESPACE, SETTINGS_KEY);
        self.store.borrow_mut().remove(&key);
    }

    pub fn has_settings(&self) -> bool {
        let key = Self::composite_key(SETTINGS_NAMESPACE, SETTINGS_KEY);
        self.store.borrow().contains_key(&key)
    }

    /// Overwrite the raw blob, bypassing encoding.
    pub fn write_raw(&self, data: &[u8]) {
        let key = Self::composite_key(SETTINGS_NAMESPACE, SETTINGS_KEY);
        self.store.borrow_mut().insert(key, data.to_vec());
    }
}

impl Default for NvsSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsPort for NvsSettingsStore {
    fn load(&self) -> Result<PersistedSettings, SettingsError> {
        let key = Self::composite_key(SETTINGS_NAMESPACE, SETTINGS_KEY);
        if let Some(bytes) = self.store.borrow().get(&key) {
            let settings: PersistedSettings =
                postcard::from_bytes(bytes).map_err(|_| SettingsError::Corrupted)?;
            info!("NvsSettingsStore: loaded settings ({} bytes)", bytes.len());
            Ok(settings)
        } else {
            info!("NvsSettingsStore: no stored settings, using defaults");
            Ok(PersistedSettings::default())
        }
    }

    fn save(&self, settings: &PersistedSettings) -> Result<(), SettingsError> {
        let bytes = postcard::to_allocvec(settings).map_err(|_| SettingsError::IoError)?;
        if bytes.len() > self.capacity {
            warn!(
                "NvsSettingsStore: {} bytes exceed {} byte partition",
                bytes.len(),
                self.capacity
            );
            return Err(SettingsError::StorageFull);
        }
        self.write_raw(&bytes);
        info!("NvsSettingsStore: settings saved ({} bytes)", bytes.len());
        Ok(())
    }
}
