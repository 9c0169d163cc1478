use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};

use super::preference_store_trait::PreferenceStore;

/// Process-local preference store.
#[derive(Debug, Default)]
pub struct PreferenceMemoryAdapter {
    state: Mutex<HashMap<String, String>>,
}

impl PreferenceMemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for PreferenceMemoryAdapter {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let state = self
            .state
            .lock()
            .map_err(|_| anyhow!("Preference store lock poisoned"))?;
        Ok(state.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.state
            .lock()
            .map_err(|_| anyhow!("Preference store lock poisoned"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.state
            .lock()
            .map_err(|_| anyhow!("Preference store lock poisoned"))?
            .remove(key);
        Ok(())
    }
}
