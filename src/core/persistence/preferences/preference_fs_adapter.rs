use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{anyhow, Context, Result};

use super::preference_store_trait::PreferenceStore;

/// FS adapter for client preferences.
///
/// Uses a simple `KEY:"json string"` file with atomic writes. Values are JSON
/// string literals so that multi-line drafts stay on one line.
pub struct PreferenceFsAdapter {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl PreferenceFsAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let mut entries = BTreeMap::new();
        if !self.path.exists() {
            return Ok(entries);
        }

        let file = File::open(&self.path).context("Failed to open preferences file")?;
        let reader = BufReader::new(file);

        for line in reader.lines() {
            let line = line?;
            if let Some((key, val)) = line.split_once(':') {
                let key = key.trim();
                if key.is_empty() {
                    continue;
                }
                // Unreadable values are skipped rather than failing the whole file.
                if let Ok(value) = serde_json::from_str::<String>(val.trim()) {
                    entries.insert(key.to_string(), value);
                }
            }
        }

        Ok(entries)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).context("Failed to create preferences directory")?;
        }

        let tmp_path = self.path.with_extension("tmp");
        let mut f = File::create(&tmp_path).context("Failed to create temp preferences file")?;

        for (key, value) in entries {
            writeln!(f, "{}:{}", key, serde_json::to_string(value)?)?;
        }

        f.flush()?;
        f.sync_all().context("Failed to sync temp preferences file")?;
        fs::rename(&tmp_path, &self.path).context("Failed to finalize preferences file")?;

        Ok(())
    }

    fn modify<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("Preferences file lock poisoned"))?;
        let mut entries = self.read_all()?;
        f(&mut entries);
        self.write_all(&entries)
    }
}

impl PreferenceStore for PreferenceFsAdapter {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}
