use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::{Context, Result};
use crate::utils::{
    fallback_config_name, is_plain_stem, list_records_with_extension, sanitize_config_name,
    RecordEntry,
};

pub mod record_file;
pub mod watch;

pub use record_file::FORMAT_VERSION;
pub use watch::StoreWatcher;

/// Extension shared by every record file in the store.
pub const RECORD_EXTENSION: &str = "json";

/// Selector entry meaning "do not load anything".
pub const NONE_CHOICE: &str = "None";

/// Result of a save request. Collisions are reported, never overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { name: String, path: PathBuf },
    AlreadyExists { name: String, path: PathBuf },
}

impl SaveOutcome {
    pub fn name(&self) -> &str {
        match self {
            SaveOutcome::Saved { name, .. } | SaveOutcome::AlreadyExists { name, .. } => name,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            SaveOutcome::Saved { path, .. } | SaveOutcome::AlreadyExists { path, .. } => path,
        }
    }
}

/// Named configuration store: one `<name>.json` file per saved record.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.store_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ensure the store directory exists. Called before every read and write.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create store directory {}", self.dir.display())
        })?;
        Ok(())
    }

    /// Map a raw user label to the record name a save would use.
    ///
    /// The selector sentinel is treated like a blank name so it never shadows a record.
    pub fn resolve_name(raw: &str) -> String {
        sanitize_config_name(raw)
            .filter(|name| name != NONE_CHOICE)
            .unwrap_or_else(fallback_config_name)
    }

    /// Saved records with their file metadata, sorted by name.
    pub fn entries(&self) -> Result<Vec<RecordEntry>> {
        self.prepare()?;
        let entries = list_records_with_extension(&self.dir, RECORD_EXTENSION)
            .with_context(|| format!("Failed to list store directory {}", self.dir.display()))?;
        Ok(entries)
    }

    /// Names of every saved record.
    pub fn list(&self) -> Result<Vec<String>> {
        Ok(self.entries()?.into_iter().map(|entry| entry.name).collect())
    }

    /// Selector contents: the `None` sentinel followed by every saved record.
    pub fn choices(&self) -> Vec<String> {
        let mut choices = vec![NONE_CHOICE.to_string()];
        match self.list() {
            Ok(names) => choices.extend(names.into_iter().filter(|name| name != NONE_CHOICE)),
            Err(err) => error!("Failed to list saved configurations: {err}"),
        }
        choices
    }

    pub fn contains(&self, name: &str) -> bool {
        is_plain_stem(name) && self.record_path(name).is_file()
    }

    /// Persist `units` under the sanitized form of `name`. An existing record is left untouched.
    pub fn save<T: Serialize>(&self, name: &str, units: &[T]) -> Result<SaveOutcome> {
        self.prepare()?;

        let name = Self::resolve_name(name);
        let path = self.record_path(&name);

        if !record_file::write_new(&path, units)? {
            info!("Already exists (skipping save): '{}'", path.display());
            return Ok(SaveOutcome::AlreadyExists { name, path });
        }

        info!(
            "Configuration '{}' saved with {} unit(s)",
            name,
            units.len()
        );
        Ok(SaveOutcome::Saved { name, path })
    }

    /// Read the record stored under `name`, exactly as `list()` reports it.
    /// Names that would reach outside the store directory never match.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<Vec<T>>> {
        self.prepare()?;

        if !self.contains(name) {
            warn!("Configuration '{}' does not exist", name);
            return Ok(None);
        }

        let units = record_file::read(&self.record_path(name))?;
        Ok(Some(units))
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, RECORD_EXTENSION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn store() -> (tempfile::TempDir, ConfigStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigStore::new(dir.path().join("rcn_configs"));
        (dir, store)
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = store();
        let units = vec![
            json!({"model": "canny", "weight": 0.8, "nested": {"a": [1, 2]}}),
            json!({"model": "depth", "enabled": false}),
        ];

        let outcome = store.save("pose", &units).expect("save");
        assert!(matches!(outcome, SaveOutcome::Saved { .. }));
        assert_eq!(outcome.name(), "pose");

        let loaded: Vec<Value> = store.load("pose").expect("load").expect("present");
        assert_eq!(loaded, units);
    }

    #[test]
    fn collision_leaves_existing_bytes_untouched() {
        let (_dir, store) = store();
        let first = store.save("keep", &[json!({"v": 1})]).expect("save");
        let before = fs::read(first.path()).unwrap();

        let second = store.save("keep", &[json!({"v": 2})]).expect("save");
        assert!(matches!(second, SaveOutcome::AlreadyExists { .. }));
        assert_eq!(fs::read(second.path()).unwrap(), before);

        let loaded: Vec<Value> = store.load("keep").unwrap().unwrap();
        assert_eq!(loaded, vec![json!({"v": 1})]);
    }

    #[test]
    fn list_contains_exactly_saved_names() {
        let (_dir, store) = store();
        store.save("a", &[json!(1)]).unwrap();
        store.save("b", &[json!(2)]).unwrap();
        assert_eq!(store.list().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn empty_name_falls_back_to_timestamp() {
        let (_dir, store) = store();
        let outcome = store.save("", &[json!({})]).unwrap();
        assert!(!outcome.name().is_empty());
        assert!(outcome.name().starts_with("config_"));
        assert!(store.list().unwrap().contains(&outcome.name().to_string()));
    }

    #[test]
    fn unsafe_characters_are_replaced() {
        let (_dir, store) = store();
        let outcome = store.save("inv@lid/name", &[json!({})]).unwrap();
        assert_eq!(outcome.name(), "inv_lid_name");
        assert_eq!(outcome.path().parent(), Some(store.dir()));
        assert!(store.contains("inv_lid_name"));
    }

    #[test]
    fn missing_or_escaping_names_are_not_found() {
        let (dir, store) = store();
        fs::write(dir.path().join("outside.json"), "{}").unwrap();

        assert!(store.load::<Value>("does-not-exist").unwrap().is_none());
        assert!(store.load::<Value>("../outside").unwrap().is_none());
    }

    #[test]
    fn every_listed_record_can_be_loaded() {
        let (_dir, store) = store();
        let saved = store.save("x", &[json!({"model": "canny"})]).unwrap();
        fs::copy(saved.path(), store.dir().join("v1.2.json")).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed, vec!["v1.2".to_string(), "x".to_string()]);
        for name in &listed {
            let loaded: Vec<Value> = store
                .load(name)
                .unwrap()
                .unwrap_or_else(|| panic!("listed record {name} did not load"));
            assert_eq!(loaded, vec![json!({"model": "canny"})]);
        }
    }

    #[test]
    fn unit_floats_survive_bit_for_bit() {
        use crate::extension::ControlUnit;

        let (_dir, store) = store();
        let units: Vec<ControlUnit> = [0.9611757480989835, 0.1 + 0.2, 1.9999999999999998, 1e-300]
            .into_iter()
            .map(|weight| ControlUnit {
                weight,
                threshold_a: weight / 3.0,
                guidance_end: 1.0 - weight / 7.0,
                ..ControlUnit::new("canny", "control_canny")
            })
            .collect();

        store.save("precise", &units).unwrap();
        let loaded: Vec<ControlUnit> = store.load("precise").unwrap().unwrap();

        assert_eq!(loaded.len(), units.len());
        for (saved, back) in units.iter().zip(&loaded) {
            assert_eq!(saved.weight.to_bits(), back.weight.to_bits());
            assert_eq!(saved.threshold_a.to_bits(), back.threshold_a.to_bits());
            assert_eq!(saved.guidance_end.to_bits(), back.guidance_end.to_bits());
        }
    }

    #[test]
    fn sentinel_name_is_never_stored_or_offered() {
        let (_dir, store) = store();
        let outcome = store.save(NONE_CHOICE, &[json!({})]).unwrap();
        assert_ne!(outcome.name(), NONE_CHOICE);
        assert!(outcome.name().starts_with("config_"));

        fs::write(store.dir().join("None.json"), "{}").unwrap();
        let choices = store.choices();
        assert_eq!(
            choices.iter().filter(|name| name.as_str() == NONE_CHOICE).count(),
            1
        );
        assert_eq!(choices[0], NONE_CHOICE);
    }

    #[test]
    fn directory_is_created_on_demand() {
        let (_dir, store) = store();
        assert!(!store.dir().exists());
        assert!(store.list().unwrap().is_empty());
        assert!(store.dir().is_dir());
    }

    #[test]
    fn choices_start_with_none() {
        let (_dir, store) = store();
        store.save("studio-lighting", &[json!({})]).unwrap();
        assert_eq!(
            store.choices(),
            vec![NONE_CHOICE.to_string(), "studio-lighting".to_string()]
        );
    }
}
