// WHY: usage counters and settings live behind an async key-value capability
// The host decides where values persist; the core only reads and merges keys

use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tracing::{debug, info};

use crate::config::{ReadingLevel, Settings};

pub const PAGES_EXPLAINED_KEY: &str = "pagesExplained";
pub const TOTAL_WORDS_SIMPLIFIED_KEY: &str = "totalWordsSimplified";
pub const LAST_USED_KEY: &str = "lastUsed";
pub const READING_LEVEL_KEY: &str = "explainPageLevel";
pub const AUTO_DETECT_KEY: &str = "autoDetect";

/// Async key-value storage. `set` merges the given keys into what is already stored.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Values for the requested keys; missing keys are simply absent from the map
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>>;

    async fn set(&self, values: Map<String, Value>) -> Result<()>;

    /// Read `keys`, let `apply` edit them and merge the result back as one atomic step.
    /// Returns the values as written.
    async fn update(
        &self,
        keys: &[&str],
        apply: &(dyn for<'a> Fn(&'a mut Map<String, Value>) + Send + Sync),
    ) -> Result<Map<String, Value>>;
}

/// In-process store, used by tests and embedders without persistence
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: Map<String, Value>) -> Self {
        Self {
            values: Mutex::new(values),
        }
    }

    pub fn snapshot(&self) -> Map<String, Value> {
        self.values.lock().clone()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let values = self.values.lock();
        Ok(select_keys(&values, keys))
    }

    async fn set(&self, values: Map<String, Value>) -> Result<()> {
        self.values.lock().extend(values);
        Ok(())
    }

    async fn update(
        &self,
        keys: &[&str],
        apply: &(dyn for<'a> Fn(&'a mut Map<String, Value>) + Send + Sync),
    ) -> Result<Map<String, Value>> {
        let mut values = self.values.lock();
        let mut selected = select_keys(&values, keys);
        apply(&mut selected);
        values.extend(selected.clone());
        Ok(selected)
    }
}

/// Store backed by one pretty-printed JSON object on disk
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Held for every read and every read-merge-write cycle within this process
    lock: tokio::sync::Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole stored object; a missing file reads as empty
    async fn load_all(&self) -> Result<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("{} is not a JSON object", self.path.display()))
    }

    /// Write the whole object, creating parent directories as needed
    async fn save_all(&self, stored: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(stored)?;
        fs::write(&self.path, content)
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        debug!(path = %self.path.display(), keys = stored.len(), "Store saved");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let _guard = self.lock.lock().await;
        let values = self.load_all().await?;
        Ok(select_keys(&values, keys))
    }

    async fn set(&self, values: Map<String, Value>) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut stored = self.load_all().await?;
        stored.extend(values);
        self.save_all(&stored).await
    }

    async fn update(
        &self,
        keys: &[&str],
        apply: &(dyn for<'a> Fn(&'a mut Map<String, Value>) + Send + Sync),
    ) -> Result<Map<String, Value>> {
        let _guard = self.lock.lock().await;

        let mut stored = self.load_all().await?;
        let mut selected = select_keys(&stored, keys);
        apply(&mut selected);
        stored.extend(selected.clone());
        self.save_all(&stored).await?;
        Ok(selected)
    }
}

fn select_keys(values: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|&key| values.get(key).map(|value| (key.to_string(), value.clone())))
        .collect()
}

/// Lifetime usage shown in the popup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCounters {
    pub pages_explained: u64,
    pub total_words_simplified: u64,
    /// Milliseconds since the Unix epoch of the last rendered run
    pub last_used: Option<u64>,
}

const COUNTER_KEYS: [&str; 3] = [PAGES_EXPLAINED_KEY, TOTAL_WORDS_SIMPLIFIED_KEY, LAST_USED_KEY];

impl UsageCounters {
    pub async fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let values = store.get(&COUNTER_KEYS).await?;
        Ok(Self::from_values(&values))
    }

    /// Add the deltas in one atomic store update; returns the stored result
    pub async fn record(
        store: &dyn KeyValueStore,
        pages_delta: u64,
        words_delta: u64,
    ) -> Result<Self> {
        let now = now_millis();
        let stored = store
            .update(&COUNTER_KEYS, &|values: &mut Map<String, Value>| {
                let current = Self::from_values(values);
                values.insert(
                    PAGES_EXPLAINED_KEY.to_string(),
                    (current.pages_explained + pages_delta).into(),
                );
                values.insert(
                    TOTAL_WORDS_SIMPLIFIED_KEY.to_string(),
                    (current.total_words_simplified + words_delta).into(),
                );
                values.insert(LAST_USED_KEY.to_string(), now.into());
            })
            .await?;
        let updated = Self::from_values(&stored);

        info!(
            pages_explained = updated.pages_explained,
            total_words_simplified = updated.total_words_simplified,
            "Usage counters updated"
        );
        Ok(updated)
    }

    fn from_values(values: &Map<String, Value>) -> Self {
        let count = |key: &str| values.get(key).and_then(Value::as_u64);

        Self {
            pages_explained: count(PAGES_EXPLAINED_KEY).unwrap_or(0),
            total_words_simplified: count(TOTAL_WORDS_SIMPLIFIED_KEY).unwrap_or(0),
            last_used: count(LAST_USED_KEY),
        }
    }
}

/// Settings with defaults for anything missing or unrecognised
pub async fn load_settings(store: &dyn KeyValueStore) -> Result<Settings> {
    let values = store.get(&[READING_LEVEL_KEY, AUTO_DETECT_KEY]).await?;
    let defaults = Settings::default();

    let reading_level = values
        .get(READING_LEVEL_KEY)
        .and_then(Value::as_str)
        .map(ReadingLevel::from_key_or_default)
        .unwrap_or(defaults.reading_level);
    let auto_detect = values
        .get(AUTO_DETECT_KEY)
        .and_then(Value::as_bool)
        .unwrap_or(defaults.auto_detect);

    Ok(Settings {
        reading_level,
        auto_detect,
    })
}

pub async fn save_settings(store: &dyn KeyValueStore, settings: Settings) -> Result<()> {
    let mut values = Map::new();
    values.insert(
        READING_LEVEL_KEY.to_string(),
        settings.reading_level.key().into(),
    );
    values.insert(AUTO_DETECT_KEY.to_string(), settings.auto_detect.into());
    store.set(values).await
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
