// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use plainpage::{
    AnnotatedFragment, ComplexityReport, DocumentModel, ExplainSession, KeyValueStore, Lexicon,
    MemoryStore, OriginalPreview, PipelineConfig, ReadingLevel, SimplificationStats,
};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Temporary directory holding a JSON store file
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub store_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store_path = temp_dir.path().join("store.json");

        Self {
            temp_dir,
            store_path,
        }
    }
}

/// One call to `render_annotated`
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub fragment: AnnotatedFragment,
    pub stats: SimplificationStats,
    pub level: ReadingLevel,
}

/// Document that records everything the pipeline asks it to show
pub struct RecordingDocument {
    text: String,
    pub rendered: Mutex<Vec<RenderedPage>>,
    pub originals: Mutex<Vec<OriginalPreview>>,
    pub failures: Mutex<Vec<String>>,
    pub banners: Mutex<Vec<ComplexityReport>>,
    pub notices: Mutex<Vec<String>>,
    panic_on_render: bool,
}

impl RecordingDocument {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            rendered: Mutex::new(Vec::new()),
            originals: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
            banners: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
            panic_on_render: false,
        }
    }

    /// A document whose renderer blows up
    pub fn panicking(text: &str) -> Self {
        Self {
            panic_on_render: true,
            ..Self::new(text)
        }
    }

    pub fn render_count(&self) -> usize {
        self.rendered.lock().len()
    }

    pub fn last_render(&self) -> Option<RenderedPage> {
        self.rendered.lock().last().cloned()
    }
}

impl DocumentModel for RecordingDocument {
    fn extract_visible_text(&self) -> String {
        self.text.clone()
    }

    fn render_annotated(
        &self,
        fragment: &AnnotatedFragment,
        stats: &SimplificationStats,
        level: ReadingLevel,
    ) {
        if self.panic_on_render {
            panic!("renderer detached from page");
        }
        self.rendered.lock().push(RenderedPage {
            fragment: fragment.clone(),
            stats: *stats,
            level,
        });
    }

    fn render_original(&self, preview: &OriginalPreview) {
        self.originals.lock().push(preview.clone());
    }

    fn render_failure(&self, message: &str) {
        self.failures.lock().push(message.to_string());
    }

    fn show_banner(&self, report: &ComplexityReport) {
        self.banners.lock().push(report.clone());
    }

    fn notify(&self, message: &str) {
        self.notices.lock().push(message.to_string());
    }
}

/// Store that reads fine but rejects every write
#[derive(Default)]
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        self.inner.get(keys).await
    }

    async fn set(&self, _values: Map<String, Value>) -> Result<()> {
        anyhow::bail!("quota exceeded")
    }

    async fn update(
        &self,
        _keys: &[&str],
        _apply: &(dyn for<'a> Fn(&'a mut Map<String, Value>) + Send + Sync),
    ) -> Result<Map<String, Value>> {
        anyhow::bail!("quota exceeded")
    }
}

/// Pipeline config without the pacing delay
pub fn fast_config() -> PipelineConfig {
    delayed_config(Duration::ZERO)
}

pub fn delayed_config(pacing_delay: Duration) -> PipelineConfig {
    PipelineConfig {
        pacing_delay,
        ..PipelineConfig::default()
    }
}

pub fn session_with(store: Arc<dyn KeyValueStore>, config: PipelineConfig) -> ExplainSession {
    ExplainSession::new(Arc::new(Lexicon::builtin()), config, store)
        .expect("Session construction should succeed")
}

/// Store preloaded with the given key/value pairs
pub fn store_with(values: &[(&str, Value)]) -> Arc<MemoryStore> {
    let map = values
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    Arc::new(MemoryStore::with_values(map))
}
