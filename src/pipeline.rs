// WHY: drives one page from gate decision to rendered summary without touching a live document
// Runs are tagged with a generation so a re-trigger discards the stale run's output

use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::annotator::{AnnotatedFragment, Annotator};
use crate::complexity::{ComplexityAnalyzer, ComplexityReport};
use crate::config::{PipelineConfig, ReadingLevel};
use crate::error::ExplainError;
use crate::lexicon::Lexicon;
use crate::simplifier::{SimplificationStats, Simplifier};
use crate::storage::{load_settings, KeyValueStore, UsageCounters};
use crate::summarizer::Summarizer;
use crate::text::OriginalPreview;

pub const NOTHING_TO_EXPLAIN_MESSAGE: &str = "No content found to explain on this page.";

/// The page as the pipeline sees it: text in, structured fragments out
pub trait DocumentModel: Send + Sync {
    fn extract_visible_text(&self) -> String;

    fn render_annotated(
        &self,
        fragment: &AnnotatedFragment,
        stats: &SimplificationStats,
        level: ReadingLevel,
    );

    /// Leading paragraphs of the untouched page, shown beside the summary
    fn render_original(&self, _preview: &OriginalPreview) {}

    fn render_failure(&self, message: &str);

    /// Invitation to explain a page the gate found complex
    fn show_banner(&self, _report: &ComplexityReport) {}

    /// Short transient message
    fn notify(&self, _message: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Analyzing,
    Skipped,
    BannerShown,
    Summarizing,
    Simplifying,
    Annotating,
    Rendered,
    Closed,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Analyzing => "analyzing",
            Self::Skipped => "skipped",
            Self::BannerShown => "banner_shown",
            Self::Summarizing => "summarizing",
            Self::Simplifying => "simplifying",
            Self::Annotating => "annotating",
            Self::Rendered => "rendered",
            Self::Closed => "closed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Result of the automatic complexity check on page load
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Auto-detect is switched off; nothing was analyzed
    Disabled,
    NotComplex(ComplexityReport),
    Complex(ComplexityReport),
}

impl GateDecision {
    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(_))
    }

    pub fn report(&self) -> Option<&ComplexityReport> {
        match self {
            Self::Disabled => None,
            Self::NotComplex(report) | Self::Complex(report) => Some(report),
        }
    }
}

/// Identifies one explain run; stale once a newer run starts or the session closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken {
    generation: u64,
}

impl RunToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What a rendered run produced
#[derive(Debug, Clone, Serialize)]
pub struct ExplainReport {
    pub level: ReadingLevel,
    pub stats: SimplificationStats,
    pub fragment: AnnotatedFragment,
    pub original: OriginalPreview,
    /// True when the page had no terminated sentences and lines were used instead
    pub used_fallback: bool,
    /// Counters after this run, if the store accepted the update
    pub counters: Option<UsageCounters>,
}

#[derive(Debug)]
pub enum ExplainOutcome {
    Rendered(Box<ExplainReport>),
    /// Page text too short, or nothing survived summarization
    NothingToExplain,
    /// A newer run or a close made this run's output obsolete
    Superseded,
    Failed(ExplainError),
}

impl ExplainOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }

    pub fn report(&self) -> Option<&ExplainReport> {
        match self {
            Self::Rendered(report) => Some(report.as_ref()),
            _ => None,
        }
    }
}

/// Word-level rewrite of a user selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionExplanation {
    pub original: String,
    pub simplified: String,
    pub words_simplified: usize,
}

/// Summary sentences chosen for one run
struct SummaryStage {
    sentences: Vec<String>,
    used_fallback: bool,
}

pub struct ExplainSession {
    analyzer: ComplexityAnalyzer,
    summarizer: Summarizer,
    simplifier: Simplifier,
    annotator: Annotator,
    config: PipelineConfig,
    store: Arc<dyn KeyValueStore>,
    state: Mutex<PipelineState>,
    generation: AtomicU64,
    /// Explain calls currently executing, stale or not
    runs_in_flight: AtomicUsize,
}

/// Counts one explain call as in flight until dropped
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ExplainSession {
    pub fn new(
        lexicon: Arc<Lexicon>,
        config: PipelineConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, ExplainError> {
        let analyzer = ComplexityAnalyzer::new(Arc::clone(&lexicon), config.complexity.clone())
            .map_err(ExplainError::Lexicon)?;
        let summarizer = Summarizer::new(Arc::clone(&lexicon)).map_err(ExplainError::Lexicon)?;
        let simplifier = Simplifier::new(Arc::clone(&lexicon)).map_err(ExplainError::Lexicon)?;
        let annotator = Annotator::new(lexicon).map_err(ExplainError::Lexicon)?;

        Ok(Self {
            analyzer,
            summarizer,
            simplifier,
            annotator,
            config,
            store,
            state: Mutex::new(PipelineState::Idle),
            generation: AtomicU64::new(0),
            runs_in_flight: AtomicUsize::new(0),
        })
    }

    /// Built-in lexicon and default thresholds
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Result<Self, ExplainError> {
        Self::new(Arc::new(Lexicon::builtin()), PipelineConfig::default(), store)
    }

    pub fn state(&self) -> PipelineState {
        *self.state.lock()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Page-load check: analyze when auto-detect is on and offer the banner if complex.
    /// While an explain run is in flight the decision is returned but the state and
    /// banner are left to the run.
    pub async fn check_page(&self, document: &dyn DocumentModel) -> GateDecision {
        let settings = match load_settings(self.store.as_ref()).await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Using default settings: {:#}", ExplainError::Storage(e));
                Default::default()
            }
        };

        if !settings.auto_detect {
            debug!("Auto-detect disabled, skipping analysis");
            self.set_gate_state(PipelineState::Skipped);
            return GateDecision::Disabled;
        }

        self.set_gate_state(PipelineState::Analyzing);
        let report = self.analyzer.analyze(&document.extract_visible_text());

        if report.is_complex {
            info!(score = report.score, reasons = ?report.reasons, "Page looks complex");
            if self.set_gate_state(PipelineState::BannerShown) {
                document.show_banner(&report);
            }
            GateDecision::Complex(report)
        } else {
            self.set_gate_state(PipelineState::Skipped);
            GateDecision::NotComplex(report)
        }
    }

    /// Explain at the stored reading level
    pub async fn explain(&self, document: &dyn DocumentModel) -> ExplainOutcome {
        let _in_flight = InFlight::enter(&self.runs_in_flight);
        let token = self.begin_run();
        let level = match load_settings(self.store.as_ref()).await {
            Ok(settings) => settings.reading_level,
            Err(e) => {
                warn!("Using default reading level: {:#}", ExplainError::Storage(e));
                ReadingLevel::default()
            }
        };
        self.run(document, level, token).await
    }

    /// Explain at an explicit reading level, superseding any run in flight
    pub async fn explain_at_level(
        &self,
        document: &dyn DocumentModel,
        level: ReadingLevel,
    ) -> ExplainOutcome {
        let _in_flight = InFlight::enter(&self.runs_in_flight);
        let token = self.begin_run();
        self.run(document, level, token).await
    }

    /// Dismiss the overlay or banner and invalidate any run in flight
    pub fn close(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock();
        let previous = *state;
        if !matches!(previous, PipelineState::Idle | PipelineState::Skipped) {
            debug!(from = %previous, "Session closed");
            *state = PipelineState::Closed;
        }
    }

    /// Word-level rewrite of a selection; `None` when the selection is blank
    pub fn explain_selection(&self, text: &str) -> Option<SelectionExplanation> {
        let original = text.trim();
        if original.is_empty() {
            return None;
        }

        let (simplified, words_simplified) = self.simplifier.simplify_words(original);
        Some(SelectionExplanation {
            original: original.to_string(),
            simplified,
            words_simplified,
        })
    }

    pub fn is_current(&self, token: RunToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.generation
    }

    fn begin_run(&self) -> RunToken {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "Explain run started");
        RunToken { generation }
    }

    async fn run(
        &self,
        document: &dyn DocumentModel,
        level: ReadingLevel,
        token: RunToken,
    ) -> ExplainOutcome {
        let text = document.extract_visible_text();
        if text.trim().chars().count() < self.config.min_explain_chars {
            if !self.set_state_if_current(token, PipelineState::Idle) {
                return self.superseded(token);
            }
            info!(chars = text.trim().chars().count(), "Nothing to explain");
            document.notify(NOTHING_TO_EXPLAIN_MESSAGE);
            return ExplainOutcome::NothingToExplain;
        }

        if !self.config.pacing_delay.is_zero() {
            tokio::time::sleep(self.config.pacing_delay).await;
        }
        if !self.is_current(token) {
            return self.superseded(token);
        }

        let profile = level.profile();
        info!(%level, generation = token.generation, "Explaining page");

        let summary = match self.stage(token, PipelineState::Summarizing, || {
            Ok(self.summary_sentences(&text, level))
        }) {
            Ok(Some(summary)) => summary,
            Ok(None) => return self.superseded(token),
            Err(e) => return self.fail(document, token, e),
        };

        if summary.sentences.is_empty() {
            if !self.set_state_if_current(token, PipelineState::Idle) {
                return self.superseded(token);
            }
            info!("No sentences or fallback lines to explain");
            document.notify(NOTHING_TO_EXPLAIN_MESSAGE);
            return ExplainOutcome::NothingToExplain;
        }

        let mut stats = SimplificationStats::default();

        let chunks = match self.stage(token, PipelineState::Simplifying, || {
            Ok(summary
                .sentences
                .iter()
                .flat_map(|sentence| {
                    self.simplifier
                        .simplify_into_chunks(sentence, profile, &mut stats)
                })
                .collect::<Vec<_>>())
        }) {
            Ok(Some(chunks)) => chunks,
            Ok(None) => return self.superseded(token),
            Err(e) => return self.fail(document, token, e),
        };

        let fragment = match self.stage(token, PipelineState::Annotating, || {
            Ok(self.annotator.annotate(&chunks, &mut stats))
        }) {
            Ok(Some(fragment)) => fragment,
            Ok(None) => return self.superseded(token),
            Err(e) => return self.fail(document, token, e),
        };

        let original = OriginalPreview::from_text(&text);
        if !self.is_current(token) {
            return self.superseded(token);
        }

        // Renderer code is host-provided; a panic there must not escape either
        if let Err(e) = isolate("rendering", || {
            document.render_annotated(&fragment, &stats, level);
            document.render_original(&original);
            Ok(())
        }) {
            return self.fail(document, token, e);
        }
        self.set_state_if_current(token, PipelineState::Rendered);

        info!(
            words_simplified = stats.words_simplified,
            jargon_explained = stats.jargon_explained,
            paragraphs = fragment.paragraphs.len(),
            "Page explained"
        );

        let counters = match UsageCounters::record(
            self.store.as_ref(),
            1,
            stats.words_simplified as u64,
        )
        .await
        {
            Ok(counters) => Some(counters),
            Err(e) => {
                warn!("Usage counters not updated: {:#}", ExplainError::Storage(e));
                None
            }
        };

        ExplainOutcome::Rendered(Box::new(ExplainReport {
            level,
            stats,
            fragment,
            original,
            used_fallback: summary.used_fallback,
            counters,
        }))
    }

    fn summary_sentences(&self, text: &str, level: ReadingLevel) -> SummaryStage {
        let profile = level.profile();
        let sentences = self.summarizer.summarize(text, profile);

        if sentences.is_empty() {
            debug!("No terminated sentences, falling back to lines");
            return SummaryStage {
                sentences: self
                    .summarizer
                    .fallback(text, profile)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                used_fallback: true,
            };
        }

        SummaryStage {
            sentences: sentences.iter().map(|s| s.text.to_string()).collect(),
            used_fallback: false,
        }
    }

    /// Enter `state`, run the stage in isolation, then confirm the run is still current.
    /// `Ok(None)` means the run was superseded.
    fn stage<T>(
        &self,
        token: RunToken,
        state: PipelineState,
        work: impl FnOnce() -> anyhow::Result<T>,
    ) -> Result<Option<T>, ExplainError> {
        if !self.set_state_if_current(token, state) {
            return Ok(None);
        }

        let name = match state {
            PipelineState::Summarizing => "summarizing",
            PipelineState::Simplifying => "simplifying",
            PipelineState::Annotating => "annotating",
            _ => "pipeline",
        };
        let output = isolate(name, work)?;

        Ok(self.is_current(token).then_some(output))
    }

    fn fail(
        &self,
        document: &dyn DocumentModel,
        token: RunToken,
        e: ExplainError,
    ) -> ExplainOutcome {
        error!("Explain run failed: {}", e);

        if self.set_state_if_current(token, PipelineState::Failed) {
            document.render_failure(e.user_message());
            self.set_state_if_current(token, PipelineState::Idle);
        }
        ExplainOutcome::Failed(e)
    }

    fn superseded(&self, token: RunToken) -> ExplainOutcome {
        debug!(generation = token.generation, "Run superseded, discarding output");
        ExplainOutcome::Superseded
    }

    /// Gate transition; refused while any explain run is in flight
    fn set_gate_state(&self, next: PipelineState) -> bool {
        let mut state = self.state.lock();
        if self.runs_in_flight.load(Ordering::SeqCst) > 0 {
            debug!(to = %next, "Explain run in flight, gate leaves state alone");
            return false;
        }
        let previous = *state;
        debug!(from = %previous, to = %next, "State transition");
        *state = next;
        true
    }

    /// Transition only while `token` is the newest run
    fn set_state_if_current(&self, token: RunToken, next: PipelineState) -> bool {
        let mut state = self.state.lock();
        if !self.is_current(token) {
            return false;
        }
        let previous = *state;
        debug!(from = %previous, to = %next, "State transition");
        *state = next;
        true
    }
}

/// Convert both errors and panics inside `work` into `StageFailed`
fn isolate<T>(
    stage: &'static str,
    work: impl FnOnce() -> anyhow::Result<T>,
) -> Result<T, ExplainError> {
    match panic::catch_unwind(AssertUnwindSafe(work)) {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(ExplainError::stage_failed(stage, format!("{e:#}"))),
        Err(payload) => Err(ExplainError::stage_failed(stage, panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
