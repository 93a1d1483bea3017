use plainpage::error::{ExplainError, GENERIC_FAILURE_MESSAGE};
use plainpage::pipeline::NOTHING_TO_EXPLAIN_MESSAGE;
use plainpage::storage::{AUTO_DETECT_KEY, PAGES_EXPLAINED_KEY, READING_LEVEL_KEY};
use plainpage::{
    ExplainOutcome, GateDecision, MemoryStore, PipelineState, ReadingLevel, UsageCounters,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[path = "integration/fixtures/mod.rs"]
mod fixtures;
use fixtures::*;

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::*;

/// Complex page on load: banner offered, session waits for the user
#[tokio::test]
async fn test_gate_shows_banner_for_complex_page() {
    let session = session_with(Arc::new(MemoryStore::new()), fast_config());
    let document = RecordingDocument::new(COMPLEX_ARTICLE);

    let decision = session.check_page(&document).await;

    assert!(decision.is_complex());
    let report = decision.report().expect("Analysis should have run");
    assert!(report.score >= 3);
    assert!(!report.reasons.is_empty());
    assert_eq!(document.banners.lock().len(), 1);
    assert_eq!(session.state(), PipelineState::BannerShown);
}

#[tokio::test]
async fn test_gate_skips_simple_page() {
    let session = session_with(Arc::new(MemoryStore::new()), fast_config());
    let document = RecordingDocument::new(SIMPLE_PAGE);

    let decision = session.check_page(&document).await;

    assert!(matches!(decision, GateDecision::NotComplex(_)));
    assert!(document.banners.lock().is_empty());
    assert_eq!(session.state(), PipelineState::Skipped);
}

#[tokio::test]
async fn test_gate_respects_auto_detect_setting() {
    let store = store_with(&[(AUTO_DETECT_KEY, json!(false))]);
    let session = session_with(store, fast_config());
    let document = RecordingDocument::new(COMPLEX_ARTICLE);

    let decision = session.check_page(&document).await;

    assert_eq!(decision, GateDecision::Disabled);
    assert!(document.banners.lock().is_empty());
    assert_eq!(session.state(), PipelineState::Skipped);
}

/// Full run: summary rendered once, counters updated with this run's stats
#[tokio::test]
async fn test_explain_renders_and_records_usage() {
    let store = Arc::new(MemoryStore::new());
    let session = session_with(store.clone(), fast_config());
    let document = RecordingDocument::new(COMPLEX_ARTICLE);

    let outcome = session.explain(&document).await;

    let report = outcome.report().expect("Run should render");
    assert_eq!(report.level, ReadingLevel::Middle);
    assert!(!report.used_fallback);
    assert!(report.stats.words_simplified >= 1);
    assert!(report.stats.jargon_explained >= 1);
    assert_eq!(session.state(), PipelineState::Rendered);

    let rendered = document.last_render().expect("Document should have been rendered");
    assert_eq!(document.render_count(), 1);
    assert_eq!(rendered.stats, report.stats);
    assert_eq!(rendered.fragment, report.fragment);
    for paragraph in &rendered.fragment.paragraphs {
        assert!(paragraph.plain_text().split_whitespace().count() <= 15);
    }

    let originals = document.originals.lock();
    assert_eq!(originals.len(), 1);
    assert_eq!(originals[0].paragraphs.len(), 5);
    assert_eq!(originals[0].remaining, 0);
    drop(originals);

    let counters = UsageCounters::load(store.as_ref()).await.unwrap();
    assert_eq!(counters.pages_explained, 1);
    assert_eq!(counters.total_words_simplified, report.stats.words_simplified as u64);
    assert!(counters.last_used.is_some());
    assert_eq!(report.counters, Some(counters));
}

#[tokio::test]
async fn test_counters_accumulate_across_runs() {
    let store = Arc::new(MemoryStore::new());
    let session = session_with(store.clone(), fast_config());
    let document = RecordingDocument::new(COMPLEX_ARTICLE);

    let first = session.explain(&document).await;
    let second = session.explain(&document).await;

    let words = first.report().unwrap().stats.words_simplified
        + second.report().unwrap().stats.words_simplified;
    let counters = UsageCounters::load(store.as_ref()).await.unwrap();
    assert_eq!(counters.pages_explained, 2);
    assert_eq!(counters.total_words_simplified, words as u64);
}

#[tokio::test]
async fn test_stored_reading_level_shapes_output() {
    let store = store_with(&[(READING_LEVEL_KEY, json!("elementary"))]);
    let session = session_with(store, fast_config());
    let document = RecordingDocument::new(COMPLEX_ARTICLE);

    let outcome = session.explain(&document).await;

    let report = outcome.report().expect("Run should render");
    assert_eq!(report.level, ReadingLevel::Elementary);
    for paragraph in &report.fragment.paragraphs {
        assert!(paragraph.plain_text().split_whitespace().count() <= 10);
    }
}

#[tokio::test]
async fn test_short_page_has_nothing_to_explain() {
    let store = Arc::new(MemoryStore::new());
    let session = session_with(store.clone(), fast_config());
    let document = RecordingDocument::new(SHORT_PAGE);

    let outcome = session.explain(&document).await;

    assert!(matches!(outcome, ExplainOutcome::NothingToExplain));
    assert_eq!(document.render_count(), 0);
    assert_eq!(*document.notices.lock(), vec![NOTHING_TO_EXPLAIN_MESSAGE.to_string()]);
    assert!(!store.snapshot().contains_key(PAGES_EXPLAINED_KEY));
    assert_eq!(session.state(), PipelineState::Idle);
}

#[tokio::test]
async fn test_unpunctuated_page_uses_line_fallback() {
    let session = session_with(Arc::new(MemoryStore::new()), fast_config());
    let document = RecordingDocument::new(UNPUNCTUATED_PAGE);

    let outcome = session.explain_at_level(&document, ReadingLevel::High).await;

    let report = outcome.report().expect("Fallback lines should still render");
    assert!(report.used_fallback);
    let text = report.fragment.to_plain_text();
    assert!(text.contains("Quarterly revenue grew"));
    assert!(!text.contains("Contact"));
    assert!(report.fragment.glossary().iter().any(|(term, _)| *term == "database"));
}

/// Re-triggering while a run waits out its delay discards the older run
#[tokio::test]
async fn test_newer_run_supersedes_pending_run() {
    let store = Arc::new(MemoryStore::new());
    let session = session_with(store.clone(), delayed_config(Duration::from_millis(30)));
    let document = RecordingDocument::new(COMPLEX_ARTICLE);

    let (first, second) = tokio::join!(
        session.explain_at_level(&document, ReadingLevel::Middle),
        session.explain_at_level(&document, ReadingLevel::High),
    );

    assert!(matches!(first, ExplainOutcome::Superseded));
    assert!(second.is_rendered());
    assert_eq!(document.render_count(), 1);
    assert_eq!(document.last_render().unwrap().level, ReadingLevel::High);

    let counters = UsageCounters::load(store.as_ref()).await.unwrap();
    assert_eq!(counters.pages_explained, 1);
}

#[tokio::test]
async fn test_close_cancels_pending_run() {
    let session = session_with(
        Arc::new(MemoryStore::new()),
        delayed_config(Duration::from_millis(50)),
    );
    let document = RecordingDocument::new(COMPLEX_ARTICLE);
    assert!(session.check_page(&document).await.is_complex());

    let (outcome, _) = tokio::join!(session.explain(&document), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        session.close();
    });

    assert!(matches!(outcome, ExplainOutcome::Superseded));
    assert_eq!(document.render_count(), 0);
    assert_eq!(session.state(), PipelineState::Closed);
}

/// A page-load check during a pending run reports its decision but leaves the run's state alone
#[tokio::test]
async fn test_gate_during_pending_run_keeps_run_state() {
    let session = session_with(
        Arc::new(MemoryStore::new()),
        delayed_config(Duration::from_millis(50)),
    );
    let document = RecordingDocument::new(COMPLEX_ARTICLE);

    let (outcome, decision) = tokio::join!(session.explain(&document), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        session.check_page(&document).await
    });

    assert!(decision.is_complex());
    assert!(document.banners.lock().is_empty());
    assert!(outcome.is_rendered());
    assert_eq!(session.state(), PipelineState::Rendered);
}

#[tokio::test]
async fn test_close_after_render() {
    let session = session_with(Arc::new(MemoryStore::new()), fast_config());
    let document = RecordingDocument::new(COMPLEX_ARTICLE);

    assert!(session.explain(&document).await.is_rendered());
    session.close();
    assert_eq!(session.state(), PipelineState::Closed);
}

/// A failing renderer degrades to the generic message and the session recovers
#[tokio::test]
async fn test_render_panic_is_isolated() {
    let store = Arc::new(MemoryStore::new());
    let session = session_with(store.clone(), fast_config());
    let document = RecordingDocument::panicking(COMPLEX_ARTICLE);

    let outcome = session.explain(&document).await;

    match outcome {
        ExplainOutcome::Failed(ExplainError::StageFailed { stage, message }) => {
            assert_eq!(stage, "rendering");
            assert!(message.contains("renderer detached"));
        }
        other => panic!("expected stage failure, got {other:?}"),
    }
    assert_eq!(*document.failures.lock(), vec![GENERIC_FAILURE_MESSAGE.to_string()]);
    assert_eq!(session.state(), PipelineState::Idle);
    assert!(!store.snapshot().contains_key(PAGES_EXPLAINED_KEY));

    // The session keeps working for the next page
    let healthy = RecordingDocument::new(COMPLEX_ARTICLE);
    assert!(session.explain(&healthy).await.is_rendered());
}

#[tokio::test]
async fn test_storage_failure_does_not_change_outcome() {
    let session = session_with(Arc::new(ReadOnlyStore::default()), fast_config());
    let document = RecordingDocument::new(COMPLEX_ARTICLE);

    let outcome = session.explain(&document).await;

    let report = outcome.report().expect("Run should render despite the store");
    assert_eq!(report.counters, None);
    assert_eq!(document.render_count(), 1);
    assert_eq!(session.state(), PipelineState::Rendered);
}
