use anyhow::{Context, Result};
use clap::Parser;
use plainpage::pipeline::NOTHING_TO_EXPLAIN_MESSAGE;
use plainpage::{
    AnnotatedFragment, ComplexityReport, DocumentModel, ExplainOutcome, ExplainSession,
    JsonFileStore, Lexicon, OriginalPreview, PipelineConfig, ReadingLevel, Segment,
    SimplificationStats, UsageCounters,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "plainpage")]
#[command(about = "Detect complex page text and explain it in plain language")]
#[command(version)]
struct Args {
    /// Page text to explain; reads stdin when omitted
    input: Option<PathBuf>,

    /// Reading level: elementary, middle or high (defaults to the stored setting)
    #[arg(long)]
    level: Option<ReadingLevel>,

    /// Explain even when the page does not look complex
    #[arg(long)]
    force: bool,

    /// Print the run report as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// JSON file holding settings and usage counters
    #[arg(long, default_value = "plainpage_store.json")]
    store: PathBuf,

    /// Pause before explaining, in milliseconds
    #[arg(long, default_value_t = 800)]
    delay_ms: u64,

    /// Simplify this selected text and exit
    #[arg(long)]
    selection: Option<String>,
}

/// Page text held in memory; output goes to stdout
struct TerminalDocument {
    text: String,
    json: bool,
}

impl TerminalDocument {
    fn new(text: String, json: bool) -> Self {
        Self { text, json }
    }

    /// Notices stay out of stdout in JSON mode and only reach the log
    fn print(&self, message: String) {
        if self.json {
            info!(notice = %message, "Document notice");
        } else {
            println!("{message}");
        }
    }
}

impl DocumentModel for TerminalDocument {
    fn extract_visible_text(&self) -> String {
        self.text.clone()
    }

    fn render_annotated(
        &self,
        fragment: &AnnotatedFragment,
        stats: &SimplificationStats,
        level: ReadingLevel,
    ) {
        if self.json {
            return;
        }

        println!("Simplified Version ({})", level.description());
        println!(
            "Simplified {} words \u{2022} Explained {} terms",
            stats.words_simplified, stats.jargon_explained
        );
        println!();

        for paragraph in &fragment.paragraphs {
            let line: String = paragraph
                .segments
                .iter()
                .map(|segment| match segment {
                    Segment::Text { text } => text.clone(),
                    Segment::Jargon { term, .. } => format!("[{term}]"),
                })
                .collect();
            println!("{line}");
        }

        let glossary = fragment.glossary();
        if !glossary.is_empty() {
            println!();
            println!("Glossary");
            for (term, definition) in glossary {
                println!("  {term}: {definition}");
            }
        }
    }

    fn render_original(&self, preview: &OriginalPreview) {
        if self.json || preview.paragraphs.is_empty() {
            return;
        }

        println!();
        println!("Original Content");
        for paragraph in &preview.paragraphs {
            println!("  {paragraph}");
        }
        if preview.remaining > 0 {
            println!("  ... and {} more paragraphs", preview.remaining);
        }
    }

    fn render_failure(&self, message: &str) {
        self.print(message.to_string());
    }

    fn show_banner(&self, report: &ComplexityReport) {
        self.print(format!(
            "This page looks complex: {}",
            report.reasons.join(", ")
        ));
    }

    fn notify(&self, message: &str) {
        self.print(message.to_string());
    }
}

async fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: logs go to stderr so stdout carries only the explanation
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let config = PipelineConfig {
        pacing_delay: Duration::from_millis(args.delay_ms),
        ..PipelineConfig::default()
    };
    let store = Arc::new(JsonFileStore::new(&args.store));
    let session = ExplainSession::new(Arc::new(Lexicon::builtin()), config, store)?;

    if let Some(selection) = &args.selection {
        match session.explain_selection(selection) {
            Some(explanation) if args.json => {
                println!("{}", serde_json::to_string_pretty(&explanation)?)
            }
            Some(explanation) => {
                println!("Original: {}", explanation.original);
                println!("Simplified: {}", explanation.simplified);
            }
            None => println!("Nothing selected"),
        }
        return Ok(());
    }

    let text = read_input(args.input.as_ref()).await?;
    let document = TerminalDocument::new(text, args.json);

    if !args.force {
        let decision = session.check_page(&document).await;
        if !decision.is_complex() {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&decision.report())?);
            } else {
                println!("This page does not look complex. Use --force to explain it anyway.");
            }
            return Ok(());
        }
    }

    let outcome = match args.level {
        Some(level) => session.explain_at_level(&document, level).await,
        None => session.explain(&document).await,
    };

    match outcome {
        ExplainOutcome::Rendered(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if let Some(counters) = report.counters {
                print_counters(&counters);
            }
        }
        ExplainOutcome::NothingToExplain => {
            if args.json {
                println!("{}", serde_json::json!({ "message": NOTHING_TO_EXPLAIN_MESSAGE }));
            }
        }
        ExplainOutcome::Superseded => info!("Run superseded"),
        ExplainOutcome::Failed(e) => {
            if args.json {
                println!("{}", serde_json::json!({ "error": e.user_message() }));
            }
            return Err(e.into());
        }
    }

    Ok(())
}

fn print_counters(counters: &UsageCounters) {
    println!();
    println!(
        "Pages explained: {}  Words simplified: {}",
        counters.pages_explained, counters.total_words_simplified
    );
}
