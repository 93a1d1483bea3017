use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use plainpage::{
    AnnotatedFragment, Annotator, ComplexityAnalyzer, ComplexityConfig, DocumentModel,
    ExplainSession, Lexicon, MemoryStore, PipelineConfig, ReadingLevel, SimplificationStats,
    Simplifier, Summarizer,
};
use std::sync::Arc;
use std::time::Duration;

const ARTICLE: &str = r#"Modern web platforms utilize a substantial amount of infrastructure to deliver content. Every request travels from the browser to a server, which queries a database and returns a response through an API.

Engineers demonstrate that careful optimization of each algorithm can reduce latency by approximately forty percent. Furthermore, encryption protects the data while it moves across the network, although it requires additional processing on both ends.

Teams that facilitate collaboration between developers and stakeholders tend to ship features faster. They establish clear protocols, maintain shared documentation, and identify bottlenecks before they become outages.

Caching frequently requested pages is one of the simplest improvements. A cache sitting in front of the database can eliminate most repeated queries, and subsequently the servers handle more visitors with the same hardware.

In order to measure progress, organizations track revenue, expenditure and scalability over time. These numbers indicate whether the investment in infrastructure produced a significant return."#;

/// Page that discards everything rendered
struct StaticDocument {
    text: String,
}

impl DocumentModel for StaticDocument {
    fn extract_visible_text(&self) -> String {
        self.text.clone()
    }

    fn render_annotated(
        &self,
        fragment: &AnnotatedFragment,
        _stats: &SimplificationStats,
        _level: ReadingLevel,
    ) {
        black_box(fragment);
    }

    fn render_failure(&self, message: &str) {
        black_box(message);
    }
}

fn long_page() -> String {
    vec![ARTICLE; 20].join("\n\n")
}

fn bench_components(c: &mut Criterion) {
    let lexicon = Arc::new(Lexicon::builtin());
    let analyzer =
        ComplexityAnalyzer::new(Arc::clone(&lexicon), ComplexityConfig::default()).unwrap();
    let summarizer = Summarizer::new(Arc::clone(&lexicon)).unwrap();
    let simplifier = Simplifier::new(Arc::clone(&lexicon)).unwrap();
    let annotator = Annotator::new(lexicon).unwrap();
    let page = long_page();

    let mut group = c.benchmark_group("components");
    group.throughput(Throughput::Bytes(page.len() as u64));

    group.bench_function("analyze", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(&page))))
    });

    group.bench_function("summarize", |b| {
        b.iter(|| black_box(summarizer.summarize(black_box(&page), ReadingLevel::Middle.profile())))
    });

    group.bench_function("simplify_and_annotate", |b| {
        let profile = ReadingLevel::Middle.profile();
        b.iter(|| {
            let mut stats = SimplificationStats::default();
            let chunks: Vec<String> = summarizer
                .summarize(&page, profile)
                .iter()
                .flat_map(|sentence| {
                    simplifier.simplify_into_chunks(sentence.text, profile, &mut stats)
                })
                .collect();
            black_box(annotator.annotate(&chunks, &mut stats))
        })
    });

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = PipelineConfig {
        pacing_delay: Duration::ZERO,
        ..PipelineConfig::default()
    };
    let session = ExplainSession::new(
        Arc::new(Lexicon::builtin()),
        config,
        Arc::new(MemoryStore::new()),
    )
    .unwrap();

    let mut group = c.benchmark_group("session");
    for level in ReadingLevel::ALL {
        let document = StaticDocument { text: long_page() };
        group.bench_function(format!("explain_{}", level.key()), |b| {
            b.to_async(&rt).iter(|| async {
                black_box(session.explain_at_level(&document, level).await)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_components, bench_session);
criterion_main!(benches);
