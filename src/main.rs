use anyhow::{bail, Context};
use cbrx::{
    feature_set, load_json_cases, AggregateSchema, CancellationToken, CaseBase,
    EvalConfig, EvalObserver, EvaluationReport, ExplainedMatch, HoldoutOutcome, LooEvaluator,
    Query, RankingStats, Retriever, TabularLoader, WeightVector, Weighting,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Case-based reasoning: retrieve similar cases and reuse their outcomes
#[derive(Parser, Debug)]
#[command(name = "cbrx")]
#[command(about = "Case-based reasoning retrieval engine", long_about = None)]
struct Args {
    /// Path to the case corpus (CSV of 0/1 indicators, or a JSON case list)
    #[arg(short, long, default_value = "./data/Training.csv")]
    data: PathBuf,

    /// Corpus format; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    format: Option<DataFormat>,

    /// Name of the label column in tabular sources
    #[arg(long, default_value = "prognosis")]
    label_column: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ad hoc top-k lookup for a feature set
    Lookup {
        /// Comma-separated query features
        #[arg(long, value_delimiter = ',', required = true)]
        features: Vec<String>,

        /// Number of cases to return
        #[arg(short, default_value_t = 3)]
        k: usize,

        /// Expected label; enables the label-aware aggregate score
        #[arg(long)]
        label: Option<String>,

        /// Weight of the feature term in the aggregate score
        #[arg(long, default_value_t = 0.7)]
        features_weight: f64,

        /// Weight of the label term in the aggregate score
        #[arg(long, default_value_t = 0.3)]
        label_weight: f64,

        /// Use corpus IDF weights instead of uniform weights
        #[arg(long)]
        weighted: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Leave-one-out evaluation over the whole corpus
    Loo {
        #[arg(long, value_enum, default_value_t = WeightingMode::Uniform)]
        weighting: WeightingMode,

        /// Evaluate held-out cases in parallel
        #[arg(long)]
        parallel: bool,

        /// Log progress every N evaluated cases (0 disables)
        #[arg(long, default_value_t = 500)]
        progress_every: usize,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the highest IDF feature weights
    Weights {
        #[arg(long, default_value_t = 20)]
        top: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DataFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WeightingMode {
    Uniform,
    Idf,
    Both,
}

/// Logs evaluation progress through tracing
struct ProgressLogger {
    every: usize,
    total: AtomicUsize,
    done: AtomicUsize,
    correct: AtomicUsize,
}

impl ProgressLogger {
    fn new(every: usize) -> Self {
        Self {
            every,
            total: AtomicUsize::new(0),
            done: AtomicUsize::new(0),
            correct: AtomicUsize::new(0),
        }
    }
}

impl EvalObserver for ProgressLogger {
    fn on_start(&self, total_cases: usize) {
        self.total.store(total_cases, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
        self.correct.store(0, Ordering::Relaxed);
    }

    fn on_case(&self, outcome: &HoldoutOutcome) {
        if outcome.correct {
            self.correct.fetch_add(1, Ordering::Relaxed);
        }
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if self.every > 0 && done % self.every == 0 {
            info!(
                done,
                total = self.total.load(Ordering::Relaxed),
                correct = self.correct.load(Ordering::Relaxed),
                "Testing cases"
            );
        }
    }
}

#[derive(Serialize)]
struct LookupOutput {
    stats: Option<RankingStats>,
    results: Vec<ExplainedMatch>,
}

#[derive(Serialize)]
struct LooOutput {
    weighting: &'static str,
    #[serde(flatten)]
    report: EvaluationReport,
}

fn load_base(args: &Args) -> anyhow::Result<CaseBase> {
    let format = match args.format {
        Some(format) => format,
        None => infer_format(&args.data),
    };
    let cases = match format {
        DataFormat::Csv => {
            TabularLoader::new()
                .with_label_column(args.label_column.clone())
                .with_default_solution(true)
                .load_path(&args.data)
                .with_context(|| format!("failed to load {:?}", args.data))?
                .cases
        }
        DataFormat::Json => load_json_cases(&args.data)
            .with_context(|| format!("failed to load {:?}", args.data))?,
    };
    let base = CaseBase::new(cases).context("invalid case base")?;
    info!(cases = base.len(), "Case base ready");
    Ok(base)
}

fn infer_format(path: &Path) -> DataFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => DataFormat::Json,
        _ => DataFormat::Csv,
    }
}

fn idf_weighting(base: &CaseBase) -> Weighting {
    Weighting::from(WeightVector::from_cases(base.iter()))
}

#[allow(clippy::too_many_arguments)]
fn run_lookup(
    base: &CaseBase,
    features: Vec<String>,
    k: usize,
    label: Option<String>,
    features_weight: f64,
    label_weight: f64,
    weighted: bool,
    json: bool,
) -> anyhow::Result<()> {
    let weighting = if weighted { idf_weighting(base) } else { Weighting::Uniform };
    let query = Query {
        features: feature_set(features),
        label,
    };

    let unknown = base.vocabulary().unknown(&query.features).join(", ");
    if !unknown.is_empty() {
        warn!(features = %unknown, "Query features not present in the corpus");
    }

    let retriever = Retriever::new(weighting);
    let output = if query.label.is_some() {
        let schema = AggregateSchema::new(features_weight, label_weight);
        let results = retriever.lookup(&query, base, k, &schema)?;
        LookupOutput {
            stats: None,
            results: ExplainedMatch::from_results(&results),
        }
    } else {
        let ranking = retriever.retrieve(&query.features, base, k)?;
        LookupOutput {
            stats: Some(RankingStats::compute(&ranking, base.len())),
            results: ExplainedMatch::from_ranking(&ranking),
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Most similar cases (k={}):", k);
    for m in &output.results {
        println!("-> #{} Label: {} | Similarity: {:.2}", m.rank, m.label, m.score);
        if let Some(solution) = &m.solution {
            println!("   Suggested solution: {}", solution);
        }
    }
    Ok(())
}

async fn run_loo(
    base: CaseBase,
    mode: WeightingMode,
    parallel: bool,
    progress_every: usize,
    json: bool,
) -> anyhow::Result<()> {
    let mut runs: Vec<(&'static str, Weighting)> = Vec::new();
    if matches!(mode, WeightingMode::Uniform | WeightingMode::Both) {
        runs.push(("uniform", Weighting::Uniform));
    }
    if matches!(mode, WeightingMode::Idf | WeightingMode::Both) {
        runs.push(("idf", idf_weighting(&base)));
    }

    let base = Arc::new(base);
    let token = CancellationToken::new();
    let mut outputs = Vec::with_capacity(runs.len());

    for (name, weighting) in runs {
        info!(weighting = name, cases = base.len(), "Starting leave-one-out test");
        let evaluator = LooEvaluator::new(weighting, EvalConfig { parallel })
            .with_observer(Arc::new(ProgressLogger::new(progress_every)))
            .with_cancellation(token.clone());

        let base_for_run = base.clone();
        let mut handle = tokio::task::spawn_blocking(move || evaluator.evaluate(&base_for_run));

        let report = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, cancelling evaluation");
                token.cancel();
                (&mut handle).await?
            }
            report = &mut handle => report?,
        };

        outputs.push(LooOutput {
            weighting: name,
            report,
        });
        if report.cancelled {
            break;
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
        return Ok(());
    }

    for output in &outputs {
        let report = &output.report;
        println!("{}", "=".repeat(50));
        println!("LEAVE-ONE-OUT RESULT ({})", output.weighting);
        println!("{}", "=".repeat(50));
        if report.cancelled {
            println!("(cancelled: partial counts)");
        }
        println!("Cases tested: {}", report.total);
        println!("Correct: {}", report.correct);
        if report.skipped > 0 {
            println!("Skipped: {}", report.skipped);
        }
        if report.has_comparisons() {
            println!("Accuracy: {:.2}%", report.accuracy_percent());
        } else {
            println!("Accuracy: n/a (no comparisons)");
        }
    }
    Ok(())
}

fn run_weights(base: &CaseBase, top: usize) {
    let weights = WeightVector::from_cases(base.iter());
    println!("{} features over {} cases", weights.len(), weights.total_cases());
    for (feature, weight) in weights.ranked().into_iter().take(top) {
        println!(
            "{:>8.4}  df={:<6} {}",
            weight,
            weights.document_frequency(feature),
            feature
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting cbrx v{}", env!("CARGO_PKG_VERSION"));
    info!("Data: {:?}", args.data);

    let base = load_base(&args)?;

    match args.command {
        Command::Lookup {
            features,
            k,
            label,
            features_weight,
            label_weight,
            weighted,
            json,
        } => {
            if k == 0 {
                bail!("-k must be at least 1");
            }
            run_lookup(&base, features, k, label, features_weight, label_weight, weighted, json)?;
        }
        Command::Loo {
            weighting,
            parallel,
            progress_every,
            json,
        } => run_loo(base, weighting, parallel, progress_every, json).await?,
        Command::Weights { top } => run_weights(&base, top),
    }

    Ok(())
}
