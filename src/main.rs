mod api;
mod server;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::{AnalysisEntry, BatchReport};
use post_score::config::Config;
use post_score::loader::load_path;
use post_score::summary::{summarize, BatchSummary};
use post_score::{format_float, validate_content, AnalysisResult, Content, ContentAnalyzer};

const DEFAULT_CONFIG_PATH: &str = "config/post-score.toml";
const REPORT_FILE: &str = "analysis.json";

#[derive(Parser)]
#[command(name = "post-score", about = "Social post content scorer")]
struct Cli {
    /// Config file (default: $POST_SCORE_CONFIG or config/post-score.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Score one content file or every content file under a directory
    Analyze(AnalyzeArgs),
    Serve(ServeArgs),
    /// Write the default configuration
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    /// File or directory to analyze (default: content_dir from config)
    #[arg(long)]
    path: Option<PathBuf>,
    #[arg(long)]
    advice: bool,
    /// Also write every result to <output_dir>/analysis.json
    #[arg(long)]
    json: bool,
    /// Pause between items while a remote AI provider is active
    #[arg(long, default_value_t = 2000)]
    delay_ms: u64,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            path: None,
            advice: false,
            json: false,
            delay_ms: 2000,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    path: PathBuf,
    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Analyze(AnalyzeArgs::default()));

    match command {
        Command::Analyze(args) => run_analyze(args, cli.config).await,
        Command::Serve(args) => {
            let analyzer = build_analyzer(cli.config)?;
            server::serve(args, analyzer).await
        }
        Command::InitConfig(args) => run_init_config(args),
    }
}

fn build_analyzer(config_path: Option<PathBuf>) -> anyhow::Result<ContentAnalyzer> {
    let (config, path) = Config::load(config_path).context("invalid configuration")?;
    match path.as_ref().filter(|path| path.exists()) {
        Some(path) => info!(path = %path.display(), "config loaded"),
        None => info!("no config file found; using defaults"),
    }
    let analyzer = ContentAnalyzer::from_config(Arc::new(config))?;
    Ok(analyzer)
}

async fn run_analyze(args: AnalyzeArgs, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let analyzer = build_analyzer(config_path)?;
    let target = args
        .path
        .clone()
        .unwrap_or_else(|| analyzer.config().content_dir.clone());

    let report = load_path(&target);
    if report.is_empty() {
        anyhow::bail!("no content files found in {}", target.display());
    }
    for failure in &report.failures {
        eprintln!("Skipped {}: {}", failure.path().display(), failure);
    }

    let total = report.contents.len();
    info!(total, provider = analyzer.provider().name(), "starting analysis");

    let throttle = analyzer.provider().is_remote() && args.delay_ms > 0;
    let mut entries = Vec::new();
    let mut failed = 0usize;

    for (index, content) in report.contents.iter().enumerate() {
        if index > 0 && throttle {
            tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;
        }
        println!(
            "\n[{}/{}] {}",
            index + 1,
            total,
            display_title(content)
        );

        let warnings = validate_content(content, analyzer.config(), analyzer.image_analyzer());
        let result = match analyzer.analyze(content).await {
            Ok(result) => result,
            Err(err) => {
                warn!(content = %content.id, error = %err, "analysis failed");
                eprintln!("Analysis failed for {}: {}", content.id, err);
                failed += 1;
                continue;
            }
        };
        let topics = analyzer.topics(content).await;
        let advice = if args.advice {
            Some(analyzer.advise(&result).await)
        } else {
            None
        };

        let entry = AnalysisEntry {
            result,
            topics,
            warnings,
            advice,
        };
        print_entry(&entry);
        entries.push(entry);
    }

    println!(
        "\nAnalyzed {} of {} item(s); {} failed, {} file(s) skipped",
        entries.len(),
        total,
        failed,
        report.failures.len()
    );

    let results: Vec<AnalysisResult> = entries.iter().map(|entry| entry.result.clone()).collect();
    let summary = summarize(&results);
    if entries.len() > 1 {
        println!(
            "Average score {} | best {} | needs work {}",
            format_float(summary.overall_score, 1),
            summary.best_performing.as_deref().unwrap_or("-"),
            summary.need_improvement.as_deref().unwrap_or("-")
        );
        for issue in &summary.common_issues {
            println!("Common issue: {}", issue);
        }
    }

    if args.json {
        let path = write_report(&analyzer.config().output_dir, summary, &entries)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn display_title(content: &Content) -> String {
    if !content.title.trim().is_empty() {
        return content.title.clone();
    }
    content
        .source_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| content.id.clone())
}

fn print_entry(entry: &AnalysisEntry) {
    let result: &AnalysisResult = &entry.result;
    let score = &result.score;
    let breakdown = &score.breakdown;

    println!(
        "Score: {} ({})",
        format_float(score.total, 1),
        score.level.label()
    );
    println!(
        "Breakdown: content {} | engagement {} | visual {} | title {} | readability {} | trend {}",
        format_float(breakdown.content_quality, 1),
        format_float(breakdown.engagement, 1),
        format_float(breakdown.visual, 1),
        format_float(breakdown.title, 1),
        format_float(breakdown.readability, 1),
        format_float(breakdown.trend_relevance, 1)
    );
    println!("{}", score.reasoning);
    println!(
        "Text: {} words | {} sentences | {} paragraphs | flesch {} | {}s read",
        result.text.word_count,
        result.text.sentence_count,
        result.text.paragraph_count,
        format_float(result.readability.flesch_score, 1),
        result.readability.reading_time
    );
    println!(
        "Sentiment: {:?} ({}, confidence {})",
        result.sentiment.overall,
        format_float(result.sentiment.score, 2),
        format_float(result.sentiment.confidence, 2)
    );
    if !entry.topics.is_empty() {
        println!("Topics: {}", entry.topics.join(", "));
    }

    if !entry.warnings.is_empty() {
        println!("Warnings:");
        for warning in &entry.warnings {
            println!("- {}", warning);
        }
    }

    if !result.suggestions.is_empty() {
        println!("Suggestions:");
        for suggestion in &result.suggestions {
            println!(
                "- [{}] {}: {}",
                suggestion.priority.label(),
                suggestion.kind.label(),
                suggestion.recommended
            );
        }
    }

    if let Some(advice) = &entry.advice {
        println!("\nAdvice:\n{}", advice);
    }
}

fn write_report(
    output_dir: &Path,
    summary: BatchSummary,
    entries: &[AnalysisEntry],
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let path = output_dir.join(REPORT_FILE);
    let report = BatchReport {
        generated_at: chrono::Utc::now(),
        summary,
        results: entries,
    };
    let payload = serde_json::to_string_pretty(&report)?;
    std::fs::write(&path, payload).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

fn run_init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite",
            args.path.display()
        );
    }
    Config::default().write(&args.path)?;
    println!("Wrote default config to {}", args.path.display());
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
