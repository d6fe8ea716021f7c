use clap::{Args, Parser, Subcommand};
use std::collections::{HashMap, HashSet};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use campaign_engine::config::EngineConfig;
use campaign_engine::engine::{
    classify, rank_days, rank_hours, refine, AudienceType, DecisionContext, EngagementSample,
    ForecastBuilder, ForecastInput, ProductSignals, ReadinessFactor, ReadinessScorer,
};
use campaign_engine::{analyze, CampaignInput};

#[derive(Parser)]
#[command(name = "campaign-engine", about = "Marketing campaign decision engine")]
struct Cli {
    /// Path to an engine.toml; falls back to ENGINE_CONFIG_PATH, then defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank the best posting days or hours from an engagement sample feed.
    BestTimes(BestTimesArgs),
    /// Pick the psychological angle for a product/audience/platform context.
    Classify(ClassifyArgs),
    /// Score drop readiness from a weighted factor set.
    Readiness(ReadinessArgs),
    /// Build a worst/likely/best ROI range and horizon projections.
    Forecast(ForecastArgs),
    /// Run every component over one combined JSON input.
    Report(ReportArgs),
}

#[derive(Args, Debug, Clone)]
struct BestTimesArgs {
    /// JSON array of engagement samples; stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Bucket by "day" or "hour".
    #[arg(long, default_value = "day")]
    by: String,
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Args, Debug, Clone)]
struct ClassifyArgs {
    #[arg(long, default_value = "cold")]
    audience: String,
    #[arg(long)]
    platform: String,
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value_t = 0.0)]
    price: f64,
    #[arg(long, default_value_t = 0)]
    stock_level: u32,
    #[arg(long)]
    low_stock: bool,
    #[arg(long, default_value_t = 0)]
    abandoned_checkouts: u32,
    #[arg(long)]
    tag: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct ReadinessArgs {
    /// JSON array of readiness factors; stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct ForecastArgs {
    #[arg(long)]
    estimate: f64,
    #[arg(long, default_value_t = 70.0)]
    confidence: f64,
    #[arg(long, default_value_t = 1000.0)]
    budget: f64,
}

#[derive(Args, Debug, Clone)]
struct ReportArgs {
    /// Combined campaign input as JSON; stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
}

fn main() {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, _) = EngineConfig::load(cli.config).map_err(|err| err.to_string())?;

    match cli.command {
        Command::BestTimes(args) => run_best_times(args, &config),
        Command::Classify(args) => run_classify(args),
        Command::Readiness(args) => run_readiness(args, &config),
        Command::Forecast(args) => run_forecast(args, &config),
        Command::Report(args) => run_report(args, &config),
    }
}

fn run_best_times(args: BestTimesArgs, config: &EngineConfig) -> Result<(), String> {
    let payload = read_payload(args.file)?;
    let samples: Vec<EngagementSample> =
        serde_json::from_str(&payload).map_err(|err| format!("invalid sample feed: {}", err))?;
    let top_n = args.top.unwrap_or(config.ranking.top_n).max(1);

    match args.by.to_lowercase().as_str() {
        "day" => {
            let ranked = rank_days(&samples, top_n);
            if ranked.is_empty() {
                println!("No samples; nothing to rank.");
            }
            for (index, bucket) in ranked.iter().enumerate() {
                println!(
                    "{}. {} — avg engagement {} ({} samples)",
                    index + 1,
                    bucket.bucket,
                    format_float(bucket.average_engagement, 1),
                    bucket.sample_count
                );
            }
        }
        "hour" => {
            let ranked = rank_hours(&samples, top_n);
            if ranked.is_empty() {
                println!("No samples; nothing to rank.");
            }
            for (index, bucket) in ranked.iter().enumerate() {
                println!(
                    "{}. {:02}:00 — avg engagement {} ({} samples)",
                    index + 1,
                    bucket.bucket,
                    format_float(bucket.average_engagement, 1),
                    bucket.sample_count
                );
            }
        }
        other => return Err(format!("invalid bucket type (day|hour): {}", other)),
    }

    Ok(())
}

fn run_classify(args: ClassifyArgs) -> Result<(), String> {
    let audience = AudienceType::from_str(&args.audience)
        .ok_or_else(|| format!("invalid audience type: {}", args.audience))?;
    let context = DecisionContext {
        audience,
        platform: args.platform,
        product: ProductSignals {
            low_stock: args.low_stock,
            stock_level: args.stock_level,
            abandoned_checkouts: args.abandoned_checkouts,
            category: args.category,
            price: args.price,
            tags: args.tag.into_iter().collect::<HashSet<String>>(),
        },
    };

    let label = classify(&context).map_err(|err| err.to_string())?;
    let refined = refine(label, &context.platform);
    println!("Angle: {}", refined.label());
    Ok(())
}

fn run_readiness(args: ReadinessArgs, config: &EngineConfig) -> Result<(), String> {
    let payload = read_payload(args.file)?;
    let factors: Vec<ReadinessFactor> =
        serde_json::from_str(&payload).map_err(|err| format!("invalid factor list: {}", err))?;

    let scorer = ReadinessScorer::new(config.readiness.clone());
    let result = scorer
        .score(&factors, &suggestion_catalog())
        .map_err(|err| err.to_string())?;

    println!(
        "Readiness: {} ({})",
        format_float(result.composite_score, 1),
        result.tier.label()
    );
    if result.weight_sum_warning {
        println!("Warning: factor weights do not sum to 1.0");
    }
    if !result.recommendations.is_empty() {
        println!("\nRecommendations:");
        for recommendation in result.recommendations {
            println!("- {}", recommendation);
        }
    }
    Ok(())
}

fn run_forecast(args: ForecastArgs, config: &EngineConfig) -> Result<(), String> {
    let input = ForecastInput {
        point_estimate: args.estimate,
        confidence_level: args.confidence,
    };
    let builder = ForecastBuilder::new(config.forecast.clone());
    let range = builder.build_range(&input).map_err(|err| err.to_string())?;
    let projections = builder
        .project_horizons(&input, &config.forecast.horizons, args.budget)
        .map_err(|err| err.to_string())?;

    println!(
        "ROI range: worst {}x | likely {}x | best {}x",
        format_float(range.worst_case, 2),
        format_float(range.most_likely, 2),
        format_float(range.best_case, 2)
    );
    println!("\nProjections:");
    for (horizon, projection) in projections {
        println!(
            "  {}: roi {}x | revenue {} | spend {}",
            horizon,
            format_float(projection.estimate, 2),
            format_float(projection.revenue, 2),
            format_float(projection.spend, 2)
        );
    }
    Ok(())
}

fn run_report(args: ReportArgs, config: &EngineConfig) -> Result<(), String> {
    let payload = read_payload(args.file)?;
    let input: CampaignInput =
        serde_json::from_str(&payload).map_err(|err| format!("invalid campaign input: {}", err))?;

    let report = analyze(&input, config, &suggestion_catalog()).map_err(|err| err.to_string())?;

    println!("Angle: {}", report.angle.label());
    println!(
        "Readiness: {} ({})",
        format_float(report.readiness.composite_score, 1),
        report.readiness.tier.label()
    );
    println!(
        "ROI range: worst {}x | likely {}x | best {}x",
        format_float(report.range.worst_case, 2),
        format_float(report.range.most_likely, 2),
        format_float(report.range.best_case, 2)
    );

    if !report.best_days.is_empty() {
        println!("\nBest days:");
        for bucket in &report.best_days {
            println!(
                "  {} — {} ({} samples)",
                bucket.bucket,
                format_float(bucket.average_engagement, 1),
                bucket.sample_count
            );
        }
    }
    if !report.best_hours.is_empty() {
        println!("\nBest hours:");
        for bucket in &report.best_hours {
            println!(
                "  {:02}:00 — {} ({} samples)",
                bucket.bucket,
                format_float(bucket.average_engagement, 1),
                bucket.sample_count
            );
        }
    }

    println!("\nProjections:");
    for (horizon, projection) in &report.projections {
        println!(
            "  {}: roi {}x | revenue {} | spend {}",
            horizon,
            format_float(projection.estimate, 2),
            format_float(projection.revenue, 2),
            format_float(projection.spend, 2)
        );
    }

    if !report.readiness.recommendations.is_empty() {
        println!("\nRecommendations:");
        for recommendation in &report.readiness.recommendations {
            println!("- {}", recommendation);
        }
    }
    if !report.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &report.warnings {
            println!("- {:?}", warning);
        }
    }

    Ok(())
}

/// The improvement-text catalog lives with the caller: the engine maps
/// factor names through it but never invents copy of its own.
fn suggestion_catalog() -> HashMap<String, String> {
    let entries = [
        ("creative", "Refresh the creative set; rotate in at least two new variants before launch."),
        ("audience", "Tighten audience targeting; exclude segments with no prior engagement."),
        ("inventory", "Top up stock on hero SKUs; a drop that sells out in hours wastes paid reach."),
        ("timing", "Schedule the drop into a top-ranked engagement window."),
        ("budget", "Shift budget toward the platform with the strongest recent ROI."),
        ("landing_page", "Cut landing page load time and move the buy button above the fold."),
    ];
    entries
        .iter()
        .map(|(name, text)| (name.to_string(), text.to_string()))
        .collect()
}

fn read_payload(path: Option<PathBuf>) -> Result<String, String> {
    if let Some(path) = path {
        return std::fs::read_to_string(&path)
            .map_err(|err| format!("failed reading {}: {}", path.display(), err));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err("missing input: pass --file or pipe JSON on stdin".to_string());
    }
    Ok(trimmed.to_string())
}

fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
