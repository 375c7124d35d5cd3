//! huelab - perceptual color analysis CLI
//!
//! Front end for the hue-engine facade: single-color analysis, batch
//! analysis, representation conversion, and engine health.

use std::io::BufRead;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hue_engine::{
    Analysis, AnalyzeOptions, BatchOptions, BatchOutcome, CacheConfig, CancelToken, DeltaE,
    Engine, EngineConfig, TargetSpace,
};

#[derive(Parser)]
#[command(name = "huelab")]
#[command(author, version, about = "Perceptual color analysis engine")]
#[command(long_about = "
Analyze colors against a named reference palette using perceptual
(Delta E) color difference metrics.

Examples:
  huelab analyze '#4682B4'                   # 5 nearest palette colors
  huelab analyze 4682B4 -a cie94 -k 3        # different metric, fewer matches
  huelab batch 4682B4 FF0000 00FF00          # many colors, in parallel
  huelab batch --file colors.txt --json      # one hex per line, JSON out
  huelab convert '#4682B4' --to lab          # plain conversion
  huelab health                              # backend/cache/index status
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    /// Number of batch worker threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Directory for the persistent cache tier (unset = memory-only)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Cache entry time-to-live in seconds
    #[arg(long, global = true, default_value = "3600")]
    cache_ttl: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one color against the reference palette
    #[command(visible_alias = "a")]
    Analyze(AnalyzeArgs),

    /// Analyze many colors across the worker pool
    #[command(visible_alias = "b")]
    Batch(BatchArgs),

    /// Convert a color between representations
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Show engine health: backend, index, cache
    Health,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Color to analyze, as RRGGBB hex (leading # optional)
    color: String,

    /// Distance metric: cie76, cie94, or ciede2000
    #[arg(short, long, default_value = "ciede2000", value_parser = DeltaE::from_str)]
    algorithm: DeltaE,

    /// Number of nearest matches to return
    #[arg(short, default_value = "5")]
    k: usize,

    /// Skip the result cache
    #[arg(long)]
    no_cache: bool,
}

#[derive(Args)]
struct BatchArgs {
    /// Colors to analyze, as RRGGBB hex
    colors: Vec<String>,

    /// Read colors from a file, one per line ('-' for stdin)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Distance metric: cie76, cie94, or ciede2000
    #[arg(short, long, default_value = "ciede2000", value_parser = DeltaE::from_str)]
    algorithm: DeltaE,

    /// Number of nearest matches per color
    #[arg(short, default_value = "5")]
    k: usize,

    /// Skip the result cache
    #[arg(long)]
    no_cache: bool,

    /// Abort remaining work after the first failure
    #[arg(long)]
    fail_fast: bool,

    /// Batch time budget in milliseconds (elapsed budget skips the
    /// persistent cache tier)
    #[arg(long)]
    deadline_ms: Option<u64>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Color to convert, as RRGGBB hex
    color: String,

    /// Target space: hex, rgb, hsl, or lab
    #[arg(long = "to", default_value = "lab", value_parser = TargetSpace::from_str)]
    target: TargetSpace,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let engine = Engine::new(EngineConfig {
        cache: CacheConfig {
            ttl: Duration::from_secs(cli.cache_ttl),
            persistent_dir: cli.cache_dir.clone(),
            ..CacheConfig::default()
        },
        workers: cli.threads,
        ..EngineConfig::default()
    })
    .context("engine construction failed")?;
    tracing::debug!(
        backend = engine.health().backend,
        threads = cli.threads,
        "engine constructed"
    );

    match &cli.command {
        Commands::Analyze(args) => run_analyze(&engine, &cli, args),
        Commands::Batch(args) => run_batch(&engine, &cli, args),
        Commands::Convert(args) => run_convert(&engine, &cli, args),
        Commands::Health => run_health(&engine, &cli),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_analyze(engine: &Engine, cli: &Cli, args: &AnalyzeArgs) -> Result<()> {
    let options = AnalyzeOptions {
        algorithm: args.algorithm,
        k: args.k,
        use_cache: !args.no_cache,
    };
    let analysis = engine.analyze_color(&args.color, &options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

fn run_batch(engine: &Engine, cli: &Cli, args: &BatchArgs) -> Result<()> {
    let mut inputs = args.colors.clone();
    if let Some(path) = &args.file {
        inputs.extend(read_color_lines(path)?);
    }
    anyhow::ensure!(!inputs.is_empty(), "no colors given (arguments or --file)");

    let options = BatchOptions {
        analyze: AnalyzeOptions {
            algorithm: args.algorithm,
            k: args.k,
            use_cache: !args.no_cache,
        },
        fail_fast: args.fail_fast,
        deadline: args.deadline_ms.map(Duration::from_millis),
    };

    let token = CancelToken::new();
    let report = engine.analyze_batch(&inputs, &options, &token)?;
    engine.sweep_cache();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (input, outcome) in inputs.iter().zip(&report.outcomes) {
            match outcome {
                BatchOutcome::Done { analysis } => {
                    let best = &analysis.matches[0];
                    println!(
                        "{input:>10}  ->  {:<20} {}  dE {:.3}{}",
                        best.name,
                        best.hex,
                        best.distance,
                        if analysis.cached { "  (cached)" } else { "" }
                    );
                }
                BatchOutcome::Failed { error } => println!("{input:>10}  ->  error: {error}"),
                BatchOutcome::Cancelled => println!("{input:>10}  ->  cancelled"),
            }
        }
        println!(
            "{} completed, {} failed, {} cancelled",
            report.completed, report.failed, report.cancelled
        );
    }

    if report.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_convert(engine: &Engine, cli: &Cli, args: &ConvertArgs) -> Result<()> {
    let converted = engine.convert(&args.color, args.target)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&converted)?);
    } else {
        match converted {
            hue_engine::Converted::Hex(hex) => println!("{hex}"),
            hue_engine::Converted::Rgb(rgb) => println!("rgb({}, {}, {})", rgb.r, rgb.g, rgb.b),
            hue_engine::Converted::Hsl(hsl) => {
                println!("hsl({:.1}, {:.1}%, {:.1}%)", hsl.h, hsl.s, hsl.l)
            }
            hue_engine::Converted::Lab(lab) => {
                println!("lab({:.2}, {:.2}, {:.2})", lab.l, lab.a, lab.b)
            }
        }
    }
    Ok(())
}

fn run_health(engine: &Engine, cli: &Cli) -> Result<()> {
    let health = engine.health();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&health)?);
    } else {
        println!("backend:      {}", health.backend);
        println!("accelerated:  {}", health.accelerated);
        println!("index size:   {}", health.index_size);
        println!("workers:      {}", health.workers);
        println!(
            "cache:        {} in memory, {:.0}% hit ratio, persistent {}",
            health.cache.memory_entries,
            health.cache.hit_ratio * 100.0,
            if health.cache.persistent_available {
                "available"
            } else {
                "off"
            }
        );
    }
    Ok(())
}

fn print_analysis(analysis: &Analysis) {
    let input = &analysis.input;
    println!(
        "{}  rgb({}, {}, {})  hsl({:.1}, {:.1}%, {:.1}%)  lab({:.2}, {:.2}, {:.2})",
        input.hex,
        input.rgb.r,
        input.rgb.g,
        input.rgb.b,
        input.hsl.h,
        input.hsl.s,
        input.hsl.l,
        input.lab.l,
        input.lab.a,
        input.lab.b,
    );
    println!("matches ({}):", analysis.algorithm.id());
    for (rank, m) in analysis.matches.iter().enumerate() {
        println!(
            "  {:>2}. {:<24} {}  dE {:>8.4}  {}",
            rank + 1,
            m.name,
            m.hex,
            m.distance,
            m.perceptibility.label()
        );
    }
    println!(
        "confidence: {:.2}{}",
        analysis.confidence,
        if analysis.cached { "  (cached)" } else { "" }
    );
}

fn read_color_lines(path: &PathBuf) -> Result<Vec<String>> {
    let reader: Box<dyn BufRead> = if path.as_os_str() == "-" {
        Box::new(std::io::stdin().lock())
    } else {
        let file = std::fs::File::open(path)
            .with_context(|| format!("cannot open {}", path.display()))?;
        Box::new(std::io::BufReader::new(file))
    };
    let mut colors = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            colors.push(trimmed.to_string());
        }
    }
    Ok(colors)
}
