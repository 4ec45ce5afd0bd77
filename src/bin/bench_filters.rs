use std::time::Instant;

use clap::Parser;
use rolling_stats::Stats;
use serde::Serialize;

use scanfilter::config::MedianMethod;
use scanfilter::median::{ColumnFilter, MedianFilter};
use scanfilter::scan::TemporalMedianFilter;
use scanfilter::simulation::{ScanNoiseConfig, generate_scans, random_stream};

#[derive(Parser, Debug)]
#[command(name = "bench_filters")]
#[command(about = "Compare heap and sort sliding-window medians", long_about = None)]
struct Args {
    /// Window sizes to benchmark (comma separated)
    #[arg(short = 'w', long, value_delimiter = ',', default_value = "5,25,125,625")]
    windows: Vec<usize>,

    /// Samples per single-stream run
    #[arg(long, default_value = "100000")]
    stream_len: usize,

    /// Scans per temporal-filter run
    #[arg(long, default_value = "1000")]
    scan_count: usize,

    /// Readings per scan
    #[arg(long, default_value = "360")]
    scan_size: usize,

    /// RNG seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Output format: text, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct TimingSummary {
    count: usize,
    mean_us: f64,
    std_dev_us: f64,
    min_us: f64,
    max_us: f64,
}

impl TimingSummary {
    fn from_stats(stats: &Stats<f64>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean_us: stats.mean,
            std_dev_us: stats.std_dev,
            min_us: stats.min,
            max_us: stats.max,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct BenchResult {
    suite: &'static str,
    method: String,
    window: usize,
    total_ms: f64,
    per_step: Option<TimingSummary>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let stream = random_stream(args.stream_len, args.seed);
    let noise = ScanNoiseConfig::default()
        .with_seed(args.seed)
        .with_gaussian(0.05)
        .with_spikes(0.02, 10.0);
    let scans = generate_scans(args.scan_count, args.scan_size, &noise);

    let mut results = Vec::new();
    for &window in &args.windows {
        for method in [MedianMethod::Heap, MedianMethod::Sort] {
            log::info!("stream: window {} method {}", window, method);
            results.push(bench_stream(&stream, window, method)?);

            log::info!("scans: window {} method {}", window, method);
            results.push(bench_scans(&scans, window, method)?);
        }
    }

    match args.format {
        OutputFormat::Text => print_text(&results),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }

    Ok(())
}

fn bench_stream(stream: &[f64], window: usize, method: MedianMethod) -> anyhow::Result<BenchResult> {
    let mut filter = ColumnFilter::new(method, window)?;
    let start = Instant::now();
    for &v in stream {
        std::hint::black_box(filter.update(v)?);
    }
    let elapsed = start.elapsed();

    Ok(BenchResult {
        suite: "stream",
        method: method.to_string(),
        window,
        total_ms: elapsed.as_secs_f64() * 1e3,
        per_step: None,
    })
}

fn bench_scans(scans: &[Vec<f64>], window: usize, method: MedianMethod) -> anyhow::Result<BenchResult> {
    let scan_size = scans.first().map_or(1, |s| s.len());
    let mut filter = TemporalMedianFilter::new(window, scan_size, method)?;
    let mut per_scan: Stats<f64> = Stats::new();

    let start = Instant::now();
    for scan in scans {
        let t = Instant::now();
        std::hint::black_box(filter.update(scan)?);
        per_scan.update(t.elapsed().as_secs_f64() * 1e6);
    }
    let elapsed = start.elapsed();

    Ok(BenchResult {
        suite: "scans",
        method: method.to_string(),
        window,
        total_ms: elapsed.as_secs_f64() * 1e3,
        per_step: TimingSummary::from_stats(&per_scan),
    })
}

fn print_text(results: &[BenchResult]) {
    println!(
        "{:<8} {:<6} {:>8} {:>12} {:>14} {:>14}",
        "suite", "method", "window", "total ms", "mean us/scan", "max us/scan"
    );
    for r in results {
        let (mean, max) = r
            .per_step
            .as_ref()
            .map_or(("-".to_string(), "-".to_string()), |s| {
                (format!("{:.2}", s.mean_us), format!("{:.2}", s.max_us))
            });
        println!(
            "{:<8} {:<6} {:>8} {:>12.3} {:>14} {:>14}",
            r.suite, r.method, r.window, r.total_ms, mean, max
        );
    }
}
