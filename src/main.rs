use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use scanfilter::config::{FilterConfig, MedianMethod, OutOfRangePolicy, RangeBounds};
use scanfilter::input::{ScanSource, TextScanSource};
use scanfilter::output::{OutputFormat, create_formatter};
use scanfilter::processing::ScanProcessor;

#[derive(Parser, Debug)]
#[command(name = "scanfilter")]
#[command(about = "Temporal median filtering for rangefinder scans", long_about = None)]
struct Args {
    /// Scan file, one scan per line (reads stdin when omitted)
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Number of past scans each median covers
    #[arg(short = 'w', long)]
    window: Option<usize>,

    /// Readings per scan (default: length of the first scan)
    #[arg(long)]
    scan_size: Option<usize>,

    /// Median implementation: heap, sort
    #[arg(short = 'm', long, value_enum)]
    method: Option<MedianMethod>,

    /// Valid reading range (e.g., "0.03..50", "..35.8")
    #[arg(short = 'r', long)]
    range: Option<RangeBounds>,

    /// Replace out-of-range readings with this value instead of clamping
    #[arg(long)]
    sentinel: Option<f64>,

    /// Skip the range stage entirely
    #[arg(long, conflicts_with_all = ["range", "sentinel"])]
    no_range: bool,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
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

    let mut config = match args.config {
        Some(ref path) => FilterConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => FilterConfig::default(),
    };
    apply_overrides(&mut config, &args);

    let mut source: Box<dyn ScanSource> = match args.input {
        Some(ref path) => Box::new(
            TextScanSource::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => Box::new(TextScanSource::new(io::stdin().lock())),
    };

    let Some(first) = source.next_scan().context("Failed to read first scan")? else {
        log::warn!("No scans on input");
        return Ok(());
    };

    let scan_size = *config.temporal.scan_size.get_or_insert(first.len());

    log::info!(
        "window {} scan size {} method {}",
        config.temporal.window_size,
        scan_size,
        config.temporal.method
    );

    let mut processor = ScanProcessor::new(&config).context("Invalid filter configuration")?;
    let formatter = create_formatter(args.format, args.verbose > 0);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if let Some(header) = formatter.header(scan_size) {
        writeln!(out, "{}", header)?;
    }

    let mut next = Some(first);
    while let Some(scan) = next {
        let filtered = processor
            .process_scan(&scan)
            .with_context(|| format!("Failed to filter scan {}", processor.scans_processed()))?;
        writeln!(out, "{}", formatter.format(&filtered))?;
        next = source.next_scan()?;
    }
    out.flush()?;

    log::info!(
        "{} scans filtered, {} readings replaced by range stage",
        processor.scans_processed(),
        processor.readings_replaced()
    );

    Ok(())
}

fn apply_overrides(config: &mut FilterConfig, args: &Args) {
    if let Some(window) = args.window {
        config.temporal.window_size = window;
    }
    if args.scan_size.is_some() {
        config.temporal.scan_size = args.scan_size;
    }
    if let Some(method) = args.method {
        config.temporal.method = method;
    }
    if let Some(bounds) = args.range {
        config.range.set_bounds(bounds);
    }
    if let Some(sentinel) = args.sentinel {
        config.range.out_of_range = OutOfRangePolicy::Sentinel(sentinel);
    }
    if args.no_range {
        config.range.min = None;
        config.range.max = None;
    }
}
