use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use flydra_health::{ConfigOverrides, FrameMonitor, MonitorConfig};

#[derive(Parser, Debug)]
#[command(name = "flydra-health")]
#[command(about = "Frame loss and missing data summary for Flydra tracking sessions")]
#[command(version)]
#[command(long_about = "Reads the newest Flydra mainbrain log and reports, per camera, how many \
frames were lost and how many arrived with missing data, as a share of the frames the camera \
should have delivered over the experiment.")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "flydra-health.toml", help = "Path to TOML configuration file")]
    config: String,

    /// Analyze this log file instead of locating the newest one
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Directory to search for log files
    #[arg(short = 'd', long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Total number of cameras used by the tracking system
    #[arg(long, value_name = "N")]
    cameras: Option<usize>,

    /// Frames per second of every camera
    #[arg(long, value_name = "N")]
    fps: Option<u32>,

    /// Experiment duration in hours
    #[arg(long, value_name = "HOURS")]
    hours: Option<f64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging (most verbose)
    #[arg(long, help = "Enable debug level logging")]
    debug: bool,

    /// Enable verbose logging (info level)
    #[arg(short, long, help = "Enable verbose info level logging")]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, help = "Enable quiet mode - only log errors")]
    quiet: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration file and exit without reading any log")]
    validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    print_config: bool,

    /// Override log format (json, pretty, compact)
    #[arg(long, value_name = "FORMAT", help = "Log output format: json, pretty, or compact")]
    log_format: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print_default_config()?;
        return Ok(());
    }

    init_logging(&args);

    info!("Starting flydra-health v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("✗ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if args.validate_config {
        info!("Configuration validation successful");
        println!("✓ Configuration is valid");
        return Ok(());
    }

    let monitor = FrameMonitor::new(config);
    let result = match &args.file {
        Some(path) => monitor.analyze_file(path),
        None => monitor.run(),
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error!("Failed to analyze log: {}", e);
            eprintln!(" * {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    info!("Overall frame health: {}", report.worst_status());
    Ok(())
}

/// Configuration file and environment, then command line overrides
fn load_config(args: &Args) -> Result<MonitorConfig> {
    let mut config = MonitorConfig::load_from_file(&args.config)?;
    overrides(args).apply(&mut config);
    config.validate()?;
    Ok(config)
}

fn overrides(args: &Args) -> ConfigOverrides {
    ConfigOverrides {
        log_directory: args.log_dir.clone(),
        camera_count: args.cameras,
        fps: args.fps,
        duration_hours: args.hours,
    }
}

fn init_logging(args: &Args) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("flydra_health={}", log_level)));

    // stdout carries the report
    let fmt_layer = match args.log_format.as_deref() {
        Some("json") => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        Some("pretty") => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(args.debug)
            .with_line_number(args.debug)
            .boxed(),
        Some("compact") | None => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
        Some(format) => {
            eprintln!("Warning: Unknown log format '{}', using default", format);
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .boxed()
        }
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();
}

/// Print default configuration in TOML format
fn print_default_config() -> Result<()> {
    println!("# flydra-health configuration file");
    println!("# Every value can be overridden with FLYDRA_HEALTH_<SECTION>__<KEY>");
    println!();
    println!("{}", toml::to_string_pretty(&MonitorConfig::default())?);
    Ok(())
}
