use clap::Parser;
use cluster_subnet_check::error::AnalysisError;
use cluster_subnet_check::ingest::{collect_records, read_records};
use cluster_subnet_check::logging::{init_logging, parse_level};
use cluster_subnet_check::output::{render, OutputFormat};
use cluster_subnet_check::{analyze_with, Config};
use log::LevelFilter;
use std::error::Error;
use std::process::ExitCode;

/// Exit status when no usable data could be analyzed.
const EXIT_NO_DATA: u8 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check IPv4 subnet compatibility of interfaces across a cluster", long_about = None)]
struct Cli {
    /// Input file: JSON records or `node: iface STATE addr/len` text.
    /// Defaults to interfaces_<date>.txt
    #[arg(short, long, conflicts_with = "collect")]
    input: Option<String>,

    /// Collection command to run instead of reading a file
    #[arg(short, long)]
    collect: Option<String>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Interface name to skip, may be repeated (replaces the default list)
    #[arg(long)]
    ignore: Vec<String>,

    /// Root log level (trace, debug, info, warn, error, off). Replaces the level
    /// in log4rs.yml, defaults to warn without that file
    #[arg(long, value_parser = parse_level)]
    log_level: Option<LevelFilter>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.log_level)?;
    if cli.no_color {
        colored::control::set_override(false);
    }
    log::info!("#Start main()");

    let mut config = Config::from_env();
    if !cli.ignore.is_empty() {
        config.ignored_interfaces = cli.ignore.clone();
    }
    if cli.collect.is_some() {
        config.collect_cmd = cli.collect.clone();
    }

    let parsed = match (&cli.input, &config.collect_cmd) {
        (None, Some(cmd)) => collect_records(cmd),
        (input, _) => read_records(input.as_deref()),
    };
    let parsed = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            log::error!("{e}");
            eprintln!("ERROR: {e}");
            return Ok(ExitCode::from(EXIT_NO_DATA));
        }
    };
    if !parsed.rejected.is_empty() {
        log::warn!("{} input lines could not be parsed", parsed.rejected.len());
    }

    match analyze_with(&parsed.records, &config) {
        Ok(report) => {
            println!("{}", render(&report, cli.format)?);
            Ok(if report.passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Err(AnalysisError::EmptyInput) => {
            eprintln!("FAIL: no data, {} records read", parsed.records.len());
            Ok(ExitCode::from(EXIT_NO_DATA))
        }
        Err(e) => Err(e.into()),
    }
}
