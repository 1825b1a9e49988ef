use clap::Parser;
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use std::process::exit;

use tartrace::{trace, TracerConfig};

#[derive(Parser, Debug)]
struct Args {
    /// JSON-lines file of committed instructions
    #[clap()]
    input: PathBuf,
    /// Trace output file, stdout if not given
    #[clap(short, long)]
    output: Option<PathBuf>,
    /// Print unresolved register entries as invalid when non-zero,
    /// overrides TARTRACE_VERBOSITY
    #[clap(short, long)]
    verbosity: Option<u8>,
    /// Prefix for every trace line, overrides TARTRACE_PREFIX
    #[clap(short, long)]
    prefix: Option<String>,
    /// Log level
    #[clap(short, long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() {
    let args = Args::parse();

    SimpleLogger::new()
        .with_level(args.log_level)
        .init()
        .unwrap();

    if !args.input.exists() {
        error!("Input {:?} does not exist", args.input);
        exit(1);
    }

    let mut config = TracerConfig::from_env();
    if let Some(verbosity) = args.verbosity {
        config.verbosity = verbosity;
    }
    if let Some(prefix) = args.prefix {
        config.prefix = prefix;
    }
    match trace(args.input, args.output, config) {
        Ok(count) => info!("Traced {} instructions", count),
        Err(e) => {
            error!("Tracing failed: {}", e);
            exit(1);
        }
    }
}
