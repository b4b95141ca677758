mod error;
mod organizer;
mod scanner;
mod types;

use chrono::Local;
use clap::Parser;
use colored::Colorize;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::path::PathBuf;
use types::{FailurePolicy, RunConfiguration};

/// Move files older than a week into {year}-{month} subdirectories
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The directory to manage
    #[arg(long, short = 'D', value_name = "PATH")]
    dir: PathBuf,

    /// Don't actually make the changes, just say what would be done
    #[arg(long, short = 'n')]
    dry_run: bool,

    /// Verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Log failed moves and carry on instead of stopping at the first one
    #[arg(long, short = 'k')]
    keep_going: bool,
}

impl Args {
    fn into_config(self) -> RunConfiguration {
        let policy = if self.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::FailFast
        };
        RunConfiguration::new(self.dir)
            .dry_run(self.dry_run)
            .verbose(self.verbose)
            .failure_policy(policy)
    }
}

fn logger_builder(verbose: bool, rust_log: Option<&str>) -> Builder {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stderr)
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false);

    // RUST_LOG, when set, wins over --verbose, except for dry-run previews
    if let Some(filters) = rust_log {
        builder.parse_filters(filters);
    }
    builder.filter_module(organizer::PLAN_TARGET, LevelFilter::Info);
    builder
}

fn main() {
    let config = Args::parse().into_config();
    logger_builder(config.verbose, std::env::var("RUST_LOG").ok().as_deref()).init();

    match organizer::run(&config, Local::now()) {
        Ok(summary) => {
            if summary.failed > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            std::process::exit(1);
        }
    }
}
