//! Headless demo driving a simulated chat and feed through the scroll engine.

mod config;
mod list;
mod logging;
mod simulation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use scroll_logging::scroll_info;

use crate::logging::{LogDestination, LogSettings};

/// Scripted walk through a simulated chat and feed.
#[derive(Parser, Debug)]
#[command(name = "scroll_demo")]
#[command(version)]
pub struct Args {
    /// RON config file; missing or invalid files fall back to defaults
    #[arg(default_value = "demo.ron")]
    pub config: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log to the file only
    #[arg(short, long, conflicts_with = "no_log_file")]
    pub quiet: bool,

    /// Log to the terminal only
    #[arg(long)]
    pub no_log_file: bool,

    /// Log file path
    #[arg(long, default_value = "./scroll_demo.log")]
    pub log_file: PathBuf,
}

impl Args {
    fn log_settings(&self) -> LogSettings {
        let destination = if self.quiet {
            LogDestination::File
        } else if self.no_log_file {
            LogDestination::Terminal
        } else {
            LogDestination::Both
        };
        LogSettings {
            destination,
            level: if self.verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            file: self.log_file.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::initialize(&args.log_settings());
    let config = config::load_config(&args.config);

    // All surface state lives on one thread; loads interleave at await points.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to build the tokio runtime")?;
    let summary = runtime.block_on(simulation::run(&config))?;

    scroll_info!("demo finished: {:?}", summary);
    println!(
        "chat: {} rows ({} history pages, anchor held: {}, followed: {})",
        summary.chat_rows,
        summary.history_pages_loaded,
        summary.anchor_held,
        summary.followed_new_message
    );
    println!(
        "feed: {} rows ({} pages, refreshed: {})",
        summary.feed_rows, summary.feed_pages_loaded, summary.refreshed
    );
    Ok(())
}
