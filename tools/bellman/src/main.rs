//! Bellman - interactive alarm clock shell for Chime
//!
//! Registers weekly alarms, lists, snoozes and deletes them, and keeps the
//! background reconciliation loop ticking for the lifetime of the session.

mod config;
mod console;
mod repl;

use crate::config::Config;
use crate::console::ConsoleNotifier;
use anyhow::Result;
use chime_alarms::{AlarmRegistry, AlarmScheduler, SystemClock};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Parser)]
#[command(name = "bellman")]
#[command(about = "Bellman - Chime alarm clock shell")]
#[command(long_about = "Bellman - Chime alarm clock shell

Runs an interactive session over the alarm registry while the background
scheduler checks the wall clock once a minute.

Commands inside the shell:
  add       Register an alarm (time + day of week)
  del       Delete an alarm by id or by time and day
  snooze    Push an alarm forward 5 minutes (max 3 times)
  reset     Clear an alarm's snooze state
  list      Show all alarms (optionally as JSON)
  now       Show the current time
  check     Run a reconciliation pass immediately
  status    Show scheduler status

Use 'help' inside the shell for details.")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Configuration file path (default: ./bellman.toml if present)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Reconciliation period in seconds (overrides config)
    #[arg(long)]
    tick_secs: Option<u64>,
}

fn print_banner() {
    println!("{}", "╔══════════════════════════════════════╗".bright_blue());
    println!("{}", "║      Bellman - Chime Alarm Shell     ║".bright_blue());
    println!("{}", "╚══════════════════════════════════════╝".bright_blue());
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure colored output
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(tick_secs) = cli.tick_secs {
        config.tick_secs = tick_secs;
    }
    debug!("Configuration: {:?}", config);

    let registry = Arc::new(AlarmRegistry::new(Arc::new(ConsoleNotifier)));
    let scheduler = Arc::new(AlarmScheduler::new(
        Arc::clone(&registry),
        Arc::new(SystemClock),
        Duration::from_secs(config.tick_secs),
    ));

    scheduler.start();

    if !cli.no_color {
        print_banner();
    }

    // The REPL is synchronous; run it off the runtime so the scheduler
    // keeps ticking underneath.
    let repl_registry = Arc::clone(&registry);
    let repl_scheduler = Arc::clone(&scheduler);
    let history = config.history_file.clone();
    tokio::task::spawn_blocking(move || {
        repl::run(&repl_registry, &repl_scheduler, history.as_deref())
    })
    .await??;

    scheduler.shutdown().await;
    Ok(())
}
