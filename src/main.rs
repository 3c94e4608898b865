// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessmonitor CLI entry point.

use accessmonitor::engine::Engine;
use accessmonitor::monitor::Frequency;
use accessmonitor::record::ComplianceLevel;
use accessmonitor::report::{generate_report, OutputFormat};
use accessmonitor::storage::Storage;
use accessmonitor::Config;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Accessibility compliance scanner and drift monitor
#[derive(Parser)]
#[command(name = "accessmonitor")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "accessmonitor.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan one page and print the result
    Scan {
        /// Page URL (bare hosts default to https)
        url: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,
    },

    /// List past scans, most recent first
    History {
        /// Substring filter on the target URL
        #[arg(long)]
        target: Option<String>,

        /// Maximum records to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show the score trend for a hostname
    Trend {
        /// Any URL on the target host
        url: String,
    },

    /// Show fixed/introduced issues between consecutive scans
    Diff {
        /// Any URL on the target host
        url: String,
    },

    /// Manage scanning subscriptions
    Monitor {
        #[command(subcommand)]
        command: MonitorCommands,
    },

    /// Run the periodic monitoring loop
    Watch,
}

#[derive(Subcommand)]
enum MonitorCommands {
    /// Register a target for periodic scanning
    Register {
        /// Page URL
        url: String,

        /// Notification address
        #[arg(long)]
        contact: String,

        /// Scan frequency
        #[arg(long, default_value = "weekly")]
        frequency: FrequencyArg,
    },

    /// Deactivate a monitor by id
    Deactivate {
        /// Monitor id
        id: Uuid,
    },

    /// List registered monitors
    List,
}

/// Scan frequency CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FrequencyArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<FrequencyArg> for Frequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Daily => Frequency::Daily,
            FrequencyArg::Weekly => Frequency::Weekly,
            FrequencyArg::Monthly => Frequency::Monthly,
        }
    }
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("accessmonitor=debug")
    } else {
        EnvFilter::new("accessmonitor=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.config)?;
    let storage = Storage::new(config.store.data_dir.clone());
    let mut engine = Engine::with_storage(&config, storage)?;

    match cli.command {
        Commands::Scan { url, format } => {
            let record = engine.scan(&url).await?;
            println!("{}", generate_report(&record, format.into()));

            if record.level == ComplianceLevel::NonCompliant {
                std::process::exit(1);
            }
        }

        Commands::History { target, limit } => {
            let records = engine.history(target.as_deref(), limit);
            if records.is_empty() {
                println!("No scans recorded.");
            }
            for record in records {
                println!(
                    "{}  {}  score {:>3}  {}  {}",
                    record.id,
                    record.checked_at.format("%Y-%m-%d %H:%M"),
                    record.score,
                    record.level,
                    record.url
                );
            }
        }

        Commands::Trend { url } => {
            let report = engine.trend(&url)?;
            for point in &report.scans {
                println!(
                    "{}  score {:>3}  {} issue(s)",
                    point.checked_at.format("%Y-%m-%d %H:%M"),
                    point.score,
                    point.issues
                );
            }
            match report.trend {
                Some(summary) => println!(
                    "\nTrend: {} ({} -> {}, {:+} points, {:+} issues)",
                    summary.direction,
                    summary.first_score,
                    summary.last_score,
                    summary.score_delta,
                    summary.issue_delta
                ),
                None => println!("Not enough history for a trend (need at least 2 scans)."),
            }
        }

        Commands::Diff { url } => {
            let diffs = engine.diffs(&url)?;
            if diffs.is_empty() {
                println!("Not enough history to diff (need at least 2 scans).");
            }
            for diff in diffs {
                println!("{}:", diff.checked_at.format("%Y-%m-%d %H:%M"));
                for rule in &diff.fixed {
                    println!("  fixed       {}", rule);
                }
                for rule in &diff.introduced {
                    println!("  introduced  {}", rule);
                }
                if diff.fixed.is_empty() && diff.introduced.is_empty() {
                    println!("  no rule-level changes");
                }
            }
        }

        Commands::Monitor { command } => match command {
            MonitorCommands::Register {
                url,
                contact,
                frequency,
            } => {
                let monitor = engine.register_monitor(&url, &contact, frequency.into())?;
                println!(
                    "Registered monitor {} for {} ({})",
                    monitor.id, monitor.url, monitor.frequency
                );
            }

            MonitorCommands::Deactivate { id } => {
                engine.deactivate_monitor(id)?;
                println!("Deactivated monitor {}", id);
            }

            MonitorCommands::List => {
                let monitors = engine.monitors();
                if monitors.is_empty() {
                    println!("No monitors registered.");
                }
                for monitor in monitors {
                    println!(
                        "{}  {}  {}  {}  last score: {}  next due: {}",
                        monitor.id,
                        if monitor.active { "active " } else { "inactive" },
                        monitor.frequency,
                        monitor.url,
                        monitor
                            .last_score
                            .map(|s| s.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        monitor.next_due.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        },

        Commands::Watch => {
            accessmonitor::scheduler::run(&mut engine, &config.scheduler).await;
        }
    }

    Ok(())
}
