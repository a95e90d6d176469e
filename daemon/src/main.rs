//! `seed-ledger`: command-line host for the SEED token state machine.

mod commands;
mod config;

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use seed_store_lmdb::LmdbEnvironment;
use seed_token::TokenEngine;
use seed_types::Timestamp;
use seed_utils::LogFormat;

use crate::config::LedgerConfig;

#[derive(Parser)]
#[command(name = "seed-ledger", about = "SEED token ledger")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "SEED_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for ledger storage.
    #[arg(long, env = "SEED_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "SEED_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "SEED_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Apply a file of JSON action requests, one per line.
    Apply {
        file: PathBuf,

        /// Execution time in Unix seconds (defaults to the system clock).
        #[arg(long)]
        now: Option<u64>,
    },
    /// Print the rows of a table within a scope.
    Table {
        /// One of "stat", "accounts", "stake", "refund".
        table: String,
        /// Symbol code for "stat", owner account otherwise.
        scope: String,
    },
    /// Check supply conservation for one currency, or all of them.
    Audit { code: Option<String> },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LedgerConfig::from_toml_file(path)?,
        None => LedgerConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    seed_utils::init_logging(config.log_format, &config.log_level)?;
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let store = LmdbEnvironment::open(&config.data_dir, config.map_size)
        .with_context(|| format!("opening ledger at {}", config.data_dir.display()))?;
    let engine = TokenEngine::new(store, config.params);
    tracing::debug!(
        refund_delay = %seed_utils::format_duration(engine.params().refund_delay_secs),
        refund_window = ?engine.params().refund_window,
        "token engine ready"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Apply { file, now } => {
            let now = now.map(Timestamp::new).unwrap_or_else(Timestamp::now);
            let input = File::open(&file)
                .with_context(|| format!("opening action file {}", file.display()))?;
            let summary = commands::apply_lines(&engine, BufReader::new(input), now, &mut out)?;
            tracing::info!(
                accepted = summary.accepted,
                rejected = summary.rejected,
                "applied {}",
                file.display()
            );
        }
        Command::Table { table, scope } => {
            commands::print_table(&engine, &table, &scope, Timestamp::now(), &mut out)?;
        }
        Command::Audit { code } => {
            if !commands::print_audit(&engine, code.as_deref(), &mut out)? {
                anyhow::bail!("supply audit does not balance");
            }
        }
    }

    Ok(())
}
