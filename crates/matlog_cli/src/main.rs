//! CLI entry point for the MatLog journal.
//!
//! # Responsibility
//! - Drive the same journal use-cases as the mobile shell from a terminal.
//! - Keep a `ping` probe to validate core crate wiring without FFI setup.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use matlog_core::db::open_db;
use matlog_core::{
    Entry, JournalService, JournalStore, MoveDictionary, MoveInfoLookup, SqliteKvStore,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "matlog", version, about = "Training journal for practiced moves")]
struct Cli {
    /// SQLite database holding the journal
    #[arg(long, env = "MATLOG_DB_PATH", default_value = "matlog_journal.sqlite3")]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "MATLOG_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "MATLOG_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Record today's move and note
    Add {
        #[arg(long = "move")]
        move_name: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// List entries in the order they were recorded
    List,
    /// Delete the entry at a 0-based position
    Delete {
        #[arg(allow_hyphen_values = true)]
        index: i64,
    },
    /// Delete every entry
    Clear {
        /// Confirm clearing the whole journal
        #[arg(long)]
        yes: bool,
    },
    /// Show the stored description for a move
    Info { move_name: String },
    /// Print core linkage info
    Ping,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(matlog_core::level_from_env);
        matlog_core::init_logging(&level, log_dir).context("failed to initialize logging")?;
    }

    match &cli.cmd {
        Cmd::Ping => {
            println!("matlog_core ping={}", matlog_core::ping());
            println!("matlog_core version={}", matlog_core::core_version());
            return Ok(());
        }
        Cmd::Info { move_name } => {
            println!("{}", MoveDictionary::builtin().resolve(move_name));
            return Ok(());
        }
        Cmd::Clear { yes: false } => {
            bail!("refusing to clear the journal without --yes");
        }
        _ => {}
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open journal at `{}`", cli.db.display()))?;
    let kv = SqliteKvStore::try_new(&conn)?;
    let mut service = JournalService::new(JournalStore::new(kv));

    match cli.cmd {
        Cmd::Add { move_name, note } => {
            let entry = service.record_entry(move_name, note)?;
            info!("event=cli_add module=cli status=ok");
            print_entry(None, &entry);
        }
        Cmd::List => {
            let entries = service.entries()?;
            if entries.is_empty() {
                println!("No notes yet.");
            }
            for (index, entry) in entries.iter().enumerate() {
                print_entry(Some(index), entry);
            }
        }
        Cmd::Delete { index } => {
            let remaining = service.delete_entry(index)?;
            println!("Deleted entry {index}; {} left.", remaining.len());
        }
        Cmd::Clear { yes: true } => {
            service.clear_journal()?;
            println!("Journal cleared!");
        }
        Cmd::Clear { yes: false } | Cmd::Info { .. } | Cmd::Ping => {}
    }

    Ok(())
}

fn print_entry(index: Option<usize>, entry: &Entry) {
    match index {
        Some(index) => println!("[{index}] {}", entry.date),
        None => println!("{}", entry.date),
    }
    println!("    Move: {}", entry.move_name);
    println!("    Info: {}", entry.info);
    for line in entry.note.lines() {
        println!("    {line}");
    }
    println!();
}
