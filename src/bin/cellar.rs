//! cellar - Interactive TUI for a personal beer inventory.
//!
//! Records live in a PostgreSQL table owned per user; the UI lists,
//! searches, filters and edits them.
//!
//! Usage:
//!   cellar                  # connect using PG* environment variables
//!   cellar --demo           # in-memory demo data, no server needed
//!   cellar --table ales     # use a different table
//!   cellar --no-tls         # plain connection (local development)

use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cellar::auth::{EnvIdentity, IdentityProvider, StaticIdentity};
use cellar::prefs::Prefs;
use cellar::store::{MemoryStore, PgStore, RecordStore};
use cellar::tui::App;

/// Interactive TUI for a personal beer inventory.
#[derive(Parser)]
#[command(name = "cellar", about = "Personal beer inventory")]
struct Args {
    /// Run against in-memory demo data instead of PostgreSQL.
    #[arg(long)]
    demo: bool,

    /// Table holding the records.
    #[arg(long, default_value = "beers")]
    table: String,

    /// Disable TLS for the PostgreSQL connection.
    #[arg(long)]
    no_tls: bool,

    /// Write tracing output to this file (filtered via RUST_LOG).
    /// Without it, logging is disabled - the terminal belongs to the TUI.
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,
}

fn main() {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error: cannot open log file '{}': {}", path, e);
                std::process::exit(1);
            }
        };
        let file = Arc::new(file);
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(move || file.clone())
            .with_ansi(false)
            .init();
    }

    let (store, identity): (Box<dyn RecordStore>, Box<dyn IdentityProvider>) = if args.demo {
        (
            Box::new(MemoryStore::demo("demo")),
            Box::new(StaticIdentity::new("demo", "demo@cellar.local")),
        )
    } else {
        let store = match PgStore::from_env(&args.table, !args.no_tls) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!("Set PGHOST/PGUSER/PGPASSWORD/PGDATABASE, or run with --demo");
                std::process::exit(1);
            }
        };
        (Box::new(store), Box::new(EnvIdentity::new()))
    };

    let prefs = Prefs::load_default();
    let app = App::new(prefs);

    if let Err(e) = app.run(store, identity, Duration::from_secs(2)) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
