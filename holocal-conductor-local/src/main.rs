//! holocal-conductor-local - a local conductor for holocal
//!
//! This binary speaks the holocal bridge protocol: one JSON zome call per
//! line on stdin, one JSON response per line on stdout. Entries are kept per
//! DNA in:
//!   ~/.local/share/holocal/conductor/{dna_hash}.json

mod store;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use holocal_core::zome::ZomeCall;
use holocal_core::zome::protocol::Response;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "holocal-conductor-local")]
#[command(about = "Serve the calendar_events zome from local JSON files")]
struct Cli {
    /// Directory holding one store file per DNA
    #[arg(long)]
    store_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let store_dir = match cli.store_dir {
        Some(dir) => dir,
        None => store::default_store_dir()?,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ZomeCall>(&line) {
            Ok(call) => {
                info!(fn_name = %call.fn_name, dna = %call.cell_id.dna_hash(), "zome call");
                handle_call(&store_dir, &call)
            }
            Err(e) => Response::error(&format!("Failed to parse request: {}", e)),
        };

        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }

    Ok(())
}

fn handle_call(store_dir: &std::path::Path, call: &ZomeCall) -> String {
    match store::call(store_dir, call) {
        Ok(data) => Response::success(data),
        Err(e) => Response::error(&format!("{:#}", e)),
    }
}
