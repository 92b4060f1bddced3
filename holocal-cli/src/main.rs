mod commands;
mod render;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use holocal_core::CalendarView;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "holocal")]
#[command(about = "View and create calendar events stored in your Holochain cell")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write ~/.config/holocal/config.toml for a cell
    Init {
        /// DNA hash of the calendar cell
        #[arg(long)]
        dna: String,

        /// Your agent public key
        #[arg(long)]
        agent: String,

        /// Conductor bridge binary (looked up in PATH)
        #[arg(long)]
        conductor: Option<String>,

        /// Initial calendar view: dayGridMonth, timeGridWeek or timeGridDay
        #[arg(long)]
        view: Option<CalendarView>,
    },
    /// List all of your events
    List {
        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one event by its entry hash
    Get {
        hash: String,

        /// Print the event as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show your calendar
    Calendar {
        /// dayGridMonth, timeGridWeek or timeGridDay (defaults to the configured view)
        #[arg(long)]
        view: Option<CalendarView>,
    },
    /// Create an event
    New {
        title: String,

        /// Start date/time (e.g., "2025-03-20T15:00" or RFC 3339)
        #[arg(short, long)]
        start: String,

        /// End date/time (e.g., "2025-03-20T16:00" or RFC 3339)
        #[arg(short, long)]
        end: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            dna,
            agent,
            conductor,
            view,
        } => commands::init::run(dna, agent, conductor, view),
        Commands::List { json } => commands::list::run(json).await,
        Commands::Get { hash, json } => commands::get::run(&hash, json).await,
        Commands::Calendar { view } => commands::calendar::run(view).await,
        Commands::New { title, start, end } => commands::new::run(title, &start, &end).await,
    }
}
