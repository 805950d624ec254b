//! Campus Canteen CLI - window controller and management tools.
//!
//! Every invocation is one logical window against the shared local
//! aggregate: it registers a session id, keeps it alive with the heartbeat
//! for as long as the command runs, and deregisters it on exit.
//!
//! # Usage
//!
//! ```bash
//! # Seed demo accounts, stores, and dishes
//! cc-cli seed
//!
//! # Browse stores, optionally by location
//! cc-cli stores
//! cc-cli stores --location xingan
//!
//! # Show a store's menu
//! cc-cli menu --store "Wang's Braised Pork"
//!
//! # Show a merchant's order queue
//! cc-cli orders --merchant laowang --filter in-progress
//!
//! # Show live window sessions
//! cc-cli sessions
//!
//! # Demand forecast and merchant advice (Gemini, with fallbacks)
//! cc-cli predict
//! cc-cli advise --merchant laowang
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};

use campus_canteen_core::CampusLocation;
use campus_canteen_datastore::{ChangeNotifier, DataStore, SessionTracker};

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "cc-cli")]
#[command(author, version, about = "Campus Canteen CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed demo accounts, stores, and dishes
    Seed,
    /// List listed stores
    Stores {
        /// Only show stores at this location (xingan, shanbei, specialty)
        #[arg(short, long)]
        location: Option<CampusLocation>,
    },
    /// Show a store's menu
    Menu {
        /// Store name, exact match
        #[arg(short, long)]
        store: String,
    },
    /// Show a merchant's order queue
    Orders {
        /// Merchant username
        #[arg(short, long)]
        merchant: String,

        /// Which orders to show
        #[arg(short, long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Show live window sessions
    Sessions,
    /// Predict campus order demand
    Predict,
    /// AI advice for a merchant's store
    Advise {
        /// Merchant username
        #[arg(short, long)]
        merchant: String,
    },
}

/// Order queue filter argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    InProgress,
    Completed,
}

impl std::fmt::Display for FilterArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl From<FilterArg> for campus_canteen_admin::OrderFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Self::All,
            FilterArg::InProgress => Self::InProgress,
            FilterArg::Completed => Self::Completed,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;
    let store = DataStore::open(&config.data_path);
    let notifier = ChangeNotifier::new();

    // This invocation is one logical window: keep a session alive for the
    // duration of the command, and strip it again on the way out.
    let tracker = SessionTracker::new(store.clone());
    let window = tracker.register();
    let heartbeat = tracker.spawn();
    tracing::debug!(window_id = %window.window_id(), "window session active");

    let outcome = match cli.command {
        Commands::Seed => commands::seed::run(&store, &notifier),
        Commands::Stores { location } => commands::browse::stores(&store, location),
        Commands::Menu { store: name } => commands::browse::menu(&store, &name),
        Commands::Orders { merchant, filter } => {
            commands::browse::orders(&store, &notifier, &merchant, filter.into())
        }
        Commands::Sessions => commands::browse::sessions(&store),
        Commands::Predict => commands::ai::predict(&store, config.gemini.as_ref()).await,
        Commands::Advise { merchant } => {
            commands::ai::advise(&store, config.gemini.as_ref(), &merchant).await
        }
    };

    heartbeat.shutdown().await;
    drop(window);

    outcome
}
