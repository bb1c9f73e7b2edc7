//! Headless front end for path discovery and the learning store.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use spt_launcher_lib::discovery::Environment;
use spt_launcher_lib::{logging, Discovery, DiscoveryConfig, LearningStore, Role};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Debug-level logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Learning store file (defaults to the per-user data directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Discovery config file (defaults to discovery.json in the data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for the server and client executables and print the result as JSON
    Detect {
        /// Print ranked candidates instead of the summary
        #[arg(long)]
        candidates: bool,
    },
    /// Record the outcome of a launch attempt
    Record {
        server: String,
        #[arg(default_value = "")]
        client: String,
        #[arg(long, conflicts_with = "failure")]
        success: bool,
        #[arg(long)]
        failure: bool,
    },
    /// Check that a path names a valid server or client executable
    Validate {
        path: String,
        #[arg(long, value_enum, default_value_t = RoleArg::Server)]
        role: RoleArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoleArg {
    Server,
    Client,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Server => Role::Server,
            RoleArg::Client => Role::Client,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let store = match cli.store {
        Some(path) => LearningStore::new(path),
        None => LearningStore::open_default().context("resolving learning store location")?,
    };
    let config = match cli.config {
        Some(path) => DiscoveryConfig::load_from(&path),
        None => DiscoveryConfig::load(),
    };
    let discovery = Discovery::new(Environment::detect(), config, store);

    let json = match cli.command {
        Command::Detect { candidates: true } => serde_json::to_string_pretty(&discovery.rank_candidates().await)?,
        Command::Detect { candidates: false } => serde_json::to_string_pretty(&discovery.detect_paths().await)?,
        Command::Record {
            server,
            client,
            success,
            failure,
        } => {
            if !success && !failure {
                anyhow::bail!("pass --success or --failure");
            }
            let record = discovery.record_launch_outcome(&server, &client, success);
            tracing::debug!(store = %discovery.store().path().display(), "learning store updated");
            serde_json::to_string_pretty(&record)?
        }
        Command::Validate { path, role } => serde_json::to_string_pretty(&discovery.validate_path(&path, role.into()))?,
    };
    println!("{json}");
    Ok(())
}
