mod context;
mod history;
mod leads;
mod services;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use leadgen_core::{PitchModel, ServiceId};
use tracing_subscriber::EnvFilter;

use crate::context::CliContext;
use crate::history::HistoryCommands;
use crate::settings::SettingsCommands;

#[derive(Debug, Parser)]
#[command(name = "leadgen-cli")]
#[command(about = "Find local business leads and draft outreach pitches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for businesses in a niche and location
    Search {
        /// Business category (e.g., "Plumber")
        #[arg(long)]
        niche: String,
        /// City or region (e.g., "Austin, TX")
        #[arg(long)]
        location: String,
        /// Number of leads to request: 10, 20, 50 or 100
        #[arg(long, default_value_t = 10)]
        count: u32,
        /// Also write the results as CSV to this file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Do not record this search in history
        #[arg(long)]
        no_history: bool,
    },
    /// Export a past search as CSV
    Export {
        /// History item id (see `history list`)
        id: String,
        /// Output file (defaults to `leads-<niche>-<location>.csv`)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Draft a cold outreach email for one lead of a past search
    Pitch {
        /// History item id (see `history list`)
        id: String,
        /// Lead number as shown by `history show` (1-based)
        lead: usize,
        /// Service to pitch (defaults to the lead's recommendation)
        #[arg(long, value_parser = parse_service_id)]
        service: Option<ServiceId>,
    },
    /// Inspect or clear search history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// List the service catalog
    Services,
    /// Show or change API keys and the pitch model
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

fn parse_service_id(value: &str) -> Result<ServiceId, String> {
    value.parse().map_err(|e: leadgen_core::CoreError| e.to_string())
}

fn parse_pitch_model(value: &str) -> Result<PitchModel, String> {
    value.parse().map_err(|e: leadgen_core::CoreError| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = leadgen_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = CliContext::new(config)?;

    match cli.command {
        Commands::Search {
            niche,
            location,
            count,
            output,
            no_history,
        } => {
            leads::run_search(
                &ctx,
                &niche,
                &location,
                count,
                output.as_deref(),
                !no_history,
            )
            .await
        }
        Commands::Export { id, output } => leads::run_export(&ctx, &id, output.as_deref()),
        Commands::Pitch { id, lead, service } => leads::run_pitch(&ctx, &id, lead, service).await,
        Commands::History { command } => history::run(&ctx, command),
        Commands::Services => {
            services::run_services(&ctx);
            Ok(())
        }
        Commands::Settings { command } => settings::run(&ctx, command),
    }
}

#[cfg(test)]
mod tests;
