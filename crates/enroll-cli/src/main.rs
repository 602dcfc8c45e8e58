use anyhow::Result;
use clap::{Parser, Subcommand};
use enroll_client::ProfileApiClient;

mod commands;

use commands::fields::ProfileFieldArgs;

#[derive(Parser)]
#[command(name = "enroll")]
#[command(about = "Enroll CLI - profile registration client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List stored profiles
    List,
    /// Register a new profile
    Register {
        #[command(flatten)]
        fields: ProfileFieldArgs,
    },
    /// Update a stored profile; omitted fields keep their stored value
    Update {
        /// Server-assigned profile id
        id: String,
        #[command(flatten)]
        fields: ProfileFieldArgs,
    },
    /// Delete a stored profile
    Delete {
        /// Server-assigned profile id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let client = ProfileApiClient::from_env();

    match cli.command {
        Commands::List => commands::list::run(&client).await?,
        Commands::Register { fields } => commands::register::run(&client, fields).await?,
        Commands::Update { id, fields } => commands::update::run(&client, &id, fields).await?,
        Commands::Delete { id } => commands::delete::run(&client, &id).await?,
    }

    Ok(())
}
