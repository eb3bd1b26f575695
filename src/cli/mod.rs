pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "obra-api")]
#[command(about = "Obra API - construction-project monitoring REST service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::handle(args).await,
        None => commands::serve::handle(commands::serve::ServeArgs::default()).await,
        Some(Commands::Migrate) => commands::migrate::handle().await,
    }
}
