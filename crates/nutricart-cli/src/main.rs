//! NutriCart CLI
//!
//! Command-line interface for the NutriCart server and its database

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nutricart_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "nutricart")]
#[command(about = "NutriCart - Food catalog and order tracking", long_about = None)]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, global = true, env = "NUTRICART_DB", default_value = nutricart_api::config::DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Log profile: dev, prod or test
    #[arg(long, global = true, env = "NUTRICART_LOG", default_value = "dev")]
    log: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Apply pending database migrations
    Migrate,
    /// Catalog seed operations
    Seed(commands::seed::SeedArgs),
    /// Print a user's order statistics as JSON
    Stats(commands::stats::StatsArgs),
}

fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging_facility::init(cli.log);

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, cli.db),
        Commands::Migrate => commands::migrate::execute(&cli.db),
        Commands::Seed(args) => commands::seed::execute(args, &cli.db),
        Commands::Stats(args) => commands::stats::execute(args, &cli.db),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
