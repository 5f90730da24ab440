pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::auth::hash_password;
use crate::config::AppConfig;
use crate::database::DatabaseManager;

#[derive(Parser)]
#[command(name = "elearning-api")]
#[command(about = "eLearning marketplace API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Keep all data in process memory instead of Postgres")]
        in_memory: bool,

        #[arg(
            long,
            requires = "in_memory",
            help = "Seed an 'admin' account with this password (in-memory only)"
        )]
        admin_password: Option<String>,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,

    #[command(about = "Print an Argon2 hash of a password for manual seeding")]
    HashPassword { password: String },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Serve {
        in_memory: false,
        admin_password: None,
    });

    match command {
        Commands::Serve {
            in_memory,
            admin_password,
        } => serve::handle(in_memory, admin_password).await,
        Commands::Migrate => migrate().await,
        Commands::HashPassword { password } => {
            let hash = hash_password(&password).map_err(|e| anyhow::anyhow!("hashing failed: {}", e))?;
            println!("{}", hash);
            Ok(())
        }
    }
}

async fn migrate() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("connecting to database")?;
    DatabaseManager::migrate(&pool).await?;
    Ok(())
}
