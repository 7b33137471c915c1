use clap::{Parser, Subcommand};
use log::info;
use recipe_catalog::config::load_config;
use recipe_catalog::db::schema;
use recipe_catalog::{api, frontend, logging, CatalogError, Database, Seeder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recipe-catalog")]
#[command(author, version, about = "Recipe catalog: JSON API, seeder and browsing frontend", long_about = None)]
struct Cli {
    /// Configuration file (extension optional, missing file is fine)
    #[arg(short, long, global = true, default_value = "config")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Database path
        #[arg(short, long)]
        database: Option<String>,
    },
    /// Serve the browsing frontend
    Frontend {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Base URL of the catalog API
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Load sample recipes from a JSON file
    Seed {
        /// JSON file with a top-level `recipes` array
        #[arg(short, long)]
        source: Option<PathBuf>,
        /// Database path
        #[arg(short, long)]
        database: Option<String>,
    },
    /// Create or upgrade the database schema
    Migrate {
        /// Database path
        #[arg(short, long)]
        database: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CatalogError> {
    logging::init();

    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;

    match cli.command {
        Commands::Serve { port, database } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let db = Database::open(database.unwrap_or(config.database.path))?;
            api::serve(db, &config.server).await?;
        }
        Commands::Frontend { port, api_url } => {
            if let Some(port) = port {
                config.frontend.port = port;
            }
            if let Some(api_url) = api_url {
                config.frontend.api_url = api_url;
            }
            frontend::serve(&config.frontend).await?;
        }
        Commands::Seed { source, database } => {
            let db = Database::open(database.unwrap_or(config.database.path))?;
            let source = source.unwrap_or(config.seed.source);
            let report = Seeder::new(db, config.seed.default_author_email).seed_file(&source)?;
            println!(
                "Seeded {} recipes from {}",
                report.recipes,
                source.display()
            );
        }
        Commands::Migrate { database } => {
            let db = Database::open(database.unwrap_or(config.database.path))?;
            let version = schema::get_schema_version(&*db.lock()?)?;
            info!("Database schema is at version {}", version);
            println!("Schema version {}", version);
        }
    }

    Ok(())
}
