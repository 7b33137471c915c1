//! Recipe catalog: a SQLite-backed store of recipes with a paginated,
//! filterable JSON API, a bulk seeder and a small browsing frontend.
//!
//! # Example
//!
//! ```no_run
//! use recipe_catalog::{dataset, Database, DatasetParams};
//!
//! # fn main() -> Result<(), recipe_catalog::CatalogError> {
//! let db = Database::open("recipes.sqlite")?;
//! let params = DatasetParams::builder().keyword("tomato").limit(10).build();
//! let page = dataset::paginate(&*db.lock()?, &params)?;
//! println!("{} of {} recipes", page.items.len(), page.total);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod dataset;
pub mod db;
mod error;
pub mod frontend;
pub mod logging;
pub mod model;
pub mod seeder;
pub mod slug;

pub use config::CatalogConfig;
pub use dataset::{DatasetParams, Page, SortColumn, SortDirection};
pub use db::Database;
pub use error::{CatalogError, Result};
pub use model::{Ingredient, NewRecipe, Recipe, Step};
pub use seeder::{SeedReport, Seeder};

use log::{info, warn};

/// Resolves on Ctrl-C or SIGTERM; used to stop both servers gracefully
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
