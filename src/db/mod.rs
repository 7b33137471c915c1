//! SQLite storage for the catalog.
//!
//! A [`Database`] owns one connection behind a mutex and is cheap to clone,
//! so it can sit in the axum state and be shared across requests. Foreign
//! keys are switched on for every connection so child rows cascade with
//! their recipe.

pub mod recipes;
pub mod schema;

use crate::error::{CatalogError, Result};
use log::info;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle to the catalog database
#[derive(Debug, Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path` and apply pending migrations.
    ///
    /// `:memory:` opens a private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = if path == Path::new(":memory:") {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        info!("Opened database at {}", path.display());
        Self::from_connection(conn)
    }

    /// Open a fresh in-memory database with the schema applied
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        register_functions(&conn)?;
        schema::migrate(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Lock the connection for the duration of one unit of work
    pub fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| CatalogError::ConnectionPoisoned(e.to_string()))
    }
}

/// SQL name of the Unicode lower-case function available on every connection
pub(crate) const UNICODE_LOWER: &str = "unicode_lower";

/// SQLite's built-in `lower()` and `LIKE` only fold ASCII; search needs
/// `É` to match `é` as well.
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )?;
    Ok(())
}
