pub mod chat_db;
pub mod database;
pub mod store;

pub use chat_db::{ChatDatabase, DEFAULT_DB_PATH};
pub use store::{MessageStore, SqliteStore};

use std::fs;
use std::path::Path;

/// Ensure the directory holding the database file exists
pub fn ensure_data_dir<P: AsRef<Path>>(database_path: P) -> std::io::Result<()> {
    if let Some(parent) = database_path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
