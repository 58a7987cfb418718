use crate::db::migrations::init_with_migrations;
use crate::libs::config::Config;
use crate::libs::error::Result;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

pub const DB_FILE_NAME: &str = "data.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database named by the configuration file.
    pub fn new() -> Result<Db> {
        let path = Config::read()?.database_path();
        Self::open(&path)
    }

    /// Opens (creating if needed) the database at `path` and brings its
    /// schema up to date.
    pub fn open(path: &Path) -> Result<Db> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        init_with_migrations(&mut conn)?;
        tracing::debug!(path = %path.display(), "database opened");

        Ok(Db { conn })
    }
}
