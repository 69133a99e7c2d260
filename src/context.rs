use std::path::PathBuf;

use rusqlite::Connection;

use crate::db;
use crate::error::Result;
use crate::settings::Settings;

/// Everything an operation needs: the open store handle plus the loaded
/// configuration. Built once at startup and passed down explicitly, so
/// nothing below the CLI reads ambient state.
pub struct AppContext {
    pub conn: Connection,
    pub settings: Settings,
}

impl AppContext {
    /// Open the database under the configured data dir, creating the
    /// directory and schema on first use.
    pub fn open(settings: Settings) -> Result<Self> {
        let data_dir = PathBuf::from(&settings.data_dir);
        std::fs::create_dir_all(&data_dir)?;
        let conn = db::get_connection(&db::db_path(&data_dir))?;
        db::init_db(&conn)?;
        Ok(Self { conn, settings })
    }
}
