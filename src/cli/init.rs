use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::db::{db_path, get_connection, init_db};
use crate::settings::{load_settings, save_settings};

pub fn run(data_dir: Option<&str>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = dir.to_string();
    }
    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)
        .with_context(|| format!("creating data dir {}", resolved.display()))?;
    let db_file = db_path(&resolved);
    let conn = get_connection(&db_file)
        .with_context(|| format!("opening database at {}", db_file.display()))?;
    init_db(&conn)?;

    println!("Initialized bankfeed at {}", resolved.display());
    Ok(())
}
