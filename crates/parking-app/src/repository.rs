//! Repository adapters for persistence layer

use std::path::Path;

use parking_infra::layout_loader::SpotLayout;
use parking_infra::persistence::Database;
use parking_types::Result;

use crate::config::Config;

/// Open the configured parking database
pub fn open_database(config: &Config) -> Result<Database> {
    let path = config.database_path()?;
    open_database_at(&path)
}

/// Open a parking database at a custom path
pub fn open_database_at(path: &Path) -> Result<Database> {
    tracing::debug!(path = %path.display(), "opening parking database");
    Database::open(path)
}

/// Open the database and make sure the spot inventory exists
pub fn open_seeded_database(config: &Config, layout: &SpotLayout) -> Result<Database> {
    let db = open_database(config)?;
    db.seed_inventory(layout)?;
    Ok(db)
}
