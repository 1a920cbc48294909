//! SQLite connection and schema management

use std::fs;
use std::path::Path;
use std::rc::Rc;

use parking_types::Result;
use rusqlite::{params, Connection};

use super::{SqliteParkingSpotRepository, SqliteTicketRepository};
use crate::layout_loader::SpotLayout;

const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS parking_spot (
    id        INTEGER PRIMARY KEY,
    type      TEXT    NOT NULL,
    available INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS ticket (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    parking_spot_id    INTEGER NOT NULL REFERENCES parking_spot(id),
    vehicle_reg_number TEXT    NOT NULL,
    price              REAL    NOT NULL DEFAULT 0,
    in_time            TEXT    NOT NULL,
    out_time           TEXT
);

CREATE INDEX IF NOT EXISTS idx_ticket_vehicle ON ticket(vehicle_reg_number);
";

/// Handle on the parking database
pub struct Database {
    conn: Rc<Connection>,
}

impl Database {
    /// Open (or create) the database file and ensure the schema exists
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        tracing::debug!("parking schema ready");
        Ok(Self {
            conn: Rc::new(conn),
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn spot_repository(&self) -> SqliteParkingSpotRepository {
        SqliteParkingSpotRepository::new(Rc::clone(&self.conn))
    }

    pub fn ticket_repository(&self) -> SqliteTicketRepository {
        SqliteTicketRepository::new(Rc::clone(&self.conn))
    }

    /// Insert the spot inventory if the lot has none yet
    ///
    /// Returns the number of spots inserted (0 when already seeded).
    pub fn seed_inventory(&self, layout: &SpotLayout) -> Result<usize> {
        let existing: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM parking_spot", [], |r| r.get(0))?;
        if existing > 0 {
            tracing::debug!(existing, "parking inventory already seeded");
            return Ok(0);
        }

        let mut stmt = self
            .conn
            .prepare("INSERT INTO parking_spot (id, type, available) VALUES (?1, ?2, ?3)")?;
        for spot in layout.spots() {
            stmt.execute(params![spot.id, spot.parking_type.as_str(), spot.available])?;
        }
        tracing::info!(spots = layout.spots().len(), "seeded parking inventory");
        Ok(layout.spots().len())
    }

    /// Delete every ticket and mark every spot available
    pub fn clear_entries(&self) -> Result<()> {
        self.conn.execute_batch(
            "DELETE FROM ticket;
             DELETE FROM sqlite_sequence WHERE name = 'ticket';
             UPDATE parking_spot SET available = 1;",
        )?;
        tracing::info!("cleared tickets and released all spots");
        Ok(())
    }
}
