//! Persistence implementations
//!
//! SQLite-backed implementations of the repository traits. Both repositories
//! share the connection owned by [`Database`].

mod database;
mod sqlite_parking_spot_repo;
mod sqlite_ticket_repo;

pub use database::Database;
pub use sqlite_parking_spot_repo::SqliteParkingSpotRepository;
pub use sqlite_ticket_repo::SqliteTicketRepository;
