/*!
 * Database module for persistent storage of content records.
 *
 * This module provides SQLite-based persistence for the bundled command line
 * host: content items with their slugs, and the persisted-slug lookup the
 * slug decision uses for updates.
 */

pub mod schema;
pub mod connection;
pub mod repository;

// Re-export main types
pub use connection::DatabaseConnection;
pub use repository::Repository;
