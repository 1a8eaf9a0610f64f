/*!
 * Content table definition.
 *
 * The schema version lives in SQLite's `user_version` pragma. A fresh file
 * reports 0 and gets the current tables; a file written by a newer version of
 * this crate is refused.
 */

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use rusqlite::Connection;

/// Version written to `user_version` once the tables exist
pub const SCHEMA_VERSION: i32 = 1;

const CONTENTS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS contents (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        content_type TEXT NOT NULL,
        title TEXT NOT NULL,
        publish_date TEXT,
        slug TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_contents_type ON contents(content_type);
    CREATE INDEX IF NOT EXISTS idx_contents_slug ON contents(slug);
"#;

/// Bring `conn` to the current schema
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    match stored_version(conn)? {
        0 => {
            info!("Creating content schema v{}", SCHEMA_VERSION);
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
            conn.execute_batch(CONTENTS_DDL)
                .context("Failed to create contents table")?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            Ok(())
        }
        version if version > SCHEMA_VERSION => Err(anyhow!(
            "Database schema v{} is newer than supported v{}",
            version,
            SCHEMA_VERSION
        )),
        version => {
            debug!("Content schema at v{}", version);
            Ok(())
        }
    }
}

fn stored_version(conn: &Connection) -> Result<i32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .context("Failed to read schema version")
}
