/*!
 * Repository layer for content records.
 *
 * This module provides the high-level API the command line host uses to
 * persist content, and the `ContentStore` lookup the slug decision consults.
 */

use anyhow::{Result, anyhow};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::connection::DatabaseConnection;
use crate::content::{ContentRecord, ContentStore, PublishDate};
use crate::errors::AppError;

const CONTENT_COLUMNS: &str = "id, content_type, title, publish_date, slug";

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Persist a new content item and return its id
    pub async fn insert_content(&self, record: &ContentRecord) -> Result<i64> {
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO contents (content_type, title, publish_date, slug, created_at, updated_at)
                    VALUES (?1, ?2, ?3, ?4, datetime('now'), datetime('now'))
                    "#,
                    params![
                        record.content_type,
                        record.title,
                        publish_date_column(&record.publish_date),
                        record.slug,
                    ],
                )?;
                let id = conn.last_insert_rowid();
                debug!("Inserted content {} with slug '{}'", id, record.slug);
                Ok(id)
            })
            .await
    }

    /// Overwrite a stored content item; the record must carry the id of an
    /// existing row
    pub async fn update_content(&self, record: &ContentRecord) -> Result<()> {
        let id = record
            .id
            .ok_or_else(|| AppError::Storage("Cannot update content without an id".to_string()))?;
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                let updated = conn.execute(
                    r#"
                    UPDATE contents
                    SET content_type = ?1, title = ?2, publish_date = ?3, slug = ?4,
                        updated_at = datetime('now')
                    WHERE id = ?5
                    "#,
                    params![
                        record.content_type,
                        record.title,
                        publish_date_column(&record.publish_date),
                        record.slug,
                        id,
                    ],
                )?;
                if updated == 0 {
                    return Err(anyhow!(AppError::Storage(format!("Content {} does not exist", id))));
                }
                Ok(())
            })
            .await
    }

    /// Get a content item by id
    pub async fn get_content(&self, id: i64) -> Result<Option<ContentRecord>> {
        self.db
            .execute_async(move |conn| Self::get_content_sync(conn, id))
            .await
    }

    /// Get a content item by id (synchronous version)
    fn get_content_sync(conn: &Connection, id: i64) -> Result<Option<ContentRecord>> {
        let sql = format!("SELECT {} FROM contents WHERE id = ?1", CONTENT_COLUMNS);
        let record = conn.query_row(&sql, [id], row_to_record).optional()?;
        Ok(record)
    }

    /// List all content items, oldest first
    pub async fn list_contents(&self) -> Result<Vec<ContentRecord>> {
        self.db
            .execute_async(|conn| {
                let sql = format!("SELECT {} FROM contents ORDER BY id", CONTENT_COLUMNS);
                let mut stmt = conn.prepare(&sql)?;
                let records = stmt
                    .query_map([], row_to_record)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(records)
            })
            .await
    }
}

// Runs on the caller's thread: the lookup sits inside the synchronous
// `ContentStore` contract and blocks the runtime worker for one indexed query.
impl ContentStore for Repository {
    fn persisted_slug(&self, id: i64) -> Result<Option<String>> {
        self.db.execute(|conn| {
            let slug = conn
                .query_row("SELECT slug FROM contents WHERE id = ?1", [id], |row| row.get(0))
                .optional()?;
            Ok(slug)
        })
    }
}

fn publish_date_column(publish_date: &PublishDate) -> Option<String> {
    publish_date
        .is_set()
        .then(|| publish_date.to_storage_string())
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<ContentRecord> {
    let publish_date: Option<String> = row.get(3)?;
    Ok(ContentRecord {
        id: Some(row.get(0)?),
        content_type: row.get(1)?,
        title: row.get(2)?,
        publish_date: publish_date.as_deref().map_or(PublishDate::Unset, PublishDate::parse),
        slug: row.get(4)?,
    })
}
