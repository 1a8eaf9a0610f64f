/*!
 * SQLite connection handle shared by the repository.
 *
 * One `rusqlite::Connection` sits behind a mutex. Async callers go through
 * `execute_async`, which moves the work onto tokio's blocking pool; the slug
 * decision's store lookup is synchronous and uses `execute`.
 */

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::schema;

const DATA_DIR_NAME: &str = "slugline";
const DATABASE_FILE_NAME: &str = "slugline.db";
const IN_MEMORY_PATH: &str = ":memory:";

/// Cloneable handle to the content database
#[derive(Clone)]
pub struct DatabaseConnection {
    path: PathBuf,
    inner: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Open (or create) the database file at `path`, creating missing parent
    /// directories
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
        }

        info!("Opening content database at {}", path.display());
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        Self::from_connection(path, conn)
    }

    /// Open a private in-memory database
    pub fn new_in_memory() -> Result<Self> {
        debug!("Opening in-memory content database");
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        Self::from_connection(PathBuf::from(IN_MEMORY_PATH), conn)
    }

    fn from_connection(path: PathBuf, conn: Connection) -> Result<Self> {
        schema::initialize_schema(&conn)?;
        Ok(Self {
            path,
            inner: Arc::new(Mutex::new(conn)),
        })
    }

    /// `<data_local_dir>/slugline/slugline.db`
    pub fn default_database_path() -> Result<PathBuf> {
        let base = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .ok_or_else(|| anyhow!("Could not determine a data directory for the content database"))?;

        Ok(base.join(DATA_DIR_NAME).join(DATABASE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` on the calling thread while holding the connection
    pub fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = lock(&self.inner)?;
        f(&conn)
    }

    /// Run `f` on tokio's blocking pool while holding the connection
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);

        tokio::task::spawn_blocking(move || {
            let conn = lock(&inner)?;
            f(&conn)
        })
        .await
        .context("Database task panicked")?
    }

    /// Row counts for the `check`-style summaries
    pub fn stats(&self) -> Result<DatabaseStats> {
        self.execute(|conn| {
            let (content_count, slugged_count) = conn.query_row(
                "SELECT COUNT(*), COALESCE(SUM(slug <> ''), 0) FROM contents",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;

            Ok(DatabaseStats {
                content_count,
                slugged_count,
            })
        })
    }
}

fn lock(inner: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
    inner
        .lock()
        .map_err(|e| anyhow!("Failed to acquire database lock: {}", e))
}

/// Row counts of the content table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseStats {
    pub content_count: i64,
    /// Rows with a non-empty slug
    pub slugged_count: i64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} contents, {} with a slug", self.content_count, self.slugged_count)
    }
}
