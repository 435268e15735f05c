//! Database access layer with connection pooling and schema setup
//!
//! - `transactions` - Transaction CRUD and atomic edit batches

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::{Error, Result};

mod transactions;


pub use transactions::BatchOutcome;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Per-connection pragmas, applied whenever the pool opens a connection
const CONNECTION_PRAGMAS: &str = r#"
    -- WAL mode: readers don't block writers (creates -wal and -shm sidecar files)
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;
    PRAGMA temp_store = MEMORY;
"#;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date DATE NOT NULL,                 -- YYYY-MM-DD
        kind TEXT NOT NULL,                 -- expense, income, savings_deposit, savings_withdrawal
        category TEXT NOT NULL,
        amount TEXT NOT NULL,               -- canonical decimal, two fractional digits
        note TEXT
    );

    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
"#;

/// Database wrapper with connection pooling
///
/// Clones share the pool and the schema flag.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
    schema_ready: Arc<AtomicBool>,
}

impl Database {
    /// Open the database and make sure the schema exists
    pub fn new(path: &str) -> Result<Self> {
        let db = Self::open(path)?;
        db.initialize()?;
        Ok(db)
    }

    /// Build the connection pool without touching the schema
    pub fn open(path: &str) -> Result<Self> {
        // Fail fast instead of waiting out the pool's connection timeout
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(Error::NotFound(format!(
                    "Database directory {}",
                    parent.display()
                )));
            }
        }

        let manager = SqliteConnectionManager::file(path)
            .with_init(|conn| conn.execute_batch(CONNECTION_PRAGMAS));
        let pool = Pool::builder()
            .max_size(4)
            .connection_timeout(Duration::from_secs(5))
            .build(manager)?;

        Ok(Self {
            pool,
            db_path: path.to_string(),
            schema_ready: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Uses a unique temp file rather than `:memory:`, since every pooled
    /// connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::AtomicU64;
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "tally_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any leftovers from an earlier run
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }

        Self::new(&path.to_string_lossy())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Whether `initialize` has already succeeded for this handle
    pub fn is_initialized(&self) -> bool {
        self.schema_ready.load(Ordering::Acquire)
    }

    /// Create the transactions table if absent
    ///
    /// Idempotent; after the first success further calls return immediately.
    pub fn initialize(&self) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        let conn = self.conn()?;
        conn.execute_batch(SCHEMA)?;
        self.schema_ready.store(true, Ordering::Release);

        info!(path = %self.db_path, "Database schema ready");
        Ok(())
    }
}
