//! SQLite database setup and connection management for CodeSense
//! Handles database initialization, schema creation, and connection management.

use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const SCHEMA_VERSION: i32 = 2;

/// Database wrapper that manages SQLite connections
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create or open the database at the default location
    pub fn open() -> Result<Self> {
        Self::open_at(Self::default_path())
    }

    /// Create an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init()?;
        Ok(db)
    }

    /// Create or open the database at a specific path
    pub fn open_at(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init()?;
        log::debug!("opened local store at {}", path.display());
        Ok(db)
    }

    /// Get the default database path
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("CODESENSE_DB_PATH") {
            return PathBuf::from(path);
        }
        crate::infra::app_config::app_data_dir().join("codesense.db")
    }

    /// Initialize database schema
    fn init(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .expect("Database: failed to acquire database lock");

        let existing_version: i32 =
            conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        if existing_version == 0 {
            Self::create_schema(&conn)?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        } else if existing_version < SCHEMA_VERSION {
            for version in (existing_version + 1)..=SCHEMA_VERSION {
                Self::run_migration(&conn, version)?;
            }
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }

        Ok(())
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }

    pub fn snapshot_repo(&self) -> crate::infra::db::repository::SnapshotRepository {
        crate::infra::db::repository::SnapshotRepository::new(self.connection())
    }

    pub fn chat_repo(&self) -> crate::infra::db::repository::ChatRepository {
        crate::infra::db::repository::ChatRepository::new(self.connection())
    }

    pub fn project_repo(&self) -> crate::infra::db::repository::ProjectRepository {
        crate::infra::db::repository::ProjectRepository::new(self.connection())
    }

    pub fn fix_history_repo(&self) -> crate::infra::db::repository::FixHistoryRepository {
        crate::infra::db::repository::FixHistoryRepository::new(self.connection())
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS code_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                code TEXT NOT NULL,
                language TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS ai_chat (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_message TEXT NOT NULL,
                ai_response TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS projects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                project_name TEXT NOT NULL,
                code TEXT NOT NULL,
                language TEXT NOT NULL,
                is_favorite INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS full_fix_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                original_code TEXT NOT NULL,
                fixed_code TEXT NOT NULL,
                language TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Execute a migration for the specified version.
    ///
    /// Migration scripts are embedded into the binary at compile time.
    fn run_migration(conn: &Connection, version: i32) -> Result<()> {
        let sql = match version {
            2 => include_str!("../../../migrations/0002_add_full_fix_history.sql"),
            _ => {
                return Err(anyhow::anyhow!(
                    "Unknown migration version: {}. Add the migration to run_migration() in database.rs",
                    version
                ));
            }
        };

        conn.execute_batch(sql)
            .map_err(|e| anyhow::anyhow!("Failed to execute migration {}: {}", version, e))?;

        Ok(())
    }
}
