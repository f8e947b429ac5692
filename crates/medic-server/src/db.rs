//! SQLite consultation store.
//!
//! Create-only: each analyzed request with a user id becomes one row. The id
//! is generated here and the timestamp is assigned by the database.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use medic_core::{ConsultError, ConsultationStore, NewConsultation};
use rusqlite::{params, Connection};
use tracing::{error, info};
use uuid::Uuid;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS consultations (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    symptoms TEXT NOT NULL,
    analysis_json TEXT NOT NULL,
    doctors_json TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);";

/// Consultation store backed by a single SQLite connection.
#[derive(Clone)]
pub struct SqliteConsultationStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteConsultationStore {
    /// Opens (creating if needed) the database at `path`.
    pub fn open(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent).context("failed to create db directory")?;
        }
        let conn = Connection::open(path).context("failed to open database")?;
        let store = Self::init(conn)?;
        info!("Consultation store initialized at {}", path);
        Ok(store)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA).context("failed to create table")?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    #[cfg(test)]
    pub fn count_for_user(&self, user_id: &str) -> Result<i64> {
        let conn = lock(&self.conn)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM consultations WHERE user_id = ?1",
            params![user_id],
            |r| r.get(0),
        )?;
        Ok(count)
    }
}

fn lock(conn: &Mutex<Connection>) -> Result<std::sync::MutexGuard<'_, Connection>> {
    conn.lock().map_err(|e| anyhow!("database lock poisoned: {}", e))
}

fn insert(conn: &Mutex<Connection>, consultation: &NewConsultation) -> Result<String> {
    let id = Uuid::new_v4().to_string();
    let analysis_json =
        serde_json::to_string(&consultation.analysis).context("failed to serialize analysis")?;
    let doctors_json = serde_json::to_string(&consultation.recommended_doctors)
        .context("failed to serialize doctors")?;

    let conn = lock(conn)?;
    conn.execute(
        "INSERT INTO consultations (id, user_id, symptoms, analysis_json, doctors_json)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, consultation.user_id, consultation.symptoms, analysis_json, doctors_json],
    )
    .context("failed to insert consultation")?;
    Ok(id)
}

#[async_trait]
impl ConsultationStore for SqliteConsultationStore {
    async fn create(&self, consultation: NewConsultation) -> Result<String, ConsultError> {
        let conn = self.conn.clone();
        let user_id = consultation.user_id.clone();

        let result = tokio::task::spawn_blocking(move || insert(&conn, &consultation))
            .await
            .map_err(|e| anyhow!("store task failed: {}", e))
            .and_then(|r| r);

        match result {
            Ok(id) => {
                info!("Saved consultation {} for user {}", id, user_id);
                Ok(id)
            }
            Err(e) => {
                error!("Failed to save consultation: {:#}", e);
                Err(ConsultError::Persistence(format!("{:#}", e)))
            }
        }
    }
}
