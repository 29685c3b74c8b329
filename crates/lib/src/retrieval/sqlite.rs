//! A [`VectorStore`] backed by a local Turso database file.
//!
//! Vectors are stored as raw little-endian `f32` blobs and ranked with
//! `vector_distance_cos`.

use super::{RankedChunk, RetrievalError, VectorStore};
use async_trait::async_trait;
use std::fmt::{self, Debug};
use tracing::{debug, info, warn};
use turso::{params, Connection, Database, Value as TursoValue};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS qa_chunks (
    id INTEGER PRIMARY KEY,
    content TEXT NOT NULL,
    embedding BLOB NOT NULL
)";

#[derive(Clone)]
pub struct TursoVectorStore {
    db: Database,
}

impl TursoVectorStore {
    /// Opens (or creates) the index at `db_path`. Use `":memory:"` for a
    /// throwaway index.
    pub async fn new(db_path: &str) -> Result<Self, RetrievalError> {
        info!("Opening similarity index at '{}'.", db_path);
        let db = turso::Builder::new_local(db_path).build().await?;
        let conn = db.connect()?;
        conn.execute(CREATE_TABLE_SQL, ()).await?;
        Ok(Self { db })
    }
}

impl Debug for TursoVectorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TursoVectorStore").finish_non_exhaustive()
    }
}

fn to_blob(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Clears the table and inserts `entries`, rejecting a vector whose length
/// differs from the first one. Runs inside the caller's transaction.
async fn write_rows(
    conn: &Connection,
    entries: Vec<(String, Vec<f32>)>,
) -> Result<usize, RetrievalError> {
    conn.execute("DELETE FROM qa_chunks", ()).await?;
    let expected = entries.first().map(|(_, v)| v.len()).unwrap_or_default();
    let mut written = 0;
    for (content, vector) in entries {
        if vector.len() != expected {
            return Err(RetrievalError::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }
        let blob = to_blob(&vector);
        let vector_bytes: &[u8] = &blob;
        conn.execute(
            "INSERT INTO qa_chunks (content, embedding) VALUES (?, ?)",
            params![content, vector_bytes],
        )
        .await?;
        written += 1;
    }
    Ok(written)
}

#[async_trait]
impl VectorStore for TursoVectorStore {
    /// Swaps the index contents in one transaction, so a failed write keeps
    /// the previous rows.
    async fn replace_all(&self, entries: Vec<(String, Vec<f32>)>) -> Result<(), RetrievalError> {
        let conn = self.db.connect()?;
        conn.execute("BEGIN TRANSACTION", ()).await?;
        match write_rows(&conn, entries).await {
            Ok(written) => {
                conn.execute("COMMIT", ()).await?;
                debug!("Committed {} chunks to the similarity index.", written);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to rebuild similarity index: {}. Rolling back.", e);
                conn.execute("ROLLBACK", ()).await?;
                Err(e)
            }
        }
    }

    async fn nearest(&self, query: &[f32], k: usize) -> Result<Vec<RankedChunk>, RetrievalError> {
        let conn = self.db.connect()?;

        let vector_str = format!(
            "vector('[{}]')",
            query
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        let sql = format!(
            "SELECT content, (1.0 - (vector_distance_cos(embedding, {vector_str}) / 2.0)) AS similarity
             FROM qa_chunks
             ORDER BY similarity DESC
             LIMIT {k}"
        );

        let mut rows = conn.query(&sql, ()).await?;
        let mut ranked = Vec::new();
        while let Some(row) = rows.next().await? {
            let content = match row.get_value(0)? {
                TursoValue::Text(s) => s,
                _ => String::new(),
            };
            let score = match row.get_value(1)? {
                TursoValue::Real(f) => f,
                _ => 0.0,
            };
            ranked.push(RankedChunk { content, score });
        }
        Ok(ranked)
    }

    async fn len(&self) -> Result<usize, RetrievalError> {
        let conn = self.db.connect()?;
        let mut rows = conn.query("SELECT COUNT(*) FROM qa_chunks", ()).await?;
        let count = match rows.next().await? {
            Some(row) => match row.get_value(0)? {
                TursoValue::Integer(n) => n as usize,
                _ => 0,
            },
            None => 0,
        };
        Ok(count)
    }
}
