//! Meeting note repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Pool, Postgres, Row};
use tracing::info;

use scribe_core::{truncate_to_micros, Error, NewNote, NoteRecord, NoteRepository, Result};

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn insert(&self, req: NewNote) -> Result<i64> {
        // Truncated so the stored value is exactly representable in the
        // wire format; UpdateNote later matches on it verbatim.
        let now = truncate_to_micros(Utc::now());

        let row = sqlx::query(
            "INSERT INTO notes (org_id, emp_id, client_id, datetime, audionotes, textnotes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING meeting_id",
        )
        .bind(req.org_id)
        .bind(req.emp_id)
        .bind(req.client_id)
        .bind(now)
        .bind(req.audio.as_deref())
        .bind(&req.text)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let meeting_id: i64 = row.get("meeting_id");

        info!(
            subsystem = "database",
            component = "notes",
            op = "insert",
            org_id = req.org_id,
            emp_id = req.emp_id,
            client_id = req.client_id,
            meeting_id = meeting_id,
            has_audio = req.audio.is_some(),
            "Saved transcription"
        );
        Ok(meeting_id)
    }

    async fn list(
        &self,
        org_id: i64,
        emp_id: i64,
        client_id: i64,
        on_date: Option<NaiveDate>,
    ) -> Result<Vec<NoteRecord>> {
        let rows = match on_date {
            Some(date) => {
                sqlx::query(
                    "SELECT datetime, textnotes, audionotes FROM notes
                     WHERE org_id = $1 AND emp_id = $2 AND client_id = $3
                       AND datetime::date = $4
                     ORDER BY datetime DESC",
                )
                .bind(org_id)
                .bind(emp_id)
                .bind(client_id)
                .bind(date)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    "SELECT datetime, textnotes, audionotes FROM notes
                     WHERE org_id = $1 AND emp_id = $2 AND client_id = $3
                     ORDER BY datetime DESC",
                )
                .bind(org_id)
                .bind(emp_id)
                .bind(client_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|row| NoteRecord {
                datetime: row.get("datetime"),
                textnotes: row.get("textnotes"),
                audionotes: row.get("audionotes"),
            })
            .collect())
    }

    async fn update_text(
        &self,
        org_id: i64,
        emp_id: i64,
        client_id: i64,
        datetime: DateTime<Utc>,
        new_text: &str,
    ) -> Result<()> {
        // Exact-tuple match, microseconds included; a partial match is a miss.
        let result = sqlx::query(
            "UPDATE notes SET textnotes = $1
             WHERE org_id = $2 AND emp_id = $3 AND client_id = $4 AND datetime = $5",
        )
        .bind(new_text)
        .bind(org_id)
        .bind(emp_id)
        .bind(client_id)
        .bind(datetime)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(
                "No matching note found to update".to_string(),
            ));
        }

        info!(
            subsystem = "database",
            component = "notes",
            op = "update_text",
            org_id = org_id,
            emp_id = emp_id,
            client_id = client_id,
            "Updated transcription"
        );
        Ok(())
    }
}
