//! Client registration and listing.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use tracing::info;

use scribe_core::{ClientRepository, ClientSummary, Error, NewClient, Result};

/// PostgreSQL implementation of ClientRepository.
#[derive(Clone)]
pub struct PgClientRepository {
    pool: Pool<Postgres>,
}

impl PgClientRepository {
    /// Create a new PgClientRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn register(&self, req: NewClient) -> Result<i64> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let org_exists =
            sqlx::query("SELECT EXISTS(SELECT 1 FROM organizations WHERE org_id = $1) AS present")
                .bind(req.org_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(Error::Database)?
                .get::<bool, _>("present");

        if !org_exists {
            return Err(Error::NotFound("Organization not found".to_string()));
        }

        // Next id computed and inserted in one statement; the (org_id,
        // client_id) primary key turns a racing duplicate into a unique
        // violation rather than silent corruption.
        let row = sqlx::query(
            "INSERT INTO clients
                 (org_id, client_id, client_name, client_shortname, client_phone, client_email)
             SELECT $1, COALESCE(MAX(client_id), 0) + 1, $2, $3, $4, $5
             FROM clients WHERE org_id = $1
             RETURNING client_id",
        )
        .bind(req.org_id)
        .bind(&req.name)
        .bind(req.shortname.as_deref())
        .bind(&req.phone)
        .bind(&req.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            let err = Error::Database(e);
            if err.is_unique_violation() {
                Error::Conflict(
                    "Client with this clientId already exists in this organization".to_string(),
                )
            } else {
                err
            }
        })?;

        let client_id: i64 = row.get("client_id");

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "clients",
            op = "register",
            org_id = req.org_id,
            client_id = client_id,
            "Registered client"
        );
        Ok(client_id)
    }

    async fn list(&self, org_id: i64) -> Result<Vec<ClientSummary>> {
        let rows = sqlx::query(
            "SELECT client_id, client_name, client_shortname FROM clients WHERE org_id = $1",
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|row| ClientSummary {
                client_id: row.get("client_id"),
                name: row.get("client_name"),
                shortname: row.get("client_shortname"),
            })
            .collect())
    }

    async fn exists(&self, org_id: i64, client_id: i64) -> Result<bool> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM clients WHERE org_id = $1 AND client_id = $2) AS present",
        )
        .bind(org_id)
        .bind(client_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.get("present"))
    }
}
