//! One-time passcode repository.
//!
//! One row per (org, employee) pair, upserted on issue, deleted on
//! consumption or expiry detection. The validity window lives in
//! [`OtpRecord::is_expired_at`] so the expiry math is unit-tested without a
//! database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};
use tracing::{info, warn};

use scribe_core::{Error, OtpRecord, OtpRepository, Result};

/// PostgreSQL implementation of OtpRepository.
#[derive(Clone)]
pub struct PgOtpRepository {
    pool: Pool<Postgres>,
}

impl PgOtpRepository {
    /// Create a new PgOtpRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn delete(&self, org_id: i64, emp_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM otps WHERE org_id = $1 AND emp_id = $2")
            .bind(org_id)
            .bind(emp_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}

#[async_trait]
impl OtpRepository for PgOtpRepository {
    async fn issue(&self, org_id: i64, emp_id: i64, code: &str, now: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            "INSERT INTO otps (org_id, emp_id, otp, created_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (org_id, emp_id)
             DO UPDATE SET otp = EXCLUDED.otp, created_at = EXCLUDED.created_at",
        )
        .bind(org_id)
        .bind(emp_id)
        .bind(code)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "otps",
            op = "issue",
            org_id = org_id,
            emp_id = emp_id,
            "Issued OTP"
        );
        Ok(())
    }

    async fn validate(
        &self,
        org_id: i64,
        emp_id: i64,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let row = sqlx::query("SELECT otp, created_at FROM otps WHERE org_id = $1 AND emp_id = $2")
            .bind(org_id)
            .bind(emp_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        let record = match row {
            Some(row) => OtpRecord {
                org_id,
                emp_id,
                otp: row.get("otp"),
                created_at: row.get("created_at"),
            },
            None => return Err(Error::OtpNotFound),
        };

        if record.is_expired_at(now) {
            // Terminal state: the stale row is removed, so a retry reports
            // NotFound rather than Expired.
            self.delete(org_id, emp_id).await?;
            warn!(
                subsystem = "database",
                component = "otps",
                op = "validate",
                org_id = org_id,
                emp_id = emp_id,
                "OTP expired"
            );
            return Err(Error::OtpExpired);
        }

        if record.otp != submitted {
            // Row kept: the correct code may still be retried until expiry.
            return Err(Error::OtpMismatch);
        }

        // Single use: consume on success.
        self.delete(org_id, emp_id).await?;

        info!(
            subsystem = "database",
            component = "otps",
            op = "validate",
            org_id = org_id,
            emp_id = emp_id,
            "OTP validated and consumed"
        );
        Ok(())
    }
}
