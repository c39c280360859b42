//! Employee lookups.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};

use scribe_core::{EmployeeRepository, Error, Result};

/// PostgreSQL implementation of EmployeeRepository.
#[derive(Clone)]
pub struct PgEmployeeRepository {
    pool: Pool<Postgres>,
}

impl PgEmployeeRepository {
    /// Create a new PgEmployeeRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn email_of(&self, org_id: i64, emp_id: i64) -> Result<Option<String>> {
        let row = sqlx::query("SELECT emp_email FROM employees WHERE org_id = $1 AND emp_id = $2")
            .bind(org_id)
            .bind(emp_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.map(|r| r.get::<String, _>("emp_email")))
    }
}
