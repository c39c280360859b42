//! Organization + employee registration.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use tracing::info;

use scribe_core::{Error, NewEmployee, NewOrganization, RegistrationRepository, Result};

/// PostgreSQL implementation of RegistrationRepository.
#[derive(Clone)]
pub struct PgRegistrationRepository {
    pool: Pool<Postgres>,
}

impl PgRegistrationRepository {
    /// Create a new PgRegistrationRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PgRegistrationRepository {
    async fn register(&self, org: NewOrganization, employee: NewEmployee) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let org_exists =
            sqlx::query("SELECT EXISTS(SELECT 1 FROM organizations WHERE org_id = $1) AS present")
                .bind(org.org_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(Error::Database)?
                .get::<bool, _>("present");

        // Idempotent on the organization: a second employee of an existing
        // org skips the org insert.
        if !org_exists {
            sqlx::query(
                "INSERT INTO organizations (org_id, org_name, shortname, address, phone, email)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(org.org_id)
            .bind(&org.name)
            .bind(&org.shortname)
            .bind(&org.address)
            .bind(&org.phone)
            .bind(&org.email)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        }

        let emp_exists = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE org_id = $1 AND emp_id = $2) AS present",
        )
        .bind(employee.org_id)
        .bind(employee.emp_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::Database)?
        .get::<bool, _>("present");

        if emp_exists {
            return Err(Error::Conflict(
                "Employee with this empId already exists in this organization".to_string(),
            ));
        }

        sqlx::query(
            "INSERT INTO employees (org_id, emp_id, emp_name, emp_shortname, emp_phone, emp_email)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(employee.org_id)
        .bind(employee.emp_id)
        .bind(&employee.name)
        .bind(&employee.shortname)
        .bind(&employee.phone)
        .bind(&employee.email)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "database",
            component = "registration",
            op = "register",
            org_id = org.org_id,
            emp_id = employee.emp_id,
            org_created = !org_exists,
            "Registered employee"
        );
        Ok(())
    }
}
