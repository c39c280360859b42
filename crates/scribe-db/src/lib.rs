//! # scribe-db
//!
//! PostgreSQL database layer for scribe.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for organizations/employees, clients,
//!   meeting notes, and one-time passcodes
//! - Startup schema migrations (behind the `migrations` feature)
//!
//! ## Example
//!
//! ```rust,ignore
//! use scribe_db::Database;
//! use scribe_core::{NewClient, ClientRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/scribe").await?;
//!
//!     let client_id = db.clients.register(NewClient {
//!         org_id: 1,
//!         name: "Acme".to_string(),
//!         shortname: Some("ACM".to_string()),
//!         phone: "NA".to_string(),
//!         email: "ops@acme.example".to_string(),
//!     }).await?;
//!
//!     println!("Registered client {}", client_id);
//!     Ok(())
//! }
//! ```

pub mod clients;
pub mod employees;
pub mod notes;
pub mod otps;
pub mod pool;
pub mod registration;

// Re-export core types
pub use scribe_core::*;

// Re-export repository implementations
pub use clients::PgClientRepository;
pub use employees::PgEmployeeRepository;
pub use notes::PgNoteRepository;
pub use otps::PgOtpRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use registration::PgRegistrationRepository;

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Atomic organization + employee registration.
    pub registration: PgRegistrationRepository,
    /// Employee lookups for the OTP flow.
    pub employees: PgEmployeeRepository,
    /// Client registration and listing.
    pub clients: PgClientRepository,
    /// Meeting note storage.
    pub notes: PgNoteRepository,
    /// One-time passcode issuance and validation.
    pub otps: PgOtpRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            registration: PgRegistrationRepository::new(pool.clone()),
            employees: PgEmployeeRepository::new(pool.clone()),
            clients: PgClientRepository::new(pool.clone()),
            notes: PgNoteRepository::new(pool.clone()),
            otps: PgOtpRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    ///
    /// Idempotent; run once at startup before serving traffic.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
