//! Repository traits for scribe's storage layer.
//!
//! These traits define the interfaces the database layer must satisfy,
//! keeping handlers testable against alternative implementations.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Result;
use crate::models::*;

/// Atomic organization + employee registration.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Register an employee, creating the organization row if it does not
    /// exist yet (idempotent on the organization). Both inserts run in one
    /// transaction.
    ///
    /// Fails with `Conflict` if (org_id, emp_id) is already registered.
    async fn register(&self, org: NewOrganization, employee: NewEmployee) -> Result<()>;
}

/// Employee lookups needed by the OTP flow.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Email on file for (org_id, emp_id); `None` if the employee does not
    /// exist. An existing employee with a blank email yields `Some("")`.
    async fn email_of(&self, org_id: i64, emp_id: i64) -> Result<Option<String>>;
}

/// Client registration and listing.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Register a client under an organization, assigning the next
    /// sequential client_id (1 for the organization's first client).
    ///
    /// Fails with `NotFound` if the organization does not exist and with
    /// `Conflict` if the assigned id was taken by a racing registration.
    async fn register(&self, req: NewClient) -> Result<i64>;

    /// All clients of an organization; empty if none.
    async fn list(&self, org_id: i64) -> Result<Vec<ClientSummary>>;

    /// Whether (org_id, client_id) is a registered client.
    async fn exists(&self, org_id: i64, client_id: i64) -> Result<bool>;
}

/// Meeting note storage.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note, assigning a fresh meeting_id and the current
    /// timestamp (truncated to microseconds). Returns the meeting_id.
    async fn insert(&self, req: NewNote) -> Result<i64>;

    /// Notes for (org, employee, client), newest first, optionally
    /// restricted to a single calendar date.
    async fn list(
        &self,
        org_id: i64,
        emp_id: i64,
        client_id: i64,
        on_date: Option<NaiveDate>,
    ) -> Result<Vec<NoteRecord>>;

    /// Replace the text of the note matching the exact
    /// (org, employee, client, datetime) tuple. Audio and timestamp are
    /// left untouched. Fails with `NotFound` if no row matches.
    async fn update_text(
        &self,
        org_id: i64,
        emp_id: i64,
        client_id: i64,
        datetime: DateTime<Utc>,
        new_text: &str,
    ) -> Result<()>;
}

/// One-time passcode issuance and validation.
///
/// State machine per (org, employee): NoOTP → Pending → {Consumed |
/// Expired}; both terminal states delete the row. `issue` is valid from any
/// state and always yields Pending, discarding a prior pending code.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Upsert the pending code for (org_id, emp_id). Any unconsumed prior
    /// code becomes permanently invalid, even if unexpired.
    async fn issue(&self, org_id: i64, emp_id: i64, code: &str, now: DateTime<Utc>) -> Result<()>;

    /// Validate and consume the pending code.
    ///
    /// - `OtpNotFound` if no row exists.
    /// - `OtpExpired` if older than the validity window; the row is deleted.
    /// - `OtpMismatch` if the codes differ; the row is kept so the correct
    ///   code can still be retried until expiry.
    /// - On match the row is deleted (single use): replay after a correct
    ///   submission fails with `OtpNotFound`.
    async fn validate(
        &self,
        org_id: i64,
        emp_id: i64,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> Result<()>;
}
