//! Error types for scribe.

use thiserror::Error;

/// Result type alias using scribe's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for scribe operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Referenced organization/employee/client/note absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate employee or client id
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or malformed request field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No passcode on record for the (org, employee) pair
    #[error("OTP not found or expired")]
    OtpNotFound,

    /// Passcode older than the validity window; the record has been removed
    #[error("OTP expired")]
    OtpExpired,

    /// Submitted passcode does not match the stored one; the record is kept
    #[error("Invalid OTP")]
    OtpMismatch,

    /// Outbound email delivery failed
    #[error("Mail error: {0}")]
    Mail(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(e.to_string())
    }
}

impl Error {
    /// True when the wrapped database error is a unique-constraint violation.
    ///
    /// Used at the API boundary to surface racing duplicate inserts as
    /// Conflict rather than a bare 500.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Error::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("Organization not found".to_string());
        assert_eq!(err.to_string(), "Not found: Organization not found");
    }

    #[test]
    fn test_error_display_conflict() {
        let err = Error::Conflict("duplicate employee".to_string());
        assert_eq!(err.to_string(), "Conflict: duplicate employee");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("orgId is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: orgId is required");
    }

    #[test]
    fn test_error_display_otp_states() {
        assert_eq!(Error::OtpNotFound.to_string(), "OTP not found or expired");
        assert_eq!(Error::OtpExpired.to_string(), "OTP expired");
        assert_eq!(Error::OtpMismatch.to_string(), "Invalid OTP");
    }

    #[test]
    fn test_error_display_mail() {
        let err = Error::Mail("relay refused".to_string());
        assert_eq!(err.to_string(), "Mail error: relay refused");
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::Database(_)));
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i64> {
            Ok(7)
        }
        assert_eq!(get_result().unwrap(), 7);
    }
}
