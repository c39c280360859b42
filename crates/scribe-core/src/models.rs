//! Domain models for scribe.
//!
//! Organizations own employees and clients; notes reference all three.
//! Rows are insert-only except for a note's text, so the "new row" request
//! structs below are the whole write surface.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Minutes a one-time passcode stays valid after issuance.
pub const OTP_TTL_MINUTES: i64 = 5;

/// New organization row. org_id is caller-assigned (tenant-chosen), not
/// generated.
#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub org_id: i64,
    pub name: String,
    pub shortname: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// New employee row, keyed by (org_id, emp_id).
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub org_id: i64,
    pub emp_id: i64,
    pub name: String,
    pub shortname: String,
    pub phone: String,
    pub email: String,
}

/// New client row. client_id is assigned by the repository (per-org
/// sequential), not by the caller.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub org_id: i64,
    pub name: String,
    pub shortname: Option<String>,
    pub phone: String,
    pub email: String,
}

/// Client listing entry, serialized with the wire field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSummary {
    #[serde(rename = "ClientID")]
    pub client_id: i64,
    #[serde(rename = "ClientName")]
    pub name: String,
    #[serde(rename = "ClientShortname")]
    pub shortname: Option<String>,
}

/// New meeting note. meeting_id and the creation timestamp are assigned by
/// the repository.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub org_id: i64,
    pub emp_id: i64,
    pub client_id: i64,
    pub text: String,
    pub audio: Option<Vec<u8>>,
}

/// Stored meeting note as returned by a fetch.
#[derive(Debug, Clone)]
pub struct NoteRecord {
    pub datetime: DateTime<Utc>,
    pub textnotes: String,
    pub audionotes: Option<Vec<u8>>,
}

/// Pending passcode row for one (org, employee) pair.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub org_id: i64,
    pub emp_id: i64,
    pub otp: String,
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    /// True once the record has outlived its validity window.
    ///
    /// Strictly greater than the TTL: a code aged exactly [`OTP_TTL_MINUTES`]
    /// is still accepted.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > Duration::minutes(OTP_TTL_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_created_at(created_at: DateTime<Utc>) -> OtpRecord {
        OtpRecord {
            org_id: 1,
            emp_id: 7,
            otp: "4321".to_string(),
            created_at,
        }
    }

    #[test]
    fn test_otp_fresh_is_not_expired() {
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let rec = record_created_at(created);
        assert!(!rec.is_expired_at(created + Duration::seconds(30)));
    }

    #[test]
    fn test_otp_at_exact_ttl_is_still_valid() {
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let rec = record_created_at(created);
        assert!(!rec.is_expired_at(created + Duration::minutes(OTP_TTL_MINUTES)));
    }

    #[test]
    fn test_otp_past_ttl_is_expired() {
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let rec = record_created_at(created);
        let just_past = created + Duration::minutes(OTP_TTL_MINUTES) + Duration::microseconds(1);
        assert!(rec.is_expired_at(just_past));
    }

    #[test]
    fn test_client_summary_wire_field_names() {
        let summary = ClientSummary {
            client_id: 3,
            name: "Acme".to_string(),
            shortname: Some("ACM".to_string()),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["ClientID"], 3);
        assert_eq!(json["ClientName"], "Acme");
        assert_eq!(json["ClientShortname"], "ACM");
    }

    #[test]
    fn test_client_summary_null_shortname() {
        let summary = ClientSummary {
            client_id: 1,
            name: "Solo".to_string(),
            shortname: None,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["ClientShortname"].is_null());
    }
}
