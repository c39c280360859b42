//! # scribe-core
//!
//! Core types, traits, and abstractions for the scribe backend.
//!
//! This crate provides the domain model (organizations, employees, clients,
//! meeting notes, one-time passcodes), the repository trait definitions the
//! database layer implements, and the error taxonomy shared by every crate.

pub mod error;
pub mod models;
pub mod time;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use time::{
    format_wire_datetime, parse_wire_date, parse_wire_datetime, truncate_to_micros,
    WIRE_DATETIME_FORMAT,
};
pub use traits::*;
