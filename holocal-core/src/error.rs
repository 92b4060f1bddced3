//! Error types for holocal.

use thiserror::Error;

use crate::controller::ControllerState;

/// Errors that can occur in holocal operations.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// The remote call was rejected: network, auth or zome-side failure.
    #[error("Zome call failed: {0}")]
    Transport(String),

    /// A wire timestamp lies outside the representable millisecond domain.
    #[error("Timestamp decode error: {0}")]
    Decode(String),

    /// A record returned by the store is missing a required field.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("No time range supplied to the creation form")]
    MissingTimeRange,

    #[error("Cannot {action} while the calendar is {state}")]
    InvalidTransition {
        state: ControllerState,
        action: &'static str,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for holocal operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
