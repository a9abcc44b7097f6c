//! Error types for GuestHub Core

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::BookingId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Booking not found: {0}")]
    NotFound(BookingId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Reasons a booking write is refused at the store boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("guest name must not be empty")]
    EmptyName,

    #[error("a confirmed booking cannot have its date marked TBC")]
    ConfirmedWhileTbc,

    #[error("an event date is required unless the date is TBC")]
    MissingEventDate,

    #[error("cross-pollination must be answered before confirming")]
    CrossPollinationUnanswered,
}

pub type Result<T> = std::result::Result<T, Error>;
