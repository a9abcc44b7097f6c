//! GuestHub Core Library
//!
//! Booking records, the local store that persists them, derived views and
//! calendar bucketing for the guest booking hub.

pub mod auth;
pub mod calendar;
pub mod config;
pub mod error;
pub mod filters;
pub mod invariants;
pub mod models;
pub mod seed;
pub mod storage;
pub mod store;

pub use auth::{SessionStore, ADMIN_PASSWORD, ADMIN_USER};
pub use calendar::{CalendarView, DayBucket, ViewMode};
pub use config::{ConfigError, HubConfig, StaffMember};
pub use error::{Error, Result, ValidationError};
pub use filters::StatusFilter;
pub use models::*;
pub use storage::{
    Database, GuestSnapshot, KeyValueStore, LocalStorage, StorageEvent, StorageSubscription,
};
pub use store::{GuestStore, StoreChange, StoreListener, StoreOptions};
