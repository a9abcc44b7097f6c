//! Data models for GuestHub

mod booking;
mod session;

pub use booking::*;
pub use session::*;
