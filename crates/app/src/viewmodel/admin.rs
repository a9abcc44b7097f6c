//! Admin portal: filtered listing and destructive actions

use guesthub_core::filters::admin_filter;
use guesthub_core::{BookingId, GuestBooking, Result, StatusFilter};

use crate::state::AppState;

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(GuestBooking),
    /// Nothing had that id
    Missing,
    AdminRequired,
}

#[derive(Debug, Clone, Default)]
pub struct AdminPortal {
    pub term: String,
    pub status: StatusFilter,
}

impl AdminPortal {
    pub fn rows<'a>(&self, state: &'a AppState) -> Vec<&'a GuestBooking> {
        admin_filter(state.guests.list(), &self.term, self.status)
    }

    pub fn delete(&self, state: &mut AppState, id: BookingId) -> Result<DeleteOutcome> {
        if !state.session.is_admin() {
            return Ok(DeleteOutcome::AdminRequired);
        }
        Ok(match state.guests.delete(id)? {
            Some(removed) => DeleteOutcome::Deleted(removed),
            None => DeleteOutcome::Missing,
        })
    }

    /// Wipe the guest list back to the sample data; false without an admin session
    pub fn reset(&self, state: &mut AppState) -> Result<bool> {
        if !state.session.is_admin() {
            return Ok(false);
        }
        state.guests.reset_to_seed()?;
        Ok(true)
    }
}
