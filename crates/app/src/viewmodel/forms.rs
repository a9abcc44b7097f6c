//! Request, confirm and edit forms
//!
//! Forms hold the user's draft and only touch the store on submit. Rule
//! violations come back as `FormOutcome::Rejected` so the form can re-prompt;
//! storage failures are returned as errors.

use chrono::{DateTime, Utc};
use guesthub_core::{
    BookingId, BookingStatus, BookingUpdate, Error, GuestBooking, NewBooking, Result, StatusExtra,
    Team, ValidationError,
};

use crate::state::AppState;

/// Result of submitting a form
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Saved(GuestBooking),
    /// Confirming needs the cross-pollination answer first
    NeedsCrossPollination,
    /// Refused by the store; the message is for the user
    Rejected(String),
}

/// User-facing wording for a refused write
pub fn rejection_message(error: &ValidationError) -> String {
    match error {
        ValidationError::EmptyName => "Please enter the guest's name.".to_string(),
        ValidationError::ConfirmedWhileTbc => {
            "A confirmed booking needs a date. Set the event date before confirming.".to_string()
        }
        ValidationError::MissingEventDate => {
            "Please choose an event date or mark the date as TBC.".to_string()
        }
        ValidationError::CrossPollinationUnanswered => {
            "Please say whether the guest is available to other departments.".to_string()
        }
    }
}

/// Turn validation failures into a rejection, pass everything else through
fn settle(result: Result<GuestBooking>) -> Result<FormOutcome> {
    match result {
        Ok(booking) => Ok(FormOutcome::Saved(booking)),
        Err(Error::Validation(e)) => Ok(FormOutcome::Rejected(rejection_message(&e))),
        Err(e) => Err(e),
    }
}

/// New request form
#[derive(Debug, Clone)]
pub struct RequestForm {
    pub draft: NewBooking,
}

impl RequestForm {
    /// Blank request for the first configured room
    pub fn new(state: &AppState) -> Self {
        let mut draft = NewBooking::new("", Team::Radio, "");
        draft.room = state.config.rooms.first().cloned();
        Self { draft }
    }

    pub fn set_event_date(&mut self, date: Option<DateTime<Utc>>) {
        self.draft.event_date = date;
        self.draft.is_tbc = date.is_none();
    }

    /// Submit; a confirmed request without a cross-pollination answer is held
    pub fn submit(&mut self, state: &mut AppState) -> Result<FormOutcome> {
        if self.draft.status == BookingStatus::Confirmed && self.draft.cross_pollination.is_none() {
            return Ok(FormOutcome::NeedsCrossPollination);
        }

        let mut input = self.draft.clone();
        if input.submitted_by.is_none() {
            input.submitted_by = state.submitter();
        }
        settle(state.guests.create(input))
    }

    /// Record the cross-pollination answer and submit
    pub fn answer_cross_pollination(
        &mut self,
        state: &mut AppState,
        available: bool,
        notes: &str,
    ) -> Result<FormOutcome> {
        self.draft.cross_pollination = Some(available);
        // Notes only mean something when the guest is available
        self.draft.notes = if available { notes.to_string() } else { String::new() };
        self.submit(state)
    }
}

/// Confirmation prompt for a pending booking
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub id: BookingId,
    pub cross_pollination: Option<bool>,
    pub notes: String,
}

impl ConfirmDialog {
    pub fn new(id: BookingId) -> Self {
        Self {
            id,
            cross_pollination: None,
            notes: String::new(),
        }
    }

    pub fn answer(mut self, available: bool, notes: &str) -> Self {
        self.cross_pollination = Some(available);
        self.notes = if available { notes.to_string() } else { String::new() };
        self
    }

    pub fn confirm(&self, state: &mut AppState) -> Result<FormOutcome> {
        let Some(available) = self.cross_pollination else {
            return Ok(FormOutcome::NeedsCrossPollination);
        };
        settle(state.guests.update_status(
            self.id,
            BookingStatus::Confirmed,
            StatusExtra::cross_pollination(available, self.notes.clone()),
        ))
    }
}

/// Edit form over an existing booking
#[derive(Debug, Clone)]
pub struct EditDialog {
    pub draft: BookingUpdate,
}

impl EditDialog {
    pub fn open(state: &AppState, id: BookingId) -> Result<Self> {
        let booking = state.guests.get(id).ok_or(Error::NotFound(id))?;
        Ok(Self {
            draft: BookingUpdate::from(booking),
        })
    }

    pub fn set_event_date(&mut self, date: Option<DateTime<Utc>>) {
        self.draft.event_date = date;
        self.draft.is_tbc = date.is_none();
    }

    pub fn save(&self, state: &mut AppState) -> Result<FormOutcome> {
        settle(state.guests.update(self.draft.clone()))
    }
}
