//! Booking write rules and developer guardrails
//!
//! `validate_booking` is the write boundary check every store mutation goes
//! through. The `assert_*` helpers are debug assertions for impossible
//! states and are compiled out in release builds.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::models::{BookingStatus, GuestBooking};

/// Check a booking about to be written.
///
/// `was_confirmed` is the stored status before the write; entering
/// `Confirmed` requires the cross-pollination question to be answered.
pub fn validate_booking(booking: &GuestBooking, was_confirmed: bool) -> Result<(), ValidationError> {
    if booking.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let confirmed = booking.status == BookingStatus::Confirmed;

    if confirmed && booking.is_tbc {
        return Err(ValidationError::ConfirmedWhileTbc);
    }

    if (confirmed || !booking.is_tbc) && booking.event_date.is_none() {
        return Err(ValidationError::MissingEventDate);
    }

    if confirmed && !was_confirmed && booking.cross_pollination.is_none() {
        return Err(ValidationError::CrossPollinationUnanswered);
    }

    Ok(())
}

/// Validate that a stored booking is internally consistent
pub fn assert_booking_invariants(booking: &GuestBooking) {
    debug_assert!(
        !(booking.is_confirmed() && booking.is_tbc),
        "Booking {} is confirmed but still TBC",
        booking.id
    );

    debug_assert!(
        !booking.is_confirmed() || booking.event_date.is_some(),
        "Booking {} is confirmed without an event date",
        booking.id
    );

    debug_assert!(
        !booking.name.trim().is_empty(),
        "Booking {} has empty name",
        booking.id
    );
}

/// Validate that no id appears twice in a guest list
pub fn assert_unique_ids(bookings: &[GuestBooking]) {
    let mut seen = HashSet::with_capacity(bookings.len());
    for booking in bookings {
        debug_assert!(
            seen.insert(booking.id),
            "Booking id {} appears more than once",
            booking.id
        );
    }
}

/// Validate that an edit left identity and provenance untouched
pub fn assert_provenance_unchanged(before: &GuestBooking, after: &GuestBooking) {
    debug_assert!(
        before.id == after.id
            && before.created_by == after.created_by
            && before.timestamp == after.timestamp,
        "Booking {} had id, createdBy or timestamp rewritten",
        before.id
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingId, Team};
    use chrono::Utc;

    fn make_booking() -> GuestBooking {
        GuestBooking {
            id: BookingId(1),
            name: "John Peterson".to_string(),
            team: Team::Radio,
            room: Some("Radio Studio 1".to_string()),
            slot: "15 min slot on Inspirational Breakfast".to_string(),
            status: BookingStatus::Pending,
            is_tbc: true,
            event_date: None,
            cross_pollination: None,
            notes: String::new(),
            created_by: "Sarah Connor".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_pending_tbc_is_valid() {
        assert_eq!(validate_booking(&make_booking(), false), Ok(()));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut booking = make_booking();
        booking.name = "   ".to_string();
        assert_eq!(
            validate_booking(&booking, false),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn test_confirmed_tbc_rejected() {
        let mut booking = make_booking();
        booking.status = BookingStatus::Confirmed;
        booking.event_date = Some(Utc::now());
        booking.cross_pollination = Some(false);
        assert_eq!(
            validate_booking(&booking, true),
            Err(ValidationError::ConfirmedWhileTbc)
        );
    }

    #[test]
    fn test_dated_booking_needs_date() {
        let mut booking = make_booking();
        booking.is_tbc = false;
        assert_eq!(
            validate_booking(&booking, false),
            Err(ValidationError::MissingEventDate)
        );
    }

    #[test]
    fn test_confirming_needs_cross_pollination() {
        let mut booking = make_booking();
        booking.status = BookingStatus::Confirmed;
        booking.is_tbc = false;
        booking.event_date = Some(Utc::now());
        assert_eq!(
            validate_booking(&booking, false),
            Err(ValidationError::CrossPollinationUnanswered)
        );

        // Already confirmed records may be edited without re-answering
        assert_eq!(validate_booking(&booking, true), Ok(()));

        booking.cross_pollination = Some(true);
        assert_eq!(validate_booking(&booking, false), Ok(()));
    }

    #[test]
    fn test_valid_booking_invariants() {
        assert_booking_invariants(&make_booking());
    }

    #[test]
    #[should_panic(expected = "appears more than once")]
    fn test_duplicate_ids_detected() {
        let booking = make_booking();
        assert_unique_ids(&[booking.clone(), booking]);
    }

    #[test]
    #[should_panic(expected = "rewritten")]
    fn test_provenance_change_detected() {
        let before = make_booking();
        let mut after = before.clone();
        after.created_by = "Someone Else".to_string();
        assert_provenance_unchanged(&before, &after);
    }
}
