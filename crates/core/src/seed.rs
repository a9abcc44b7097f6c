//! Built-in sample bookings used when no guest list has been stored

use chrono::{DateTime, Duration, Utc};

use crate::models::{BookingId, BookingStatus, GuestBooking, Team};

/// Counter value following the seed ids
pub const SEED_NEXT_ID: u64 = 4;

/// The sample guest list, with dates relative to `now`
pub fn seed_bookings(now: DateTime<Utc>) -> Vec<GuestBooking> {
    vec![
        GuestBooking {
            id: BookingId(1),
            name: "John Peterson".to_string(),
            team: Team::Radio,
            room: None,
            slot: "15 min slot on Inspirational Breakfast".to_string(),
            status: BookingStatus::Pending,
            is_tbc: false,
            event_date: Some(now),
            cross_pollination: None,
            notes: String::new(),
            created_by: "Sarah Connor".to_string(),
            timestamp: now,
        },
        GuestBooking {
            id: BookingId(2),
            name: "Jane Smith".to_string(),
            team: Team::Digital,
            room: None,
            slot: "Social Media IG Live 10min".to_string(),
            status: BookingStatus::Confirmed,
            is_tbc: false,
            event_date: Some(now + Duration::days(1)),
            cross_pollination: Some(true),
            notes: "Available till 2pm for Quick Fire questions".to_string(),
            created_by: "Mike Tyson".to_string(),
            timestamp: now - Duration::days(1),
        },
        GuestBooking {
            id: BookingId(3),
            name: "Pastor David".to_string(),
            team: Team::Magazine,
            room: None,
            slot: "Full Interview Feature".to_string(),
            status: BookingStatus::Confirmed,
            is_tbc: false,
            event_date: Some(now + Duration::days(4)),
            cross_pollination: Some(false),
            notes: String::new(),
            created_by: "Alice Wonderland".to_string(),
            timestamp: now - Duration::days(2),
        },
    ]
}
