//! Persisted guest list layout
//!
//! The guest list lives under a single key as a versioned JSON envelope.
//! Unversioned data (a bare array of bookings) is still read.

use serde::{Deserialize, Serialize};

use crate::models::{BookingId, GuestBooking};

/// Storage key holding the guest list
pub const GUESTS_KEY: &str = "premierGuests";

/// Storage key holding the current session
pub const SESSION_KEY: &str = "session";

/// Current envelope version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Versioned guest list as written to storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSnapshot {
    pub version: u32,
    /// Next id to hand out; never decreases, so deleted ids are not reused
    pub next_id: u64,
    pub guests: Vec<GuestBooking>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredGuests {
    Versioned(GuestSnapshot),
    Legacy(Vec<GuestBooking>),
}

impl GuestSnapshot {
    pub fn new(guests: Vec<GuestBooking>, next_id: u64) -> Self {
        let next_id = next_id.max(Self::min_next_id(&guests));
        Self {
            version: SNAPSHOT_VERSION,
            next_id,
            guests,
        }
    }

    /// Smallest counter value that cannot collide with existing ids
    fn min_next_id(guests: &[GuestBooking]) -> u64 {
        guests
            .iter()
            .map(|g| g.id.0.saturating_add(1))
            .max()
            .unwrap_or(1)
    }

    /// Decode a stored blob in either layout
    pub fn decode(raw: &str) -> serde_json::Result<Self> {
        match serde_json::from_str::<StoredGuests>(raw)? {
            StoredGuests::Versioned(snapshot) => Ok(Self::new(snapshot.guests, snapshot.next_id)),
            StoredGuests::Legacy(guests) => Ok(Self::new(guests, 0)),
        }
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn allocate_id(&mut self) -> BookingId {
        let id = BookingId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = r#"[
        {"id":7,"name":"A","team":"Radio","slot":"s","status":"Pending","crossPollination":null,
         "notes":"","createdBy":"Sarah Connor","timestamp":"2025-01-10T08:00:00.000Z",
         "eventDate":"2025-01-12T08:00:00.000Z"},
        {"id":3,"name":"B","team":"Digital","slot":"s","status":"Confirmed","crossPollination":true,
         "notes":"n","createdBy":"Mike Tyson","timestamp":"2025-01-09T08:00:00.000Z",
         "eventDate":"2025-01-11T08:00:00.000Z"}
    ]"#;

    #[test]
    fn test_decode_legacy_array() {
        let snapshot = GuestSnapshot::decode(LEGACY).unwrap();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.guests.len(), 2);
        assert_eq!(snapshot.next_id, 8);
    }

    #[test]
    fn test_encode_is_versioned() {
        let snapshot = GuestSnapshot::decode(LEGACY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&snapshot.encode().unwrap()).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["nextId"], 8);
        assert_eq!(value["guests"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_counter_never_below_existing_ids() {
        let raw = r#"{"version":1,"nextId":2,"guests":[
            {"id":9,"name":"A","team":"Radio","status":"Pending","isTBC":true,
             "createdBy":"x","timestamp":"2025-01-10T08:00:00Z"}]}"#;
        let mut snapshot = GuestSnapshot::decode(raw).unwrap();
        assert_eq!(snapshot.allocate_id(), BookingId(10));
        assert_eq!(snapshot.allocate_id(), BookingId(11));
    }

    #[test]
    fn test_counter_survives_deletion() {
        let raw = r#"{"version":1,"nextId":42,"guests":[]}"#;
        let mut snapshot = GuestSnapshot::decode(raw).unwrap();
        assert_eq!(snapshot.allocate_id(), BookingId(42));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(GuestSnapshot::decode("{not json").is_err());
        assert!(GuestSnapshot::decode(r#"{"guests": 5}"#).is_err());
    }
}
