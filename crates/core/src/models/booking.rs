//! Guest booking model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Stable booking identifier, allocated from a persisted counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BookingId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(BookingId)
    }
}

/// Requesting department
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Radio,
    Digital,
    Magazine,
    Unbelievable,
}

impl Team {
    pub fn display_name(&self) -> &'static str {
        match self {
            Team::Radio => "Radio",
            Team::Digital => "Digital",
            Team::Magazine => "Magazine",
            Team::Unbelievable => "Unbelievable",
        }
    }

    /// Short label used in the staff selector
    pub fn short_name(&self) -> &'static str {
        match self {
            Team::Radio => "Radio",
            Team::Digital => "Digital",
            Team::Magazine => "Mag",
            Team::Unbelievable => "Unbelievable",
        }
    }

    pub fn all() -> &'static [Team] {
        &[Team::Radio, Team::Digital, Team::Magazine, Team::Unbelievable]
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Team {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Team::all()
            .iter()
            .copied()
            .find(|t| t.display_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown team '{}'", s))
    }
}

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
}

impl BookingStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            other => Err(format!("Unknown status '{}'", other)),
        }
    }
}

/// A guest appearance request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestBooking {
    pub id: BookingId,
    pub name: String,
    pub team: Team,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default)]
    pub slot: String,
    pub status: BookingStatus,
    #[serde(rename = "isTBC", default)]
    pub is_tbc: bool,
    #[serde(default, with = "iso_timestamp_opt")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cross_pollination: Option<bool>,
    #[serde(default)]
    pub notes: String,
    pub created_by: String,
    #[serde(with = "iso_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl GuestBooking {
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    pub fn is_pending(&self) -> bool {
        self.status == BookingStatus::Pending
    }

    /// Day used to place this booking on the calendar.
    ///
    /// Falls back to the creation time when no event date is recorded.
    pub fn calendar_day(&self) -> NaiveDate {
        self.event_date.unwrap_or(self.timestamp).date_naive()
    }

    /// Human readable event date, "TBC" while the date is unset
    pub fn date_label(&self) -> String {
        match (self.is_tbc, self.event_date) {
            (false, Some(date)) => date.format("%a %-d %b %Y").to_string(),
            _ => "TBC".to_string(),
        }
    }
}

/// Input for creating a booking
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub name: String,
    pub team: Team,
    pub room: Option<String>,
    pub slot: String,
    pub status: BookingStatus,
    pub is_tbc: bool,
    pub event_date: Option<DateTime<Utc>>,
    pub cross_pollination: Option<bool>,
    pub notes: String,
    /// Name of the submitting staff member; a placeholder is used when absent
    pub submitted_by: Option<String>,
}

impl NewBooking {
    /// A pending request with its date still to be confirmed
    pub fn new(name: impl Into<String>, team: Team, slot: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team,
            room: None,
            slot: slot.into(),
            status: BookingStatus::Pending,
            is_tbc: true,
            event_date: None,
            cross_pollination: None,
            notes: String::new(),
            submitted_by: None,
        }
    }

    pub fn with_event_date(mut self, date: DateTime<Utc>) -> Self {
        self.event_date = Some(date);
        self.is_tbc = false;
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_cross_pollination(mut self, available: bool, notes: impl Into<String>) -> Self {
        self.cross_pollination = Some(available);
        self.notes = notes.into();
        self
    }

    pub fn submitted_by(mut self, name: impl Into<String>) -> Self {
        self.submitted_by = Some(name.into());
        self
    }
}

/// Editable fields of an existing booking, applied by id
#[derive(Debug, Clone, PartialEq)]
pub struct BookingUpdate {
    pub id: BookingId,
    pub name: String,
    pub team: Team,
    pub room: Option<String>,
    pub slot: String,
    pub status: BookingStatus,
    pub is_tbc: bool,
    pub event_date: Option<DateTime<Utc>>,
    pub cross_pollination: Option<bool>,
    pub notes: String,
}

impl From<&GuestBooking> for BookingUpdate {
    fn from(booking: &GuestBooking) -> Self {
        Self {
            id: booking.id,
            name: booking.name.clone(),
            team: booking.team,
            room: booking.room.clone(),
            slot: booking.slot.clone(),
            status: booking.status,
            is_tbc: booking.is_tbc,
            event_date: booking.event_date,
            cross_pollination: booking.cross_pollination,
            notes: booking.notes.clone(),
        }
    }
}

/// Extra fields merged by a status transition.
///
/// Identity and provenance fields are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusExtra {
    pub cross_pollination: Option<bool>,
    pub notes: Option<String>,
}

impl StatusExtra {
    pub fn cross_pollination(available: bool, notes: impl Into<String>) -> Self {
        Self {
            cross_pollination: Some(available),
            notes: Some(notes.into()),
        }
    }
}

/// RFC3339 with millisecond precision, like a browser's `toISOString`
mod iso_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::storage::parse::parse_timestamp;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

mod iso_timestamp_opt {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::storage::parse::parse_timestamp;

    pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_str(&v.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        // Empty strings were written by the old form when the date was cleared
        match Option::<String>::deserialize(d)? {
            Some(raw) if !raw.trim().is_empty() => parse_timestamp(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> GuestBooking {
        GuestBooking {
            id: BookingId(2),
            name: "Jane Smith".to_string(),
            team: Team::Digital,
            room: None,
            slot: "Social Media IG Live 10min".to_string(),
            status: BookingStatus::Confirmed,
            is_tbc: false,
            event_date: Some(Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()),
            cross_pollination: Some(true),
            notes: "Available till 2pm".to_string(),
            created_by: "Mike Tyson".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_serializes_with_storage_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["isTBC"], false);
        assert_eq!(json["eventDate"], "2025-03-14T09:30:00.000Z");
        assert_eq!(json["crossPollination"], true);
        assert_eq!(json["createdBy"], "Mike Tyson");
        assert_eq!(json["team"], "Digital");
        assert!(json.get("room").is_none());
    }

    #[test]
    fn test_reads_legacy_record() {
        // Date-only event date and no isTBC flag, as the old form produced
        let raw = r#"{
            "id": 1736500000000,
            "name": "Pastor David",
            "team": "Magazine",
            "room": "Gospel Room",
            "slot": "Full Interview Feature",
            "status": "Pending",
            "crossPollination": null,
            "notes": "",
            "createdBy": "Alice Wonderland",
            "timestamp": "2025-01-10T08:00:00.000Z",
            "eventDate": "2025-01-20"
        }"#;
        let booking: GuestBooking = serde_json::from_str(raw).unwrap();
        assert_eq!(booking.id, BookingId(1736500000000));
        assert!(!booking.is_tbc);
        assert_eq!(
            booking.calendar_day(),
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
        );
        assert_eq!(booking.room.as_deref(), Some("Gospel Room"));
    }

    #[test]
    fn test_empty_event_date_reads_as_none() {
        let raw = r#"{"id":5,"name":"X","team":"Radio","status":"Pending","isTBC":true,
            "eventDate":"","createdBy":"Staff Member","timestamp":"2025-01-10T08:00:00Z"}"#;
        let booking: GuestBooking = serde_json::from_str(raw).unwrap();
        assert_eq!(booking.event_date, None);
        assert_eq!(booking.date_label(), "TBC");
    }

    #[test]
    fn test_calendar_day_falls_back_to_timestamp() {
        let mut booking = sample();
        booking.event_date = None;
        assert_eq!(
            booking.calendar_day(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_date_label() {
        let mut booking = sample();
        assert_eq!(booking.date_label(), "Fri 14 Mar 2025");
        booking.is_tbc = true;
        assert_eq!(booking.date_label(), "TBC");
    }

    #[test]
    fn test_parse_team_and_status() {
        assert_eq!("magazine".parse::<Team>().unwrap(), Team::Magazine);
        assert!("sport".parse::<Team>().is_err());
        assert_eq!(
            "Confirmed".parse::<BookingStatus>().unwrap(),
            BookingStatus::Confirmed
        );
    }

    #[test]
    fn test_new_booking_builder() {
        let date = Utc.with_ymd_and_hms(2025, 5, 2, 10, 0, 0).unwrap();
        let input = NewBooking::new("Guest", Team::Radio, "Breakfast")
            .with_event_date(date)
            .with_room("Radio Studio 2")
            .submitted_by("Sarah Connor");
        assert!(!input.is_tbc);
        assert_eq!(input.event_date, Some(date));
        assert_eq!(input.status, BookingStatus::Pending);
        assert_eq!(input.submitted_by.as_deref(), Some("Sarah Connor"));
    }
}
