//! Derived views over a guest list
//!
//! All filters borrow from the snapshot they are given and keep its order.

use crate::models::{BookingStatus, GuestBooking};

/// Status selector used by the admin listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Confirmed,
}

impl StatusFilter {
    pub fn matches(&self, booking: &GuestBooking) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => booking.status == BookingStatus::Pending,
            StatusFilter::Confirmed => booking.status == BookingStatus::Confirmed,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "confirmed" => Ok(StatusFilter::Confirmed),
            other => Err(format!("Unknown status filter '{}'", other)),
        }
    }
}

/// Case-insensitive match of name, team or status
fn matches_query(booking: &GuestBooking, lower_query: &str) -> bool {
    booking.name.to_lowercase().contains(lower_query)
        || booking.team.display_name().to_lowercase().contains(lower_query)
        || booking.status.display_name().to_lowercase().contains(lower_query)
}

/// Free-text search; an empty query returns every record
pub fn search<'a, I>(records: I, query: &str) -> Vec<&'a GuestBooking>
where
    I: IntoIterator<Item = &'a GuestBooking>,
{
    if query.is_empty() {
        return records.into_iter().collect();
    }
    let lower_query = query.to_lowercase();
    records
        .into_iter()
        .filter(|b| matches_query(b, &lower_query))
        .collect()
}

/// Records with exactly the given status
pub fn by_status<'a, I>(records: I, status: BookingStatus) -> Vec<&'a GuestBooking>
where
    I: IntoIterator<Item = &'a GuestBooking>,
{
    records.into_iter().filter(|b| b.status == status).collect()
}

/// Split into (pending, confirmed)
pub fn partition<'a, I>(records: I) -> (Vec<&'a GuestBooking>, Vec<&'a GuestBooking>)
where
    I: IntoIterator<Item = &'a GuestBooking>,
{
    records.into_iter().partition(|b| b.is_pending())
}

/// Admin listing: term matches name or team only, combined with a status filter
pub fn admin_filter<'a, I>(records: I, term: &str, status: StatusFilter) -> Vec<&'a GuestBooking>
where
    I: IntoIterator<Item = &'a GuestBooking>,
{
    let term = term.to_lowercase();
    records
        .into_iter()
        .filter(|b| {
            b.name.to_lowercase().contains(&term)
                || b.team.display_name().to_lowercase().contains(&term)
        })
        .filter(|b| status.matches(b))
        .collect()
}
