//! Calendar bucketing for confirmed bookings
//!
//! Weeks start on Monday. A month view is padded out to whole weeks, so it
//! may show days from the neighbouring months.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::GuestBooking;

/// Span of the visible calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Week,
    Month,
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            other => Err(format!("Unknown view mode '{}'", other)),
        }
    }
}

/// One calendar day and the confirmed bookings falling on it
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket<'a> {
    pub date: NaiveDate,
    /// Day belongs to the anchor's month (neighbouring days are shown dimmed)
    pub in_anchor_month: bool,
    pub is_today: bool,
    pub bookings: Vec<&'a GuestBooking>,
}

/// Navigable week or month view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    mode: ViewMode,
    anchor: NaiveDate,
}

/// Monday on or before `date`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Sunday on or after `date`
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date) + Days::new(6)
}

/// Same day in another month, clamped to that month's last day
fn clamp_to_month(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (28..=day.max(28))
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d.min(day)))
}

impl CalendarView {
    pub fn new(mode: ViewMode, anchor: NaiveDate) -> Self {
        Self { mode, anchor }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// First and last visible day, inclusive
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        match self.mode {
            ViewMode::Week => (start_of_week(self.anchor), end_of_week(self.anchor)),
            ViewMode::Month => {
                let first = self.anchor.with_day(1).unwrap_or(self.anchor);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(first);
                (start_of_week(first), end_of_week(last))
            }
        }
    }

    /// Every visible day in order
    pub fn days(&self) -> Vec<NaiveDate> {
        let (start, end) = self.range();
        start.iter_days().take_while(|d| *d <= end).collect()
    }

    /// Advance by one week or one month
    pub fn next(&mut self) {
        self.anchor = match self.mode {
            ViewMode::Week => self.anchor.checked_add_days(Days::new(7)),
            ViewMode::Month => self.anchor.checked_add_months(Months::new(1)),
        }
        .unwrap_or(self.anchor);
    }

    /// Go back by one week or one month
    pub fn previous(&mut self) {
        self.anchor = match self.mode {
            ViewMode::Week => self.anchor.checked_sub_days(Days::new(7)),
            ViewMode::Month => self.anchor.checked_sub_months(Months::new(1)),
        }
        .unwrap_or(self.anchor);
    }

    /// Jump back to the given current date, keeping the mode
    pub fn today(&mut self, today: NaiveDate) {
        self.anchor = today;
    }

    /// Month picker: move the anchor to `month` (1-12) of the same year.
    /// Returns false for an out-of-range month.
    pub fn set_month(&mut self, month: u32) -> bool {
        match clamp_to_month(self.anchor.year(), month, self.anchor.day()) {
            Some(date) => {
                self.anchor = date;
                true
            }
            None => false,
        }
    }

    /// Year picker: move the anchor to the same month of `year`
    pub fn set_year(&mut self, year: i32) -> bool {
        match clamp_to_month(year, self.anchor.month(), self.anchor.day()) {
            Some(date) => {
                self.anchor = date;
                true
            }
            None => false,
        }
    }

    /// Heading for the visible period
    pub fn title(&self) -> String {
        match self.mode {
            ViewMode::Week => {
                let (start, end) = self.range();
                format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
            }
            ViewMode::Month => self.anchor.format("%B %Y").to_string(),
        }
    }

    /// Place confirmed bookings into one bucket per visible day.
    ///
    /// Pending bookings and bookings outside the range are skipped; input
    /// order is kept within a day.
    pub fn buckets<'a, I>(&self, records: I, today: NaiveDate) -> Vec<DayBucket<'a>>
    where
        I: IntoIterator<Item = &'a GuestBooking>,
    {
        let (start, _) = self.range();
        let mut buckets: Vec<DayBucket<'a>> = self
            .days()
            .into_iter()
            .map(|date| DayBucket {
                date,
                in_anchor_month: date.year() == self.anchor.year()
                    && date.month() == self.anchor.month(),
                is_today: date == today,
                bookings: Vec::new(),
            })
            .collect();

        for booking in records.into_iter().filter(|b| b.is_confirmed()) {
            let offset = (booking.calendar_day() - start).num_days();
            if offset < 0 {
                continue;
            }
            if let Some(bucket) = buckets.get_mut(offset as usize) {
                bucket.bookings.push(booking);
            }
        }

        buckets
    }
}
