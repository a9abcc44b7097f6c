//! Dashboard view model: request lists and the shared calendar

use chrono::{DateTime, NaiveDate, TimeZone};
use guesthub_core::filters::{partition, search};
use guesthub_core::{CalendarView, DayBucket, GuestBooking, HubConfig};

use crate::state::AppState;

/// Calendar date of `now` in its own time zone, used for the today marker
pub fn today_at<Tz: TimeZone>(now: DateTime<Tz>) -> NaiveDate {
    now.date_naive()
}

pub struct Dashboard {
    pub query: String,
    pub calendar: CalendarView,
}

impl Dashboard {
    pub fn new(config: &HubConfig, today: NaiveDate) -> Self {
        Self {
            query: String::new(),
            calendar: CalendarView::new(config.default_view, today),
        }
    }

    /// (pending, confirmed) after applying the search box
    pub fn lists<'a>(
        &self,
        state: &'a AppState,
    ) -> (Vec<&'a GuestBooking>, Vec<&'a GuestBooking>) {
        partition(search(state.guests.list(), &self.query))
    }

    pub fn pending<'a>(&self, state: &'a AppState) -> Vec<&'a GuestBooking> {
        self.lists(state).0
    }

    pub fn confirmed<'a>(&self, state: &'a AppState) -> Vec<&'a GuestBooking> {
        self.lists(state).1
    }

    /// Calendar grid for the visible range. The search box does not apply.
    pub fn calendar_grid<'a>(&self, state: &'a AppState, today: NaiveDate) -> Vec<DayBucket<'a>> {
        self.calendar.buckets(state.guests.list(), today)
    }

    /// Month/year pickers. Nothing moves unless both values are valid.
    pub fn pick(&mut self, year: Option<i32>, month: Option<u32>) -> Result<(), String> {
        let mut view = self.calendar;
        if let Some(year) = year {
            if !view.set_year(year) {
                return Err(format!("year {} is out of range", year));
            }
        }
        if let Some(month) = month {
            if !view.set_month(month) {
                return Err(format!("month must be 1-12, got {}", month));
            }
        }
        self.calendar = view;
        Ok(())
    }

    /// Counts shown in the header
    pub fn stats(&self, state: &AppState) -> (usize, usize) {
        let (pending, confirmed) = partition(state.guests.list());
        (pending.len(), confirmed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, TimeZone, Utc};
    use guesthub_core::{BookingStatus, LocalStorage, NewBooking, Team, ViewMode};

    fn empty_state() -> AppState {
        let config = HubConfig {
            seed_on_empty: false,
            ..HubConfig::default()
        };
        AppState::with_storage(config, LocalStorage::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn test_week_view_places_confirmed_bookings() {
        let mut state = empty_state();
        // Wednesday, so today + 2 stays in the same Monday-based week
        let now = Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();
        let today = now.date_naive();
        let in_two_days = today + Days::new(2);

        let first = state
            .guests
            .create(
                NewBooking::new("On Air Today", Team::Radio, "Breakfast")
                    .with_event_date(now)
                    .with_status(BookingStatus::Confirmed)
                    .with_cross_pollination(false, ""),
            )
            .unwrap();
        let second = state
            .guests
            .create(
                NewBooking::new("In Two Days", Team::Digital, "Podcast")
                    .with_event_date(now + Days::new(2))
                    .with_status(BookingStatus::Confirmed)
                    .with_cross_pollination(true, "Open to Radio"),
            )
            .unwrap();
        let pending = state
            .guests
            .create(NewBooking::new("Still Pending", Team::Magazine, "").with_event_date(now))
            .unwrap();
        assert_eq!((first.id.0, second.id.0, pending.id.0), (1, 2, 3));

        let mut dashboard = Dashboard::new(&state.config, today);
        dashboard.calendar.set_mode(ViewMode::Week);
        let buckets = dashboard.calendar_grid(&state, today);

        let day = |date: NaiveDate| {
            buckets
                .iter()
                .find(|b| b.date == date)
                .map(|b| b.bookings.iter().map(|g| g.id).collect::<Vec<_>>())
        };
        assert_eq!(day(today), Some(vec![first.id]));
        assert_eq!(day(in_two_days), Some(vec![second.id]));
        assert!(buckets
            .iter()
            .all(|b| b.bookings.iter().all(|g| g.id != pending.id)));
        assert!(buckets.iter().any(|b| b.is_today && b.date == today));

        dashboard.calendar.set_mode(ViewMode::Month);
        let buckets = dashboard.calendar_grid(&state, today);
        let placed: Vec<_> = buckets
            .iter()
            .filter(|b| !b.bookings.is_empty())
            .map(|b| (b.date, b.bookings.len()))
            .collect();
        assert_eq!(placed, vec![(today, 1), (in_two_days, 1)]);
    }

    #[test]
    fn test_lists_follow_search() {
        let state = crate::state::test_state();
        let mut dashboard = Dashboard::new(&state.config, Utc::now().date_naive());

        let (pending, confirmed) = dashboard.lists(&state);
        assert_eq!(pending.len() + confirmed.len(), 3);
        assert_eq!(dashboard.stats(&state), (1, 2));

        dashboard.query = "smith".to_string();
        assert!(dashboard.pending(&state).is_empty());
        let confirmed = dashboard.confirmed(&state);
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].name, "Jane Smith");
        // Header counts ignore the search box
        assert_eq!(dashboard.stats(&state), (1, 2));
    }

    #[test]
    fn test_pickers_reject_out_of_range() {
        let config = HubConfig::default();
        let anchor = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let mut dashboard = Dashboard::new(&config, anchor);

        assert!(dashboard.pick(Some(i32::MAX), None).is_err());
        assert!(dashboard.pick(Some(2025), Some(13)).is_err());
        assert_eq!(dashboard.calendar.anchor(), anchor);

        dashboard.pick(Some(2025), Some(2)).unwrap();
        assert_eq!(
            dashboard.calendar.anchor(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
    }

    #[test]
    fn test_today_follows_local_offset() {
        let late_utc = Utc.with_ymd_and_hms(2025, 6, 1, 23, 30, 0).unwrap();
        let bst = chrono::FixedOffset::east_opt(3600).unwrap();
        assert_eq!(
            today_at(late_utc.with_timezone(&bst)),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
        );
        assert_eq!(
            today_at(late_utc),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_default_view_from_config() {
        let config = HubConfig {
            default_view: ViewMode::Month,
            ..HubConfig::default()
        };
        let today = Utc::now().date_naive();
        let dashboard = Dashboard::new(&config, today);
        assert_eq!(dashboard.calendar.mode(), ViewMode::Month);
        assert_eq!(dashboard.calendar.anchor(), today);
    }
}
