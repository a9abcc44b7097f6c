//! Colored terminal rendering for bookings and the calendar grid

use guesthub_core::{BookingStatus, CalendarView, DayBucket, GuestBooking, Team, ViewMode};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for BookingStatus {
    fn render(&self) -> String {
        match self {
            BookingStatus::Pending => self.display_name().yellow().to_string(),
            BookingStatus::Confirmed => self.display_name().green().to_string(),
        }
    }
}

impl Render for Team {
    fn render(&self) -> String {
        match self {
            Team::Radio => self.short_name().blue().to_string(),
            Team::Digital => self.short_name().magenta().to_string(),
            Team::Magazine => self.short_name().cyan().to_string(),
            Team::Unbelievable => self.short_name().red().to_string(),
        }
    }
}

/// One line per booking
impl Render for GuestBooking {
    fn render(&self) -> String {
        let id = format!("#{}", self.id);
        let mut line = format!(
            "{:>4} {} {} [{}] {}",
            id.dimmed(),
            self.name.bold(),
            self.date_label(),
            self.team.render(),
            self.status.render()
        );
        if !self.slot.is_empty() {
            line.push_str(&format!(" {}", self.slot.dimmed()));
        }
        line
    }
}

/// Full record, for `show`-style output after a write
pub fn render_details(booking: &GuestBooking) -> String {
    let mut lines = vec![booking.render()];
    let field = |label: &str, value: &str| format!("     {} {}", format!("{}:", label).dimmed(), value);

    if let Some(room) = &booking.room {
        lines.push(field("room", room));
    }
    if let Some(available) = booking.cross_pollination {
        lines.push(field(
            "other departments",
            if available { "available" } else { "not available" },
        ));
    }
    if !booking.notes.is_empty() {
        lines.push(field("notes", &booking.notes));
    }
    lines.push(field("requested by", &booking.created_by));
    lines.push(field(
        "submitted",
        &booking.timestamp.format("%Y-%m-%d %H:%M").to_string(),
    ));
    lines.join("\n")
}

/// Titled list, or a dimmed placeholder when empty
pub fn render_list(title: &str, bookings: &[&GuestBooking]) -> String {
    let mut lines = vec![format!("{} ({})", title.bold(), bookings.len())];
    if bookings.is_empty() {
        lines.push(format!("   {}", "No bookings".dimmed()));
    }
    lines.extend(bookings.iter().map(|b| format!("   {}", b.render())));
    lines.join("\n")
}

/// Week view lists each day; month view prints a seven-column grid with counts
pub fn render_calendar(view: &CalendarView, buckets: &[DayBucket<'_>]) -> String {
    let mut lines = vec![view.title().bold().to_string()];

    match view.mode() {
        ViewMode::Week => {
            for bucket in buckets {
                let label = bucket.date.format("%a %-d %b").to_string();
                let label = if bucket.is_today {
                    label.reversed().to_string()
                } else {
                    label.bold().to_string()
                };
                lines.push(label);
                if bucket.bookings.is_empty() {
                    lines.push(format!("   {}", "-".dimmed()));
                }
                for booking in &bucket.bookings {
                    let room = booking.room.as_deref().unwrap_or("");
                    lines.push(format!(
                        "   {} [{}] {}",
                        booking.name,
                        booking.team.render(),
                        room.dimmed()
                    ));
                }
            }
        }
        ViewMode::Month => {
            lines.push(
                ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
                    .map(|d| format!("{:<6}", d))
                    .join("")
                    .dimmed()
                    .to_string(),
            );
            for week in buckets.chunks(7) {
                let row: Vec<String> = week.iter().map(render_month_cell).collect();
                lines.push(row.join(""));
            }
        }
    }

    lines.join("\n")
}

fn render_month_cell(bucket: &DayBucket<'_>) -> String {
    let day = bucket.date.format("%-d").to_string();
    let cell = match bucket.bookings.len() {
        0 => format!("{:<6}", day),
        n => format!("{:<6}", format!("{}*{}", day, n)),
    };
    if bucket.is_today {
        cell.reversed().to_string()
    } else if !bucket.in_anchor_month {
        cell.dimmed().to_string()
    } else if bucket.bookings.is_empty() {
        cell
    } else {
        cell.green().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use guesthub_core::BookingId;

    fn booking() -> GuestBooking {
        GuestBooking {
            id: BookingId(7),
            name: "Jane Smith".to_string(),
            team: Team::Digital,
            room: Some("Podcast Studio".to_string()),
            slot: "Podcast Interview".to_string(),
            status: BookingStatus::Confirmed,
            is_tbc: false,
            event_date: Some(Utc.with_ymd_and_hms(2025, 1, 8, 10, 0, 0).unwrap()),
            cross_pollination: Some(true),
            notes: "Open to Radio".to_string(),
            created_by: "Mike Tyson".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 1, 2, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_booking_line_mentions_key_fields() {
        let line = booking().render();
        assert!(line.contains("Jane Smith"));
        assert!(line.contains("Wed 8 Jan 2025"));
        assert!(line.contains("Podcast Interview"));
    }

    #[test]
    fn test_details_include_provenance() {
        let details = render_details(&booking());
        assert!(details.contains("Mike Tyson"));
        assert!(details.contains("Open to Radio"));
        assert!(details.contains("2025-01-02 09:30"));
    }

    #[test]
    fn test_empty_list_placeholder() {
        assert!(render_list("Pending", &[]).contains("No bookings"));
    }

    #[test]
    fn test_month_grid_rows() {
        let record = booking();
        let records = vec![record];
        let today = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
        let view = CalendarView::new(ViewMode::Month, today);
        let buckets = view.buckets(&records, today);

        let out = render_calendar(&view, &buckets);
        // title, weekday header, five weeks
        assert_eq!(out.lines().count(), 2 + buckets.len() / 7);
        assert!(out.contains("January 2025"));
        assert!(out.contains("8*1"));
    }

    #[test]
    fn test_week_lists_bookings_under_day() {
        let records = vec![booking()];
        let today = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
        let view = CalendarView::new(ViewMode::Week, today);
        let buckets = view.buckets(&records, today);

        let out = render_calendar(&view, &buckets);
        assert!(out.contains("Jan 6 - Jan 12, 2025"));
        assert!(out.contains("Jane Smith"));
    }
}
