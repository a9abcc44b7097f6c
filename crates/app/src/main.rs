//! GuestHub - guest booking coordination from the terminal
//!
//! Staff submit guest requests, admins confirm or edit them, and confirmed
//! bookings show up on a shared calendar. Every invocation works against the
//! same local storage file, so several terminals see each other's writes.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use guesthub_core::{BookingId, BookingStatus, HubConfig, Result, StatusFilter, Team, ViewMode};
use owo_colors::OwoColorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod render;
mod state;
mod viewmodel;

use render::{render_calendar, render_details, render_list};
use state::AppState;
use viewmodel::dashboard::today_at;
use viewmodel::{
    auth, AdminPortal, AuthView, ConfirmDialog, Dashboard, DeleteOutcome, EditDialog, FormOutcome,
    RequestForm,
};

#[derive(Parser)]
#[command(name = "guesthub")]
#[command(about = "Coordinate guest appearance requests across Radio, Digital and Magazine")]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Admin listing, filtered by name/team and status
    List {
        /// Match against guest name or team
        #[arg(short, long, default_value = "")]
        term: String,

        /// all, pending or confirmed
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
    },
    /// Requests waiting for confirmation
    Pending {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Confirmed bookings
    Confirmed {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Search name, team and status
    Search { query: String },
    /// Submit a new guest request
    Request {
        /// Guest name
        name: String,

        /// Radio, Digital, Magazine or Unbelievable
        #[arg(short, long, default_value = "Radio")]
        team: Team,

        /// Interview slot or segment
        #[arg(short, long, default_value = "")]
        slot: String,

        #[arg(short, long)]
        room: Option<String>,

        /// Event date ("2025-03-20" or "2025-03-20T15:00"); omit for TBC
        #[arg(short, long, value_parser = parse_event_date)]
        date: Option<DateTime<Utc>>,

        /// Book straight in as confirmed
        #[arg(long)]
        confirmed: bool,

        /// Whether other departments may use the guest (yes/no)
        #[arg(long, value_parser = parse_yes_no)]
        available: Option<bool>,

        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Confirm a pending request
    Confirm {
        id: BookingId,

        /// Whether other departments may use the guest (yes/no)
        #[arg(long, value_parser = parse_yes_no)]
        available: Option<bool>,

        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Change an existing booking
    Edit {
        id: BookingId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        team: Option<Team>,

        #[arg(long)]
        slot: Option<String>,

        #[arg(long)]
        room: Option<String>,

        #[arg(long, value_parser = parse_event_date, conflicts_with = "tbc")]
        date: Option<DateTime<Utc>>,

        /// Clear the event date
        #[arg(long)]
        tbc: bool,

        #[arg(long)]
        status: Option<BookingStatus>,

        #[arg(long, value_parser = parse_yes_no)]
        available: Option<bool>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a booking (admin only)
    Delete { id: BookingId },
    /// Show confirmed bookings on the calendar
    Calendar {
        /// week or month; defaults to the configured view
        #[arg(short, long)]
        mode: Option<ViewMode>,

        /// Day to anchor the view on (defaults to today)
        #[arg(long, value_parser = parse_day)]
        date: Option<NaiveDate>,

        /// Pick a month (1-12) of the anchor's year
        #[arg(long)]
        month: Option<u32>,

        /// Pick a year, keeping the anchor's month
        #[arg(long)]
        year: Option<i32>,

        /// Step forward this many weeks or months
        #[arg(long, default_value_t = 0)]
        next: u32,

        /// Step back this many weeks or months
        #[arg(long, default_value_t = 0)]
        previous: u32,
    },
    /// Start an admin session
    Login { password: String },
    /// End the session
    Logout,
    /// Show the acting user and role
    Whoami,
    /// Pick the acting staff member
    User { name: String },
    /// Replace all bookings with the sample data (admin only)
    Reset,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => HubConfig::load(path)?,
        None => HubConfig::load_default()?,
    };
    let mut state = AppState::new(config)?;
    state.sync()?;

    let today = today_at(Local::now());

    match cli.command {
        Commands::List { term, status } => {
            let portal = AdminPortal { term, status };
            println!("{}", render_list("Bookings", &portal.rows(&state)));
        }
        Commands::Pending { query } => {
            let dashboard = Dashboard {
                query,
                ..Dashboard::new(&state.config, today)
            };
            println!("{}", render_list("Pending", &dashboard.pending(&state)));
        }
        Commands::Confirmed { query } => {
            let dashboard = Dashboard {
                query,
                ..Dashboard::new(&state.config, today)
            };
            println!("{}", render_list("Confirmed", &dashboard.confirmed(&state)));
        }
        Commands::Search { query } => {
            let dashboard = Dashboard {
                query,
                ..Dashboard::new(&state.config, today)
            };
            let (pending, confirmed) = dashboard.lists(&state);
            println!("{}", render_list("Pending", &pending));
            println!();
            println!("{}", render_list("Confirmed", &confirmed));
        }
        Commands::Request {
            name,
            team,
            slot,
            room,
            date,
            confirmed,
            available,
            notes,
        } => {
            let mut form = RequestForm::new(&state);
            form.draft.name = name;
            form.draft.team = team;
            form.draft.slot = slot;
            if room.is_some() {
                form.draft.room = room;
            }
            form.set_event_date(date);
            if confirmed {
                form.draft.status = BookingStatus::Confirmed;
            }
            let outcome = match available {
                Some(available) => form.answer_cross_pollination(&mut state, available, &notes)?,
                None => form.submit(&mut state)?,
            };
            return Ok(report(outcome));
        }
        Commands::Confirm {
            id,
            available,
            notes,
        } => {
            let mut dialog = ConfirmDialog::new(id);
            if let Some(available) = available {
                dialog = dialog.answer(available, &notes);
            }
            return Ok(report(dialog.confirm(&mut state)?));
        }
        Commands::Edit {
            id,
            name,
            team,
            slot,
            room,
            date,
            tbc,
            status,
            available,
            notes,
        } => {
            let mut dialog = EditDialog::open(&state, id)?;
            let draft = &mut dialog.draft;
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(team) = team {
                draft.team = team;
            }
            if let Some(slot) = slot {
                draft.slot = slot;
            }
            if let Some(room) = room {
                draft.room = Some(room);
            }
            if let Some(status) = status {
                draft.status = status;
            }
            if let Some(available) = available {
                draft.cross_pollination = Some(available);
            }
            if let Some(notes) = notes {
                draft.notes = notes;
            }
            if tbc {
                dialog.set_event_date(None);
            } else if date.is_some() {
                dialog.set_event_date(date);
            }
            return Ok(report(dialog.save(&mut state)?));
        }
        Commands::Delete { id } => match AdminPortal::default().delete(&mut state, id)? {
            DeleteOutcome::Deleted(booking) => {
                println!("{} {}", "Deleted".red(), booking.name);
            }
            DeleteOutcome::Missing => {
                println!("{}", format!("No booking #{}", id).dimmed());
            }
            DeleteOutcome::AdminRequired => {
                eprintln!("{} log in as admin to delete bookings", "denied:".red());
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Calendar {
            mode,
            date,
            month,
            year,
            next,
            previous,
        } => {
            let mut dashboard = Dashboard::new(&state.config, today);
            let view = &mut dashboard.calendar;
            if let Some(mode) = mode {
                view.set_mode(mode);
            }
            if let Some(date) = date {
                view.today(date);
            }
            if let Err(message) = dashboard.pick(year, month) {
                eprintln!("{} {}", "error:".red().bold(), message);
                return Ok(ExitCode::FAILURE);
            }
            let view = &mut dashboard.calendar;
            (0..next).for_each(|_| view.next());
            (0..previous).for_each(|_| view.previous());

            let (pending, confirmed) = dashboard.stats(&state);
            let buckets = dashboard.calendar_grid(&state, today);
            println!("{}", render_calendar(&dashboard.calendar, &buckets));
            println!();
            println!(
                "{}",
                format!("{} pending, {} confirmed", pending, confirmed).dimmed()
            );
        }
        Commands::Login { password } => {
            let view = auth::login(&mut state, &password)?;
            return Ok(report_auth(&view));
        }
        Commands::Logout => {
            let view = auth::logout(&mut state)?;
            return Ok(report_auth(&view));
        }
        Commands::Whoami => {
            return Ok(report_auth(&AuthView::from_state(&state)));
        }
        Commands::User { name } => {
            let view = auth::select_user(&mut state, &name)?;
            return Ok(report_auth(&view));
        }
        Commands::Reset => {
            if !AdminPortal::default().reset(&mut state)? {
                eprintln!("{} log in as admin to reset bookings", "denied:".red());
                return Ok(ExitCode::FAILURE);
            }
            println!("{}", "Bookings reset to sample data".yellow());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn report(outcome: FormOutcome) -> ExitCode {
    match outcome {
        FormOutcome::Saved(booking) => {
            println!("{}", render_details(&booking));
            ExitCode::SUCCESS
        }
        FormOutcome::NeedsCrossPollination => {
            eprintln!(
                "{} is the guest available to other departments? Pass --available yes|no",
                "question:".yellow()
            );
            ExitCode::FAILURE
        }
        FormOutcome::Rejected(message) => {
            eprintln!("{} {}", "rejected:".red(), message);
            ExitCode::FAILURE
        }
    }
}

fn report_auth(view: &AuthView) -> ExitCode {
    if let Some(error) = &view.error {
        eprintln!("{} {}", "error:".red().bold(), error);
        return ExitCode::FAILURE;
    }

    let role = if view.is_admin { "admin" } else { "staff" };
    if view.current_user.is_empty() {
        println!("{} ({})", "No user selected".dimmed(), role);
    } else {
        println!("[{}] {} ({})", view.initials.bold(), view.current_user, role);
    }
    ExitCode::SUCCESS
}

fn parse_day(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM` (UTC) or a bare day
fn parse_event_date(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| {
            format!(
                "Invalid date '{}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM",
                s
            )
        })
}

fn parse_yes_no(s: &str) -> std::result::Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        other => Err(format!("Expected yes or no, got '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_event_date_forms() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap();
        assert_eq!(parse_event_date("2025-03-20T15:00").unwrap(), expected);
        assert_eq!(parse_event_date("2025-03-20T15:00:00Z").unwrap(), expected);
        assert_eq!(
            parse_event_date("2025-03-20").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap()
        );
        assert!(parse_event_date("next tuesday").is_err());
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("Yes"), Ok(true));
        assert_eq!(parse_yes_no("n"), Ok(false));
        assert!(parse_yes_no("maybe").is_err());
    }

    #[test]
    fn test_cli_parses_request() {
        let cli = Cli::try_parse_from([
            "guesthub",
            "request",
            "Dr. Amira",
            "--team",
            "magazine",
            "--date",
            "2025-03-20",
            "--confirmed",
            "--available",
            "no",
        ])
        .unwrap();
        match cli.command {
            Commands::Request {
                team,
                confirmed,
                available,
                ..
            } => {
                assert_eq!(team, Team::Magazine);
                assert!(confirmed);
                assert_eq!(available, Some(false));
            }
            _ => panic!("expected request"),
        }
    }

    #[test]
    fn test_cli_rejects_date_with_tbc() {
        assert!(
            Cli::try_parse_from(["guesthub", "edit", "2", "--date", "2025-03-20", "--tbc"])
                .is_err()
        );
    }
}
