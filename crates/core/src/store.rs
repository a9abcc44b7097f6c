//! Guest record store
//!
//! Owns the canonical guest list. Every mutation is validated, written to
//! storage, and only then applied in memory, so a failed write leaves both
//! untouched. Concurrent writers are not merged: whoever persists last wins.

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, info, instrument, warn};

use crate::config::{HubConfig, DEFAULT_SUBMITTER};
use crate::error::{Error, Result};
use crate::invariants::{
    assert_booking_invariants, assert_provenance_unchanged, assert_unique_ids, validate_booking,
};
use crate::models::{
    BookingId, BookingStatus, BookingUpdate, GuestBooking, NewBooking, StatusExtra,
};
use crate::seed::{seed_bookings, SEED_NEXT_ID};
use crate::storage::{GuestSnapshot, KeyValueStore, StorageSubscription, GUESTS_KEY};

/// What changed in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Created(BookingId),
    Updated(BookingId),
    Deleted(BookingId),
    /// Snapshot replaced by a write from elsewhere
    Reloaded,
    /// Snapshot replaced by the sample data
    Reset,
}

/// Observer notified after each change
pub trait StoreListener {
    fn on_store_change(&self, change: StoreChange);
}

impl<F> StoreListener for F
where
    F: Fn(StoreChange),
{
    fn on_store_change(&self, change: StoreChange) {
        self(change)
    }
}

/// Store behaviour taken from configuration
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub default_submitter: String,
    pub seed_on_empty: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            default_submitter: DEFAULT_SUBMITTER.to_string(),
            seed_on_empty: true,
        }
    }
}

impl From<&HubConfig> for StoreOptions {
    fn from(config: &HubConfig) -> Self {
        Self {
            default_submitter: config.default_submitter.clone(),
            seed_on_empty: config.seed_on_empty,
        }
    }
}

pub struct GuestStore<S: KeyValueStore> {
    storage: S,
    snapshot: GuestSnapshot,
    options: StoreOptions,
    listeners: Vec<Box<dyn StoreListener>>,
    subscription: Option<StorageSubscription>,
}

/// Timestamps are stored with millisecond precision
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn seed_snapshot() -> GuestSnapshot {
    GuestSnapshot::new(seed_bookings(now()), SEED_NEXT_ID)
}

/// Newest first; stable so equal timestamps keep their stored order
fn sort_newest_first(guests: &mut [GuestBooking]) {
    guests.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

impl<S: KeyValueStore> GuestStore<S> {
    /// Rehydrate from storage.
    ///
    /// Empty storage is seeded (and the seed persisted) when enabled.
    /// Unreadable data falls back to the seed in memory only; the stored
    /// blob is replaced by the next successful write.
    #[instrument(skip(storage, options))]
    pub fn open(storage: S, options: StoreOptions) -> Result<Self> {
        let snapshot = match storage.get(GUESTS_KEY)? {
            Some(raw) => match GuestSnapshot::decode(&raw) {
                Ok(mut snapshot) => {
                    sort_newest_first(&mut snapshot.guests);
                    snapshot
                }
                Err(e) => {
                    warn!(error = %e, "Stored guest list is unreadable, using sample data");
                    seed_snapshot()
                }
            },
            None if options.seed_on_empty => {
                let snapshot = seed_snapshot();
                storage.set(GUESTS_KEY, &snapshot.encode()?)?;
                info!("Seeded empty storage with sample bookings");
                snapshot
            }
            None => GuestSnapshot::new(Vec::new(), 1),
        };

        assert_unique_ids(&snapshot.guests);
        debug!(count = snapshot.guests.len(), "Guest store opened");

        Ok(Self {
            storage,
            snapshot,
            options,
            listeners: Vec::new(),
            subscription: None,
        })
    }

    /// Reload whenever another handle writes the guest list
    pub fn with_subscription(mut self, subscription: StorageSubscription) -> Self {
        self.subscription = Some(subscription);
        self
    }

    /// Register an observer for local and external changes
    pub fn subscribe<L: StoreListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self, change: StoreChange) {
        for listener in &self.listeners {
            listener.on_store_change(change);
        }
    }

    /// All bookings, newest created first
    pub fn list(&self) -> &[GuestBooking] {
        &self.snapshot.guests
    }

    pub fn get(&self, id: BookingId) -> Option<&GuestBooking> {
        self.snapshot.guests.iter().find(|g| g.id == id)
    }

    pub fn len(&self) -> usize {
        self.snapshot.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.guests.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn position(&self, id: BookingId) -> Result<usize> {
        self.snapshot
            .guests
            .iter()
            .position(|g| g.id == id)
            .ok_or(Error::NotFound(id))
    }

    /// Persist a candidate snapshot, then adopt it
    fn commit(&mut self, next: GuestSnapshot) -> Result<()> {
        assert_unique_ids(&next.guests);
        self.storage.set(GUESTS_KEY, &next.encode()?)?;
        self.snapshot = next;
        Ok(())
    }

    /// Submit a new request
    #[instrument(skip(self, input), fields(name = %input.name, status = %input.status))]
    pub fn create(&mut self, input: NewBooking) -> Result<GuestBooking> {
        let created_by = input
            .submitted_by
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.options.default_submitter.clone());

        let mut next = self.snapshot.clone();
        let booking = GuestBooking {
            id: next.allocate_id(),
            name: input.name.trim().to_string(),
            team: input.team,
            room: input.room.filter(|r| !r.trim().is_empty()),
            slot: input.slot,
            status: input.status,
            is_tbc: input.is_tbc,
            event_date: input.event_date.map(|d| d.trunc_subsecs(3)),
            cross_pollination: input.cross_pollination,
            notes: input.notes,
            created_by,
            timestamp: now(),
        };

        validate_booking(&booking, false)?;
        assert_booking_invariants(&booking);

        next.guests.insert(0, booking.clone());
        self.commit(next)?;

        info!(id = %booking.id, created_by = %booking.created_by, "Booking created");
        self.notify(StoreChange::Created(booking.id));
        Ok(booking)
    }

    /// Replace the editable fields of an existing booking
    #[instrument(skip(self, update), fields(id = %update.id))]
    pub fn update(&mut self, update: BookingUpdate) -> Result<GuestBooking> {
        let index = self.position(update.id)?;
        let current = &self.snapshot.guests[index];

        let candidate = GuestBooking {
            name: update.name.trim().to_string(),
            team: update.team,
            room: update.room.filter(|r| !r.trim().is_empty()),
            slot: update.slot,
            status: update.status,
            is_tbc: update.is_tbc,
            event_date: update.event_date.map(|d| d.trunc_subsecs(3)),
            cross_pollination: update.cross_pollination,
            notes: update.notes,
            ..current.clone()
        };

        validate_booking(&candidate, current.is_confirmed())?;
        assert_booking_invariants(&candidate);
        assert_provenance_unchanged(current, &candidate);

        let mut next = self.snapshot.clone();
        next.guests[index] = candidate.clone();
        self.commit(next)?;

        info!(id = %candidate.id, status = %candidate.status, "Booking updated");
        self.notify(StoreChange::Updated(candidate.id));
        Ok(candidate)
    }

    /// Move a booking to `status`, merging the extra answers
    #[instrument(skip(self, extra))]
    pub fn update_status(
        &mut self,
        id: BookingId,
        status: BookingStatus,
        extra: StatusExtra,
    ) -> Result<GuestBooking> {
        let index = self.position(id)?;
        let current = &self.snapshot.guests[index];

        let mut candidate = current.clone();
        candidate.status = status;
        if let Some(answer) = extra.cross_pollination {
            candidate.cross_pollination = Some(answer);
        }
        if let Some(notes) = extra.notes {
            candidate.notes = notes;
        }

        validate_booking(&candidate, current.is_confirmed())?;
        assert_booking_invariants(&candidate);

        let mut next = self.snapshot.clone();
        next.guests[index] = candidate.clone();
        self.commit(next)?;

        info!(id = %id, status = %status, "Booking status changed");
        self.notify(StoreChange::Updated(id));
        Ok(candidate)
    }

    /// Remove a booking; `Ok(None)` if there was nothing to remove
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: BookingId) -> Result<Option<GuestBooking>> {
        let Ok(index) = self.position(id) else {
            debug!(id = %id, "Delete of unknown booking ignored");
            return Ok(None);
        };

        let mut next = self.snapshot.clone();
        let removed = next.guests.remove(index);
        self.commit(next)?;

        info!(id = %id, name = %removed.name, "Booking deleted");
        self.notify(StoreChange::Deleted(id));
        Ok(Some(removed))
    }

    /// Replace everything with the sample data. The samples take fresh ids
    /// from the counter, so no earlier id is handed out again.
    #[instrument(skip(self))]
    pub fn reset_to_seed(&mut self) -> Result<()> {
        let mut next = GuestSnapshot::new(Vec::new(), self.snapshot.next_id.max(SEED_NEXT_ID));
        for mut booking in seed_bookings(now()) {
            booking.id = next.allocate_id();
            next.guests.push(booking);
        }
        self.commit(next)?;
        warn!("Guest list reset to sample data");
        self.notify(StoreChange::Reset);
        Ok(())
    }

    /// Re-read the guest list from storage, overwriting the in-memory copy.
    ///
    /// A missing or unreadable blob keeps the current snapshot.
    #[instrument(skip(self))]
    pub fn reload(&mut self) -> Result<bool> {
        let Some(raw) = self.storage.get(GUESTS_KEY)? else {
            return Ok(false);
        };
        match GuestSnapshot::decode(&raw) {
            Ok(mut snapshot) => {
                sort_newest_first(&mut snapshot.guests);
                if snapshot == self.snapshot {
                    return Ok(false);
                }
                debug!(count = snapshot.guests.len(), "Guest list reloaded");
                self.snapshot = snapshot;
                self.notify(StoreChange::Reloaded);
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable guest list written elsewhere");
                Ok(false)
            }
        }
    }

    /// Apply pending external change events; returns whether a reload happened
    pub fn sync(&mut self) -> Result<bool> {
        let touched = match &self.subscription {
            Some(subscription) => subscription
                .drain()
                .iter()
                .any(|event| event.key == GUESTS_KEY),
            None => false,
        };
        if touched {
            self.reload()
        } else {
            Ok(false)
        }
    }
}
