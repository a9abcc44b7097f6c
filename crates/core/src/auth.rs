//! Session and admin gate
//!
//! A demo-grade gate: one fixed password compared in plain text. It keeps
//! casual users out of admin actions and is not a security boundary.

use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::models::{Session, SessionRole};
use crate::storage::{KeyValueStore, SESSION_KEY};

/// The admin password
pub const ADMIN_PASSWORD: &str = "admin123";

/// Display name given to the admin session
pub const ADMIN_USER: &str = "Admin User";

/// Flags written by older clients instead of the session document
const LEGACY_ADMIN_KEY: &str = "isAdmin";
const LEGACY_LOGGED_IN_KEY: &str = "isLoggedIn";

pub struct SessionStore<S: KeyValueStore> {
    storage: S,
    session: Session,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Restore the persisted session, logged out if none is stored
    #[instrument(skip(storage))]
    pub fn open(storage: S) -> Result<Self> {
        let session = Self::load(&storage)?;
        Ok(Self { storage, session })
    }

    fn load(storage: &S) -> Result<Session> {
        if let Some(raw) = storage.get(SESSION_KEY)? {
            return Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Stored session is unreadable, starting logged out");
                Session::default()
            }));
        }

        let legacy_logged_in = storage.get(LEGACY_LOGGED_IN_KEY)?.as_deref() == Some("true");
        let legacy_admin = storage.get(LEGACY_ADMIN_KEY)?.as_deref() == Some("true");
        if legacy_logged_in && legacy_admin {
            return Ok(Session::admin(ADMIN_USER));
        }

        Ok(Session::default())
    }

    fn persist(&self) -> Result<()> {
        self.storage
            .set(SESSION_KEY, &serde_json::to_string(&self.session)?)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn role(&self) -> SessionRole {
        self.session.role
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn current_user(&self) -> &str {
        &self.session.current_user
    }

    /// Start an admin session if the password matches.
    ///
    /// A wrong password changes nothing and returns `Ok(false)`.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, password: &str) -> Result<bool> {
        if password != ADMIN_PASSWORD {
            warn!("Admin login rejected");
            return Ok(false);
        }

        let previous = std::mem::replace(&mut self.session, Session::admin(ADMIN_USER));
        if let Err(e) = self.persist() {
            self.session = previous;
            return Err(e);
        }
        info!("Admin session started");
        Ok(true)
    }

    /// Clear the admin session and current user
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Result<()> {
        self.storage.remove(SESSION_KEY)?;
        self.storage.remove(LEGACY_ADMIN_KEY)?;
        self.storage.remove(LEGACY_LOGGED_IN_KEY)?;
        self.session = Session::default();
        info!("Session cleared");
        Ok(())
    }

    /// Pick the acting staff member; the role is unchanged
    #[instrument(skip(self))]
    pub fn set_current_user(&mut self, name: &str) -> Result<()> {
        let mut next = self.session.clone();
        next.current_user = name.trim().to_string();
        self.storage
            .set(SESSION_KEY, &serde_json::to_string(&next)?)?;
        self.session = next;
        Ok(())
    }

    /// Pick up a session written through another handle
    pub fn reload(&mut self) -> Result<()> {
        self.session = Self::load(&self.storage)?;
        Ok(())
    }
}
