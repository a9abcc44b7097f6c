//! Session model

use serde::{Deserialize, Serialize};

/// Who is acting in the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionRole {
    #[default]
    Guest,
    Admin,
}

/// Current acting user and their role
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub role: SessionRole,
    #[serde(default)]
    pub current_user: String,
}

impl Session {
    pub fn admin(name: impl Into<String>) -> Self {
        Self {
            role: SessionRole::Admin,
            current_user: name.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == SessionRole::Admin
    }

    pub fn is_logged_out(&self) -> bool {
        self.role == SessionRole::Guest && self.current_user.is_empty()
    }

    /// Initials of the current user, e.g. "SC" for "Sarah Connor"
    pub fn initials(&self) -> String {
        self.current_user
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}
