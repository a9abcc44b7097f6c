//! GuestHub configuration
//!
//! Read from `guesthub.toml` in the platform config directory. Every field is
//! optional; a missing file means defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::ViewMode;
use crate::models::Team;

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "guesthub.toml";

/// Submitter recorded when a request carries no name
pub const DEFAULT_SUBMITTER: &str = "Staff Member";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Could not determine the platform data directory")]
    NoProjectDirs,
}

/// A selectable staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub name: String,
    #[serde(default)]
    pub team: Option<Team>,
}

impl StaffMember {
    fn new(name: &str, team: Option<Team>) -> Self {
        Self {
            name: name.to_string(),
            team,
        }
    }

    /// Label shown in the user selector, e.g. "Alice Wonderland (Mag)"
    pub fn label(&self) -> String {
        match self.team {
            Some(team) => format!("{} ({})", self.name, team.short_name()),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Storage file; defaults to `guesthub.db` in the data directory
    pub database_path: Option<PathBuf>,
    /// Calendar mode shown first
    pub default_view: ViewMode,
    /// Name recorded for requests submitted anonymously
    pub default_submitter: String,
    /// Populate sample bookings when storage is empty
    pub seed_on_empty: bool,
    /// Staff offered by the user selector
    pub staff: Vec<StaffMember>,
    /// Room options for requests
    pub rooms: Vec<String>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            default_view: ViewMode::Week,
            default_submitter: DEFAULT_SUBMITTER.to_string(),
            seed_on_empty: true,
            staff: vec![
                StaffMember::new("Sarah Connor", Some(Team::Radio)),
                StaffMember::new("Mike Tyson", Some(Team::Digital)),
                StaffMember::new("Alice Wonderland", Some(Team::Magazine)),
                StaffMember::new("Admin User", None),
            ],
            rooms: [
                "Radio Studio 1",
                "Radio Studio 2",
                "Radio Studio 3",
                "Video Studio",
                "Podcast Studio",
                "PCR Radio Room",
                "Praise Radio Room",
                "Gospel Room",
            ]
            .iter()
            .map(|r| r.to_string())
            .collect(),
        }
    }
}

impl HubConfig {
    fn project_dirs() -> Result<ProjectDirs, ConfigError> {
        ProjectDirs::from("media", "premier", "guesthub").ok_or(ConfigError::NoProjectDirs)
    }

    /// Load from the platform config directory, falling back to defaults
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::project_dirs()?.config_dir().join(CONFIG_FILE);
        Self::load(&path)
    }

    /// Load from a specific file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse config from TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Resolved storage file location
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::project_dirs()?.data_dir().join("guesthub.db")),
        }
    }

    /// Find a configured staff member by name, ignoring case
    pub fn staff_member(&self, name: &str) -> Option<&StaffMember> {
        self.staff
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = HubConfig::from_toml("").unwrap();
        assert_eq!(config, HubConfig::default());
        assert_eq!(config.default_submitter, "Staff Member");
        assert_eq!(config.staff.len(), 4);
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
default_view = "month"
seed_on_empty = false
database_path = "/tmp/guests.db"

[[staff]]
name = "Priya Patel"
team = "Unbelievable"
"#;
        let config = HubConfig::from_toml(toml).unwrap();
        assert_eq!(config.default_view, ViewMode::Month);
        assert!(!config.seed_on_empty);
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/guests.db")
        );
        assert_eq!(config.staff.len(), 1);
        assert_eq!(config.staff[0].label(), "Priya Patel (Unbelievable)");
        assert_eq!(config.rooms.len(), 8);
    }

    #[test]
    fn test_bad_toml_is_error() {
        let err = HubConfig::from_toml("default_view = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = HubConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, HubConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "default_submitter = \"Front Desk\"\n").unwrap();

        let config = HubConfig::load(&path).unwrap();
        assert_eq!(config.default_submitter, "Front Desk");
    }

    #[test]
    fn test_staff_lookup_and_labels() {
        let config = HubConfig::default();
        let alice = config.staff_member("alice wonderland").unwrap();
        assert_eq!(alice.label(), "Alice Wonderland (Mag)");
        assert_eq!(config.staff_member("Admin User").unwrap().label(), "Admin User");
        assert!(config.staff_member("Nobody").is_none());
    }
}
