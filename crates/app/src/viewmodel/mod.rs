//! View models driven by the terminal front end

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod forms;

pub use admin::{AdminPortal, DeleteOutcome};
pub use auth::AuthView;
pub use dashboard::Dashboard;
pub use forms::{ConfirmDialog, EditDialog, FormOutcome, RequestForm};
