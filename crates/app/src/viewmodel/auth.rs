//! Authentication view model

use guesthub_core::Result;

use crate::state::AppState;

pub const LOGIN_ERROR: &str = "Invalid admin password. Please try again.";

/// What the sidebar shows about the acting user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthView {
    pub is_admin: bool,
    pub current_user: String,
    pub initials: String,
    pub error: Option<String>,
}

impl AuthView {
    pub fn from_state(state: &AppState) -> Self {
        let session = state.session.session();
        Self {
            is_admin: session.is_admin(),
            current_user: session.current_user.clone(),
            initials: session.initials(),
            error: None,
        }
    }

    fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }
}

pub fn login(state: &mut AppState, password: &str) -> Result<AuthView> {
    if state.session.login(password)? {
        Ok(AuthView::from_state(state))
    } else {
        Ok(AuthView::from_state(state).with_error(LOGIN_ERROR))
    }
}

pub fn logout(state: &mut AppState) -> Result<AuthView> {
    state.session.logout()?;
    Ok(AuthView::from_state(state))
}

/// Staff selector. Names from the configured staff list are normalised to
/// their configured spelling; unknown names are refused.
pub fn select_user(state: &mut AppState, name: &str) -> Result<AuthView> {
    let Some(member) = state.config.staff_member(name) else {
        let error = format!("Unknown staff member '{}'", name.trim());
        return Ok(AuthView::from_state(state).with_error(&error));
    };
    let canonical = member.name.clone();
    state.session.set_current_user(&canonical)?;
    Ok(AuthView::from_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    #[test]
    fn test_login_and_logout() {
        let mut state = test_state();

        let view = login(&mut state, "admin123").unwrap();
        assert!(view.is_admin);
        assert_eq!(view.initials, "AU");
        assert_eq!(view.error, None);

        let view = logout(&mut state).unwrap();
        assert!(!view.is_admin);
        assert_eq!(view.current_user, "");
    }

    #[test]
    fn test_wrong_password_message() {
        let mut state = test_state();
        let view = login(&mut state, "wrong").unwrap();
        assert!(!view.is_admin);
        assert_eq!(view.error.as_deref(), Some(LOGIN_ERROR));
    }

    #[test]
    fn test_select_user() {
        let mut state = test_state();
        let view = select_user(&mut state, "sarah connor").unwrap();
        assert_eq!(view.current_user, "Sarah Connor");
        assert_eq!(view.initials, "SC");
        assert_eq!(state.submitter().as_deref(), Some("Sarah Connor"));

        let view = select_user(&mut state, "Nobody").unwrap();
        assert!(view.error.is_some());
        assert_eq!(view.current_user, "Sarah Connor");
    }
}
