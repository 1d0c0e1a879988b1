use shared::models::AuthUser;
use yewdux::Store;

/// Session state shared across the app.
///
/// `loading` starts true and flips false exactly once, when the boot-time
/// token check finishes; the route guard renders a neutral placeholder
/// until then. Token and user are always set and cleared together.
#[derive(Clone, PartialEq, Store)]
pub struct AppState {
    pub loading: bool,
    pub user: Option<AuthUser>,
    pub token: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            loading: true,
            user: None,
            token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_loading_and_anonymous() {
        let state = AppState::default();
        assert!(state.loading);
        assert!(state.user.is_none());
        assert!(state.token.is_none());
    }
}
