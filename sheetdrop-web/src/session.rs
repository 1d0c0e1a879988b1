//! Authentication lifecycle.
//!
//! All session mutation funnels through [`AuthController`]: boot-time token
//! resolution, login, registration, and logout. Every transition updates
//! the store and the persisted session as one unit, so the token never
//! outlives the user or vice versa.

use shared::models::{LoginRequest, RegisterRequest, Session};
use yewdux::Dispatch;

use crate::api::{ApiClient, ApiError};
use crate::models::app_state::AppState;
use crate::storage;

/// Owns the authentication lifecycle for one app instance. Cheap to clone;
/// clones share the client's token slot and the same store.
#[derive(Clone)]
pub struct AuthController {
    client: ApiClient,
    dispatch: Dispatch<AppState>,
}

impl AuthController {
    pub fn new(client: ApiClient, dispatch: Dispatch<AppState>) -> Self {
        Self { client, dispatch }
    }

    /// Resolve any persisted token against the backend.
    ///
    /// Runs once at startup. A stored session that the backend no longer
    /// accepts is cleared, and the app proceeds anonymously. Either way
    /// this ends with `loading = false` so the route guard can decide.
    pub async fn boot(&self) {
        let Some(stored) = storage::load_session() else {
            self.dispatch.reduce_mut(|state| state.loading = false);
            return;
        };

        self.client.set_token(Some(stored.token.clone()));
        match self.client.current_user().await {
            Ok(user) => {
                self.establish(Session {
                    token: stored.token,
                    user,
                });
            }
            Err(err) => {
                web_sys::console::warn_1(
                    &format!("Stored session rejected, starting anonymous: {err}").into(),
                );
                self.clear_local_session();
            }
        }
    }

    /// Authenticate and establish a session. On failure nothing changes
    /// locally and the error is returned for the form to display.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<(), ApiError> {
        let session = self.client.login(credentials).await?;
        self.establish(self.resolve_identity(session).await);
        Ok(())
    }

    /// Create an account and establish a session, identically to login.
    pub async fn register(&self, details: &RegisterRequest) -> Result<(), ApiError> {
        let session = self.client.register(details).await?;
        self.establish(self.resolve_identity(session).await);
        Ok(())
    }

    /// End the session. The backend call is best-effort; local state is
    /// always cleared.
    pub async fn logout(&self) {
        if let Err(err) = self.client.logout().await {
            web_sys::console::warn_1(&format!("Logout call failed: {err}").into());
        }
        self.clear_local_session();
    }

    /// Drop the local session after a 401 from any call site. No redirect
    /// happens here; the route guard reacts to `user` becoming `None` on
    /// its next render.
    pub fn invalidate(&self) {
        self.clear_local_session();
    }

    /// Older login replies carry no user id. Fill it in from `GET /user`
    /// while the token is fresh; the reply identity is kept as a fallback.
    async fn resolve_identity(&self, session: Session) -> Session {
        if !session.user.id.is_empty() {
            return session;
        }
        self.client.set_token(Some(session.token.clone()));
        match self.client.current_user().await {
            Ok(user) => Session {
                token: session.token,
                user,
            },
            Err(_) => session,
        }
    }

    fn establish(&self, session: Session) {
        self.client.set_token(Some(session.token.clone()));
        storage::save_session(&session);
        self.dispatch.reduce_mut(move |state| {
            state.loading = false;
            state.token = Some(session.token);
            state.user = Some(session.user);
        });
    }

    fn clear_local_session(&self) {
        storage::clear_session();
        self.client.set_token(None);
        self.dispatch.reduce_mut(|state| {
            state.loading = false;
            state.token = None;
            state.user = None;
        });
    }
}
