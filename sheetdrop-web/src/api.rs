use reqwest::{Client, RequestBuilder, Response, StatusCode};
use shared::models::{
    AuthUser, CreateUserRequest, ErrorResponse, ImportResult, LoginReply, LoginRequest,
    RegisterRequest, Session, UpdateUserRequest, UserListQuery, UserListReply, UserRecord,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use yew::Callback;

use crate::upload;

/// Failures surfaced by the API client, already reduced to display text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unable to reach the server")]
    Network(String),
    #[error("{message}")]
    Status { code: u16, message: String },
    #[error("Unexpected response from the server")]
    Decode(String),
    #[error("{0}")]
    Rejected(String),
    #[error("Editing users is not available on this backend yet")]
    NotAvailable,
}

impl ApiError {
    /// A 401 means the session is no longer valid; callers clear it and let
    /// the route guard handle the redirect. Never retried here.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { code: 401, .. })
    }
}

/// HTTP client for the import backend.
///
/// Constructed once in `app.rs` and handed down through a Yew context, so
/// there is no ambient singleton. The bearer token lives behind a mutex so
/// the clone held by each page sees session changes immediately.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    token: Arc<Mutex<Option<String>>>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && Arc::ptr_eq(&self.token, &other.token)
    }
}

impl ApiClient {
    /// Create a new API client with the provided base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            token: Arc::new(Mutex::new(None)),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Replace the bearer token attached to subsequent requests.
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = token;
        }
    }

    fn current_token(&self) -> Option<String> {
        self.token
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().cloned())
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.current_token() {
            request.bearer_auth(token)
        } else {
            request
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(Self::status_error(status, response).await)
    }

    /// Pull the backend's own message out of a non-2xx body when there is
    /// one, otherwise fall back to a generic line.
    async fn status_error(status: StatusCode, response: Response) -> ApiError {
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.to_string(),
            Err(_) => format!("Request failed (HTTP {})", status.as_u16()),
        };
        ApiError::Status {
            code: status.as_u16(),
            message,
        }
    }

    /// Authenticate with email/password credentials.
    pub async fn login(&self, payload: &LoginRequest) -> Result<Session, ApiError> {
        let url = self.api_url("token");
        let response = self.execute(self.client.post(url).json(payload)).await?;
        let reply: LoginReply = response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        reply.into_session().map_err(ApiError::Rejected)
    }

    /// Create an account, then authenticate with the same credentials.
    /// Registration is treated exactly like a login once it succeeds.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<Session, ApiError> {
        let url = self.api_url("user");
        self.execute(self.client.post(url).json(payload)).await?;
        self.login(&LoginRequest {
            email: payload.email.clone(),
            password: payload.password.clone(),
        })
        .await
    }

    /// Invalidate the session server-side. Best-effort; callers clear local
    /// state regardless of the outcome.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.api_url("logout");
        self.execute(self.apply_auth(self.client.post(url))).await?;
        Ok(())
    }

    /// Resolve the user owning the current token.
    pub async fn current_user(&self) -> Result<AuthUser, ApiError> {
        let url = self.api_url("user");
        let response = self.execute(self.apply_auth(self.client.get(url))).await?;
        let record: UserRecord = response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(record.into())
    }

    /// Page through user accounts. Admin only.
    pub async fn list_users(
        &self,
        query: &UserListQuery,
    ) -> Result<(Vec<AuthUser>, u64), ApiError> {
        let url = self.api_url("user/list");
        let mut request = self.apply_auth(self.client.get(url)).query(&[
            ("page", query.page.to_string()),
            ("size", query.size.to_string()),
            ("orderBy", query.order_by.clone()),
            ("order", query.order.as_str().to_string()),
        ]);
        if let Some(filter) = &query.filter {
            request = request.query(&[("filter", filter.as_str())]);
        }
        let response = self.execute(request).await?;
        let reply: UserListReply = response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        let total = reply.total;
        Ok((reply.data.into_iter().map(Into::into).collect(), total))
    }

    /// Create a user account on behalf of an admin.
    pub async fn create_user(&self, payload: &CreateUserRequest) -> Result<AuthUser, ApiError> {
        let url = self.api_url("user");
        let response = self
            .execute(self.apply_auth(self.client.post(url)).json(payload))
            .await?;
        let record: UserRecord = response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(record.into())
    }

    /// Update a user account.
    ///
    /// The backend ships the route but not the implementation; the statuses
    /// it answers with are reported as an explicit backend gap rather than
    /// a transient failure.
    pub async fn update_user(&self, payload: &UpdateUserRequest) -> Result<AuthUser, ApiError> {
        let url = self.api_url("user");
        let result = self
            .execute(self.apply_auth(self.client.put(url)).json(payload))
            .await;
        let response = match result {
            Ok(response) => response,
            Err(ApiError::Status { code, .. }) if matches!(code, 404 | 405 | 501) => {
                return Err(ApiError::NotAvailable);
            }
            Err(err) => return Err(err),
        };
        let record: UserRecord = response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(record.into())
    }

    /// Delete a user account.
    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let url = self.api_url(&format!("user/{id}"));
        self.execute(self.apply_auth(self.client.delete(url))).await?;
        Ok(())
    }

    /// Stream a spreadsheet to the import endpoint, reporting progress as
    /// bytes go out. Uses XHR because fetch cannot observe request-body
    /// progress.
    pub async fn import_spreadsheet(
        &self,
        file: &web_sys::File,
        on_progress: Callback<u8>,
    ) -> Result<ImportResult, ApiError> {
        let url = self.api_url("import");
        upload::send_multipart(&url, self.current_token(), file, on_progress).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("https://backend.example.com/api/");
        assert_eq!(
            client.api_url("user/list"),
            "https://backend.example.com/api/user/list"
        );
        assert_eq!(client.api_url("/token"), "https://backend.example.com/api/token");
    }

    #[test]
    fn test_token_is_shared_between_clones() {
        let client = ApiClient::new("/api");
        let clone = client.clone();
        client.set_token(Some("abc".to_string()));
        assert_eq!(clone.current_token(), Some("abc".to_string()));

        client.set_token(None);
        assert_eq!(clone.current_token(), None);
    }

    #[test]
    fn test_unauthorized_detection() {
        let unauthorized = ApiError::Status {
            code: 401,
            message: "expired".to_string(),
        };
        let forbidden = ApiError::Status {
            code: 403,
            message: "no".to_string(),
        };
        assert!(unauthorized.is_unauthorized());
        assert!(!forbidden.is_unauthorized());
        assert!(!ApiError::NotAvailable.is_unauthorized());
    }

    #[test]
    fn test_error_messages_read_as_display_text() {
        let status = ApiError::Status {
            code: 500,
            message: "Request failed (HTTP 500)".to_string(),
        };
        assert_eq!(status.to_string(), "Request failed (HTTP 500)");

        let rejected = ApiError::Rejected("Bad credentials".to_string());
        assert_eq!(rejected.to_string(), "Bad credentials");

        assert!(ApiError::NotAvailable.to_string().contains("not available"));
    }
}
