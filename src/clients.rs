//! HTTP clients for the REST backend
//!
//! `ApiClient` is the single gateway every service goes through: it attaches
//! the bearer token and turns 401 responses into a forced re-login.
//! `AuthClient` covers the `/auth` endpoints.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::AppState;
use crate::error::ApiError;
use crate::guard::View;
use crate::types::{LoginRequest, LoginResponse, TokenCheck, User};

/// Query parameters as `(key, value)` pairs.
pub type Query = Vec<(&'static str, String)>;

const LOGIN_PATH: &str = "/auth/login";

// ═══════════════════════════════════════════════════════════════════════════
// Gateway
// ═══════════════════════════════════════════════════════════════════════════

pub struct ApiClient<'a> {
    state: &'a AppState,
}

impl<'a> ApiClient<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T, ApiError> {
        let body = self.send(Method::GET, path, query, None).await?;
        decode(&body)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = encode(body)?;
        let body = self.send(Method::POST, path, &Vec::new(), Some(payload)).await?;
        decode(&body)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = encode(body)?;
        let body = self.send(Method::PUT, path, &Vec::new(), Some(payload)).await?;
        decode(&body)
    }

    /// DELETE; the backend answers with a `{"message": ...}` confirmation.
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let body = self.send(Method::DELETE, path, &Vec::new(), None).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        decode(&body)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<Value>,
    ) -> Result<String, ApiError> {
        let url = format!("{}{}", self.state.config.api_url, path);

        let mut request = self.state.http_client.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.state.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!(method = %method, path, status = status.as_u16(), "API request completed");

        if status.is_success() {
            return Ok(text);
        }

        if status == StatusCode::UNAUTHORIZED
            && !path.contains(LOGIN_PATH)
            && self.state.navigator.current() != View::Login
        {
            warn!(method = %method, path, "Session rejected by backend, returning to login");
            self.state.session.logout();
            self.state.navigator.redirect(View::Login);
            return Err(ApiError::SessionExpired);
        }

        Err(ApiError::from_status(status, &text))
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

// ═══════════════════════════════════════════════════════════════════════════
// Auth Client (/auth)
// ═══════════════════════════════════════════════════════════════════════════

pub struct AuthClient<'a> {
    state: &'a AppState,
}

impl<'a> AuthClient<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// POST /auth/login - Authenticate and persist the session
    ///
    /// On success the token and profile are stored and the navigator moves
    /// to the dashboard. A rejected login comes back as
    /// `ApiError::Unauthorized` with the backend's message.
    pub async fn login(&self, login: &str, password: &str, remember: bool) -> Result<User, ApiError> {
        let request = LoginRequest {
            login,
            senha: password,
            lembrar: remember,
        };
        let response: LoginResponse = ApiClient::new(self.state).post(LOGIN_PATH, &request).await?;

        self.state
            .session
            .establish(response.token, response.usuario.clone())
            .map_err(|e| ApiError::Storage(format!("{e:#}")))?;
        self.state
            .navigator
            .navigate(View::Dashboard, &self.state.session);

        info!(login = %response.usuario.login, role = %response.usuario.role.as_str(), "Logged in");
        Ok(response.usuario)
    }

    /// Clears the stored credentials and returns to the login view.
    pub fn logout(&self) {
        self.state.session.logout();
        self.state.navigator.redirect(View::Login);
        info!("Logged out");
    }

    /// GET /auth/check - Validate the current token, `None` when invalid
    pub async fn check(&self) -> Option<TokenCheck> {
        match ApiClient::new(self.state).get("/auth/check", &Vec::new()).await {
            Ok(check) => Some(check),
            Err(e) => {
                debug!(error = %e, "Token check failed");
                None
            }
        }
    }

    /// GET /auth/me - Profile of the logged-in user
    pub async fn me(&self) -> Result<User, ApiError> {
        ApiClient::new(self.state).get("/auth/me", &Vec::new()).await
    }
}
