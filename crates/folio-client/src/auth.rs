//! Admin auth session: login/logout/refresh against the backend and the
//! local state machine driving the console's gate.
//!
//! States: Idle -> Loading -> {Authenticated | Unauthenticated | Error}.
//! An unconfigured backend short-circuits straight to Unauthenticated.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use tracing::{debug, instrument, warn};

use folio_common::entities::AuthSession;
use folio_common::error::Result;

use crate::envelope::normalize_entity;
use crate::http::ApiClient;
use crate::token::TokenSlot;

/// Session lifecycle endpoints. A trait seam so the session state
/// machine can be exercised without a live backend.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    async fn login(&self, email: &str, password: &str, token: Option<&str>) -> Result<AuthSession>;
    async fn session(&self, token: Option<&str>) -> Result<AuthSession>;
    async fn logout(&self, token: Option<&str>) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct AuthApi {
    http: ApiClient,
}

impl AuthApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self { http: ApiClient::new(base_url)? })
    }
}

#[async_trait]
impl AuthTransport for AuthApi {
    #[instrument(skip(self, password, token))]
    async fn login(&self, email: &str, password: &str, token: Option<&str>) -> Result<AuthSession> {
        let body = json!({ "email": email, "password": password });
        let value = self
            .http
            .request(Method::POST, "/auth/login", Some(body), token, None)
            .await?;
        normalize_entity(value)
    }

    #[instrument(skip(self, token))]
    async fn session(&self, token: Option<&str>) -> Result<AuthSession> {
        let value = self.http.get("/auth/session", token).await?;
        normalize_entity(value)
    }

    #[instrument(skip(self, token))]
    async fn logout(&self, token: Option<&str>) -> Result<()> {
        self.http
            .request(Method::POST, "/auth/logout", None, token, None)
            .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Loading,
    Authenticated,
    Unauthenticated,
    Error(String),
}

/// Process-wide session object: holds the bearer token, the signed-in
/// user, and the persistence slot. Passed by reference wherever backend
/// calls need the token.
pub struct Session<T: AuthTransport = AuthApi> {
    transport: Option<T>,
    slot: TokenSlot,
    status: SessionStatus,
    user: Option<folio_common::entities::AdminUser>,
    token: Option<String>,
}

impl<T: AuthTransport> Session<T> {
    /// `transport` is `None` when no backend URL is configured. Any
    /// previously persisted token is picked up from the slot.
    pub fn new(transport: Option<T>, slot: TokenSlot) -> Self {
        let token = slot.load();
        Self {
            transport,
            slot,
            status: SessionStatus::Idle,
            user: None,
            token,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn user(&self) -> Option<&folio_common::entities::AdminUser> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SessionStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    fn apply_session(&mut self, session: AuthSession) {
        // A session response without a token keeps the one already held.
        let token = session.token.or_else(|| self.token.clone());
        match &token {
            Some(token) => self.slot.store(token),
            None => self.slot.clear(),
        }
        self.user = Some(session.user);
        self.token = token;
        self.status = SessionStatus::Authenticated;
    }

    fn clear_session(&mut self, error: Option<String>) {
        self.slot.clear();
        self.user = None;
        self.token = None;
        self.status = match error {
            Some(message) => SessionStatus::Error(message),
            None => SessionStatus::Unauthenticated,
        };
    }

    /// Called once at startup: re-derive session state from the stored
    /// token, or settle on Unauthenticated when nothing is configured.
    pub async fn initialize(&mut self) {
        if !self.is_configured() {
            self.status = SessionStatus::Unauthenticated;
            return;
        }
        self.refresh().await;
    }

    pub async fn refresh(&mut self) {
        let Some(transport) = self.transport.as_ref() else {
            self.clear_session(None);
            return;
        };

        self.status = SessionStatus::Loading;
        match transport.session(self.token.as_deref()).await {
            Ok(session) => self.apply_session(session),
            Err(e) => {
                let message = e.user_message("Failed to load session.");
                self.clear_session(Some(message));
            }
        }
    }

    /// Returns whether the login succeeded; failure details land in the
    /// session status.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        let Some(transport) = self.transport.as_ref() else {
            self.clear_session(Some("Admin auth API not configured.".to_string()));
            return false;
        };

        self.status = SessionStatus::Loading;
        match transport.login(email, password, self.token.as_deref()).await {
            Ok(session) => {
                debug!(user = %session.user.name, "login succeeded");
                self.apply_session(session);
                true
            }
            Err(e) => {
                let message = e.user_message("Login failed.");
                self.clear_session(Some(message));
                false
            }
        }
    }

    /// Server-side invalidation is best effort; the local session and
    /// token slot are always cleared.
    pub async fn logout(&mut self) {
        if let Some(transport) = self.transport.as_ref() {
            if let Err(e) = transport.logout(self.token.as_deref()).await {
                warn!("server logout failed, clearing local session anyway: {e}");
            }
        }
        self.clear_session(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::entities::AdminUser;
    use folio_common::error::{ApiFailure, FolioError};

    struct StubTransport {
        login_ok: bool,
        session_ok: bool,
        logout_ok: bool,
    }

    fn session_fixture(token: Option<&str>) -> AuthSession {
        AuthSession {
            user: AdminUser {
                id: "u1".into(),
                name: "Admin".into(),
                email: Some("admin@example.com".into()),
                roles: None,
            },
            token: token.map(String::from),
            expires_at: None,
        }
    }

    fn backend_failure() -> FolioError {
        FolioError::Api(ApiFailure {
            error: "Unauthorized".into(),
            message: Some("Bad credentials.".into()),
            status: Some(401),
            request_id: None,
        })
    }

    #[async_trait]
    impl AuthTransport for StubTransport {
        async fn login(&self, _: &str, _: &str, _: Option<&str>) -> Result<AuthSession> {
            if self.login_ok {
                Ok(session_fixture(Some("tok-new")))
            } else {
                Err(backend_failure())
            }
        }

        async fn session(&self, token: Option<&str>) -> Result<AuthSession> {
            if self.session_ok && token.is_some() {
                Ok(session_fixture(None))
            } else {
                Err(backend_failure())
            }
        }

        async fn logout(&self, _: Option<&str>) -> Result<()> {
            if self.logout_ok {
                Ok(())
            } else {
                Err(backend_failure())
            }
        }
    }

    fn temp_slot() -> (tempfile::TempDir, TokenSlot) {
        let dir = tempfile::tempdir().unwrap();
        let slot = TokenSlot::at(dir.path().join("token"));
        (dir, slot)
    }

    #[tokio::test]
    async fn test_unconfigured_short_circuits_to_unauthenticated() {
        let (_dir, slot) = temp_slot();
        let mut session: Session<StubTransport> = Session::new(None, slot);
        session.initialize().await;
        assert_eq!(*session.status(), SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_login_success_stores_user_and_token() {
        let (_dir, slot) = temp_slot();
        let transport = StubTransport { login_ok: true, session_ok: true, logout_ok: true };
        let mut session = Session::new(Some(transport), slot.clone());

        assert!(session.login("admin@example.com", "pw").await);
        assert_eq!(*session.status(), SessionStatus::Authenticated);
        assert_eq!(session.token(), Some("tok-new"));
        assert_eq!(slot.load(), Some("tok-new".to_string()));
    }

    #[tokio::test]
    async fn test_login_failure_clears_session_and_sets_error() {
        let (_dir, slot) = temp_slot();
        slot.store("stale");
        let transport = StubTransport { login_ok: false, session_ok: false, logout_ok: true };
        let mut session = Session::new(Some(transport), slot.clone());

        assert!(!session.login("admin@example.com", "bad").await);
        assert_eq!(session.error(), Some("Bad credentials."));
        assert_eq!(session.token(), None);
        assert_eq!(slot.load(), None);
    }

    #[tokio::test]
    async fn test_refresh_keeps_existing_token_when_response_has_none() {
        let (_dir, slot) = temp_slot();
        slot.store("tok-persisted");
        let transport = StubTransport { login_ok: true, session_ok: true, logout_ok: true };
        let mut session = Session::new(Some(transport), slot.clone());

        session.refresh().await;
        assert_eq!(*session.status(), SessionStatus::Authenticated);
        assert_eq!(session.token(), Some("tok-persisted"));
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_call_fails() {
        let (_dir, slot) = temp_slot();
        slot.store("tok-live");
        let transport = StubTransport { login_ok: true, session_ok: true, logout_ok: false };
        let mut session = Session::new(Some(transport), slot.clone());
        session.refresh().await;
        assert_eq!(*session.status(), SessionStatus::Authenticated);

        session.logout().await;
        assert_eq!(*session.status(), SessionStatus::Unauthenticated);
        assert_eq!(session.token(), None);
        assert_eq!(slot.load(), None);
    }
}
