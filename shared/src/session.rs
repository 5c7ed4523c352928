//! Process-wide holder of the admin bearer token.
//!
//! The store itself never talks to the network. Hosts pick where the token
//! lives through [`CredentialStorage`]: browser `sessionStorage` in the web
//! app, a token file for the CLI, memory in tests.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    error::ApiError,
    gateway::{ApiGateway, HttpTransport},
};

/// Message shown when the server rejects a login attempt.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Opaque bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token; blank input yields `None`.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// Raw token for the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Durable backend for the token. Implementations swallow their own I/O
/// failures: a token that cannot be read is simply absent.
pub trait CredentialStorage {
    /// Reads the stored token, if any.
    fn load(&self) -> Option<String>;
    /// Replaces the stored token.
    fn store(&self, token: &str);
    /// Deletes the stored token.
    fn remove(&self);
}

/// Backend that forgets everything when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    token: RefCell<Option<String>>,
}

impl CredentialStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn store(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn remove(&self) {
        self.token.borrow_mut().take();
    }
}

/// Shared handle on the single credential of this process.
///
/// Clones share the same backend, so the gateway, the admin controller and
/// the UI all observe the same login state.
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn CredentialStorage>,
}

impl SessionStore {
    /// Store over an explicit backend.
    pub fn new(backend: impl CredentialStorage + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    /// Empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }

    /// Saves a credential, replacing any previous one.
    pub fn set(&self, credential: &Credential) {
        self.backend.store(credential.as_str());
    }

    /// Current credential. Blank stored values count as absent.
    pub fn get(&self) -> Option<Credential> {
        self.backend.load().and_then(Credential::new)
    }

    /// Forgets the credential.
    pub fn clear(&self) {
        self.backend.remove();
    }

    /// Whether a credential is present.
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.backend, &other.backend)
    }
}

/// Logs in and stores the returned credential.
///
/// A 401 is reported as [`INVALID_CREDENTIALS_MESSAGE`]; every other failure
/// passes through unchanged.
pub async fn login<T: HttpTransport>(
    gateway: &ApiGateway<T>,
    username: &str,
    password: &str,
) -> Result<(), ApiError> {
    match gateway.login(username, password).await {
        Ok(credential) => {
            gateway.session().set(&credential);
            tracing::info!(username, "admin session started");
            Ok(())
        },
        Err(ApiError::Auth(_)) => Err(ApiError::Auth(INVALID_CREDENTIALS_MESSAGE.to_string())),
        Err(err) => Err(err),
    }
}

/// Ends the admin session.
pub fn logout(session: &SessionStore) {
    session.clear();
    tracing::info!("admin session cleared");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ClientConfig, testing::RecordingTransport};

    #[test]
    fn set_get_clear_round() {
        let session = SessionStore::in_memory();
        assert!(!session.is_authenticated());

        let credential = Credential::new("tok-1").expect("credential");
        session.set(&credential);
        assert_eq!(session.get(), Some(credential));
        assert!(session.is_authenticated());

        session.clear();
        assert_eq!(session.get(), None);
    }

    #[test]
    fn clones_share_one_credential() {
        let session = SessionStore::in_memory();
        let other = session.clone();
        session.set(&Credential::new("tok-2").expect("credential"));
        assert!(other.is_authenticated());
        assert_eq!(session, other);
        assert_ne!(session, SessionStore::in_memory());
    }

    #[test]
    fn blank_values_are_absent() {
        assert!(Credential::new("   ").is_none());
        let storage = MemoryStorage::default();
        storage.store("  ");
        let session = SessionStore::new(storage);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn debug_output_hides_the_token() {
        let credential = Credential::new("secret-token").expect("credential");
        assert!(!format!("{credential:?}").contains("secret"));
    }

    #[tokio::test]
    async fn login_stores_token_on_success() {
        let transport = RecordingTransport::new();
        transport.push_json(200, r#"{"access_token":"jwt-abc","token_type":"bearer"}"#);
        let session = SessionStore::in_memory();
        let gateway = ApiGateway::new(&ClientConfig::default(), transport, session.clone());

        login(&gateway, "admin", "pw").await.expect("login");

        assert_eq!(session.get().as_ref().map(Credential::as_str), Some("jwt-abc"));
        logout(&session);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn login_remaps_401_to_invalid_credentials() {
        let transport = RecordingTransport::new();
        transport.push_json(401, r#"{"detail":"Invalid credentials"}"#);
        let session = SessionStore::in_memory();
        let gateway = ApiGateway::new(&ClientConfig::default(), transport, session.clone());

        let err = login(&gateway, "admin", "wrong").await.expect_err("401");

        assert_eq!(err, ApiError::Auth(INVALID_CREDENTIALS_MESSAGE.to_string()));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn login_passes_server_errors_through() {
        let transport = RecordingTransport::new();
        transport.push_json(500, "");
        let gateway =
            ApiGateway::new(&ClientConfig::default(), transport, SessionStore::in_memory());

        let err = login(&gateway, "admin", "pw").await.expect_err("500");

        assert!(matches!(
            err,
            ApiError::Server {
                status: 500,
                ..
            }
        ));
    }
}
