use std::rc::Rc;

use leptos::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    api::{ApiClient, ApiError, LoginRequest, ProfileUpdate},
    utils::storage::{BrowserSessionStorage, MemoryStorage, TabStorage},
};

pub const SESSION_STORAGE_KEY: &str = "user";

/// The signed-in identity as returned by `/users/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(deserialize_with = "opaque_id")]
    pub user_id: String,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Any other fields the backend sent; kept so the stored copy matches.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: access_token.into(),
            refresh_token: None,
            first_name: None,
            last_name: None,
            username: None,
            email: None,
            extra: Map::new(),
        }
    }

    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        self.username
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.user_id.clone())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OpaqueId {
    Text(String),
    Number(serde_json::Number),
}

/// User ids are opaque; numeric ids are kept as their decimal text.
fn opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match OpaqueId::deserialize(deserializer)? {
        OpaqueId::Text(id) => id,
        OpaqueId::Number(id) => id.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No active session")]
    NoActiveSession,
}

/// Owner of the current [`Session`].
///
/// Views read through [`SessionStore::current`] (reactive) and change the
/// session only through `login`, `logout`, `update_access_token` and
/// `update_profile`. Every mutation is written through to tab storage.
#[derive(Clone)]
pub struct SessionStore {
    current: RwSignal<Option<Session>>,
    storage: Rc<dyn TabStorage>,
}

impl SessionStore {
    /// Restores the session saved in `storage`, if any. A malformed stored
    /// value is discarded and the store starts anonymous.
    pub fn initialize(storage: Rc<dyn TabStorage>) -> Self {
        let restored = load_session(storage.as_ref());
        Self {
            current: create_rw_signal(restored),
            storage,
        }
    }

    pub fn browser() -> Self {
        Self::initialize(default_storage())
    }

    pub fn current(&self) -> Option<Session> {
        self.current.get()
    }

    pub fn current_untracked(&self) -> Option<Session> {
        self.current.get_untracked()
    }

    pub fn read_only(&self) -> ReadSignal<Option<Session>> {
        self.current.read_only()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.with(Option::is_some)
    }

    pub fn access_token(&self) -> Option<String> {
        self.current
            .with_untracked(|session| session.as_ref().map(|s| s.access_token.clone()))
    }

    pub fn user_id(&self) -> Option<String> {
        self.current
            .with_untracked(|session| session.as_ref().map(|s| s.user_id.clone()))
    }

    pub fn login(&self, session: Session) {
        log::info!("Signed in as {}", session.user_id);
        self.persist(&session);
        self.current.set(Some(session));
    }

    pub fn logout(&self) {
        self.storage.remove_item(SESSION_STORAGE_KEY);
        if self.current.with_untracked(Option::is_some) {
            log::info!("Signed out");
            self.current.set(None);
        }
    }

    pub fn update_access_token(&self, token: impl Into<String>) -> Result<(), SessionError> {
        let mut session = self
            .current
            .get_untracked()
            .ok_or(SessionError::NoActiveSession)?;
        session.access_token = token.into();
        self.persist(&session);
        self.current.set(Some(session));
        Ok(())
    }

    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<(), SessionError> {
        let mut session = self
            .current
            .get_untracked()
            .ok_or(SessionError::NoActiveSession)?;
        session.first_name = Some(update.first_name.clone());
        session.last_name = Some(update.last_name.clone());
        session.email = Some(update.email.clone());
        self.persist(&session);
        self.current.set(Some(session));
        Ok(())
    }

    fn persist(&self, session: &Session) {
        let serialized = match serde_json::to_string(session) {
            Ok(serialized) => serialized,
            Err(err) => {
                log::warn!("Failed to serialize session: {}", err);
                return;
            }
        };
        if let Err(err) = self.storage.set_item(SESSION_STORAGE_KEY, &serialized) {
            log::warn!("Failed to persist session: {}", err);
        }
    }
}

fn load_session(storage: &dyn TabStorage) -> Option<Session> {
    let raw = storage.get_item(SESSION_STORAGE_KEY)?;
    match serde_json::from_str::<Option<Session>>(&raw) {
        Ok(session) => session,
        Err(err) => {
            log::warn!("Discarding malformed stored session: {}", err);
            storage.remove_item(SESSION_STORAGE_KEY);
            None
        }
    }
}

fn default_storage() -> Rc<dyn TabStorage> {
    if cfg!(target_arch = "wasm32") {
        Rc::new(BrowserSessionStorage)
    } else {
        Rc::new(MemoryStorage::new())
    }
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let store = SessionStore::browser();
    provide_context(ApiClient::new(store.clone()));
    provide_context(store);
    view! { <>{children()}</> }
}

pub fn use_session() -> SessionStore {
    match use_context::<SessionStore>() {
        Some(store) => store,
        None => {
            let store = SessionStore::browser();
            provide_context(store.clone());
            store
        }
    }
}

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    SignedIn,
    Rejected(String),
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    store: &SessionStore,
) -> Result<LoginOutcome, ApiError> {
    let response = api.login(&request).await?;
    if let Some(message) = response.message.as_deref() {
        log::debug!("Login response: {}", message);
    }
    match response.into_session() {
        Some(session) => {
            store.login(session);
            Ok(LoginOutcome::SignedIn)
        }
        None => Ok(LoginOutcome::Rejected(INVALID_CREDENTIALS.to_string())),
    }
}

pub fn use_login_action() -> Action<LoginRequest, Result<LoginOutcome, ApiError>> {
    let store = use_session();
    let api = crate::api::use_api_client();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        let store = store.clone();
        async move { login_request(payload, &api, &store).await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;
    use serde_json::json;

    fn memory_store() -> (MemoryStorage, SessionStore) {
        let storage = MemoryStorage::new();
        let store = SessionStore::initialize(Rc::new(storage.clone()));
        (storage, store)
    }

    fn reload(storage: &MemoryStorage) -> SessionStore {
        SessionStore::initialize(Rc::new(storage.clone()))
    }

    fn full_session() -> Session {
        let mut session = Session::new("u1", "t1");
        session.refresh_token = Some("r1".into());
        session.first_name = Some("Ada".into());
        session.last_name = Some("Lovelace".into());
        session.username = Some("ada".into());
        session.email = Some("ada@example.com".into());
        session.extra.insert("role".into(), json!("grower"));
        session
    }

    #[test]
    fn initialize_without_stored_session_is_anonymous() {
        with_runtime(|| {
            let (_storage, store) = memory_store();
            assert!(!store.is_authenticated());
            assert!(store.current().is_none());
            assert!(store.access_token().is_none());
        });
    }

    #[test]
    fn numeric_user_id_is_kept_as_text_across_reload() {
        with_runtime(|| {
            let (storage, store) = memory_store();
            let session: Session = serde_json::from_value(json!({
                "userId": 702,
                "accessToken": "t1"
            }))
            .unwrap();
            store.login(session);

            let restored = reload(&storage);
            assert_eq!(restored.user_id().as_deref(), Some("702"));
            assert_eq!(restored.access_token().as_deref(), Some("t1"));
        });
    }

    #[test]
    fn login_survives_reload() {
        with_runtime(|| {
            let (storage, store) = memory_store();
            store.login(full_session());

            let reloaded = reload(&storage);
            assert_eq!(reloaded.current(), Some(full_session()));
            assert!(reloaded.is_authenticated());
        });
    }

    #[test]
    fn login_replaces_existing_session() {
        with_runtime(|| {
            let (storage, store) = memory_store();
            store.login(Session::new("u1", "t1"));
            store.login(Session::new("u2", "t9"));

            assert_eq!(store.user_id().as_deref(), Some("u2"));
            assert_eq!(reload(&storage).user_id().as_deref(), Some("u2"));
        });
    }

    #[test]
    fn logout_clears_memory_and_storage() {
        with_runtime(|| {
            let (storage, store) = memory_store();
            store.login(full_session());
            store.logout();

            assert!(store.current().is_none());
            assert!(storage.raw(SESSION_STORAGE_KEY).is_none());
            assert!(reload(&storage).current().is_none());
        });
    }

    #[test]
    fn logout_when_anonymous_is_noop() {
        with_runtime(|| {
            let (storage, store) = memory_store();
            store.logout();
            store.logout();
            assert!(store.current().is_none());
            assert!(storage.raw(SESSION_STORAGE_KEY).is_none());
        });
    }

    #[test]
    fn update_access_token_changes_only_the_token() {
        with_runtime(|| {
            let (storage, store) = memory_store();
            store.login(full_session());
            let before = storage.raw(SESSION_STORAGE_KEY).unwrap();

            store.update_access_token("t2").unwrap();

            let mut expected = full_session();
            expected.access_token = "t2".into();
            assert_eq!(store.current(), Some(expected.clone()));

            let after = storage.raw(SESSION_STORAGE_KEY).unwrap();
            assert_eq!(after, before.replace("\"t1\"", "\"t2\""));
            assert_eq!(reload(&storage).current(), Some(expected));
        });
    }

    #[test]
    fn update_access_token_without_session_fails_and_persists_nothing() {
        with_runtime(|| {
            let (storage, store) = memory_store();
            assert_eq!(
                store.update_access_token("t2"),
                Err(SessionError::NoActiveSession)
            );
            assert!(store.current().is_none());
            assert!(storage.raw(SESSION_STORAGE_KEY).is_none());
        });
    }

    #[test]
    fn malformed_stored_value_is_treated_as_anonymous() {
        with_runtime(|| {
            let storage = MemoryStorage::new();
            storage.set_item(SESSION_STORAGE_KEY, "{not json").unwrap();
            let store = reload(&storage);
            assert!(store.current().is_none());
            assert!(storage.raw(SESSION_STORAGE_KEY).is_none());

            storage
                .set_item(SESSION_STORAGE_KEY, r#"{"userId":"u1"}"#)
                .unwrap();
            assert!(reload(&storage).current().is_none());
        });
    }

    #[test]
    fn stored_null_is_anonymous() {
        with_runtime(|| {
            let storage = MemoryStorage::new();
            storage.set_item(SESSION_STORAGE_KEY, "null").unwrap();
            assert!(reload(&storage).current().is_none());
        });
    }

    #[test]
    fn update_profile_keeps_token_and_requires_session() {
        with_runtime(|| {
            let (storage, store) = memory_store();
            let update = ProfileUpdate {
                first_name: "Grace".into(),
                last_name: "Hopper".into(),
                email: "grace@example.com".into(),
                ..ProfileUpdate::default()
            };
            assert_eq!(
                store.update_profile(&update),
                Err(SessionError::NoActiveSession)
            );

            store.login(full_session());
            store.update_profile(&update).unwrap();
            let reloaded = reload(&storage).current().unwrap();
            assert_eq!(reloaded.first_name.as_deref(), Some("Grace"));
            assert_eq!(reloaded.email.as_deref(), Some("grace@example.com"));
            assert_eq!(reloaded.access_token, "t1");
            assert_eq!(reloaded.extra.get("role"), Some(&json!("grower")));
        });
    }

    #[test]
    fn display_name_prefers_full_name() {
        let mut session = Session::new("u1", "t1");
        assert_eq!(session.display_name(), "u1");
        session.email = Some("ada@example.com".into());
        assert_eq!(session.display_name(), "ada@example.com");
        session.first_name = Some("Ada".into());
        assert_eq!(session.display_name(), "Ada");
        session.last_name = Some("Lovelace".into());
        assert_eq!(session.display_name(), "Ada Lovelace");
    }

    #[test]
    fn use_session_falls_back_to_anonymous_store() {
        with_runtime(|| {
            let store = use_session();
            assert!(!store.is_authenticated());
        });
    }
}
