#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use std::{cell::Cell, rc::Rc};

    use crate::api::ApiClient;
    use crate::state::session::{Session, SessionStore};
    use crate::utils::navigation::SessionExpiredHandler;
    use crate::utils::storage::MemoryStorage;
    use leptos::*;

    /// Counts session-expired signals instead of alerting and navigating.
    #[derive(Clone, Default)]
    pub struct RecordingRedirect {
        calls: Rc<Cell<usize>>,
    }

    impl RecordingRedirect {
        pub fn calls(&self) -> usize {
            self.calls.get()
        }
    }

    impl SessionExpiredHandler for RecordingRedirect {
        fn on_session_expired(&self) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    pub fn grower_session() -> Session {
        let mut session = Session::new("u1", "t1");
        session.first_name = Some("Ada".into());
        session.last_name = Some("Lovelace".into());
        session.email = Some("ada@example.com".into());
        session
    }

    pub fn memory_store(session: Option<Session>) -> (MemoryStorage, SessionStore) {
        let storage = MemoryStorage::new();
        let store = SessionStore::initialize(Rc::new(storage.clone()));
        if let Some(session) = session {
            store.login(session);
        }
        (storage, store)
    }

    pub fn client_for(base_url: &str, store: SessionStore) -> (ApiClient, RecordingRedirect) {
        let redirect = RecordingRedirect::default();
        let client = ApiClient::new_with_base_url(base_url, store)
            .with_session_expired_handler(Rc::new(redirect.clone()));
        (client, redirect)
    }

    /// Provides a memory-backed session store and matching client.
    pub fn provide_session(session: Option<Session>) -> SessionStore {
        let (_storage, store) = memory_store(session);
        provide_context(store.clone());
        let (client, _redirect) = client_for("http://localhost:0/api", store.clone());
        provide_context(client);
        store
    }
}
