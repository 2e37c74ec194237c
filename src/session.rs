//! Session storage
//!
//! The bearer token and cached user live in `localStorage` under `token` and
//! `user`. The server alone decides validity; the client drops the session on
//! a 401 or on logout.

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Where the session is persisted
pub trait SessionStore {
    fn token(&self) -> Option<String>;
    fn user(&self) -> Option<User>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

/// Browser `localStorage`
pub struct LocalStorageSession {
    storage: web_sys::Storage,
}

impl LocalStorageSession {
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl SessionStore for LocalStorageSession {
    fn token(&self) -> Option<String> {
        self.storage
            .get_item(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }

    fn user(&self) -> Option<User> {
        let raw = self.storage.get_item(USER_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("[Session] Ignoring unreadable cached user: {}", e);
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        if self.storage.set_item(TOKEN_KEY, &session.token).is_err() {
            log::error!("[Session] Failed to persist token");
        }
        match serde_json::to_string(&session.user) {
            Ok(json) => {
                if self.storage.set_item(USER_KEY, &json).is_err() {
                    log::error!("[Session] Failed to persist user");
                }
            }
            Err(e) => log::error!("[Session] Failed to encode user: {}", e),
        }
    }

    fn clear(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if self.storage.remove_item(key).is_err() {
                log::error!("[Session] Failed to remove {}", key);
            }
        }
    }
}

/// Page-lifetime session, used when `localStorage` is unavailable
#[derive(Default)]
pub struct MemorySession {
    inner: RefCell<Option<Session>>,
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.inner.borrow().as_ref().map(|s| s.token.clone())
    }

    fn user(&self) -> Option<User> {
        self.inner.borrow().as_ref().map(|s| s.user.clone())
    }

    fn save(&self, session: &Session) {
        *self.inner.borrow_mut() = Some(session.clone());
    }

    fn clear(&self) {
        self.inner.borrow_mut().take();
    }
}

/// `localStorage` when the browser allows it, memory otherwise
pub fn open_session_store() -> Rc<dyn SessionStore> {
    match LocalStorageSession::open() {
        Some(store) => Rc::new(store),
        None => {
            log::warn!("[Session] localStorage unavailable, session will not survive reload");
            Rc::new(MemorySession::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;

    fn session() -> Session {
        Session {
            token: "tok-123".into(),
            user: User { id: RecordId::new("1"), username: "ada".into(), email: "ada@example.com".into() },
        }
    }

    #[test]
    fn test_memory_session_round_trip() {
        let store = MemorySession::default();
        assert_eq!(store.token(), None);

        store.save(&session());
        assert_eq!(store.token().as_deref(), Some("tok-123"));
        assert_eq!(store.user().map(|u| u.username), Some("ada".to_string()));

        store.clear();
        assert_eq!(store.token(), None);
        assert_eq!(store.user(), None);
    }
}
