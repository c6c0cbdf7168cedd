//! Session manager
//!
//! The stored token is the only session state. Every component that reads,
//! replaces or clears it goes through [`SessionManager`], which also
//! broadcasts [`SessionEvent`]s so that navigation can react to sign-outs
//! without the HTTP layer or the watcher knowing about the router.

use crate::error::CoreResult;
use crate::token::{self, Claims};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;

/// Capacity of the session event channel
const EVENT_CAPACITY: usize = 16;

/// Backing storage for the raw token string
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any
    fn load(&self) -> Option<String>;

    /// Replace the stored token
    fn save(&self, token: &str) -> CoreResult<()>;

    /// Delete the stored token
    fn remove(&self) -> CoreResult<()>;
}

/// In-process token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, token: &str) -> CoreResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> CoreResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutReason {
    /// The user logged out
    Logout,
    /// The periodic check found an expired token
    Expired,
    /// An outgoing request found an expired token
    ExpiredBeforeRequest,
    /// The server answered 401 or reported the token as expired
    Rejected,
}

impl SignOutReason {
    /// Whether the session ended without the user asking for it
    pub fn is_forced(self) -> bool {
        !matches!(self, Self::Logout)
    }
}

/// Session change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    SignedOut { reason: SignOutReason },
}

/// Shared handle to the session
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    /// Create a session backed by `store`
    pub fn new(store: impl TokenStore + 'static) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store: Arc::new(store),
            events,
        }
    }

    /// Create a session backed by a fresh [`MemoryTokenStore`]
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// The stored token. An empty string counts as no token.
    pub fn token(&self) -> Option<String> {
        self.store.load().filter(|token| !token.is_empty())
    }

    /// Store a newly issued token
    pub fn set_token(&self, token: &str) -> CoreResult<()> {
        self.store.save(token)?;
        tracing::info!("Session token stored");
        let _ = self.events.send(SessionEvent::SignedIn);
        Ok(())
    }

    /// Delete the token and announce the sign-out.
    ///
    /// Returns `false` without emitting anything when there was no token.
    pub fn clear(&self, reason: SignOutReason) -> bool {
        if self.token().is_none() {
            return false;
        }

        if let Err(e) = self.store.remove() {
            tracing::warn!(error = %e, "Failed to remove session token");
        }
        tracing::info!(?reason, "Session cleared");
        let _ = self.events.send(SessionEvent::SignedOut { reason });
        true
    }

    /// Decode the claims of the stored token
    pub fn claims(&self) -> Option<Claims> {
        self.token().as_deref().and_then(token::decode)
    }

    /// Whether a token is stored and unexpired at `now`
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.token()
            .is_some_and(|token| !token::is_expired_at(&token, now))
    }

    /// Whether a token is stored and currently unexpired
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    /// Receive session events from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Whether both handles share the same session
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::token::Role;
    use crate::token::tests::token_expiring_in;
    use tokio::sync::broadcast::error::TryRecvError;

    struct ReadOnlyStore(String);

    impl TokenStore for ReadOnlyStore {
        fn load(&self) -> Option<String> {
            Some(self.0.clone())
        }

        fn save(&self, _token: &str) -> CoreResult<()> {
            Err(CoreError::Storage("quota exceeded".to_string()))
        }

        fn remove(&self) -> CoreResult<()> {
            Err(CoreError::Storage("storage disabled".to_string()))
        }
    }

    #[test]
    fn test_set_and_clear_token() {
        let session = SessionManager::in_memory();
        let mut events = session.subscribe();
        assert_eq!(session.token(), None);

        session.set_token("abc.def.ghi").unwrap();
        assert_eq!(session.token().as_deref(), Some("abc.def.ghi"));
        assert_eq!(events.try_recv().unwrap(), SessionEvent::SignedIn);

        assert!(session.clear(SignOutReason::Logout));
        assert_eq!(session.token(), None);
        assert_eq!(
            events.try_recv().unwrap(),
            SessionEvent::SignedOut {
                reason: SignOutReason::Logout
            }
        );
    }

    #[test]
    fn test_clear_without_token_is_silent() {
        let session = SessionManager::in_memory();
        let mut events = session.subscribe();

        assert!(!session.clear(SignOutReason::Rejected));
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let session = SessionManager::new(MemoryTokenStore::with_token(""));
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_claims_and_authentication() {
        let session = SessionManager::new(MemoryTokenStore::with_token(token_expiring_in(
            600,
            "librarian",
        )));
        assert!(session.is_authenticated());
        assert!(session.claims().unwrap().has_role(&Role::Librarian));

        let expired =
            SessionManager::new(MemoryTokenStore::with_token(token_expiring_in(-600, "member")));
        assert!(!expired.is_authenticated());
        assert!(expired.claims().is_some());
    }

    #[test]
    fn test_clones_share_state_and_events() {
        let session = SessionManager::in_memory();
        let other = session.clone();
        let mut events = other.subscribe();

        session.set_token("a.b.c").unwrap();
        assert!(other.ptr_eq(&session));
        assert_eq!(other.token().as_deref(), Some("a.b.c"));
        assert_eq!(events.try_recv().unwrap(), SessionEvent::SignedIn);

        assert!(!session.ptr_eq(&SessionManager::in_memory()));
    }

    #[test]
    fn test_store_failures() {
        let session = SessionManager::new(ReadOnlyStore("a.b.c".to_string()));
        let mut events = session.subscribe();

        assert!(matches!(
            session.set_token("x.y.z"),
            Err(CoreError::Storage(_))
        ));
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));

        // Removal failures are logged, the sign-out is still announced
        assert!(session.clear(SignOutReason::Expired));
        assert_eq!(
            events.try_recv().unwrap(),
            SessionEvent::SignedOut {
                reason: SignOutReason::Expired
            }
        );
    }

    #[test]
    fn test_forced_reasons() {
        assert!(!SignOutReason::Logout.is_forced());
        assert!(SignOutReason::Expired.is_forced());
        assert!(SignOutReason::ExpiredBeforeRequest.is_forced());
        assert!(SignOutReason::Rejected.is_forced());
    }
}
