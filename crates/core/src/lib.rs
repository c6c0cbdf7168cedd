//! Libris client session core
//!
//! Token decoding, the session manager, the periodic expiry check and the
//! route guard. Nothing here touches the DOM; browser glue lives in
//! `libris-frontend`.

pub mod config;
pub mod error;
pub mod guard;
pub mod session;
pub mod token;
pub mod watcher;

pub use config::{ApiConfig, LibrisConfig, SessionConfig};
pub use error::{CoreError, CoreResult};
pub use guard::{GuardDecision, GuardedRoute, RouteMeta};
pub use session::{
    MemoryTokenStore, SessionEvent, SessionManager, SignOutReason, TokenStore,
};
pub use token::{Claims, Role};
pub use watcher::{ExpiryWatcher, LogNotifier, Notifier, WatchHandle};
