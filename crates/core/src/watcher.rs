//! Periodic token expiry check
//!
//! On the native side the check runs in a tokio task; in the browser it is
//! driven by a `setInterval` timer through `gloo-timers`. Each tick is
//! synchronous, so ticks never overlap.

use crate::config::SessionConfig;
use crate::error::CoreResult;
use crate::session::{SessionManager, SignOutReason};
use crate::token;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// `Send + Sync` on native targets, nothing in the single-threaded browser
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync + ?Sized> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> MaybeSend for T {}

/// Tells the user something they must acknowledge
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: MaybeSend {
    fn notify(&self, message: &str);
}

/// Notifier that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!("{message}");
    }
}

/// Invoked after an expired session has been cleared
pub trait ExpiredCallback: MaybeSend {
    fn call(&self);
}

impl<F: Fn() + MaybeSend> ExpiredCallback for F {
    fn call(&self) {
        self()
    }
}

/// Checks the stored token on a fixed period
pub struct ExpiryWatcher {
    session: SessionManager,
    notifier: Arc<dyn Notifier>,
    on_expired: Option<Arc<dyn ExpiredCallback>>,
    interval: Duration,
    message: Option<String>,
}

impl ExpiryWatcher {
    /// Watcher with the default session settings
    pub fn new(session: SessionManager, notifier: impl Notifier + 'static) -> Self {
        Self::from_config(session, notifier, &SessionConfig::default())
    }

    /// Watcher using the interval and notification settings of `config`
    pub fn from_config(
        session: SessionManager,
        notifier: impl Notifier + 'static,
        config: &SessionConfig,
    ) -> Self {
        Self {
            session,
            notifier: Arc::new(notifier),
            on_expired: None,
            interval: config.check_interval(),
            message: config
                .notify_on_expiry
                .then(|| config.expiry_message.clone()),
        }
    }

    /// Set the check period
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run `callback` after each expired session is cleared
    pub fn on_expired(mut self, callback: impl Fn() + MaybeSend + 'static) -> Self {
        self.on_expired = Some(Arc::new(callback));
        self
    }

    /// Run one check at `now`. Returns whether an expired session was cleared.
    pub fn check_at(&self, now: DateTime<Utc>) -> bool {
        let Some(token) = self.session.token() else {
            return false;
        };
        if !token::is_expired_at(&token, now) {
            return false;
        }

        tracing::info!("Stored token has expired");
        if let Some(message) = &self.message {
            self.notifier.notify(message);
        }
        self.session.clear(SignOutReason::Expired);
        if let Some(callback) = &self.on_expired {
            callback.call();
        }
        true
    }

    /// Run one check now
    pub fn check(&self) -> bool {
        self.check_at(Utc::now())
    }

    /// Start checking every interval. The first check happens after one period.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoRuntime`](crate::CoreError::NoRuntime) when called
    /// outside a tokio runtime on native targets
    #[cfg(not(target_arch = "wasm32"))]
    pub fn start(self) -> CoreResult<WatchHandle> {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| crate::CoreError::NoRuntime)?;
        let period = self.interval.max(Duration::from_millis(1));
        tracing::debug!(?period, "Starting expiry watcher");

        let task = runtime.spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                self.check();
            }
        });

        Ok(WatchHandle { timer: Some(task) })
    }

    /// Start checking every interval. The first check happens after one period.
    ///
    /// # Errors
    ///
    /// Never fails in the browser
    #[cfg(target_arch = "wasm32")]
    pub fn start(self) -> CoreResult<WatchHandle> {
        let millis = u32::try_from(self.interval.as_millis())
            .unwrap_or(u32::MAX)
            .max(1);
        tracing::debug!(millis, "Starting expiry watcher");

        let timer = gloo_timers::callback::Interval::new(millis, move || {
            self.check();
        });

        Ok(WatchHandle { timer: Some(timer) })
    }
}

#[cfg(not(target_arch = "wasm32"))]
type Timer = tokio::task::JoinHandle<()>;

#[cfg(target_arch = "wasm32")]
type Timer = gloo_timers::callback::Interval;

/// Handle to a running watcher. Dropping it stops the checks.
pub struct WatchHandle {
    timer: Option<Timer>,
}

impl WatchHandle {
    /// Stop the checks
    pub fn cancel(mut self) {
        self.stop();
    }

    /// Keep the checks running for the rest of the program
    pub fn detach(mut self) {
        if let Some(timer) = self.timer.take() {
            #[cfg(target_arch = "wasm32")]
            {
                let _ = timer.forget();
            }
            #[cfg(not(target_arch = "wasm32"))]
            drop(timer);
        }
    }

    fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            #[cfg(not(target_arch = "wasm32"))]
            timer.abort();
            #[cfg(target_arch = "wasm32")]
            drop(timer);
            tracing::debug!("Expiry watcher stopped");
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
