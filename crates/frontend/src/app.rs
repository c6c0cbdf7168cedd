use crate::browser::AlertNotifier;
use crate::guard::switch;
use crate::routes::Route;
use crate::services::{AppServices, use_services};
use libris_core::{ExpiryWatcher, SessionEvent, SignOutReason};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::oneshot;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub services: AppServices,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    html! {
        <ContextProvider<AppServices> context={props.services.clone()}>
            <BrowserRouter>
                <SessionRedirects />
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<AppServices>>
    }
}

/// Runs the expiry watcher and sends the user to the login view whenever
/// the session ends
#[function_component(SessionRedirects)]
fn session_redirects() -> Html {
    let services = use_services();
    let navigator = use_navigator();

    use_effect_with((), move |_| {
        let watcher = ExpiryWatcher::from_config(
            services.session.clone(),
            AlertNotifier,
            &services.config.session,
        )
        .start()
        .map_err(|e| tracing::error!(error = %e, "Failed to start expiry watcher"))
        .ok();

        let (stop, stopped) = oneshot::channel();
        if let Some(navigator) = navigator {
            spawn_local(forward_sign_outs(
                services.session.subscribe(),
                stopped,
                move |reason| {
                    if reason.is_forced() {
                        tracing::info!(?reason, "Session ended, redirecting to login");
                    } else {
                        tracing::info!("Signed out");
                    }
                    navigator.push(&Route::Login);
                },
            ));
        } else {
            tracing::warn!("No router available, session redirects disabled");
        }

        move || {
            drop(stop);
            if let Some(watcher) = watcher {
                watcher.cancel();
            }
        }
    });

    html! {}
}

/// Call `on_sign_out` for every sign-out until `stop` fires or its sender
/// is dropped. The event receiver is dropped on return.
pub async fn forward_sign_outs(
    mut events: broadcast::Receiver<SessionEvent>,
    mut stop: oneshot::Receiver<()>,
    on_sign_out: impl Fn(SignOutReason),
) {
    loop {
        tokio::select! {
            biased;
            _ = &mut stop => break,
            event = events.recv() => match event {
                Ok(SessionEvent::SignedOut { reason }) => on_sign_out(reason),
                Ok(SessionEvent::SignedIn) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Missed session events");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
    tracing::debug!("Stopped listening for session events");
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::{MemoryTokenStore, SessionManager};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn recorder() -> (Arc<Mutex<Vec<SignOutReason>>>, impl Fn(SignOutReason) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |reason| sink.lock().unwrap().push(reason))
    }

    async fn wait_for(seen: &Mutex<Vec<SignOutReason>>, count: usize) {
        while seen.lock().unwrap().len() < count {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_every_sign_out_is_forwarded() {
        let session = SessionManager::in_memory();
        let (seen, on_sign_out) = recorder();
        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(forward_sign_outs(session.subscribe(), stopped, on_sign_out));

        session.set_token("a.b.c").unwrap();
        session.clear(SignOutReason::Rejected);
        session.set_token("a.b.c").unwrap();
        session.clear(SignOutReason::Logout);

        tokio::time::timeout(Duration::from_secs(1), wait_for(&seen, 2))
            .await
            .unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![SignOutReason::Rejected, SignOutReason::Logout]
        );

        drop(stop);
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_stopping_without_further_events_ends_listener() {
        let session = SessionManager::new(MemoryTokenStore::with_token("a.b.c"));
        let (seen, on_sign_out) = recorder();
        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(forward_sign_outs(session.subscribe(), stopped, on_sign_out));

        stop.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();

        // Nobody is listening any more
        assert!(session.clear(SignOutReason::Expired));
        assert!(seen.lock().unwrap().is_empty());
    }
}
