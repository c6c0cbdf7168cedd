//! Shared application services

use crate::browser::LocalTokenStore;
use libris_core::{LibrisConfig, SessionManager, TokenStore};
use libris_http::{ClientError, LibraryClient};
use std::rc::Rc;
use yew::prelude::*;

/// Session, API client and configuration shared through context
#[derive(Clone)]
pub struct AppServices {
    pub config: Rc<LibrisConfig>,
    pub session: SessionManager,
    pub client: LibraryClient,
}

impl AppServices {
    /// Build services around `store`
    pub fn new(config: LibrisConfig, store: impl TokenStore + 'static) -> Result<Self, ClientError> {
        let session = SessionManager::new(store);
        let client = LibraryClient::builder()
            .config(&config.api)
            .session(session.clone())
            .build()?;

        Ok(Self {
            config: Rc::new(config),
            session,
            client,
        })
    }

    /// Build services backed by `localStorage`
    pub fn for_browser(config: LibrisConfig) -> Result<Self, ClientError> {
        let store = LocalTokenStore::new(config.session.storage_key.clone());
        Self::new(config, store)
    }
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config) && self.session.ptr_eq(&other.session)
    }
}

/// Hook to use the application services
#[hook]
pub fn use_services() -> AppServices {
    use_context::<AppServices>()
        .expect("AppServices not found. Make sure to wrap your component with App")
}
