//! Libris web frontend
//!
//! Yew single page app for the online library. Navigation goes through the
//! session route guard and every API call through the session-aware client.

pub mod app;
pub mod browser;
pub mod config;
pub mod guard;
pub mod logging;
pub mod routes;
pub mod services;
pub mod views;

pub use app::{App, AppProps};
pub use routes::Route;
pub use services::AppServices;
