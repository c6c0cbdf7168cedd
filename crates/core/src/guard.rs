//! Pre-navigation route guard

use crate::token::{self, Role};

/// Title used when a route does not declare one
pub const DEFAULT_TITLE: &str = "Online library";

/// Static metadata attached to a navigable view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_role: Option<Role>,
    pub title: Option<&'static str>,
}

impl RouteMeta {
    /// Reachable without a session
    pub fn public() -> Self {
        Self::default()
    }

    /// Requires a stored token
    pub fn authenticated() -> Self {
        Self {
            requires_auth: true,
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.requires_role = Some(role);
        self
    }

    pub fn with_title(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    /// Document title for this route
    pub fn page_title(&self) -> &'static str {
        self.title.unwrap_or(DEFAULT_TITLE)
    }
}

/// A route table the guard can reason about
pub trait GuardedRoute: Clone + PartialEq + std::fmt::Debug {
    /// Metadata for this route
    fn meta(&self) -> RouteMeta;

    /// Login and registration views, pointless for a signed-in user
    fn is_guest_only(&self) -> bool;

    /// Where unauthenticated users are sent
    fn login() -> Self;

    /// Where signed-in users are sent when a view is off limits
    fn home() -> Self;
}

/// Outcome of a navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision<R> {
    Proceed,
    Redirect(R),
}

impl<R> GuardDecision<R> {
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Decide whether navigation to `target` may commit given the stored `token`.
///
/// Only the presence of a token is considered for the authentication checks;
/// the expiry watcher and the HTTP layer take care of stale tokens. A token
/// whose claims cannot be decoded never satisfies a role requirement.
pub fn evaluate<R: GuardedRoute>(target: &R, token: Option<&str>) -> GuardDecision<R> {
    let token = token.filter(|token| !token.is_empty());
    let meta = target.meta();

    let decision = if meta.requires_auth && token.is_none() {
        GuardDecision::Redirect(R::login())
    } else if target.is_guest_only() && token.is_some() {
        GuardDecision::Redirect(R::home())
    } else if let (Some(role), Some(token)) = (&meta.requires_role, token) {
        match token::decode(token) {
            Some(claims) if claims.has_role(role) => GuardDecision::Proceed,
            _ => GuardDecision::Redirect(R::home()),
        }
    } else {
        GuardDecision::Proceed
    };

    tracing::debug!(?target, ?decision, "Route guard evaluated");
    decision
}
