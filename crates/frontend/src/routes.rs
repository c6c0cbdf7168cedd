//! Route table

use libris_core::{GuardedRoute, Role, RouteMeta};
use yew_router::prelude::*;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/login")]
    Login,
    #[at("/")]
    Root,
    #[at("/register")]
    Register,
    #[at("/home")]
    Home,
    #[at("/books")]
    Books,
    #[at("/loans")]
    Loans,
    #[at("/change-account-details")]
    ChangeAccountDetails,
    #[at("/manage-books")]
    ManageBooks,
    #[at("/manage-users")]
    ManageUsers,
    #[at("/loans-history")]
    LoansHistory,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Route name as used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Root => "/",
            Self::Register => "register",
            Self::Home => "home",
            Self::Books => "books",
            Self::Loans => "loans",
            Self::ChangeAccountDetails => "change-account-details",
            Self::ManageBooks => "manage-books",
            Self::ManageUsers => "manage-users",
            Self::LoansHistory => "loans-history",
            Self::NotFound => "not-found",
        }
    }
}

impl GuardedRoute for Route {
    fn meta(&self) -> RouteMeta {
        match self {
            Self::Login | Self::Root | Self::Register | Self::NotFound => RouteMeta::public(),
            Self::Home | Self::Books | Self::Loans | Self::ChangeAccountDetails => {
                RouteMeta::authenticated()
            }
            Self::ManageBooks | Self::ManageUsers | Self::LoansHistory => {
                RouteMeta::authenticated().with_role(Role::Librarian)
            }
        }
    }

    // The root path shows the login view but is not treated as one
    fn is_guest_only(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    fn login() -> Self {
        Self::Login
    }

    fn home() -> Self {
        Self::Home
    }
}
