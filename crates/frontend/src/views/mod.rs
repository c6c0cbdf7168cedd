//! Views
//!
//! Login, registration and navigation, plus placeholder pages for the
//! catalogue, loan and account screens.

mod login;
mod nav;
mod pages;
mod register;

pub use login::LoginView;
pub use nav::NavBar;
pub use pages::Page;
pub use register::RegisterView;

use crate::routes::Route;
use yew::prelude::*;

/// View for an already guarded route
pub fn render(route: &Route) -> Html {
    match route {
        Route::Login | Route::Root => html! { <LoginView /> },
        Route::Register => html! { <RegisterView /> },
        Route::Home => html! {
            <Page heading="Home" summary="Welcome to the online library." />
        },
        Route::Books => html! {
            <Page heading="Books" summary="Browse the catalogue and borrow available titles." />
        },
        Route::Loans => html! {
            <Page heading="My loans" summary="Books you currently have on loan." />
        },
        Route::ChangeAccountDetails => html! {
            <Page heading="Account details" summary="Update your name, email or password." />
        },
        Route::ManageBooks => html! {
            <Page heading="Manage books" summary="Add, edit and remove titles." />
        },
        Route::ManageUsers => html! {
            <Page heading="Manage users" summary="Create accounts and assign roles." />
        },
        Route::LoansHistory => html! {
            <Page heading="Loan history" summary="Every loan across all members." />
        },
        Route::NotFound => html! {
            <div class="min-h-screen flex items-center justify-center">
                <h1 class="text-2xl font-bold text-gray-700">{"404 - Page not found"}</h1>
            </div>
        },
    }
}
