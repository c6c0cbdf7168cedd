use crate::routes::Route;
use crate::services::use_services;
use libris_core::Role;
use yew::prelude::*;
use yew_router::prelude::*;

/// Top navigation. Librarian links only show for the librarian role.
#[function_component(NavBar)]
pub fn nav_bar() -> Html {
    let services = use_services();
    let is_librarian = services
        .session
        .claims()
        .is_some_and(|claims| claims.has_role(&Role::Librarian));

    let on_logout = {
        let client = services.client.clone();
        Callback::from(move |_: MouseEvent| {
            client.logout();
        })
    };

    html! {
        <nav class="bg-white border-b border-gray-200 px-6 py-3 flex items-center gap-4">
            <Link<Route> to={Route::Home} classes="font-bold text-blue-600">{"Online library"}</Link<Route>>
            <Link<Route> to={Route::Books}>{"Books"}</Link<Route>>
            <Link<Route> to={Route::Loans}>{"My loans"}</Link<Route>>
            <Link<Route> to={Route::ChangeAccountDetails}>{"Account"}</Link<Route>>
            if is_librarian {
                <Link<Route> to={Route::ManageBooks}>{"Manage books"}</Link<Route>>
                <Link<Route> to={Route::ManageUsers}>{"Manage users"}</Link<Route>>
                <Link<Route> to={Route::LoansHistory}>{"Loan history"}</Link<Route>>
            }
            <button
                onclick={on_logout}
                class="ml-auto px-4 py-2 text-sm font-medium text-gray-700 bg-gray-100 hover:bg-gray-200 rounded-lg"
            >
                {"Logout"}
            </button>
        </nav>
    }
}
