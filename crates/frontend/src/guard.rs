//! Route guard component

use crate::routes::Route;
use crate::services::use_services;
use crate::views;
use libris_core::{GuardDecision, GuardedRoute, guard};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct GuardedViewProps {
    pub route: Route,
}

/// Render `route` if the guard lets the navigation through, redirect otherwise
#[function_component(GuardedView)]
pub fn guarded_view(props: &GuardedViewProps) -> Html {
    let services = use_services();

    // The title follows the requested route whatever the guard decides
    use_effect_with(props.route.meta().page_title(), |title| {
        gloo::utils::document().set_title(title);
    });

    match guard::evaluate(&props.route, services.session.token().as_deref()) {
        GuardDecision::Proceed => views::render(&props.route),
        GuardDecision::Redirect(target) => {
            tracing::debug!(from = props.route.name(), to = target.name(), "Navigation redirected");
            html! { <Redirect<Route> to={target} /> }
        }
    }
}

pub fn switch(route: Route) -> Html {
    html! { <GuardedView {route} /> }
}
