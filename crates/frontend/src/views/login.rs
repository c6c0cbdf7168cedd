use crate::routes::Route;
use crate::services::use_services;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginView)]
pub fn login_view() -> Html {
    let services = use_services();
    let navigator = use_navigator();
    let username_ref = use_node_ref();
    let password_ref = use_node_ref();
    let error = use_state(|| None::<String>);
    let is_loading = use_state(|| false);

    let onsubmit = {
        let client = services.client.clone();
        let username_ref = username_ref.clone();
        let password_ref = password_ref.clone();
        let error = error.clone();
        let is_loading = is_loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let (Some(username), Some(password)) = (
                username_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) else {
                return;
            };

            let client = client.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let is_loading = is_loading.clone();
            is_loading.set(true);

            spawn_local(async move {
                match client.login(username.value(), password.value()).await {
                    Ok(_) => {
                        error.set(None);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Home);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Login failed");
                        error.set(Some(
                            e.server_message().unwrap_or("Login failed").to_string(),
                        ));
                    }
                }
                is_loading.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen bg-gray-50 flex items-center justify-center px-4">
            <form {onsubmit} class="max-w-md w-full bg-white rounded-2xl shadow p-8 space-y-4">
                <h1 class="text-2xl font-bold text-gray-900">{"Sign in"}</h1>
                if let Some(message) = (*error).clone() {
                    <p class="text-sm text-red-600">{message}</p>
                }
                <input ref={username_ref} type="text" placeholder="Username" required=true
                    class="w-full px-3 py-2 border border-gray-300 rounded-lg" />
                <input ref={password_ref} type="password" placeholder="Password" required=true
                    class="w-full px-3 py-2 border border-gray-300 rounded-lg" />
                <button type="submit" disabled={*is_loading}
                    class="w-full py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg">
                    {if *is_loading { "Signing in..." } else { "Sign in" }}
                </button>
                <p class="text-sm text-gray-600">
                    {"No account yet? "}
                    <Link<Route> to={Route::Register} classes="text-blue-600">{"Register"}</Link<Route>>
                </p>
            </form>
        </div>
    }
}
