use crate::routes::Route;
use crate::services::use_services;
use libris_http::types::RegisterRequest;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

const FIELDS: [(&str, &str, &str); 5] = [
    ("username", "text", "Username"),
    ("password", "password", "Password"),
    ("email", "email", "Email"),
    ("name", "text", "First name"),
    ("last_name", "text", "Last name"),
];

#[function_component(RegisterView)]
pub fn register_view() -> Html {
    let services = use_services();
    let navigator = use_navigator();
    let refs = use_memo((), |_| {
        FIELDS.map(|_| NodeRef::default())
    });
    let error = use_state(|| None::<String>);

    let onsubmit = {
        let client = services.client.clone();
        let refs = refs.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let values: Vec<String> = refs
                .iter()
                .filter_map(|node| node.cast::<HtmlInputElement>())
                .map(|input| input.value())
                .collect();
            let Ok([username, password, email, name, last_name]) = <[String; 5]>::try_from(values)
            else {
                return;
            };
            let request = RegisterRequest {
                username,
                password,
                email,
                name,
                last_name,
            };

            let client = client.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            spawn_local(async move {
                match client.register(&request).await {
                    Ok(response) => {
                        tracing::info!(message = %response.message, "Account created");
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Login);
                        }
                    }
                    Err(e) => error.set(Some(
                        e.server_message().unwrap_or("Registration failed").to_string(),
                    )),
                }
            });
        })
    };

    html! {
        <div class="min-h-screen bg-gray-50 flex items-center justify-center px-4">
            <form {onsubmit} class="max-w-md w-full bg-white rounded-2xl shadow p-8 space-y-4">
                <h1 class="text-2xl font-bold text-gray-900">{"Create an account"}</h1>
                if let Some(message) = (*error).clone() {
                    <p class="text-sm text-red-600">{message}</p>
                }
                { for FIELDS.iter().zip(refs.iter()).map(|((name, kind, label), node)| html! {
                    <input ref={node.clone()} name={*name} type={*kind} placeholder={*label} required=true
                        class="w-full px-3 py-2 border border-gray-300 rounded-lg" />
                }) }
                <button type="submit" class="w-full py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg">
                    {"Register"}
                </button>
                <p class="text-sm text-gray-600">
                    {"Already registered? "}
                    <Link<Route> to={Route::Login} classes="text-blue-600">{"Sign in"}</Link<Route>>
                </p>
            </form>
        </div>
    }
}
