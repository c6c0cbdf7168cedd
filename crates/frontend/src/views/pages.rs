use super::NavBar;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PageProps {
    pub heading: AttrValue,
    pub summary: AttrValue,
}

#[function_component(Page)]
pub fn page(props: &PageProps) -> Html {
    html! {
        <div class="min-h-screen bg-gray-50">
            <NavBar />
            <main class="max-w-5xl mx-auto p-6">
                <h1 class="text-2xl font-bold text-gray-900 mb-2">{props.heading.clone()}</h1>
                <p class="text-gray-600">{props.summary.clone()}</p>
            </main>
        </div>
    }
}
