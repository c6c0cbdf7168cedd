use libris_frontend::{App, AppProps, AppServices, config, logging};

fn main() {
    logging::init();

    let config = config::load();
    tracing::info!(api = %config.api.base_url, "Starting libris frontend");

    match AppServices::for_browser(config) {
        Ok(services) => {
            yew::Renderer::<App>::with_props(AppProps { services }).render();
        }
        Err(e) => tracing::error!(error = %e, "Failed to initialise services"),
    }
}
