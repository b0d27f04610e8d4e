//! TaskNest Frontend Entry Point

mod app;
mod components;
mod context;
mod logger;
mod storage;

use app::App;
use leptos::prelude::*;
use tasknest_client::ClientConfig;

fn main() {
    console_error_panic_hook::set_once();

    let config = ClientConfig::from_env();
    logger::init(config.log_filter());
    log::info!("[APP] API at {}", config.api_base_url);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
