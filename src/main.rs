use log::{Level, LevelFilter, info};

mod components;
mod config;
mod dom;
mod input;
mod model;
mod net;
mod render;
mod state;
mod util;

use components::app::{App, AppProps};
use config::ClientConfig;

fn main() {
    console_error_panic_hook::set_once();
    // Installed at the most verbose level we emit; the configured level then
    // narrows it. Config parse warnings go out at info until then.
    let _ = console_log::init_with_level(Level::Debug);
    log::set_max_level(LevelFilter::Info);
    let config = ClientConfig::load();
    log::set_max_level(config.log_level.into());
    info!("starting arena client");
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
