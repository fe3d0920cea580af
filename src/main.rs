mod components;
mod config;
mod error;
mod model;
mod state;
mod util;

use components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // Only fails if a logger is already installed
    let _ = console_log::init_with_level(level);
    yew::Renderer::<App>::new().render();
}
