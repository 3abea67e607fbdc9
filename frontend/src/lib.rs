use wasm_bindgen::prelude::wasm_bindgen;

pub mod api;
mod components;
pub mod config;
mod pages;
pub mod router;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", err).into());
    }
    log::info!("Starting AgriView frontend");

    // window.__AGRIVIEW_ENV (env.js) takes precedence over ./config.json.
    leptos::spawn_local(config::init());

    router::mount_app();
}
