//! File Vault Frontend Entry Point

mod api;
mod auth;
mod config;
mod context;
mod download;
mod error;
mod files;
mod format;
mod models;
mod route;
mod session;
mod store;
mod upload;
mod components;
mod app;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(e) = rolling_logger::init(level) {
        web_sys::console::error_1(&format!("logger init failed: {}", e).into());
    }

    mount_to_body(App);
}
