//! File Vault Frontend App
//!
//! Builds the API client, provides the app context and switches screens
//! on the hash route.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiClient, BrowserTransport};
use crate::components::{Dashboard, LoginPage, RegisterPage};
use crate::config::ApiConfig;
use crate::context::AppContext;
use crate::error::Error;
use crate::route::{self, Route};
use crate::session::open_session_store;

#[component]
pub fn App() -> impl IntoView {
    // State
    let route = RwSignal::new(Route::from_hash(&route::current_hash()));
    let user = RwSignal::new(None);
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    let client = ApiClient::new(ApiConfig::from_browser(), Rc::new(BrowserTransport), open_session_store())
        .with_unauthorized_handler(move || {
            user.set(None);
            route.set(Route::Login);
            route::set_hash(Route::Login);
        });
    let has_session = client.has_session();
    user.set(client.cached_user());

    // Provide context to all children
    let ctx = AppContext::new(StoredValue::new_local(client), (reload_trigger, set_reload_trigger), route, user);
    provide_context(ctx);

    // Guard the entry route, then follow back/forward
    ctx.navigate(route.get_untracked());
    let _ = window_event_listener(leptos::ev::hashchange, move |_| {
        ctx.navigate(Route::from_hash(&route::current_hash()));
    });

    // Refresh the cached profile
    if has_session {
        spawn_local(async move {
            match ctx.client().me().await {
                Ok(profile) => user.set(Some(profile)),
                Err(Error::Unauthorized { .. }) => log::info!("[APP] Stored session was rejected"),
                Err(e) => log::warn!("[APP] Could not refresh profile: {}", e),
            }
        });
    }

    // Only re-render when the screen actually changes
    let screen = Memo::new(move |_| route.get());

    view! {
        <div class="app">
            {move || match screen.get() {
                Route::Login => view! { <LoginPage /> }.into_any(),
                Route::Register => view! { <RegisterPage /> }.into_any(),
                Route::Dashboard => view! { <Dashboard /> }.into_any(),
            }}
        </div>
    }
}
