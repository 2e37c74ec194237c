//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::models::User;
use crate::route::{self, Route};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// API client (holds `Rc`s, so it stays on this thread)
    client: StoredValue<ApiClient, LocalStorage>,
    /// Trigger to reload the listing - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload the listing - write
    set_reload_trigger: WriteSignal<u32>,
    /// Screen currently shown
    pub route: RwSignal<Route>,
    /// Signed-in user, `None` on the auth screens
    pub user: RwSignal<Option<User>>,
}

impl AppContext {
    pub fn new(
        client: StoredValue<ApiClient, LocalStorage>,
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        route: RwSignal<Route>,
        user: RwSignal<Option<User>>,
    ) -> Self {
        Self {
            client,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            route,
            user,
        }
    }

    pub fn client(&self) -> ApiClient {
        self.client.get_value()
    }

    /// Trigger a reload of the file listing
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Go to `target`, subject to the session guard
    pub fn navigate(&self, target: Route) {
        let resolved = target.resolve(self.client.with_value(|c| c.has_session()));
        self.route.set(resolved);
        route::set_hash(resolved);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
