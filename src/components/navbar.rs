//! Navbar Component

use leptos::prelude::*;

use crate::auth;
use crate::context::use_app_context;
use crate::route::Route;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_app_context();

    let logout = move |_| {
        auth::sign_out(&ctx.client());
        ctx.user.set(None);
        ctx.navigate(Route::Login);
    };

    view! {
        <nav class="navbar">
            <div class="navbar-brand">
                <span class="brand-icon">"🔒"</span>
                <span class="brand-title">"Secure File Server"</span>
            </div>
            <div class="navbar-user">
                <Show when=move || ctx.user.with(|u| u.is_some())>
                    <span class="avatar">{move || ctx.user.with(|u| u.as_ref().map(|u| u.initial()).unwrap_or_default())}</span>
                    <span class="username">{move || ctx.user.with(|u| u.as_ref().map(|u| u.username.clone()).unwrap_or_default())}</span>
                </Show>
                <button class="logout-btn" on:click=logout>"Logout"</button>
            </div>
        </nav>
    }
}
