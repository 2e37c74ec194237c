//! Login Page Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{self, LoginForm};
use crate::context::use_app_context;
use crate::route::Route;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        set_error.set(None);
        set_loading.set(true);
        spawn_local(async move {
            match auth::sign_in(&ctx.client(), &form).await {
                Ok(user) => {
                    ctx.user.set(Some(user));
                    ctx.navigate(Route::Dashboard);
                }
                Err(e) => {
                    if !e.is_validation() {
                        log::warn!("[LoginPage] Login failed: {}", e);
                    }
                    set_error.set(Some(e.user_message("Login failed")));
                    set_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-header">
                    <span class="auth-icon">"🔒"</span>
                    <h1>"Welcome Back"</h1>
                    <p class="auth-subtitle">"Sign in to access your files"</p>
                </div>

                <Show when=move || error.with(|e| e.is_some())>
                    <div class="alert alert-error">{move || error.get().unwrap_or_default()}</div>
                </Show>

                <form class="auth-form" on:submit=on_submit>
                    <label class="form-label" for="login-email">"Email"</label>
                    <input
                        id="login-email"
                        type="email"
                        class="form-input"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=email
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />

                    <label class="form-label" for="login-password">"Password"</label>
                    <div class="password-field">
                        <input
                            id="login-password"
                            type=move || if show_password.get() { "text" } else { "password" }
                            class="form-input"
                            placeholder="Your password"
                            autocomplete="current-password"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        <button
                            type="button"
                            class="toggle-visibility"
                            title="Show password"
                            on:click=move |_| set_show_password.update(|v| *v = !*v)
                        >
                            {move || if show_password.get() { "🙈" } else { "👁" }}
                        </button>
                    </div>

                    <button type="submit" class="primary-btn full-width" disabled=loading>
                        {move || if loading.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>

                <p class="auth-switch">
                    "Don't have an account? "
                    <a href="#/register" on:click=move |ev| {
                        ev.prevent_default();
                        ctx.navigate(Route::Register);
                    }>"Sign up"</a>
                </p>
            </div>
        </div>
    }
}
