//! Register Page Component
//!
//! Sign-up form with a password strength meter. A successful registration
//! signs the user in directly.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{self, password_strength, RegisterForm, Strength};
use crate::context::use_app_context;
use crate::route::Route;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_app_context();
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (loading, set_loading) = signal(false);

    let score = Memo::new(move |_| password.with(|p| password_strength(p)));
    let strength = move || Strength::from_score(score.get());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let form = RegisterForm {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        set_error.set(None);
        set_loading.set(true);
        spawn_local(async move {
            match auth::sign_up(&ctx.client(), &form).await {
                Ok(user) => {
                    ctx.user.set(Some(user));
                    ctx.navigate(Route::Dashboard);
                }
                Err(e) => {
                    if !e.is_validation() {
                        log::warn!("[RegisterPage] Registration failed: {}", e);
                    }
                    set_error.set(Some(e.user_message("Registration failed")));
                    set_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-header">
                    <span class="auth-icon">"🗂"</span>
                    <h1>"Create Account"</h1>
                    <p class="auth-subtitle">"Start storing your files securely"</p>
                </div>

                <Show when=move || error.with(|e| e.is_some())>
                    <div class="alert alert-error">{move || error.get().unwrap_or_default()}</div>
                </Show>

                <form class="auth-form" on:submit=on_submit>
                    <label class="form-label" for="register-username">"Username"</label>
                    <input
                        id="register-username"
                        type="text"
                        class="form-input"
                        autocomplete="username"
                        prop:value=username
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />

                    <label class="form-label" for="register-email">"Email"</label>
                    <input
                        id="register-email"
                        type="email"
                        class="form-input"
                        autocomplete="email"
                        prop:value=email
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />

                    <label class="form-label" for="register-password">"Password"</label>
                    <input
                        id="register-password"
                        type="password"
                        class="form-input"
                        autocomplete="new-password"
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <Show when=move || password.with(|p| !p.is_empty())>
                        <div class="strength-meter">
                            <div
                                class=move || format!("strength-bar {}", strength().css_class())
                                style:width=move || format!("{}%", score.get())
                            ></div>
                        </div>
                        <span class=move || format!("strength-label {}", strength().css_class())>
                            {move || strength().label()}
                        </span>
                    </Show>

                    <label class="form-label" for="register-confirm">"Confirm Password"</label>
                    <input
                        id="register-confirm"
                        type="password"
                        class="form-input"
                        autocomplete="new-password"
                        prop:value=confirm_password
                        on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                    />

                    <button type="submit" class="primary-btn full-width" disabled=loading>
                        {move || if loading.get() { "Creating account..." } else { "Sign Up" }}
                    </button>
                </form>

                <p class="auth-switch">
                    "Already have an account? "
                    <a href="#/login" on:click=move |ev| {
                        ev.prevent_default();
                        ctx.navigate(Route::Login);
                    }>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
