//! Rename Dialog Component
//!
//! Modal pre-filled with the current name. Closing it (backdrop, Cancel)
//! drops the draft; submitting hands the draft to `on_submit`.

use leptos::prelude::*;

use crate::files::RenameDraft;

#[component]
pub fn RenameDialog(
    #[prop(into)] title: String,
    draft: RwSignal<Option<RenameDraft>>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] on_submit: Callback<RenameDraft>,
) -> impl IntoView {
    let close = move || draft.set(None);

    view! {
        <Show when=move || draft.with(|d| d.is_some())>
            <div class="modal-backdrop" on:click=move |_| close()>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <h3>{title.clone()}</h3>
                    <Show when=move || error.with(|e| e.is_some())>
                        <div class="alert alert-error">{move || error.get().unwrap_or_default()}</div>
                    </Show>
                    <form on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        if let Some(current) = draft.get_untracked() {
                            on_submit.run(current);
                        }
                    }>
                        <label class="form-label">
                            "New name"
                            <input
                                type="text"
                                class="form-input"
                                autofocus=true
                                prop:value=move || draft.with(|d| d.as_ref().map(|d| d.name.clone()).unwrap_or_default())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    draft.update(|d| {
                                        if let Some(d) = d {
                                            d.name = value;
                                        }
                                    });
                                }
                            />
                        </label>
                        <div class="modal-actions">
                            <button type="button" class="secondary-btn" on:click=move |_| close()>"Cancel"</button>
                            <button type="submit" class="primary-btn">"Rename"</button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
