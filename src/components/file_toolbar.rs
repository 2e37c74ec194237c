//! File Toolbar Component
//!
//! Search box and sort controls. Both write into the store's query, which
//! the listing watches.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::files::SortBy;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

/// Quiet time after the last keystroke before a search goes out
const SEARCH_DEBOUNCE_MS: u32 = 300;

#[component]
pub fn FileToolbar() -> impl IntoView {
    let store = use_dashboard_store();
    let (search_text, set_search_text) = signal(store.query().with_untracked(|q| q.search.clone()));
    let keystrokes = StoredValue::new(0u32);

    let on_search = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        set_search_text.set(text.clone());
        keystrokes.update_value(|n| *n = n.wrapping_add(1));
        let mine = keystrokes.get_value();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            // Superseded by a later keystroke, or the toolbar is gone
            if keystrokes.try_get_value() != Some(mine) {
                return;
            }
            log::debug!("[FileToolbar] Search: {:?}", text);
            store.query().write().search = text;
        });
    };

    let clear_search = move |_| {
        keystrokes.update_value(|n| *n = n.wrapping_add(1));
        set_search_text.set(String::new());
        store.query().write().search.clear();
    };

    let on_sort = move |ev: web_sys::Event| {
        if let Some(sort_by) = SortBy::from_param(&event_target_value(&ev)) {
            store.query().write().sort_by = sort_by;
        }
    };

    let toggle_order = move |_| {
        store.query().update(|q| q.sort_order = q.sort_order.toggled());
    };

    let searching = move || store.query().with(|q| q.search_text().is_some());

    view! {
        <div class="file-toolbar">
            <div class="search-box">
                <span class="search-icon">"🔍"</span>
                <input
                    type="search"
                    class="form-input"
                    placeholder="Search files..."
                    prop:value=search_text
                    on:input=on_search
                />
                <Show when=move || search_text.with(|t| !t.is_empty())>
                    <button class="clear-search" title="Clear search" on:click=clear_search>"×"</button>
                </Show>
            </div>
            <div class="sort-controls" class:disabled=searching>
                <label class="sort-label">"Sort by"</label>
                <select class="sort-select" disabled=searching on:change=on_sort>
                    {SortBy::ALL
                        .into_iter()
                        .map(|sort_by| {
                            view! {
                                <option
                                    value=sort_by.as_param()
                                    selected=move || store.query().with(|q| q.sort_by == sort_by)
                                >
                                    {sort_by.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <button class="sort-order-btn" disabled=searching on:click=toggle_order>
                    {move || store.query().with(|q| q.sort_order.as_param().to_uppercase())}
                </button>
            </div>
        </div>
    }
}
