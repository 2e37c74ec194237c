//! Folder Sidebar Component
//!
//! Folders of the current level with breadcrumbs back up the trail.
//! Entering a folder re-points the listing at it.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{DeleteConfirmButton, RenameDialog};
use crate::context::use_app_context;
use crate::error::Error;
use crate::files::{self, FileQuery, FolderRefresh, FolderTrail, RenameDraft};
use crate::models::{Folder, RecordId};
use crate::store::{store_set_files, store_update_trail, use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn FolderSidebar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();
    let (adding, set_adding) = signal(false);
    let (new_name, set_new_name) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let rename_draft = RwSignal::new(None::<RenameDraft>);
    let (rename_error, set_rename_error) = signal(None::<String>);

    let apply = move |result: Result<Vec<Folder>, Error>, fallback: &'static str| match result {
        Ok(folders) => {
            store.folders().set(folders);
            set_error.set(None);
        }
        Err(Error::Unauthorized { .. }) => {}
        Err(e) => {
            log::error!("[FolderSidebar] {}: {}", fallback, e);
            set_error.set(Some(e.user_message(fallback)));
        }
    };

    // Load folders of the current level
    Effect::new(move |_| {
        let trail = store.trail().get();
        let client = ctx.client();
        spawn_local(async move {
            apply(files::load_folders(&client, &trail).await, "Failed to load folders");
        });
    });

    let current_trail = move || -> FolderTrail { store.trail().get_untracked() };
    let current_query = move || -> FileQuery { store.query().get_untracked() };

    let apply_refresh = move |result: Result<FolderRefresh, Error>, fallback: &'static str| {
        apply(
            result.map(|refreshed| {
                store_set_files(&store, refreshed.files);
                refreshed.folders
            }),
            fallback,
        )
    };

    let create_folder = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get_untracked();
        let client = ctx.client();
        let trail = current_trail();
        let query = current_query();
        spawn_local(async move {
            let result = files::create_folder_and_reload(&client, &name, &trail, &query).await;
            if result.is_ok() {
                set_new_name.set(String::new());
                set_adding.set(false);
            }
            apply_refresh(result, "Failed to create folder");
        });
    };

    let delete_folder = move |id: RecordId| {
        let client = ctx.client();
        let trail = current_trail();
        let query = current_query();
        spawn_local(async move {
            apply_refresh(
                files::delete_folder_and_reload(&client, &id, &trail, &query).await,
                "Failed to delete folder",
            );
        });
    };

    let submit_rename = move |draft: RenameDraft| {
        let client = ctx.client();
        let trail = current_trail();
        let query = current_query();
        set_rename_error.set(None);
        spawn_local(async move {
            match files::rename_folder_and_reload(&client, &draft, &trail, &query).await {
                Ok(refreshed) => {
                    store.folders().set(refreshed.folders);
                    store_set_files(&store, refreshed.files);
                    rename_draft.set(None);
                }
                Err(Error::Unauthorized { .. }) => {}
                Err(e) => {
                    log::error!("[FolderSidebar] Rename failed: {}", e);
                    set_rename_error.set(Some(e.user_message("Failed to rename folder")));
                }
            }
        });
    };

    let at_top = move || store.trail().with(|t| t.current().is_none());

    view! {
        <aside class="folder-sidebar">
            <div class="sidebar-header">
                <h3>"Folders"</h3>
                <button
                    class="add-folder-btn"
                    title="New folder"
                    on:click=move |_| set_adding.update(|v| *v = !*v)
                >
                    "+"
                </button>
            </div>

            <Show when=move || error.with(|e| e.is_some())>
                <div class="alert alert-error small">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <Show when=move || adding.get()>
                <form class="new-folder-form" on:submit=create_folder>
                    <input
                        type="text"
                        class="form-input"
                        placeholder="Folder name"
                        autofocus=true
                        prop:value=new_name
                        on:input=move |ev| set_new_name.set(event_target_value(&ev))
                    />
                    <button type="submit" class="primary-btn small">"Create"</button>
                </form>
            </Show>

            <nav class="breadcrumbs">
                <a
                    href="#/dashboard"
                    class:active=at_top
                    on:click=move |ev| {
                        ev.prevent_default();
                        store_update_trail(&store, |t| t.reset());
                    }
                >
                    "All files"
                </a>
                {move || {
                    store.trail().with(|trail| {
                        trail
                            .crumbs()
                            .iter()
                            .enumerate()
                            .map(|(depth, folder)| {
                                view! {
                                    <span class="crumb-sep">"/"</span>
                                    <a
                                        href="#/dashboard"
                                        on:click=move |ev| {
                                            ev.prevent_default();
                                            store_update_trail(&store, |t| t.truncate_to(depth));
                                        }
                                    >
                                        {folder.name.clone()}
                                    </a>
                                }
                            })
                            .collect_view()
                    })
                }}
            </nav>

            <ul class="folder-list">
                <Show when=move || !at_top()>
                    <li
                        class="folder-item up"
                        on:click=move |_| {
                            store_update_trail(&store, |t| {
                                t.up();
                            })
                        }
                    >
                        <span class="folder-icon">"↩"</span>
                        <span class="folder-name">".."</span>
                    </li>
                </Show>
                <For
                    each=move || store.folders().get()
                    key=|folder| folder.id.clone()
                    children=move |folder| {
                        let entered = folder.clone();
                        let renamed = folder.clone();
                        let id = folder.id.clone();
                        view! {
                            <li
                                class="folder-item"
                                on:click=move |_| {
                                    log::debug!("[FolderSidebar] Entering {}", entered.name);
                                    let target = entered.clone();
                                    store_update_trail(&store, move |t| t.enter(target));
                                }
                            >
                                <span class="folder-icon">"📁"</span>
                                <span class="folder-name">{folder.name.clone()}</span>
                                <button
                                    class="rename-folder-btn"
                                    title="Rename"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        set_rename_error.set(None);
                                        rename_draft.set(Some(RenameDraft::for_folder(&renamed)));
                                    }
                                >
                                    "✎"
                                </button>
                                <DeleteConfirmButton
                                    button_class="delete-folder-btn"
                                    label="×"
                                    on_confirm=Callback::new(move |_| delete_folder(id.clone()))
                                />
                            </li>
                        }
                    }
                />
                <Show when=move || store.folders().with(|f| f.is_empty())>
                    <li class="folder-empty">"No folders here"</li>
                </Show>
            </ul>

            <RenameDialog
                title="Rename Folder"
                draft=rename_draft
                error=rename_error
                on_submit=Callback::new(submit_rename)
            />
        </aside>
    }
}
