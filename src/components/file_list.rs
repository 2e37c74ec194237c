//! File List Component
//!
//! Table of the current listing with per-row download, rename, move and
//! delete. Refetches whenever the query changes or a reload is triggered.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{DeleteConfirmButton, RenameDialog};
use crate::context::use_app_context;
use crate::download::save_bytes;
use crate::error::Error;
use crate::files::{self, FileQuery, RenameDraft};
use crate::format::{format_date, format_file_size};
use crate::models::{FileRecord, RecordId};
use crate::store::{store_set_files, use_dashboard_store, DashboardStateStoreFields};

/// Select value for "move to the top level"
const ROOT_TARGET: &str = "__root__";

#[component]
pub fn FileList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_dashboard_store();
    let rename_draft = RwSignal::new(None::<RenameDraft>);
    let (rename_error, set_rename_error) = signal(None::<String>);

    // 401s are handled by the client (session cleared, back to login)
    let report = move |e: Error, fallback: &'static str| {
        if matches!(e, Error::Unauthorized { .. }) {
            return;
        }
        log::error!("[FileList] {}: {}", fallback, e);
        store.error().set(Some(e.user_message(fallback)));
    };

    let apply = move |result: Result<Vec<FileRecord>, Error>, fallback: &'static str| match result {
        Ok(list) => store_set_files(&store, list),
        Err(e) => report(e, fallback),
    };

    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        let query = store.query().get();
        log::debug!("[FileList] Loading files (trigger={})", trigger);
        store.loading().set(true);
        let client = ctx.client();
        spawn_local(async move {
            apply(files::load_files(&client, &query).await, "Failed to load files");
            store.loading().set(false);
        });
    });

    let current_query = move || -> FileQuery { store.query().get_untracked() };

    let download = move |file: FileRecord| {
        let client = ctx.client();
        spawn_local(async move {
            match client.download(&file.id).await {
                Ok(bytes) => {
                    if let Err(e) = save_bytes(&file.original_name, &bytes) {
                        log::error!("[FileList] Could not save {}: {:?}", file.original_name, e);
                        store.error().set(Some("Failed to download file".to_string()));
                    }
                }
                Err(e) => report(e, "Failed to download file"),
            }
        });
    };

    let delete = move |id: RecordId| {
        let client = ctx.client();
        let query = current_query();
        spawn_local(async move {
            apply(files::delete_and_reload(&client, &id, &query).await, "Failed to delete file");
        });
    };

    let move_to = move |id: RecordId, target: Option<RecordId>| {
        let client = ctx.client();
        let query = current_query();
        spawn_local(async move {
            apply(
                files::move_and_reload(&client, &id, target.as_ref(), &query).await,
                "Failed to move file",
            );
        });
    };

    let submit_rename = move |draft: RenameDraft| {
        let client = ctx.client();
        let query = current_query();
        set_rename_error.set(None);
        spawn_local(async move {
            match files::rename_and_reload(&client, &draft, &query).await {
                Ok(list) => {
                    store_set_files(&store, list);
                    rename_draft.set(None);
                }
                Err(Error::Unauthorized { .. }) => {}
                Err(e) => {
                    log::error!("[FileList] Rename failed: {}", e);
                    set_rename_error.set(Some(e.user_message("Failed to rename file")));
                }
            }
        });
    };

    let open_rename = move |file: &FileRecord| {
        set_rename_error.set(None);
        rename_draft.set(Some(RenameDraft::for_file(file)));
    };

    view! {
        <div class="file-list">
            <Show when=move || store.error().with(|e| e.is_some())>
                <div class="alert alert-error">
                    {move || store.error().get().unwrap_or_default()}
                    <button class="alert-close" on:click=move |_| store.error().set(None)>"×"</button>
                </div>
            </Show>

            <Show
                when=move || !store.files().with(|f| f.is_empty())
                fallback=move || {
                    view! {
                        <div class="empty-state">
                            {move || {
                                if store.loading().get() {
                                    "Loading files..."
                                } else if store.query().with(|q| q.search_text().is_some()) {
                                    "No files match your search"
                                } else {
                                    "No files uploaded yet"
                                }
                            }}
                        </div>
                    }
                }
            >
                <table class="file-table" class:loading=move || store.loading().get()>
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Size"</th>
                            <th>"Type"</th>
                            <th>"Uploaded"</th>
                            <th class="actions-col">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || store.files().get()
                            key=|file| file.id.clone()
                            children=move |file| {
                                let id = file.id.clone();
                                let delete_id = file.id.clone();
                                let download_file = file.clone();
                                let rename_file = file.clone();
                                let from = file.folder_id.clone();
                                view! {
                                    <tr>
                                        <td class="file-name" title=file.original_name.clone()>
                                            <span class="file-icon">"📄"</span>
                                            {file.original_name.clone()}
                                        </td>
                                        <td>{format_file_size(file.size)}</td>
                                        <td><span class="type-badge">{file.mimetype_label().to_string()}</span></td>
                                        <td>{format_date(&file.upload_date)}</td>
                                        <td class="actions">
                                            <button
                                                class="action-btn"
                                                title="Download"
                                                on:click=move |_| download(download_file.clone())
                                            >
                                                "Download"
                                            </button>
                                            <button
                                                class="action-btn"
                                                title="Rename"
                                                on:click=move |_| open_rename(&rename_file)
                                            >
                                                "Rename"
                                            </button>
                                            <select
                                                class="move-select"
                                                title="Move to folder"
                                                on:change=move |ev| {
                                                    let select = event_target::<web_sys::HtmlSelectElement>(&ev);
                                                    let value = select.value();
                                                    // Back to the placeholder so the same target can be picked again
                                                    select.set_value("");
                                                    match value.as_str() {
                                                        "" => {}
                                                        ROOT_TARGET => move_to(id.clone(), None),
                                                        folder => move_to(id.clone(), Some(RecordId::new(folder))),
                                                    }
                                                }
                                            >
                                                <option value="" selected=true>"Move to..."</option>
                                                {move || {
                                                    store.trail().with(|trail| {
                                                        store.folders().with(|children| {
                                                            files::move_targets(trail, children, from.as_ref())
                                                        })
                                                    })
                                                        .into_iter()
                                                        .map(|target| {
                                                            let value = target
                                                                .id
                                                                .map(|id| id.as_str().to_string())
                                                                .unwrap_or_else(|| ROOT_TARGET.to_string());
                                                            view! { <option value=value>{target.label}</option> }
                                                        })
                                                        .collect_view()
                                                }}
                                            </select>
                                            <DeleteConfirmButton
                                                button_class="action-btn danger"
                                                on_confirm=Callback::new(move |_| delete(delete_id.clone()))
                                            />
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <RenameDialog
                title="Rename File"
                draft=rename_draft
                error=rename_error
                on_submit=Callback::new(submit_rename)
            />
        </div>
    }
}
