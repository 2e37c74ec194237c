//! File Upload Component
//!
//! Drop zone plus hidden file input feeding one multipart batch.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_filedrop::{create_drop_signals, files_from_input, make_on_dragleave, make_on_dragover, make_on_drop};

use crate::context::use_app_context;
use crate::upload::{submit_upload, SelectedFile, UploadForm};

#[component]
pub fn FileUpload() -> impl IntoView {
    let ctx = use_app_context();
    // Holds `web_sys::File` handles, so it stays on this thread
    let form = RwSignal::new_local(UploadForm::default());
    let zone = create_drop_signals();
    let input_ref = NodeRef::<html::Input>::new();

    let accept = move |files: Vec<web_sys::File>| {
        if files.is_empty() {
            return;
        }
        log::debug!("[FileUpload] {} file(s) selected", files.len());
        form.update(|f| f.select(files.into_iter().map(SelectedFile::from_web).collect()));
    };

    let on_drop = make_on_drop(zone, accept);
    let on_change = move |ev: web_sys::Event| accept(files_from_input(&ev));
    let open_picker = move |_| {
        if form.with_untracked(|f| f.uploading) {
            return;
        }
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_upload = move |_| {
        if form.with_untracked(|f| f.uploading) {
            return;
        }
        let client = ctx.client();
        spawn_local(async move {
            submit_upload(&client, form, move || ctx.reload()).await;
        });
    };

    let uploading = move || form.with(|f| f.uploading);
    let progress_label = move || format!("{}%", form.with(|f| f.progress));

    view! {
        <div class="file-upload">
            <Show when=move || form.with(|f| f.error.is_some())>
                <div class="alert alert-error">{move || form.with(|f| f.error.clone().unwrap_or_default())}</div>
            </Show>
            <Show when=move || form.with(|f| f.success.is_some())>
                <div class="alert alert-success">{move || form.with(|f| f.success.clone().unwrap_or_default())}</div>
            </Show>

            <div
                class="drop-area"
                class:drag-active=move || zone.is_over_read.get()
                class:disabled=uploading
                on:dragover=make_on_dragover(zone)
                on:dragleave=make_on_dragleave(zone)
                on:drop=on_drop
                on:click=open_picker
            >
                <input
                    type="file"
                    multiple=true
                    class="hidden-input"
                    node_ref=input_ref
                    on:change=on_change
                    on:click=|ev| ev.stop_propagation()
                />
                <div class="drop-icon">"☁"</div>
                <h3>
                    {move || if zone.is_over_read.get() { "Drop files here" } else { "Drag & drop files here" }}
                </h3>
                <p class="hint">"or click to select files"</p>
            </div>

            <Show when=move || form.with(|f| !f.selected.is_empty())>
                <div class="selected-files">
                    <h4>{move || format!("Selected Files ({})", form.with(|f| f.selected.len()))}</h4>
                    <div class="chips">
                        {move || {
                            form.with(|f| {
                                f.selected
                                    .iter()
                                    .enumerate()
                                    .map(|(index, file)| {
                                        view! {
                                            <span class="chip">
                                                <span class="chip-label">{file.label()}</span>
                                                <button
                                                    class="chip-remove"
                                                    title="Remove"
                                                    disabled=uploading
                                                    on:click=move |_| form.update(|f| f.remove(index))
                                                >
                                                    "×"
                                                </button>
                                            </span>
                                        }
                                    })
                                    .collect_view()
                            })
                        }}
                    </div>
                </div>
            </Show>

            <div class="upload-actions">
                <button class="primary-btn" disabled=uploading on:click=on_upload>
                    {move || if uploading() { "Uploading..." } else { "Upload Files" }}
                </button>
                <Show when=uploading>
                    <div class="progress">
                        <div class="progress-bar" style:width=progress_label></div>
                    </div>
                    <span class="progress-label">{progress_label}</span>
                </Show>
            </div>
        </div>
    }
}
