//! Leptos FileDrop Utilities
//!
//! Drag-and-drop and file-picker helpers for Leptos.
//! Both paths end in a plain `Vec<web_sys::File>` handed to a callback.

use leptos::prelude::*;
use web_sys::{DragEvent, File, FileList};

/// Drop zone state signals
#[derive(Clone, Copy)]
pub struct DropSignals {
    /// Files are being dragged over the zone
    pub is_over_read: ReadSignal<bool>,
    pub is_over_write: WriteSignal<bool>,
}

pub fn create_drop_signals() -> DropSignals {
    let (is_over_read, is_over_write) = signal(false);
    DropSignals {
        is_over_read,
        is_over_write,
    }
}

/// Collect every file of a `FileList` in order
pub fn collect_files(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Files carried by a drop event (empty when the drag held no files)
pub fn files_from_drag(ev: &DragEvent) -> Vec<File> {
    ev.data_transfer()
        .and_then(|dt| dt.files())
        .map(|list| collect_files(&list))
        .unwrap_or_default()
}

/// Files chosen in an `<input type="file">` change event
pub fn files_from_input(ev: &web_sys::Event) -> Vec<File> {
    let input = event_target::<web_sys::HtmlInputElement>(ev);
    let files = input.files().map(|list| collect_files(&list)).unwrap_or_default();
    // Reset so picking the same file again still fires `change`
    input.set_value("");
    files
}

/// Create dragover handler; must prevent default for the drop to be allowed
pub fn make_on_dragover(zone: DropSignals) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        ev.prevent_default();
        if !zone.is_over_read.get_untracked() {
            zone.is_over_write.set(true);
        }
    }
}

/// Create dragleave handler
pub fn make_on_dragleave(zone: DropSignals) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| {
        zone.is_over_write.set(false);
    }
}

/// Create drop handler forwarding the dropped files
pub fn make_on_drop<F>(zone: DropSignals, on_files: F) -> impl Fn(DragEvent) + Clone + 'static
where
    F: Fn(Vec<File>) + Clone + 'static,
{
    move |ev: DragEvent| {
        ev.prevent_default();
        zone.is_over_write.set(false);

        let files = files_from_drag(&ev);
        if files.is_empty() {
            return;
        }
        on_files(files);
    }
}
