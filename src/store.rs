//! Dashboard State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::files::{FileQuery, FolderTrail};
use crate::models::{FileRecord, Folder};

/// Dashboard state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct DashboardState {
    /// Files as last fetched for `query`
    pub files: Vec<FileRecord>,
    /// Folders at the current trail level
    pub folders: Vec<Folder>,
    /// Folder filter, sort and search for the listing
    pub query: FileQuery,
    /// Entered folders, current last
    pub trail: FolderTrail,
    /// A listing fetch is in flight
    pub loading: bool,
    /// Last listing error, cleared by the next successful fetch
    pub error: Option<String>,
}

/// Type alias for the store
pub type DashboardStore = Store<DashboardState>;

/// Get the dashboard store from context
pub fn use_dashboard_store() -> DashboardStore {
    expect_context::<DashboardStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the listing wholesale after a fetch
pub fn store_set_files(store: &DashboardStore, files: Vec<FileRecord>) {
    store.files().set(files);
    store.error().set(None);
}

/// Move the trail and point the listing at the new current folder
pub fn store_update_trail(store: &DashboardStore, f: impl FnOnce(&mut FolderTrail)) {
    let mut trail = store.trail().get_untracked();
    f(&mut trail);
    let folder_id = trail.current_id();
    store.trail().set(trail);
    store.query().write().folder_id = folder_id;
}
