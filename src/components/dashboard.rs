//! Dashboard Component
//!
//! Signed-in screen: upload panel on top, folders and listing below.
//! Owns the dashboard store for its lifetime.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{FileList, FileToolbar, FileUpload, FolderSidebar, Navbar};
use crate::context::use_app_context;
use crate::store::{DashboardState, DashboardStore};

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_app_context();
    let store: DashboardStore = Store::new(DashboardState::default());
    provide_context(store);

    let greeting = move || {
        ctx.user.with(|u| match u {
            Some(user) => format!("Welcome, {}!", user.username),
            None => "Welcome!".to_string(),
        })
    };

    view! {
        <div class="dashboard">
            <Navbar />
            <main class="dashboard-content">
                <section class="welcome-banner">
                    <h1>{greeting}</h1>
                    <p>"Manage your files securely in the cloud"</p>
                </section>

                <section class="panel">
                    <h2 class="panel-title">"Upload Files"</h2>
                    <FileUpload />
                </section>

                <section class="panel">
                    <h2 class="panel-title">"My Files"</h2>
                    <div class="files-layout">
                        <FolderSidebar />
                        <div class="files-main">
                            <FileToolbar />
                            <FileList />
                        </div>
                    </div>
                </section>
            </main>
        </div>
    }
}
