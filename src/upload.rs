//! Upload Flow
//!
//! Selection and status for the upload panel. The batch goes out as one
//! multipart request; the listing refreshes only after it succeeds.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::api::{ApiClient, ProgressFn};
use crate::error::{Error, ValidationError};
use crate::format::format_file_size;

/// A local file picked or dropped by the user
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    handle: Option<web_sys::File>,
}

impl SelectedFile {
    pub fn from_web(file: web_sys::File) -> Self {
        Self {
            name: file.name(),
            size: file.size() as u64,
            handle: Some(file),
        }
    }

    /// Metadata only, nothing to send
    #[cfg(test)]
    pub fn detached(name: &str, size: u64) -> Self {
        Self { name: name.to_string(), size, handle: None }
    }

    pub fn handle(&self) -> Option<&web_sys::File> {
        self.handle.as_ref()
    }

    /// `name (size)` chip label
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, format_file_size(self.size))
    }
}

/// Upload panel state
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub selected: Vec<SelectedFile>,
    pub uploading: bool,
    pub progress: u8,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl UploadForm {
    /// A new drop or pick replaces the selection
    pub fn select(&mut self, files: Vec<SelectedFile>) {
        self.selected = files;
        self.error = None;
        self.success = None;
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.selected.len() {
            self.selected.remove(index);
        }
    }

    /// Start a submission. Returns the batch to send, or `None` when there is
    /// nothing to do (empty selection, or a batch already in flight).
    pub fn begin(&mut self) -> Option<Vec<SelectedFile>> {
        if self.uploading {
            return None;
        }
        if self.selected.is_empty() {
            self.error = Some(ValidationError::NoFilesSelected.to_string());
            self.success = None;
            return None;
        }
        self.uploading = true;
        self.progress = 0;
        self.error = None;
        self.success = None;
        Some(self.selected.clone())
    }

    pub fn set_progress(&mut self, percent: u8) {
        if self.uploading {
            self.progress = percent.min(100);
        }
    }

    /// Settle a submission. Returns true when the listing must be refreshed.
    /// Failures keep the selection so the user can retry.
    pub fn finish(&mut self, result: Result<(), Error>) -> bool {
        self.uploading = false;
        match result {
            Ok(()) => {
                self.success = Some(format!("Successfully uploaded {} file(s)", self.selected.len()));
                self.selected.clear();
                self.progress = 0;
                true
            }
            Err(e) => {
                self.error = Some(e.user_message("Failed to upload files"));
                false
            }
        }
    }
}

/// Somewhere an `UploadForm` lives: a signal in the panel, a plain cell in tests.
/// `None` means the form is gone (the panel was unmounted).
pub trait FormCell: Clone + 'static {
    fn update_form<R>(&self, f: impl FnOnce(&mut UploadForm) -> R) -> Option<R>;
}

impl FormCell for RwSignal<UploadForm, LocalStorage> {
    fn update_form<R>(&self, f: impl FnOnce(&mut UploadForm) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl FormCell for Rc<RefCell<UploadForm>> {
    fn update_form<R>(&self, f: impl FnOnce(&mut UploadForm) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Send the current selection and settle the form. `on_uploaded` runs once,
/// and only when the batch was accepted.
pub async fn submit_upload<C: FormCell>(client: &ApiClient, form: C, on_uploaded: impl FnOnce()) {
    let Some(batch) = form.update_form(|f| f.begin()).flatten() else {
        return;
    };
    log::info!("[Upload] Uploading {} file(s)", batch.len());

    let progress = form.clone();
    let report: ProgressFn = Rc::new(move |percent| {
        progress.update_form(|f| f.set_progress(percent));
    });
    let result = client.upload(batch, report).await;
    if let Err(e) = &result {
        log::error!("[Upload] Upload failed: {}", e);
    }
    if form.update_form(|f| f.finish(result)).unwrap_or(false) {
        on_uploaded();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{test_client, FakeTransport};
    use serde_json::json;
    use std::cell::Cell;

    fn new_form() -> Rc<RefCell<UploadForm>> {
        Rc::new(RefCell::new(UploadForm::default()))
    }

    async fn submit(form: &Rc<RefCell<UploadForm>>, client: &crate::api::ApiClient, refreshes: &Cell<u32>) {
        submit_upload(client, form.clone(), || refreshes.set(refreshes.get() + 1)).await;
    }

    #[tokio::test]
    async fn test_empty_submission_makes_no_request() {
        let fake = Rc::new(FakeTransport::new());
        let (client, _session) = test_client(&fake);
        let form = new_form();
        let refreshes = Cell::new(0);

        submit(&form, &client, &refreshes).await;

        assert_eq!(fake.call_count(), 0);
        assert_eq!(refreshes.get(), 0);
        assert_eq!(form.borrow().error.as_deref(), Some("Please select files to upload"));
        assert!(!form.borrow().uploading);
    }

    #[tokio::test]
    async fn test_success_clears_selection_and_refreshes_once() {
        let fake = Rc::new(FakeTransport::new());
        fake.respond(201, json!({"message": "Files uploaded"}));
        let (client, _session) = test_client(&fake);
        let form = new_form();
        form.borrow_mut().select(vec![
            SelectedFile::detached("a.txt", 10),
            SelectedFile::detached("b.png", 2048),
        ]);
        let refreshes = Cell::new(0);

        submit(&form, &client, &refreshes).await;

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "http://api.test/files/upload");
        assert_eq!(calls[0].file_names, vec!["a.txt", "b.png"]);
        assert_eq!(refreshes.get(), 1);
        let form = form.borrow();
        assert!(form.selected.is_empty());
        assert_eq!(form.success.as_deref(), Some("Successfully uploaded 2 file(s)"));
        assert_eq!(form.error, None);
    }

    #[tokio::test]
    async fn test_failure_keeps_selection_for_retry() {
        let fake = Rc::new(FakeTransport::new());
        fake.respond(413, json!({"error": "File too large"}));
        let (client, _session) = test_client(&fake);
        let form = new_form();
        form.borrow_mut().select(vec![SelectedFile::detached("big.iso", 1 << 32)]);
        let refreshes = Cell::new(0);

        submit(&form, &client, &refreshes).await;

        assert_eq!(refreshes.get(), 0);
        let form = form.borrow();
        assert_eq!(form.selected.len(), 1);
        assert_eq!(form.error.as_deref(), Some("File too large"));
        assert_eq!(form.progress, 100);
        assert!(!form.uploading);
    }

    #[test]
    fn test_generic_message_without_server_text() {
        let mut form = UploadForm::default();
        form.select(vec![SelectedFile::detached("a.txt", 1)]);
        form.begin();
        let refresh = form.finish(Err(Error::Network("offline".into())));
        assert!(!refresh);
        assert_eq!(form.error.as_deref(), Some("Failed to upload files"));
    }

    #[test]
    fn test_begin_ignored_while_uploading() {
        let mut form = UploadForm::default();
        form.select(vec![SelectedFile::detached("a.txt", 1)]);
        assert!(form.begin().is_some());
        assert!(form.begin().is_none());
    }

    #[test]
    fn test_new_selection_replaces_and_clears_messages() {
        let mut form = UploadForm::default();
        form.error = Some("Please select files to upload".into());
        form.select(vec![SelectedFile::detached("a.txt", 1), SelectedFile::detached("b.txt", 1536)]);
        assert_eq!(form.error, None);
        form.remove(0);
        form.remove(5);
        assert_eq!(form.selected.len(), 1);
        assert_eq!(form.selected[0].label(), "b.txt (1.5 KB)");
    }
}
