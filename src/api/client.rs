//! API Client
//!
//! Endpoint bindings for the vault REST API. Every request picks up the
//! stored bearer token; any 401 drops the session and sends the user to the
//! login screen.

use std::cell::Cell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{build_url, encode, ApiRequest, ProgressFn, RawResponse, Transport};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::models::{AuthResponse, ErrorBody, FileRecord, Folder, MeResponse, RecordId, User};
use crate::session::{Session, SessionStore};
use crate::upload::SelectedFile;

// ========================
// Request Bodies
// ========================

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RenameBody<'a> {
    #[serde(rename = "newName")]
    new_name: &'a str,
}

#[derive(Serialize)]
struct MoveBody<'a> {
    #[serde(rename = "folderId")]
    folder_id: Option<&'a RecordId>,
}

#[derive(Serialize)]
struct CreateFolderBody<'a> {
    name: &'a str,
    #[serde(rename = "parentId")]
    parent_id: Option<&'a RecordId>,
}

/// List endpoints answer with a bare array or a wrapping object
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Files { files: Vec<T> },
    Folders { folders: Vec<T> },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(v) | Listing::Files { files: v } | Listing::Folders { folders: v } => v,
        }
    }
}

// ========================
// Client
// ========================

#[derive(Clone)]
pub struct ApiClient {
    config: Rc<ApiConfig>,
    transport: Rc<dyn Transport>,
    session: Rc<dyn SessionStore>,
    on_unauthorized: Rc<dyn Fn()>,
    /// Set once a 401 has redirected; cleared when a new session starts
    signed_out: Rc<Cell<bool>>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, transport: Rc<dyn Transport>, session: Rc<dyn SessionStore>) -> Self {
        Self {
            config: Rc::new(config),
            transport,
            session,
            on_unauthorized: Rc::new(|| {}),
            signed_out: Rc::new(Cell::new(false)),
        }
    }

    /// Hook run when a 401 ends the session
    pub fn with_unauthorized_handler(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Rc::new(handler);
        self
    }

    pub fn has_session(&self) -> bool {
        self.session.token().is_some()
    }

    pub fn cached_user(&self) -> Option<User> {
        self.session.user()
    }

    pub fn start_session(&self, session: Session) {
        self.session.save(&session);
        self.signed_out.set(false);
    }

    /// Explicit logout; the caller handles navigation
    pub fn end_session(&self) {
        self.session.clear();
        self.signed_out.set(true);
    }

    fn expire_session(&self) {
        self.session.clear();
        if !self.signed_out.replace(true) {
            log::warn!("[Api] Session rejected by server, returning to login");
            (self.on_unauthorized)();
        }
    }

    /// Send with auth attached and map non-2xx statuses to errors
    pub async fn execute(&self, mut request: ApiRequest) -> Result<RawResponse> {
        request.bearer = self.session.token();
        let method = request.method;
        let url = build_url(&self.config.base_url, &request.path, &request.query);

        let response = self.transport.send(&url, request).await.map_err(|e| {
            log::error!("[Api] {} {} failed: {}", method.as_str(), url, e);
            e
        })?;
        if response.is_success() {
            return Ok(response);
        }

        let message = serde_json::from_slice::<ErrorBody>(&response.body)
            .ok()
            .and_then(ErrorBody::into_message);
        log::warn!("[Api] {} {} -> {} {:?}", method.as_str(), url, response.status, message);

        if response.status == 401 {
            self.expire_session();
            return Err(Error::Unauthorized { message });
        }
        Err(Error::Status { status: response.status, message })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.execute(request).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    async fn fetch_unit(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }

    // ========================
    // Auth
    // ========================

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let request = ApiRequest::post("/auth/register").json(&RegisterBody { username, email, password })?;
        self.fetch_json(request).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = ApiRequest::post("/auth/login").json(&LoginBody { email, password })?;
        self.fetch_json(request).await
    }

    pub async fn me(&self) -> Result<User> {
        let me: MeResponse = self.fetch_json(ApiRequest::get("/auth/me")).await?;
        Ok(me.into_user())
    }

    // ========================
    // Files
    // ========================

    pub async fn upload(&self, files: Vec<SelectedFile>, on_progress: ProgressFn) -> Result<()> {
        let request = ApiRequest::post("/files/upload").files(files).on_progress(on_progress);
        self.fetch_unit(request).await
    }

    pub async fn list_files(
        &self,
        folder_id: Option<&RecordId>,
        sort_by: &str,
        sort_order: &str,
    ) -> Result<Vec<FileRecord>> {
        let request = ApiRequest::get("/files")
            .query("folderId", folder_id)
            .query("sortBy", Some(sort_by))
            .query("sortOrder", Some(sort_order));
        let listing: Listing<FileRecord> = self.fetch_json(request).await?;
        Ok(listing.into_vec())
    }

    pub async fn search_files(&self, query: &str) -> Result<Vec<FileRecord>> {
        let request = ApiRequest::get("/files/search").query("q", Some(query));
        let listing: Listing<FileRecord> = self.fetch_json(request).await?;
        Ok(listing.into_vec())
    }

    pub async fn download(&self, id: &RecordId) -> Result<Vec<u8>> {
        let response = self
            .execute(ApiRequest::get(format!("/files/download/{}", encode(id.as_str()))))
            .await?;
        Ok(response.body)
    }

    pub async fn delete_file(&self, id: &RecordId) -> Result<()> {
        self.fetch_unit(ApiRequest::delete(format!("/files/{}", encode(id.as_str()))))
            .await
    }

    pub async fn rename_file(&self, id: &RecordId, new_name: &str) -> Result<()> {
        let request = ApiRequest::put(format!("/files/rename/{}", encode(id.as_str())))
            .json(&RenameBody { new_name })?;
        self.fetch_unit(request).await
    }

    pub async fn move_file(&self, id: &RecordId, folder_id: Option<&RecordId>) -> Result<()> {
        let request = ApiRequest::put(format!("/files/{}/move", encode(id.as_str())))
            .json(&MoveBody { folder_id })?;
        self.fetch_unit(request).await
    }

    // ========================
    // Folders
    // ========================

    pub async fn create_folder(&self, name: &str, parent_id: Option<&RecordId>) -> Result<()> {
        let request = ApiRequest::post("/files/folders").json(&CreateFolderBody { name, parent_id })?;
        self.fetch_unit(request).await
    }

    pub async fn list_folders(&self, parent_id: Option<&RecordId>) -> Result<Vec<Folder>> {
        let request = ApiRequest::get("/files/folders").query("parentId", parent_id);
        let listing: Listing<Folder> = self.fetch_json(request).await?;
        Ok(listing.into_vec())
    }

    pub async fn delete_folder(&self, id: &RecordId) -> Result<()> {
        self.fetch_unit(ApiRequest::delete(format!("/files/folders/{}", encode(id.as_str()))))
            .await
    }

    pub async fn rename_folder(&self, id: &RecordId, new_name: &str) -> Result<()> {
        let request = ApiRequest::put(format!("/files/folders/{}/rename", encode(id.as_str())))
            .json(&RenameBody { new_name })?;
        self.fetch_unit(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{test_client, FakeTransport};
    use crate::api::Method;
    use serde_json::json;
    use std::cell::Cell;

    fn ada() -> User {
        User { id: RecordId::new("1"), username: "ada".into(), email: "ada@example.com".into() }
    }

    #[tokio::test]
    async fn test_bearer_attached_when_token_stored() {
        let fake = Rc::new(FakeTransport::new());
        fake.respond(200, json!([]));
        let (client, session) = test_client(&fake);
        session.save(&Session { token: "tok-1".into(), user: ada() });

        client.list_files(None, "upload_date", "desc").await.unwrap();

        let calls = fake.calls();
        assert_eq!(calls[0].bearer.as_deref(), Some("tok-1"));
        assert_eq!(calls[0].url, "http://api.test/files?sortBy=upload_date&sortOrder=desc");
    }

    #[tokio::test]
    async fn test_no_bearer_without_session() {
        let fake = Rc::new(FakeTransport::new());
        fake.respond(200, json!({"token": "t", "user": {"id": 1, "username": "ada", "email": "ada@example.com"}}));
        let (client, _session) = test_client(&fake);

        let auth = client.login("ada@example.com", "secret1").await.unwrap();

        assert_eq!(auth.token, "t");
        let call = &fake.calls()[0];
        assert_eq!(call.bearer, None);
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.body, Some(json!({"email": "ada@example.com", "password": "secret1"})));
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_redirects_once() {
        let fake = Rc::new(FakeTransport::new());
        fake.respond(401, json!({"error": "Token expired"}));
        fake.respond(401, json!({"error": "Token expired"}));
        let (client, session) = test_client(&fake);
        session.save(&Session { token: "stale".into(), user: ada() });

        let redirects = Rc::new(Cell::new(0));
        let counter = redirects.clone();
        let client = client.with_unauthorized_handler(move || counter.set(counter.get() + 1));

        let first = client.list_files(None, "upload_date", "desc").await;
        let second = client.list_folders(None).await;

        assert_eq!(first, Err(Error::Unauthorized { message: Some("Token expired".into()) }));
        assert!(matches!(second, Err(Error::Unauthorized { .. })));
        assert_eq!(session.token(), None);
        assert_eq!(session.user(), None);
        assert_eq!(redirects.get(), 1);
    }

    #[tokio::test]
    async fn test_new_session_rearms_redirect() {
        let fake = Rc::new(FakeTransport::new());
        fake.respond(401, json!({}));
        fake.respond(401, json!({}));
        let (client, _session) = test_client(&fake);
        let redirects = Rc::new(Cell::new(0));
        let counter = redirects.clone();
        let client = client.with_unauthorized_handler(move || counter.set(counter.get() + 1));

        let _ = client.me().await;
        client.start_session(Session { token: "fresh".into(), user: ada() });
        let _ = client.me().await;

        assert_eq!(redirects.get(), 2);
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let fake = Rc::new(FakeTransport::new());
        fake.respond(404, json!({"error": "File not found"}));
        let (client, _session) = test_client(&fake);

        let err = client.delete_file(&RecordId::new("9")).await.unwrap_err();

        assert_eq!(err, Error::Status { status: 404, message: Some("File not found".into()) });
        assert_eq!(fake.calls()[0].url, "http://api.test/files/9");
        assert_eq!(fake.calls()[0].method, Method::Delete);
    }

    #[tokio::test]
    async fn test_move_and_folder_bodies() {
        let fake = Rc::new(FakeTransport::new());
        fake.respond(200, json!({"message": "moved"}));
        fake.respond(201, json!({"id": 4, "name": "Reports"}));
        fake.respond(200, json!({"folders": [{"id": 4, "name": "Reports", "parentId": 2}]}));
        let (client, _session) = test_client(&fake);
        let parent = RecordId::new("2");

        client.move_file(&RecordId::new("7"), None).await.unwrap();
        client.create_folder("Reports", Some(&parent)).await.unwrap();
        let folders = client.list_folders(Some(&parent)).await.unwrap();

        let calls = fake.calls();
        assert_eq!(calls[0].url, "http://api.test/files/7/move");
        assert_eq!(calls[0].body, Some(json!({"folderId": null})));
        assert_eq!(calls[1].body, Some(json!({"name": "Reports", "parentId": 2})));
        assert_eq!(calls[2].url, "http://api.test/files/folders?parentId=2");
        assert_eq!(folders[0].parent_id, Some(parent));
    }

    #[tokio::test]
    async fn test_download_returns_raw_bytes() {
        let fake = Rc::new(FakeTransport::new());
        fake.respond_bytes(200, b"\x89PNG".to_vec());
        let (client, _session) = test_client(&fake);

        let bytes = client.download(&RecordId::new("3")).await.unwrap();

        assert_eq!(bytes, b"\x89PNG".to_vec());
        assert_eq!(fake.calls()[0].url, "http://api.test/files/download/3");
    }
}
