//! Listing Flow
//!
//! Queries, rename drafts, the folder trail, and the listing operations.
//! Every mutation is followed by a full reload of the list: the client never
//! patches its copy, so what is shown is always what the server last said.

use crate::api::ApiClient;
use crate::error::{Error, ValidationError};
use crate::models::{FileRecord, Folder, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    UploadDate,
    Name,
    Size,
}

impl SortBy {
    pub const ALL: [SortBy; 3] = [SortBy::UploadDate, SortBy::Name, SortBy::Size];

    pub fn as_param(self) -> &'static str {
        match self {
            SortBy::UploadDate => "upload_date",
            SortBy::Name => "original_name",
            SortBy::Size => "size",
        }
    }

    pub fn from_param(param: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_param() == param)
    }

    pub fn label(self) -> &'static str {
        match self {
            SortBy::UploadDate => "Upload date",
            SortBy::Name => "Name",
            SortBy::Size => "Size",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// What the listing currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileQuery {
    pub folder_id: Option<RecordId>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub search: String,
}

impl FileQuery {
    pub fn search_text(&self) -> Option<&str> {
        let text = self.search.trim();
        (!text.is_empty()).then_some(text)
    }
}

/// Pending rename, pre-filled with the current name
#[derive(Debug, Clone, PartialEq)]
pub struct RenameDraft {
    pub target: RecordId,
    pub original: String,
    pub name: String,
}

impl RenameDraft {
    pub fn for_file(file: &FileRecord) -> Self {
        Self {
            target: file.id.clone(),
            original: file.original_name.clone(),
            name: file.original_name.clone(),
        }
    }

    pub fn for_folder(folder: &Folder) -> Self {
        Self {
            target: folder.id.clone(),
            original: folder.name.clone(),
            name: folder.name.clone(),
        }
    }

    /// Trimmed new name, rejected when blank
    pub fn new_name(&self) -> Result<&str, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(name)
    }
}

/// Breadcrumb of entered folders; the last one is the current folder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderTrail {
    crumbs: Vec<Folder>,
}

impl FolderTrail {
    pub fn current(&self) -> Option<&Folder> {
        self.crumbs.last()
    }

    pub fn current_id(&self) -> Option<RecordId> {
        self.current().map(|f| f.id.clone())
    }

    pub fn crumbs(&self) -> &[Folder] {
        &self.crumbs
    }

    pub fn enter(&mut self, folder: Folder) {
        self.crumbs.push(folder);
    }

    pub fn up(&mut self) -> Option<Folder> {
        self.crumbs.pop()
    }

    /// Jump back to the crumb at `depth` (0 = first entered folder)
    pub fn truncate_to(&mut self, depth: usize) {
        self.crumbs.truncate(depth + 1);
    }

    pub fn reset(&mut self) {
        self.crumbs.clear();
    }
}

/// A destination offered in a file's Move menu; `id: None` is the top level
#[derive(Debug, Clone, PartialEq)]
pub struct MoveTarget {
    pub id: Option<RecordId>,
    pub label: String,
}

/// Top level, every folder on the trail, and the folders inside the current one.
/// The folder the file already sits in is left out.
pub fn move_targets(trail: &FolderTrail, children: &[Folder], from: Option<&RecordId>) -> Vec<MoveTarget> {
    let mut targets = vec![MoveTarget { id: None, label: "All files (top level)".to_string() }];
    let mut path = String::new();
    let mut push = |folder: &Folder, path: &str| {
        let label = if path.is_empty() {
            folder.name.clone()
        } else {
            format!("{} / {}", path, folder.name)
        };
        targets.push(MoveTarget { id: Some(folder.id.clone()), label });
    };
    for crumb in trail.crumbs() {
        push(crumb, &path);
        path = if path.is_empty() { crumb.name.clone() } else { format!("{} / {}", path, crumb.name) };
    }
    for child in children {
        push(child, &path);
    }
    targets.retain(|t| t.id.as_ref() != from);
    targets
}

// ========================
// Listing Operations
// ========================

/// Fetch the full list for `query`: search when there is text, else the folder listing
pub async fn load_files(client: &ApiClient, query: &FileQuery) -> Result<Vec<FileRecord>, Error> {
    match query.search_text() {
        Some(text) => client.search_files(text).await,
        None => {
            client
                .list_files(
                    query.folder_id.as_ref(),
                    query.sort_by.as_param(),
                    query.sort_order.as_param(),
                )
                .await
        }
    }
}

pub async fn rename_and_reload(
    client: &ApiClient,
    draft: &RenameDraft,
    query: &FileQuery,
) -> Result<Vec<FileRecord>, Error> {
    let name = draft.new_name()?;
    client.rename_file(&draft.target, name).await?;
    load_files(client, query).await
}

pub async fn delete_and_reload(
    client: &ApiClient,
    id: &RecordId,
    query: &FileQuery,
) -> Result<Vec<FileRecord>, Error> {
    client.delete_file(id).await?;
    load_files(client, query).await
}

pub async fn move_and_reload(
    client: &ApiClient,
    id: &RecordId,
    folder_id: Option<&RecordId>,
    query: &FileQuery,
) -> Result<Vec<FileRecord>, Error> {
    client.move_file(id, folder_id).await?;
    load_files(client, query).await
}

// ========================
// Folder Operations
// ========================

pub async fn load_folders(client: &ApiClient, trail: &FolderTrail) -> Result<Vec<Folder>, Error> {
    client.list_folders(trail.current_id().as_ref()).await
}

/// Both lists as re-read after a folder mutation
#[derive(Debug, Clone, PartialEq)]
pub struct FolderRefresh {
    pub folders: Vec<Folder>,
    pub files: Vec<FileRecord>,
}

/// Folder changes can move or drop files, so the listing is re-read too
async fn reload_both(client: &ApiClient, trail: &FolderTrail, query: &FileQuery) -> Result<FolderRefresh, Error> {
    let folders = load_folders(client, trail).await?;
    let files = load_files(client, query).await?;
    Ok(FolderRefresh { folders, files })
}

pub async fn create_folder_and_reload(
    client: &ApiClient,
    name: &str,
    trail: &FolderTrail,
    query: &FileQuery,
) -> Result<FolderRefresh, Error> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    client.create_folder(name, trail.current_id().as_ref()).await?;
    reload_both(client, trail, query).await
}

pub async fn rename_folder_and_reload(
    client: &ApiClient,
    draft: &RenameDraft,
    trail: &FolderTrail,
    query: &FileQuery,
) -> Result<FolderRefresh, Error> {
    let name = draft.new_name()?;
    client.rename_folder(&draft.target, name).await?;
    reload_both(client, trail, query).await
}

pub async fn delete_folder_and_reload(
    client: &ApiClient,
    id: &RecordId,
    trail: &FolderTrail,
    query: &FileQuery,
) -> Result<FolderRefresh, Error> {
    client.delete_folder(id).await?;
    reload_both(client, trail, query).await
}
