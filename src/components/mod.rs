//! UI Components
//!
//! Screens and panels of the vault UI.

mod navbar;
mod login_page;
mod register_page;
mod dashboard;
mod file_upload;
mod file_toolbar;
mod file_list;
mod folder_sidebar;
mod rename_dialog;
mod delete_confirm_button;

pub use navbar::Navbar;
pub use login_page::LoginPage;
pub use register_page::RegisterPage;
pub use dashboard::Dashboard;
pub use file_upload::FileUpload;
pub use file_toolbar::FileToolbar;
pub use file_list::FileList;
pub use folder_sidebar::FolderSidebar;
pub use rename_dialog::RenameDialog;
pub use delete_confirm_button::DeleteConfirmButton;
