use std::path::PathBuf;

use directories::UserDirs;

pub mod csv;
pub mod xlsx;

/// The user's Downloads folder, or the working directory when there is none.
pub fn default_export_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(|dir| dir.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
