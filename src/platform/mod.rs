use std::path::PathBuf;

/// OS specific dialogs live behind this trait so controllers stay testable.
pub trait Platform: Send + Sync {
    /// Pick a folder to analyze.
    fn pick_folder(&self, title: &str) -> Option<PathBuf>;

    /// Pick a `.zip` archive to upload.
    fn pick_zip(&self, title: &str) -> Option<PathBuf>;
}

pub mod native;
