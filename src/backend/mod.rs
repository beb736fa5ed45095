use std::path::Path;

use thiserror::Error;

use crate::model::{AnalysisResult, DirectoryEntry, StoredItem};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("Could not reach the analyzer backend: {0}")]
    Transport(String),
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response from backend: {0}")]
    Decode(String),
    #[error("{0}")]
    Io(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Everything the dashboard asks of the remote analyzer.
///
/// Calls block; controllers run them on background threads.
pub trait AnalyzerBackend: Send + Sync {
    /// `GET /health`
    fn health(&self) -> BackendResult<()>;

    /// `POST /analyze`
    fn analyze_path(&self, path: &str) -> BackendResult<AnalysisResult>;

    /// `POST /git-clone`
    fn analyze_git(&self, git_url: &str) -> BackendResult<AnalysisResult>;

    /// `POST /upload-zip`
    fn analyze_zip(&self, zip: &Path) -> BackendResult<AnalysisResult>;

    /// `POST /store/upload-zip`
    fn store_zip(&self, zip: &Path) -> BackendResult<String>;

    /// `POST /store/git-clone`
    fn store_git(&self, git_url: &str) -> BackendResult<String>;

    /// `GET /store/list`
    fn list_stored(&self) -> BackendResult<Vec<StoredItem>>;

    /// `GET /store/analyze/{name}`
    fn analyze_stored(&self, name: &str) -> BackendResult<AnalysisResult>;

    /// `DELETE /store/{name}`
    fn delete_stored(&self, name: &str) -> BackendResult<()>;

    /// `GET /api/directory-structure?path=` on the local proxy.
    fn directory_structure(&self, path: &str) -> BackendResult<Vec<DirectoryEntry>>;
}

pub mod http;

#[cfg(test)]
pub mod fake;
