// Scripted backend for controller tests.
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::model::{AnalysisResult, DirectoryEntry, StoredItem};

use super::{AnalyzerBackend, BackendError, BackendResult};

#[derive(Default)]
pub struct FakeBackend {
    pub healthy: Mutex<bool>,
    pub health_calls: AtomicUsize,
    pub results: Mutex<VecDeque<BackendResult<AnalysisResult>>>,
    pub stored: Mutex<Vec<StoredItem>>,
    pub entries: Mutex<Vec<DirectoryEntry>>,
    /// When set, `directory_structure` fails with this error.
    pub structure_error: Mutex<Option<BackendError>>,
    pub calls: Mutex<Vec<String>>,
    /// Held by analyze calls; tests lock it to keep a request in flight.
    pub gate: Arc<Mutex<()>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            healthy: Mutex::new(true),
            ..Default::default()
        }
    }

    pub fn push_result(&self, r: BackendResult<AnalysisResult>) {
        self.results.lock().unwrap().push_back(r);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_result(&self) -> BackendResult<AnalysisResult> {
        let _g = self.gate.lock().unwrap();
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted result".into())))
    }
}

impl AnalyzerBackend for FakeBackend {
    fn health(&self) -> BackendResult<()> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        if *self.healthy.lock().unwrap() {
            Ok(())
        } else {
            Err(BackendError::Transport("connection refused".into()))
        }
    }

    fn analyze_path(&self, path: &str) -> BackendResult<AnalysisResult> {
        self.record(format!("analyze {path}"));
        self.next_result()
    }

    fn analyze_git(&self, git_url: &str) -> BackendResult<AnalysisResult> {
        self.record(format!("git-clone {git_url}"));
        self.next_result()
    }

    fn analyze_zip(&self, zip: &Path) -> BackendResult<AnalysisResult> {
        self.record(format!("upload-zip {}", zip.display()));
        self.next_result()
    }

    fn store_zip(&self, zip: &Path) -> BackendResult<String> {
        self.record(format!("store-zip {}", zip.display()));
        Ok("Stored archive".into())
    }

    fn store_git(&self, git_url: &str) -> BackendResult<String> {
        self.record(format!("store-git {git_url}"));
        let name = git_url.rsplit('/').next().unwrap_or(git_url).trim_end_matches(".git");
        self.stored.lock().unwrap().push(StoredItem {
            name: name.to_string(),
            ..Default::default()
        });
        Ok(format!("Stored {name}"))
    }

    fn list_stored(&self) -> BackendResult<Vec<StoredItem>> {
        self.record("list".into());
        Ok(self.stored.lock().unwrap().clone())
    }

    fn analyze_stored(&self, name: &str) -> BackendResult<AnalysisResult> {
        self.record(format!("analyze-stored {name}"));
        self.next_result()
    }

    fn delete_stored(&self, name: &str) -> BackendResult<()> {
        self.record(format!("delete {name}"));
        self.stored.lock().unwrap().retain(|i| i.name != name);
        Ok(())
    }

    fn directory_structure(&self, path: &str) -> BackendResult<Vec<DirectoryEntry>> {
        self.record(format!("structure {path}"));
        if let Some(e) = self.structure_error.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self.entries.lock().unwrap().clone())
    }
}
