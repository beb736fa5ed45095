// src/app/state.rs
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use egui_extras::syntax_highlighting::CodeTheme;

use crate::backend::{AnalyzerBackend, BackendResult};
use crate::config::AppConfig;
use crate::health::HealthMonitor;
use crate::model::{AnalysisResult, DirectoryEntry, StoredItem, TreeNode};
use crate::platform::Platform;
use crate::projection::FindingsTab;

use super::actions::ExpandCmd;
use super::ingest::IngestMode;
use super::progress::Progress;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// The single dismissible banner.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

pub struct SessionState {
    pub account: Option<String>,
    /// Sign-in form field.
    pub account_draft: String,
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        self.account.is_some()
    }
}

pub struct InputsState {
    pub mode: IngestMode,
    pub local_path: String,
    pub git_url: String,
    pub zip_file: Option<PathBuf>,
}

pub struct ResultsState {
    pub result: Option<AnalysisResult>,
    /// Finding count per file path, recomputed whenever `result` changes.
    pub file_counts: HashMap<String, usize>,
    /// Totals per canonical folder path, recomputed with `file_counts`.
    pub folder_counts: HashMap<String, usize>,
    pub source_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TreeOrigin {
    /// Built from the directory-structure listing of this path.
    Structure(String),
    /// Built from the file paths of the current result.
    AnalyzedPaths,
}

pub struct TreeState {
    pub nodes: Vec<TreeNode>,
    pub origin: Option<TreeOrigin>,
    pub expand_cmd: Option<ExpandCmd>,
}

pub struct StoredState {
    pub items: Vec<StoredItem>,
    pub selected: Option<String>,
    pub loading: bool,
}

pub struct FileViewerState {
    pub selected_file: Option<String>,
    pub tab: Option<FindingsTab>,
}

pub struct UiState {
    pub filter_text: String,
    pub show_counts: bool,
    pub theme_seeded: bool,
}

pub struct ThemeState {
    pub code_theme: CodeTheme,
}

/// What a background request sends back.
pub enum Outcome {
    Analysis {
        label: String,
        /// Set for local path analyses, so a matching structure tree is kept.
        local_path: Option<String>,
        result: BackendResult<AnalysisResult>,
    },
    Structure {
        path: String,
        result: BackendResult<Vec<DirectoryEntry>>,
    },
    Stored(BackendResult<String>),
    StoredList(BackendResult<Vec<StoredItem>>),
    Deleted {
        name: String,
        result: BackendResult<()>,
    },
}

pub struct PendingRequest {
    pub token: u64,
    pub rx: Receiver<Outcome>,
}

pub struct RequestsState {
    pub next_token: u64,
    /// Only the analysis carrying this token may replace the result.
    pub latest_analysis: Option<u64>,
    /// Requests driving the progress bar; it completes when the last one resolves.
    pub progress_tokens: HashSet<u64>,
    pub pending: Vec<PendingRequest>,
}

impl RequestsState {
    pub fn is_busy(&self) -> bool {
        !self.progress_tokens.is_empty()
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub backend: Arc<dyn AnalyzerBackend>,
    pub platform: Arc<dyn Platform>,

    pub session: SessionState,
    pub inputs: InputsState,
    pub results: ResultsState,
    pub tree: TreeState,
    pub stored: StoredState,
    pub viewer: FileViewerState,
    pub ui: UiState,
    pub theme: ThemeState,

    pub progress: Progress,
    pub requests: RequestsState,
    pub notice: Option<Notice>,

    /// Running while the view is alive; dropped with the state.
    pub health: Option<HealthMonitor>,
}

impl AppState {
    pub fn new(config: AppConfig, backend: Arc<dyn AnalyzerBackend>, platform: Arc<dyn Platform>) -> Self {
        Self {
            config,
            backend,
            platform,

            session: SessionState {
                account: None,
                account_draft: String::new(),
            },

            inputs: InputsState {
                mode: IngestMode::Local,
                local_path: String::new(),
                git_url: String::new(),
                zip_file: None,
            },

            results: ResultsState {
                result: None,
                file_counts: HashMap::new(),
                folder_counts: HashMap::new(),
                source_label: None,
            },

            tree: TreeState {
                nodes: Vec::new(),
                origin: None,
                expand_cmd: None,
            },

            stored: StoredState {
                items: Vec::new(),
                selected: None,
                loading: false,
            },

            viewer: FileViewerState {
                selected_file: None,
                tab: None,
            },

            ui: UiState {
                filter_text: String::new(),
                show_counts: true,
                theme_seeded: false,
            },

            theme: ThemeState {
                code_theme: CodeTheme::dark(),
            },

            progress: Progress::default(),
            requests: RequestsState {
                next_token: 1,
                latest_analysis: None,
                progress_tokens: HashSet::new(),
                pending: Vec::new(),
            },
            notice: None,

            health: None,
        }
    }

    /// Starts the liveness probe. Called once the view is mounted.
    pub fn start_health_monitor(&mut self) {
        if self.health.is_none() {
            self.health = Some(HealthMonitor::start(
                self.backend.clone(),
                self.config.health_interval,
            ));
        }
    }

    pub fn set_notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            text: text.into(),
        });
    }

    pub fn set_result(&mut self, res: AnalysisResult, label: String) {
        self.results.file_counts = crate::projection::file_counts(&res);
        self.results.result = Some(res);
        self.results.source_label = Some(label);
        self.results.folder_counts = crate::projection::folder_counts(&self.results.file_counts);

        let still_there = self
            .viewer
            .selected_file
            .as_ref()
            .is_some_and(|p| self.results.file_counts.contains_key(p));
        if !still_there {
            self.viewer.selected_file = None;
            self.viewer.tab = None;
        }
    }

    pub fn clear_session_data(&mut self) {
        self.results.result = None;
        self.results.file_counts.clear();
        self.results.folder_counts.clear();
        self.results.source_label = None;
        self.tree.nodes.clear();
        self.tree.origin = None;
        self.stored.items.clear();
        self.stored.selected = None;
        self.stored.loading = false;
        self.viewer.selected_file = None;
        self.viewer.tab = None;
        self.requests.pending.clear();
        self.requests.latest_analysis = None;
        self.requests.progress_tokens.clear();
        self.progress = Progress::default();
    }
}
