// Ingestion controller
// - Local path / Git URL / ZIP / stored dataset analysis
// - Structure preview for local paths
// - Store ZIP or clone on the backend for later reuse
// - Stale analysis replies are dropped by token

use crate::app::actions::{Action, ExpandCmd};
use crate::app::ingest::{IngestMode, SourceInput};
use crate::app::state::{AppState, NoticeKind, Outcome, TreeOrigin};
use crate::backend::BackendResult;
use crate::model::{AnalysisResult, DirectoryEntry};
use crate::{projection, tree};

pub fn handle(state: &mut AppState, action: &Action) -> bool {
    match action {
        Action::SetMode(mode) => {
            state.inputs.mode = *mode;
            if *mode == IngestMode::Stored && state.stored.items.is_empty() && !state.stored.loading {
                state.refresh_stored();
            }
            true
        }
        Action::PickLocalFolder => {
            if let Some(p) = state.platform.pick_folder("Select a folder to analyze") {
                state.inputs.local_path = p.display().to_string();
            }
            true
        }
        Action::PickZip => {
            if let Some(p) = state.platform.pick_zip("Select a ZIP archive") {
                state.inputs.zip_file = Some(p);
            }
            true
        }
        Action::PreviewStructure => {
            state.preview_structure();
            true
        }
        Action::Analyze => {
            state.run_analysis();
            true
        }
        Action::Store => {
            state.store_source();
            true
        }
        _ => false,
    }
}

impl AppState {
    pub(crate) fn preview_structure(&mut self) {
        match SourceInput::classify(&self.inputs.local_path) {
            None => self.set_notice(NoticeKind::Info, "Enter a directory path first."),
            Some(SourceInput::GitUrl(_)) => self.set_notice(
                NoticeKind::Info,
                "Structure preview is only available for local paths. Git repositories show their files after analysis.",
            ),
            Some(SourceInput::Path(path)) => {
                tracing::info!(%path, "fetching directory structure");
                self.spawn_request(true, move |b| Outcome::Structure {
                    result: b.directory_structure(&path),
                    path,
                });
            }
        }
    }

    pub(crate) fn run_analysis(&mut self) {
        let token = match self.inputs.mode {
            IngestMode::Local => {
                let source = SourceInput::classify(&self.inputs.local_path);
                if let Some(s) = &source {
                    tracing::debug!(input = s.value(), git = matches!(s, SourceInput::GitUrl(_)), "classified local input");
                }
                match source {
                    None => {
                        self.set_notice(NoticeKind::Info, "Enter a directory path or Git URL first.");
                        return;
                    }
                    Some(SourceInput::Path(path)) => {
                        tracing::info!(%path, "analyzing local path");
                        self.spawn_request(true, move |b| Outcome::Analysis {
                            label: path.clone(),
                            result: b.analyze_path(&path),
                            local_path: Some(path),
                        })
                    }
                    Some(SourceInput::GitUrl(url)) => self.spawn_git_analysis(url),
                }
            }
            IngestMode::Git => {
                let url = self.inputs.git_url.trim().to_string();
                if url.is_empty() {
                    self.set_notice(NoticeKind::Info, "Enter a Git repository URL first.");
                    return;
                }
                self.spawn_git_analysis(url)
            }
            IngestMode::Upload => {
                let Some(zip) = self.inputs.zip_file.clone() else {
                    self.set_notice(NoticeKind::Info, "Choose a ZIP file first.");
                    return;
                };
                tracing::info!(zip = %zip.display(), "uploading archive for analysis");
                self.spawn_request(true, move |b| Outcome::Analysis {
                    label: zip.display().to_string(),
                    result: b.analyze_zip(&zip),
                    local_path: None,
                })
            }
            IngestMode::Stored => {
                let Some(name) = self.stored.selected.clone() else {
                    self.set_notice(NoticeKind::Info, "Select a stored dataset first.");
                    return;
                };
                tracing::info!(%name, "analyzing stored dataset");
                self.spawn_request(true, move |b| Outcome::Analysis {
                    label: format!("stored: {name}"),
                    result: b.analyze_stored(&name),
                    local_path: None,
                })
            }
        };
        self.requests.latest_analysis = Some(token);
    }

    fn spawn_git_analysis(&mut self, url: String) -> u64 {
        tracing::info!(%url, "cloning repository for analysis");
        self.spawn_request(true, move |b| Outcome::Analysis {
            label: url.clone(),
            result: b.analyze_git(&url),
            local_path: None,
        })
    }

    pub(crate) fn store_source(&mut self) {
        let git_url = match self.inputs.mode {
            IngestMode::Upload => {
                let Some(zip) = self.inputs.zip_file.clone() else {
                    self.set_notice(NoticeKind::Info, "Choose a ZIP file first.");
                    return;
                };
                tracing::info!(zip = %zip.display(), "storing archive");
                self.spawn_request(true, move |b| Outcome::Stored(b.store_zip(&zip)));
                return;
            }
            IngestMode::Git => self.inputs.git_url.trim().to_string(),
            IngestMode::Local => match SourceInput::classify(&self.inputs.local_path) {
                Some(SourceInput::GitUrl(url)) => url,
                _ => String::new(),
            },
            IngestMode::Stored => String::new(),
        };

        if git_url.is_empty() {
            self.set_notice(
                NoticeKind::Info,
                "Only ZIP uploads and Git repositories can be stored.",
            );
            return;
        }

        tracing::info!(url = %git_url, "storing repository clone");
        self.spawn_request(true, move |b| Outcome::Stored(b.store_git(&git_url)));
    }
}

pub(crate) fn on_analysis(
    state: &mut AppState,
    token: u64,
    label: String,
    local_path: Option<String>,
    result: BackendResult<AnalysisResult>,
) {
    if state.requests.latest_analysis != Some(token) {
        tracing::debug!(token, %label, "discarding stale analysis reply");
        return;
    }
    state.requests.latest_analysis = None;

    let res = match result {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(%label, error = %e, "analysis failed");
            state.set_notice(NoticeKind::Error, e.to_string());
            return;
        }
    };

    tracing::info!(
        %label,
        total = res.total_files,
        crypto = res.crypto_files_found,
        "analysis finished"
    );

    let keep_structure = matches!(
        (&state.tree.origin, &local_path),
        (Some(TreeOrigin::Structure(p)), Some(lp)) if p == lp
    );
    if !keep_structure {
        state.tree.nodes = tree::build_tree_from_paths(&projection::file_paths(&res));
        state.tree.origin = Some(TreeOrigin::AnalyzedPaths);
    }
    state.tree.expand_cmd = Some(ExpandCmd::ExpandAll);

    let summary = if res.message.trim().is_empty() {
        format!(
            "Analyzed {} files, {} with cryptography.",
            res.total_files, res.crypto_files_found
        )
    } else {
        res.message.clone()
    };
    state.set_result(res, label);
    state.set_notice(NoticeKind::Success, summary);
}

pub(crate) fn on_structure(state: &mut AppState, path: String, result: BackendResult<Vec<DirectoryEntry>>) {
    match result {
        Ok(entries) => {
            if entries.is_empty() {
                state.set_notice(NoticeKind::Info, format!("No files found under {path}."));
            }
            state.tree.nodes = tree::build_tree_from_entries(&entries);
            state.tree.origin = Some(TreeOrigin::Structure(path));
            state.tree.expand_cmd = Some(ExpandCmd::ExpandAll);
        }
        Err(e) => {
            tracing::warn!(%path, error = %e, "structure preview failed");
            state.set_notice(NoticeKind::Error, e.to_string());
        }
    }
}

pub(crate) fn on_stored(state: &mut AppState, result: BackendResult<String>) {
    match result {
        Ok(msg) => {
            state.set_notice(NoticeKind::Success, msg);
            state.refresh_stored();
        }
        Err(e) => {
            tracing::warn!(error = %e, "store failed");
            state.set_notice(NoticeKind::Error, e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use crate::app::actions::Action;
    use crate::app::controller::test_support::*;
    use crate::app::ingest::IngestMode;
    use crate::app::state::{NoticeKind, TreeOrigin};
    use crate::backend::fake::FakeBackend;
    use crate::backend::BackendError;
    use crate::model::{AnalysisResult, BasicCryptoAnalysis, CryptoItem, DirectoryEntry, NodeKind};
    use crate::projection::{self, FindingsTab};

    fn result_with(paths: &[&str]) -> AnalysisResult {
        AnalysisResult {
            status: "success".into(),
            total_files: paths.len() as u64,
            crypto_files_found: paths.len() as u64,
            basic_analysis: paths
                .iter()
                .map(|p| BasicCryptoAnalysis {
                    file_path: p.to_string(),
                    has_crypto: true,
                    crypto_imports: vec![CryptoItem::default()],
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn local_path_analysis_sets_result_and_tree() {
        let fake = Arc::new(FakeBackend::new());
        fake.push_result(Ok(result_with(&["/p/src/b.py", "/p/src/a.py"])));
        let mut st = signed_in(fake.clone());

        st.inputs.local_path = " /p ".into();
        st.apply_action(Action::Analyze);
        assert!(st.progress.value() > 0.0 && st.progress.value() < 100.0);
        wait_idle(&mut st);

        assert!(fake.calls().contains(&"analyze /p".to_string()));
        assert_eq!(st.progress.value(), 100.0);
        assert_eq!(st.progress.completions(), 1);
        assert_eq!(st.results.result.as_ref().unwrap().total_files, 2);
        assert_eq!(st.results.file_counts.get("/p/src/a.py"), Some(&1));
        assert_eq!(st.tree.origin, Some(TreeOrigin::AnalyzedPaths));
        assert_eq!(st.tree.nodes[0].name, "p");
        assert_eq!(st.notice.as_ref().unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn git_shaped_local_input_goes_to_git_clone() {
        let fake = Arc::new(FakeBackend::new());
        fake.push_result(Ok(result_with(&["/tmp/clone/main.go"])));
        let mut st = signed_in(fake.clone());

        st.inputs.local_path = "https://github.com/org/repo".into();
        st.apply_action(Action::Analyze);
        wait_idle(&mut st);

        assert!(fake.calls().contains(&"git-clone https://github.com/org/repo".to_string()));
        assert_eq!(st.tree.origin, Some(TreeOrigin::AnalyzedPaths));
        assert_eq!(st.tree.nodes[0].name, "tmp");
    }

    #[test]
    fn preview_refuses_git_urls() {
        let fake = Arc::new(FakeBackend::new());
        let mut st = signed_in(fake.clone());
        st.inputs.local_path = "git@github.com:org/repo.git".into();
        st.apply_action(Action::PreviewStructure);

        assert!(st.requests.pending.is_empty());
        assert!(!fake.calls().iter().any(|c| c.starts_with("structure")));
        assert_eq!(st.notice.as_ref().unwrap().kind, NoticeKind::Info);
        assert_eq!(st.progress.value(), 0.0);
    }

    #[test]
    fn structure_tree_survives_matching_analysis() {
        let fake = Arc::new(FakeBackend::new());
        *fake.entries.lock().unwrap() = vec![
            DirectoryEntry {
                kind: NodeKind::Folder,
                name: "zeta".into(),
                path: "/p/zeta".into(),
                level: 0,
                supported: None,
            },
            DirectoryEntry {
                kind: NodeKind::File,
                name: "x.py".into(),
                path: "/p/zeta/x.py".into(),
                level: 1,
                supported: Some(true),
            },
        ];
        fake.push_result(Ok(result_with(&["/p/zeta/x.py"])));
        let mut st = signed_in(fake.clone());

        st.inputs.local_path = "/p".into();
        st.apply_action(Action::PreviewStructure);
        wait_idle(&mut st);
        assert_eq!(st.tree.origin, Some(TreeOrigin::Structure("/p".into())));
        assert_eq!(st.tree.nodes[0].children()[0].supported, Some(true));

        st.apply_action(Action::Analyze);
        wait_idle(&mut st);
        assert_eq!(st.tree.origin, Some(TreeOrigin::Structure("/p".into())));
        assert!(st.results.result.is_some());
    }

    #[test]
    fn failure_keeps_previous_result() {
        let fake = Arc::new(FakeBackend::new());
        fake.push_result(Ok(result_with(&["/a/one.py"])));
        fake.push_result(Err(BackendError::Status {
            status: 502,
            body: "clone failed".into(),
        }));
        let mut st = signed_in(fake.clone());

        st.inputs.mode = IngestMode::Git;
        st.inputs.git_url = "https://example.com/r.git".into();
        st.apply_action(Action::Analyze);
        wait_idle(&mut st);
        let before = st.results.result.clone();
        let tree_before = st.tree.nodes.clone();

        st.apply_action(Action::Analyze);
        wait_idle(&mut st);

        assert_eq!(st.results.result, before);
        assert_eq!(st.tree.nodes, tree_before);
        let n = st.notice.as_ref().unwrap();
        assert_eq!(n.kind, NoticeKind::Error);
        assert_eq!(n.text, "Backend returned 502: clone failed");
        assert_eq!(st.progress.value(), 100.0);
        assert_eq!(st.progress.completions(), 2);
    }

    #[test]
    fn stale_reply_is_discarded() {
        let fake = Arc::new(FakeBackend::new());
        fake.push_result(Ok(result_with(&["/old/a.py"])));
        fake.push_result(Ok(result_with(&["/new/b.py"])));
        let mut st = signed_in(fake.clone());

        let gate = fake.gate.clone();
        let held = gate.lock().unwrap();
        st.inputs.mode = IngestMode::Git;
        st.inputs.git_url = "https://example.com/old.git".into();
        st.apply_action(Action::Analyze);
        let first = st.requests.latest_analysis;

        st.inputs.git_url = "https://example.com/new.git".into();
        st.apply_action(Action::Analyze);
        assert_ne!(st.requests.latest_analysis, first);
        drop(held);
        wait_idle(&mut st);

        // Whichever thread popped which scripted result, only the reply to the
        // second request may land.
        let label = st.results.source_label.clone().unwrap();
        assert_eq!(label, "https://example.com/new.git");
        assert_eq!(st.progress.completions(), 1);
    }

    #[test]
    fn upload_requires_a_file_and_sends_it() {
        let fake = Arc::new(FakeBackend::new());
        fake.push_result(Ok(result_with(&["/x/y.py"])));
        let mut st = signed_in(fake.clone());

        st.apply_action(Action::SetMode(IngestMode::Upload));
        st.apply_action(Action::Analyze);
        assert!(st.requests.pending.is_empty());
        assert_eq!(st.notice.as_ref().unwrap().text, "Choose a ZIP file first.");

        st.apply_action(Action::PickZip);
        assert_eq!(st.inputs.zip_file, Some(PathBuf::from("/tmp/upload.zip")));
        st.apply_action(Action::Analyze);
        wait_idle(&mut st);
        assert!(fake.calls().contains(&"upload-zip /tmp/upload.zip".to_string()));
        assert!(st.results.result.is_some());
    }

    #[test]
    fn store_git_refreshes_catalog_without_touching_result() {
        let fake = Arc::new(FakeBackend::new());
        let mut st = signed_in(fake.clone());

        st.inputs.mode = IngestMode::Git;
        st.inputs.git_url = "https://example.com/team/vault.git".into();
        st.apply_action(Action::Store);
        wait_idle(&mut st);
        wait_idle(&mut st);

        assert!(st.results.result.is_none());
        assert_eq!(st.stored.items.len(), 1);
        assert_eq!(st.stored.selected.as_deref(), Some("vault"));
    }

    #[test]
    fn local_paths_cannot_be_stored() {
        let fake = Arc::new(FakeBackend::new());
        let mut st = signed_in(fake.clone());
        st.inputs.local_path = "/srv/app".into();
        st.apply_action(Action::Store);
        assert!(st.requests.pending.is_empty());
        assert_eq!(st.notice.as_ref().unwrap().kind, NoticeKind::Info);
    }

    #[test]
    fn relative_file_paths_stay_reachable_from_the_tree() {
        let fake = Arc::new(FakeBackend::new());
        fake.push_result(Ok(AnalysisResult {
            basic_analysis: vec![BasicCryptoAnalysis {
                file_path: "src/crypto.py".into(),
                has_crypto: true,
                crypto_imports: vec![CryptoItem::default(), CryptoItem::default()],
                ..Default::default()
            }],
            ..Default::default()
        }));
        let mut st = signed_in(fake.clone());

        st.inputs.mode = IngestMode::Git;
        st.inputs.git_url = "https://example.com/r.git".into();
        st.apply_action(Action::Analyze);
        wait_idle(&mut st);

        let folder = &st.tree.nodes[0];
        assert_eq!(folder.path, "/src");
        let leaf = folder.children()[0].path.clone();
        let res = st.results.result.as_ref().unwrap();
        assert!(projection::find_file(res, &leaf).is_some());
        assert_eq!(st.results.file_counts.get(&leaf), Some(&2));
        assert_eq!(st.results.folder_counts.get("/src"), Some(&2));

        st.apply_action(Action::OpenFile(leaf));
        assert_eq!(st.viewer.tab, Some(FindingsTab::Imports));
    }

    #[test]
    fn store_during_analysis_does_not_complete_progress() {
        let fake = Arc::new(FakeBackend::new());
        fake.push_result(Ok(result_with(&["/a/one.py"])));
        let mut st = signed_in(fake.clone());
        let before = st.progress.completions();

        let gate = fake.gate.clone();
        let held = gate.lock().unwrap();
        st.inputs.mode = IngestMode::Git;
        st.inputs.git_url = "https://example.com/team/vault.git".into();
        st.apply_action(Action::Analyze);
        st.apply_action(Action::Store);

        let deadline = Instant::now() + Duration::from_secs(5);
        while st.stored.items.is_empty() {
            st.poll_requests();
            assert!(Instant::now() < deadline, "store did not settle");
            std::thread::sleep(Duration::from_millis(2));
        }

        assert!(st.requests.latest_analysis.is_some());
        assert!(st.progress.is_running());
        assert!(st.progress.value() < 100.0);
        assert_eq!(st.progress.completions(), before);

        drop(held);
        wait_idle(&mut st);

        assert!(st.results.result.is_some());
        assert_eq!(st.progress.value(), 100.0);
        assert_eq!(st.progress.completions(), before + 1);
        assert!(!st.requests.is_busy());
    }

    #[test]
    fn failed_preview_keeps_previous_tree() {
        let fake = Arc::new(FakeBackend::new());
        *fake.entries.lock().unwrap() = vec![DirectoryEntry {
            kind: NodeKind::File,
            name: "main.rs".into(),
            path: "/p/main.rs".into(),
            level: 0,
            supported: Some(true),
        }];
        let mut st = signed_in(fake.clone());

        st.inputs.local_path = "/p".into();
        st.apply_action(Action::PreviewStructure);
        wait_idle(&mut st);
        let tree_before = st.tree.nodes.clone();
        assert_eq!(tree_before.len(), 1);

        *fake.structure_error.lock().unwrap() = Some(BackendError::Status {
            status: 404,
            body: "no such directory".into(),
        });
        st.inputs.local_path = "/missing".into();
        st.apply_action(Action::PreviewStructure);
        wait_idle(&mut st);

        assert_eq!(st.tree.nodes, tree_before);
        assert_eq!(st.tree.origin, Some(TreeOrigin::Structure("/p".into())));
        let n = st.notice.as_ref().unwrap();
        assert_eq!(n.kind, NoticeKind::Error);
        assert_eq!(n.text, "Backend returned 404: no such directory");
    }
}
