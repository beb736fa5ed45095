use std::sync::mpsc::{self, TryRecvError};
use std::time::Instant;

use crate::backend::AnalyzerBackend;

use super::actions::Action;
use super::controllers::{ingestion_controller, session_controller, stored_controller, tree_controller};
use super::state::{AppState, NoticeKind, Outcome, PendingRequest};

fn requires_session(action: &Action) -> bool {
    !matches!(action, Action::SignIn | Action::SignOut | Action::DismissNotice)
}

impl AppState {
    pub fn apply_action(&mut self, action: Action) {
        if let Action::DismissNotice = action {
            self.notice = None;
            return;
        }

        if requires_session(&action) && !self.session.is_signed_in() {
            self.set_notice(NoticeKind::Info, "Sign in to use the analyzer.");
            return;
        }

        // Keep ordering stable (session -> ingestion -> stored -> tree)
        if session_controller::handle(self, &action) {
            return;
        }
        if ingestion_controller::handle(self, &action) {
            return;
        }
        if stored_controller::handle(self, &action) {
            return;
        }
        if tree_controller::handle(self, &action) {
            return;
        }
    }

    /// Runs `job` on a background thread and tracks its reply.
    ///
    /// When `drives_progress` is set the cosmetic progress bar stays below 100
    /// until every progress-driving request has resolved.
    pub(crate) fn spawn_request<F>(&mut self, drives_progress: bool, job: F) -> u64
    where
        F: FnOnce(&dyn AnalyzerBackend) -> Outcome + Send + 'static,
    {
        let token = self.requests.next_token;
        self.requests.next_token = self.requests.next_token.wrapping_add(1);

        let (tx, rx) = mpsc::channel::<Outcome>();
        let backend = self.backend.clone();
        std::thread::spawn(move || {
            let out = job(backend.as_ref());
            let _ = tx.send(out);
        });

        self.requests.pending.push(PendingRequest { token, rx });
        if drives_progress {
            // Joins a run already in flight instead of restarting it.
            if !self.progress.is_running() {
                self.progress.start(Instant::now());
            }
            self.requests.progress_tokens.insert(token);
        }
        token
    }

    /// Applies every reply that has arrived. Returns true if any did.
    pub fn poll_requests(&mut self) -> bool {
        let mut finished: Vec<(u64, Option<Outcome>)> = Vec::new();
        self.requests.pending.retain(|p| match p.rx.try_recv() {
            Ok(out) => {
                finished.push((p.token, Some(out)));
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Disconnected) => {
                finished.push((p.token, None));
                false
            }
        });

        let any = !finished.is_empty();
        for (token, out) in finished {
            if self.requests.progress_tokens.remove(&token) && self.requests.progress_tokens.is_empty() {
                self.progress.finish(Instant::now());
                tracing::debug!(token, completions = self.progress.completions(), "request finished");
            }
            match out {
                Some(o) => self.apply_outcome(token, o),
                None => {
                    tracing::warn!(token, "request thread ended without a reply");
                    self.set_notice(NoticeKind::Error, "Request ended without a response.");
                }
            }
        }
        any
    }

    fn apply_outcome(&mut self, token: u64, outcome: Outcome) {
        match outcome {
            Outcome::Analysis {
                label,
                local_path,
                result,
            } => ingestion_controller::on_analysis(self, token, label, local_path, result),
            Outcome::Structure { path, result } => ingestion_controller::on_structure(self, path, result),
            Outcome::Stored(result) => ingestion_controller::on_stored(self, result),
            Outcome::StoredList(result) => stored_controller::on_list(self, result),
            Outcome::Deleted { name, result } => stored_controller::on_deleted(self, name, result),
        }
    }

    pub fn finalize_frame(&mut self) {
        self.poll_requests();
        if let Some(h) = self.health.as_mut() {
            h.poll();
        }
        self.progress.tick(Instant::now(), &mut rand::thread_rng());
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use crate::backend::fake::FakeBackend;
    use crate::config::AppConfig;
    use crate::platform::Platform;

    use super::super::actions::Action;
    use super::super::state::AppState;

    pub struct ScriptedPlatform {
        pub folder: Option<PathBuf>,
        pub zip: Option<PathBuf>,
    }

    impl Platform for ScriptedPlatform {
        fn pick_folder(&self, _title: &str) -> Option<PathBuf> {
            self.folder.clone()
        }

        fn pick_zip(&self, _title: &str) -> Option<PathBuf> {
            self.zip.clone()
        }
    }

    pub fn state_with(fake: Arc<FakeBackend>) -> AppState {
        let platform = Arc::new(ScriptedPlatform {
            folder: Some(PathBuf::from("/picked/project")),
            zip: Some(PathBuf::from("/tmp/upload.zip")),
        });
        AppState::new(AppConfig::default(), fake, platform)
    }

    pub fn signed_in(fake: Arc<FakeBackend>) -> AppState {
        let mut st = state_with(fake);
        st.session.account_draft = "dev@example.com".into();
        st.apply_action(Action::SignIn);
        wait_idle(&mut st);
        st
    }

    pub fn wait_idle(st: &mut AppState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !st.requests.pending.is_empty() {
            st.poll_requests();
            assert!(Instant::now() < deadline, "requests did not settle");
            std::thread::sleep(Duration::from_millis(2));
        }
    }
}
