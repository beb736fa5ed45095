use crate::app::actions::{Action, ExpandCmd};
use crate::app::state::AppState;
use crate::projection;

pub fn handle(state: &mut AppState, action: &Action) -> bool {
    match action {
        Action::ExpandAll => {
            state.tree.expand_cmd = Some(ExpandCmd::ExpandAll);
            true
        }
        Action::CollapseAll => {
            state.tree.expand_cmd = Some(ExpandCmd::CollapseAll);
            true
        }
        Action::OpenFile(path) => {
            state.viewer.selected_file = Some(path.clone());
            state.sync_viewer_tab();
            true
        }
        Action::SelectTab(tab) => {
            state.viewer.tab = Some(*tab);
            true
        }
        _ => false,
    }
}

impl AppState {
    /// Re-validates the findings tab against the selected file.
    pub(crate) fn sync_viewer_tab(&mut self) {
        let (Some(res), Some(path)) = (self.results.result.as_ref(), self.viewer.selected_file.as_deref()) else {
            self.viewer.tab = None;
            return;
        };
        let available = match projection::find_file(res, path) {
            Some(a) => projection::available_tabs(a, projection::find_review(res, path)),
            None => Vec::new(),
        };
        self.viewer.tab = projection::select_tab(self.viewer.tab, &available);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::app::controller::test_support::*;
    use crate::backend::fake::FakeBackend;
    use crate::model::{AnalysisResult, BasicCryptoAnalysis, CodeSnippet, CryptoItem};
    use crate::projection::FindingsTab;

    #[test]
    fn opening_a_file_picks_first_tab_with_data() {
        let fake = Arc::new(FakeBackend::new());
        let mut st = signed_in(fake);
        let res = AnalysisResult {
            basic_analysis: vec![
                BasicCryptoAnalysis {
                    file_path: "/a.py".into(),
                    crypto_functions: vec![CryptoItem::default()],
                    code_snippets: vec![CodeSnippet::default()],
                    ..Default::default()
                },
                BasicCryptoAnalysis {
                    file_path: "/b.py".into(),
                    crypto_imports: vec![CryptoItem::default()],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        st.set_result(res, "test".into());

        st.apply_action(Action::OpenFile("/a.py".into()));
        assert_eq!(st.viewer.tab, Some(FindingsTab::Functions));

        st.apply_action(Action::SelectTab(FindingsTab::Snippets));
        st.apply_action(Action::OpenFile("/b.py".into()));
        assert_eq!(st.viewer.tab, Some(FindingsTab::Imports));

        st.apply_action(Action::OpenFile("/not-analyzed.txt".into()));
        assert_eq!(st.viewer.tab, None);
    }

    #[test]
    fn expand_commands_are_one_shot_flags() {
        let fake = Arc::new(FakeBackend::new());
        let mut st = signed_in(fake);
        st.apply_action(Action::CollapseAll);
        assert_eq!(st.tree.expand_cmd, Some(ExpandCmd::CollapseAll));
        st.apply_action(Action::ExpandAll);
        assert_eq!(st.tree.expand_cmd, Some(ExpandCmd::ExpandAll));
    }
}
