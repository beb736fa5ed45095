use crate::app::actions::Action;
use crate::app::state::{AppState, NoticeKind};

pub fn handle(state: &mut AppState, action: &Action) -> bool {
    match action {
        Action::SignIn => {
            let account = state.session.account_draft.trim().to_string();
            if account.is_empty() {
                state.set_notice(NoticeKind::Info, "Enter your account to sign in.");
                return true;
            }
            tracing::info!(%account, "signed in");
            state.set_notice(NoticeKind::Success, format!("Signed in as {account}."));
            state.session.account = Some(account);
            state.refresh_stored();
            true
        }
        Action::SignOut => {
            if let Some(account) = state.session.account.take() {
                tracing::info!(%account, "signed out");
            }
            state.clear_session_data();
            state.set_notice(NoticeKind::Info, "Signed out.");
            true
        }
        _ => false,
    }
}
