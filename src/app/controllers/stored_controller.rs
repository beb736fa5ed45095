use crate::app::actions::Action;
use crate::app::state::{AppState, NoticeKind, Outcome};
use crate::backend::BackendResult;
use crate::model::StoredItem;

pub fn handle(state: &mut AppState, action: &Action) -> bool {
    match action {
        Action::RefreshStored => {
            state.refresh_stored();
            true
        }
        Action::SelectStored(name) => {
            state.stored.selected = Some(name.clone());
            true
        }
        Action::DeleteStored(name) => {
            tracing::info!(%name, "deleting stored dataset");
            let name = name.clone();
            state.spawn_request(false, move |b| Outcome::Deleted {
                result: b.delete_stored(&name),
                name,
            });
            true
        }
        _ => false,
    }
}

impl AppState {
    pub(crate) fn refresh_stored(&mut self) {
        self.stored.loading = true;
        self.spawn_request(false, |b| Outcome::StoredList(b.list_stored()));
    }
}

/// Keeps the current pick when it still exists, else the first item.
pub(crate) fn default_selection(items: &[StoredItem], current: Option<&str>) -> Option<String> {
    match current {
        Some(c) if items.iter().any(|i| i.name == c) => Some(c.to_string()),
        _ => items.first().map(|i| i.name.clone()),
    }
}

pub(crate) fn on_list(state: &mut AppState, result: BackendResult<Vec<StoredItem>>) {
    state.stored.loading = false;
    match result {
        Ok(items) => {
            tracing::debug!(count = items.len(), "stored catalog refreshed");
            state.stored.selected = default_selection(&items, state.stored.selected.as_deref());
            state.stored.items = items;
        }
        Err(e) => {
            tracing::warn!(error = %e, "listing stored datasets failed");
            state.set_notice(NoticeKind::Error, e.to_string());
        }
    }
}

pub(crate) fn on_deleted(state: &mut AppState, name: String, result: BackendResult<()>) {
    match result {
        Ok(()) => {
            state.set_notice(NoticeKind::Info, format!("Deleted {name}."));
            state.refresh_stored();
        }
        Err(e) => {
            tracing::warn!(%name, error = %e, "delete failed");
            state.set_notice(NoticeKind::Error, e.to_string());
        }
    }
}
