use eframe::egui;

use crate::format;

use super::super::actions::Action;
use super::super::state::AppState;

pub fn stored_panel(ui: &mut egui::Ui, state: &AppState) -> Vec<Action> {
    let mut actions = vec![];

    ui.horizontal(|ui| {
        ui.label("Stored datasets");
        if ui.button("↻").on_hover_text("Refresh").clicked() {
            actions.push(Action::RefreshStored);
        }
        if state.stored.loading {
            ui.spinner();
        }
    });

    if state.stored.items.is_empty() {
        ui.weak("Nothing stored yet. Store a ZIP or Git repository to reuse it here.");
        return actions;
    }

    egui::ScrollArea::vertical()
        .id_source("stored_scroll")
        .max_height(240.0)
        .show(ui, |ui| {
            for item in &state.stored.items {
                ui.horizontal(|ui| {
                    let selected = state.stored.selected.as_deref() == Some(item.name.as_str());
                    if ui
                        .selectable_label(selected, format::format_stored_item(item))
                        .on_hover_text(&item.path)
                        .clicked()
                    {
                        actions.push(Action::SelectStored(item.name.clone()));
                    }
                    if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                        actions.push(Action::DeleteStored(item.name.clone()));
                    }
                });
            }
        });

    ui.add_space(4.0);
    let ready = state.stored.selected.is_some();
    if ui.add_enabled(ready, egui::Button::new("Analyze selected")).clicked() {
        actions.push(Action::Analyze);
    }

    actions
}
