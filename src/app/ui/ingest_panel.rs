use eframe::egui;

use crate::app::ingest::{looks_like_git_url, IngestMode};

use super::super::actions::Action;
use super::super::state::AppState;
use super::stored_panel;

fn sign_in_form(ui: &mut egui::Ui, state: &mut AppState, actions: &mut Vec<Action>) {
    ui.heading("Sign in");
    ui.add_space(6.0);
    ui.label("Account");
    let resp = ui.add(
        egui::TextEdit::singleline(&mut state.session.account_draft)
            .hint_text("you@example.com")
            .desired_width(f32::INFINITY),
    );
    let submitted = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    if ui.button("Continue").clicked() || submitted {
        actions.push(Action::SignIn);
    }
}

pub fn ingest_panel(ui: &mut egui::Ui, state: &mut AppState) -> Vec<Action> {
    let mut actions = vec![];

    if !state.session.is_signed_in() {
        sign_in_form(ui, state, &mut actions);
        return actions;
    }

    ui.heading("Source");
    ui.add_space(4.0);

    ui.horizontal_wrapped(|ui| {
        for m in IngestMode::ALL {
            if ui.selectable_label(state.inputs.mode == m, m.label()).clicked() {
                actions.push(Action::SetMode(m));
            }
        }
    });

    ui.separator();

    let busy = state.requests.is_busy();

    match state.inputs.mode {
        IngestMode::Local => {
            ui.label("Directory path or Git URL");
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut state.inputs.local_path)
                        .hint_text("/path/to/project")
                        .desired_width(ui.available_width() - 40.0),
                );
                if ui.button("…").on_hover_text("Browse").clicked() {
                    actions.push(Action::PickLocalFolder);
                }
            });

            let is_git = looks_like_git_url(&state.inputs.local_path);
            if is_git {
                ui.weak("Looks like a Git URL: it will be cloned by the backend.");
            }

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!is_git, egui::Button::new("Preview structure"))
                    .clicked()
                {
                    actions.push(Action::PreviewStructure);
                }
                if ui.button("Analyze").clicked() {
                    actions.push(Action::Analyze);
                }
                if is_git && ui.button("Store").clicked() {
                    actions.push(Action::Store);
                }
            });
        }
        IngestMode::Upload => {
            ui.horizontal(|ui| {
                if ui.button("Choose ZIP…").clicked() {
                    actions.push(Action::PickZip);
                }
                match &state.inputs.zip_file {
                    Some(p) => {
                        ui.monospace(p.display().to_string());
                    }
                    None => {
                        ui.weak("No file chosen");
                    }
                }
            });
            ui.horizontal(|ui| {
                let ready = state.inputs.zip_file.is_some();
                if ui.add_enabled(ready, egui::Button::new("Analyze")).clicked() {
                    actions.push(Action::Analyze);
                }
                if ui.add_enabled(ready, egui::Button::new("Store")).clicked() {
                    actions.push(Action::Store);
                }
            });
        }
        IngestMode::Git => {
            ui.label("Repository URL");
            ui.add(
                egui::TextEdit::singleline(&mut state.inputs.git_url)
                    .hint_text("https://github.com/org/repo.git")
                    .desired_width(f32::INFINITY),
            );
            ui.horizontal(|ui| {
                let ready = !state.inputs.git_url.trim().is_empty();
                if ui.add_enabled(ready, egui::Button::new("Clone & analyze")).clicked() {
                    actions.push(Action::Analyze);
                }
                if ui.add_enabled(ready, egui::Button::new("Store")).clicked() {
                    actions.push(Action::Store);
                }
            });
        }
        IngestMode::Stored => {
            actions.extend(stored_panel::stored_panel(ui, state));
        }
    }

    if busy {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Waiting for the backend…");
        });
    }

    if let Some(label) = &state.results.source_label {
        ui.add_space(8.0);
        ui.separator();
        ui.label("Showing results for:");
        ui.add(egui::Label::new(egui::RichText::new(label).monospace()).wrap(true));
    }

    actions
}
