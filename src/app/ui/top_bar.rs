// src/app/ui/top_bar.rs
use eframe::egui;

use crate::health::HealthStatus;

use super::super::actions::Action;
use super::super::state::AppState;

pub fn top_bar(ui: &mut egui::Ui, state: &mut AppState) -> Vec<Action> {
    let mut actions = vec![];

    ui.horizontal(|ui| {
        ui.heading("Crypto Analyzer");

        ui.separator();

        // ----- Backend health -----
        let (status, checked_at) = match state.health.as_ref() {
            Some(h) => (h.status(), h.checked_at().map(|s| s.to_string())),
            None => (HealthStatus::Unknown, None),
        };
        let (color, label) = match &status {
            HealthStatus::Online => (egui::Color32::from_rgb(80, 200, 120), "Backend online".to_string()),
            HealthStatus::Offline(_) => (egui::Color32::LIGHT_RED, "Backend offline".to_string()),
            HealthStatus::Unknown => (egui::Color32::GRAY, "Checking backend…".to_string()),
        };
        let resp = ui.colored_label(color, format!("● {}", label));
        let mut hover = state.config.api_base_url.clone();
        if let Some(t) = checked_at {
            hover.push_str(&format!("\nlast checked {} UTC", t));
        }
        if let HealthStatus::Offline(err) = &status {
            hover.push('\n');
            hover.push_str(err);
        }
        resp.on_hover_text(hover);

        // ----- Progress -----
        if state.progress.is_visible() {
            ui.separator();
            ui.add(
                egui::ProgressBar::new(state.progress.value() / 100.0)
                    .desired_width(180.0)
                    .show_percentage(),
            );
        }

        // ----- Session -----
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(account) = state.session.account.clone() {
                if ui.button("Sign out").clicked() {
                    actions.push(Action::SignOut);
                }
                ui.label(account);
            }
        });
    });

    actions
}
