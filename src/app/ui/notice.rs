use eframe::egui;

use super::super::actions::Action;
use super::super::state::{AppState, NoticeKind};

pub fn notice_banner(ui: &mut egui::Ui, state: &AppState) -> Vec<Action> {
    let mut actions = vec![];
    let Some(n) = state.notice.as_ref() else {
        return actions;
    };

    let fill = match n.kind {
        NoticeKind::Error => egui::Color32::from_rgb(90, 30, 30),
        NoticeKind::Success => egui::Color32::from_rgb(25, 70, 40),
        NoticeKind::Info => egui::Color32::from_rgb(30, 50, 80),
    };

    ui.add_space(4.0);
    egui::Frame::none()
        .fill(fill)
        .rounding(4.0)
        .inner_margin(egui::Margin::same(6.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                if ui.small_button("✕").on_hover_text("Dismiss").clicked() {
                    actions.push(Action::DismissNotice);
                }
                ui.add(egui::Label::new(n.text.as_str()).wrap(true));
            });
        });
    ui.add_space(4.0);

    actions
}
