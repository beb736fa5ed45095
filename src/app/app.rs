use std::time::Duration;

use eframe::egui;

use super::{theme, ui};
use super::AppState;

impl eframe::App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        theme::apply_once(ctx, self);
        self.start_health_monitor();

        egui::TopBottomPanel::top("top").show(ctx, |ui_top| {
            let actions = ui::top_bar::top_bar(ui_top, self);
            for a in actions {
                self.apply_action(a);
            }
            let actions = ui::notice::notice_banner(ui_top, self);
            for a in actions {
                self.apply_action(a);
            }
        });

        egui::SidePanel::left("source")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui_side| {
                let actions = ui::ingest_panel::ingest_panel(ui_side, self);
                for a in actions {
                    self.apply_action(a);
                }
            });

        if self.session.is_signed_in() {
            egui::SidePanel::left("files")
                .resizable(true)
                .default_width(300.0)
                .show(ctx, |ui_tree| {
                    let actions = ui::tree_panel::tree_panel(ui_tree, self);
                    for a in actions {
                        self.apply_action(a);
                    }
                });

            egui::TopBottomPanel::bottom("summary")
                .resizable(true)
                .default_height(280.0)
                .show(ctx, |ui_bottom| {
                    egui::ScrollArea::vertical()
                        .id_source("summary_scroll")
                        .auto_shrink([false, false])
                        .show(ui_bottom, |ui_bottom| {
                            ui::summary_panel::summary_panel(ui_bottom, self);
                        });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui_center| {
            if !self.session.is_signed_in() {
                ui_center.centered_and_justified(|ui| {
                    ui.label("Sign in to analyze code for cryptographic usage.");
                });
                return;
            }
            let actions = ui::file_viewer::file_viewer(ctx, ui_center, self);
            for a in actions {
                self.apply_action(a);
            }
        });

        self.finalize_frame();

        // Keep polling background replies and animating progress.
        if !self.requests.pending.is_empty() || self.progress.is_visible() {
            let wait = self.progress.next_wakeup().unwrap_or(Duration::from_millis(100));
            ctx.request_repaint_after(wait.min(Duration::from_millis(100)));
        } else {
            ctx.request_repaint_after(self.config.health_interval);
        }
    }
}
