use eframe::egui;
use egui_extras::syntax_highlighting::CodeTheme;

use super::AppState;

/// Applies dark visuals and the matching code theme on the first frame.
pub fn apply_once(ctx: &egui::Context, state: &mut AppState) {
    if state.ui.theme_seeded {
        return;
    }
    state.ui.theme_seeded = true;

    ctx.set_visuals(egui::Visuals::dark());
    state.theme.code_theme = CodeTheme::dark();
}
