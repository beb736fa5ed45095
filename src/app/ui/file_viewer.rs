// src/app/ui/file_viewer.rs
// Read-only findings view for the selected file: tabs for each finding kind,
// highlighted snippets, and the AI review when one exists.
use eframe::egui;
use egui_extras::syntax_highlighting::highlight;

use crate::format;
use crate::model::{BasicCryptoAnalysis, CryptoItem, GeminiReview};
use crate::projection::{self, FindingsTab};

use super::helpers::language_hint;
use super::super::actions::Action;
use super::super::state::AppState;

fn item_rows(ui: &mut egui::Ui, items: &[CryptoItem], lang: &str, ctx: &egui::Context, state: &AppState) {
    egui::Grid::new("crypto_items")
        .num_columns(3)
        .striped(true)
        .show(ui, |ui| {
            ui.strong("Line");
            ui.strong("Name");
            ui.strong("Source");
            ui.end_row();

            for it in items {
                ui.monospace(format::line_label(it.line_start));
                let name = it.name.as_deref().unwrap_or("(unnamed)");
                match it.kind.as_deref() {
                    Some(k) if !k.is_empty() => ui.label(format!("{name}  ({k})")),
                    _ => ui.label(name),
                };
                match it.content.as_deref() {
                    Some(code) if !code.trim().is_empty() => {
                        let job = highlight(ctx, &state.theme.code_theme, code.trim_end(), lang);
                        ui.label(job);
                    }
                    _ => {
                        ui.weak("-");
                    }
                }
                ui.end_row();
            }
        });
}

fn map_rows(ui: &mut egui::Ui, rows: &[serde_json::Map<String, serde_json::Value>]) {
    for (i, m) in rows.iter().enumerate() {
        ui.horizontal_wrapped(|ui| {
            ui.monospace(format!("{:>3}.", i + 1));
            ui.label(format::format_finding_map(m));
        });
    }
}

fn snippets(ui: &mut egui::Ui, a: &BasicCryptoAnalysis, lang: &str, ctx: &egui::Context, state: &AppState) {
    for s in &a.code_snippets {
        let title = format!(
            "{}  {}{}",
            format::line_label(s.line_start),
            s.name.as_deref().unwrap_or("snippet"),
            s.kind.as_deref().map(|k| format!("  ({k})")).unwrap_or_default()
        );
        ui.strong(title);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            let code = s.code.as_deref().unwrap_or("");
            let job = highlight(ctx, &state.theme.code_theme, code, lang);
            ui.label(job);
        });
        ui.add_space(6.0);
    }
}

fn bullet_list(ui: &mut egui::Ui, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    ui.strong(title);
    for s in items {
        ui.label(format!("• {s}"));
    }
    ui.add_space(4.0);
}

fn review(ui: &mut egui::Ui, r: &GeminiReview) {
    let s = &r.crypto_summary;
    if !s.security_level.is_empty() {
        ui.horizontal(|ui| {
            ui.label("Security level:");
            ui.strong(&s.security_level);
        });
        ui.add_space(4.0);
    }
    bullet_list(ui, "Algorithms used", &s.algorithms_used);
    bullet_list(ui, "Crypto functions", &s.crypto_functions_identified);
    bullet_list(ui, "Data being hashed", &s.data_being_hashed);
    bullet_list(ui, "Vulnerabilities", &s.vulnerabilities);
    bullet_list(ui, "Recommendations", &s.recommendations);

    if !r.gemini_analysis.trim().is_empty() {
        ui.separator();
        ui.add(egui::Label::new(r.gemini_analysis.as_str()).wrap(true));
    }
}

pub fn file_viewer(ctx: &egui::Context, ui: &mut egui::Ui, state: &AppState) -> Vec<Action> {
    let mut actions = vec![];

    let Some(res) = state.results.result.as_ref() else {
        ui.label("Run an analysis, then click a file in the tree to inspect its findings.");
        return actions;
    };

    let Some(path) = state.viewer.selected_file.as_deref() else {
        ui.label("Click a file in the tree to inspect its findings.");
        return actions;
    };

    ui.horizontal(|ui| {
        ui.label("File:");
        ui.monospace(path);
    });

    let Some(a) = projection::find_file(res, path) else {
        ui.weak("This file was not part of the analysis.");
        return actions;
    };
    let rev = projection::find_review(res, path);

    ui.horizontal(|ui| {
        if a.has_crypto {
            ui.colored_label(egui::Color32::from_rgb(230, 180, 60), "uses cryptography");
        } else {
            ui.weak("no cryptography detected");
        }
        ui.separator();
        ui.label(format!("{} findings", projection::file_finding_count(a)));
    });

    ui.separator();

    let tabs = projection::available_tabs(a, rev);
    if tabs.is_empty() {
        ui.weak("Nothing to show for this file.");
        return actions;
    }
    let current = projection::select_tab(state.viewer.tab, &tabs);

    ui.horizontal(|ui| {
        for t in &tabs {
            if ui.selectable_label(current == Some(*t), t.label()).clicked() {
                actions.push(Action::SelectTab(*t));
            }
        }
    });

    ui.add_space(6.0);

    let lang = language_hint(&a.file_path, &a.file_extension);

    egui::ScrollArea::both()
        .id_source(("findings_scroll", path))
        .auto_shrink([false, false])
        .show(ui, |ui| match current {
            Some(FindingsTab::Imports) => item_rows(ui, &a.crypto_imports, lang, ctx, state),
            Some(FindingsTab::Functions) => item_rows(ui, &a.crypto_functions, lang, ctx, state),
            Some(FindingsTab::Patterns) => map_rows(ui, &a.crypto_patterns_found),
            Some(FindingsTab::Algorithms) => map_rows(ui, &a.crypto_algorithms_detected),
            Some(FindingsTab::Snippets) => snippets(ui, a, lang, ctx, state),
            Some(FindingsTab::Review) => {
                if let Some(r) = rev {
                    review(ui, r);
                }
            }
            None => {}
        });

    actions
}
