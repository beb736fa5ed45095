use eframe::egui;

use crate::projection;

use super::super::state::AppState;
use super::charts;

fn usage_table(ui: &mut egui::Ui, title: &str, rows: &[(String, usize)]) {
    if rows.is_empty() {
        return;
    }
    ui.strong(title);
    for (name, n) in rows {
        ui.monospace(format!("{:>6}  {}", n, name));
    }
    ui.add_space(6.0);
}

pub fn summary_panel(ui: &mut egui::Ui, state: &AppState) {
    let Some(res) = state.results.result.as_ref() else {
        ui.heading("Summary");
        ui.weak("No analysis yet.");
        return;
    };

    ui.horizontal(|ui| {
        ui.heading("Summary");
        if let Some(label) = state.results.source_label.as_deref() {
            ui.separator();
            ui.monospace(label);
        }
    });
    ui.add_space(4.0);

    ui.monospace(format!(
        "{:>10}  {:>12}  {:>12}",
        "status", "files", "crypto files"
    ));
    ui.monospace(format!(
        "{:>10}  {:>12}  {:>12}",
        if res.status.is_empty() { "-" } else { res.status.as_str() },
        res.total_files,
        res.crypto_files_found
    ));
    if !res.message.trim().is_empty() {
        ui.label(&res.message);
    }

    ui.separator();

    if let Some(series) = projection::chart_series(Some(res)) {
        ui.strong("Findings per file");
        charts::legend(ui);
        egui::ScrollArea::horizontal()
            .id_source("findings_chart")
            .show(ui, |ui| {
                charts::grouped_bars(ui, &series, 120.0);
            });
        ui.add_space(6.0);
        ui.strong(format!("Share of {} findings", series.grand_total()));
        charts::proportion_bar(ui, &series);
        ui.separator();
    }

    ui.columns(2, |cols| {
        let findings = projection::aggregate_findings(res);

        cols[0].strong(format!("Vulnerabilities ({})", findings.vulnerabilities.len()));
        if findings.vulnerabilities.is_empty() {
            cols[0].weak("None reported.");
        }
        for v in &findings.vulnerabilities {
            cols[0].colored_label(egui::Color32::from_rgb(230, 110, 100), format!("• {v}"));
        }

        cols[1].strong(format!("Recommendations ({})", findings.recommendations.len()));
        if findings.recommendations.is_empty() {
            cols[1].weak("None reported.");
        }
        for r in &findings.recommendations {
            cols[1].label(format!("• {r}"));
        }
    });

    ui.separator();

    ui.columns(2, |cols| {
        usage_table(&mut cols[0], "Algorithms", &projection::algorithm_usage(res));
        usage_table(&mut cols[1], "Security levels", &projection::security_levels(res));
    });
}
