use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use crate::projection::ChartSeries;

pub const FUNCTIONS_COLOR: Color32 = Color32::from_rgb(90, 160, 230);
pub const IMPORTS_COLOR: Color32 = Color32::from_rgb(120, 200, 120);
pub const PATTERNS_COLOR: Color32 = Color32::from_rgb(230, 170, 70);

const BAR_WIDTH: f32 = 10.0;
const GROUP_GAP: f32 = 14.0;
const LABEL_HEIGHT: f32 = 16.0;
const MAX_LABEL_CHARS: usize = 14;

fn shorten(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let head: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    format!("{head}…")
}

pub fn legend(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        for (name, color) in [
            ("functions", FUNCTIONS_COLOR),
            ("imports", IMPORTS_COLOR),
            ("patterns", PATTERNS_COLOR),
        ] {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
            ui.painter().rect_filled(rect, 2.0, color);
            ui.label(name);
            ui.add_space(8.0);
        }
    });
}

/// Per-file grouped bars: functions, imports, patterns.
pub fn grouped_bars(ui: &mut egui::Ui, series: &ChartSeries, height: f32) {
    let groups = series.labels.len();
    let group_w = BAR_WIDTH * 3.0 + GROUP_GAP;
    let width = (groups as f32 * group_w).max(ui.available_width().min(200.0));

    let (resp, painter) = ui.allocate_painter(Vec2::new(width, height + LABEL_HEIGHT), Sense::hover());
    let area = resp.rect;
    let plot = Rect::from_min_max(area.min, Pos2::new(area.max.x, area.max.y - LABEL_HEIGHT));

    let max = series
        .functions
        .iter()
        .chain(&series.imports)
        .chain(&series.patterns)
        .copied()
        .max()
        .unwrap_or(0)
        .max(1) as f32;

    let axis = ui.visuals().weak_text_color();
    painter.line_segment([plot.left_bottom(), plot.right_bottom()], Stroke::new(1.0, axis));

    let mut hovered: Option<usize> = None;
    let pointer = resp.hover_pos();

    for i in 0..groups {
        let x0 = plot.min.x + i as f32 * group_w + GROUP_GAP / 2.0;
        let vals = [
            (series.functions[i], FUNCTIONS_COLOR),
            (series.imports[i], IMPORTS_COLOR),
            (series.patterns[i], PATTERNS_COLOR),
        ];
        for (j, (v, color)) in vals.iter().enumerate() {
            let h = plot.height() * (*v as f32 / max);
            let left = x0 + j as f32 * BAR_WIDTH;
            let bar = Rect::from_min_max(
                Pos2::new(left, plot.max.y - h),
                Pos2::new(left + BAR_WIDTH - 1.0, plot.max.y),
            );
            painter.rect_filled(bar, 1.0, *color);
        }

        let group_rect = Rect::from_min_max(
            Pos2::new(x0, plot.min.y),
            Pos2::new(x0 + BAR_WIDTH * 3.0, area.max.y),
        );
        if pointer.is_some_and(|p| group_rect.contains(p)) {
            hovered = Some(i);
        }

        painter.text(
            Pos2::new(x0 + BAR_WIDTH * 1.5, area.max.y - 2.0),
            Align2::CENTER_BOTTOM,
            shorten(&series.labels[i]),
            FontId::proportional(10.0),
            ui.visuals().text_color(),
        );
    }

    if let Some(i) = hovered {
        resp.on_hover_text(format!(
            "{}\nfunctions: {}\nimports: {}\npatterns: {}",
            series.labels[i], series.functions[i], series.imports[i], series.patterns[i]
        ));
    }
}

/// One horizontal bar split by each category's share of all findings.
pub fn proportion_bar(ui: &mut egui::Ui, series: &ChartSeries) {
    let total = series.grand_total();
    let width = ui.available_width().max(120.0);
    let (resp, painter) = ui.allocate_painter(Vec2::new(width, 18.0), Sense::hover());
    let rect = resp.rect;

    if total == 0 {
        painter.rect_filled(rect, 3.0, ui.visuals().faint_bg_color);
        return;
    }

    let mut x = rect.min.x;
    for (v, color) in [
        (series.total_functions, FUNCTIONS_COLOR),
        (series.total_imports, IMPORTS_COLOR),
        (series.total_patterns, PATTERNS_COLOR),
    ] {
        if v == 0 {
            continue;
        }
        let w = rect.width() * (v as f32 / total as f32);
        let seg = Rect::from_min_max(Pos2::new(x, rect.min.y), Pos2::new(x + w, rect.max.y));
        painter.rect_filled(seg, 0.0, color);
        let pct = v as f32 * 100.0 / total as f32;
        if w > 40.0 {
            painter.text(
                seg.center(),
                Align2::CENTER_CENTER,
                format!("{pct:.0}%"),
                FontId::proportional(11.0),
                Color32::BLACK,
            );
        }
        x += w;
    }

    resp.on_hover_text(format!(
        "functions: {}\nimports: {}\npatterns: {}",
        series.total_functions, series.total_imports, series.total_patterns
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_labels_are_shortened() {
        assert_eq!(shorten("main.py"), "main.py");
        let s = shorten("a_really_long_module_name.py");
        assert_eq!(s.chars().count(), MAX_LABEL_CHARS);
        assert!(s.ends_with('…'));
    }
}
