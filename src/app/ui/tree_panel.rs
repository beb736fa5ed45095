use std::collections::HashMap;

use eframe::egui;

use crate::format;
use crate::model::TreeNode;
use crate::projection;
use crate::tree;

use super::super::actions::{Action, ExpandCmd};
use super::super::state::AppState;

struct TreeCtx<'a> {
    counts: &'a HashMap<String, usize>,
    folder_counts: &'a HashMap<String, usize>,
    filter: &'a str,
    show_counts: bool,
    selected: Option<&'a str>,
    expand_cmd: Option<ExpandCmd>,
}

fn subtree_matches(node: &TreeNode, filter: &str) -> bool {
    if filter.is_empty() || format::contains_case_insensitive(&node.path, filter) {
        return true;
    }
    node.children().iter().any(|c| subtree_matches(c, filter))
}

fn file_row(ui: &mut egui::Ui, cx: &TreeCtx, node: &TreeNode, actions: &mut Vec<Action>) {
    let count = cx.counts.get(&node.path).copied();
    let unsupported = node.supported == Some(false);

    ui.horizontal(|ui| {
        if cx.show_counts {
            match count {
                Some(n) if n > 0 => ui.monospace(format!("{:>4}", n)),
                _ => ui.monospace("    "),
            };
        }

        let mut text = egui::RichText::new(&node.name);
        if unsupported {
            text = text.weak();
        } else if count.is_some() {
            text = text.color(ui.visuals().hyperlink_color);
        }

        let selected = cx.selected == Some(node.path.as_str());
        let resp = ui
            .add(egui::SelectableLabel::new(selected, text))
            .on_hover_text(&node.path)
            .on_hover_cursor(egui::CursorIcon::PointingHand);

        if resp.clicked() {
            actions.push(Action::OpenFile(node.path.clone()));
        }
    });
}

fn show_dir(ui: &mut egui::Ui, cx: &TreeCtx, node: &TreeNode, actions: &mut Vec<Action>) {
    // Stable ID independent of ui id-stack (prevents expansion reset on layout changes).
    let id = egui::Id::new(("dir", node.path.as_str()));

    let badge = if cx.show_counts {
        let n = projection::folder_total(cx.folder_counts, &node.path);
        if n > 0 {
            format!("  [{}]", n)
        } else {
            String::new()
        }
    } else {
        String::new()
    };
    let label = format!("{}/{}", node.name, badge);

    let mut st = egui::collapsing_header::CollapsingState::load_with_default_open(ui.ctx(), id, node.level == 0);

    if let Some(cmd) = cx.expand_cmd {
        match cmd {
            ExpandCmd::ExpandAll => st.set_open(true),
            ExpandCmd::CollapseAll => st.set_open(false),
        }
    }

    st.show_header(ui, |ui| {
        ui.add(egui::Label::new(label).wrap(false));
    })
    .body(|ui| {
        show_nodes(ui, cx, node.children(), actions);
    });
}

fn show_nodes(ui: &mut egui::Ui, cx: &TreeCtx, nodes: &[TreeNode], actions: &mut Vec<Action>) {
    for n in nodes {
        if !subtree_matches(n, cx.filter) {
            continue;
        }
        if n.is_folder() {
            show_dir(ui, cx, n, actions);
        } else {
            file_row(ui, cx, n, actions);
        }
    }
}

pub fn tree_panel(ui: &mut egui::Ui, state: &mut AppState) -> Vec<Action> {
    let mut actions = vec![];

    ui.horizontal(|ui| {
        ui.heading("Files");
        if !state.tree.nodes.is_empty() {
            let mut files = Vec::new();
            tree::collect_file_paths(&state.tree.nodes, &mut files);
            ui.weak(format!("{} files", files.len()));
        }
    });

    ui.horizontal(|ui| {
        ui.checkbox(&mut state.ui.show_counts, "Counts");

        ui.separator();

        if ui.button("Expand all").clicked() {
            actions.push(Action::ExpandAll);
        }
        if ui.button("Collapse all").clicked() {
            actions.push(Action::CollapseAll);
        }
    });
    ui.add(
        egui::TextEdit::singleline(&mut state.ui.filter_text)
            .hint_text("Filter files")
            .desired_width(f32::INFINITY),
    );

    ui.add_space(6.0);

    if state.tree.nodes.is_empty() {
        ui.weak("Preview a directory or run an analysis to see files.");
        return actions;
    }

    let cx = TreeCtx {
        counts: &state.results.file_counts,
        folder_counts: &state.results.folder_counts,
        filter: state.ui.filter_text.trim(),
        show_counts: state.ui.show_counts,
        selected: state.viewer.selected_file.as_deref(),
        expand_cmd: state.tree.expand_cmd,
    };

    ui.push_id("tree_panel", |ui| {
        egui::ScrollArea::both()
            .id_source("tree_scroll_both")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                show_nodes(ui, &cx, &state.tree.nodes, &mut actions);
            });
    });

    // Consume one-shot expand/collapse so it doesn't keep forcing open/close every frame.
    state.tree.expand_cmd = None;

    actions
}
