use crate::project::Node;
use crate::theme::Theme;
use crate::workbench::explorer::TreeRow;
use eframe::egui::{self, RichText};
use std::sync::Arc;

pub fn row_marker(row: &TreeRow) -> &'static str {
    if !row.node.is_folder() {
        " "
    } else if row.expanded {
        "▾"
    } else {
        "▸"
    }
}

/// Draws the explorer rows and returns the node the user clicked, if any.
pub fn show(ui: &mut egui::Ui, rows: &[TreeRow], theme: &Theme) -> Option<Arc<Node>> {
    let mut activated = None;
    ui.spacing_mut().item_spacing.y = 2.0;

    for row in rows {
        ui.push_id(row.node.id(), |ui| {
            ui.horizontal(|ui| {
                ui.add_space(theme.spacing_4 + theme.indent_step * row.depth as f32);
                let color = if row.active {
                    theme.token_keyword
                } else if row.node.is_folder() {
                    theme.text_primary
                } else {
                    theme.text_muted
                };
                let text = RichText::new(format!("{} {}", row_marker(row), row.node.name()))
                    .color(color)
                    .size(12.5);
                if ui.selectable_label(row.active, text).clicked() {
                    activated = Some(Arc::clone(&row.node));
                }
            });
        });
    }

    activated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{Entry, Forest};
    use crate::workbench::explorer::Explorer;

    #[test]
    fn markers_follow_expansion_state() {
        let forest = Forest::from_entries(vec![Entry::folder(
            "root",
            "app",
            vec![Entry::file("strings", "strings.xml", "<resources/>")],
        )])
        .expect("forest should build");
        let mut explorer = Explorer::new();

        let rows = explorer.visible_rows(&forest);
        assert_eq!(row_marker(&rows[0]), "▾");
        assert_eq!(row_marker(&rows[1]), " ");

        let root = Arc::clone(&forest.roots()[0]);
        explorer.activate(&root);
        let rows = explorer.visible_rows(&forest);
        assert_eq!(row_marker(&rows[0]), "▸");
    }
}
