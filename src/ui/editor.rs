use crate::highlight::{classify_line, Dialect, TokenClass};
use crate::project::Node;
use crate::theme::Theme;
use crate::workbench::document::ActiveDocument;
use eframe::egui::{self, text::LayoutJob, Align, FontId, Layout, RichText, ScrollArea, TextFormat};

pub fn line_job(line: &str, dialect: Dialect, theme: &Theme) -> LayoutJob {
    let mut job = LayoutJob::default();
    let font_id = FontId::monospace(theme.code_size);

    for token in classify_line(line, dialect) {
        job.append(
            token.text,
            0.0,
            TextFormat {
                font_id: font_id.clone(),
                color: theme.token_color(token.class),
                italics: token.class == TokenClass::Comment,
                ..Default::default()
            },
        );
    }
    if job.text.is_empty() {
        job.append(
            " ",
            0.0,
            TextFormat {
                font_id,
                ..Default::default()
            },
        );
    }
    job
}

pub fn header(ui: &mut egui::Ui, document: &ActiveDocument, theme: &Theme) -> bool {
    let mut analyze = false;
    ui.horizontal(|ui| {
        match document.active_file() {
            Some(node) => {
                ui.label(RichText::new(node.path()).color(theme.text_primary).size(12.0));
                let dialect = Dialect::from_hint(node.language());
                let summary = format!("{} · {} lines", dialect.label(), document.line_count());
                ui.label(RichText::new(summary).color(theme.text_muted).size(11.0));
            }
            None => {
                ui.label(
                    RichText::new("Select a file to view source")
                        .color(theme.text_muted)
                        .italics()
                        .size(12.0),
                );
            }
        }

        if document.active_file().is_some() {
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let label = if document.is_analyzing() {
                    "Analyzing..."
                } else {
                    "AI Analyze"
                };
                let button = egui::Button::new(
                    RichText::new(label).color(theme.text_on_accent).size(11.0),
                )
                .fill(theme.accent_primary);
                analyze = ui
                    .add_enabled(document.can_request_analysis(), button)
                    .clicked();
            });
        }
    });
    analyze
}

fn show_source(ui: &mut egui::Ui, node: &Node, theme: &Theme) {
    let width = node.line_count().to_string().len();
    let dialect = Dialect::from_hint(node.language());
    ScrollArea::both()
        .id_salt("editor_source")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing.y = 0.0;
            for (index, line) in node.lines().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("{:>width$}", index + 1))
                            .monospace()
                            .color(theme.text_muted),
                    );
                    ui.add_space(theme.spacing_12);
                    ui.label(line_job(line, dialect, theme));
                });
            }
        });
}

pub fn show(ui: &mut egui::Ui, document: &ActiveDocument, theme: &Theme) {
    match document.active_file() {
        Some(node) => show_source(ui, node, theme),
        None => {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("Select a file from the explorer to begin")
                        .color(theme.text_muted),
                );
            });
        }
    }
}

/// Draws the insights panel. Returns `true` when the user closed it.
pub fn show_analysis(ui: &mut egui::Ui, analysis: &str, theme: &Theme) -> bool {
    let mut dismissed = false;
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("AI INSIGHTS")
                .color(theme.token_keyword)
                .strong()
                .size(12.0),
        );
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            dismissed = ui.small_button("✕").clicked();
        });
    });
    ui.add_space(theme.spacing_4);
    ScrollArea::vertical()
        .id_salt("analysis_text")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.label(RichText::new(analysis).color(theme.text_primary));
        });
    dismissed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_job_keeps_text_and_colors_tokens() {
        let theme = Theme::default();
        let job = line_job("val nome: String", Dialect::Kotlin, &theme);
        assert_eq!(job.text, "val nome: String");
        assert_eq!(job.sections[0].format.color, theme.token_keyword);
        let last = job.sections.last().expect("job has sections");
        assert_eq!(last.format.color, theme.token_type);
    }

    #[test]
    fn empty_line_still_occupies_a_row() {
        let job = line_job("", Dialect::Kotlin, &Theme::default());
        assert_eq!(job.text, " ");
    }

    #[test]
    fn comments_are_italic() {
        let theme = Theme::default();
        let job = line_job("// Billing", Dialect::Kotlin, &theme);
        assert!(job.sections[0].format.italics);
        assert_eq!(job.sections[0].format.color, theme.token_comment);
    }

    #[test]
    fn xml_lines_are_not_coloured_as_kotlin() {
        let theme = Theme::default();
        let job = line_job("<data android:name=\"x\"/>", Dialect::Xml, &theme);
        let data = job
            .sections
            .iter()
            .find(|section| &job.text[section.byte_range.clone()] == "data")
            .expect("tag name has its own section");
        assert_eq!(data.format.color, theme.text_primary);
    }
}
