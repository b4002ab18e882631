use crate::theme::Theme;
use crate::workbench::conversation::{ConversationLog, Role, PENDING_REPLY_LABEL};
use eframe::egui::{self, Align, Layout, RichText, ScrollArea};

pub const EMPTY_HINT: &str =
    "Ask me about Room DB, Kotlin flow, or Billing integration in this project.";

pub fn placeholder(context_label: Option<&str>) -> String {
    match context_label {
        Some(file) => format!("Ask about {file}..."),
        None => "Type a message...".to_string(),
    }
}

/// What the composer should do after this frame's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComposerAction {
    pub send: bool,
    pub refocus: bool,
}

/// Enter hands focus back to the text field even when the send is refused,
/// so typing can continue.
pub fn composer_action(
    submitted_with_enter: bool,
    clicked: bool,
    awaiting_reply: bool,
) -> ComposerAction {
    ComposerAction {
        send: (submitted_with_enter || clicked) && !awaiting_reply,
        refocus: submitted_with_enter,
    }
}

/// Draws the transcript and composer. Returns `true` when the user asked to
/// send the current input.
pub fn show(
    ui: &mut egui::Ui,
    conversation: &ConversationLog,
    context_label: Option<&str>,
    input_buffer: &mut String,
    theme: &Theme,
) -> bool {
    ui.label(
        RichText::new("DROID ASSISTANT")
            .color(theme.text_primary)
            .strong()
            .size(13.0),
    );
    ui.separator();

    let transcript_height = (ui.available_height() - 90.0).max(120.0);
    ScrollArea::vertical()
        .id_salt("chat_transcript")
        .max_height(transcript_height)
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if conversation.is_empty() {
                ui.add_space(theme.spacing_12);
                ui.label(RichText::new(EMPTY_HINT).color(theme.text_muted));
            }

            for entry in conversation.entries() {
                let (align, fill, color) = match entry.role {
                    Role::User => (Align::Max, theme.accent_primary, theme.text_on_accent),
                    Role::Assistant => (Align::Min, theme.surface_2, theme.text_primary),
                };
                ui.with_layout(Layout::top_down(align), |ui| {
                    ui.label(
                        RichText::new(entry.role.label())
                            .color(theme.text_muted)
                            .size(10.5),
                    );
                    theme.card_frame(fill).show(ui, |ui| {
                        ui.set_max_width(ui.available_width() * 0.9);
                        ui.label(RichText::new(&entry.text).color(color));
                    });
                });
                ui.add_space(theme.spacing_8);
            }

            if conversation.is_awaiting_reply() {
                ui.label(
                    RichText::new(PENDING_REPLY_LABEL)
                        .color(theme.text_muted)
                        .italics(),
                );
            }
        });

    ui.separator();
    let awaiting_reply = conversation.is_awaiting_reply();
    let mut action = ComposerAction::default();
    theme.composer_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(input_buffer)
                    .desired_width(ui.available_width() - 56.0)
                    .hint_text(placeholder(context_label)),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            let clicked = ui
                .add_enabled(
                    !awaiting_reply && !input_buffer.trim().is_empty(),
                    egui::Button::new("Send"),
                )
                .clicked();

            action = composer_action(submitted, clicked, awaiting_reply);
            if action.refocus {
                response.request_focus();
            }
        });
    });

    if let Some(file) = context_label {
        ui.label(
            RichText::new(format!("AI has context of {file}"))
                .color(theme.text_muted)
                .size(10.0),
        );
    }

    action.send
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_names_the_open_file() {
        assert_eq!(placeholder(Some("Cliente.kt")), "Ask about Cliente.kt...");
        assert_eq!(placeholder(None), "Type a message...");
    }

    #[test]
    fn enter_sends_and_keeps_focus_in_the_composer() {
        assert_eq!(
            composer_action(true, false, false),
            ComposerAction {
                send: true,
                refocus: true
            }
        );
    }

    #[test]
    fn enter_while_waiting_keeps_focus_without_sending() {
        assert_eq!(
            composer_action(true, false, true),
            ComposerAction {
                send: false,
                refocus: true
            }
        );
    }

    #[test]
    fn send_button_does_not_steal_focus_back() {
        assert_eq!(
            composer_action(false, true, false),
            ComposerAction {
                send: true,
                refocus: false
            }
        );
        assert_eq!(composer_action(false, false, false), ComposerAction::default());
    }
}
