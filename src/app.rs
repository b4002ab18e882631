use crate::assistant::AssistantClient;
use crate::config::AppConfig;
use crate::event::AppEvent;
use crate::theme::Theme;
use crate::ui::{chat, editor, explorer};
use crate::workbench::Workbench;
use eframe::egui::{self, Color32, RichText};
use std::sync::mpsc::{Receiver, TryRecvError};
use tracing::warn;

/// What the top bar says about the assistant backend.
#[derive(Debug, Clone)]
pub struct AssistantStatus {
    pub model: String,
    pub configured: bool,
}

impl AssistantStatus {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.model.clone(),
            configured: config.api_key.is_some(),
        }
    }

    fn label(&self) -> (String, Color32) {
        if self.configured {
            (format!("Gemini · {}", self.model), Color32::LIGHT_GREEN)
        } else {
            ("No API key".to_string(), Color32::YELLOW)
        }
    }
}

pub struct DroidArchitectApp {
    rx: Receiver<AppEvent>,
    assistant: AssistantClient,
    workbench: Workbench,
    theme: Theme,
    status: AssistantStatus,
    input_buffer: String,
    channel_closed: bool,
}

impl DroidArchitectApp {
    pub fn new(
        rx: Receiver<AppEvent>,
        assistant: AssistantClient,
        workbench: Workbench,
        theme: Theme,
        status: AssistantStatus,
    ) -> Self {
        Self {
            rx,
            assistant,
            workbench,
            theme,
            status,
            input_buffer: String::new(),
            channel_closed: false,
        }
    }

    fn drain_events(&mut self) {
        if self.channel_closed {
            return;
        }
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    self.workbench.apply(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("assistant event channel disconnected");
                    self.channel_closed = true;
                    break;
                }
            }
        }
    }

    fn start_analysis(&mut self) {
        if let Ok(request) = self.workbench.request_analysis() {
            self.assistant.analyze(request);
        }
    }

    fn submit_message(&mut self) {
        if let Ok(request) = self.workbench.send_message(&self.input_buffer) {
            self.assistant.send(request);
            self.input_buffer.clear();
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let (status_label, status_color) = self.status.label();
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("DroidArchitect AI");
                ui.separator();
                ui.label(RichText::new(status_label).color(status_color).size(12.0));
            });
        });
    }

    fn render_explorer(&mut self, ctx: &egui::Context) {
        let rows = self.workbench.visible_rows();
        let mut activated = None;
        egui::SidePanel::left("explorer_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.label(RichText::new("EXPLORER").color(self.theme.text_muted).size(11.0));
                ui.separator();
                egui::ScrollArea::vertical()
                    .id_salt("explorer_rows")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        activated = explorer::show(ui, &rows, &self.theme);
                    });
            });

        if let Some(node) = activated {
            self.workbench.activate(&node);
        }
    }

    fn render_chat_panel(&mut self, ctx: &egui::Context) {
        let mut send_now = false;
        egui::SidePanel::right("chat_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                let context_label = self
                    .workbench
                    .document()
                    .active_file()
                    .map(|node| node.name().to_string());
                send_now = chat::show(
                    ui,
                    self.workbench.conversation(),
                    context_label.as_deref(),
                    &mut self.input_buffer,
                    &self.theme,
                );
            });

        if send_now {
            self.submit_message();
        }
    }

    fn render_analysis_panel(&mut self, ctx: &egui::Context) {
        if self.workbench.document().last_analysis().is_empty() {
            return;
        }

        let mut dismissed = false;
        egui::TopBottomPanel::bottom("analysis_panel")
            .resizable(true)
            .default_height(220.0)
            .show(ctx, |ui| {
                dismissed = editor::show_analysis(
                    ui,
                    self.workbench.document().last_analysis(),
                    &self.theme,
                );
            });

        if dismissed {
            self.workbench.dismiss_analysis();
        }
    }

    fn render_editor(&mut self, ctx: &egui::Context) {
        let mut analyze = false;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.surface_0).inner_margin(8))
            .show(ctx, |ui| {
                analyze = editor::header(ui, self.workbench.document(), &self.theme);
                ui.separator();
                editor::show(ui, self.workbench.document(), &self.theme);
            });

        if analyze {
            self.start_analysis();
        }
    }
}

impl eframe::App for DroidArchitectApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        self.render_top_bar(ctx);
        self.render_explorer(ctx);
        self.render_chat_panel(ctx);
        self.render_analysis_panel(ctx);
        self.render_editor(ctx);
    }
}
