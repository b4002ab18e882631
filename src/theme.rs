use crate::highlight::TokenClass;
use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub surface_0: Color32,
    pub surface_1: Color32,
    pub surface_2: Color32,
    pub surface_3: Color32,
    pub accent_primary: Color32,
    pub accent_muted: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub text_on_accent: Color32,
    pub token_keyword: Color32,
    pub token_annotation: Color32,
    pub token_literal: Color32,
    pub token_comment: Color32,
    pub token_type: Color32,
    pub spacing_4: f32,
    pub spacing_8: f32,
    pub spacing_12: f32,
    pub indent_step: f32,
    pub radius_8: u8,
    pub radius_12: u8,
    pub code_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface_0: Color32::from_rgb(0x02, 0x06, 0x17),
            surface_1: Color32::from_rgb(0x0F, 0x17, 0x2A),
            surface_2: Color32::from_rgb(0x1E, 0x29, 0x3B),
            surface_3: Color32::from_rgb(0x33, 0x41, 0x55),
            accent_primary: Color32::from_rgb(0x25, 0x63, 0xEB),
            accent_muted: Color32::from_rgb(0x1D, 0x4E, 0xD8),
            text_primary: Color32::from_rgb(0xCB, 0xD5, 0xE1),
            text_muted: Color32::from_rgb(0x64, 0x74, 0x8B),
            text_on_accent: Color32::from_rgb(0xF8, 0xFB, 0xFF),
            token_keyword: Color32::from_rgb(0x60, 0xA5, 0xFA),
            token_annotation: Color32::from_rgb(0xEA, 0xB3, 0x08),
            token_literal: Color32::from_rgb(0x4A, 0xDE, 0x80),
            token_comment: Color32::from_rgb(0x64, 0x74, 0x8B),
            token_type: Color32::from_rgb(0xC0, 0x84, 0xFC),
            spacing_4: 4.0,
            spacing_8: 8.0,
            spacing_12: 12.0,
            indent_step: 12.0,
            radius_8: 8,
            radius_12: 12,
            code_size: 13.0,
        }
    }
}

impl Theme {
    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = self.surface_1;
        visuals.extreme_bg_color = self.surface_0;
        visuals.override_text_color = Some(self.text_primary);
        visuals.widgets.noninteractive.bg_fill = self.surface_1;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.surface_2);
        visuals.widgets.inactive.bg_fill = self.surface_2;
        visuals.widgets.inactive.weak_bg_fill = self.surface_2;
        visuals.widgets.inactive.bg_stroke = Stroke::NONE;
        visuals.widgets.hovered.bg_fill = self.surface_3;
        visuals.widgets.hovered.weak_bg_fill = self.surface_3;
        visuals.widgets.active.bg_fill = self.accent_muted;
        visuals.selection.bg_fill = self.surface_2;
        visuals.selection.stroke = Stroke::new(1.0, self.token_keyword);
        visuals.hyperlink_color = self.accent_primary;

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 5.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(16.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Monospace, FontId::monospace(self.code_size));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(11.0));
        ctx.set_style(style);
    }

    pub fn token_color(&self, class: TokenClass) -> Color32 {
        match class {
            TokenClass::Plain => self.text_primary,
            TokenClass::Keyword => self.token_keyword,
            TokenClass::Annotation => self.token_annotation,
            TokenClass::Literal => self.token_literal,
            TokenClass::Comment => self.token_comment,
            TokenClass::TypeName => self.token_type,
        }
    }

    pub fn card_frame(&self, fill: Color32) -> Frame {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(self.spacing_12 as i8))
            .corner_radius(CornerRadius::same(self.radius_12))
            .stroke(Stroke::NONE)
    }

    pub fn composer_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_2)
            .inner_margin(Margin::symmetric(self.spacing_8 as i8, 6))
            .corner_radius(CornerRadius::same(self.radius_8))
            .stroke(Stroke::NONE)
    }
}
