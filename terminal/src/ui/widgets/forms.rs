//! # Form Components
//!
//! Reusable form elements for consistent UI across screens

use crate::ui::theme::Theme;

/// Render a labelled single-line text input.
///
/// Returns the response of the text edit so callers can react to Enter.
pub fn render_text_input(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    hint: &str,
    password: bool,
    width: f32,
) -> egui::Response {
    ui.label(egui::RichText::new(label).size(14.0));
    ui.add_sized(
        [width, 28.0],
        egui::TextEdit::singleline(value)
            .password(password)
            .hint_text(hint),
    )
}

/// Render a styled button, disabled while `enabled` is false
pub fn render_button(
    ui: &mut egui::Ui,
    text: &str,
    fill_color: Option<egui::Color32>,
    enabled: bool,
    min_size: Option<egui::Vec2>,
) -> egui::Response {
    let mut button = egui::Button::new(egui::RichText::new(text).size(15.0));
    if let Some(color) = fill_color {
        button = button.fill(color);
    }
    if let Some(size) = min_size {
        button = button.min_size(size);
    }
    ui.add_enabled(enabled, button)
}

pub fn render_form_heading(ui: &mut egui::Ui, text: &str, theme: &Theme) {
    ui.label(egui::RichText::new(text).size(24.0).strong().color(theme.selected));
    ui.add_space(16.0);
}

pub fn render_error(ui: &mut egui::Ui, error: &str, theme: &Theme) {
    ui.label(egui::RichText::new(error).size(14.0).color(theme.error));
    ui.add_space(8.0);
}

pub fn render_hint(ui: &mut egui::Ui, hint: &str, theme: &Theme) {
    ui.label(egui::RichText::new(hint).size(13.0).color(theme.dim));
}

/// Checkbox row bound to a settings flag; returns true when toggled.
pub fn render_toggle(ui: &mut egui::Ui, value: &mut bool, label: &str, description: &str, theme: &Theme) -> bool {
    let changed = ui.checkbox(value, label).changed();
    ui.indent(label, |ui| render_hint(ui, description, theme));
    changed
}
