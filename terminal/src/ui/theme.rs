//! # GUI Theme
//!
//! Dark trading-terminal palette with green/red price colouring, plus a light
//! variant selected from the user's profile preference.

use egui::{Color32, Context, Stroke, Visuals};
use egui::Theme as EguiTheme;
use shared::ThemePreference;

/// Colour palette used by every screen
#[derive(Debug, Clone)]
pub struct Theme {
    /// Normal text color
    pub normal: Color32,
    /// Accent for headings, selected tabs and primary buttons
    pub selected: Color32,
    pub border: Color32,
    /// Dimmed/secondary text
    pub dim: Color32,
    pub success: Color32,
    pub error: Color32,
    pub warning: Color32,
    pub info: Color32,
    /// Price up (green)
    pub price_up: Color32,
    /// Price down (red)
    pub price_down: Color32,
    pub background: Color32,
    /// Card fill for stat tiles and panels
    pub card: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            normal: Color32::from_rgb(230, 232, 236),
            selected: Color32::from_rgb(59, 130, 246),   // #3B82F6
            border: Color32::from_rgb(51, 56, 66),
            dim: Color32::from_rgb(148, 153, 163),
            success: Color32::from_rgb(34, 197, 94),     // #22C55E
            error: Color32::from_rgb(239, 68, 68),       // #EF4444
            warning: Color32::from_rgb(245, 158, 11),
            info: Color32::from_rgb(100, 150, 255),
            price_up: Color32::from_rgb(34, 197, 94),
            price_down: Color32::from_rgb(239, 68, 68),
            background: Color32::from_rgb(13, 15, 20),
            card: Color32::from_rgb(24, 27, 34),
        }
    }
}

impl Theme {
    /// Get color for a signed change (price move or P&L)
    pub fn price_change_color(&self, change: f64) -> Color32 {
        if change > 0.0 {
            self.price_up
        } else if change < 0.0 {
            self.price_down
        } else {
            self.dim
        }
    }

    /// Format percentage change with color
    pub fn format_price_change(&self, change: f64) -> (String, Color32) {
        (shared::format_percent_change(change), self.price_change_color(change))
    }

    pub fn dark_visuals(&self) -> Visuals {
        let mut visuals = Visuals::dark();
        visuals.override_text_color = Some(self.normal);
        visuals.panel_fill = self.background;
        visuals.window_fill = self.card;
        visuals.extreme_bg_color = Color32::from_rgb(8, 9, 12);
        visuals.faint_bg_color = self.card;
        visuals.window_stroke = Stroke::new(1.0, self.border);

        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(32, 36, 44);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.5, self.selected);
        visuals.widgets.active.bg_stroke = Stroke::new(2.0, self.selected);

        visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(59, 130, 246, 90);
        visuals.selection.stroke = Stroke::new(1.5, self.selected);
        visuals.hyperlink_color = self.info;
        visuals
    }

    /// Apply the visuals matching the user's theme preference.
    ///
    /// `System` leaves the choice to the OS via egui's theme preference.
    pub fn apply(ctx: &Context, preference: ThemePreference) {
        let theme = Theme::default();
        let dark = theme.dark_visuals();

        ctx.style_mut_of(EguiTheme::Dark, |style| {
            style.visuals = dark.clone();
            style.spacing.item_spacing = egui::vec2(8.0, 6.0);
            style.spacing.button_padding = egui::vec2(10.0, 5.0);
        });
        ctx.style_mut_of(EguiTheme::Light, |style| {
            style.visuals = Visuals::light();
            style.spacing.item_spacing = egui::vec2(8.0, 6.0);
            style.spacing.button_padding = egui::vec2(10.0, 5.0);
        });

        let egui_preference = match preference {
            ThemePreference::Dark => egui::ThemePreference::Dark,
            ThemePreference::Light => egui::ThemePreference::Light,
            ThemePreference::System => egui::ThemePreference::System,
        };
        ctx.set_theme(egui_preference);
        tracing::debug!(?preference, "Applied theme");
    }
}
