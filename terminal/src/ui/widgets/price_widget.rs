//! # Live Price Widget
//!
//! Symbol selector, current price with up/down indicator and a line chart of
//! the recent history for the selected symbol.

use egui_plot::{Line, Plot, PlotPoints};
use shared::{format_price, POPULAR_SYMBOLS};

use crate::app::{App, LivePriceState, PricePoint};
use crate::ui::theme::Theme;

/// Direction of the last tick relative to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Up,
    Down,
    Flat,
}

pub fn tick_direction(current: Option<f64>, previous: Option<f64>) -> Tick {
    match (current, previous) {
        (Some(now), Some(before)) if now > before => Tick::Up,
        (Some(now), Some(before)) if now < before => Tick::Down,
        _ => Tick::Flat,
    }
}

/// Chart points with x as seconds since the first sample.
pub fn chart_points(history: &[PricePoint]) -> Vec<[f64; 2]> {
    let origin = history.first().map(|p| p.time).unwrap_or(0.0);
    history.iter().map(|p| [p.time - origin, p.price]).collect()
}

pub fn render_price_widget(ui: &mut egui::Ui, live: &LivePriceState, app: &mut App, theme: &Theme) {
    egui::Frame::group(ui.style())
        .fill(theme.card)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(theme.dim, "Live Price");
                let mut selected = live.symbol.clone();
                egui::ComboBox::from_id_salt("live_price_symbol")
                    .selected_text(&selected)
                    .show_ui(ui, |ui| {
                        for symbol in POPULAR_SYMBOLS {
                            ui.selectable_value(&mut selected, symbol.to_string(), symbol);
                        }
                    });
                if selected != live.symbol {
                    app.select_live_symbol(selected);
                }
                if live.loading {
                    ui.spinner();
                }
            });

            match &live.current {
                Some(price) => {
                    let (arrow, color) = match tick_direction(Some(price.price), live.previous) {
                        Tick::Up => ("▲", theme.price_up),
                        Tick::Down => ("▼", theme.price_down),
                        Tick::Flat => ("", theme.normal),
                    };
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(format_price(price.price)).size(26.0).strong().color(color));
                        if !arrow.is_empty() {
                            ui.colored_label(color, arrow);
                        }
                        if let Some(change) = price.change_24h {
                            let (text, color) = theme.format_price_change(change);
                            ui.colored_label(color, format!("{} 24h", text));
                        }
                    });
                }
                None if live.loading => {
                    ui.label("Fetching price...");
                }
                None => {
                    ui.colored_label(theme.dim, "No price data");
                }
            }

            if let Some(error) = &live.error {
                ui.colored_label(theme.error, error);
            }

            if live.history.len() >= 2 {
                let points = chart_points(&live.history);
                let color = theme.price_change_color(
                    live.history[live.history.len() - 1].price - live.history[0].price,
                );
                Plot::new("live_price_chart")
                    .view_aspect(2.5)
                    .allow_scroll(false)
                    .show_x(false)
                    .show(ui, |plot_ui| {
                        plot_ui.line(
                            Line::new(live.symbol.as_str(), PlotPoints::from(points))
                                .color(color)
                                .width(2.0),
                        );
                    });
            }
        });
}
