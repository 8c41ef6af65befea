//! # Stats Cards
//!
//! Four tiles summarising the trade list: total trades, win rate, total P&L
//! and active positions.

use crate::ui::theme::Theme;
use shared::{format_signed_currency, TradeStats};

fn stat_tile(ui: &mut egui::Ui, label: &str, value: egui::RichText, theme: &Theme) {
    egui::Frame::group(ui.style())
        .fill(theme.card)
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_min_width(140.0);
            ui.colored_label(theme.dim, label);
            ui.label(value.size(20.0).strong());
        });
}

pub fn render_stats_cards(ui: &mut egui::Ui, stats: &TradeStats, theme: &Theme) {
    ui.horizontal_wrapped(|ui| {
        stat_tile(ui, "Total Trades", egui::RichText::new(stats.total_trades.to_string()), theme);
        stat_tile(ui, "Win Rate", egui::RichText::new(format!("{:.1}%", stats.win_rate)), theme);
        stat_tile(
            ui,
            "Total P&L",
            egui::RichText::new(format_signed_currency(stats.total_pnl))
                .color(theme.price_change_color(stats.total_pnl)),
            theme,
        );
        stat_tile(
            ui,
            "Active Positions",
            egui::RichText::new(stats.active_positions.to_string()),
            theme,
        );
    });
}
