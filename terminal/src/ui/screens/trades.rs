//! # Trades Screen
//!
//! Full trade history with summary counts and close actions for open trades.

use egui_extras::{Column, TableBuilder};
use shared::{format_price, format_timestamp};

use crate::app::{App, AppState};
use crate::ui::theme::Theme;
use crate::ui::widgets::{stats_cards, tables};

pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut App) {
    let theme = Theme::default();
    let trades = &state.store.trades;
    let stats = state.store.stats();

    ui.horizontal(|ui| {
        ui.heading("Trade History");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if trades.loading {
                ui.spinner();
            } else if ui.button("Refresh").clicked() {
                app.refresh_trades();
            }
        });
    });
    ui.add_space(8.0);

    stats_cards::render_stats_cards(ui, &stats, &theme);
    ui.add_space(6.0);
    tables::render_stats_summary(ui, &[("Open", stats.open_trades()), ("Closed", stats.closed_trades())]);

    if let Some(error) = &trades.error {
        ui.colored_label(theme.error, error);
    }
    ui.add_space(8.0);

    if trades.trades.is_empty() {
        let hint = if trades.loading { "Loading trades..." } else { "No trades yet" };
        tables::render_empty_state(ui, hint, Some("Trades placed from the dashboard appear here."), &theme);
        return;
    }

    let mut close_clicked: Option<String> = None;
    let rows = trades.recent(trades.trades.len());
    let busy = trades.closing_trade_id.is_some();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(80.0))
        .columns(Column::auto().at_least(60.0), 5)
        .column(Column::auto().at_least(130.0))
        .column(Column::remainder().at_least(110.0))
        .header(22.0, |mut header| {
            for title in ["Pair", "Side", "Qty", "Entry", "Status", "P&L", "Opened", ""] {
                header.col(|ui| {
                    ui.colored_label(theme.dim, egui::RichText::new(title).strong());
                });
            }
        })
        .body(|body| {
            body.rows(24.0, rows.len(), |mut row| {
                let trade = rows[row.index()];
                row.col(|ui| {
                    ui.label(&trade.symbol);
                });
                row.col(|ui| {
                    tables::render_side_cell(ui, trade.side, &theme);
                });
                row.col(|ui| {
                    ui.label(trade.quantity.to_string());
                });
                row.col(|ui| {
                    ui.label(format_price(trade.price));
                });
                row.col(|ui| {
                    ui.label(trade.status.as_str());
                });
                row.col(|ui| {
                    tables::render_pnl_cell(ui, trade, "-", &theme);
                });
                row.col(|ui| {
                    ui.label(format_timestamp(&trade.created_at)).on_hover_text(&trade.id);
                });
                row.col(|ui| {
                    if trade.is_open() {
                        if trades.is_closing(&trade.id) {
                            ui.spinner();
                            ui.label("Closing...");
                        } else if ui.add_enabled(!busy, egui::Button::new("Close")).clicked() {
                            close_clicked = Some(trade.id.clone());
                        }
                    } else if let Some(at) = &trade.closed_at {
                        ui.colored_label(theme.dim, format!("closed {}", format_timestamp(at)));
                    }
                });
            });
        });

    if let Some(id) = close_clicked {
        app.handle_close_trade(id);
    }
}
