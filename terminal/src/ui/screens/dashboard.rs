//! # Dashboard Screen
//!
//! Wallet balance, trade statistics, order entry, live price and the most
//! recent trades.

use shared::{format_price, format_timestamp};

use crate::app::{App, AppState, Screen};
use crate::ui::theme::Theme;
use crate::ui::widgets::{price_widget, stats_cards, tables, trade_form, wallet_card};

/// Trades listed under "Recent Trades".
const RECENT_TRADES: usize = 5;

pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut App) {
    let theme = Theme::default();

    egui::ScrollArea::vertical().show(ui, |ui| {
        if let Some(user) = &state.store.auth.user {
            ui.heading(format!("Welcome back, {}", user.display_name()));
            ui.add_space(8.0);
        }

        ui.horizontal_top(|ui| {
            if wallet_card::render_wallet_card(ui, &state.store.wallet, &theme) {
                app.fetch_wallet(true);
            }
            ui.add_space(8.0);
            stats_cards::render_stats_cards(ui, &state.store.stats(), &theme);
        });

        ui.add_space(12.0);

        ui.columns(2, |columns| {
            let last_price = state
                .live_price
                .current
                .as_ref()
                .filter(|p| p.symbol == state.trade_form.symbol)
                .map(|p| p.price);
            trade_form::render_trade_form(&mut columns[0], &state.trade_form, last_price, app, &theme);
            price_widget::render_price_widget(&mut columns[1], &state.live_price, app, &theme);
        });

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Recent Trades").size(18.0).strong());
            if ui.link("View all").clicked() {
                app.handle_screen_change(Screen::Trades);
            }
        });

        let recent = state.store.trades.recent(RECENT_TRADES);
        if recent.is_empty() {
            let hint = if state.store.trades.loading { "Loading trades..." } else { "No trades yet" };
            tables::render_empty_state(ui, hint, Some("Place your first trade above."), &theme);
            return;
        }

        tables::render_table(
            ui,
            "recent_trades",
            tables::TableConfig { num_columns: 6, ..Default::default() },
            &["Pair", "Side", "Qty", "Price", "P&L", "Opened"],
            &theme,
            |ui| {
                for trade in recent {
                    ui.label(&trade.symbol);
                    tables::render_side_cell(ui, trade.side, &theme);
                    ui.label(trade.quantity.to_string());
                    ui.label(format_price(trade.price));
                    tables::render_pnl_cell(ui, trade, "open", &theme);
                    ui.label(format_timestamp(&trade.created_at));
                    ui.end_row();
                }
            },
        );
    });
}
