//! # Wallet Screen
//!
//! Balance card, deposit/withdraw form and the transaction history.

use shared::{format_currency, format_timestamp, TransferKind};

use crate::app::{App, AppState};
use crate::ui::theme::Theme;
use crate::ui::widgets::{forms, tables, wallet_card};

/// Preset amounts offered next to the amount field.
const QUICK_AMOUNTS: [f64; 4] = [100.0, 500.0, 1_000.0, 5_000.0];

pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut App) {
    let theme = Theme::default();
    let screen = &state.wallet_screen;

    ui.heading("Wallet");
    ui.add_space(8.0);

    ui.horizontal_top(|ui| {
        if wallet_card::render_wallet_card(ui, &state.store.wallet, &theme) {
            app.fetch_wallet(true);
            app.fetch_transactions();
        }
        ui.add_space(12.0);

        egui::Frame::group(ui.style())
            .fill(theme.card)
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Transfer Funds").size(18.0).strong());
                forms::render_hint(ui, "Virtual funds only. No real money moves.", &theme);
                ui.add_space(6.0);

                let mut amount = screen.amount.clone();
                forms::render_text_input(ui, "Amount", &mut amount, "0.00", false, 220.0);
                ui.horizontal(|ui| {
                    for quick in QUICK_AMOUNTS {
                        if ui.small_button(format_currency(quick)).clicked() {
                            amount = format!("{}", quick);
                        }
                    }
                });
                if amount != screen.amount {
                    app.state.write().wallet_screen.amount = amount;
                }

                ui.add_space(6.0);
                let busy = screen.pending_transfer.is_some();
                ui.horizontal(|ui| {
                    let deposit_label = match screen.pending_transfer {
                        Some(TransferKind::Deposit) => "Depositing...",
                        _ => "Deposit",
                    };
                    if forms::render_button(ui, deposit_label, Some(theme.price_up), !busy, Some(egui::vec2(105.0, 30.0))).clicked() {
                        app.handle_transfer(TransferKind::Deposit);
                    }
                    let withdraw_label = match screen.pending_transfer {
                        Some(TransferKind::Withdraw) => "Withdrawing...",
                        _ => "Withdraw",
                    };
                    if forms::render_button(ui, withdraw_label, Some(theme.price_down), !busy, Some(egui::vec2(105.0, 30.0))).clicked() {
                        app.handle_transfer(TransferKind::Withdraw);
                    }
                });
            });
    });

    ui.add_space(16.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Transactions").size(18.0).strong());
        if screen.transactions_loading {
            ui.spinner();
        }
    });

    if screen.transactions.is_empty() {
        let hint = if screen.transactions_loading { "Loading transactions..." } else { "No transactions yet" };
        tables::render_empty_state(ui, hint, None, &theme);
        return;
    }

    tables::render_table(
        ui,
        "wallet_transactions",
        tables::TableConfig {
            num_columns: 3,
            scrollable: true,
            ..Default::default()
        },
        &["Type", "Amount", "Date"],
        &theme,
        |ui| {
            for tx in &screen.transactions {
                let (label, color) = match tx.kind {
                    TransferKind::Deposit => ("Deposit", theme.price_up),
                    TransferKind::Withdraw => ("Withdraw", theme.price_down),
                };
                ui.colored_label(color, label);
                let signed = tx.signed_amount();
                let sign = if signed < 0.0 { "-" } else { "+" };
                ui.colored_label(color, format!("{}{}", sign, format_currency(signed.abs())));
                ui.label(format_timestamp(&tx.date));
                ui.end_row();
            }
        },
    );
}
