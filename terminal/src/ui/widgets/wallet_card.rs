//! # Wallet Card
//!
//! Balance summary shown on the dashboard and wallet screens.

use crate::app::store::WalletSlice;
use crate::ui::theme::Theme;
use shared::{format_currency, format_timestamp};

/// Render the balance card. Returns true when the refresh button was clicked.
pub fn render_wallet_card(ui: &mut egui::Ui, wallet: &WalletSlice, theme: &Theme) -> bool {
    let mut refresh = false;

    egui::Frame::group(ui.style())
        .fill(theme.card)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_min_width(260.0);
            ui.horizontal(|ui| {
                ui.colored_label(theme.dim, "Wallet Balance");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if wallet.loading {
                        ui.spinner();
                    } else if ui.small_button("⟳").on_hover_text("Refresh").clicked() {
                        refresh = true;
                    }
                });
            });

            match &wallet.wallet {
                Some(w) => {
                    ui.label(egui::RichText::new(format_currency(w.balance)).size(28.0).strong());
                    ui.horizontal(|ui| {
                        ui.colored_label(theme.dim, &w.currency);
                        if wallet.daily_change != 0.0 {
                            let (text, color) = theme.format_price_change(wallet.daily_change);
                            ui.colored_label(color, format!("{} today", text));
                        }
                    });
                    if !w.last_updated.is_empty() {
                        ui.colored_label(theme.dim, format!("Updated {}", format_timestamp(&w.last_updated)));
                    }
                }
                None if wallet.loading => {
                    ui.label("Loading wallet...");
                }
                None => {
                    ui.colored_label(theme.dim, "No wallet data");
                }
            }

            if let Some(error) = &wallet.error {
                ui.colored_label(theme.error, error);
            }
        });

    refresh
}
