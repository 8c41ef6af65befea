//! # Status Bar Widget
//!
//! Bottom status bar showing the live feed state, last price update and the
//! signed-in account.

use crate::app::AppState;
use crate::services::api::PriceFeedStatus;
use crate::ui::theme::Theme;

pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    let theme = Theme::default();

    ui.horizontal(|ui| {
        let status = state.live_price.feed_status;
        let color = match status {
            PriceFeedStatus::Connected => theme.success,
            PriceFeedStatus::Connecting | PriceFeedStatus::Reconnecting { .. } => theme.warning,
            PriceFeedStatus::Disabled => theme.error,
            PriceFeedStatus::Disconnected => theme.dim,
        };
        ui.colored_label(color, "●");
        ui.colored_label(color, status.label());

        ui.separator();

        match state.live_price.last_update {
            Some(at) => {
                let secs = at.elapsed().as_secs();
                let text = if secs < 60 {
                    format!("{}s ago", secs)
                } else {
                    format!("{}m ago", secs / 60)
                };
                ui.label(format!("{}: {}", state.live_price.symbol, text));
            }
            None => {
                ui.colored_label(theme.dim, "No price yet");
            }
        }

        if state.store.trades.loading || state.store.wallet.loading {
            ui.separator();
            ui.spinner();
            ui.colored_label(theme.dim, "Syncing");
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(user) = &state.store.auth.user {
                ui.colored_label(theme.dim, &user.email);
            }
        });
    });
}
