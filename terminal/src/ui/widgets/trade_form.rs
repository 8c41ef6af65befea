//! # Trade Form
//!
//! Market order entry: trading pair, quantity and side.

use shared::{format_currency, TradeSide, POPULAR_SYMBOLS};

use crate::app::{App, TradeForm};
use crate::ui::theme::Theme;
use crate::ui::widgets::forms;

pub fn render_trade_form(
    ui: &mut egui::Ui,
    form: &TradeForm,
    last_price: Option<f64>,
    app: &mut App,
    theme: &Theme,
) {
    let mut edited = form.clone();
    let mut submit = false;

    egui::Frame::group(ui.style())
        .fill(theme.card)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Place Trade").size(18.0).strong());
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label("Pair");
                egui::ComboBox::from_id_salt("trade_symbol")
                    .selected_text(&edited.symbol)
                    .show_ui(ui, |ui| {
                        for symbol in POPULAR_SYMBOLS {
                            ui.selectable_value(&mut edited.symbol, symbol.to_string(), symbol);
                        }
                    });
            });

            ui.horizontal(|ui| {
                ui.selectable_value(&mut edited.side, TradeSide::Buy, "Buy");
                ui.selectable_value(&mut edited.side, TradeSide::Sell, "Sell");
            });

            let response = forms::render_text_input(ui, "Quantity", &mut edited.quantity, "0.00", false, 200.0);
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }

            if let (Some(price), Ok(quantity)) = (last_price, edited.quantity.trim().parse::<f64>()) {
                if quantity > 0.0 {
                    forms::render_hint(ui, &format!("≈ {}", format_currency(price * quantity)), theme);
                }
            }

            ui.add_space(6.0);
            let (label, fill) = match edited.side {
                TradeSide::Buy => ("Buy", theme.price_up),
                TradeSide::Sell => ("Sell", theme.price_down),
            };
            let label = if form.submitting { "Placing..." } else { label };
            if forms::render_button(ui, label, Some(fill), !form.submitting, Some(egui::vec2(200.0, 30.0))).clicked() {
                submit = true;
            }
        });

    if edited != *form {
        let mut state = app.state.write();
        state.trade_form.symbol = edited.symbol;
        state.trade_form.quantity = edited.quantity;
        state.trade_form.side = edited.side;
    }
    if submit && !form.submitting {
        app.handle_place_trade();
    }
}
