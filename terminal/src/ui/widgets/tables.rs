//! # Table Components
//!
//! Grid helpers shared by the trade, wallet, alert and docs tables, plus the
//! cells every trade listing renders the same way.

use shared::{format_signed_currency, Trade, TradeSide};

use crate::ui::theme::Theme;

/// Configuration for table styling
pub struct TableConfig {
    pub num_columns: usize,
    pub spacing: [f32; 2],
    pub striped: bool,
    pub scrollable: bool,
    /// Height cap when scrollable
    pub max_height: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            num_columns: 4,
            spacing: [16.0, 6.0],
            striped: true,
            scrollable: false,
            max_height: 400.0,
        }
    }
}

/// Render a data table with headers and rows
pub fn render_table<F>(
    ui: &mut egui::Ui,
    id: &str,
    config: TableConfig,
    headers: &[&str],
    theme: &Theme,
    render_rows: F,
) where
    F: FnOnce(&mut egui::Ui),
{
    let table_render = |ui: &mut egui::Ui| {
        egui::Grid::new(id)
            .num_columns(config.num_columns)
            .spacing(config.spacing)
            .striped(config.striped)
            .show(ui, |ui| {
                for header in headers {
                    ui.colored_label(theme.dim, egui::RichText::new(*header).strong());
                }
                ui.end_row();

                render_rows(ui);
            });
    };

    if config.scrollable {
        egui::ScrollArea::vertical()
            .id_salt(id)
            .max_height(config.max_height)
            .show(ui, table_render);
    } else {
        table_render(ui);
    }
}

/// Render an empty state message
pub fn render_empty_state(
    ui: &mut egui::Ui,
    primary_text: &str,
    secondary_text: Option<&str>,
    theme: &Theme,
) {
    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        ui.colored_label(theme.dim, primary_text);
        if let Some(secondary) = secondary_text {
            ui.add_space(8.0);
            ui.colored_label(theme.dim, secondary);
        }
        ui.add_space(20.0);
    });
}

/// Side in upper case, green for buys and red for sells.
pub fn render_side_cell(ui: &mut egui::Ui, side: TradeSide, theme: &Theme) {
    let color = match side {
        TradeSide::Buy => theme.price_up,
        TradeSide::Sell => theme.price_down,
    };
    ui.colored_label(color, side.as_str().to_uppercase());
}

/// Realized P&L for closed trades; open trades show `open_label` dimmed.
pub fn render_pnl_cell(ui: &mut egui::Ui, trade: &Trade, open_label: &str, theme: &Theme) {
    if trade.is_closed() {
        let pnl = trade.realized_pnl();
        ui.colored_label(theme.price_change_color(pnl), format_signed_currency(pnl));
    } else {
        ui.colored_label(theme.dim, open_label);
    }
}

/// Render a summary line such as "Open: 2  |  Closed: 5"
pub fn render_stats_summary(ui: &mut egui::Ui, stats: &[(&str, usize)]) {
    let parts: Vec<String> = stats
        .iter()
        .map(|(label, count)| format!("{}: {}", label, count))
        .collect();
    ui.label(parts.join("  |  "));
}
