//! # Notifications Screen
//!
//! Inbox with read/delete actions, price alert management and delivery
//! settings, one tab each.

use chrono::Utc;
use shared::{format_price, format_relative, AlertCondition, NotificationKind, POPULAR_SYMBOLS};

use crate::app::{App, AppState, NotificationTab};
use crate::ui::theme::Theme;
use crate::ui::widgets::{forms, tables};

pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut App) {
    let theme = Theme::default();
    let notifications = &state.notifications;

    ui.horizontal(|ui| {
        ui.heading("Notifications");
        if notifications.unread_count() > 0 {
            ui.colored_label(theme.selected, format!("{} unread", notifications.unread_count()));
        }
    });
    ui.add_space(6.0);

    let mut tab = notifications.tab;
    ui.horizontal(|ui| {
        ui.selectable_value(&mut tab, NotificationTab::Inbox, "Inbox");
        ui.selectable_value(&mut tab, NotificationTab::Alerts, "Price Alerts");
        ui.selectable_value(&mut tab, NotificationTab::Settings, "Settings");
    });
    if tab != notifications.tab {
        app.state.write().notifications.tab = tab;
    }
    ui.separator();

    match tab {
        NotificationTab::Inbox => render_inbox(ui, state, app, &theme),
        NotificationTab::Alerts => render_alerts(ui, state, app, &theme),
        NotificationTab::Settings => render_settings(ui, state, app, &theme),
    }
}

fn kind_color(kind: NotificationKind, theme: &Theme) -> egui::Color32 {
    match kind {
        NotificationKind::Trade => theme.success,
        NotificationKind::PriceAlert => theme.warning,
        NotificationKind::Market => theme.info,
        NotificationKind::Account => theme.selected,
        NotificationKind::System => theme.dim,
    }
}

fn render_inbox(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    let notifications = &state.notifications;

    ui.horizontal(|ui| {
        let mut unread_only = notifications.unread_only;
        if ui.checkbox(&mut unread_only, "Unread only").changed() {
            app.state.write().notifications.unread_only = unread_only;
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Refresh").clicked() {
                app.load_notifications(1);
            }
            if ui
                .add_enabled(notifications.unread_count() > 0, egui::Button::new("Mark all read"))
                .clicked()
            {
                app.mark_all_notifications_read();
            }
        });
    });

    if let Some(error) = &notifications.error {
        forms::render_error(ui, error, theme);
    }

    let visible = notifications.visible();
    if visible.is_empty() {
        if notifications.loading {
            ui.spinner();
        } else {
            tables::render_empty_state(ui, "No notifications", Some("You're all caught up."), theme);
        }
        return;
    }

    let now = Utc::now();
    let mut mark_read: Option<String> = None;
    let mut delete: Option<String> = None;

    egui::ScrollArea::vertical().id_salt("inbox").show(ui, |ui| {
        for notification in visible {
            egui::Frame::group(ui.style())
                .fill(if notification.read { theme.background } else { theme.card })
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.colored_label(kind_color(notification.kind, theme), notification.kind.label());
                        let title = egui::RichText::new(&notification.title);
                        ui.label(if notification.read { title } else { title.strong() });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Delete").clicked() {
                                delete = Some(notification.id.clone());
                            }
                            if !notification.read && ui.small_button("Mark read").clicked() {
                                mark_read = Some(notification.id.clone());
                            }
                            ui.colored_label(theme.dim, format_relative(&notification.created_at, now));
                        });
                    });
                    ui.label(&notification.message);
                    if let Some(data) = &notification.data {
                        if let (Some(symbol), Some(price)) = (&data.symbol, data.price) {
                            ui.colored_label(theme.dim, format!("{} @ {}", symbol, format_price(price)));
                        }
                    }
                });
        }

        if notifications.has_more() {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                if notifications.loading {
                    ui.spinner();
                } else if ui.button("Load more").clicked() {
                    app.load_more_notifications();
                }
            });
        }
    });

    if let Some(id) = mark_read {
        app.mark_notification_read(id);
    }
    if let Some(id) = delete {
        app.delete_notification(id);
    }
}

fn render_alerts(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    let notifications = &state.notifications;
    let mut form = notifications.alert_form.clone();

    egui::Frame::group(ui.style()).fill(theme.card).show(ui, |ui| {
        ui.label(egui::RichText::new("New Price Alert").strong());
        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("alert_symbol")
                .selected_text(&form.symbol)
                .show_ui(ui, |ui| {
                    for symbol in POPULAR_SYMBOLS {
                        ui.selectable_value(&mut form.symbol, symbol.to_string(), symbol);
                    }
                });
            ui.selectable_value(&mut form.condition, AlertCondition::Above, "Above");
            ui.selectable_value(&mut form.condition, AlertCondition::Below, "Below");
            ui.add_sized([140.0, 24.0], egui::TextEdit::singleline(&mut form.target_price).hint_text("Target price"));
            if ui.button("Create").clicked() {
                app.state.write().notifications.alert_form = form.clone();
                app.create_price_alert();
            }
        });
    });
    if form != notifications.alert_form {
        app.state.write().notifications.alert_form = form;
    }

    ui.add_space(8.0);
    if notifications.alerts.is_empty() {
        if notifications.alerts_loading {
            ui.spinner();
        } else {
            tables::render_empty_state(ui, "No price alerts", Some("Create one above to get notified."), theme);
        }
        return;
    }

    let mut toggle: Option<String> = None;
    let mut delete: Option<String> = None;
    tables::render_table(
        ui,
        "price_alerts",
        tables::TableConfig { num_columns: 6, scrollable: true, ..Default::default() },
        &["Pair", "Condition", "Target", "Current", "Status", ""],
        theme,
        |ui| {
            for alert in &notifications.alerts {
                ui.label(&alert.symbol);
                ui.label(alert.condition.as_str());
                ui.label(format_price(alert.target_price));
                ui.label(format_price(alert.current_price));
                if alert.is_triggered() {
                    ui.colored_label(theme.warning, "Triggered");
                } else if alert.active {
                    ui.colored_label(theme.success, "Active");
                } else {
                    ui.colored_label(theme.dim, "Paused");
                }
                ui.horizontal(|ui| {
                    if ui.small_button(if alert.active { "Pause" } else { "Resume" }).clicked() {
                        toggle = Some(alert.id.clone());
                    }
                    if ui.small_button("Delete").clicked() {
                        delete = Some(alert.id.clone());
                    }
                });
                ui.end_row();
            }
        },
    );

    if let Some(id) = toggle {
        app.toggle_price_alert(id);
    }
    if let Some(id) = delete {
        app.delete_price_alert(id);
    }
}

fn render_settings(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    let Some(current) = &state.notifications.settings else {
        ui.spinner();
        return;
    };
    let mut settings = current.clone();

    ui.label(egui::RichText::new("Delivery").strong());
    forms::render_toggle(ui, &mut settings.email_notifications, "Email notifications", "Receive notifications by email", theme);
    forms::render_toggle(ui, &mut settings.push_notifications, "Push notifications", "Show notifications on this device", theme);
    ui.add_space(8.0);
    ui.label(egui::RichText::new("Topics").strong());
    forms::render_toggle(ui, &mut settings.price_alerts, "Price alerts", "When an alert target is reached", theme);
    forms::render_toggle(ui, &mut settings.trade_alerts, "Trade alerts", "When trades are opened or closed", theme);
    forms::render_toggle(ui, &mut settings.market_news, "Market news", "Notable market movements", theme);
    forms::render_toggle(ui, &mut settings.account_updates, "Account updates", "Deposits, withdrawals and security", theme);
    forms::render_toggle(ui, &mut settings.system_alerts, "System alerts", "Maintenance and service notices", theme);

    if settings != *current {
        app.state.write().notifications.settings = Some(settings.clone());
    }

    ui.add_space(10.0);
    if ui.button("Save settings").clicked() {
        app.save_notification_settings(settings);
    }
}
