//! # GUI Rendering
//!
//! Immediate-mode rendering of the whole window with **egui**. Each frame
//! takes a cloned [`AppState`](crate::app::AppState) snapshot, so no lock is
//! held while widgets are laid out; user input is routed back through
//! [`App`] methods.

pub mod screens;
pub mod theme;
pub mod widgets;

use crate::app::{resolve_screen, App, Screen};
use widgets::notifications::NotificationManager;

/// Main render function - called every frame by egui
pub fn render(ctx: &egui::Context, app: &mut App, notifications: &mut NotificationManager) {
    // Toasts are consumed here so each is shown exactly once.
    if let Some(mut state) = app.state.try_write() {
        for toast in state.take_toasts() {
            notifications.show_toast(toast);
        }
    }

    let state = match app.state.try_read() {
        Some(guard) => guard.clone(),
        // Lock is held by another task, skip this frame
        None => return,
    };

    let current_screen = state.screen;
    let is_authenticated = state.is_authenticated();

    let target = resolve_screen(current_screen, is_authenticated);
    if target != current_screen {
        app.handle_screen_change(target);
        ctx.request_repaint();
        return;
    }

    if is_authenticated {
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            widgets::nav_bar::render_nav_bar(ui, &state, app);
        });

        if current_screen.is_live() {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                widgets::status_bar::render_status_bar(ui, &state);
            });
        }

        // Tab / Shift+Tab cycle screens unless a text field has focus
        let typing = ctx.memory(|m| m.focused().is_some());
        if !typing {
            if ctx.input(|i| i.key_pressed(egui::Key::Tab) && !i.modifiers.shift) {
                app.next_screen();
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Tab) && i.modifiers.shift) {
                app.previous_screen();
            }
        }
    }

    egui::CentralPanel::default().show(ctx, |ui| match current_screen {
        Screen::Login => screens::auth::render_login(ui, &state, app),
        Screen::Register => screens::auth::render_register(ui, &state, app),
        Screen::Dashboard => screens::dashboard::render(ui, &state, app),
        Screen::Trades => screens::trades::render(ui, &state, app),
        Screen::Wallet => screens::wallet::render(ui, &state, app),
        Screen::Notifications => screens::notifications::render(ui, &state, app),
        Screen::Profile => screens::profile::render(ui, &state, app),
        Screen::Docs => screens::docs::render(ui, &state, app),
    });

    notifications.show(ctx);
}
