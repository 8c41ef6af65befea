//! # Navigation Bar
//!
//! Top bar with screen tabs, the signed-in user and a logout button.
//! Only rendered when the user is authenticated.

use crate::app::{App, AppState, Screen};
use crate::ui::theme::Theme;

pub fn render_nav_bar(ui: &mut egui::Ui, state: &AppState, app: &mut App) {
    if !state.is_authenticated() {
        return;
    }

    let theme = Theme::default();

    ui.horizontal(|ui| {
        ui.set_height(32.0);

        ui.label(egui::RichText::new("PaperTrade").strong().size(18.0).color(theme.selected));
        ui.add_space(12.0);

        ui.spacing_mut().item_spacing = egui::vec2(2.0, 0.0);
        if ui.button("<").on_hover_text("Previous (Shift+Tab)").clicked() {
            app.previous_screen();
        }
        if ui.button(">").on_hover_text("Next (Tab)").clicked() {
            app.next_screen();
        }
        ui.spacing_mut().item_spacing = egui::vec2(8.0, 0.0);
        ui.add_space(8.0);

        for &screen in Screen::all() {
            let title = match screen {
                Screen::Notifications if state.notifications.unread_count() > 0 => {
                    format!("{} ({})", screen.title(), state.notifications.unread_count())
                }
                _ => screen.title().to_string(),
            };
            if ui.selectable_label(state.screen == screen, title).clicked() && state.screen != screen {
                app.handle_screen_change(screen);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Log out").clicked() {
                app.handle_logout();
            }
            if let Some(user) = &state.store.auth.user {
                ui.colored_label(theme.dim, user.display_name());
            }
        });
    });
}
