//! # Profile Screen
//!
//! Account details with avatar upload, display preferences and security
//! (password, two-factor authentication, account deletion).

use shared::{ProfileSettings, ThemePreference};

use crate::app::{App, AppState, ProfileTab, DELETE_CONFIRMATION};
use crate::ui::theme::Theme;
use crate::ui::widgets::forms;

const FIELD_WIDTH: f32 = 280.0;
const AVATAR_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut App) {
    let theme = Theme::default();
    let profile = &state.profile;

    ui.horizontal(|ui| {
        ui.heading("Profile");
        if profile.loading || profile.saving {
            ui.spinner();
        }
    });
    ui.add_space(6.0);

    let mut tab = profile.tab;
    ui.horizontal(|ui| {
        ui.selectable_value(&mut tab, ProfileTab::Details, "Details");
        ui.selectable_value(&mut tab, ProfileTab::Preferences, "Preferences");
        ui.selectable_value(&mut tab, ProfileTab::Security, "Security");
    });
    if tab != profile.tab {
        app.state.write().profile.tab = tab;
    }
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| match tab {
        ProfileTab::Details => render_details(ui, state, app, &theme),
        ProfileTab::Preferences => render_preferences(ui, state, app, &theme),
        ProfileTab::Security => render_security(ui, state, app, &theme),
    });
}

/// Up to two initials for the avatar placeholder.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

fn render_details(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    let profile = &state.profile;
    let Some(loaded) = &profile.profile else {
        if profile.loading {
            ui.label("Loading profile...");
        } else if ui.button("Retry").clicked() {
            app.load_profile();
        }
        return;
    };

    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(64.0, 64.0), egui::Sense::hover());
        ui.painter().circle_filled(rect.center(), 32.0, theme.selected);
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            initials(loaded.user.display_name()),
            egui::FontId::proportional(24.0),
            egui::Color32::WHITE,
        );

        ui.vertical(|ui| {
            ui.label(egui::RichText::new(loaded.user.display_name()).size(18.0).strong());
            ui.colored_label(theme.dim, &loaded.user.email);
            if let Some(avatar) = &loaded.avatar {
                ui.colored_label(theme.dim, avatar);
            }
            if ui.add_enabled(!profile.saving, egui::Button::new("Change avatar...")).clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", &AVATAR_EXTENSIONS)
                    .pick_file()
                {
                    app.upload_avatar(path);
                }
            }
        });
    });
    ui.add_space(12.0);

    let mut form = profile.form.clone();
    forms::render_text_input(ui, "Full name", &mut form.full_name, "", false, FIELD_WIDTH);
    forms::render_text_input(ui, "Email", &mut form.email, "", false, FIELD_WIDTH);
    forms::render_text_input(ui, "Phone", &mut form.phone_no, "", false, FIELD_WIDTH);
    forms::render_text_input(ui, "Address", &mut form.address, "", false, FIELD_WIDTH);
    if form != profile.form {
        app.state.write().profile.form = form;
    }

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        if forms::render_button(ui, "Save changes", Some(theme.selected), !profile.saving, None).clicked() {
            app.save_profile();
        }
        if ui.button("Reset").clicked() {
            app.state.write().profile.reset_form();
        }
    });
}

fn render_preferences(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    let Some(current) = &state.profile.settings else {
        ui.spinner();
        return;
    };
    let mut settings: ProfileSettings = current.clone();

    ui.label(egui::RichText::new("Appearance").strong());
    ui.horizontal(|ui| {
        ui.label("Theme");
        ui.selectable_value(&mut settings.theme, ThemePreference::Dark, "Dark");
        ui.selectable_value(&mut settings.theme, ThemePreference::Light, "Light");
        ui.selectable_value(&mut settings.theme, ThemePreference::System, "System");
    });

    ui.add_space(8.0);
    ui.label(egui::RichText::new("Regional").strong());
    egui::Grid::new("regional_settings").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
        ui.label("Language");
        egui::ComboBox::from_id_salt("language")
            .selected_text(&settings.language)
            .show_ui(ui, |ui| {
                for lang in ["en", "es", "fr", "de"] {
                    ui.selectable_value(&mut settings.language, lang.to_string(), lang);
                }
            });
        ui.end_row();

        ui.label("Timezone");
        ui.text_edit_singleline(&mut settings.timezone);
        ui.end_row();

        ui.label("Currency");
        egui::ComboBox::from_id_salt("currency")
            .selected_text(&settings.currency)
            .show_ui(ui, |ui| {
                for currency in ["USD", "EUR", "GBP"] {
                    ui.selectable_value(&mut settings.currency, currency.to_string(), currency);
                }
            });
        ui.end_row();
    });

    ui.add_space(8.0);
    ui.label(egui::RichText::new("Notifications").strong());
    forms::render_toggle(ui, &mut settings.email_notifications, "Email notifications", "Account and trade emails", theme);
    forms::render_toggle(ui, &mut settings.push_notifications, "Push notifications", "Desktop notifications", theme);
    forms::render_toggle(ui, &mut settings.price_alerts, "Price alerts", "Alert targets reached", theme);
    forms::render_toggle(ui, &mut settings.trade_alerts, "Trade alerts", "Trade opened or closed", theme);
    forms::render_toggle(ui, &mut settings.market_news, "Market news", "Notable market movements", theme);

    if settings != *current {
        app.state.write().profile.settings = Some(settings.clone());
    }

    ui.add_space(10.0);
    if forms::render_button(ui, "Save preferences", Some(theme.selected), !state.profile.saving, None).clicked() {
        app.save_profile_settings(settings);
    }
}

fn render_security(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    let profile = &state.profile;

    ui.label(egui::RichText::new("Change Password").size(16.0).strong());
    let mut passwords = profile.password_form.clone();
    forms::render_text_input(ui, "Current password", &mut passwords.current_password, "", true, FIELD_WIDTH);
    forms::render_text_input(ui, "New password", &mut passwords.new_password, "At least 8 characters", true, FIELD_WIDTH);
    forms::render_text_input(ui, "Confirm new password", &mut passwords.confirm_password, "", true, FIELD_WIDTH);
    if passwords != profile.password_form {
        app.state.write().profile.password_form = passwords;
    }
    ui.add_space(6.0);
    if forms::render_button(ui, "Update password", Some(theme.selected), !profile.saving, None).clicked() {
        app.change_password();
    }

    ui.add_space(16.0);
    ui.separator();
    ui.label(egui::RichText::new("Two-Factor Authentication").size(16.0).strong());

    let mut token = profile.two_factor_token.clone();
    if profile.two_factor_enabled {
        ui.colored_label(theme.success, "Enabled");
        forms::render_text_input(ui, "Authenticator code", &mut token, "123456", false, 160.0);
        if ui.button("Disable 2FA").clicked() {
            app.disable_two_factor();
        }
    } else if let Some(setup) = &profile.two_factor_setup {
        forms::render_hint(ui, "Add this secret to your authenticator app, then enter the 6-digit code.", theme);
        ui.horizontal(|ui| {
            ui.monospace(&setup.secret);
            if ui.small_button("Copy").clicked() {
                ui.ctx().copy_text(setup.secret.clone());
            }
        });
        forms::render_text_input(ui, "Authenticator code", &mut token, "123456", false, 160.0);
        if ui.button("Verify").clicked() {
            app.verify_two_factor();
        }
    } else {
        ui.colored_label(theme.dim, "Not enabled");
        if ui.button("Enable 2FA").clicked() {
            app.enable_two_factor();
        }
    }
    if token != profile.two_factor_token {
        app.state.write().profile.two_factor_token = token;
    }

    ui.add_space(16.0);
    ui.separator();
    ui.label(egui::RichText::new("Delete Account").size(16.0).strong().color(theme.error));
    forms::render_hint(
        ui,
        &format!("This permanently removes your account and trade history. Type {} to confirm.", DELETE_CONFIRMATION),
        theme,
    );
    let mut confirmation = profile.delete_confirmation.clone();
    ui.add_sized([160.0, 24.0], egui::TextEdit::singleline(&mut confirmation).hint_text(DELETE_CONFIRMATION));
    if confirmation != profile.delete_confirmation {
        app.state.write().profile.delete_confirmation = confirmation.clone();
    }
    let armed = confirmation.trim() == DELETE_CONFIRMATION && !profile.saving;
    if forms::render_button(ui, "Delete account", Some(theme.error), armed, None).clicked() {
        app.delete_account();
    }
}
