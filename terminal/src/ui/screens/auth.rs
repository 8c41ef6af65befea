//! # Authentication Screen
//!
//! Sign in and account creation forms.

use crate::app::{App, AppState, LoginForm, Screen};
use crate::ui::theme::Theme;
use crate::ui::widgets::forms;

const FIELD_WIDTH: f32 = 300.0;

pub fn render_login(ui: &mut egui::Ui, state: &AppState, app: &mut App) {
    let theme = Theme::default();

    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        forms::render_form_heading(ui, "Sign In", &theme);
        forms::render_hint(ui, "Practice trading with virtual funds", &theme);
        ui.add_space(16.0);

        let mut form = state.login_form.clone();
        let loading = state.store.auth.loading;
        let mut submit = false;

        forms::render_text_input(ui, "Email", &mut form.email, "you@example.com", false, FIELD_WIDTH);
        ui.add_space(8.0);
        let password = forms::render_text_input(ui, "Password", &mut form.password, "Password", true, FIELD_WIDTH);
        if password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }

        if form != state.login_form {
            app.state.write().login_form = form;
            if state.store.auth.error.is_some() {
                app.handle_clear_auth_error();
            }
        }

        ui.add_space(12.0);
        if let Some(error) = &state.store.auth.error {
            forms::render_error(ui, error, &theme);
        }

        let label = if loading { "Signing in..." } else { "Sign In" };
        if forms::render_button(ui, label, Some(theme.selected), !loading, Some(egui::vec2(FIELD_WIDTH, 32.0))).clicked() {
            submit = true;
        }
        if submit && !loading {
            app.handle_login_click();
        }

        ui.add_space(16.0);
        ui.horizontal(|ui| {
            ui.add_space((ui.available_width() - 280.0).max(0.0) / 2.0);
            ui.label("No account yet?");
            if ui.link("Create one").clicked() {
                app.handle_clear_auth_error();
                app.handle_screen_change(Screen::Register);
            }
            ui.label("·");
            if ui.link("Browse guides").clicked() {
                app.handle_screen_change(Screen::Docs);
            }
        });
    });
}

pub fn render_register(ui: &mut egui::Ui, state: &AppState, app: &mut App) {
    let theme = Theme::default();

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            forms::render_form_heading(ui, "Create Account", &theme);

            let mut form = state.register_form.clone();
            let loading = state.store.auth.loading;
            let mut submit = false;

            forms::render_text_input(ui, "Full name", &mut form.full_name, "Ada Lovelace", false, FIELD_WIDTH);
            forms::render_text_input(ui, "Email", &mut form.email, "you@example.com", false, FIELD_WIDTH);
            forms::render_text_input(ui, "Password", &mut form.password, "At least 8 characters", true, FIELD_WIDTH);
            forms::render_text_input(ui, "Confirm password", &mut form.confirm_password, "Repeat password", true, FIELD_WIDTH);
            forms::render_text_input(ui, "Phone (optional)", &mut form.phone_no, "", false, FIELD_WIDTH);
            let address = forms::render_text_input(ui, "Address (optional)", &mut form.address, "", false, FIELD_WIDTH);
            if address.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
            }

            if form != state.register_form {
                // Editing clears the previous validation message.
                form.error = None;
                app.state.write().register_form = form;
            }

            ui.add_space(12.0);
            if let Some(error) = state.register_form.error.as_ref().or(state.store.auth.error.as_ref()) {
                forms::render_error(ui, error, &theme);
            }

            let label = if loading { "Creating account..." } else { "Create Account" };
            if forms::render_button(ui, label, Some(theme.selected), !loading, Some(egui::vec2(FIELD_WIDTH, 32.0))).clicked() {
                submit = true;
            }
            if submit && !loading {
                app.handle_register_click();
            }

            ui.add_space(16.0);
            if ui.link("Already have an account? Sign in").clicked() {
                app.handle_clear_auth_error();
                app.state.write().login_form = LoginForm::default();
                app.handle_screen_change(Screen::Login);
            }
        });
    });
}
