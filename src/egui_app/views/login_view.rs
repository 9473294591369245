use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::Route;

use super::{field, FIELD_WIDTH};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        styles::card_frame().show(ui, |ui| {
            ui.set_width(FIELD_WIDTH);
            ui.label(
                egui::RichText::new("Login to your account")
                    .size(24.0)
                    .strong(),
            );
            ui.add_space(16.0);

            if let Some(error) = state.login_form.error() {
                styles::error_banner(ui, error);
                ui.add_space(12.0);
            }

            let submitting = state.login_form.is_submitting();
            let form = &mut state.login_form;
            let mut submitted = field(ui, "Email", "Enter your email", &mut form.email, false);
            submitted |= field(ui, "Password", "Enter your password", &mut form.password, true);
            ui.add_space(16.0);

            let label = if submitting { "Logging in..." } else { "Login" };
            let button = egui::Button::new(egui::RichText::new(label).color(colors::TEXT_LIGHT))
                .fill(colors::ACCENT)
                .min_size(egui::vec2(FIELD_WIDTH, 32.0));
            submitted |= ui.add_enabled(!submitting, button).clicked();

            if submitted && !submitting {
                state.submit_login();
            }

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_SECONDARY, "Don't have an account?");
                if ui.link("Register").clicked() {
                    state.navigate(Route::Register);
                }
            });
        });
    });
}
