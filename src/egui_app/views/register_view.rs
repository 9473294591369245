use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::Route;

use super::{field, FIELD_WIDTH};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        styles::card_frame().show(ui, |ui| {
            ui.set_width(FIELD_WIDTH);
            ui.label(egui::RichText::new("Create an account").size(24.0).strong());
            ui.add_space(16.0);

            if let Some(error) = state.register_form.error() {
                styles::error_banner(ui, error);
                ui.add_space(12.0);
            }

            let submitting = state.register_form.is_submitting();
            let form = &mut state.register_form;
            let mut submitted = field(ui, "Full Name", "Enter your full name", &mut form.name, false);
            submitted |= field(
                ui,
                "Email",
                "Enter your email (@jadeglobal.com or @kanverse.com)",
                &mut form.email,
                false,
            );
            ui.colored_label(
                colors::TEXT_SECONDARY,
                egui::RichText::new("Email must belong to jadeglobal.com or kanverse.com domain")
                    .size(11.0),
            );
            submitted |= field(ui, "Password", "Enter your password", &mut form.password, true);
            submitted |= field(
                ui,
                "Confirm Password",
                "Confirm your password",
                &mut form.confirm_password,
                true,
            );
            ui.add_space(16.0);

            let label = if submitting { "Creating Account..." } else { "Register" };
            let button = egui::Button::new(egui::RichText::new(label).color(colors::TEXT_LIGHT))
                .fill(colors::ACCENT)
                .min_size(egui::vec2(FIELD_WIDTH, 32.0));
            submitted |= ui.add_enabled(!submitting, button).clicked();

            if submitted && !submitting {
                state.submit_register();
            }

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_SECONDARY, "Already have an account?");
                if ui.link("Login").clicked() {
                    state.navigate(Route::Login);
                }
            });
        });
    });
}
