use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(user) = state.session.current_user() else {
        return;
    };

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        styles::card_frame().show(ui, |ui| {
            ui.set_width(360.0);
            ui.label(
                egui::RichText::new(format!("Welcome, {}", user.display_name()))
                    .size(24.0)
                    .strong(),
            );
            ui.add_space(12.0);

            egui::Grid::new("user_attributes")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    ui.colored_label(colors::TEXT_SECONDARY, "Email");
                    ui.label(user.email.as_str());
                    ui.end_row();

                    if let Some(role) = &user.role {
                        ui.colored_label(colors::TEXT_SECONDARY, "Role");
                        ui.label(role.as_str());
                        ui.end_row();
                    }
                    for (key, value) in &user.extra {
                        ui.colored_label(colors::TEXT_SECONDARY, key.as_str());
                        ui.label(value.to_string());
                        ui.end_row();
                    }
                });

            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            let loading = state.is_profile_loading();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!loading, egui::Button::new("Load profile"))
                    .clicked()
                {
                    state.load_profile();
                }
                if loading {
                    ui.spinner();
                }
            });

            if let Some(profile) = &state.profile {
                ui.label(format!("Signed in on the server as {}", profile.email));
            }
            if let Some(error) = &state.profile_error {
                ui.add_space(8.0);
                styles::error_banner(ui, error);
            }
        });
    });
}
