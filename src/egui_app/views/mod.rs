use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::Route;

pub mod dashboard_view;
pub mod login_view;
pub mod register_view;

/// Width of form inputs and buttons
pub const FIELD_WIDTH: f32 = 320.0;

/// Labeled single-line input. Returns true when Enter was pressed in it.
pub(crate) fn field(
    ui: &mut egui::Ui,
    label: &str,
    hint: &str,
    value: &mut String,
    password: bool,
) -> bool {
    ui.add_space(8.0);
    ui.colored_label(colors::TEXT_SECONDARY, label);
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .password(password)
            .desired_width(FIELD_WIDTH),
    );
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(
                    colors::TEXT_LIGHT,
                    egui::RichText::new("Employee Portal").size(18.0).strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(user) = state.session.current_user() {
                        if ui.button("Logout").clicked() {
                            state.logout();
                        }
                        ui.colored_label(colors::TEXT_LIGHT, user.email);
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if !state.is_ready() {
            return;
        }
        let route = state.route;
        match route {
            Route::Login => login_view::render(ui, state),
            Route::Register => register_view::render(ui, state),
            Route::Dashboard => dashboard_view::render(ui, state),
        }
    });
}
