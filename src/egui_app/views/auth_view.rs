use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

const INPUT_WIDTH: f32 = 280.0;
const LABEL_WIDTH: f32 = 80.0;

fn field(ui: &mut egui::Ui, offset: f32, label: &str, value: &mut String, password: bool) {
    ui.horizontal(|ui| {
        ui.add_space(offset);
        ui.add_sized(
            [LABEL_WIDTH, 24.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        ui.add_sized(
            [INPUT_WIDTH, 28.0],
            egui::TextEdit::singleline(value)
                .password(password)
                .text_color(colors::TEXT_LIGHT),
        );
    });
    ui.add_space(8.0);
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let available_rect = ui.available_rect_before_wrap();

    ui.vertical_centered(|ui| {
        let total_height = if state.is_signup_mode { 380.0 } else { 280.0 };
        ui.add_space((available_rect.height() - total_height).max(0.0) / 2.0);

        ui.label(egui::RichText::new("🎬 StudyReel").size(32.0).strong().color(colors::TEXT_LIGHT));
        ui.add_space(20.0);
        ui.label(
            egui::RichText::new(if state.is_signup_mode { "Create Account" } else { "Welcome Back" })
                .size(24.0)
                .color(colors::TEXT_LIGHT),
        );
        ui.add_space(20.0);

        if let Some(error) = &state.auth_error {
            ui.label(egui::RichText::new(error).color(colors::ERROR));
            ui.add_space(10.0);
        }

        let offset = ((available_rect.width() - INPUT_WIDTH - LABEL_WIDTH - 20.0) / 2.0).max(0.0);
        if state.is_signup_mode {
            field(ui, offset, "Name:", &mut state.name_input, false);
        }
        field(ui, offset, "Email:", &mut state.email_input, false);
        field(ui, offset, "Password:", &mut state.password_input, true);
        if state.is_signup_mode {
            field(ui, offset, "Confirm:", &mut state.confirm_password_input, true);
        }
        ui.add_space(20.0);

        let busy = state.is_authenticating();
        ui.horizontal(|ui| {
            let button_width = 120.0;
            ui.add_space(((available_rect.width() - button_width * 2.0 - 10.0) / 2.0).max(0.0));

            let submit = egui::Button::new(
                egui::RichText::new(if state.is_signup_mode { "Sign Up" } else { "Login" })
                    .color(colors::TEXT_LIGHT),
            )
            .fill(colors::ACCENT);
            if ui.add_enabled_ui(!busy, |ui| ui.add_sized([button_width, 32.0], submit)).inner.clicked() {
                if state.is_signup_mode {
                    state.handle_signup();
                } else {
                    state.handle_login();
                }
            }

            ui.add_space(10.0);

            let toggle = egui::Button::new(
                egui::RichText::new(if state.is_signup_mode { "Back to Login" } else { "Create Account" })
                    .color(colors::TEXT_SECONDARY),
            );
            if ui.add_enabled_ui(!busy, |ui| ui.add_sized([button_width, 32.0], toggle)).inner.clicked() {
                state.toggle_auth_mode();
            }
        });

        if busy {
            ui.add_space(15.0);
            ui.horizontal(|ui| {
                ui.add_space(((available_rect.width() - 100.0) / 2.0).max(0.0));
                ui.label(egui::RichText::new("Loading...").color(colors::TEXT_LIGHT));
                ui.spinner();
            });
        }
    });
}
