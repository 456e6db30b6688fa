use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::AppView;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading(egui::RichText::new("Your quizzes").color(colors::TEXT_LIGHT));
        if ui.add_enabled(!state.is_loading_quizzes(), egui::Button::new("⟳")).clicked() {
            state.refresh_quizzes();
        }
    });
    ui.add_space(8.0);

    let Some(quizzes) = state.quizzes.clone() else {
        if state.is_loading_quizzes() {
            ui.spinner();
        }
        return;
    };
    if quizzes.is_empty() {
        ui.colored_label(colors::TEXT_SECONDARY, "No quizzes yet. Generate one from a summary.");
        return;
    }

    let busy = state.is_busy();
    let mut open = None;
    let mut delete = None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        for quiz in &quizzes {
            styles::card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&quiz.title).size(16.0).strong().color(colors::TEXT_LIGHT));
                        if let Some(created_at) = quiz.created_at {
                            ui.colored_label(colors::TEXT_SECONDARY, created_at.format("%Y-%m-%d").to_string());
                        }
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.add_enabled(!busy, egui::Button::new(egui::RichText::new("Delete").color(colors::ERROR))).clicked() {
                            delete = Some(quiz.id.clone());
                        }
                        if ui.button("Start").clicked() {
                            open = Some(quiz.id.clone());
                        }
                    });
                });
            });
            ui.add_space(10.0);
        }
    });

    if let Some(id) = open {
        state.navigate(AppView::Quiz(id));
    } else if let Some(id) = delete {
        state.delete_quiz(id);
    }
}
