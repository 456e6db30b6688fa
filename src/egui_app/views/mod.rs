use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::AppView;

pub mod auth_view;
pub mod dashboard_view;
pub mod flashcards_view;
pub mod quiz_view;
pub mod quizzes_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("🎬 StudyReel").size(18.0).strong());
                ui.colored_label(colors::TEXT_SECONDARY, state.current_view.title());

                if !state.session.is_authenticated() {
                    return;
                }

                ui.add_space(24.0);
                for (label, view) in [("Dashboard", AppView::Dashboard), ("Quizzes", AppView::Quizzes)] {
                    let selected = state.current_view == view;
                    if ui.selectable_label(selected, label).clicked() && !selected {
                        state.navigate(view);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(16.0);
                    if ui.button("Sign out").clicked() {
                        state.logout();
                        return;
                    }
                    if let Some(user) = state.session.user() {
                        ui.colored_label(colors::TEXT_SECONDARY, &user.name);
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(styles::main_panel_frame())
        .show(ctx, |ui| {
            render_banner(ui, state);

            match state.current_view.clone() {
                AppView::Auth => auth_view::render(ui, state),
                AppView::Dashboard => dashboard_view::render(ui, state),
                AppView::Quizzes => quizzes_view::render(ui, state),
                AppView::Quiz(_) => quiz_view::render(ui, state),
                AppView::Flashcards(summary_id) => flashcards_view::render(ui, state, &summary_id),
            }
        });
}

/// Dismissable error and notice lines shown above every view
fn render_banner(ui: &mut egui::Ui, state: &mut AppState) {
    if let Some(error) = state.error.clone() {
        ui.horizontal(|ui| {
            ui.colored_label(colors::ERROR, error);
            if ui.small_button("✕").clicked() {
                state.error = None;
            }
        });
        ui.add_space(8.0);
    }
    if let Some(notice) = state.notice.clone() {
        ui.horizontal(|ui| {
            ui.colored_label(colors::SUCCESS, notice);
            if ui.small_button("✕").clicked() {
                state.notice = None;
            }
        });
        ui.add_space(8.0);
    }
}
