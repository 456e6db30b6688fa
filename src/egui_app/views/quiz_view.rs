use eframe::egui;

use crate::client::{QuizPhase, QuizRun};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::AppView;

enum QuizInput {
    Select(String),
    Next,
    Back,
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(page) = state.quiz_page.as_ref() else {
        return;
    };

    let input = match page.phase() {
        QuizPhase::Loading => {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.spinner();
                ui.colored_label(colors::TEXT_SECONDARY, "Loading quiz...");
            });
            None
        }
        QuizPhase::Error(message) => {
            ui.colored_label(colors::ERROR, message);
            ui.add_space(12.0);
            ui.button("Back to quizzes").clicked().then_some(QuizInput::Back)
        }
        QuizPhase::Ready { .. } => page.run().and_then(|run| question_card(ui, run)),
        QuizPhase::Finished(result) => {
            let mut input = None;
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading(egui::RichText::new("Quiz Completed!").size(28.0).color(colors::TEXT_LIGHT));
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new(format!("Your score: {} / {}", result.score, result.total))
                        .size(20.0)
                        .color(colors::ACCENT),
                );
                ui.add_space(20.0);
                if ui.button("Back to quizzes").clicked() {
                    input = Some(QuizInput::Back);
                }
            });
            input
        }
    };

    match input {
        Some(QuizInput::Select(answer)) => {
            if let Some(page) = state.quiz_page.as_mut() {
                page.select_answer(&answer);
            }
        }
        Some(QuizInput::Next) => {
            if let Some(page) = state.quiz_page.as_mut() {
                page.advance();
            }
        }
        Some(QuizInput::Back) => state.navigate(AppView::Quizzes),
        None => {}
    }
}

fn question_card(ui: &mut egui::Ui, run: &QuizRun) -> Option<QuizInput> {
    let question = run.current_question()?;
    let selected = run.selected_answer();
    let answered = selected.is_some();
    let mut input = None;

    ui.heading(egui::RichText::new(&run.quiz().title).color(colors::TEXT_LIGHT));
    ui.colored_label(
        colors::TEXT_SECONDARY,
        format!("Question {} of {}", run.index() + 1, run.total()),
    );
    ui.add_space(12.0);

    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(&question.text).size(18.0).color(colors::TEXT_LIGHT));
        ui.add_space(12.0);

        for option in &question.options {
            let is_selected = selected == Some(option.as_str());
            let mut button = egui::Button::new(egui::RichText::new(option).color(colors::TEXT_LIGHT))
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if let Some(fill) = styles::answer_fill(is_selected, *option == question.correct_answer, answered) {
                button = button.fill(fill);
            }
            if ui.add_enabled(!answered, button).clicked() {
                input = Some(QuizInput::Select(option.clone()));
            }
            ui.add_space(6.0);
        }
    });

    if let Some(correct) = run.is_correct() {
        ui.add_space(12.0);
        if correct {
            ui.colored_label(colors::SUCCESS, "Correct!");
        } else {
            ui.colored_label(
                colors::ERROR,
                format!("Incorrect. The correct answer is: {}", question.correct_answer),
            );
        }
    }

    ui.add_space(12.0);
    let label = if run.is_last_question() { "Finish Quiz" } else { "Next Question" };
    let next = egui::Button::new(egui::RichText::new(label).color(colors::TEXT_LIGHT)).fill(colors::ACCENT);
    if ui.add_enabled(answered, next).clicked() {
        input = Some(QuizInput::Next);
    }

    input
}
