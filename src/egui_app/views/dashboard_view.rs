use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::AppView;
use crate::shared::models::Summary;

enum SummaryAction {
    Quiz,
    Flashcards,
    ViewFlashcards,
    Pdf,
    Delete,
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(egui::RichText::new("Summarize a video").color(colors::TEXT_LIGHT));
    ui.add_space(8.0);

    let busy = state.is_busy();
    ui.horizontal(|ui| {
        ui.add_sized(
            [420.0, 28.0],
            egui::TextEdit::singleline(&mut state.video_url_input).hint_text("https://www.youtube.com/watch?v=..."),
        );
        let submit = ui.add_enabled(
            !busy && !state.video_url_input.trim().is_empty(),
            egui::Button::new(egui::RichText::new("Summarize").color(colors::TEXT_LIGHT)).fill(colors::ACCENT),
        );
        if submit.clicked() {
            state.submit_video();
        }
        if busy {
            ui.spinner();
        }
    });
    ui.add_space(20.0);

    ui.horizontal(|ui| {
        ui.heading(egui::RichText::new("Your summaries").color(colors::TEXT_LIGHT));
        if ui.add_enabled(!state.is_loading_summaries(), egui::Button::new("⟳")).clicked() {
            state.refresh_summaries();
        }
    });
    ui.add_space(8.0);

    let Some(summaries) = state.summaries.clone() else {
        if state.is_loading_summaries() {
            ui.spinner();
        }
        return;
    };
    if summaries.is_empty() {
        ui.colored_label(colors::TEXT_SECONDARY, "No summaries yet. Paste a video link above to get started.");
        return;
    }

    let mut clicked = None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        for summary in &summaries {
            if let Some(action) = summary_card(ui, summary, busy) {
                clicked = Some((action, summary.clone()));
            }
            ui.add_space(12.0);
        }
    });

    if let Some((action, summary)) = clicked {
        match action {
            SummaryAction::Quiz => state.generate_quiz(summary.id),
            SummaryAction::Flashcards => state.generate_flashcards(summary.id),
            SummaryAction::ViewFlashcards => state.navigate(AppView::Flashcards(summary.id)),
            SummaryAction::Pdf => state.export_pdf(summary),
            SummaryAction::Delete => state.delete_summary(summary.id),
        }
    }
}

fn summary_card(ui: &mut egui::Ui, summary: &Summary, busy: bool) -> Option<SummaryAction> {
    let mut action = None;
    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(&summary.title).size(18.0).strong().color(colors::TEXT_LIGHT));
        if !summary.channel_title.is_empty() {
            ui.colored_label(colors::TEXT_SECONDARY, &summary.channel_title);
        }
        ui.add_space(6.0);
        egui::CollapsingHeader::new("Summary")
            .id_salt(&summary.id)
            .show(ui, |ui| {
                ui.label(&summary.summary);
            });
        ui.add_space(6.0);

        ui.add_enabled_ui(!busy, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Generate quiz").clicked() {
                    action = Some(SummaryAction::Quiz);
                }
                if ui.button("Generate flashcards").clicked() {
                    action = Some(SummaryAction::Flashcards);
                }
                if ui.button("Flashcards").clicked() {
                    action = Some(SummaryAction::ViewFlashcards);
                }
                if ui.button("Export PDF").clicked() {
                    action = Some(SummaryAction::Pdf);
                }
                if ui.button(egui::RichText::new("Delete").color(colors::ERROR)).clicked() {
                    action = Some(SummaryAction::Delete);
                }
            });
        });
    });
    action
}
