use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::AppView;

pub fn render(ui: &mut egui::Ui, state: &mut AppState, summary_id: &str) {
    ui.horizontal(|ui| {
        if ui.button("← Dashboard").clicked() {
            state.navigate(AppView::Dashboard);
        }
        ui.heading(egui::RichText::new("Flashcards").color(colors::TEXT_LIGHT));
    });
    ui.add_space(12.0);

    if let Some(error) = &state.deck_error {
        ui.colored_label(colors::ERROR, error);
        return;
    }

    let busy = state.is_busy();
    let Some(deck) = state.deck.as_mut() else {
        if state.is_loading_deck() {
            ui.spinner();
        }
        return;
    };

    let Some(card) = deck.current().cloned() else {
        ui.colored_label(colors::TEXT_SECONDARY, "No flashcards for this summary yet.");
        return;
    };

    ui.colored_label(
        colors::TEXT_SECONDARY,
        format!("Card {} of {}", deck.index() + 1, deck.len()),
    );
    if !card.category.is_empty() {
        ui.colored_label(colors::ACCENT, &card.category);
    }
    ui.add_space(8.0);

    let response = styles::card_frame()
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.set_min_height(160.0);
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                let text = if deck.is_flipped() { &card.answer } else { &card.question };
                ui.label(egui::RichText::new(text).size(20.0).color(colors::TEXT_LIGHT));
                ui.add_space(12.0);
                ui.colored_label(colors::TEXT_SECONDARY, "Click to flip");
            });
        })
        .response
        .interact(egui::Sense::click());
    if response.clicked() {
        deck.flip();
    }

    ui.add_space(12.0);
    let mut delete = false;
    ui.horizontal(|ui| {
        if ui.button("◀ Previous").clicked() {
            deck.previous();
        }
        if ui.button("Flip").clicked() {
            deck.flip();
        }
        if ui.button("Next ▶").clicked() {
            deck.next();
        }
        ui.add_space(24.0);
        if ui
            .add_enabled(!busy, egui::Button::new(egui::RichText::new("Delete all").color(colors::ERROR)))
            .clicked()
        {
            delete = true;
        }
    });

    if delete {
        state.delete_flashcards(summary_id.to_string());
    }
}
