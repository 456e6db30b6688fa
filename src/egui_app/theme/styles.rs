//! Theme Styling Functions
//!
//! Helpers that keep frames and answer buttons consistent across views.

use eframe::egui::{self, Color32, CornerRadius, Stroke};
use super::colors;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.window_fill = colors::CARD_BG;
    style.visuals.panel_fill = colors::BG_DARK;
    style.visuals.override_text_color = Some(colors::TEXT_LIGHT);

    style.visuals.widgets.inactive.bg_fill = colors::BUTTON_SECONDARY;
    style.visuals.widgets.inactive.weak_bg_fill = colors::BUTTON_SECONDARY;
    style.visuals.widgets.hovered.bg_fill = colors::ACCENT;
    style.visuals.widgets.hovered.weak_bg_fill = colors::ACCENT;
    style.visuals.widgets.active.bg_fill = colors::ACCENT;

    style.visuals.selection.bg_fill = colors::ACCENT;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    ctx.set_style(style);
}

/// Create a frame style for the top bar
pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Create a frame style for the main panel
pub fn main_panel_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BG_DARK)
        .inner_margin(egui::Margin::same(24))
}

/// Create a frame for summary, quiz and flashcard cards
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CARD_BG)
        .stroke(Stroke::new(1.0, colors::CARD_BORDER))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(16))
}

/// Fill for a quiz option once an answer is locked in.
///
/// The correct option turns green; a wrong pick turns red.
pub fn answer_fill(is_selected: bool, is_correct_option: bool, answered: bool) -> Option<Color32> {
    if !answered {
        return None;
    }
    if is_correct_option {
        Some(colors::SUCCESS)
    } else if is_selected {
        Some(colors::ERROR)
    } else {
        None
    }
}
