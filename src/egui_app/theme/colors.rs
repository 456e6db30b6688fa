//! Color Constants
//!
//! Palette for the StudyReel desktop shell: dark slate surfaces with an
//! indigo accent, green/red reserved for answer feedback.

use egui::Color32;

/// Window background
pub const BG_DARK: Color32 = Color32::from_rgb(0x14, 0x17, 0x22);

/// Top bar background
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x1C, 0x20, 0x2E);

/// Card surface
pub const CARD_BG: Color32 = Color32::from_rgb(0x23, 0x28, 0x3A);

/// Card border
pub const CARD_BORDER: Color32 = Color32::from_rgb(0x33, 0x3A, 0x52);

/// Primary accent (buttons, highlights)
pub const ACCENT: Color32 = Color32::from_rgb(0x63, 0x66, 0xF1);

/// Secondary button background
pub const BUTTON_SECONDARY: Color32 = Color32::from_rgb(0x37, 0x3E, 0x56);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xEE, 0xF0, 0xF6);

/// Muted text
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x9A, 0xA3, 0xBA);

/// Correct answer / success
pub const SUCCESS: Color32 = Color32::from_rgb(0x22, 0xC5, 0x5E);

/// Wrong answer / error
pub const ERROR: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);

/// Trophy and notices
pub const WARNING: Color32 = Color32::from_rgb(0xEA, 0xB3, 0x08);
