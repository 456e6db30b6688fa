//! Theme Module
//!
//! Color scheme and styling helpers for the desktop shell.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::card_frame().show(ui, |ui| {
//!     ui.colored_label(colors::TEXT_LIGHT, "Summary");
//! });
//! ```

pub mod colors;
pub mod styles;
