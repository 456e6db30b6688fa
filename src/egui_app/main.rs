/**
 * StudyReel Desktop - Main Entry Point
 *
 * Loads `.env`, sets up tracing, restores the saved session and opens the
 * window.
 */
use eframe::egui;
use studyreel::egui_app::{theme::styles, views, AppState};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let state = AppState::new()?;
    tracing::info!(server = %state.config.server_url(), "Starting StudyReel");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 540.0]),
        ..Default::default()
    };
    eframe::run_native(
        "StudyReel",
        options,
        Box::new(|cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(StudyReelApp { state }))
        }),
    )?;
    Ok(())
}

struct StudyReelApp {
    state: AppState,
}

impl eframe::App for StudyReelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);

        ctx.request_repaint();
    }
}
