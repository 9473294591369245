/**
 * egui Native Desktop App - Main Entry Point
 *
 * Loads configuration, restores any stored session and opens the portal
 * window.
 */
use std::sync::Arc;

use eframe::egui;
use tracing_subscriber::EnvFilter;
use authportal::egui_app::{theme, views, AppState, Config, FileStore, KeyValueStore, SessionStore};
use authportal::shared::PendingRoute;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let config = Config::load()?;

    let filter = EnvFilter::try_new(config.log_filter())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(server_url = config.server_url(), "Starting authportal");

    let runtime = tokio::runtime::Runtime::new()?;
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.storage_path()));
    let redirects = PendingRoute::new();
    let session = Arc::new(SessionStore::from_config(
        &config,
        store,
        Arc::new(redirects.clone()),
    ));
    session.restore();

    let state = AppState::new(session, runtime.handle().clone(), redirects);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Employee Portal",
        options,
        Box::new(|cc| {
            theme::styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(PortalApp { state }))
        }),
    )?;
    Ok(())
}

/// Main application state
struct PortalApp {
    state: AppState,
}

impl eframe::App for PortalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();

        views::render_top_bar(ctx, &mut self.state);

        views::render_main_panel(ctx, &mut self.state);

        ctx.request_repaint();
    }
}
