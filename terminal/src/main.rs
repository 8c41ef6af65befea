//! PaperTrade desktop client entry point.
//!
//! Loads `.env`, validates configuration, starts logging, enters the shared
//! Tokio runtime and opens the egui window.

use std::error::Error;
use std::time::Duration;

use papertrade::app::App;
use papertrade::config::ClientConfig;
use papertrade::debug::{self, DebugConfig};
use papertrade::ui::{self, theme::Theme, widgets::notifications::NotificationManager};
use papertrade::utils::runtime::runtime;
use shared::ThemePreference;

const WINDOW_TITLE: &str = "PaperTrade";

/// Idle repaint interval so timers and pushed prices show up without input.
const REPAINT_INTERVAL: Duration = Duration::from_millis(250);

struct PaperTradeApp {
    app: App,
    notifications: NotificationManager,
    applied_theme: Option<ThemePreference>,
}

impl PaperTradeApp {
    fn new(app: App) -> Self {
        Self {
            app,
            notifications: NotificationManager::new(),
            applied_theme: None,
        }
    }

    /// Re-apply visuals when the saved preference changes.
    fn sync_theme(&mut self, ctx: &egui::Context) {
        let preference = self
            .app
            .state
            .try_read()
            .and_then(|state| state.profile.settings.as_ref().map(|s| s.theme))
            .unwrap_or_default();
        if self.applied_theme != Some(preference) {
            Theme::apply(ctx, preference);
            self.applied_theme = Some(preference);
        }
    }
}

impl eframe::App for PaperTradeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.app.on_tick();
        self.sync_theme(ctx);
        ui::render(ctx, &mut self.app, &mut self.notifications);
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; variables may come from the environment.
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = ClientConfig::load()?;
    debug::init_logger(&DebugConfig::for_client(&config));
    tracing::info!(
        api_url = %config.api_url,
        price_stream = %config.price_stream_url(),
        dotenv = dotenv_loaded,
        "Starting PaperTrade"
    );

    let rt = runtime()?;
    let _guard = rt.enter();

    let app = App::new(config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([960.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(PaperTradeApp::new(app)))),
    )?;

    tracing::info!("Window closed, shutting down");
    Ok(())
}
