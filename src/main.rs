//! Entry point for the risk desk.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use riskdesk::api::ApiClient;
use riskdesk::backend::BackendProcess;
use riskdesk::config::{self, AppConfig};
use riskdesk::egui_app::controller::EguiController;
use riskdesk::egui_app::ui::{DEFAULT_VIEWPORT_SIZE, EguiApp, MIN_VIEWPORT_SIZE};
use riskdesk::logging;
use riskdesk::model::local_today;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_error) = match config::load_or_default() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    if let Err(err) = logging::init(&config.logging) {
        eprintln!("Logging disabled: {err}");
    }
    if let Some(err) = config_error {
        tracing::warn!("Using default settings: {err}");
    }
    let today = local_today();

    let mut backend = launch_backend(&config);

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(DEFAULT_VIEWPORT_SIZE)
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_title("Risk Desk");
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let result = eframe::run_native(
        "Risk Desk",
        native_options,
        Box::new(move |cc| match ApiClient::from_config(&config) {
            Ok(api) => {
                let mut controller = EguiController::new(api, &config.ui, today);
                controller.set_repaint_context(cc.egui_ctx.clone());
                Ok(Box::new(EguiApp::new(controller)))
            }
            Err(err) => Ok(Box::new(LaunchError {
                message: err.to_string(),
            })),
        }),
    );

    if let Some(process) = backend.as_mut() {
        if let Err(err) = process.shutdown() {
            tracing::error!("{err}");
            return Err(err.into());
        }
    }
    result?;
    Ok(())
}

fn launch_backend(config: &AppConfig) -> Option<BackendProcess> {
    if !config.backend.launch {
        tracing::info!("Backend launch disabled; expecting {}", config.backend.base_url);
        return None;
    }
    match BackendProcess::launch(&config.backend) {
        Ok(process) => Some(process),
        Err(err) => {
            tracing::error!("{err}");
            None
        }
    }
}

struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start the desk");
                ui.label(&self.message);
            });
        });
    }
}
