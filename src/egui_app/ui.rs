//! egui renderer for the risk desk.

mod budget_explorer;
mod charts_view;
mod dates_panel;
mod diagram_view;
mod progress_bar;
mod risk_editor;
mod solver_panel;
pub mod style;

use crate::egui_app::controller::EguiController;
use eframe::egui::{self, Frame, Margin, RichText, Vec2};

/// Smallest window the panels stay usable in.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(500.0, 480.0);
/// Window size on first launch.
pub const DEFAULT_VIEWPORT_SIZE: Vec2 = Vec2::new(1040.0, 900.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
    show_log: bool,
}

impl EguiApp {
    pub fn new(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
            show_log: false,
        }
    }

    pub fn controller(&self) -> &EguiController {
        &self.controller
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::light();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_tertiary)
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Risk Desk").strong());
                    ui.separator();
                    ui.label(
                        RichText::new(self.controller.api().base_url().as_str())
                            .color(palette.text_muted),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.toggle_value(&mut self.show_log, "Log");
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(style::palette().bg_tertiary)
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(Vec2::splat(14.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 6.0, status.badge_color);
                    ui.label(RichText::new(&status.badge_label).strong());
                    ui.separator();
                    ui.label(&status.text);
                });
            });
    }

    fn render_log_window(&mut self, ctx: &egui::Context) {
        if !self.show_log {
            return;
        }
        let log = self.controller.ui.status.log_text();
        egui::Window::new("Status log")
            .open(&mut self.show_log)
            .default_size([420.0, 260.0])
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        ui.label(RichText::new(log).monospace().size(11.0));
                    });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                dates_panel::render_dates_panel(ui, &mut self.controller);
                ui.add_space(12.0);
                solver_panel::render_solver_panel(ui, &mut self.controller);
            });
        });
        risk_editor::render_risk_editor(ctx, &mut self.controller);
        budget_explorer::render_budget_explorer(ctx, &mut self.controller);
        self.render_log_window(ctx);
        if self.controller.ui.progress.is_streaming() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}
