use super::style;
use crate::egui_app::controller::EguiController;
use eframe::egui::{self, Frame, Margin, RichText, Ui};

/// Spreadsheet date pickers and the load button.
pub(super) fn render_dates_panel(ui: &mut Ui, controller: &mut EguiController) {
    compartment(ui, "Spreadsheet", |ui| {
        egui::Grid::new("dates_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Current date");
                ui.add(
                    egui::TextEdit::singleline(&mut controller.ui.dates.current)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(120.0),
                );
                ui.end_row();
                ui.label("Previous date");
                ui.add(
                    egui::TextEdit::singleline(&mut controller.ui.dates.previous)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(120.0),
                );
                ui.end_row();
            });
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let enabled = controller.ui.dates.load_enabled;
            if ui
                .add_enabled(enabled, egui::Button::new("Load spreadsheet"))
                .clicked()
            {
                controller.load_spreadsheet();
            }
            if !controller.ui.dates.result_text.is_empty() {
                ui.label(&controller.ui.dates.result_text);
            }
        });
    });
}

/// Framed panel section with a heading.
pub(super) fn compartment<R>(
    ui: &mut Ui,
    title: &str,
    add_contents: impl FnOnce(&mut Ui) -> R,
) -> R {
    Frame::new()
        .fill(style::compartment_fill())
        .stroke(style::outer_border())
        .inner_margin(Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).heading());
            ui.add_space(6.0);
            add_contents(ui)
        })
        .inner
}
