use super::dates_panel::compartment;
use super::progress_bar::render_progress_bar;
use super::style;
use crate::egui_app::controller::EguiController;
use crate::egui_app::state::ModelSelector;
use eframe::egui::{self, RichText, Ui};

pub(super) fn render_solver_panel(ui: &mut Ui, controller: &mut EguiController) {
    if !controller.ui.solver.visible {
        return;
    }
    compartment(ui, "Solver", |ui| {
        render_model_row(ui, controller);
        ui.add_space(8.0);
        egui::Grid::new("solver_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label("Minimum budget");
                ui.add(
                    egui::TextEdit::singleline(&mut controller.ui.solver.min_budget)
                        .desired_width(80.0),
                );
                ui.end_row();
                ui.label("Maximum budget");
                ui.add(
                    egui::TextEdit::singleline(&mut controller.ui.solver.max_budget)
                        .desired_width(80.0),
                );
                ui.end_row();
                ui.label("Ratio");
                ui.add(
                    egui::TextEdit::singleline(&mut controller.ui.solver.ratio)
                        .desired_width(80.0),
                );
                ui.end_row();
            });
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let label = controller.ui.solver.solve_label.clone();
            if ui
                .add_enabled(controller.ui.solver.solve_enabled(), egui::Button::new(label))
                .clicked()
            {
                controller.solve();
            }
            let has_result = controller.solved().is_some();
            if ui
                .add_enabled(has_result, egui::Button::new("Explore budgets"))
                .clicked()
            {
                controller.ui.explorer.open = true;
            }
            if !controller.ui.solver.result_text.is_empty() {
                ui.label(&controller.ui.solver.result_text);
            }
        });
        ui.add_space(6.0);
        render_progress_bar(ui, &controller.ui.progress);
    });
}

fn render_model_row(ui: &mut Ui, controller: &mut EguiController) {
    ui.horizontal(|ui| {
        if controller.ui.models.creating_new {
            ui.label("New model name");
            ui.add(
                egui::TextEdit::singleline(&mut controller.ui.models.new_name)
                    .hint_text("name")
                    .desired_width(160.0),
            );
            ui.label(RichText::new(".yaml").color(style::muted_text()));
            if ui.button("Save").clicked() {
                controller.save_model();
            }
            if ui.button("Cancel").clicked() {
                controller.toggle_new_model_form();
            }
        } else {
            ui.label("Risk model");
            model_combo(ui, controller, "solver_model_combo", ModelSelector::Solver);
            if ui.button("Edit...").clicked() {
                controller.open_risk_editor();
            }
            if ui.button("Save as new...").clicked() {
                controller.toggle_new_model_form();
            }
        }
    });
}

/// Stored-model picker; both pickers edit the same selection.
pub(super) fn model_combo(
    ui: &mut Ui,
    controller: &mut EguiController,
    id: &str,
    selector: ModelSelector,
) {
    let selected_text = controller
        .ui
        .models
        .selected
        .clone()
        .unwrap_or_else(|| "No models".to_string());
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_text)
        .width(220.0)
        .show_ui(ui, |ui| {
            for path in &controller.ui.models.models {
                let is_selected = controller.ui.models.selected.as_deref() == Some(path.as_str());
                if ui.selectable_label(is_selected, path).clicked() {
                    picked = Some(path.clone());
                }
            }
        });
    if let Some(path) = picked {
        controller.select_model(path, selector);
    }
}
