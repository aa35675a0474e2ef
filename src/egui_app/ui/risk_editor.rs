use super::charts_view::render_chart;
use super::solver_panel::model_combo;
use crate::egui_app::controller::EguiController;
use crate::egui_app::state::ModelSelector;
use crate::model::{CoefficientKind, DiscountKind};
use eframe::egui::{self, Ui};

/// Risk model editor window: curve families, custom vectors, and the
/// sampled curves the backend computed for them.
pub(super) fn render_risk_editor(ctx: &egui::Context, controller: &mut EguiController) {
    let mut open = controller.ui.risk.open;
    if !open {
        return;
    }
    egui::Window::new("Risk model")
        .open(&mut open)
        .default_width(520.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Model");
                model_combo(ui, controller, "risk_model_combo", ModelSelector::RiskEditor);
            });
            ui.separator();
            let mut changed = coefficient_row(ui, controller);
            changed |= discount_row(ui, controller);
            if changed {
                controller.risk_fields_changed();
            }
            ui.separator();
            ui.columns(2, |columns| {
                render_chart(
                    &mut columns[0],
                    "coefficient_chart",
                    &mut controller.ui.charts.coefficient,
                    180.0,
                );
                render_chart(
                    &mut columns[1],
                    "discount_factor_chart",
                    &mut controller.ui.charts.discount_factor,
                    180.0,
                );
            });
        });
    if !open {
        controller.close_risk_editor();
    }
}

fn coefficient_row(ui: &mut Ui, controller: &mut EguiController) -> bool {
    let risk = &mut controller.ui.risk;
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label("Coefficient");
        egui::ComboBox::from_id_salt("coefficient_kind")
            .selected_text(risk.coefficient_kind.label())
            .show_ui(ui, |ui| {
                for kind in CoefficientKind::ALL {
                    changed |= ui
                        .selectable_value(&mut risk.coefficient_kind, kind, kind.label())
                        .changed();
                }
            });
        let editable = risk.coefficient_editable();
        let committed = vector_field(ui, editable, "1, 0.8, 0.5", &mut risk.coefficient_value);
        changed |= committed && risk.vectors_edited();
        ui.label("Samples");
        changed |= ui
            .add(egui::DragValue::new(&mut risk.coefficient_samples).range(1..=1000))
            .changed();
    });
    changed
}

fn discount_row(ui: &mut Ui, controller: &mut EguiController) -> bool {
    let risk = &mut controller.ui.risk;
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label("Discount factor");
        egui::ComboBox::from_id_salt("discount_kind")
            .selected_text(risk.discount_kind.label())
            .show_ui(ui, |ui| {
                for kind in DiscountKind::ALL {
                    changed |= ui
                        .selectable_value(&mut risk.discount_kind, kind, kind.label())
                        .changed();
                }
            });
        let editable = risk.discount_editable();
        let hint = risk.discount_hint();
        let committed = vector_field(ui, editable, hint, &mut risk.discount_value);
        changed |= committed && risk.vectors_edited();
        ui.label("Samples");
        changed |= ui
            .add(egui::DragValue::new(&mut risk.discount_samples).range(1..=1000))
            .changed();
    });
    changed
}

/// Comma-separated vector input; commits on Enter or when focus leaves.
fn vector_field(ui: &mut Ui, editable: bool, hint: &str, value: &mut String) -> bool {
    let response = ui.add_enabled(
        editable,
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(180.0),
    );
    response.lost_focus() && editable
}
