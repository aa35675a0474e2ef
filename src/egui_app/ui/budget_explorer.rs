use super::charts_view::render_chart;
use super::diagram_view::render_diagram;
use super::style;
use crate::egui_app::controller::EguiController;
use eframe::egui::{self, RichText, Ui};

/// Budget explorer window: group weights, the budget slider, the network
/// highlight for the chosen budget and the checklist action.
pub(super) fn render_budget_explorer(ctx: &egui::Context, controller: &mut EguiController) {
    let Some(range) = controller.solved().map(|run| run.range) else {
        return;
    };
    let mut open = controller.ui.explorer.open;
    if !open {
        return;
    }
    egui::Window::new(controller.ui.explorer.title())
        .id(egui::Id::new("budget_explorer"))
        .open(&mut open)
        .default_width(760.0)
        .show(ctx, |ui| {
            render_chart(
                ui,
                "group_weight_chart",
                &mut controller.ui.charts.group_weights,
                200.0,
            );
            ui.add_space(8.0);
            let mut budget = controller.ui.explorer.budget;
            let slider = egui::Slider::new(&mut budget, range.min()..=range.max())
                .step_by(1.0)
                .show_value(false)
                .text(controller.ui.explorer.budget_label());
            if ui.add(slider).changed() {
                controller.set_budget(budget);
            }
            ui.add_space(8.0);
            ui.columns(2, |columns| {
                render_diagram(&mut columns[0], &mut controller.ui.diagram, 400.0);
                let name = controller.ui.diagram.selected_name().unwrap_or("").to_string();
                columns[0].label(RichText::new(name).strong());
                render_selection_lists(&mut columns[1], controller);
            });
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let label = controller.ui.explorer.checklist_label();
                let enabled = !controller.ui.explorer.checklist_pending;
                if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
                    controller.request_checklist();
                }
                if !controller.ui.explorer.checklist_text.is_empty() {
                    ui.label(&controller.ui.explorer.checklist_text);
                }
            });
        });
    controller.ui.explorer.open = open;
}

fn render_selection_lists(ui: &mut Ui, controller: &EguiController) {
    let explorer = &controller.ui.explorer;
    list_section(ui, "selection_people", "People", &explorer.people);
    ui.add_space(6.0);
    list_section(ui, "selection_groups", "Groups", &explorer.groups);
}

fn list_section(ui: &mut Ui, id: &str, title: &str, items: &[String]) {
    ui.label(RichText::new(format!("{title} ({})", items.len())).strong());
    egui::ScrollArea::vertical()
        .id_salt(id)
        .max_height(160.0)
        .show(ui, |ui| {
            if items.is_empty() {
                ui.label(RichText::new("None").color(style::muted_text()));
            }
            for item in items {
                ui.label(RichText::new(item).size(12.0));
            }
        });
}
