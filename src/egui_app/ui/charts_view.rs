use crate::egui_app::charts::ChartSlot;
use eframe::egui::{RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

/// Draw the chart held by `slot`, or nothing before its first dataset.
///
/// The plot id stays fixed per slot, so new data redraws the same plot.
pub(super) fn render_chart(ui: &mut Ui, id: &str, slot: &mut ChartSlot, height: f32) {
    let Some(chart) = slot.get_mut() else {
        return;
    };
    let reset = chart.take_reset();
    let data = chart.data();
    ui.label(RichText::new(&data.title).strong());
    let mut plot = Plot::new(id)
        .height(height)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_drag(false);
    if data.show_legend {
        plot = plot.legend(Legend::default());
    }
    if reset {
        plot = plot.reset();
    }
    plot.show(ui, |plot_ui| {
        for series in &data.series {
            let points = PlotPoints::from(series.points.clone());
            plot_ui.line(
                Line::new(series.label.clone(), points)
                    .color(series.color)
                    .width(1.5),
            );
        }
    });
}
