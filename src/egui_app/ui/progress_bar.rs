use super::style;
use crate::egui_app::state::{ProgressPhase, SolveProgressState};
use eframe::egui::{ProgressBar, RichText, Ui};

/// Solve progress, hidden until the first solve starts.
pub(super) fn render_progress_bar(ui: &mut Ui, progress: &SolveProgressState) {
    if !progress.is_visible() {
        return;
    }
    let mut bar = ProgressBar::new(progress.fraction())
        .desired_width(ui.available_width().min(480.0))
        .text(progress.label());
    if progress.is_streaming() {
        bar = bar.animate(true);
    }
    ui.add(bar);
    if progress.phase == ProgressPhase::Interrupted {
        ui.label(
            RichText::new("Progress updates stopped before the solver finished")
                .color(style::palette().warning),
        );
    }
}
