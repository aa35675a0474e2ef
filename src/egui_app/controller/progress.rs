use super::jobs::ProgressEvent;
use super::*;

impl EguiController {
    /// Reset the bar and subscribe to the backend's progress stream.
    pub(super) fn start_solve_progress(&mut self) {
        self.ui.progress.start();
        let subscription = self.jobs.start_progress(self.api.clone());
        tracing::debug!("Opened progress subscription {subscription}");
    }

    /// Stop listening and freeze the bar at its last value.
    pub(super) fn cancel_solve_progress(&mut self) {
        self.jobs.cancel_progress();
        self.ui.progress.interrupt();
    }

    pub(super) fn handle_progress_event(&mut self, subscription: u64, event: ProgressEvent) {
        if !self.jobs.is_current_progress(subscription) {
            return;
        }
        match event {
            ProgressEvent::Value(percent) => {
                if self.ui.progress.apply(percent) {
                    tracing::info!("Solve progress complete");
                    self.jobs.finish_progress();
                }
            }
            ProgressEvent::Failed(err) => {
                tracing::warn!("Progress stream failed at {:.1}%: {err}", self.ui.progress.percent);
                self.jobs.finish_progress();
                self.ui.progress.interrupt();
            }
            ProgressEvent::Ended => {
                self.jobs.finish_progress();
                if self.ui.progress.is_streaming() {
                    tracing::warn!(
                        "Progress stream ended at {:.1}% before completion",
                        self.ui.progress.percent
                    );
                    self.ui.progress.interrupt();
                }
            }
        }
    }
}
