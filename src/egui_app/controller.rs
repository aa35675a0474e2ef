//! Controller bridging backend calls to the egui state.
//!
//! Every backend call runs on a worker thread and reports through the job
//! channel; [`EguiController::poll_background_jobs`] applies the results on
//! the UI thread once per frame.

mod background_jobs;
mod explorer;
mod jobs;
mod models;
mod progress;
mod requests;
mod risk;
mod solve;
mod spreadsheet;
#[cfg(test)]
mod test_support;

use time::Date;

use crate::api::{ApiClient, Endpoint, RiskModelRequest};
use crate::config::UiDefaults;
use crate::egui_app::state::*;
use crate::egui_app::ui::style::StatusTone;
use crate::model::{BudgetRange, Solution};
use jobs::ControllerJobs;

/// Last successful solve and the range it was asked for.
#[derive(Clone, Debug, PartialEq)]
pub struct SolvedRun {
    pub range: BudgetRange,
    pub solution: Solution,
}

/// Maintains app state and bridges backend calls to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    api: ApiClient,
    jobs: ControllerJobs,
    solved: Option<SolvedRun>,
    queued_risk_request: Option<RiskModelRequest>,
}

impl EguiController {
    pub fn new(api: ApiClient, defaults: &UiDefaults, today: Date) -> Self {
        Self {
            ui: UiState::new(defaults, today),
            api,
            jobs: ControllerJobs::new(),
            solved: None,
            queued_risk_request: None,
        }
    }

    /// Let worker threads wake the UI when they post a result.
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.jobs.set_repaint_context(ctx);
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// True while any request or the progress stream is still running.
    pub fn has_pending_jobs(&self) -> bool {
        self.jobs.has_pending()
    }

    pub fn is_request_in_flight(&self, endpoint: Endpoint) -> bool {
        self.jobs.requests.is_in_flight(endpoint)
    }

    pub fn solved(&self) -> Option<&SolvedRun> {
        self.solved.as_ref()
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text, tone);
    }

    fn report_busy(&mut self, endpoint: Endpoint) {
        tracing::debug!("Rejected {endpoint}: request already in flight");
        self.set_status(format!("{endpoint} already running"), StatusTone::Warning);
    }
}

/// Text shown in a result label after a failed call.
fn failure_text(err: &crate::api::ApiError) -> String {
    err.backend_message()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string())
}
