use super::jobs::JobMessage;
use super::*;
use crate::api::ApiError;

impl EguiController {
    /// Validate the date fields and ask the backend to load the spreadsheet.
    pub fn load_spreadsheet(&mut self) {
        if !self.ui.dates.load_enabled {
            return;
        }
        let dates = match self.ui.dates.parse() {
            Ok(dates) => dates,
            Err(err) => {
                self.ui.dates.result_text = err.to_string();
                self.set_status(err.to_string(), StatusTone::Warning);
                return;
            }
        };
        let Some(token) = self.jobs.requests.begin(Endpoint::Spreadsheet) else {
            self.report_busy(Endpoint::Spreadsheet);
            return;
        };
        self.ui.dates.load_enabled = false;
        self.ui.dates.result_text = "Loading spreadsheet...".into();
        self.set_status("Loading spreadsheet", StatusTone::Busy);
        tracing::info!(
            "Loading spreadsheet for {} (previous {})",
            self.ui.dates.current,
            self.ui.dates.previous
        );
        let api = self.api.clone();
        self.jobs.spawn(move || JobMessage::SpreadsheetLoaded {
            token,
            result: api.load_spreadsheet(&dates),
        });
    }

    pub(super) fn handle_spreadsheet_loaded(&mut self, result: Result<String, ApiError>) {
        match result {
            Ok(message) => {
                self.ui.dates.result_text = message;
                self.ui.solver.visible = true;
                self.set_status("Spreadsheet loaded", StatusTone::Info);
                self.refresh_model_list(None);
            }
            Err(err) => {
                tracing::warn!("Spreadsheet load failed: {err}");
                self.ui.dates.load_enabled = true;
                self.ui.dates.result_text = failure_text(&err);
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
    }
}
