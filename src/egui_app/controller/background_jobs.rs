use super::jobs::JobMessage;
use super::*;

impl EguiController {
    /// Apply every result the workers have posted since the last frame.
    pub fn poll_background_jobs(&mut self) {
        while let Ok(message) = self.jobs.try_recv_message() {
            self.handle_job_message(message);
        }
    }

    pub(super) fn handle_job_message(&mut self, message: JobMessage) {
        match message {
            JobMessage::Progress {
                subscription,
                event,
            } => self.handle_progress_event(subscription, event),
            message => {
                let token = match &message {
                    JobMessage::SpreadsheetLoaded { token, .. }
                    | JobMessage::ModelListLoaded { token, .. }
                    | JobMessage::RiskModelLoaded { token, .. }
                    | JobMessage::ModelSaved { token, .. }
                    | JobMessage::Solved { token, .. }
                    | JobMessage::InstitutionLoaded { token, .. }
                    | JobMessage::ChecklistLoaded { token, .. } => *token,
                    JobMessage::Progress { .. } => return,
                };
                if !self.jobs.requests.finish(token) {
                    tracing::debug!("Dropping stale {} reply", token.endpoint());
                    return;
                }
                self.handle_request_result(message);
            }
        }
    }

    fn handle_request_result(&mut self, message: JobMessage) {
        match message {
            JobMessage::SpreadsheetLoaded { result, .. } => self.handle_spreadsheet_loaded(result),
            JobMessage::ModelListLoaded { select, result, .. } => {
                self.handle_model_list_loaded(select, result)
            }
            JobMessage::RiskModelLoaded { result, .. } => self.handle_risk_model_loaded(result),
            JobMessage::ModelSaved {
                config_path,
                result,
                ..
            } => self.handle_model_saved(config_path, result),
            JobMessage::Solved { range, result, .. } => self.handle_solved(range, result),
            JobMessage::InstitutionLoaded { range, result, .. } => {
                self.handle_institution_loaded(range, result)
            }
            JobMessage::ChecklistLoaded { budget, result, .. } => {
                self.handle_checklist_loaded(budget, result)
            }
            JobMessage::Progress {
                subscription,
                event,
            } => self.handle_progress_event(subscription, event),
        }
    }
}
