use super::jobs::JobMessage;
use super::*;
use crate::api::ApiError;
use crate::model::Budget;

impl EguiController {
    /// Move the explorer to `budget`, clamped to the solved range.
    pub fn set_budget(&mut self, budget: Budget) {
        let Some(range) = self.solved.as_ref().map(|run| run.range) else {
            return;
        };
        let budget = range.clamp(budget);
        self.ui.explorer.budget = budget;
        self.show_budget_selection(budget);
    }

    /// Show the people and groups picked for `budget` in the lists and
    /// the diagram.
    pub(super) fn show_budget_selection(&mut self, budget: Budget) {
        let selection = self
            .solved
            .as_ref()
            .and_then(|run| run.solution.get(budget))
            .cloned();
        match selection {
            Some(selection) => {
                self.ui
                    .diagram
                    .highlight(&selection.people, &selection.groups);
                self.ui.explorer.show_selection(&selection);
            }
            None => {
                tracing::warn!("No selection for budget {budget}");
                self.ui.explorer.clear_selection();
                self.ui.diagram.highlight(&[], &[]);
                self.set_status(
                    format!("No selection for budget {budget}"),
                    StatusTone::Warning,
                );
            }
        }
    }

    /// Ask the backend to write the checklist for the displayed budget.
    pub fn request_checklist(&mut self) {
        if self.solved.is_none() {
            return;
        }
        let Some(token) = self.jobs.requests.begin(Endpoint::Checklist) else {
            self.report_busy(Endpoint::Checklist);
            return;
        };
        let budget = self.ui.explorer.budget;
        self.ui.explorer.checklist_pending = true;
        self.ui.explorer.checklist_text = "Producing checklist...".into();
        let api = self.api.clone();
        self.jobs.spawn(move || JobMessage::ChecklistLoaded {
            token,
            budget,
            result: api.checklist(budget),
        });
    }

    pub(super) fn handle_checklist_loaded(&mut self, budget: Budget, result: Result<String, ApiError>) {
        self.ui.explorer.checklist_pending = false;
        match result {
            Ok(message) => {
                tracing::info!("Checklist for budget {budget}: {message}");
                self.ui.explorer.checklist_text = message;
            }
            Err(err) => {
                tracing::warn!("Checklist for budget {budget} failed: {err}");
                self.ui.explorer.checklist_text = failure_text(&err);
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
    }
}
