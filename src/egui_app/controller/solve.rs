use super::jobs::JobMessage;
use super::*;
use crate::api::{ApiError, SolveReply};
use crate::egui_app::charts;
use crate::model::Institution;

impl EguiController {
    /// Validate the solver form and run a solve across the budget range.
    ///
    /// The solve button stays disabled until the reply arrives.
    pub fn solve(&mut self) {
        if !self.ui.solver.solve_enabled() {
            return;
        }
        let request = match self
            .ui
            .solver
            .request(self.ui.models.selected.as_deref())
        {
            Ok(request) => request,
            Err(err) => {
                self.ui.solver.result_text = err.to_string();
                self.set_status(err.to_string(), StatusTone::Warning);
                return;
            }
        };
        let Some(token) = self.jobs.requests.begin(Endpoint::Solve) else {
            self.report_busy(Endpoint::Solve);
            return;
        };
        self.jobs.requests.abandon(Endpoint::Institution);
        self.jobs.requests.abandon(Endpoint::Checklist);
        self.ui.explorer.checklist_pending = false;
        let range = request.range;
        self.ui.solver.solving = true;
        self.ui.solver.result_text = "Solving...".into();
        self.set_status(
            format!("Solving budgets {}..={}", range.min(), range.max()),
            StatusTone::Busy,
        );
        tracing::info!(
            "Solving {}..={} with ratio {} using {}",
            range.min(),
            range.max(),
            request.ratio,
            request.model_path
        );
        self.start_solve_progress();
        let api = self.api.clone();
        self.jobs.spawn(move || JobMessage::Solved {
            token,
            range,
            result: api.solve(&request),
        });
    }

    pub(super) fn handle_solved(&mut self, range: BudgetRange, result: Result<SolveReply, ApiError>) {
        self.ui.solver.solving = false;
        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!("Solve failed: {err}");
                self.ui.solver.result_text = failure_text(&err);
                self.set_status(err.to_string(), StatusTone::Error);
                self.cancel_solve_progress();
                return;
            }
        };
        self.ui.solver.result_text = reply.message;
        let missing = reply.solution.missing_budgets(&range);
        if missing.is_empty() {
            self.set_status(
                format!("Solved budgets {}..={}", range.min(), range.max()),
                StatusTone::Info,
            );
        } else {
            let listed = missing
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!("Solve reply is missing budgets {listed}");
            self.set_status(
                format!("Solve reply is missing budgets {listed}"),
                StatusTone::Warning,
            );
        }
        self.solved = Some(SolvedRun {
            range,
            solution: reply.solution,
        });
        self.ui.solver.solve_label = "Solve again".into();
        self.ui.dates.load_enabled = true;
        let date_label = self.ui.dates.current.trim().to_string();
        self.ui.explorer.reset_for(range, date_label);
        self.request_institution(range);
    }

    fn request_institution(&mut self, range: BudgetRange) {
        let token = self.jobs.requests.restart(Endpoint::Institution);
        let api = self.api.clone();
        self.jobs.spawn(move || JobMessage::InstitutionLoaded {
            token,
            range,
            result: api.institution(),
        });
    }

    pub(super) fn handle_institution_loaded(
        &mut self,
        range: BudgetRange,
        result: Result<Institution, ApiError>,
    ) {
        match result {
            Ok(institution) => {
                self.ui
                    .charts
                    .group_weights
                    .upsert(charts::group_weight_chart(&institution.group, &range));
                let group_list = institution.group_ids();
                self.ui.diagram.render(&institution.graph, &group_list);
                tracing::info!(
                    "Rendered {} people, {} groups, {} memberships",
                    institution.graph.len(),
                    group_list.len(),
                    institution.graph.edge_count()
                );
            }
            Err(err) => {
                tracing::warn!("Institution load failed: {err}");
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
        let budget = self.ui.explorer.budget;
        self.show_budget_selection(budget);
    }
}
