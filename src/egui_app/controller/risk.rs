use super::jobs::JobMessage;
use super::*;
use crate::api::ApiError;
use crate::egui_app::charts;
use crate::model::RiskModelSnapshot;

impl EguiController {
    /// Open the risk editor on the selected model.
    pub fn open_risk_editor(&mut self) {
        if self.ui.models.selected.is_none() {
            self.set_status("Select a model first", StatusTone::Warning);
            return;
        }
        self.ui.risk.open = true;
        self.reload_selected_risk_model();
    }

    pub fn close_risk_editor(&mut self) {
        self.ui.risk.open = false;
    }

    /// Re-evaluate the curves from the editor fields as they stand.
    pub fn risk_fields_changed(&mut self) {
        let request = self.ui.risk.edited_request();
        self.ui.risk.mark_vectors_sent();
        self.request_risk_model(request);
    }

    pub(super) fn reload_selected_risk_model(&mut self) {
        let Some(path) = self.ui.models.selected.clone() else {
            return;
        };
        let request = self.ui.risk.path_request(&path);
        self.request_risk_model(request);
    }

    /// Issue a risk-model request, or hold it until the running one returns.
    ///
    /// Only the newest held request is kept.
    fn request_risk_model(&mut self, request: RiskModelRequest) {
        let Some(token) = self.jobs.requests.begin(Endpoint::RiskModel) else {
            self.queued_risk_request = Some(request);
            return;
        };
        let api = self.api.clone();
        self.jobs.spawn(move || JobMessage::RiskModelLoaded {
            token,
            result: api.risk_model(&request),
        });
    }

    pub(super) fn handle_risk_model_loaded(&mut self, result: Result<RiskModelSnapshot, ApiError>) {
        match result {
            Ok(snapshot) => {
                self.ui.risk.apply_snapshot(&snapshot);
                self.ui.charts.coefficient.upsert(charts::coefficient_chart(
                    &snapshot.coefficients,
                    snapshot.coefficient_samples,
                ));
                self.ui.charts.discount_factor.upsert(charts::discount_factor_chart(
                    &snapshot.discount_factor,
                    snapshot.discount_factor_samples,
                ));
            }
            Err(err) => {
                tracing::warn!("Risk model evaluation failed: {err}");
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
        if let Some(next) = self.queued_risk_request.take() {
            self.request_risk_model(next);
        }
    }
}
