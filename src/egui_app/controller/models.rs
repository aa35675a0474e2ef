use super::jobs::JobMessage;
use super::*;
use crate::api::ApiError;

impl EguiController {
    /// Fetch the stored model list, then select `select` if it is listed.
    pub fn refresh_model_list(&mut self, select: Option<String>) {
        let token = self.jobs.requests.restart(Endpoint::ModelList);
        let api = self.api.clone();
        self.jobs.spawn(move || JobMessage::ModelListLoaded {
            token,
            select,
            result: api.model_list(),
        });
    }

    pub(super) fn handle_model_list_loaded(
        &mut self,
        select: Option<String>,
        result: Result<Vec<String>, ApiError>,
    ) {
        match result {
            Ok(models) => {
                let count = models.len();
                self.ui.models.set_models(models, select.as_deref());
                if count == 0 {
                    self.set_status("No stored risk models found", StatusTone::Warning);
                } else {
                    tracing::info!("Loaded {count} stored risk models");
                }
            }
            Err(err) => {
                tracing::warn!("Model list failed: {err}");
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
    }

    /// Pick a model in either selector; both show the same selection.
    ///
    /// Picking from the risk editor reloads the editor for that model.
    pub fn select_model(&mut self, path: String, selector: ModelSelector) {
        let changed = self.ui.models.selected.as_deref() != Some(path.as_str());
        self.ui.models.selected = Some(path);
        if changed && selector == ModelSelector::RiskEditor && self.ui.risk.open {
            self.reload_selected_risk_model();
        }
    }

    pub fn toggle_new_model_form(&mut self) {
        self.ui.models.creating_new = !self.ui.models.creating_new;
    }

    /// Save the model under the name typed in the new-model form.
    pub fn save_model(&mut self) {
        let config_path = match self.ui.models.new_model_path() {
            Ok(path) => path,
            Err(err) => {
                self.set_status(err.to_string(), StatusTone::Warning);
                return;
            }
        };
        let Some(token) = self.jobs.requests.begin(Endpoint::SaveModel) else {
            self.report_busy(Endpoint::SaveModel);
            return;
        };
        self.set_status(format!("Saving {config_path}"), StatusTone::Busy);
        let api = self.api.clone();
        self.jobs.spawn(move || {
            let result = api.save_model(&config_path);
            JobMessage::ModelSaved {
                token,
                config_path,
                result,
            }
        });
    }

    pub(super) fn handle_model_saved(&mut self, config_path: String, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                tracing::info!("Saved risk model {config_path}");
                self.set_status(format!("Saved {config_path}"), StatusTone::Info);
                self.ui.models.creating_new = false;
                self.ui.models.new_name.clear();
                self.refresh_model_list(Some(config_path));
            }
            Err(err) => {
                tracing::warn!("Saving {config_path} failed: {err}");
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
    }
}
