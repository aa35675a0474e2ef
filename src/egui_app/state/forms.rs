use time::Date;

use crate::api::SolveRequest;
use crate::config::UiDefaults;
use crate::model::{BudgetRange, SpreadsheetDates, ValidationError, format_iso_date};

/// Spreadsheet date pickers and the load button.
#[derive(Clone, Debug, PartialEq)]
pub struct DateFormState {
    /// `YYYY-MM-DD` text of the current date.
    pub current: String,
    /// `YYYY-MM-DD` text of the previous date.
    pub previous: String,
    pub load_enabled: bool,
    /// Message from the last load attempt.
    pub result_text: String,
}

impl DateFormState {
    pub fn for_today(today: Date) -> Self {
        let dates = SpreadsheetDates::defaults_for(today);
        Self {
            current: format_iso_date(dates.current),
            previous: format_iso_date(dates.previous),
            load_enabled: true,
            result_text: String::new(),
        }
    }

    pub fn parse(&self) -> Result<SpreadsheetDates, ValidationError> {
        SpreadsheetDates::parse(&self.current, &self.previous)
    }
}

/// Which of the two model pickers the user touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelSelector {
    Solver,
    RiskEditor,
}

/// Stored model configurations, shared by both pickers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelSelectState {
    pub models: Vec<String>,
    pub selected: Option<String>,
    /// Solver panel shows the "new model name" form instead of the picker.
    pub creating_new: bool,
    pub new_name: String,
}

impl ModelSelectState {
    /// Replace the list, keeping the selection when it still exists.
    pub fn set_models(&mut self, models: Vec<String>, prefer: Option<&str>) {
        let keep = prefer
            .or(self.selected.as_deref())
            .filter(|path| models.iter().any(|m| m == path))
            .map(str::to_string);
        self.selected = keep.or_else(|| models.first().cloned());
        self.models = models;
    }

    /// Config path the new-model form would save to.
    pub fn new_model_path(&self) -> Result<String, ValidationError> {
        let name = self.new_name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingModelName);
        }
        if name.ends_with(".yaml") {
            return Ok(name.to_string());
        }
        Ok(format!("{name}.yaml"))
    }
}

/// Solve inputs and the solve button.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverFormState {
    /// Revealed once a spreadsheet is loaded.
    pub visible: bool,
    pub min_budget: String,
    pub max_budget: String,
    pub ratio: String,
    pub solving: bool,
    pub solve_label: String,
    /// Message from the last solve attempt.
    pub result_text: String,
}

impl SolverFormState {
    pub fn from_defaults(defaults: &UiDefaults) -> Self {
        Self {
            visible: false,
            min_budget: defaults.min_budget.to_string(),
            max_budget: defaults.max_budget.to_string(),
            ratio: defaults.ratio.to_string(),
            solving: false,
            solve_label: "Solve".into(),
            result_text: String::new(),
        }
    }

    pub fn solve_enabled(&self) -> bool {
        self.visible && !self.solving
    }

    /// Validate the fields into a request for `model_path`.
    pub fn request(&self, model_path: Option<&str>) -> Result<SolveRequest, ValidationError> {
        let range = BudgetRange::parse(&self.min_budget, &self.max_budget)?;
        let ratio = self
            .ratio
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|ratio| ratio.is_finite())
            .ok_or_else(|| ValidationError::InvalidRatio {
                value: self.ratio.clone(),
            })?;
        let model_path = model_path.ok_or(ValidationError::MissingModel)?;
        Ok(SolveRequest {
            range,
            ratio,
            model_path: model_path.to_string(),
        })
    }
}
