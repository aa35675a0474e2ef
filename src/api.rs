//! Typed client for the analytical backend's local HTTP API.
//!
//! Every reply is a JSON object carrying a `state` flag. Anything other than
//! `true` is a rejection whose `error`/`message` text is surfaced as-is.

mod client;
mod errors;
mod progress;
mod wire;

pub use client::ApiClient;
pub use errors::ApiError;
pub use progress::{ProgressSubscription, parse_progress_line};

use std::fmt;

use crate::model::{BudgetRange, RiskModelQuery, Solution};

/// Endpoints the desk talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Endpoint {
    Spreadsheet,
    ModelList,
    RiskModel,
    SaveModel,
    Solve,
    Institution,
    Checklist,
    Progress,
}

impl Endpoint {
    pub const ALL: [Self; 8] = [
        Self::Spreadsheet,
        Self::ModelList,
        Self::RiskModel,
        Self::SaveModel,
        Self::Solve,
        Self::Institution,
        Self::Checklist,
        Self::Progress,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Spreadsheet => "spreadsheet",
            Self::ModelList => "model_list",
            Self::RiskModel => "risk_model",
            Self::SaveModel => "save_model",
            Self::Solve => "solve",
            Self::Institution => "institution",
            Self::Checklist => "checklist",
            Self::Progress => "progress",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// Parameters of a risk-model evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct RiskModelRequest {
    pub query: RiskModelQuery,
    pub coefficient_samples: u32,
    pub discount_factor_samples: u32,
}

/// Parameters of a solve across a budget range.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveRequest {
    pub range: BudgetRange,
    pub ratio: f64,
    pub model_path: String,
}

/// A successful solve: the backend's summary line and the per-budget picks.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveReply {
    pub message: String,
    pub solution: Solution,
}
