//! Domain types exchanged with the analytical backend.

mod dates;
mod graph;
mod risk;
mod solution;

pub use dates::{SpreadsheetDates, format_iso_date, local_today, parse_iso_date};
pub use graph::{Graph, GroupWeights, Institution, Membership};
pub use risk::{CoefficientKind, DiscountKind, RiskModelQuery, RiskModelSnapshot, vector_text};
pub use solution::{Budget, BudgetRange, MAX_BUDGET_SPAN, Selection, Solution};

use thiserror::Error;

/// Rejected form input, reported before any request is issued.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("Previous date {previous} must be before current date {current}")]
    DatesOutOfOrder { current: String, previous: String },
    #[error("Budget '{value}' is not a whole number")]
    InvalidBudget { value: String },
    #[error("Budgets must be non-negative (got {min}..{max})")]
    NegativeBudget { min: Budget, max: Budget },
    #[error("Minimum budget {min} exceeds maximum budget {max}")]
    BudgetOrder { min: Budget, max: Budget },
    #[error("Budget range {min}..{max} spans more than {limit} budgets")]
    BudgetSpan { min: Budget, max: Budget, limit: Budget },
    #[error("Ratio '{value}' is not a number")]
    InvalidRatio { value: String },
    #[error("Select a model first")]
    MissingModel,
    #[error("Enter a name for the new model")]
    MissingModelName,
}
