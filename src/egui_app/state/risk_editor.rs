use crate::api::RiskModelRequest;
use crate::config::UiDefaults;
use crate::model::{CoefficientKind, DiscountKind, RiskModelQuery, RiskModelSnapshot};

/// Risk model editor window.
///
/// The coefficient field keeps its text while its kind is not custom, so
/// switching back to custom restores what the user typed. The discount field
/// is always editable: sigmoid takes two shape parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct RiskEditorState {
    pub open: bool,
    pub coefficient_kind: CoefficientKind,
    pub coefficient_value: String,
    pub coefficient_samples: u32,
    pub discount_kind: DiscountKind,
    pub discount_value: String,
    pub discount_samples: u32,
    /// Vector texts as last sent or reported, used to skip no-op commits.
    sent_coefficient: String,
    sent_discount: String,
}

impl RiskEditorState {
    pub fn from_defaults(defaults: &UiDefaults) -> Self {
        Self {
            open: false,
            coefficient_kind: CoefficientKind::default(),
            coefficient_value: String::new(),
            coefficient_samples: defaults.coefficient_samples,
            discount_kind: DiscountKind::default(),
            discount_value: String::new(),
            discount_samples: defaults.discount_factor_samples,
            sent_coefficient: String::new(),
            sent_discount: String::new(),
        }
    }

    pub fn coefficient_editable(&self) -> bool {
        self.coefficient_kind.accepts_vector()
    }

    pub fn discount_editable(&self) -> bool {
        self.discount_kind.accepts_vector()
    }

    pub fn discount_hint(&self) -> &'static str {
        match self.discount_kind.required_args() {
            Some(2) => "steepness, midpoint",
            _ => "1, 0.9, 0.8",
        }
    }

    /// True when either vector field differs from what was last sent.
    pub fn vectors_edited(&self) -> bool {
        self.coefficient_value.trim() != self.sent_coefficient
            || self.discount_value.trim() != self.sent_discount
    }

    /// Record the current vector texts as submitted.
    pub fn mark_vectors_sent(&mut self) {
        self.sent_coefficient = self.coefficient_value.trim().to_string();
        self.sent_discount = self.discount_value.trim().to_string();
    }

    /// Request that loads a stored model.
    pub fn path_request(&self, path: &str) -> RiskModelRequest {
        self.request(RiskModelQuery::ByPath(path.to_string()))
    }

    /// Request that evaluates the fields as edited.
    pub fn edited_request(&self) -> RiskModelRequest {
        self.request(RiskModelQuery::Edited {
            coefficient_kind: self.coefficient_kind,
            coefficient_arg: self.coefficient_value.trim().to_string(),
            discount_kind: self.discount_kind,
            discount_arg: self.discount_value.trim().to_string(),
        })
    }

    fn request(&self, query: RiskModelQuery) -> RiskModelRequest {
        RiskModelRequest {
            query,
            coefficient_samples: self.coefficient_samples.max(1),
            discount_factor_samples: self.discount_samples.max(1),
        }
    }

    /// Show what the backend reports for the evaluated model.
    ///
    /// Empty vectors (named families) leave the typed custom text alone.
    pub fn apply_snapshot(&mut self, snapshot: &RiskModelSnapshot) {
        if let Some(kind) = snapshot.coeff_kind {
            self.coefficient_kind = kind;
        }
        if !snapshot.coeff_vector.is_empty() {
            self.coefficient_value = snapshot.coeff_vector.clone();
        }
        if let Some(kind) = snapshot.discount_kind {
            self.discount_kind = kind;
        }
        if !snapshot.discount_vector.is_empty() {
            self.discount_value = snapshot.discount_vector.clone();
        }
        self.mark_vectors_sent();
    }
}
