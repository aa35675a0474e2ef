use serde_json::Value;

/// Family of the risk-factor coefficient curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoefficientKind {
    #[default]
    Linear,
    Uniform,
    Custom,
}

/// Family of the discount-factor curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiscountKind {
    #[default]
    Sigmoid,
    Custom,
}

impl CoefficientKind {
    pub const ALL: [Self; 3] = [Self::Linear, Self::Uniform, Self::Custom];

    pub fn label(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Uniform => "Uniform",
            Self::Custom => "Custom",
        }
    }

    /// Lowercase name the backend expects and reports.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Uniform => "uniform",
            Self::Custom => "custom",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_wire().eq_ignore_ascii_case(value.trim()))
    }

    /// Only the custom family takes a user-supplied vector.
    pub fn accepts_vector(self) -> bool {
        self == Self::Custom
    }
}

impl DiscountKind {
    pub const ALL: [Self; 2] = [Self::Sigmoid, Self::Custom];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sigmoid => "Sigmoid",
            Self::Custom => "Custom",
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Sigmoid => "sigmoid",
            Self::Custom => "custom",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_wire().eq_ignore_ascii_case(value.trim()))
    }

    /// Both families are parameterised: custom takes the factor per sample,
    /// sigmoid takes its two shape parameters.
    pub fn accepts_vector(self) -> bool {
        match self {
            Self::Sigmoid | Self::Custom => true,
        }
    }

    /// Number of entries the argument vector must have, if fixed.
    pub fn required_args(self) -> Option<usize> {
        match self {
            Self::Sigmoid => Some(2),
            Self::Custom => None,
        }
    }
}

/// What the risk-model endpoint should evaluate.
#[derive(Clone, Debug, PartialEq)]
pub enum RiskModelQuery {
    /// Load a stored model configuration.
    ByPath(String),
    /// Evaluate edited, unsaved curve settings.
    Edited {
        coefficient_kind: CoefficientKind,
        coefficient_arg: String,
        discount_kind: DiscountKind,
        discount_arg: String,
    },
}

/// Sampled risk curves plus the settings that produced them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RiskModelSnapshot {
    pub coefficients: Vec<f64>,
    pub discount_factor: Vec<f64>,
    pub coeff_kind: Option<CoefficientKind>,
    pub coeff_vector: String,
    pub discount_kind: Option<DiscountKind>,
    pub discount_vector: String,
    pub coefficient_samples: u32,
    pub discount_factor_samples: u32,
}

/// Render a backend vector argument the way the edit field shows it.
pub fn vector_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(vector_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_round_trip_through_wire_names() {
        assert_eq!(CoefficientKind::from_wire("CUSTOM"), Some(CoefficientKind::Custom));
        assert_eq!(CoefficientKind::from_wire("uniform"), Some(CoefficientKind::Uniform));
        assert_eq!(CoefficientKind::from_wire("sigmoid"), None);
        assert_eq!(DiscountKind::from_wire(" Sigmoid "), Some(DiscountKind::Sigmoid));
        assert!(CoefficientKind::Custom.accepts_vector());
        assert!(!CoefficientKind::Linear.accepts_vector());
        assert!(DiscountKind::Sigmoid.accepts_vector());
        assert_eq!(DiscountKind::Sigmoid.required_args(), Some(2));
        assert_eq!(DiscountKind::Custom.required_args(), None);
    }

    #[test]
    fn vector_text_flattens_arrays() {
        assert_eq!(vector_text(&json!([1, 0.5, [2, 3]])), "1,0.5,2,3");
        assert_eq!(vector_text(&json!(null)), "");
        assert_eq!(vector_text(&json!("1,2")), "1,2");
    }
}
