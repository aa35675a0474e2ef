//! JSON reply shapes.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::model::{CoefficientKind, DiscountKind, Institution, RiskModelSnapshot, Solution, vector_text};

use super::{ApiError, Endpoint};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    state: Value,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

/// A successful reply with its optional status line.
#[derive(Debug)]
pub(super) struct Accepted<T> {
    pub message: Option<String>,
    pub payload: T,
}

/// Split a reply body into acceptance or a typed rejection.
pub(super) fn decode<T: DeserializeOwned>(
    endpoint: Endpoint,
    body: &[u8],
) -> Result<Accepted<T>, ApiError> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(|err| ApiError::Malformed {
        endpoint,
        message: err.to_string(),
    })?;
    if envelope.state != Value::Bool(true) {
        return Err(ApiError::Rejected {
            endpoint,
            message: envelope.message,
            error: envelope.error,
        });
    }
    let payload =
        serde_json::from_value(Value::Object(envelope.payload)).map_err(|err| {
            ApiError::Malformed {
                endpoint,
                message: err.to_string(),
            }
        })?;
    Ok(Accepted {
        message: envelope.message,
        payload,
    })
}

#[derive(Debug, Deserialize)]
pub(super) struct NoPayload {}

#[derive(Debug, Deserialize)]
pub(super) struct ModelListPayload {
    pub list: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RiskModelPayload {
    pub coefficients: Vec<f64>,
    pub discount_factor: Vec<f64>,
    #[serde(default)]
    pub coeff_kind: Option<String>,
    #[serde(default)]
    pub coeff_vector: Value,
    #[serde(default)]
    pub discount_kind: Option<String>,
    #[serde(default)]
    pub discount_vector: Value,
}

impl RiskModelPayload {
    pub fn into_snapshot(
        self,
        coefficient_samples: u32,
        discount_factor_samples: u32,
    ) -> RiskModelSnapshot {
        RiskModelSnapshot {
            coefficients: self.coefficients,
            discount_factor: self.discount_factor,
            coeff_kind: self.coeff_kind.as_deref().and_then(CoefficientKind::from_wire),
            coeff_vector: vector_text(&self.coeff_vector),
            discount_kind: self.discount_kind.as_deref().and_then(DiscountKind::from_wire),
            discount_vector: vector_text(&self.discount_vector),
            coefficient_samples,
            discount_factor_samples,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SolvePayload {
    pub response: Solution,
}

#[derive(Debug, Deserialize)]
pub(super) struct InstitutionPayload {
    pub response: Institution,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_boolean_state_is_rejection() {
        let err = decode::<NoPayload>(Endpoint::Spreadsheet, br#"{"state": "", "error": "boom"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                endpoint: Endpoint::Spreadsheet,
                message: None,
                error: Some("boom".into()),
            }
        );
    }

    #[test]
    fn missing_payload_field_is_malformed() {
        let err = decode::<ModelListPayload>(Endpoint::ModelList, br#"{"state": true}"#)
            .unwrap_err();
        assert!(matches!(err, ApiError::Malformed { endpoint: Endpoint::ModelList, .. }));
    }

    #[test]
    fn risk_payload_maps_kinds() {
        let body = br#"{"state": true, "coefficients": [1.0, 0.5], "discount_factor": [1.0],
            "coeff_kind": "custom", "coeff_vector": [1, 0.5], "discount_kind": "sigmoid",
            "discount_vector": null}"#;
        let accepted = decode::<RiskModelPayload>(Endpoint::RiskModel, body).unwrap();
        let snapshot = accepted.payload.into_snapshot(2, 1);
        assert_eq!(snapshot.coeff_kind, Some(CoefficientKind::Custom));
        assert_eq!(snapshot.coeff_vector, "1,0.5");
        assert_eq!(snapshot.discount_kind, Some(DiscountKind::Sigmoid));
        assert_eq!(snapshot.discount_vector, "");
    }
}
