use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{AppConfig, NetworkSettings};
use crate::http_client;
use crate::model::{
    Budget, Institution, RiskModelQuery, RiskModelSnapshot, SpreadsheetDates, format_iso_date,
};

use super::progress::ProgressSubscription;
use super::wire::{
    self, Accepted, InstitutionPayload, ModelListPayload, NoPayload, RiskModelPayload,
    SolvePayload,
};
use super::{ApiError, Endpoint, RiskModelRequest, SolveReply, SolveRequest};

const MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

/// Blocking client for the backend API; cheap to clone onto worker threads.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base: Url,
    request_timeout: Duration,
    solve_timeout: Duration,
    progress_timeout: Duration,
    max_response_bytes: usize,
}

impl ApiClient {
    pub fn new(base_url: &str, network: &NetworkSettings) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|err| ApiError::InvalidUrl {
            url: base_url.to_string(),
            message: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                message: "not a base URL".to_string(),
            });
        }
        Ok(Self {
            base,
            request_timeout: network.request_timeout(),
            solve_timeout: network.solve_timeout(),
            progress_timeout: network.progress_timeout(),
            max_response_bytes: network.max_response_bytes,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(&config.backend.base_url, &config.network)
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Ask the backend to prepare the spreadsheet for `dates`.
    pub fn load_spreadsheet(&self, dates: &SpreadsheetDates) -> Result<String, ApiError> {
        let params = [
            ("currentDate", format_iso_date(dates.current)),
            ("previousDate", format_iso_date(dates.previous)),
        ];
        let reply: Accepted<NoPayload> =
            self.get(Endpoint::Spreadsheet, &params, self.request_timeout)?;
        Ok(reply.message.unwrap_or_default())
    }

    /// Stored model configuration paths.
    pub fn model_list(&self) -> Result<Vec<String>, ApiError> {
        let reply: Accepted<ModelListPayload> =
            self.get(Endpoint::ModelList, &[], self.request_timeout)?;
        Ok(reply.payload.list)
    }

    /// Sample the coefficient and discount curves of a stored or edited model.
    pub fn risk_model(&self, request: &RiskModelRequest) -> Result<RiskModelSnapshot, ApiError> {
        let mut params = match &request.query {
            RiskModelQuery::ByPath(path) => vec![("path", path.clone())],
            RiskModelQuery::Edited {
                coefficient_kind,
                coefficient_arg,
                discount_kind,
                discount_arg,
            } => vec![
                (
                    "coefficients[risk_factor_coeff_kind]",
                    coefficient_kind.as_wire().to_string(),
                ),
                ("coefficients[arg]", coefficient_arg.clone()),
                (
                    "discount_factor[risk_factor_discount_kind]",
                    discount_kind.as_wire().to_string(),
                ),
                ("discount_factor[arg]", discount_arg.clone()),
            ],
        };
        params.push(("coefficient_samples", request.coefficient_samples.to_string()));
        params.push((
            "discount_factor_samples",
            request.discount_factor_samples.to_string(),
        ));
        let reply: Accepted<RiskModelPayload> =
            self.get(Endpoint::RiskModel, &params, self.request_timeout)?;
        Ok(reply
            .payload
            .into_snapshot(request.coefficient_samples, request.discount_factor_samples))
    }

    /// Persist the current risk model under `config_path`.
    pub fn save_model(&self, config_path: &str) -> Result<(), ApiError> {
        let params = [("config_path", config_path.to_string())];
        let _: Accepted<NoPayload> = self.get(Endpoint::SaveModel, &params, self.request_timeout)?;
        Ok(())
    }

    /// Run the solver for every budget in the range.
    pub fn solve(&self, request: &SolveRequest) -> Result<SolveReply, ApiError> {
        let params = [
            ("Bmin", request.range.min().to_string()),
            ("Bmax", request.range.max().to_string()),
            ("ratio", request.ratio.to_string()),
            ("model_path", request.model_path.clone()),
        ];
        let reply: Accepted<SolvePayload> =
            self.get(Endpoint::Solve, &params, self.solve_timeout)?;
        Ok(SolveReply {
            message: reply.message.unwrap_or_default(),
            solution: reply.payload.response,
        })
    }

    /// Group weights and membership graph of the last solve.
    pub fn institution(&self) -> Result<Institution, ApiError> {
        let reply: Accepted<InstitutionPayload> =
            self.get(Endpoint::Institution, &[], self.request_timeout)?;
        Ok(reply.payload.response)
    }

    /// Write the checklist spreadsheet for one budget.
    pub fn checklist(&self, budget: Budget) -> Result<String, ApiError> {
        let params = [("budget", budget.to_string())];
        let reply: Accepted<NoPayload> =
            self.get(Endpoint::Checklist, &params, self.request_timeout)?;
        Ok(reply.message.unwrap_or_default())
    }

    /// Open the server-push progress stream.
    pub fn subscribe_progress(
        &self,
        cancel: Arc<AtomicBool>,
    ) -> Result<ProgressSubscription, ApiError> {
        let endpoint = Endpoint::Progress;
        let url = self.endpoint_url(endpoint, &[])?;
        let response = http_client::stream_agent(self.progress_timeout)
            .request_url("GET", &url)
            .set("Accept", "text/event-stream")
            .call()
            .map_err(|err| map_call_error(endpoint, self.progress_timeout, err))?;
        Ok(ProgressSubscription::new(
            response.into_reader(),
            cancel,
            self.progress_timeout,
        ))
    }

    fn endpoint_url(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self
            .base
            .join(endpoint.path())
            .map_err(|err| ApiError::InvalidUrl {
                url: self.base.to_string(),
                message: err.to_string(),
            })?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())));
        }
        Ok(url)
    }

    fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<Accepted<T>, ApiError> {
        let url = self.endpoint_url(endpoint, params)?;
        tracing::debug!("GET {url}");
        let response = http_client::agent()
            .request_url("GET", &url)
            .set("Accept", "application/json")
            .timeout(timeout)
            .call()
            .map_err(|err| map_call_error(endpoint, timeout, err))?;
        let body = http_client::read_response_bytes(response, self.max_response_bytes).map_err(
            |err| {
                if http_client::is_timeout_io(&err) {
                    ApiError::TimedOut {
                        endpoint,
                        after: timeout,
                    }
                } else {
                    ApiError::Malformed {
                        endpoint,
                        message: err.to_string(),
                    }
                }
            },
        )?;
        wire::decode(endpoint, &body)
    }
}

fn map_call_error(endpoint: Endpoint, timeout: Duration, err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = http_client::read_response_bytes(response, MAX_ERROR_BODY_BYTES)
                .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
                .unwrap_or_else(|err| err.to_string());
            ApiError::Status {
                endpoint,
                code,
                body,
            }
        }
        ureq::Error::Transport(transport) if http_client::is_timeout_transport(&transport) => {
            ApiError::TimedOut {
                endpoint,
                after: timeout,
            }
        }
        ureq::Error::Transport(transport) => ApiError::Transport {
            endpoint,
            message: transport.to_string(),
        },
    }
}
