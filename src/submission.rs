//! # Submission client
//!
//! Sends a snapshot of the parameter store to the MASER simulation service and applies the
//! response to the shared display.
//!
//! ## Remote contract
//!
//! - `POST <endpoint>` with the JSON body produced by [`ParamStore`]'s `Serialize` impl
//! - response `{ "fig": <base64 PNG>, "csv": <base64 CSV> }`
//!
//! ## Ordering
//!
//! Submissions are independent and may overlap. Each carries the generation it was issued
//! with; only the response to the latest generation may touch the display. Older responses,
//! successful or not, are reported as [`SubmitOutcome::Superseded`].
//!
//! ## Failures
//!
//! A failure of the latest submission hides the figure and the download link and sets the
//! shared error indicator; the last good result stays available through
//! [`ResultDisplay::last_result`](crate::display::ResultDisplay::last_result).
use std::{future::Future, sync::Arc};

use tracing::{debug, info, warn};

use crate::{
    constants::DEFAULT_DOWNLOAD_FILENAME,
    display::{RawResult, ResultPayload},
    maser_errors::MaserError,
    parameters::store::ParamStore,
    state::{AppState, PendingSubmission},
};

/// Remote computation service running the MASER simulation.
pub trait SimulationService {
    fn run_maser(
        &self,
        params: &ParamStore,
    ) -> impl Future<Output = Result<RawResult, MaserError>> + Send;
}

/// [`SimulationService`] reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpService {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        HttpService {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SimulationService for HttpService {
    async fn run_maser(&self, params: &ParamStore) -> Result<RawResult, MaserError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<RawResult>().await?)
    }
}

/// How a dispatched submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The response was shown
    Applied,
    /// A newer submission (or an invalid edit) was issued before the response arrived
    Superseded,
}

#[derive(Debug)]
pub struct SubmissionClient<S> {
    service: S,
    state: Arc<AppState>,
    download_name: String,
}

impl<S: SimulationService> SubmissionClient<S> {
    pub fn new(service: S, state: Arc<AppState>) -> Self {
        SubmissionClient {
            service,
            state,
            download_name: DEFAULT_DOWNLOAD_FILENAME.to_string(),
        }
    }

    /// File name offered by the download link.
    pub fn with_download_name(mut self, name: impl Into<String>) -> Self {
        self.download_name = name.into();
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Issue a submission of the current store and send it.
    pub async fn submit(&self) -> Result<SubmitOutcome, MaserError> {
        let pending = self.state.issue_submission();
        self.dispatch(pending).await
    }

    /// Send an issued submission and apply its response.
    ///
    /// Arguments
    /// ---------
    /// * `pending`: the submission returned by a field controller or by [`AppState::issue_submission`]
    ///
    /// Return
    /// ------
    /// * `SubmitOutcome::Applied` if the display now shows this response
    /// * `SubmitOutcome::Superseded` if a newer submission was issued meanwhile
    /// * the service error if the latest submission failed, after the display reported it
    pub async fn dispatch(&self, pending: PendingSubmission) -> Result<SubmitOutcome, MaserError> {
        let generation = pending.generation;
        debug!(generation, "sending parameters to the simulation service");

        let result = self
            .service
            .run_maser(&pending.params)
            .await
            .and_then(ResultPayload::decode);

        match result {
            Ok(payload) => {
                let bytes = payload.figure_png.len();
                if self
                    .state
                    .apply_result(generation, payload, &self.download_name)
                {
                    info!(generation, figure_bytes = bytes, "simulation result displayed");
                    Ok(SubmitOutcome::Applied)
                } else {
                    warn!(generation, "out-of-date simulation result discarded");
                    Ok(SubmitOutcome::Superseded)
                }
            }
            Err(err) => {
                if self.state.apply_failure(generation, &err) {
                    warn!(generation, %err, "simulation request failed");
                    Err(err)
                } else {
                    warn!(generation, %err, "out-of-date simulation request failed");
                    Ok(SubmitOutcome::Superseded)
                }
            }
        }
    }
}
