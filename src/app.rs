//! # MaserApp: parameter form wired to the simulation service
//!
//! [`MaserApp`] is the façade of the crate. It owns:
//!
//! 1. The shared [`AppState`] (parameter store, shared display, request generations).
//! 2. One [`FieldController`] per schema field, built in schema order, group after group.
//! 3. The [`SubmissionClient`] sending parameter snapshots to a [`SimulationService`].
//!
//! ## Typical usage
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), maser_front::maser_errors::MaserError> {
//! use maser_front::{app::MaserApp, config::FrontConfig, env_state::MaserEnv};
//!
//! let env = MaserEnv::new(FrontConfig::default())?;
//! let app = MaserApp::new(env.service());
//!
//! // The default parameters are drawn before any edit
//! app.start().await?;
//!
//! // One change event on the star inclination input
//! app.edit_by_name("i_s", "80").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! [`MaserApp::change`] is synchronous: it validates and stores the value and returns the
//! issued submission. [`MaserApp::dispatch`] performs the network round trip. Callers may keep
//! several dispatches in flight; only the latest submission can update the display.
use std::sync::Arc;

use crate::{
    display::ResultDisplay,
    fields::{
        controller::{ChangeOutcome, FieldController},
        ValidationError,
    },
    maser_errors::MaserError,
    parameters::{schema, store::ParamStore, ParamGroup},
    state::{AppState, PendingSubmission},
    submission::{SimulationService, SubmissionClient, SubmitOutcome},
};

/// What became of one edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Rejected(ValidationError),
    Submitted(SubmitOutcome),
}

#[derive(Debug)]
pub struct MaserApp<S> {
    state: Arc<AppState>,
    fields: Vec<FieldController>,
    client: SubmissionClient<S>,
}

impl<S: SimulationService> MaserApp<S> {
    /// Build the form: seed the store with the defaults, then one controller per field.
    pub fn new(service: S) -> Self {
        let state = Arc::new(AppState::new());
        let fields = schema::all_fields()
            .map(|(group, desc)| FieldController::new(group, desc, state.clone()))
            .collect();
        let client = SubmissionClient::new(service, state.clone());

        MaserApp {
            state,
            fields,
            client,
        }
    }

    /// File name offered by the download link.
    pub fn with_download_name(mut self, name: impl Into<String>) -> Self {
        self.client = self.client.with_download_name(name);
        self
    }

    /// Draw the result of the default parameters.
    pub async fn start(&self) -> Result<SubmitOutcome, MaserError> {
        self.client.submit().await
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    pub fn client(&self) -> &SubmissionClient<S> {
        &self.client
    }

    pub fn params(&self) -> ParamStore {
        self.state.params()
    }

    pub fn display(&self) -> ResultDisplay {
        self.state.display()
    }

    /// Every controller, in schema order.
    pub fn fields(&self) -> &[FieldController] {
        &self.fields
    }

    /// Controllers of one container region, in schema order.
    pub fn group_fields(&self, group: ParamGroup) -> impl Iterator<Item = &FieldController> {
        self.fields.iter().filter(move |f| f.group() == group)
    }

    pub fn field(&self, group: ParamGroup, key: &str) -> Option<&FieldController> {
        self.fields
            .iter()
            .find(|f| f.group() == group && f.key() == key)
    }

    /// Find a controller by `key` or `group.key`.
    pub fn find_field(&self, name: &str) -> Result<&FieldController, MaserError> {
        let found = match name.split_once('.') {
            Some((group, key)) => self.field(group.parse()?, key),
            None => self.fields.iter().find(|f| f.key() == name),
        };
        found.ok_or_else(|| MaserError::UnknownParameter(name.to_string()))
    }

    /// Run one change event synchronously.
    ///
    /// Return
    /// ------
    /// * `Ok(Err(_))` if validation rejected the input
    /// * `Ok(Ok(pending))` with the submission to dispatch otherwise
    pub fn change(
        &self,
        group: ParamGroup,
        key: &str,
        raw: &str,
    ) -> Result<Result<PendingSubmission, ValidationError>, MaserError> {
        let field = self
            .field(group, key)
            .ok_or_else(|| MaserError::UnknownParameter(format!("{group}.{key}")))?;
        Ok(match field.on_change(raw)? {
            ChangeOutcome::Rejected(err) => Err(err),
            ChangeOutcome::Submit(pending) => Ok(pending),
        })
    }

    pub async fn dispatch(&self, pending: PendingSubmission) -> Result<SubmitOutcome, MaserError> {
        self.client.dispatch(pending).await
    }

    /// Run one change event and, when accepted, wait for its submission.
    pub async fn edit(
        &self,
        group: ParamGroup,
        key: &str,
        raw: &str,
    ) -> Result<EditOutcome, MaserError> {
        match self.change(group, key, raw)? {
            Err(err) => Ok(EditOutcome::Rejected(err)),
            Ok(pending) => Ok(EditOutcome::Submitted(self.dispatch(pending).await?)),
        }
    }

    /// Same as [`MaserApp::edit`], the field being named `key` or `group.key`.
    pub async fn edit_by_name(&self, name: &str, raw: &str) -> Result<EditOutcome, MaserError> {
        let field = self.find_field(name)?;
        let (group, key) = (field.group(), field.key());
        self.edit(group, key, raw).await
    }
}
