//! # Application state
//!
//! Page-lifetime state shared by the field controllers and the submission client:
//!
//! - the [`ParamStore`], written only by field controllers,
//! - the shared [`ResultDisplay`],
//! - the request generation counter.
//!
//! Every issued submission takes the next generation. A response may update the display only
//! while its generation is still the latest one; an invalid edit also advances the counter, so a
//! response already in flight cannot bring back a result the user has just invalidated.
//!
//! Locks are never held across an `.await`.
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex, MutexGuard, PoisonError,
};

use tracing::debug;

use crate::{
    constants::Generation,
    display::{ResultDisplay, ResultPayload},
    maser_errors::MaserError,
    parameters::{
        store::{ParamStore, ParamValue},
        ParamGroup,
    },
};

/// A submission issued by a valid edit (or at startup) and not yet sent.
///
/// # Fields
///
/// * `generation` - identifier used to discard out-of-date responses
/// * `params` - snapshot of the parameter store taken when the submission was issued
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub generation: Generation,
    pub params: ParamStore,
}

#[derive(Debug, Default)]
pub struct AppState {
    store: Mutex<ParamStore>,
    display: Mutex<ResultDisplay>,
    latest: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AppState {
    /// Create the state with a store seeded from the schema defaults and an empty display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current parameter values.
    pub fn params(&self) -> ParamStore {
        lock(&self.store).clone()
    }

    /// Copy of the shared display.
    pub fn display(&self) -> ResultDisplay {
        lock(&self.display).clone()
    }

    /// Generation of the most recently issued submission (or invalidation).
    pub fn latest_generation(&self) -> Generation {
        self.latest.load(Ordering::SeqCst)
    }

    /// Write one value and issue the submission carrying it.
    ///
    /// The write, the snapshot and the generation are taken under the store lock, so the
    /// submission with the highest generation always carries every write made before it.
    ///
    /// Return
    /// ------
    /// * `MaserError::UnknownParameter` if `(group, key)` is not part of the schema; nothing is
    ///   issued in that case
    pub(crate) fn write_and_issue(
        &self,
        group: ParamGroup,
        key: &str,
        value: ParamValue,
    ) -> Result<PendingSubmission, MaserError> {
        let mut store = lock(&self.store);
        store.set(group, key, value)?;
        Ok(self.issue_locked(&store))
    }

    /// Take the next generation and snapshot the store.
    pub fn issue_submission(&self) -> PendingSubmission {
        let store = lock(&self.store);
        self.issue_locked(&store)
    }

    fn issue_locked(&self, store: &ParamStore) -> PendingSubmission {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "submission issued");
        PendingSubmission {
            generation,
            params: store.clone(),
        }
    }

    /// Hide the shared display after an invalid edit and discard responses still in flight.
    pub(crate) fn suspend_display(&self) {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "display suspended");
        lock(&self.display).suspend();
    }

    /// Show a result if it answers the latest submission.
    ///
    /// Return
    /// ------
    /// * `true` if the display was updated, `false` if the result is out of date
    pub(crate) fn apply_result(
        &self,
        generation: Generation,
        payload: ResultPayload,
        download_name: &str,
    ) -> bool {
        let mut display = lock(&self.display);
        if generation != self.latest_generation() {
            return false;
        }
        display.show(generation, payload, download_name);
        true
    }

    /// Report a failure if it answers the latest submission.
    pub(crate) fn apply_failure(&self, generation: Generation, cause: &MaserError) -> bool {
        let mut display = lock(&self.display);
        if generation != self.latest_generation() {
            return false;
        }
        display.show_failure(cause);
        true
    }
}
