//! # Command-line sessions
//!
//! Drivers used by the `maser-front` binary, kept in the library so that any
//! [`SimulationService`] can run them:
//!
//! * [`run_edits`] draws the defaults, applies `--set` edits in order and writes the result,
//! * [`interactive`] reads one edit per line and keeps several submissions in flight,
//!   rewriting the files each time a response is shown.
//!
//! Edits are written `key=value` or `group.key=value`. The figure and the time series land in
//! [`FrontConfig::figure_path`] and [`FrontConfig::series_path`].
use std::{fs, sync::Arc};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info, warn};

use crate::{
    app::{EditOutcome, MaserApp},
    config::FrontConfig,
    display::ResultDisplay,
    maser_errors::MaserError,
    submission::{SimulationService, SubmitOutcome},
};

/// Split an edit into the field name and the raw input text, both trimmed.
///
/// The value may be empty, validation then rejects it like an emptied input.
///
/// Return
/// ------
/// * `MaserError::InvalidEdit` if there is no `=` or the name is empty
pub fn split_edit(edit: &str) -> Result<(&str, &str), MaserError> {
    edit.split_once('=')
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| MaserError::InvalidEdit(edit.to_string()))
}

/// Write the figure and the series currently shown by the display.
///
/// Arguments
/// ---------
/// * `display`: the shared display
/// * `config`: gives the output directory and the file names
///
/// Return
/// ------
/// * `MaserError::NoResult` with the shared error text if the display is hidden, nothing is
///   written in that case
pub fn write_outputs(display: &ResultDisplay, config: &FrontConfig) -> Result<(), MaserError> {
    let Some(payload) = display.last_result().filter(|_| display.is_visible()) else {
        return Err(MaserError::NoResult(display.error.clone()));
    };

    fs::create_dir_all(&config.output_dir)?;
    fs::write(config.figure_path(), &payload.figure_png)?;
    fs::write(config.series_path(), &payload.series_csv)?;

    let summary = payload.series_summary()?;
    info!(
        figure = %config.figure_path().display(),
        series = %config.series_path().display(),
        columns = summary.columns.len(),
        rows = summary.rows,
        "result written"
    );
    Ok(())
}

fn warn_rejection<S: SimulationService>(app: &MaserApp<S>, name: &str) {
    if let Ok(field) = app.find_field(name) {
        let widget = field.widget();
        warn!(field = widget.label, error = %widget.error, "input rejected");
    }
}

/// Draw the defaults, apply the edits in order and write the latest result.
///
/// Arguments
/// ---------
/// * `app`: a freshly built application
/// * `config`: output location
/// * `edits`: `key=value` or `group.key=value` strings
///
/// Return
/// ------
/// * `MaserError::InvalidEdit` or `MaserError::UnknownParameter` on a malformed edit
/// * `MaserError::NoResult` if the display is hidden once every edit ran, which is the case
///   when the last edit of a field was rejected
pub async fn run_edits<S: SimulationService>(
    app: &MaserApp<S>,
    config: &FrontConfig,
    edits: &[String],
) -> Result<(), MaserError> {
    app.start().await?;

    for edit in edits {
        let (name, value) = split_edit(edit)?;
        match app.edit_by_name(name, value).await? {
            EditOutcome::Rejected(_) => warn_rejection(app, name),
            EditOutcome::Submitted(outcome) => info!(field = name, ?outcome, "edit applied"),
        }
    }

    write_outputs(&app.display(), config)
}

/// Line counts of an interactive session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Malformed lines and lines naming no field
    pub ignored: usize,
    pub rejected: usize,
    pub submitted: usize,
    /// Number of times the figure and the series were written, startup included
    pub writes: usize,
}

/// Read edits line by line until the end of `input`.
///
/// Blank lines and lines starting with `#` are skipped. Malformed lines are logged and
/// skipped. Each accepted edit is dispatched in its own task; the files are rewritten only
/// when a response is [`SubmitOutcome::Applied`]. The function returns once every dispatch
/// has completed.
pub async fn interactive<S, R>(
    app: Arc<MaserApp<S>>,
    config: Arc<FrontConfig>,
    input: R,
) -> Result<SessionSummary, MaserError>
where
    S: SimulationService + Send + Sync + 'static,
    R: AsyncBufRead + Unpin,
{
    let mut summary = SessionSummary::default();

    match app.start().await {
        Ok(SubmitOutcome::Applied) => {
            write_outputs(&app.display(), &config)?;
            summary.writes += 1;
        }
        Ok(SubmitOutcome::Superseded) => {}
        Err(err) => error!(%err, "initial simulation failed"),
    }

    let mut lines = input.lines();
    let mut in_flight = tokio::task::JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let edit = split_edit(line).and_then(|(name, value)| {
            app.find_field(name)
                .map(|field| (field.group(), field.key(), value))
        });
        let (group, key, value) = match edit {
            Ok(edit) => edit,
            Err(err) => {
                warn!(%err, "ignored line");
                summary.ignored += 1;
                continue;
            }
        };

        match app.change(group, key, value)? {
            Err(_) => {
                warn_rejection(&*app, key);
                summary.rejected += 1;
            }
            Ok(pending) => {
                summary.submitted += 1;
                let app = Arc::clone(&app);
                let config = Arc::clone(&config);
                in_flight.spawn(async move {
                    match app.dispatch(pending).await {
                        Ok(SubmitOutcome::Applied) => {
                            write_outputs(&app.display(), &config).map(|_| true)
                        }
                        Ok(SubmitOutcome::Superseded) => Ok(false),
                        Err(err) => {
                            error!(%err, "simulation failed");
                            Ok(false)
                        }
                    }
                });
            }
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        match joined {
            Ok(Ok(true)) => summary.writes += 1,
            Ok(Ok(false)) => {}
            Ok(Err(err)) => error!(%err, "unable to write the result"),
            Err(err) => error!(%err, "submission task aborted"),
        }
    }
    Ok(summary)
}
