//! # Shared result display
//!
//! The most recent valid result is shown through two shared elements (the figure and the
//! download link) plus one shared error indicator.
//!
//! ```text
//! ResultDisplay
//! ├── image     (src: data URI of the PNG figure, visible flag)
//! ├── download  (href: data URI of the CSV series, filename, visible flag)
//! └── error     (shared error indicator text)
//! ```
//!
//! Suspending the display hides both elements but keeps the last good [`ResultPayload`], so the
//! caller can still inspect it.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        Generation, ERROR_TEXT_PREFIX, FIGURE_DATA_URI_PREFIX, INVALID_INPUT_TEXT,
        SERIES_DATA_URI_PREFIX,
    },
    maser_errors::MaserError,
};

/// Response body of the simulation service.
///
/// # Fields
///
/// * `fig` - base64 encoded PNG figure
/// * `csv` - base64 encoded CSV time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    pub fig: String,
    pub csv: String,
}

impl RawResult {
    /// Encode raw figure and series bytes the way the simulation service does.
    pub fn encode(figure: &[u8], series: &[u8]) -> Self {
        RawResult {
            fig: BASE64.encode(figure),
            csv: BASE64.encode(series),
        }
    }
}

/// Decoded result of one successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPayload {
    pub figure_png: Vec<u8>,
    pub series_csv: Vec<u8>,
    raw: RawResult,
}

impl ResultPayload {
    /// Decode both base64 fields of a service response.
    ///
    /// Return
    /// ------
    /// * `MaserError::InvalidPayload` naming the first field that is not valid base64
    pub fn decode(raw: RawResult) -> Result<Self, MaserError> {
        let figure_png = BASE64
            .decode(raw.fig.trim())
            .map_err(|source| MaserError::InvalidPayload { field: "fig", source })?;
        let series_csv = BASE64
            .decode(raw.csv.trim())
            .map_err(|source| MaserError::InvalidPayload { field: "csv", source })?;

        Ok(ResultPayload {
            figure_png,
            series_csv,
            raw,
        })
    }

    pub fn image_src(&self) -> String {
        format!("{FIGURE_DATA_URI_PREFIX}{}", self.raw.fig.trim())
    }

    pub fn download_href(&self) -> String {
        format!("{SERIES_DATA_URI_PREFIX}{}", self.raw.csv.trim())
    }

    /// Read the header and count the records of the CSV time series.
    pub fn series_summary(&self) -> Result<SeriesSummary, MaserError> {
        let mut reader = csv::Reader::from_reader(self.series_csv.as_slice());
        let columns = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = 0;
        for record in reader.records() {
            record?;
            rows += 1;
        }

        Ok(SeriesSummary { columns, rows })
    }
}

/// Shape of the downloadable time series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSummary {
    pub columns: Vec<String>,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageElement {
    pub src: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub filename: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultDisplay {
    pub image: ImageElement,
    pub download: DownloadLink,
    /// Shared error indicator
    pub error: String,
    /// Generation of the submission currently shown, 0 before the first result
    pub shown_generation: Generation,
    last_result: Option<ResultPayload>,
}

impl ResultDisplay {
    /// Show a successful result, replacing the previous one.
    pub fn show(&mut self, generation: Generation, payload: ResultPayload, download_name: &str) {
        self.error.clear();

        self.image.src = payload.image_src();
        self.image.visible = true;

        self.download.href = payload.download_href();
        self.download.filename = download_name.to_string();
        self.download.visible = true;

        self.shown_generation = generation;
        self.last_result = Some(payload);
    }

    /// Hide the figure and the download link after an invalid edit.
    pub fn suspend(&mut self) {
        self.hide();
        self.error = INVALID_INPUT_TEXT.to_string();
    }

    /// Hide the figure and the download link and report a failed submission.
    pub fn show_failure(&mut self, cause: impl std::fmt::Display) {
        self.hide();
        self.error = format!("{ERROR_TEXT_PREFIX}Simulation request failed: {cause}");
    }

    fn hide(&mut self) {
        self.image.visible = false;
        self.download.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.image.visible && self.download.visible
    }

    /// Last successfully decoded result, kept while the display is suspended.
    pub fn last_result(&self) -> Option<&ResultPayload> {
        self.last_result.as_ref()
    }
}
