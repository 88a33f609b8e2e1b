use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaserError {
    #[error("Unknown parameter group: {0}")]
    UnknownGroup(String),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Invalid edit, expected key=value or group.key=value: {0}")]
    InvalidEdit(String),

    #[error("HTTP reqwest error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid base64 payload in field {field}: {source}")]
    InvalidPayload {
        field: &'static str,
        source: base64::DecodeError,
    },

    #[error("Unable to read the time series: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Simulation service failure: {0}")]
    Service(String),

    #[error("No result to write, the display is hidden: {0}")]
    NoResult(String),
}

impl PartialEq for MaserError {
    fn eq(&self, other: &Self) -> bool {
        use MaserError::*;
        match (self, other) {
            (UnknownGroup(a), UnknownGroup(b)) => a == b,
            (UnknownParameter(a), UnknownParameter(b)) => a == b,
            (InvalidEdit(a), InvalidEdit(b)) => a == b,
            (Service(a), Service(b)) => a == b,
            (NoResult(a), NoResult(b)) => a == b,
            (InvalidPayload { field: a, .. }, InvalidPayload { field: b, .. }) => a == b,

            // Wrapped library errors are not comparable: same variant means equal
            (Http(_), Http(_)) => true,
            (Csv(_), Csv(_)) => true,
            (Json(_), Json(_)) => true,
            (Io(_), Io(_)) => true,
            (Config(_), Config(_)) => true,

            _ => false,
        }
    }
}
