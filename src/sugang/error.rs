use thiserror::Error;

/// Failures talking to the registration site or reading its exports.
#[derive(Debug, Error)]
pub enum SugangError {
    #[error("request to registration site failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to read course workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("course workbook has no worksheet")]
    MissingSheet,
    #[error("course sheet has no header row")]
    MissingHeader,
    #[error("malformed lecture info: {0}")]
    Decode(#[from] serde_json::Error),
}
