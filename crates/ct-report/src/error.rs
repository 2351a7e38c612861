//! Error types for ct-report.

use ct_core::CoreError;
use ct_output::OutputError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("invalid report setting: {0}")]
    Invalid(String),

    #[error("report output error: {0}")]
    Output(#[from] OutputError),
}

pub type ReportResult<T> = Result<T, ReportError>;
