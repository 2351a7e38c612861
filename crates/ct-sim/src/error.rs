use ct_core::{CoreError, HostAddress};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scenario configuration error: {0}")]
    Config(String),

    #[error("trace line {line}: {reason}")]
    Trace {
        line:   usize,
        reason: String,
    },

    #[error("unknown host {0}")]
    UnknownHost(HostAddress),

    #[error("host store is full at {0} hosts")]
    TooManyHosts(usize),

    #[error("settings error: {0}")]
    Core(#[from] CoreError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
