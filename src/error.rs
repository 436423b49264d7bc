use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors raised inside the service.
///
/// None of these cross the HTTP boundary: the accept route reduces forwarding
/// failures to a `Failed` body and the flush loop only logs sink failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid configuration: {0}")]
    Config(#[from] rocket::figment::Error),

    #[error("flush interval must be greater than zero")]
    ZeroFlushInterval,

    #[error("failed to open unique request log {path}: {source}")]
    OpenLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write flush record: {0}")]
    SinkWrite(#[source] io::Error),

    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to encode forward payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("{method} request to {endpoint} failed: {source}")]
    Forward {
        method: &'static str,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}
