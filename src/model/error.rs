use thiserror::Error as ThisError;

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("malformed signature entry: {0:?}")]
    MalformedHeader(String),
    #[error("no v1 signature in header")]
    NoSupportedSignature,
    #[error("no signature matches the payload")]
    Mismatch,
}

#[derive(ThisError, Debug)]
pub enum DispatchError {
    #[error("could not connect to backend server at {base_url}")]
    Connect {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("invalid webhook url: {0}")]
    InvalidUrl(String),
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
    #[error("error: {0}")]
    ReqwestError(reqwest::Error),
}
