use thiserror::Error;

/// Failure of a single catalog API call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
  /// The server answered with a non-2xx status
  #[error("{method} {path} → {status}")]
  Status {
    method: String,
    path: &'static str,
    status: u16,
  },
  /// The request never completed
  #[error("{0}")]
  Transport(String),
  /// The body could not be decoded
  #[error("{0}")]
  Decode(String),
}

impl ApiError {
  pub fn is_status(&self) -> bool {
    matches!(self, ApiError::Status { .. })
  }
}

impl From<reqwest::Error> for ApiError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_decode() {
      ApiError::Decode(e.to_string())
    } else {
      ApiError::Transport(e.to_string())
    }
  }
}
