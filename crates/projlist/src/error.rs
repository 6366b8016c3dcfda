use crate::prelude::f;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error (HTTP {0}): {1}")]
    Server(u16, String),
}

/// Sort an HTTP status into the display categories: 5xx means the backend
/// failed, anything else non-successful is reported as-is.
pub fn classify_status(status: u16) -> Error {
    if (500..600).contains(&status) {
        Error::Server(status, "the service failed to process the request".to_string())
    } else {
        Error::Generic(f!("unexpected response: HTTP {status}"))
    }
}

/// Sort a transport-level failure into the display categories. Requests
/// that never produced a response are network errors; responses with an
/// error status go through [`classify_status`].
pub fn classify_fetch_error(err: &reqwest::Error) -> Error {
    if let Some(status) = err.status() {
        return classify_status(status.as_u16());
    }

    if err.is_timeout() || err.is_connect() {
        Error::Network(err.to_string())
    } else {
        Error::Generic(err.to_string())
    }
}
