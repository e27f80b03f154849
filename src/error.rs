use thiserror::Error;

/// Failures raised by the campus API client.
///
/// `Api` carries the server's own message so the shell can surface it
/// verbatim; the remaining variants produce stable client-side wording.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connect, DNS, TLS, broken stream).
    #[error("could not reach the campus API: {0}")]
    Transport(String),

    /// The request timed out.
    #[error("the campus API took too long to respond")]
    Timeout,

    /// The server reported failure, via the response envelope or a bare
    /// error status.
    #[error("{message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// The response was JSON but not the shape the client expected.
    #[error("unexpected response from the campus API: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn api(message: impl Into<String>) -> Self {
        ApiError::Api {
            status: None,
            message: message.into(),
        }
    }

    pub fn api_status(status: u16, message: impl Into<String>) -> Self {
        ApiError::Api {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Protocol error code for the shell-facing envelope.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Transport(_) | ApiError::Timeout => "transport_error",
            ApiError::Api { .. } => "api_error",
            ApiError::Decode(_) => "decode_error",
        }
    }
}
