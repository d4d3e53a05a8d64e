use reqwest::StatusCode;
use url::Url;

/// How much of an error body ends up in the error message.
const BODY_PREFIX_CHARS: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API answered with anything but 200 OK.
    #[error("figma: {} {url} '{}'", .status.as_u16(), body_prefix(.body))]
    Api {
        url: Url,
        status: StatusCode,
        body: String,
    },

    #[error("unable to decode response from {url}: {source}")]
    Json {
        url: Url,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to decode file from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: figma_api::DecodeError,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Middleware(#[from] reqwest_middleware::Error),

    #[error("invalid access token")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl Error {
    /// The HTTP status, if the API answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status(),
            _ => None,
        }
    }
}

fn body_prefix(body: &str) -> &str {
    match body.char_indices().nth(BODY_PREFIX_CHARS) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
