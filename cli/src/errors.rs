use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no access token, pass --token or set FIGMA_TOKEN")]
    MissingToken,

    #[error(transparent)]
    Client(#[from] figma_client::Error),

    #[error("unable to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: figma_api::DecodeError,
    },

    #[error("unable to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
