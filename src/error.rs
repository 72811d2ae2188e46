use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub(crate) type Result<T> = std::result::Result<T, SpaceGraphError>;

#[derive(Debug, Error)]
pub(crate) enum SpaceGraphError {
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("{url} returned status {code}: {body}")]
    Status { url: String, code: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid IRI {iri:?}: {source}")]
    Iri {
        iri: String,
        source: oxrdf::IriParseError,
    },

    #[error("Turtle error: {0}")]
    Turtle(#[from] oxttl::TurtleParseError),

    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("no resource found for {text:?}")]
    NoMatch { text: String },
}

impl SpaceGraphError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Map a `ureq` error into either a status or a transport failure.
    pub(crate) fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, resp) => Self::Status {
                url: url.to_string(),
                code,
                body: resp.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => Self::Http {
                url: url.to_string(),
                message: transport.to_string(),
            },
        }
    }
}
