//! Error types for the tablebase explorer.
//!
//! This crate uses `thiserror` to provide a single enumeration of the
//! errors that may occur while probing a position. The variants wrap
//! underlying errors from `reqwest`, JSON decoding and URL parsing, and
//! each one maps onto the coarse [`ErrorKind`] the status line renders.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TablebaseError {
    /// The position string does not have exactly six fields.
    #[error("Malformed FEN: {0}")]
    MalformedFen(String),

    /// The rules engine refused to load the position.
    #[error("Illegal position: {0}")]
    IllegalPosition(String),

    /// The move is not part of the currently displayed move list.
    #[error("Unknown move: {0}")]
    UnknownMove(String),

    /// The request was aborted before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// The lookup service answered 400: it does not consider the position legal.
    #[error("The given position is not a legal chess position")]
    InvalidPosition,

    /// The lookup service answered with an unexpected status.
    #[error("Server error: {0}")]
    Server(reqwest::StatusCode),

    /// Wraps a transport error returned by `reqwest`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body or a configuration document was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured endpoint is not a valid URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// How a failed probe is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorKind {
    /// Superseded or aborted request. Silent.
    Cancelled,
    /// The position is rejected. Persistent, no retry.
    InvalidPosition,
    /// Transport or server failure. Persistent, manual retry offered.
    NetworkOrServerError,
}

impl TablebaseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TablebaseError::Cancelled => ErrorKind::Cancelled,
            TablebaseError::MalformedFen(_)
            | TablebaseError::IllegalPosition(_)
            | TablebaseError::UnknownMove(_)
            | TablebaseError::InvalidPosition => ErrorKind::InvalidPosition,
            TablebaseError::Server(_)
            | TablebaseError::Http(_)
            | TablebaseError::Json(_)
            | TablebaseError::Url(_) => ErrorKind::NetworkOrServerError,
        }
    }
}
