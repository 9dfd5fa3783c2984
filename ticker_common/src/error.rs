//! Error types shared between the device and the remote.
//!
//! `ParseError` and `FetchError` describe the two failure domains of a quote
//! refresh. `TickerError` unifies them with I/O, configuration, and channel
//! failures so binaries can propagate a single error type.
use std::io;

use thiserror::Error;

/// The quote payload could not be decoded into three quotes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Invalid JSON, a missing or mistyped field, or too few result entries.
    #[error("malformed quote payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Malformed(err.to_string())
    }
}

/// Failure of a single fetch attempt against the quote service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The network link could not be brought up.
    #[error("no network connection")]
    NoNetwork,

    /// The service answered with a non-success HTTP status.
    #[error("quote service returned HTTP {0}")]
    Http(u16),

    /// The request could not be completed (DNS, TLS, timeout, body read).
    #[error("transport error: {0}")]
    Transport(String),

    /// Neither the fresh body nor the cached snapshot could be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Unified error type shared by the device and the remote.
#[derive(Error, Debug)]
pub enum TickerError {
    /// I/O error originating from files, sockets, or the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A quote refresh failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A quote payload failed to parse.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Invalid command-line or environment configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The display was used before its setup completed.
    #[error("Display is not ready")]
    NotReady,

    /// Crossbeam/channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),
}
