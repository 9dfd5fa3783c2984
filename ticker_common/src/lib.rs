//!
//! Common types and utilities shared by the ticker device and its remote.
//!
//! This crate aggregates:
//! - `error` — the unified `TickerError` plus the fetch and parse error types.
//! - `result` — handy `Result<T, TickerError>` alias.
//! - `instruments` — the ordered list of tracked symbols with their display traits.
//! - `quote` — the `Quote` and `QuoteSet` data model.
//! - `payload` — decoding and encoding of the upstream quote service payload.
//! - `command` — button commands exchanged between the remote and the device.
//! - `net` — networking constants and URL helpers.
#![warn(missing_docs)]
pub mod command;
pub mod error;
pub mod instruments;
pub mod net;
pub mod payload;
pub mod quote;
pub mod result;

pub use command::{ButtonCommand, ButtonEvent};
pub use error::{FetchError, ParseError, TickerError};
pub use instruments::{INSTRUMENTS, Instrument, Instruments};
pub use quote::{Quote, QuoteSet, SLOTS};
pub use result::Result;
