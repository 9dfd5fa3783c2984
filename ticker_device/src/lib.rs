//! Market ticker device.
//!
//! The device polls a quote service on a fixed schedule, keeps the last raw
//! response on disk, and cycles three quotes across a small display, color
//! coded by direction and market state. Building blocks, leaf-first:
//!
//! - `store` — the on-disk snapshot of the last response.
//! - `network` / `transport` — link bring-up and the HTTP round trip.
//! - `fetcher` — one refresh: request, parse, fall back to the snapshot, persist.
//! - `display` — tone classification, text formatting, and the two-phase renderer.
//! - `clock` — wall-clock reading and the daily fetch window.
//! - `scheduler` — the main loop gating fetches and driving the render cycle.
//! - `button` — turns button commands into scheduler intents.
//! - `args` / `config` — command-line flags and their validated form.
#![warn(missing_docs)]
pub mod args;
pub mod button;
pub mod clock;
pub mod config;
pub mod display;
pub mod fetcher;
pub mod network;
pub mod scheduler;
pub mod store;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;
