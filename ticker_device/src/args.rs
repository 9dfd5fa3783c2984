//! Command-line arguments for the ticker device.
//!
//! Secrets and deployment-specific locations can also come from the
//! environment. See `config` for validation.
use clap::Parser;
use ticker_common::net::{BUTTON_PORT, QUOTE_ENDPOINT};

use crate::fetcher::PersistPolicy;

/// Parsed command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// API key sent with every quote request.
    #[clap(long, env = "TICKER_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Quote service endpoint.
    #[clap(long, env = "TICKER_ENDPOINT", default_value = QUOTE_ENDPOINT)]
    pub endpoint: String,

    /// File holding the last raw response.
    #[clap(long, env = "TICKER_CACHE_PATH", default_value = "payload.json")]
    pub cache_path: String,

    /// Minutes between scheduled fetches.
    #[clap(long, default_value_t = 30)]
    pub refresh_minutes: u64,

    /// First local hour in which scheduled fetches run.
    #[clap(long, default_value_t = 9)]
    pub window_start: u32,

    /// First local hour after the fetch window.
    #[clap(long, default_value_t = 21)]
    pub window_end: u32,

    /// Local time offset from UTC, in seconds.
    #[clap(long, default_value_t = 3600, allow_negative_numbers = true)]
    pub utc_offset_secs: i32,

    /// How long values and percentages each stay on screen, in milliseconds.
    #[clap(long, default_value_t = 2000)]
    pub hold_ms: u64,

    /// UDP port for button commands.
    #[clap(long, default_value_t = BUTTON_PORT)]
    pub button_port: u16,

    /// Network bring-up attempts before a fetch is given up.
    #[clap(long, default_value_t = 60)]
    pub connect_attempts: u32,

    /// Delay between network bring-up attempts, in milliseconds.
    #[clap(long, default_value_t = 500)]
    pub connect_delay_ms: u64,

    /// Upper bound on one quote request, in seconds.
    #[clap(long, default_value_t = 15)]
    pub request_timeout_secs: u64,

    /// Which successful responses replace the cached snapshot.
    #[clap(long, value_enum, default_value_t = PersistPolicy::Always)]
    pub persist: PersistPolicy,

    /// Width of the display region in terminal columns.
    #[clap(long, default_value_t = 16)]
    pub columns: u16,
}
