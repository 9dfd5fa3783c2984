//! Validated device configuration.
use std::path::PathBuf;
use std::time::Duration;

use chrono::FixedOffset;
use reqwest::Url;
use ticker_common::net::{API_KEY_HEADER, addr, quote_url};
use ticker_common::{INSTRUMENTS, Result, TickerError};

use crate::args::Args;
use crate::clock::{FetchWindow, OffsetClock};
use crate::fetcher::PersistPolicy;
use crate::scheduler::ScheduleConfig;
use crate::transport::HttpRequest;

/// Wait between readiness checks while the display is not set up.
const RETRY_WAIT: Duration = Duration::from_millis(500);

/// Everything `main` needs to wire the device, checked for consistency.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// API key sent with each request.
    pub api_key: String,
    /// Full quote request URL, symbols included.
    pub request_url: String,
    /// `host:port` probed to decide whether the network is up.
    pub probe_addr: String,
    /// Snapshot file.
    pub cache_path: PathBuf,
    /// Loop timing.
    pub schedule: ScheduleConfig,
    /// Local time offset.
    pub utc_offset: FixedOffset,
    /// Address the button listener binds to.
    pub button_addr: String,
    /// Network bring-up attempts.
    pub connect_attempts: u32,
    /// Delay between bring-up attempts.
    pub connect_delay: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Snapshot persistence policy.
    pub persist: PersistPolicy,
    /// Display width in columns.
    pub columns: u16,
}

impl DeviceConfig {
    /// Validate `args`.
    pub fn from_args(args: &Args) -> Result<Self> {
        if args.window_start > 24 || args.window_end > 24 {
            return Err(config_error(format!(
                "window hours must be within 0..=24, got {}..{}",
                args.window_start, args.window_end
            )));
        }
        if args.window_start == args.window_end {
            return Err(config_error(format!(
                "fetch window {}..{} is empty",
                args.window_start, args.window_end
            )));
        }
        if args.refresh_minutes == 0 {
            return Err(config_error("refresh interval must be positive"));
        }
        if args.connect_attempts == 0 {
            return Err(config_error("at least one connect attempt is required"));
        }
        if args.columns == 0 {
            return Err(config_error("display needs at least one column"));
        }
        let utc_offset = FixedOffset::east_opt(args.utc_offset_secs).ok_or_else(|| {
            config_error(format!(
                "UTC offset {}s is more than a day",
                args.utc_offset_secs
            ))
        })?;

        Ok(Self {
            api_key: args.api_key.clone(),
            request_url: quote_url(&args.endpoint, &INSTRUMENTS),
            probe_addr: probe_addr(&args.endpoint)?,
            cache_path: PathBuf::from(args.cache_path.trim()),
            schedule: ScheduleConfig {
                interval: Duration::from_secs(args.refresh_minutes * 60),
                window: FetchWindow::new(args.window_start, args.window_end),
                hold: Duration::from_millis(args.hold_ms),
                retry_wait: RETRY_WAIT,
            },
            utc_offset,
            button_addr: addr("0.0.0.0", args.button_port),
            connect_attempts: args.connect_attempts,
            connect_delay: Duration::from_millis(args.connect_delay_ms),
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            persist: args.persist,
            columns: args.columns,
        })
    }

    /// The quote request sent on every fetch.
    pub fn quote_request(&self) -> HttpRequest {
        HttpRequest::get(self.request_url.clone())
            .with_header(API_KEY_HEADER, self.api_key.clone())
            .with_timeout(self.request_timeout)
    }

    /// Clock in the configured offset.
    pub fn clock(&self) -> OffsetClock {
        OffsetClock::new(self.utc_offset)
    }
}

fn config_error(message: impl Into<String>) -> TickerError {
    TickerError::Config(message.into())
}

/// `host:port` of `endpoint`, with the scheme's default port if none is given.
fn probe_addr(endpoint: &str) -> Result<String> {
    let url = Url::parse(endpoint)
        .map_err(|e| config_error(format!("invalid endpoint {}: {}", endpoint, e)))?;
    let host = url
        .host_str()
        .ok_or_else(|| config_error(format!("endpoint {} has no host", endpoint)))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| config_error(format!("endpoint {} has no port", endpoint)))?;
    Ok(addr(host, port))
}
