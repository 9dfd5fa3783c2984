//! Market ticker device.
//!
//! Polls the quote service on a schedule and cycles three index quotes on a
//! terminal region. Startup wires the collaborators together:
//!
//! - `Fetcher` — network probe, HTTP transport, and the snapshot file.
//! - `Renderer` — draws onto a crossterm-driven `TerminalSurface`.
//! - `UdpButtonListener` — button datagrams become scheduler intents.
//! - `Scheduler` — the main loop, stopped by Ctrl+C.
//!
//! Logs go to stderr, which shares the terminal with the quotes; redirect it
//! to keep the display clean.
//!
//! Usage example:
//! ```bash
//! TICKER_API_KEY=... ticker_device --refresh-minutes 15 --persist parsed-only 2>ticker.log
//! ```
use clap::Parser;
use crossbeam_channel::unbounded;
use log::{info, warn};
use ticker_common::{INSTRUMENTS, Result, SLOTS, TickerError};
use ticker_device::args::Args;
use ticker_device::button::UdpButtonListener;
use ticker_device::config::DeviceConfig;
use ticker_device::display::{Renderer, TerminalSurface};
use ticker_device::fetcher::Fetcher;
use ticker_device::network::HostNetwork;
use ticker_device::scheduler::{Intent, Scheduler};
use ticker_device::store::FileStore;
use ticker_device::transport::ReqwestTransport;

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let config = DeviceConfig::from_args(&args)?;
    info!("ticker_device {} booting", env!("CARGO_PKG_VERSION"));
    if config.api_key.is_empty() {
        warn!("No API key configured; the quote service will refuse requests");
    }

    let fetcher = Fetcher::new(
        HostNetwork::new(
            config.probe_addr.clone(),
            config.connect_attempts,
            config.connect_delay,
        ),
        ReqwestTransport::new()?,
        FileStore::new(config.cache_path.clone()),
        config.quote_request(),
        INSTRUMENTS,
        config.persist,
    );
    let quotes = fetcher.restore().unwrap_or_default();

    let (intent_tx, intent_rx) = unbounded::<Intent>();
    {
        let intent_tx = intent_tx.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down device...");
            let _ = intent_tx.send(Intent::Shutdown);
        })
        .map_err(|e| TickerError::Config(format!("cannot install Ctrl+C handler: {}", e)))?;
    }

    let listener = UdpButtonListener::bind(&config.button_addr)?;
    info!("Button listener on: {}", listener.local_addr()?);
    listener.start(intent_tx);

    let mut surface = TerminalSurface::stdout(config.columns, SLOTS as u16);
    surface.enter()?;
    let mut renderer = Renderer::new(surface, INSTRUMENTS);
    if let Err(e) = renderer.setup() {
        let _ = renderer.into_surface().leave();
        return Err(e);
    }

    let mut scheduler = Scheduler::new(
        fetcher,
        renderer,
        config.clock(),
        config.schedule,
        quotes,
        intent_rx,
    );
    let outcome = scheduler.run();
    scheduler.into_renderer().into_surface().leave()?;
    outcome
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
