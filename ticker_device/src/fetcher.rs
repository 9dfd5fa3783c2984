//! One quote refresh against the quote service.
//!
//! A fetch brings the network up, performs a single GET, and turns the body
//! into a `QuoteSet`. A body that does not parse (truncated response, quota
//! notice in place of data) falls back to the snapshot of the previous
//! response, so the device keeps showing the last good numbers. There are no
//! retries inside a fetch: the scheduler's interval gate is what keeps the
//! device under the service's daily request quota.

use clap::ValueEnum;
use log::{error, info, warn};
use ticker_common::{FetchError, Instruments, QuoteSet, payload};

use crate::network::Network;
use crate::store::SnapshotStore;
use crate::transport::{HttpRequest, Transport};

/// Anything that can produce a fresh `QuoteSet` on demand.
pub trait QuoteSource {
    /// Run one refresh.
    fn fetch(&mut self) -> Result<QuoteSet, FetchError>;
}

/// Which successful responses are written to the snapshot store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PersistPolicy {
    /// Every 200 body, parseable or not.
    #[default]
    Always,
    /// Only bodies that parsed; the last good snapshot is never overwritten
    /// with garbage.
    ParsedOnly,
}

/// Where a resolved `QuoteSet` came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved {
    /// Parsed from the response just received.
    Fresh(QuoteSet),
    /// Parsed from the stored snapshot after the fresh body failed.
    Cached(QuoteSet),
}

impl Resolved {
    /// The quotes regardless of origin.
    pub fn quotes(&self) -> QuoteSet {
        match self {
            Resolved::Fresh(quotes) | Resolved::Cached(quotes) => *quotes,
        }
    }
}

/// Fetches quotes over `N`/`T` and keeps the raw snapshot in `S`.
pub struct Fetcher<N, T, S> {
    network: N,
    transport: T,
    store: S,
    request: HttpRequest,
    instruments: Instruments,
    persist: PersistPolicy,
}

impl<N: Network, T: Transport, S: SnapshotStore> Fetcher<N, T, S> {
    /// Assemble a fetcher issuing `request` for `instruments`.
    pub fn new(
        network: N,
        transport: T,
        store: S,
        request: HttpRequest,
        instruments: Instruments,
        persist: PersistPolicy,
    ) -> Self {
        Self {
            network,
            transport,
            store,
            request,
            instruments,
            persist,
        }
    }

    /// The snapshot store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The network link.
    pub fn network(&self) -> &N {
        &self.network
    }

    /// The HTTP transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Load the stored snapshot at boot. Any failure is logged and yields `None`.
    pub fn restore(&self) -> Option<QuoteSet> {
        info!("Restoring quotes from snapshot");
        let bytes = match self.store.load() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("No snapshot to restore: {}", e);
                return None;
            }
        };
        match payload::parse(&bytes) {
            Ok(quotes) => {
                self.log_quotes(&quotes);
                Some(quotes)
            }
            Err(e) => {
                warn!("Stored snapshot is unusable: {}", e);
                None
            }
        }
    }

    /// Parse `fresh`, falling back to the stored snapshot when it does not parse.
    ///
    /// When both fail, the error is the one from the fresh body.
    pub fn resolve_quotes(&self, fresh: &[u8]) -> Result<Resolved, FetchError> {
        let fresh_err = match payload::parse(fresh) {
            Ok(quotes) => return Ok(Resolved::Fresh(quotes)),
            Err(e) => e,
        };
        warn!("Error parsing fresh quotes: {}; reading snapshot", fresh_err);

        match self.store.load() {
            Ok(bytes) => match payload::parse(&bytes) {
                Ok(quotes) => Ok(Resolved::Cached(quotes)),
                Err(e) => {
                    error!("Error parsing snapshot: {}", e);
                    Err(FetchError::Parse(fresh_err))
                }
            },
            Err(e) => {
                error!("Failed to read snapshot: {}", e);
                Err(FetchError::Parse(fresh_err))
            }
        }
    }

    fn round_trip(&mut self) -> Result<QuoteSet, FetchError> {
        info!("Getting quotes from {}", self.request.url);
        let response = self.transport.get(&self.request)?;

        if !response.is_success() {
            warn!(
                "Quote service answered {}: {}",
                response.status,
                String::from_utf8_lossy(&response.body)
            );
            return Err(FetchError::Http(response.status));
        }

        let resolved = self.resolve_quotes(&response.body);
        let persist = match self.persist {
            PersistPolicy::Always => true,
            PersistPolicy::ParsedOnly => matches!(resolved, Ok(Resolved::Fresh(_))),
        };
        if persist {
            if let Err(e) = self.store.save(&response.body) {
                error!("Failed to write snapshot: {}", e);
            }
        }

        let quotes = resolved?.quotes();
        self.log_quotes(&quotes);
        Ok(quotes)
    }

    fn log_quotes(&self, quotes: &QuoteSet) {
        for (instrument, quote) in self.instruments.iter().zip(quotes) {
            info!("{:<4}{}", instrument.label, quote);
        }
    }
}

impl<N: Network, T: Transport, S: SnapshotStore> QuoteSource for Fetcher<N, T, S> {
    fn fetch(&mut self) -> Result<QuoteSet, FetchError> {
        if let Err(e) = self.network.connect() {
            warn!("Failed to connect to the network ({}). Will not get quotes.", e);
            return Err(FetchError::NoNetwork);
        }

        let outcome = self.round_trip();
        self.network.disconnect();
        outcome
    }
}
