//! Quote data model.
//!
//! A `Quote` is one instrument's market snapshot; a `QuoteSet` holds exactly
//! one quote per instrument slot. Sets are only ever replaced as a whole, so a
//! failed or partial parse can never leave a half-updated quote behind.

use std::fmt;
use std::ops::Index;

/// Number of instrument slots tracked by the device.
pub const SLOTS: usize = 3;

/// Upstream market state meaning the exchange is in its regular session.
pub const REGULAR_SESSION: &str = "REGULAR";

/// Market state written for quotes whose market is not open.
pub const CLOSED_SESSION: &str = "CLOSED";

/// Market snapshot for a single instrument.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quote {
    /// Last traded price.
    pub current: f64,
    /// Prior session close.
    pub previous_close: f64,
    /// Signed percent change from the previous close.
    pub percentage_change: f64,
    /// True iff the upstream market state is the regular session.
    pub market_open: bool,
}

impl Quote {
    /// Build a quote from its four fields.
    pub fn new(current: f64, previous_close: f64, percentage_change: f64, market_open: bool) -> Self {
        Self {
            current,
            previous_close,
            percentage_change,
            market_open,
        }
    }

    /// Build a quote, deriving `market_open` from an upstream market state string.
    pub fn from_market_state(
        current: f64,
        previous_close: f64,
        percentage_change: f64,
        market_state: &str,
    ) -> Self {
        Self::new(
            current,
            previous_close,
            percentage_change,
            market_state == REGULAR_SESSION,
        )
    }

    /// The upstream market state string this quote maps back to.
    pub fn market_state(&self) -> &'static str {
        if self.market_open {
            REGULAR_SESSION
        } else {
            CLOSED_SESSION
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:8.1} from {:8.1} ({:+.1}%) {}",
            self.current,
            self.previous_close,
            self.percentage_change,
            if self.market_open { "Open" } else { "Closed" }
        )
    }
}

/// One quote per instrument slot, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuoteSet([Quote; SLOTS]);

impl QuoteSet {
    /// Wrap three quotes given in slot order.
    pub fn new(quotes: [Quote; SLOTS]) -> Self {
        Self(quotes)
    }

    /// Iterate quotes in slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.0.iter()
    }

    /// Borrow the underlying array.
    pub fn as_array(&self) -> &[Quote; SLOTS] {
        &self.0
    }
}

impl Index<usize> for QuoteSet {
    type Output = Quote;

    fn index(&self, slot: usize) -> &Quote {
        &self.0[slot]
    }
}

impl<'a> IntoIterator for &'a QuoteSet {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
