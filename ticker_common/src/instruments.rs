//! The ordered list of tracked instruments.
//!
//! Slot order matters: the quote service is asked for the symbols in this order
//! and answers positionally, and the display draws slot `n` on row `n`.

use crate::quote::SLOTS;

/// One tracked market symbol and how the device presents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrument {
    /// Upstream symbol, e.g. `^GSPC`.
    pub symbol: &'static str,
    /// Short label drawn at the left of the instrument's row.
    pub label: &'static str,
    /// Thousands separator used when drawing the integer value.
    pub separator: char,
}

/// Exactly one instrument per quote slot.
pub type Instruments = [Instrument; SLOTS];

/// S&P 500, NASDAQ 100 and Dow Jones, in slot order.
pub const INSTRUMENTS: Instruments = [
    Instrument {
        symbol: "^GSPC",
        label: "S&P",
        separator: ',',
    },
    Instrument {
        symbol: "^NDX",
        label: "NDX",
        separator: ',',
    },
    Instrument {
        symbol: "^DJI",
        label: "DJI",
        separator: '.',
    },
];

/// Join the symbols in slot order, comma separated and not yet URL-encoded.
pub fn symbol_list(instruments: &[Instrument]) -> String {
    instruments
        .iter()
        .map(|instrument| instrument.symbol)
        .collect::<Vec<_>>()
        .join(",")
}
