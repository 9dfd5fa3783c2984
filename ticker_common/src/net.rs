//! Shared networking constants and helpers used by the device and the remote.

use crate::instruments::{Instrument, symbol_list};

/// UDP port on which the device listens for button commands.
pub const BUTTON_PORT: u16 = 8082;

/// Default quote service endpoint.
pub const QUOTE_ENDPOINT: &str = "https://yfapi.net/v6/finance/quote";

/// Request header carrying the static API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Build the quote request URL for `instruments` against `endpoint`.
///
/// The symbol list is URL-encoded as a whole, so `^GSPC,^NDX` becomes
/// `%5EGSPC%2C%5ENDX`.
pub fn quote_url(endpoint: &str, instruments: &[Instrument]) -> String {
    format!(
        "{}?region=US&lang=en&symbols={}",
        endpoint,
        urlencoding::encode(&symbol_list(instruments))
    )
}
