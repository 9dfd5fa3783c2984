//! Quote service payload decoding and encoding.
//!
//! The service answers with `{"quoteResponse": {"result": [...]}}`, one result
//! record per requested symbol in request order. Only four fields of each
//! record are read; everything else in the payload is ignored. Mapping is
//! positional: result `n` fills quote slot `n`, the record's `symbol` is not
//! consulted.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::instruments::Instrument;
use crate::quote::{Quote, QuoteSet, SLOTS};

/// Records are kept as raw JSON until they are needed, so entries past the
/// last slot never have to be valid quotes.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<R> {
    quote_response: QuoteResponse<R>,
}

#[derive(Debug, Serialize, Deserialize)]
struct QuoteResponse<R> {
    result: Vec<R>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    symbol: Option<String>,
    regular_market_price: f64,
    regular_market_previous_close: f64,
    regular_market_change_percent: f64,
    market_state: String,
}

impl From<&RawQuote> for Quote {
    fn from(raw: &RawQuote) -> Self {
        Quote::from_market_state(
            raw.regular_market_price,
            raw.regular_market_previous_close,
            raw.regular_market_change_percent,
            &raw.market_state,
        )
    }
}

/// Decode a raw service payload into a `QuoteSet`.
///
/// Fails with `ParseError::Malformed` on invalid JSON, a missing or mistyped
/// field in any of the first three records, or fewer than three records.
/// Records past the third are ignored.
pub fn parse(payload: &[u8]) -> Result<QuoteSet, ParseError> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_slice(payload)?;
    let result = envelope.quote_response.result;
    if result.len() < SLOTS {
        return Err(ParseError::Malformed(format!(
            "expected {} results, got {}",
            SLOTS,
            result.len()
        )));
    }

    let mut quotes = [Quote::default(); SLOTS];
    for (quote, record) in quotes.iter_mut().zip(&result) {
        *quote = Quote::from(&RawQuote::deserialize(record)?);
    }
    Ok(QuoteSet::new(quotes))
}

/// Encode a `QuoteSet` in the service payload shape, tagging each record with
/// its instrument's symbol.
pub fn serialize(quotes: &QuoteSet, instruments: &[Instrument]) -> serde_json::Result<Vec<u8>> {
    let result: Vec<RawQuote> = quotes
        .iter()
        .enumerate()
        .map(|(slot, quote)| RawQuote {
            symbol: instruments.get(slot).map(|i| i.symbol.to_string()),
            regular_market_price: quote.current,
            regular_market_previous_close: quote.previous_close,
            regular_market_change_percent: quote.percentage_change,
            market_state: quote.market_state().to_string(),
        })
        .collect();

    serde_json::to_vec(&Envelope {
        quote_response: QuoteResponse { result },
    })
}
