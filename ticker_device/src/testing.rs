//! Test doubles for the device's external collaborators.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::thread;
use std::time::Duration;

use ticker_common::{FetchError, INSTRUMENTS, Quote, QuoteSet, payload};

use crate::clock::Clock;
use crate::display::{Color, Datum, Surface};
use crate::fetcher::QuoteSource;
use crate::network::Network;
use crate::store::SnapshotStore;
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// S&P up, NASDAQ down, Dow unchanged; all in the regular session.
pub fn sample_quotes() -> QuoteSet {
    QuoteSet::new([
        Quote::new(4500.25, 4480.0, 0.45, true),
        Quote::new(15000.5, 15100.0, -0.66, true),
        Quote::new(34000.0, 34000.0, 0.0, true),
    ])
}

/// A second, different set.
pub fn other_quotes() -> QuoteSet {
    QuoteSet::new([
        Quote::new(4400.0, 4480.0, -1.79, false),
        Quote::new(15200.0, 15100.0, 0.66, false),
        Quote::new(33000.0, 34000.0, -2.94, false),
    ])
}

/// `quotes` encoded as a service response body.
pub fn body(quotes: &QuoteSet) -> Vec<u8> {
    payload::serialize(quotes, &INSTRUMENTS).unwrap()
}

#[derive(Debug, Default)]
pub struct ScriptedNetwork {
    pub offline: bool,
    pub connects: u32,
    pub disconnects: u32,
}

impl ScriptedNetwork {
    pub fn online() -> Self {
        Self::default()
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }
}

impl Network for ScriptedNetwork {
    fn connect(&mut self) -> io::Result<()> {
        self.connects += 1;
        if self.offline {
            Err(io::Error::new(io::ErrorKind::TimedOut, "link down"))
        } else {
            Ok(())
        }
    }

    fn disconnect(&mut self) {
        self.disconnects += 1;
    }
}

/// Answers requests from a queue of canned results.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    pub responses: RefCell<VecDeque<Result<HttpResponse, FetchError>>>,
    pub requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn answering(responses: Vec<Result<HttpResponse, FetchError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::default(),
        }
    }

    pub fn status(status: u16, body: &[u8]) -> Self {
        Self::answering(vec![Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })])
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("no scripted response".to_string())))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub snapshot: Option<Vec<u8>>,
    pub saves: u32,
    pub read_only: bool,
}

impl MemoryStore {
    pub fn holding(snapshot: &[u8]) -> Self {
        Self {
            snapshot: Some(snapshot.to_vec()),
            ..Self::default()
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, payload: &[u8]) -> io::Result<()> {
        if self.read_only {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.saves += 1;
        self.snapshot = Some(payload.to_vec());
        Ok(())
    }

    fn load(&self) -> io::Result<Vec<u8>> {
        self.snapshot
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no snapshot"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Fill {
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Color,
    },
    Text {
        text: String,
        x: u16,
        y: u16,
        datum: Datum,
        fg: Color,
        bg: Color,
    },
}

/// Surface that records every drawing call; text is 8 units per character.
#[derive(Debug)]
pub struct RecordingSurface {
    pub width: u16,
    pub height: u16,
    pub font_height: u16,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u16, height: u16, font_height: u16) -> Self {
        Self {
            width,
            height,
            font_height,
            ops: Vec::new(),
        }
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn font_height(&self) -> u16 {
        self.font_height
    }

    fn text_width(&self, text: &str) -> u16 {
        8 * text.chars().count() as u16
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Color) -> io::Result<()> {
        self.ops.push(DrawOp::Fill { x, y, w, h, color });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: u16,
        y: u16,
        datum: Datum,
        fg: Color,
        bg: Color,
    ) -> io::Result<()> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            datum,
            fg,
            bg,
        });
        Ok(())
    }
}

pub struct FixedClock {
    pub hour: u32,
    pub minute: u32,
}

impl FixedClock {
    pub fn at(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }
}

impl Clock for FixedClock {
    fn hour_minute(&self) -> (u32, u32) {
        (self.hour, self.minute)
    }
}

/// Quote source returning canned results and counting calls.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    pub results: VecDeque<Result<QuoteSet, FetchError>>,
    pub calls: u32,
    pub delay: Duration,
}

impl ScriptedSource {
    pub fn answering(results: Vec<Result<QuoteSet, FetchError>>) -> Self {
        Self {
            results: results.into(),
            ..Self::default()
        }
    }
}

impl QuoteSource for ScriptedSource {
    fn fetch(&mut self) -> Result<QuoteSet, FetchError> {
        self.calls += 1;
        thread::sleep(self.delay);
        self.results.pop_front().unwrap_or(Err(FetchError::NoNetwork))
    }
}
