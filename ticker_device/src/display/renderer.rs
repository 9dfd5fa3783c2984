//! Quote rendering.
//!
//! Each instrument owns one text row: its label on the left and, on the right,
//! either the value or the percentage change depending on the phase. Only the
//! right-hand column is repainted between phases. Its width is fixed during
//! setup from the widest expected string, so every redraw clears exactly the
//! same rectangle.

use log::debug;
use ticker_common::{Instruments, Quote, QuoteSet, Result, TickerError};

use super::format::{Tone, format_percent, format_value, percent_tone, value_tone};
use super::surface::{Color, Datum, Surface};

/// Sample of the widest string the value column has to hold.
pub const WIDEST_SAMPLE: &str = "XXXXXXX";

/// Which column content is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Integer prices.
    Values,
    /// Percent changes.
    Percentages,
}

impl Phase {
    /// The phase shown after this one.
    pub fn next(self) -> Self {
        match self {
            Phase::Values => Phase::Percentages,
            Phase::Percentages => Phase::Values,
        }
    }
}

/// Draws quotes onto a `Surface`.
pub struct Renderer<S> {
    surface: S,
    instruments: Instruments,
    column_width: Option<u16>,
}

impl<S: Surface> Renderer<S> {
    /// Wrap `surface`. Nothing is drawn until `setup`.
    pub fn new(surface: S, instruments: Instruments) -> Self {
        Self {
            surface,
            instruments,
            column_width: None,
        }
    }

    /// Clear the screen, draw the row labels, and size the value column.
    pub fn setup(&mut self) -> Result<()> {
        let (width, height) = (self.surface.width(), self.surface.height());
        self.surface.fill_rect(0, 0, width, height, Color::Black)?;

        for (row, instrument) in self.instruments.iter().enumerate() {
            let y = self.row_y(row);
            self.surface.draw_text(
                instrument.label,
                0,
                y,
                Datum::TopLeft,
                Color::White,
                Color::Black,
            )?;
        }

        let column_width = self.surface.text_width(WIDEST_SAMPLE).min(width);
        debug!("Value column is {} units wide", column_width);
        self.column_width = Some(column_width);
        self.surface.flush()?;
        Ok(())
    }

    /// Whether `setup` has completed.
    pub fn is_ready(&self) -> bool {
        self.column_width.is_some()
    }

    /// Draw the content for `phase`.
    pub fn render(&mut self, phase: Phase, quotes: &QuoteSet) -> Result<()> {
        match phase {
            Phase::Values => self.render_values(quotes),
            Phase::Percentages => self.render_percentages(quotes),
        }
    }

    /// Draw every quote's integer value, grouped with its instrument's separator.
    pub fn render_values(&mut self, quotes: &QuoteSet) -> Result<()> {
        self.render_column(quotes, |instrument_separator, quote| {
            (
                format_value(quote.current, instrument_separator),
                value_tone(quote),
            )
        })
    }

    /// Draw every quote's signed percent change.
    pub fn render_percentages(&mut self, quotes: &QuoteSet) -> Result<()> {
        self.render_column(quotes, |_, quote| {
            (format_percent(quote.percentage_change), percent_tone(quote))
        })
    }

    /// The wrapped surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Give back the wrapped surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn render_column<F>(&mut self, quotes: &QuoteSet, cell: F) -> Result<()>
    where
        F: Fn(char, &Quote) -> (String, Tone),
    {
        let column_width = self.column_width.ok_or(TickerError::NotReady)?;
        let (width, height) = (self.surface.width(), self.surface.height());
        self.surface
            .fill_rect(width - column_width, 0, column_width, height, Color::Black)?;

        for (row, (instrument, quote)) in self.instruments.iter().zip(quotes).enumerate() {
            let (text, tone) = cell(instrument.separator, quote);
            let y = self.row_y(row);
            self.surface
                .draw_text(&text, width, y, Datum::TopRight, tone.color(), Color::Black)?;
        }
        self.surface.flush()?;
        Ok(())
    }

    fn row_y(&self, row: usize) -> u16 {
        self.surface.font_height() * row as u16
    }
}
