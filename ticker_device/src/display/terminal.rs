//! Character-cell surface on a terminal.
//!
//! One surface unit is one terminal cell and a text row is one cell high. The
//! surface occupies the top-left `width` x `height` cells of the terminal and
//! only ever repaints the cells it is asked to, so a partial redraw of the
//! value column leaves the labels untouched.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use super::surface::{Color, Datum, Surface};

impl From<Color> for style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => style::Color::Black,
            Color::White => style::Color::White,
            Color::DarkGrey => style::Color::DarkGrey,
            Color::Green => style::Color::Green,
            Color::Red => style::Color::Red,
        }
    }
}

/// Surface drawn with crossterm commands into `W`.
pub struct TerminalSurface<W: Write> {
    out: W,
    width: u16,
    height: u16,
}

impl TerminalSurface<Stdout> {
    /// Surface on standard output.
    pub fn stdout(width: u16, height: u16) -> Self {
        Self::new(io::stdout(), width, height)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Surface of `width` x `height` cells written to `out`.
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self { out, width, height }
    }

    /// Hide the cursor and clear the terminal.
    pub fn enter(&mut self) -> io::Result<()> {
        queue!(self.out, Hide, Clear(ClearType::All))?;
        self.out.flush()
    }

    /// Park the cursor below the surface and restore it.
    pub fn leave(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, MoveTo(0, self.height), Show)?;
        self.out.flush()
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn font_height(&self) -> u16 {
        1
    }

    fn text_width(&self, text: &str) -> u16 {
        text.chars().count() as u16
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Color) -> io::Result<()> {
        let blank = " ".repeat(w as usize);
        queue!(self.out, SetBackgroundColor(color.into()))?;
        for row in y..y.saturating_add(h) {
            queue!(self.out, MoveTo(x, row), Print(&blank))?;
        }
        queue!(self.out, ResetColor)
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
        let start = match datum {
            Datum::TopLeft => x,
            Datum::TopRight => x.saturating_sub(self.text_width(text)),
        };
        queue!(
            self.out,
            MoveTo(start, y),
            SetForegroundColor(fg.into()),
            SetBackgroundColor(bg.into()),
            Print(text),
            ResetColor
        )
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
