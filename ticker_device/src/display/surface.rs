//! Drawing primitives required by the renderer.
//!
//! Coordinates are in surface units with the origin at the top left. The
//! renderer only ever fills rectangles and draws single-line text, so that is
//! all a surface has to provide.

use std::io;

/// Palette used by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Background.
    Black,
    /// Labels and unchanged quotes.
    White,
    /// Quotes whose market is closed.
    DarkGrey,
    /// Quotes that went up.
    Green,
    /// Quotes that went down.
    Red,
}

/// Which corner of the text box `(x, y)` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datum {
    /// Text starts at `x`.
    TopLeft,
    /// Text ends at `x`.
    TopRight,
}

/// A display the renderer can draw on.
pub trait Surface {
    /// Width in surface units.
    fn width(&self) -> u16;

    /// Height in surface units.
    fn height(&self) -> u16;

    /// Height of one text row.
    fn font_height(&self) -> u16;

    /// Width `text` occupies when drawn.
    fn text_width(&self, text: &str) -> u16;

    /// Paint a rectangle in `color`.
    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Color) -> io::Result<()>;

    /// Draw `text` anchored at `(x, y)` according to `datum`.
    fn draw_text(
        &mut self,
        text: &str,
        x: u16,
        y: u16,
        datum: Datum,
        fg: Color,
        bg: Color,
    ) -> io::Result<()>;

    /// Push buffered drawing to the screen.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
