//! Quote display.
//!
//! - `surface` — the drawing primitives the renderer needs from a screen.
//! - `format` — pure mapping from a quote to its tone and text.
//! - `renderer` — label layout, the partial-redraw column, and the two render phases.
//! - `terminal` — a character-cell surface driven through crossterm.
pub mod format;
pub mod renderer;
pub mod surface;
pub mod terminal;

pub use format::Tone;
pub use renderer::{Phase, Renderer};
pub use surface::{Color, Datum, Surface};
pub use terminal::TerminalSurface;
