//! Button command wire type shared by the device and the remote.
//!
//! A `ButtonCommand` carries one button event. Commands are sent as JSON in a
//! single UDP datagram; the header guards against stray traffic on the port.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::TickerError;

/// Header value for button commands.
pub const HEADER: &str = "T_BUTTON";

/// Events produced by the device's single push button.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, Display, EnumString, Hash, Eq, PartialEq,
)]
#[clap(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum ButtonEvent {
    /// Single short press.
    Clicked,
    /// Two short presses in quick succession.
    DoubleClicked,
    /// Press held for at least a second.
    LongPressed,
}

/// Command payload sent from the remote to the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonCommand {
    /// Command kind. Always `T_BUTTON`.
    pub header: String,
    /// The button event being reported.
    pub event: ButtonEvent,
}

impl ButtonCommand {
    /// Creates a new button command for `event`.
    pub fn new(event: ButtonEvent) -> Self {
        ButtonCommand {
            header: String::from(HEADER),
            event,
        }
    }

    /// Encode the command as a JSON datagram.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TickerError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a JSON datagram, rejecting foreign headers.
    pub fn from_bytes(datagram: &[u8]) -> Result<Self, TickerError> {
        let command: ButtonCommand = serde_json::from_slice(datagram)?;
        if command.header != HEADER {
            return Err(TickerError::Format(format!(
                "unexpected command header: {}",
                command.header
            )));
        }
        Ok(command)
    }
}
