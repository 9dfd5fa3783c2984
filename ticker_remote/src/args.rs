//! Command-line arguments for the ticker remote.
use clap::Parser;
use ticker_common::ButtonEvent;
use ticker_common::net::BUTTON_PORT;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// IP address of the ticker device.
    #[clap(long, env = "TICKER_DEVICE_IP")]
    pub device_ip: String,

    /// UDP port the device listens on for button commands.
    #[clap(long, default_value_t = BUTTON_PORT)]
    pub port: u16,

    /// Button event to send.
    #[clap(long, value_enum, default_value_t = ButtonEvent::DoubleClicked)]
    pub event: ButtonEvent,
}
