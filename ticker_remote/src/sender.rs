//! Sending button commands to the device over UDP.
use std::net::UdpSocket;

use log::info;
use ticker_common::{ButtonCommand, Result, TickerError};

/// Helper type for sending commands to the device.
pub struct CommandSender;

impl CommandSender {
    /// Encode `command` and send it to `target` as one datagram.
    pub fn send_command(socket: &UdpSocket, target: &str, command: &ButtonCommand) -> Result<()> {
        let datagram = command.to_bytes()?;
        let sent = socket.send_to(&datagram, target)?;
        if sent != datagram.len() {
            return Err(TickerError::Format(format!(
                "short send: {} of {} bytes",
                sent,
                datagram.len()
            )));
        }
        info!("Sent {} to {}", command.event, target);
        Ok(())
    }
}
