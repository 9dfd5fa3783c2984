//! Remote button events.
//!
//! The device's push button is reached over UDP: every datagram carries one
//! JSON `ButtonCommand`. A background thread decodes the datagrams and turns
//! the events it understands into scheduler intents.

use std::io::{self, ErrorKind};
use std::net::{SocketAddr, UdpSocket};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use log::{debug, error, info, warn};
use ticker_common::{ButtonCommand, ButtonEvent, Result, TickerError};

use crate::scheduler::Intent;

/// The intent a button event asks for, if any.
///
/// Only a double click does something; the other events are reserved.
pub fn intent_for(event: ButtonEvent) -> Option<Intent> {
    match event {
        ButtonEvent::DoubleClicked => Some(Intent::ForceRefresh),
        ButtonEvent::Clicked | ButtonEvent::LongPressed => None,
    }
}

/// Receive errors after which the socket is still usable.
fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::Interrupted
            | ErrorKind::WouldBlock
            | ErrorKind::TimedOut
            | ErrorKind::ConnectionReset
    )
}

/// Hand `intent` to the scheduler.
pub fn dispatch(intents: &Sender<Intent>, intent: Intent) -> Result<()> {
    intents
        .send(intent)
        .map_err(|e| TickerError::ChannelSend(e.to_string()))
}

/// UDP listener for button commands.
pub struct UdpButtonListener {
    socket: UdpSocket,
}

impl UdpButtonListener {
    /// Bind the listener to `addr`, e.g. `0.0.0.0:8082`.
    pub fn bind(addr: &str) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        Ok(Self { socket })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Spawn the receive loop. It ends when the scheduler side of `intents`
    /// is gone.
    pub fn start(self, intents: Sender<Intent>) -> JoinHandle<()> {
        thread::spawn(move || {
            let mut buf = [0u8; 256];
            loop {
                let (size, addr) = match self.socket.recv_from(&mut buf) {
                    Ok(received) => received,
                    Err(e) if is_transient(&e) => {
                        debug!("Button socket receive interrupted: {}", e);
                        continue;
                    }
                    Err(e) => {
                        error!("Button listener stopping on receive error: {}", e);
                        break;
                    }
                };
                let command = match ButtonCommand::from_bytes(&buf[..size]) {
                    Ok(command) => command,
                    Err(e) => {
                        debug!("Ignoring datagram from {}: {}", addr, e);
                        continue;
                    }
                };

                info!("Button {} from {}", command.event, addr);
                let Some(intent) = intent_for(command.event) else {
                    continue;
                };
                if let Err(e) = dispatch(&intents, intent) {
                    warn!("Button listener stopping: {}", e);
                    break;
                }
            }
        })
    }
}
