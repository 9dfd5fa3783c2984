//! Ticker remote: presses the ticker device's button over the network.
//!
//! Sends a single `T_BUTTON` command datagram to the device. A double click
//! makes the device refresh its quotes at the start of its next cycle.
//!
//! Usage example (CLI):
//! ```bash
//! ticker_remote --device-ip 192.168.0.10 --event double-clicked
//! ```
#![warn(missing_docs)]
mod args;
mod sender;

use crate::args::Args;
use crate::sender::CommandSender;
use clap::Parser;
use log::info;
use std::net::UdpSocket;
use ticker_common::net::addr;
use ticker_common::{ButtonCommand, Result};

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let device_ip = args.device_ip.trim().replace('"', "");
    let target = addr(&device_ip, args.port);
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    info!("UDP remote bound on: {}", socket.local_addr()?);

    CommandSender::send_command(&socket, &target, &ButtonCommand::new(args.event))
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
