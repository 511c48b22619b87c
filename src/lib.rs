#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod core;
#[cfg(feature = "std")]
pub mod lobby;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod transport;

pub use crate::core::*;
#[cfg(feature = "std")]
pub use crate::lobby::{FireReport, JoinInfo, Lobby};
#[cfg(feature = "std")]
pub use crate::logging::init_logging;
#[cfg(feature = "std")]
pub use crate::protocol::{Event, Message, Request, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use crate::server::GameServer;
#[cfg(feature = "std")]
pub use crate::transport::Transport;
