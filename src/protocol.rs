#![cfg(feature = "std")]

//! Wire contract between clients and the lobby server.
//!
//! Clients send [`Request`]s, the server answers and broadcasts
//! [`Event`]s; both travel inside [`Message`] frames. Payloads carry the
//! core vocabulary types directly so the transport layer never re-derives
//! match state.

use serde::{Deserialize, Serialize};

use crate::core::{AttackMode, Position, ShipEra, ShipPlacement};
use crate::lobby::FireReport;

pub const PROTOCOL_VERSION: u8 = 1;

/// Actions a connected player may ask of the lobby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Request {
    CreateGame {
        board_size: u8,
        mode: AttackMode,
        era: ShipEra,
    },
    JoinGame {
        game_id: String,
    },
    PlaceFleet {
        game_id: String,
        ships: Vec<ShipPlacement>,
    },
    StartGame {
        game_id: String,
    },
    Fire {
        game_id: String,
        target: Position,
    },
    FireSalvo {
        game_id: String,
        origin: Position,
    },
    Surrender {
        game_id: String,
    },
    ProposeDraw {
        game_id: String,
    },
    AcceptDraw {
        game_id: String,
    },
}

/// Server-to-client notifications. Replies go to the requester, the rest
/// is broadcast to both seats of the affected match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// First frame on every connection: protocol version and the
    /// identity token assigned to this connection.
    Welcome {
        version: u8,
        connection_id: String,
    },
    GameCreated {
        game_id: String,
    },
    JoinAccepted {
        game_id: String,
        board_size: u8,
        mode: AttackMode,
        era: ShipEra,
    },
    JoinRejected {
        game_id: String,
    },
    OpponentJoined,
    FleetAccepted,
    FleetRejected,
    OpponentReady,
    GameStarted {
        first_player: Option<String>,
    },
    ShotFired {
        shooter: String,
        report: FireReport,
    },
    SalvoFired {
        shooter: String,
        origin: Position,
        report: FireReport,
    },
    PlayerSurrendered {
        connection_id: String,
    },
    DrawProposed,
    DrawAccepted,
    PlayerDisconnected {
        connection_id: String,
    },
}

/// Transport frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    Request(Request),
    Event(Event),
}
