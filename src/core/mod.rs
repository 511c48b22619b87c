//! Core naval combat engine (no_std compatible)
//!
//! Pure game logic with no I/O: grid and ship model, placement validation,
//! shot resolution, the match state machine, attack modes and the automated
//! opponent. Everything here is synchronous and deterministic for a fixed
//! input sequence; the std-gated lobby layer drives it from the network.

pub mod ai;
pub mod attack;
pub mod board;
pub mod common;
pub mod config;
pub mod game;
pub mod rules;
pub mod ship;
pub mod snapshot;

pub use ai::AiGunner;
pub use attack::{AttackMode, AttackOutcome};
pub use board::{Board, CellStatus, ShipId};
pub use common::{DrawState, Phase, PlacementError, Position, ShotResult, Side, SnapshotError};
pub use config::{fleet_composition, fleet_is_complete, ship_length, DEFAULT_BOARD_SIZE};
pub use game::{Game, Player};
pub use rules::{adjacency_rule, bounds_rule, overlap_rule, validate_placement};
pub use ship::{Orientation, Ship, ShipEra, ShipKind, ShipPlacement, ShipSkin};
pub use snapshot::{GameHistory, GameSnapshot, PlayerSnapshot, ShipSnapshot};
