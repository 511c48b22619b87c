#![cfg(feature = "std")]

//! Session registry: maps connection identities to matches and serializes
//! concurrent network requests into safe calls on each match.
//!
//! Locking discipline: the two registry maps each sit behind their own
//! mutex, held only for lookup/insert/remove; every session has its own
//! mutex serializing all operations on that match. No method holds two
//! locks at once, so requests for different matches never contend.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::Rng;

use crate::core::{
    AttackMode, DrawState, Game, Phase, Player, Position, Ship, ShipEra, ShipId, ShipPlacement,
    ShotResult, Side,
};

const GAME_ID_LEN: usize = 8;
const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Collision-resistant short token, used for game and connection ids.
/// No global uniqueness guarantee; insertion sites retry on collision.
pub(crate) fn new_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..GAME_ID_LEN)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// Match parameters reported to a joining player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct JoinInfo {
    pub board_size: u8,
    pub mode: AttackMode,
    pub era: ShipEra,
}

/// Everything the transport layer needs to broadcast after an attack,
/// without re-deriving match state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FireReport {
    pub results: Vec<ShotResult>,
    pub positions: Vec<Position>,
    pub phase: Phase,
    /// Connection identity of the winner, absent for a draw or an
    /// unfinished match.
    pub winner: Option<String>,
    /// Connection identity owning the next turn.
    pub next_player: Option<String>,
    /// Full cell lists of ships sunk by this attack, revealed to both
    /// sides.
    pub sunk_ships: Vec<Vec<Position>>,
}

/// One hosted match: the game plus connection bookkeeping.
struct LobbySession {
    id: String,
    conns: [Option<String>; 2],
    ready: [bool; 2],
    mode: AttackMode,
    era: ShipEra,
    game: Game,
}

impl LobbySession {
    fn new(id: String, host: &str, board_size: u8, mode: AttackMode, era: ShipEra) -> Self {
        let p1 = Player::new("Player 1", board_size);
        let p2 = Player::new("Player 2", board_size);
        LobbySession {
            id,
            conns: [Some(host.to_string()), None],
            ready: [false, false],
            mode,
            era,
            game: Game::new(p1, p2, era),
        }
    }

    fn side_of(&self, conn: &str) -> Option<Side> {
        if self.conns[0].as_deref() == Some(conn) {
            Some(Side::P1)
        } else if self.conns[1].as_deref() == Some(conn) {
            Some(Side::P2)
        } else {
            None
        }
    }

    fn conn_of(&self, side: Side) -> Option<String> {
        self.conns[side.index()].clone()
    }

    fn detach(&mut self, conn: &str) {
        for slot in self.conns.iter_mut() {
            if slot.as_deref() == Some(conn) {
                *slot = None;
            }
        }
    }
}

/// The registry of live matches. Construct one per process and share it
/// behind an `Arc`; there is deliberately no global instance.
#[derive(Default)]
pub struct Lobby {
    games: Mutex<HashMap<String, Arc<Mutex<LobbySession>>>>,
    conn_index: Mutex<HashMap<String, String>>,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    fn session(&self, game_id: &str) -> Option<Arc<Mutex<LobbySession>>> {
        self.games.lock().unwrap().get(game_id).cloned()
    }

    fn with_session<T>(&self, game_id: &str, f: impl FnOnce(&mut LobbySession) -> T) -> Option<T> {
        let session = self.session(game_id)?;
        let mut guard = session.lock().unwrap();
        Some(f(&mut guard))
    }

    /// Open a new match and return its id. Insertion is atomic
    /// insert-if-absent; an id collision just redraws the token.
    pub fn create_game(&self, conn: &str, board_size: u8, mode: AttackMode, era: ShipEra) -> String {
        let mut rng = rand::rng();
        let game_id = {
            let mut games = self.games.lock().unwrap();
            loop {
                let id = new_token(&mut rng);
                match games.entry(id.clone()) {
                    Entry::Occupied(_) => continue,
                    Entry::Vacant(slot) => {
                        slot.insert(Arc::new(Mutex::new(LobbySession::new(
                            id.clone(),
                            conn,
                            board_size,
                            mode,
                            era,
                        ))));
                        break id;
                    }
                }
            }
        };
        self.conn_index
            .lock()
            .unwrap()
            .insert(conn.to_string(), game_id.clone());
        log::info!("game {} created by {}", game_id, conn);
        game_id
    }

    /// Take the second seat. Fails when the match is unknown or full.
    pub fn join_game(&self, game_id: &str, conn: &str) -> Option<JoinInfo> {
        let info = self.with_session(game_id, |s| {
            if s.conns[1].is_some() {
                return None;
            }
            s.conns[1] = Some(conn.to_string());
            Some(JoinInfo {
                board_size: s.game.player(Side::P1).board().size(),
                mode: s.mode,
                era: s.era,
            })
        })??;
        self.conn_index
            .lock()
            .unwrap()
            .insert(conn.to_string(), game_id.to_string());
        log::info!("{} joined game {}", conn, game_id);
        Some(info)
    }

    /// Replace the caller's fleet with the given placements, all or
    /// nothing: any rejected ship rolls back every ship placed by this
    /// call and leaves the side not ready.
    pub fn place_fleet(&self, game_id: &str, conn: &str, ships: &[ShipPlacement]) -> bool {
        self.with_session(game_id, |s| {
            let Some(side) = s.side_of(conn) else {
                return false;
            };
            if s.game.phase() != Phase::Preparing {
                return false;
            }
            s.ready[side.index()] = false;
            let era = s.era;
            let board = s.game.player_mut(side).board_mut();
            board.clear();
            let mut placed: Vec<ShipId> = Vec::with_capacity(ships.len());
            for placement in ships {
                match board.place(Ship::from_placement(placement, era)) {
                    Ok(id) => placed.push(id),
                    Err(err) => {
                        log::warn!("fleet rejected in game {}: {}", s.id, err);
                        for id in placed {
                            board.remove(id);
                        }
                        return false;
                    }
                }
            }
            s.ready[side.index()] = true;
            true
        })
        .unwrap_or(false)
    }

    /// Begin play once both sides are ready and both fleets are complete.
    pub fn start_game(&self, game_id: &str) -> bool {
        self.with_session(game_id, |s| {
            if !s.ready[0] || !s.ready[1] {
                return false;
            }
            let started = s.game.try_start();
            if started {
                log::info!("game {} started", s.id);
            }
            started
        })
        .unwrap_or(false)
    }

    /// Connection identity owning the current turn.
    pub fn current_player(&self, game_id: &str) -> Option<String> {
        self.with_session(game_id, |s| s.conn_of(s.game.current()))?
    }

    /// Fire using the match's configured attack mode. Silently `None`
    /// when the identity is unknown or does not own the turn.
    pub fn fire(&self, game_id: &str, conn: &str, target: Position) -> Option<FireReport> {
        self.attack(game_id, conn, target, None)
    }

    /// Fire a 3×3 salvo regardless of the configured mode.
    pub fn fire_salvo(&self, game_id: &str, conn: &str, origin: Position) -> Option<FireReport> {
        self.attack(game_id, conn, origin, Some(AttackMode::Salvo3x3))
    }

    fn attack(
        &self,
        game_id: &str,
        conn: &str,
        origin: Position,
        mode_override: Option<AttackMode>,
    ) -> Option<FireReport> {
        self.with_session(game_id, |s| {
            let side = s.side_of(conn)?;
            if s.game.current() != side {
                return None;
            }
            let mode = mode_override.unwrap_or(s.mode);
            let outcome = mode.execute(&mut s.game, origin);

            // Reveal any ships this attack finished off, before the ids
            // in the sweep results can go stale.
            let opponent_board = s.game.player(side.opposite()).board();
            let mut sunk_ids: Vec<ShipId> = Vec::new();
            for (pos, result) in outcome.positions.iter().zip(outcome.results.iter()) {
                if *result == ShotResult::Sunk {
                    if let Some(id) = opponent_board.ship_at(*pos) {
                        if !sunk_ids.contains(&id) {
                            sunk_ids.push(id);
                        }
                    }
                }
            }
            let sunk_ships = sunk_ids
                .into_iter()
                .map(|id| opponent_board.ship_cells(id))
                .collect();

            if outcome.end_turn {
                s.game.end_turn();
            }
            if s.game.phase() == Phase::Finished {
                log::info!("game {} finished", s.id);
            }
            Some(FireReport {
                results: outcome.results,
                positions: outcome.positions,
                phase: s.game.phase(),
                winner: s.game.winner().and_then(|w| s.conn_of(w)),
                next_player: s.conn_of(s.game.current()),
                sunk_ships,
            })
        })?
    }

    /// Concede the match. Returns false for an unknown identity.
    pub fn surrender(&self, game_id: &str, conn: &str) -> bool {
        self.with_session(game_id, |s| match s.side_of(conn) {
            Some(side) => {
                s.game.surrender(side);
                true
            }
            None => false,
        })
        .unwrap_or(false)
    }

    pub fn propose_draw(&self, game_id: &str, conn: &str) -> bool {
        self.with_session(game_id, |s| match s.side_of(conn) {
            Some(side) => {
                s.game.propose_draw(side);
                true
            }
            None => false,
        })
        .unwrap_or(false)
    }

    /// Accept a pending draw. True only when this call resolved the
    /// negotiation.
    pub fn accept_draw(&self, game_id: &str, conn: &str) -> bool {
        self.with_session(game_id, |s| {
            let Some(side) = s.side_of(conn) else {
                return false;
            };
            let before = s.game.draw_state();
            s.game.accept_draw(side);
            s.game.draw_state() == DrawState::Accepted && before != DrawState::Accepted
        })
        .unwrap_or(false)
    }

    pub fn game_id_for(&self, conn: &str) -> Option<String> {
        self.conn_index.lock().unwrap().get(conn).cloned()
    }

    /// Connection identities attached to a match.
    pub fn connections(&self, game_id: &str) -> Vec<String> {
        self.with_session(game_id, |s| {
            s.conns.iter().flatten().cloned().collect::<Vec<_>>()
        })
        .unwrap_or_default()
    }

    /// Drop the identity-to-match mapping. Policy: the match survives a
    /// single disconnect so the peer can keep the final state on screen;
    /// the session itself is removed only once both sides are gone.
    pub fn disconnect(&self, conn: &str) {
        let Some(game_id) = self.conn_index.lock().unwrap().remove(conn) else {
            return;
        };
        let Some(session) = self.session(&game_id) else {
            return;
        };
        let both_gone = {
            let mut s = session.lock().unwrap();
            s.detach(conn);
            s.conns.iter().all(Option::is_none)
        };
        if both_gone {
            self.games.lock().unwrap().remove(&game_id);
            log::info!("game {} removed after both players left", game_id);
        }
    }
}
