#![cfg(feature = "std")]

//! Network hub: one task per connection, all game state behind the
//! [`Lobby`]. The read loop dispatches requests synchronously (lobby
//! calls are short and CPU-bound); broadcasts go through per-connection
//! channels drained by a writer task, so a slow peer never blocks the
//! match.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::net::TcpListener;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::lobby::{new_token, Lobby};
use crate::protocol::{Event, Message, Request, PROTOCOL_VERSION};
use crate::transport::{tcp::TcpTransport, Transport};

#[derive(Default)]
pub struct GameServer {
    lobby: Lobby,
    peers: Mutex<HashMap<String, UnboundedSender<Event>>>,
}

impl GameServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lobby(&self) -> &Lobby {
        &self.lobby
    }

    /// Accept TCP connections forever, one task per peer.
    pub async fn listen(self: Arc<Self>, bind: &str) -> anyhow::Result<()> {
        let listener = TcpListener::bind(bind).await?;
        log::info!("listening on {}", bind);
        loop {
            let (stream, addr) = listener.accept().await?;
            log::info!("connection from {}", addr);
            let server = Arc::clone(&self);
            tokio::spawn(async move {
                server
                    .serve_connection(Box::new(TcpTransport::new(stream)))
                    .await;
            });
        }
    }

    /// Drive one connection to completion: assign an identity token,
    /// stream requests into the lobby, forward events back out.
    pub async fn serve_connection(self: Arc<Self>, transport: Box<dyn Transport>) {
        let (mut sink, mut stream) = transport.split();
        let conn_id = new_token(&mut rand::rng());

        let (tx, mut rx) = unbounded_channel::<Event>();
        self.peers
            .lock()
            .unwrap()
            .insert(conn_id.clone(), tx.clone());
        let _ = tx.send(Event::Welcome {
            version: PROTOCOL_VERSION,
            connection_id: conn_id.clone(),
        });

        let writer = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if sink.send(Message::Event(event)).await.is_err() {
                    break;
                }
            }
        });

        loop {
            match stream.recv().await {
                Ok(Message::Request(request)) => self.dispatch(&conn_id, request),
                Ok(Message::Event(_)) => {
                    log::warn!("peer {} sent an event frame, ignoring", conn_id);
                }
                Err(err) => {
                    log::info!("connection {} closed: {}", conn_id, err);
                    break;
                }
            }
        }

        if let Some(game_id) = self.lobby.game_id_for(&conn_id) {
            self.lobby.disconnect(&conn_id);
            self.send_to_game(
                &game_id,
                None,
                Event::PlayerDisconnected {
                    connection_id: conn_id.clone(),
                },
            );
        }
        self.peers.lock().unwrap().remove(&conn_id);
        drop(tx);
        let _ = writer.await;
    }

    fn send_to(&self, conn: &str, event: Event) {
        if let Some(tx) = self.peers.lock().unwrap().get(conn) {
            let _ = tx.send(event);
        }
    }

    /// Send to every connection of a match, optionally skipping one.
    fn send_to_game(&self, game_id: &str, except: Option<&str>, event: Event) {
        for conn in self.lobby.connections(game_id) {
            if except == Some(conn.as_str()) {
                continue;
            }
            self.send_to(&conn, event.clone());
        }
    }

    fn dispatch(&self, conn: &str, request: Request) {
        match request {
            Request::CreateGame {
                board_size,
                mode,
                era,
            } => {
                let game_id = self.lobby.create_game(conn, board_size, mode, era);
                self.send_to(conn, Event::GameCreated { game_id });
            }
            Request::JoinGame { game_id } => match self.lobby.join_game(&game_id, conn) {
                Some(info) => {
                    self.send_to(
                        conn,
                        Event::JoinAccepted {
                            game_id: game_id.clone(),
                            board_size: info.board_size,
                            mode: info.mode,
                            era: info.era,
                        },
                    );
                    self.send_to_game(&game_id, Some(conn), Event::OpponentJoined);
                }
                None => self.send_to(conn, Event::JoinRejected { game_id }),
            },
            Request::PlaceFleet { game_id, ships } => {
                if self.lobby.place_fleet(&game_id, conn, &ships) {
                    self.send_to(conn, Event::FleetAccepted);
                    self.send_to_game(&game_id, Some(conn), Event::OpponentReady);
                    if self.lobby.start_game(&game_id) {
                        self.announce_start(&game_id);
                    }
                } else {
                    self.send_to(conn, Event::FleetRejected);
                }
            }
            Request::StartGame { game_id } => {
                if self.lobby.start_game(&game_id) {
                    self.announce_start(&game_id);
                }
            }
            Request::Fire { game_id, target } => {
                if let Some(report) = self.lobby.fire(&game_id, conn, target) {
                    self.send_to_game(
                        &game_id,
                        None,
                        Event::ShotFired {
                            shooter: conn.to_string(),
                            report,
                        },
                    );
                }
            }
            Request::FireSalvo { game_id, origin } => {
                if let Some(report) = self.lobby.fire_salvo(&game_id, conn, origin) {
                    self.send_to_game(
                        &game_id,
                        None,
                        Event::SalvoFired {
                            shooter: conn.to_string(),
                            origin,
                            report,
                        },
                    );
                }
            }
            Request::Surrender { game_id } => {
                if self.lobby.surrender(&game_id, conn) {
                    self.send_to_game(
                        &game_id,
                        None,
                        Event::PlayerSurrendered {
                            connection_id: conn.to_string(),
                        },
                    );
                }
            }
            Request::ProposeDraw { game_id } => {
                if self.lobby.propose_draw(&game_id, conn) {
                    self.send_to_game(&game_id, Some(conn), Event::DrawProposed);
                }
            }
            Request::AcceptDraw { game_id } => {
                if self.lobby.accept_draw(&game_id, conn) {
                    self.send_to_game(&game_id, None, Event::DrawAccepted);
                }
            }
        }
    }

    fn announce_start(&self, game_id: &str) {
        let first_player = self.lobby.current_player(game_id);
        self.send_to_game(game_id, None, Event::GameStarted { first_player });
    }
}
