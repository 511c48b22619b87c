use std::sync::Arc;

use flotilla::transport::in_memory::InMemoryTransport;
use flotilla::transport::Transport;
use flotilla::{
    AttackMode, Event, GameServer, Message, Orientation, Phase, Position, Request, ShotResult,
    ShipEra, ShipKind, ShipPlacement, ShipSkin, PROTOCOL_VERSION,
};

fn classic_fleet() -> Vec<ShipPlacement> {
    let layout = [
        (ShipKind::Battleship, 0, 0),
        (ShipKind::Submarine, 2, 0),
        (ShipKind::Submarine, 2, 4),
        (ShipKind::Destroyer, 4, 0),
        (ShipKind::Destroyer, 4, 3),
        (ShipKind::Destroyer, 4, 6),
        (ShipKind::Cruiser, 6, 0),
        (ShipKind::Cruiser, 6, 2),
        (ShipKind::Cruiser, 6, 4),
        (ShipKind::Cruiser, 6, 6),
    ];
    layout
        .iter()
        .map(|&(kind, row, col)| ShipPlacement {
            kind,
            start: Position::new(row, col),
            orientation: Orientation::Horizontal,
            skin: ShipSkin::Standard,
        })
        .collect()
}

async fn next_event(transport: &mut InMemoryTransport) -> Event {
    match transport.recv().await.unwrap() {
        Message::Event(event) => event,
        Message::Request(req) => panic!("server sent a request frame: {:?}", req),
    }
}

/// Wait for a specific event, skipping unrelated broadcasts.
async fn wait_for<F: Fn(&Event) -> bool>(transport: &mut InMemoryTransport, pred: F) -> Event {
    for _ in 0..32 {
        let event = next_event(transport).await;
        if pred(&event) {
            return event;
        }
    }
    panic!("expected event never arrived");
}

async fn send(transport: &mut InMemoryTransport, request: Request) {
    transport.send(Message::Request(request)).await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_match_over_in_memory_transport() {
    let server = Arc::new(GameServer::new());
    let (server_a, mut client_a) = InMemoryTransport::pair();
    let (server_b, mut client_b) = InMemoryTransport::pair();
    tokio::spawn(Arc::clone(&server).serve_connection(Box::new(server_a)));
    tokio::spawn(Arc::clone(&server).serve_connection(Box::new(server_b)));

    let Event::Welcome {
        version,
        connection_id: id_a,
    } = next_event(&mut client_a).await
    else {
        panic!("expected Welcome");
    };
    assert_eq!(version, PROTOCOL_VERSION);
    let Event::Welcome {
        connection_id: id_b,
        ..
    } = next_event(&mut client_b).await
    else {
        panic!("expected Welcome");
    };

    send(
        &mut client_a,
        Request::CreateGame {
            board_size: 10,
            mode: AttackMode::Single,
            era: ShipEra::Classic,
        },
    )
    .await;
    let Event::GameCreated { game_id } = next_event(&mut client_a).await else {
        panic!("expected GameCreated");
    };

    send(
        &mut client_b,
        Request::JoinGame {
            game_id: game_id.clone(),
        },
    )
    .await;
    let joined = next_event(&mut client_b).await;
    assert!(matches!(joined, Event::JoinAccepted { board_size: 10, .. }));
    let opponent = next_event(&mut client_a).await;
    assert!(matches!(opponent, Event::OpponentJoined));

    send(
        &mut client_a,
        Request::PlaceFleet {
            game_id: game_id.clone(),
            ships: classic_fleet(),
        },
    )
    .await;
    assert!(matches!(
        next_event(&mut client_a).await,
        Event::FleetAccepted
    ));

    send(
        &mut client_b,
        Request::PlaceFleet {
            game_id: game_id.clone(),
            ships: classic_fleet(),
        },
    )
    .await;

    // both peers hear the start; the creator moves first
    let started = wait_for(&mut client_a, |e| matches!(e, Event::GameStarted { .. })).await;
    let Event::GameStarted { first_player } = started else {
        unreachable!();
    };
    assert_eq!(first_player.as_deref(), Some(id_a.as_str()));
    wait_for(&mut client_b, |e| matches!(e, Event::GameStarted { .. })).await;

    // a wrong-turn shot from B is silently dropped; A's shot lands
    send(
        &mut client_b,
        Request::Fire {
            game_id: game_id.clone(),
            target: Position::new(0, 0),
        },
    )
    .await;
    send(
        &mut client_a,
        Request::Fire {
            game_id: game_id.clone(),
            target: Position::new(6, 0),
        },
    )
    .await;

    for client in [&mut client_a, &mut client_b] {
        let fired = wait_for(client, |e| matches!(e, Event::ShotFired { .. })).await;
        let Event::ShotFired { shooter, report } = fired else {
            unreachable!();
        };
        assert_eq!(shooter, id_a);
        assert_eq!(report.results, vec![ShotResult::Sunk]);
        assert_eq!(report.phase, Phase::Playing);
        assert_eq!(report.next_player.as_deref(), Some(id_a.as_str()));
        assert_eq!(report.sunk_ships, vec![vec![Position::new(6, 0)]]);
    }

    // salvo from A passes the turn to B
    send(
        &mut client_a,
        Request::FireSalvo {
            game_id: game_id.clone(),
            origin: Position::new(9, 9),
        },
    )
    .await;
    let salvo = wait_for(&mut client_b, |e| matches!(e, Event::SalvoFired { .. })).await;
    let Event::SalvoFired { report, .. } = salvo else {
        unreachable!();
    };
    assert_eq!(report.results.len(), 4);
    assert_eq!(report.next_player.as_deref(), Some(id_b.as_str()));

    // surrender finishes the match for both peers
    send(
        &mut client_b,
        Request::Surrender {
            game_id: game_id.clone(),
        },
    )
    .await;
    let surrendered = wait_for(&mut client_a, |e| {
        matches!(e, Event::PlayerSurrendered { .. })
    })
    .await;
    let Event::PlayerSurrendered { connection_id } = surrendered else {
        unreachable!();
    };
    assert_eq!(connection_id, id_b);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_draw_events_over_in_memory_transport() {
    let server = Arc::new(GameServer::new());
    let (server_a, mut client_a) = InMemoryTransport::pair();
    let (server_b, mut client_b) = InMemoryTransport::pair();
    tokio::spawn(Arc::clone(&server).serve_connection(Box::new(server_a)));
    tokio::spawn(Arc::clone(&server).serve_connection(Box::new(server_b)));

    next_event(&mut client_a).await; // Welcome
    next_event(&mut client_b).await;

    send(
        &mut client_a,
        Request::CreateGame {
            board_size: 10,
            mode: AttackMode::Single,
            era: ShipEra::Classic,
        },
    )
    .await;
    let Event::GameCreated { game_id } = next_event(&mut client_a).await else {
        panic!("expected GameCreated");
    };
    send(
        &mut client_b,
        Request::JoinGame {
            game_id: game_id.clone(),
        },
    )
    .await;
    wait_for(&mut client_b, |e| matches!(e, Event::JoinAccepted { .. })).await;

    for client in [&mut client_a, &mut client_b] {
        send(
            client,
            Request::PlaceFleet {
                game_id: game_id.clone(),
                ships: classic_fleet(),
            },
        )
        .await;
        wait_for(client, |e| matches!(e, Event::FleetAccepted)).await;
    }
    wait_for(&mut client_a, |e| matches!(e, Event::GameStarted { .. })).await;

    send(
        &mut client_a,
        Request::ProposeDraw {
            game_id: game_id.clone(),
        },
    )
    .await;
    wait_for(&mut client_b, |e| matches!(e, Event::DrawProposed)).await;

    send(
        &mut client_b,
        Request::AcceptDraw {
            game_id: game_id.clone(),
        },
    )
    .await;
    wait_for(&mut client_a, |e| matches!(e, Event::DrawAccepted)).await;
    wait_for(&mut client_b, |e| matches!(e, Event::DrawAccepted)).await;
}
