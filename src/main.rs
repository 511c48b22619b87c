#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::sync::Arc;

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[cfg(feature = "std")]
use flotilla::{
    init_logging, AiGunner, AttackMode, Game, GameServer, Phase, Player, ShipEra, Side,
    DEFAULT_BOARD_SIZE,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Host a lobby server accepting TCP connections.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
    },
    /// Run a local automated match and print the outcome.
    Demo {
        #[arg(long, help = "Fix RNG seed for a reproducible match")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = DemoEra::Classic)]
        era: DemoEra,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum DemoEra {
    Classic,
    Modern,
}

#[cfg(feature = "std")]
impl From<DemoEra> for ShipEra {
    fn from(era: DemoEra) -> Self {
        match era {
            DemoEra::Classic => ShipEra::Classic,
            DemoEra::Modern => ShipEra::Modern,
        }
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind } => {
            let server = Arc::new(GameServer::new());
            server.listen(&bind).await?;
        }
        Commands::Demo { seed, era } => {
            run_demo(seed, era.into())?;
        }
    }
    Ok(())
}

/// Two automated gunners slug it out with single shots until one fleet
/// is gone.
#[cfg(feature = "std")]
fn run_demo(seed: Option<u64>, era: ShipEra) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };

    let mut p1 = Player::new("Player 1", DEFAULT_BOARD_SIZE);
    let mut p2 = Player::new("Player 2", DEFAULT_BOARD_SIZE);
    p1.board_mut()
        .place_random_fleet(&mut rng, era)
        .map_err(|e| anyhow::anyhow!(e))?;
    p2.board_mut()
        .place_random_fleet(&mut rng, era)
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut game = Game::new(p1, p2, era);
    if !game.try_start() {
        return Err(anyhow::anyhow!("demo fleets failed completeness check"));
    }

    let mut gunners = [AiGunner::new(), AiGunner::new()];
    let mut shots = 0usize;
    while game.phase() == Phase::Playing {
        let shooter = game.current();
        let target = gunners[shooter.index()]
            .next_target(&mut rng, DEFAULT_BOARD_SIZE)
            .ok_or_else(|| anyhow::anyhow!("board exhausted without a winner"))?;
        let outcome = AttackMode::Single.execute(&mut game, target);
        shots += 1;
        if outcome.end_turn {
            game.end_turn();
        }
    }

    let winner = match game.winner() {
        Some(Side::P1) => "Player 1",
        Some(Side::P2) => "Player 2",
        None => "nobody (draw)",
    };
    println!("winner: {} after {} shots", winner, shots);
    Ok(())
}
