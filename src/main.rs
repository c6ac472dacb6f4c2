//! Gomoku AI engine demo
//!
//! Runs a few scripted positions and a short engine-vs-engine game.
//! Set `GOMOKU_CONFIG` to a TOML file to override the engine settings and
//! `RUST_LOG` to control log output.

use std::thread;
use std::time::Duration;

use gomoku::{AIEngine, EngineConfig, GomokuError, Pos, State};
use tracing_subscriber::EnvFilter;

/// Plies played in the self-play demo
const SELF_PLAY_PLIES: usize = 20;

fn main() -> Result<(), GomokuError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gomoku=info")),
        )
        .init();

    let config = match std::env::var_os("GOMOKU_CONFIG") {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::new(15, 500),
    };
    let mut engine = AIEngine::new(config)?;
    let center = (engine.config().board_size / 2) as u8;

    println!("== opening ==");
    report(&mut engine, &[])?;

    // Scripted rows need room for four White stones two columns apart
    if engine.config().board_size >= 7 {
        println!("== win: Black completes a four ==");
        let win = line(center, center - 2, 4, center - 3);
        report(&mut engine, &win)?;

        println!("== block: White stops a four ==");
        report(&mut engine, &win[..win.len() - 1])?;
    }

    println!("== cancelled search ==");
    let handle = engine.cancel_handle();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        handle.cancel();
    });
    report(&mut engine, &[Pos::new(center, center)])?;
    let _ = canceller.join();

    println!("== self-play ==");
    self_play(&mut engine)
}

/// Black stones along a row starting at `start`, White stones on a
/// parallel row, Black to move.
fn line(row: u8, start: u8, len: u8, white_row: u8) -> Vec<Pos> {
    (0..len)
        .flat_map(|i| [Pos::new(row, start + i), Pos::new(white_row, i * 2)])
        .collect()
}

fn report(engine: &mut AIEngine, history: &[Pos]) -> Result<(), GomokuError> {
    let result = engine.get_move_with_stats(history)?;
    match result.best_move {
        Some(pos) => println!(
            "{} moves played -> {pos} ({:?}, depth {}, score {}, {} nodes, {}ms)",
            history.len(),
            result.search_type,
            result.depth,
            result.score,
            result.nodes,
            result.time_ms
        ),
        None => println!("{} moves played -> no legal move", history.len()),
    }
    Ok(())
}

fn self_play(engine: &mut AIEngine) -> Result<(), GomokuError> {
    let size = engine.config().board_size;
    let mut history: Vec<Pos> = Vec::new();

    for ply in 0..SELF_PLAY_PLIES {
        let Some(pos) = engine.get_move(&history)? else {
            println!("board full, draw");
            return Ok(());
        };
        history.push(pos);
        println!("{:>3}. {} {pos}", ply + 1, if ply % 2 == 0 { "Black" } else { "White" });

        let state = State::from_history(size, &history, None)?;
        if let Some(winner) = state.terminal_status().winner() {
            println!("{winner:?} wins after {} moves", history.len());
            return Ok(());
        }
    }

    println!("no result after {SELF_PLAY_PLIES} plies");
    Ok(())
}
