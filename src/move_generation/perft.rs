//! Perft: exhaustive leaf counting to a fixed depth.
//!
//! Recursion runs on one live `GameState` through make/unmake, so every count
//! also exercises exact restoration by `unmake_move`.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::chess_errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::Move;

/// Caller-selected reporting options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftOptions {
    /// Report the leaf count under each root move.
    pub divide: bool,
}

/// Per-root-move breakdown of one perft run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerftDivide {
    pub branches: Vec<(Move, u64)>,
    pub total: u64,
}

impl fmt::Display for PerftDivide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (mv, nodes) in &self.branches {
            writeln!(f, "{mv}: {nodes}")?;
        }
        write!(f, "Nodes searched: {}", self.total)
    }
}

/// Outcome of `run_to_depth`.
#[derive(Debug, Clone)]
pub struct PerftRun {
    pub fen: String,
    pub depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
    /// Present when divide reporting was requested.
    pub divide: Option<PerftDivide>,
}

impl PerftRun {
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.nodes as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for PerftRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(divide) = &self.divide {
            writeln!(f, "{divide}")?;
        }
        write!(
            f,
            "Depth: {}. Nodes: {}. Time: {:.3}s. NPS: {:.0}",
            self.depth,
            self.nodes,
            self.elapsed.as_secs_f64(),
            self.nodes_per_second()
        )
    }
}

/// Leaf count at `depth`; depth 0 counts the position itself.
///
/// `game_state` is mutated during the search and restored before returning.
pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = generator.generate_legal_moves(game_state);
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for mv in moves {
        let undo = game_state.make_move(mv);
        nodes += perft(generator, game_state, depth - 1)?;
        game_state.unmake_move(undo)?;
    }

    Ok(nodes)
}

/// Like `perft`, but keeps the count under each root move. Each line is
/// logged as soon as its branch finishes.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> ChessResult<PerftDivide> {
    if depth == 0 {
        return Ok(PerftDivide {
            branches: Vec::new(),
            total: 1,
        });
    }

    let mut divide = PerftDivide::default();
    for mv in generator.generate_legal_moves(game_state) {
        let undo = game_state.make_move(mv);
        let nodes = perft(generator, game_state, depth - 1)?;
        game_state.unmake_move(undo)?;

        info!("{mv}: {nodes}");
        divide.branches.push((mv, nodes));
        divide.total += nodes;
    }

    Ok(divide)
}

/// Parses `fen` and counts leaves to `depth`, timing the search.
pub fn run_to_depth(fen: &str, depth: u8, options: PerftOptions) -> ChessResult<PerftRun> {
    let mut game_state = GameState::from_fen(fen)?;
    let generator = LegalMoveGenerator::default();

    debug!("perft start: depth {depth}, divide {}, fen '{fen}'", options.divide);
    if log::log_enabled!(log::Level::Debug) {
        debug!("\n{}", game_state.render());
    }
    let start = Instant::now();
    let (nodes, divide) = if options.divide {
        let divide = perft_divide(&generator, &mut game_state, depth)?;
        (divide.total, Some(divide))
    } else {
        (perft(&generator, &mut game_state, depth)?, None)
    };
    let elapsed = start.elapsed();

    info!(
        "perft depth {depth}: {nodes} nodes in {:.3}s",
        elapsed.as_secs_f64()
    );

    Ok(PerftRun {
        fen: fen.trim().to_owned(),
        depth,
        nodes,
        elapsed,
        divide,
    })
}
