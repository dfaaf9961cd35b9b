use std::time::Instant;

use log::info;
use num_format::{Locale, ToFormattedString};

use crate::{error::BoardError, game::GameState, move_generator::legal_moves};

impl GameState {
    /// Counts the positions reachable in exactly `depth` moves. A king capture ends its branch, so a
    /// concluded position before the last move contributes nothing further.
    pub fn start_perft(&self, depth: u8, divide: bool) -> Result<PerftStats, BoardError> {
        let mut stats = PerftStats::default();

        let start_time = Instant::now();
        do_perft(depth, 1, self, &mut stats, divide)?;
        let elapsed = start_time.elapsed();

        if divide {
            println!("\n{}", stats.nodes);
        }

        let nps = stats.nodes as f64 / elapsed.as_secs_f64();
        info!(
            "depth {depth} in {elapsed:#?}. Nodes: {}. Nodes per second: {}",
            stats.nodes.to_formatted_string(&Locale::en),
            (nps as u64).to_formatted_string(&Locale::en)
        );
        info!("{:?}", stats);

        Ok(stats)
    }
}

/// Capture, promotion and king capture counts are only gathered on the last move
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct PerftStats {
    pub nodes: u64,
    pub captures: u64,
    pub promotions: u64,
    pub king_captures: u64,
}

// Code referenced from https://www.chessprogramming.org/Perft
fn do_perft(draft: u8, ply: u8, state: &GameState, stats: &mut PerftStats, divide: bool) -> Result<(), BoardError> {
    if draft == 0 {
        stats.nodes += 1;
        return Ok(());
    }

    if state.is_concluded() {
        return Ok(());
    }

    for (from, piece) in state.board.occupied() {
        if piece.side != state.side_to_move {
            continue;
        }

        for to in legal_moves(state, from)? {
            let mut child = state.clone();
            let outcome = child.apply_move(from, to)?;

            if draft == 1 {
                if outcome.captured.is_some() {
                    stats.captures += 1;
                }
                if outcome.promoted {
                    stats.promotions += 1;
                }
                if outcome.winner.is_some() {
                    stats.king_captures += 1;
                }
            }

            let start_nodes = stats.nodes;
            do_perft(draft - 1, ply + 1, &child, stats, divide)?;

            if divide && ply == 1 {
                println!(
                    "({}, {}) -> ({}, {}) {}",
                    from.row,
                    from.col,
                    to.row,
                    to.col,
                    stats.nodes - start_nodes
                )
            }
        }
    }

    Ok(())
}
