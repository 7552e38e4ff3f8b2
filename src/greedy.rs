use log::debug;

use crate::board::{Board, Pos};
use crate::lines::completes_streak;
use crate::strategy::{MoveContext, Strategy};

/// One-ply tactics: win immediately if possible, else block the
/// opponent's immediate win, else stay close to their last move.
#[derive(Debug, Default, Copy, Clone)]
pub struct Greedy;

impl Greedy {
    pub fn new() -> Greedy {
        Greedy
    }
}

impl Strategy for Greedy {
    fn choose(&mut self, board: &Board, ctx: &MoveContext) -> Option<Pos> {
        if let Some(pos) = board
            .legal_moves()
            .find(|&pos| completes_streak(board, pos, ctx.ai))
        {
            debug!("greedy wins at {}", pos);
            return Some(pos);
        }
        if let Some(pos) = board
            .legal_moves()
            .find(|&pos| completes_streak(board, pos, !ctx.ai))
        {
            debug!("greedy blocks at {}", pos);
            return Some(pos);
        }
        match ctx.last_opponent_move {
            Some(reference) => nearest_free(board, reference),
            None => board.legal_moves().next(),
        }
    }
}

/// Closest empty cell by Manhattan distance, earliest in scan order on
/// ties.
fn nearest_free(board: &Board, reference: Pos) -> Option<Pos> {
    let mut best: Option<(usize, Pos)> = None;
    for pos in board.legal_moves() {
        let distance = pos.manhattan(reference);
        match best {
            Some((best_distance, _)) if distance >= best_distance => {}
            _ => best = Some((distance, pos)),
        }
    }
    best.map(|(_, pos)| pos)
}
