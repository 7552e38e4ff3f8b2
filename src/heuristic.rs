use log::debug;

use crate::board::{Board, Pos, Symbol};
use crate::lines::{completes_streak, windows, Window};
use crate::strategy::{MoveContext, Strategy};

/// Weight schedules for the line-potential evaluation. A window holding
/// `count` of our stones and none of the opponent's pays
/// `attack[count]`; the mirror case pays `block[count]`; mixed and empty
/// windows pay nothing.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ScoreTable {
    attack: Vec<i64>,
    block: Vec<i64>,
}

impl ScoreTable {
    /// The shipped schedule: a window with k aligned stones pays 10^k to
    /// complete, and denying the opponent the same window pays double.
    /// Near-complete lines dwarf everything below them.
    pub fn exponential(streak: usize) -> ScoreTable {
        let attack: Vec<i64> = (0..streak)
            .map(|count| {
                if count == 0 {
                    0
                } else {
                    10i64.pow(count as u32)
                }
            })
            .collect();
        let block = attack.iter().map(|weight| weight * 2).collect();
        ScoreTable { attack, block }
    }

    pub fn new(attack: Vec<i64>, block: Vec<i64>) -> ScoreTable {
        ScoreTable { attack, block }
    }

    fn attack(&self, count: usize) -> i64 {
        weight(&self.attack, count)
    }

    fn block(&self, count: usize) -> i64 {
        weight(&self.block, count)
    }
}

fn weight(table: &[i64], count: usize) -> i64 {
    match table.get(count) {
        Some(&weight) => weight,
        None => table.last().copied().unwrap_or(0),
    }
}

/// Scored one-ply evaluation: take a win when one is on the board, block
/// an imminent loss, otherwise pick the cell whose line windows promise
/// the most.
#[derive(Debug, Clone, Default)]
pub struct Heuristic {
    table: Option<ScoreTable>,
}

impl Heuristic {
    pub fn new() -> Heuristic {
        Heuristic { table: None }
    }

    pub fn with_table(table: ScoreTable) -> Heuristic {
        Heuristic { table: Some(table) }
    }
}

impl Strategy for Heuristic {
    fn choose(&mut self, board: &Board, ctx: &MoveContext) -> Option<Pos> {
        if let Some(pos) = board
            .legal_moves()
            .find(|&pos| completes_streak(board, pos, ctx.ai))
        {
            debug!("heuristic wins at {}", pos);
            return Some(pos);
        }
        // a forced block outranks every score below
        if let Some(pos) = board
            .legal_moves()
            .find(|&pos| completes_streak(board, pos, !ctx.ai))
        {
            debug!("heuristic blocks at {}", pos);
            return Some(pos);
        }

        let default_table;
        let table = match &self.table {
            Some(table) => table,
            None => {
                default_table = ScoreTable::exponential(board.streak());
                &default_table
            }
        };

        let all_windows = windows(&board.spec());
        let mut best: Option<(i64, Pos)> = None;
        for pos in board.legal_moves() {
            let score = cell_score(board, &all_windows, pos, ctx.ai, table);
            match best {
                Some((best_score, _)) if score <= best_score => {}
                _ => best = Some((score, pos)),
            }
        }
        best.map(|(_, pos)| pos)
    }
}

/// Sum of the window values through one candidate cell. The candidate
/// itself is not counted, only what already sits on the lines it joins.
fn cell_score(
    board: &Board,
    all_windows: &[Window],
    pos: Pos,
    ai: Symbol,
    table: &ScoreTable,
) -> i64 {
    all_windows
        .iter()
        .filter(|window| window.contains(pos))
        .map(|window| {
            let mut own = 0;
            let mut theirs = 0;
            for &window_pos in window.positions() {
                if window_pos == pos {
                    continue;
                }
                match board.cell(window_pos).symbol() {
                    Some(symbol) if symbol == ai => own += 1,
                    Some(_) => theirs += 1,
                    None => {}
                }
            }
            if own > 0 && theirs == 0 {
                table.attack(own)
            } else if theirs > 0 && own == 0 {
                table.block(theirs)
            } else {
                0
            }
        })
        .sum()
}
