use std::borrow::Cow;
use std::collections::HashMap;

use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::board::{Board, BoardSpec, Cell, Pos, Symbol};

/// The four scan directions. Together with their reverses they cover every
/// line on the board.
#[derive(EnumIter, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    East,
    South,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }
}

/// Length of the run of `cell` starting next to `from` and walking along
/// `delta`, stopping at the board edge or the first different cell.
pub fn run_length(board: &Board, from: Pos, (dr, dc): (isize, isize), cell: Cell) -> usize {
    let size = board.size() as isize;
    let mut count = 0;
    let mut row = from.row as isize + dr;
    let mut col = from.col as isize + dc;
    while row >= 0 && row < size && col >= 0 && col < size {
        if board.cell(Pos::new(row as usize, col as usize)) != cell {
            break;
        }
        count += 1;
        row += dr;
        col += dc;
    }
    count
}

/// Would placing `symbol` on the empty cell `pos` complete a winning
/// streak? Counts both ways along each direction axis, so a run closed in
/// the middle is found too.
pub fn completes_streak(board: &Board, pos: Pos, symbol: Symbol) -> bool {
    debug_assert!(board.is_free(pos));
    let cell = Cell::from(symbol);
    let streak = board.streak();
    Direction::iter().any(|direction| {
        let (dr, dc) = direction.delta();
        let run = 1
            + run_length(board, pos, (dr, dc), cell)
            + run_length(board, pos, (-dr, -dc), cell);
        run >= streak
    })
}

/// One streak-length line segment lying fully on the board. For the 3x3
/// spec the enumeration yields exactly the eight classic lines.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Window {
    positions: Vec<Pos>,
}

impl Window {
    pub fn positions(&self) -> &[Pos] {
        &self.positions
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.positions.contains(&pos)
    }
}

fn build_windows(spec: &BoardSpec) -> Vec<Window> {
    let size = spec.size() as isize;
    let streak = spec.streak() as isize;
    let mut windows = Vec::new();
    for direction in Direction::iter() {
        let (dr, dc) = direction.delta();
        for row in 0..size {
            for col in 0..size {
                let end_row = row + dr * (streak - 1);
                let end_col = col + dc * (streak - 1);
                if end_row < 0 || end_row >= size || end_col < 0 || end_col >= size {
                    continue;
                }
                let positions = (0..streak)
                    .map(|step| {
                        Pos::new((row + dr * step) as usize, (col + dc * step) as usize)
                    })
                    .collect();
                windows.push(Window { positions });
            }
        }
    }
    windows
}

lazy_static! {
    static ref CANONICAL_WINDOWS: HashMap<(usize, usize), Vec<Window>> = [3usize, 6, 9]
        .iter()
        .map(|&size| {
            let spec = BoardSpec::for_size(size).expect("canonical size");
            ((spec.size(), spec.streak()), build_windows(&spec))
        })
        .collect();
}

fn canonical_windows() -> &'static HashMap<(usize, usize), Vec<Window>> {
    &CANONICAL_WINDOWS
}

/// Every window for the given spec. The canonical sizes are served from a
/// precomputed table, anything else is built on the fly.
pub fn windows(spec: &BoardSpec) -> Cow<'static, [Window]> {
    match canonical_windows().get(&(spec.size(), spec.streak())) {
        Some(precomputed) => Cow::Borrowed(precomputed.as_slice()),
        None => Cow::Owned(build_windows(spec)),
    }
}
