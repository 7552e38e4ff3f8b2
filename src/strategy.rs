use std::str::FromStr;

use log::debug;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use strum_macros::{Display, EnumIter};

use crate::board::{Board, Outcome, Pos, Symbol};
use crate::error::Error;
use crate::greedy::Greedy;
use crate::heuristic::{Heuristic, ScoreTable};
use crate::minimax::{Minimax, SearchDepth};

/// Per-move inputs shared by every engine: the symbol it plays and, when
/// the caller tracks it, the opponent's most recent move for the
/// proximity heuristics.
#[derive(Debug, Copy, Clone)]
pub struct MoveContext {
    pub ai: Symbol,
    pub last_opponent_move: Option<Pos>,
}

impl MoveContext {
    pub fn new(ai: Symbol) -> MoveContext {
        MoveContext {
            ai,
            last_opponent_move: None,
        }
    }

    pub fn with_last_move(ai: Symbol, last: Pos) -> MoveContext {
        MoveContext {
            ai,
            last_opponent_move: Some(last),
        }
    }
}

impl Default for MoveContext {
    /// The engine defaults to O, the human to X.
    fn default() -> MoveContext {
        MoveContext::new(Symbol::O)
    }
}

/// The one contract all engines implement: borrow a board, return a legal
/// move, leave the board untouched. `None` means there is no legal move.
pub trait Strategy {
    fn choose(&mut self, board: &Board, ctx: &MoveContext) -> Option<Pos>;
}

/// Uniform choice among the empty cells. The randomness source is
/// injected so tests can seed it.
#[derive(Debug, Clone)]
pub struct Random<R: Rng> {
    rng: R,
}

impl Random<ThreadRng> {
    pub fn new() -> Random<ThreadRng> {
        Random {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for Random<ThreadRng> {
    fn default() -> Random<ThreadRng> {
        Random::new()
    }
}

impl<R: Rng> Random<R> {
    pub fn with_rng(rng: R) -> Random<R> {
        Random { rng }
    }
}

impl<R: Rng> Strategy for Random<R> {
    fn choose(&mut self, board: &Board, _ctx: &MoveContext) -> Option<Pos> {
        let moves: Vec<Pos> = board.legal_moves().collect();
        moves.choose(&mut self.rng).copied()
    }
}

#[derive(Display, EnumIter, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum StrategyKind {
    Minimax,
    Greedy,
    Random,
    Heuristic,
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<StrategyKind, Error> {
        match name {
            "minimax" => Ok(StrategyKind::Minimax),
            "greedy" => Ok(StrategyKind::Greedy),
            "random" => Ok(StrategyKind::Random),
            "heuristic" => Ok(StrategyKind::Heuristic),
            unknown => Err(Error::UnknownStrategy(unknown.to_string())),
        }
    }
}

/// Optional overrides; `None` fields fall back to the per-size defaults.
#[derive(Debug, Clone, Default)]
pub struct StrategyConfig {
    pub depth: Option<SearchDepth>,
    pub score_table: Option<ScoreTable>,
}

pub fn strategy_for(
    kind: StrategyKind,
    size: usize,
    config: &StrategyConfig,
) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::Minimax => {
            let depth = config.depth.unwrap_or_else(|| SearchDepth::for_size(size));
            Box::new(Minimax::new(depth))
        }
        StrategyKind::Greedy => Box::new(Greedy::new()),
        StrategyKind::Random => Box::new(Random::new()),
        StrategyKind::Heuristic => match config.score_table.clone() {
            Some(table) => Box::new(Heuristic::with_table(table)),
            None => Box::new(Heuristic::new()),
        },
    }
}

/// Validates the board and dispatches to the configured engine. A board
/// that already holds a completed streak is a caller error; a full board
/// reports the no-legal-move sentinel `Ok(None)`.
pub fn select_move(
    kind: StrategyKind,
    board: &Board,
    ctx: &MoveContext,
    config: &StrategyConfig,
) -> Result<Option<Pos>, Error> {
    match board.outcome() {
        Outcome::Win(winner) => Err(Error::GameOver { winner }),
        Outcome::Draw => Ok(None),
        Outcome::InProgress => {
            let chosen = strategy_for(kind, board.size(), config).choose(board, ctx);
            debug!("{} picked {:?} playing {}", kind, chosen, ctx.ai);
            Ok(chosen)
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::board::{BoardSpec, Cell};
    use Cell::{Empty as E, O, X};

    fn board3(cells: [Cell; 9]) -> Board {
        Board::from_cells(BoardSpec::for_size(3).unwrap(), cells.to_vec()).unwrap()
    }

    #[test]
    fn random_only_ever_picks_empty_cells() {
        let board = board3([X, O, E, E, X, E, O, E, E]);
        let mut random = Random::with_rng(StdRng::seed_from_u64(7));
        for _ in 0..200 {
            let pos = random.choose(&board, &MoveContext::default()).unwrap();
            assert!(board.is_free(pos));
        }
    }

    #[test]
    fn random_is_roughly_uniform() {
        let board = board3([X, O, E, E, X, E, O, E, E]);
        let mut random = Random::with_rng(StdRng::seed_from_u64(42));
        let mut counts: HashMap<Pos, u32> = HashMap::new();
        let trials = 5000;
        for _ in 0..trials {
            let pos = random.choose(&board, &MoveContext::default()).unwrap();
            *counts.entry(pos).or_default() += 1;
        }
        // five empty cells, expect about a fifth each
        assert_eq!(counts.len(), 5);
        for (&pos, &count) in &counts {
            assert!(
                (800..=1200).contains(&count),
                "cell {} drawn {} times out of {}",
                pos,
                count,
                trials
            );
        }
    }

    #[test]
    fn random_reports_no_move_on_a_full_board() {
        let board = board3([X, O, X, O, O, X, X, X, O]);
        let mut random = Random::with_rng(StdRng::seed_from_u64(1));
        assert_eq!(random.choose(&board, &MoveContext::default()), None);
    }

    #[test]
    fn kind_names_round_trip_and_unknowns_are_rejected() {
        for kind in StrategyKind::iter() {
            assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
        }
        assert!(matches!(
            "alphazero".parse::<StrategyKind>(),
            Err(Error::UnknownStrategy(name)) if name == "alphazero"
        ));
    }

    #[test]
    fn select_move_rejects_a_decided_board() {
        let board = board3([X, X, X, O, O, E, E, E, E]);
        let result = select_move(
            StrategyKind::Greedy,
            &board,
            &MoveContext::default(),
            &StrategyConfig::default(),
        );
        assert_eq!(
            result,
            Err(Error::GameOver {
                winner: Symbol::X
            })
        );
    }

    #[test]
    fn select_move_reports_the_sentinel_on_a_full_board() {
        let board = board3([X, O, X, O, O, X, X, X, O]);
        let result = select_move(
            StrategyKind::Minimax,
            &board,
            &MoveContext::default(),
            &StrategyConfig::default(),
        );
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn every_kind_returns_a_legal_move() {
        let board = board3([X, E, E, E, O, E, E, E, X]);
        for kind in StrategyKind::iter() {
            let chosen = select_move(
                kind,
                &board,
                &MoveContext::default(),
                &StrategyConfig::default(),
            )
            .unwrap()
            .unwrap_or_else(|| panic!("{} returned no move", kind));
            assert!(board.is_free(chosen), "{} picked an occupied cell", kind);
        }
    }

    #[test]
    fn deterministic_kinds_are_idempotent() {
        let board = board3([X, E, O, E, X, E, E, E, O]);
        for kind in [
            StrategyKind::Minimax,
            StrategyKind::Greedy,
            StrategyKind::Heuristic,
        ] {
            let context = MoveContext::with_last_move(Symbol::O, Pos::new(1, 1));
            let config = StrategyConfig::default();
            let first = select_move(kind, &board, &context, &config).unwrap();
            let second = select_move(kind, &board, &context, &config).unwrap();
            assert_eq!(first, second, "{} is not deterministic", kind);
        }
    }

    #[test]
    fn depth_override_reaches_the_search() {
        // X threatens (1, 2); a zero-depth search cannot see it
        let board = board3([O, E, E, X, X, E, E, E, E]);
        let config = StrategyConfig {
            depth: Some(SearchDepth::Limited(0)),
            ..StrategyConfig::default()
        };
        let shallow = select_move(
            StrategyKind::Minimax,
            &board,
            &MoveContext::default(),
            &config,
        )
        .unwrap();
        assert_eq!(shallow, Some(Pos::new(0, 1)));

        let full = select_move(
            StrategyKind::Minimax,
            &board,
            &MoveContext::default(),
            &StrategyConfig::default(),
        )
        .unwrap();
        assert_eq!(full, Some(Pos::new(1, 2)));
    }
}
