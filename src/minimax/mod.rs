pub mod cache;
pub mod stats;

use itertools::Itertools;
use log::debug;

use crate::board::{Board, Outcome, Pos, Symbol};
use crate::strategy::{MoveContext, Strategy};

use self::cache::{Bound, Cache, TableCache, Transposition};
use self::stats::{SearchCounters, SearchStats};

/// Recursion budget for the game-tree search. A node reached at the limit
/// without a terminal outcome scores 0, a deliberate neutral cutoff.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SearchDepth {
    Exhaustive,
    Limited(u8),
}

impl SearchDepth {
    /// Per-size defaults: 3x3 is searched to the end, the larger canonical
    /// boards get the depth their branching factor can afford.
    pub fn for_size(size: usize) -> SearchDepth {
        match size {
            3 => SearchDepth::Exhaustive,
            6 => SearchDepth::Limited(3),
            9 => SearchDepth::Limited(2),
            _ => SearchDepth::Limited(4),
        }
    }

    fn levels(self) -> u8 {
        match self {
            SearchDepth::Exhaustive => u8::MAX,
            SearchDepth::Limited(levels) => levels,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct ScoredMove {
    pub score: i32,
    pub pos: Pos,
}

impl ScoredMove {
    pub fn new(score: i32, pos: Pos) -> ScoredMove {
        ScoredMove { score, pos }
    }
}

/// Exhaustive search strategy, optionally depth-limited.
#[derive(Debug, Copy, Clone)]
pub struct Minimax {
    depth: SearchDepth,
}

impl Minimax {
    pub fn new(depth: SearchDepth) -> Minimax {
        Minimax { depth }
    }

    pub fn with_default_depth(size: usize) -> Minimax {
        Minimax::new(SearchDepth::for_size(size))
    }
}

impl Strategy for Minimax {
    fn choose(&mut self, board: &Board, ctx: &MoveContext) -> Option<Pos> {
        // table and counters live for exactly one call, nothing carries over
        let mut cache = TableCache::default();
        let mut counters = SearchCounters::default();
        let scored = score_moves(board, ctx, self.depth, &mut cache, &mut counters);
        debug!(
            "minimax scored {} root moves: {} leaves, {} cache hits, {} misses, {} prunes, {} cached positions",
            scored.len(),
            counters.leaves,
            counters.cache_hits,
            counters.cache_misses,
            counters.prunes,
            cache.len()
        );
        best_of(&scored)
    }
}

/// Scores every legal move from the AI's viewpoint: +1 forced win, -1
/// forced loss, 0 draw or cutoff. Each root candidate gets a full search
/// window, so the values match plain minimax and pruning never changes
/// which move wins a tie.
pub fn score_moves<C, S>(
    board: &Board,
    ctx: &MoveContext,
    depth: SearchDepth,
    cache: &mut C,
    stats: &mut S,
) -> Vec<ScoredMove>
where
    C: Cache<Board>,
    S: SearchStats,
{
    let candidates = ordered_candidates(board, ctx);
    let mut scratch = board.clone();
    candidates
        .into_iter()
        .map(|pos| {
            scratch.put(pos, ctx.ai);
            let score = -evaluate(
                &mut scratch,
                !ctx.ai,
                depth.levels(),
                -i32::MAX,
                i32::MAX,
                cache,
                stats,
            );
            scratch.clear(pos);
            ScoredMove::new(score, pos)
        })
        .collect()
}

/// Candidates in row-major order; past 3x3, when the opponent's last move
/// is known, they are stably sorted nearest-first. Purely a search-order
/// heuristic, but it decides which of several equally scored moves comes
/// out of the tie-break.
fn ordered_candidates(board: &Board, ctx: &MoveContext) -> Vec<Pos> {
    match ctx.last_opponent_move {
        Some(reference) if board.size() > 3 => board
            .legal_moves()
            .sorted_by_key(|pos| pos.manhattan(reference))
            .collect(),
        _ => board.legal_moves().collect(),
    }
}

/// First candidate strictly better than everything before it wins.
fn best_of(scored: &[ScoredMove]) -> Option<Pos> {
    let mut best: Option<ScoredMove> = None;
    for &candidate in scored {
        match best {
            Some(current) if candidate.score <= current.score => {}
            _ => best = Some(candidate),
        }
    }
    best.map(|scored_move| scored_move.pos)
}

fn evaluate<C, S>(
    board: &mut Board,
    to_move: Symbol,
    remaining: u8,
    mut alpha: i32,
    mut beta: i32,
    cache: &mut C,
    stats: &mut S,
) -> i32
where
    C: Cache<Board>,
    S: SearchStats,
{
    let outcome = board.outcome();
    if outcome != Outcome::InProgress || remaining == 0 {
        stats.on_leaf();
        return outcome_score(outcome, to_move);
    }

    let alpha_original = alpha;
    match cache.probe(board) {
        Some(entry) if entry.levels >= remaining => {
            stats.on_cache_hit();
            match entry.bound {
                Bound::Exact => return entry.value,
                Bound::Lower => alpha = alpha.max(entry.value),
                Bound::Upper => beta = beta.min(entry.value),
            }
            if alpha >= beta {
                return entry.value;
            }
        }
        _ => stats.on_cache_miss(),
    }

    let moves: Vec<Pos> = board.legal_moves().collect();
    let mut max_score = -i32::MAX;
    for pos in moves {
        board.put(pos, to_move);
        let score = -evaluate(board, !to_move, remaining - 1, -beta, -alpha, cache, stats);
        board.clear(pos);
        max_score = max_score.max(score);
        alpha = alpha.max(max_score);
        if alpha >= beta {
            stats.on_prune();
            break;
        }
    }

    let bound = if max_score <= alpha_original {
        Bound::Upper
    } else if max_score >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };
    cache.store(
        board,
        Transposition {
            value: max_score,
            levels: remaining,
            bound,
        },
    );
    max_score
}

fn outcome_score(outcome: Outcome, viewpoint: Symbol) -> i32 {
    match outcome {
        Outcome::Win(winner) if winner == viewpoint => 1,
        Outcome::Win(_) => -1,
        Outcome::Draw | Outcome::InProgress => 0,
    }
}
