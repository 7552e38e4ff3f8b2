mod board;
mod error;
mod greedy;
mod heuristic;
mod lines;
mod minimax;
mod strategy;

use std::env;
use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::board::{Board, BoardSpec, Outcome, Pos, Symbol};
use crate::strategy::{select_move, MoveContext, StrategyConfig, StrategyKind};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let size: usize = match args.first() {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("board size '{}' is not a number", raw))?,
        None => 3,
    };
    let kind: StrategyKind = match args.get(1) {
        Some(raw) => raw.parse()?,
        None => StrategyKind::Minimax,
    };

    let spec = BoardSpec::for_size(size)?;
    println!(
        "{0}x{0} board, {1} in a row wins. You play X, the {2} engine plays O.",
        spec.size(),
        spec.streak(),
        kind
    );
    println!(
        "Moves are 'row col', zero based. Engines: {}.",
        StrategyKind::iter().map(|kind| kind.to_string()).join(", ")
    );

    run_game(spec, kind)
}

fn run_game(spec: BoardSpec, kind: StrategyKind) -> Result<()> {
    let mut board = Board::empty(spec);
    let human = Symbol::X;
    let engine = !human;
    let config = StrategyConfig::default();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print!("{}", board);
        let pos = read_move(&mut input, &board)?;
        board.place(pos, human)?;
        if announce_if_over(&board, human) {
            return Ok(());
        }

        let ctx = MoveContext::with_last_move(engine, pos);
        let started = Instant::now();
        match select_move(kind, &board, &ctx, &config)? {
            Some(reply) => {
                board.place(reply, engine)?;
                println!("O plays {} after {}ms", reply, started.elapsed().as_millis());
            }
            None => {
                println!("no moves left");
                return Ok(());
            }
        }
        if announce_if_over(&board, human) {
            return Ok(());
        }
    }
}

fn announce_if_over(board: &Board, human: Symbol) -> bool {
    match board.outcome() {
        Outcome::InProgress => false,
        Outcome::Draw => {
            print!("{}", board);
            println!("it's a draw");
            true
        }
        Outcome::Win(winner) => {
            print!("{}", board);
            if winner == human {
                println!("you win!");
            } else {
                println!("the engine wins");
            }
            true
        }
    }
}

fn read_move(input: &mut impl BufRead, board: &Board) -> Result<Pos> {
    loop {
        print!("your move (row col): ");
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("stdin closed before the game ended");
        }
        let mut parts = line.split_whitespace();
        let parsed = match (parts.next(), parts.next()) {
            (Some(row), Some(col)) => match (row.parse::<usize>(), col.parse::<usize>()) {
                (Ok(row), Ok(col)) => Some(Pos::new(row, col)),
                _ => None,
            },
            _ => None,
        };
        let pos = match parsed {
            Some(pos) => pos,
            None => {
                eprintln!("expected two numbers, like '1 2'");
                continue;
            }
        };
        if !board.contains(pos) {
            eprintln!("{} is off the board", pos);
            continue;
        }
        if !board.is_free(pos) {
            eprintln!("{} is already taken", pos);
            continue;
        }
        return Ok(pos);
    }
}
