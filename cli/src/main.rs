//! Interactive Squava driver.
//!
//! Alternates human stdin moves with engine moves through the shared agent
//! contract, prints the board between plies, and announces the verdict. The
//! computer plays X (the first color); `-C` hands it the opening move.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use squava_core::{Agent, Side, CELL_COUNT};
use squava_mcts::{MctsPlayer, SearchConfig};

mod config;

use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_tracing(&config.log_level)?;

    let search_config = SearchConfig::default().with_iterations(config.iterations);
    let mut computer: Box<dyn Agent> = match config.seed {
        Some(seed) => Box::new(MctsPlayer::with_seed(Side::First, search_config, seed)),
        None => Box::new(MctsPlayer::new(Side::First, search_config)),
    };
    info!(iterations = config.iterations, "engine ready");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut computers_turn = config.computer_first;
    let mut move_counter = 0;
    let mut winner = None;

    while move_counter < CELL_COUNT {
        if computers_turn {
            let before = Instant::now();
            let chosen = computer
                .choose_move()
                .context("engine failed to choose a move")?;
            let elapsed = before.elapsed();
            println!(
                "X ({}) <{},{}> ({}) [{}] {:?}",
                computer.name(),
                chosen.row,
                chosen.col,
                chosen.scaled_score,
                chosen.iterations,
                elapsed
            );
        } else {
            read_human_move(&mut lines, computer.as_mut())?;
        }
        computers_turn = !computers_turn;
        move_counter += 1;

        winner = computer.find_winner();
        if winner.is_some() || move_counter >= CELL_COUNT {
            break;
        }

        println!("{}", computer.render());
    }

    match winner {
        Some(Side::First) => println!("player 1 X ({}) wins", computer.name()),
        Some(Side::Second) => println!("player 2 O (human) wins"),
        None => println!("cat game, nobody wins"),
    }
    println!("{}", computer.render());

    Ok(())
}

/// Prompt until the human enters a legal `row col` pair, then record it on
/// the computer's board as the second color.
fn read_human_move(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    computer: &mut dyn Agent,
) -> Result<()> {
    loop {
        print!("Your move: ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line.context("failed to read move")?,
            // EOF: the human walked away.
            None => std::process::exit(0),
        };

        let mut fields = line.split_whitespace();
        let (Some(row), Some(col)) = (fields.next(), fields.next()) else {
            println!("Enter a move as two numbers, `row col`, both 0-4");
            continue;
        };
        let (Ok(row), Ok(col)) = (row.parse::<usize>(), col.parse::<usize>()) else {
            println!("Enter a move as two numbers, `row col`, both 0-4");
            continue;
        };

        match computer.apply_opponent_move(row, col, Side::Second) {
            Ok(()) => return Ok(()),
            Err(err) => println!("{}, try again", err),
        }
    }
}
