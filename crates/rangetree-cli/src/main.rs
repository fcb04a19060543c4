//! Interactive driver for a min/max range tree.
//!
//! Reads `<code> <start> <end> <arg>` lines from stdin:
//! `s` assigns `arg` across the range, `a` adds `arg` across the range,
//! `m` prints the range minimum, `M` prints the range maximum. Anything
//! else prints an invalid-command message. Ranges are inclusive.

use std::io::{self, BufRead, Write};

use clap::Parser;
use rangetree::{RangeTree, WriteOp, aggregate::min_max::I64MinMaxAggregate};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Number of indexed slots, zero-seeded unless --init is given
    #[arg(short = 'n', long, default_value_t = 100)]
    slots: usize,

    /// Comma-separated initial slot values, overriding --slots
    #[arg(long, value_delimiter = ',')]
    init: Vec<i64>,
}

enum Command {
    Assign(usize, usize, i64),
    Add(usize, usize, i64),
    Min(usize, usize),
    Max(usize, usize),
}

/// Parses one protocol line. Reads still carry the (ignored) fourth token.
fn parse(line: &str) -> Option<Command> {
    let mut tokens = line.split_whitespace();
    let code = tokens.next()?;
    let start: usize = tokens.next()?.parse().ok()?;
    let end: usize = tokens.next()?.parse().ok()?;
    let arg: i64 = tokens.next()?.parse().ok()?;
    match code {
        "s" => Some(Command::Assign(start, end, arg)),
        "a" => Some(Command::Add(start, end, arg)),
        "m" => Some(Command::Min(start, end)),
        "M" => Some(Command::Max(start, end)),
        _ => None,
    }
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let values = if args.init.is_empty() {
        vec![0; args.slots]
    } else {
        args.init
    };
    if values.is_empty() {
        eprintln!("need at least one slot");
        std::process::exit(2);
    }
    log::info!("indexing {} slots", values.len());

    let mut tree: RangeTree<I64MinMaxAggregate, WriteOp<i64>> =
        RangeTree::from_slice(&values);

    let stdin = io::stdin();
    prompt();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        match parse(&line) {
            Some(Command::Assign(start, end, value)) => {
                log::debug!("assign {value} across [{start}, {end}]");
                tree.update(start..=end, WriteOp::Assign(value));
            }
            Some(Command::Add(start, end, amount)) => {
                log::debug!("add {amount} across [{start}, {end}]");
                tree.update(start..=end, WriteOp::Add(amount));
            }
            Some(Command::Min(start, end)) => {
                println!("{}", tree.query(start..=end).min_value());
            }
            Some(Command::Max(start, end)) => {
                println!("{}", tree.query(start..=end).max_value());
            }
            None => println!("Invalid command."),
        }
        prompt();
    }
}
