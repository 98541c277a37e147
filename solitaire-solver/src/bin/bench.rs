//! Timed solve with search statistics.
//!
//! Usage: `solitaire-bench [row col]`. Solves the full board with the
//! given cell empty (default: the conventional (2,3) start) and prints the
//! solution, elapsed time, and search counters.

use std::env;
use std::io;
use std::time::Instant;

use solitaire_core::Board;
use solitaire_solver::solver;
use solitaire_solver::stats::SolverStats;

fn main() {
    let args: Vec<String> = env::args().collect();
    let board = match (args.get(1), args.get(2)) {
        (Some(r), Some(c)) => match (r.parse(), c.parse()) {
            (Ok(r), Ok(c)) => Board::new_with_empty(r, c),
            _ => {
                eprintln!("usage: solitaire-bench [row col]");
                std::process::exit(2);
            }
        },
        _ => Board::new_default(),
    };

    println!("Marble Solitaire Solver");
    println!("=======================");
    let _ = board.print(&mut io::stdout());
    println!();

    let mut stats = SolverStats::new();
    let start = Instant::now();
    let solution = solver::solve_with_stats(board, &mut stats);
    let elapsed = start.elapsed();

    match &solution {
        Some(moves) => {
            println!("Solved in {} moves:", moves.len());
            for m in moves {
                println!("  {}", m);
            }
        }
        None => println!("No solution exists."),
    }

    println!("\nTime: {:.2}s", elapsed.as_secs_f64());
    stats.print_summary();
}
