//! Marble Solitaire
//!
//! Interactive terminal game: jump marbles over their neighbours until one
//! remains. `hint` asks the solver for the next winning move, `undo` takes
//! the last move back.

use std::io::{self, BufRead, Write};

use solitaire_core::Direction;
use solitaire_solver::game::Game;

fn main() {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    clear_screen();
    println!(
        "Hello and welcome to Marble Solitaire!\n\n\
         The goal of this game is to leave only one marble on the board! \
         You can move marbles by jumping over another marble to an empty \
         spot! You may jump left, right, up, or down, but not diagonally.\n\n\
         Please enter your moves like this: \"row col direction\" where row \
         and col are a digit 0 through 6 that corresponds to a marble on \
         the board, and a direction is either \"left\", \"right\", \"up\", \
         or \"down\". The destination must not contain a marble. Good luck!\n\n"
    );

    let mut game = Game::new();

    prompt("enter the coordinates of the marble you'd like to remove: ");
    loop {
        match next_line(&mut lines) {
            Some(line) => {
                if let Some((r, c)) = parse_coords(&line) {
                    game.set_custom_start(r, c);
                    break;
                }
                prompt("enter the coordinates of the marble you'd like to remove: ");
            }
            None => return,
        }
    }

    show_board(&game);
    while game.has_moves() {
        let Some(line) = next_line(&mut lines) else {
            break;
        };
        let input = line.trim();

        if let Some((r, c, dir)) = parse_move(input) {
            if !game.make_move(r, c, dir) {
                prompt("Invalid move. Please enter again: ");
                continue;
            }
        } else if input == "hint" {
            let best = game.best_move();
            if best.is_empty() {
                println!("No solution for this board. Try undoing!");
            } else {
                println!("\nBest move: {}", best);
            }
        } else if input == "undo" {
            if !game.undo_move() {
                println!("No moves to undo!");
            }
        } else if input == "brendan is the coolest" {
            println!(
                "You're right! Clearly you're so intelligent you already \
                 know this is the solution:"
            );
            println!("{}", game.solution());
        } else {
            prompt("Invalid move. Please enter again: ");
            continue;
        }

        show_board(&game);
    }

    if game.has_won() {
        println!("Woohoo! You win!");
    } else {
        println!("Oh no! You have lost!");
    }
    print!("\n\nThanks for playing!\n");
}

/// ANSI clear-and-home; harmless noise on terminals that ignore it.
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
    let _ = io::stdout().flush();
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = io::stdout().flush();
}

fn show_board(game: &Game) {
    println!();
    let _ = game.board().print(&mut io::stdout());
    println!(
        "\nPlease enter your move: \t\tMove {}, Marbles Left: {}\n",
        game.moves_made() + 1,
        game.marbles_left()
    );
}

fn next_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    lines.next()?.ok()
}

/// Two whitespace-separated integers: `"row col"`.
fn parse_coords(input: &str) -> Option<(usize, usize)> {
    let mut parts = input.split_whitespace();
    let r = parts.next()?.parse().ok()?;
    let c = parts.next()?.parse().ok()?;
    match parts.next() {
        None => Some((r, c)),
        Some(_) => None,
    }
}

/// `"row col direction"`.
fn parse_move(input: &str) -> Option<(usize, usize, Direction)> {
    let mut parts = input.split_whitespace();
    let r = parts.next()?.parse().ok()?;
    let c = parts.next()?.parse().ok()?;
    let dir = parts.next()?.parse().ok()?;
    match parts.next() {
        None => Some((r, c, dir)),
        Some(_) => None,
    }
}
