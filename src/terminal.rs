use std::io::BufRead;

use anyhow::Result;
use king_capture_chess::{ClickOutcome, GameState, Selection, Square};
use log::{debug, error, info};
use regex::Regex;

/// Drives a game from text input. Each line is a click on a square written as `row,col`, so a move
/// takes two lines: the piece, then its destination.
pub struct TerminalInterface {
    state: GameState,
    selection: Selection,
    square_pattern: Regex,
}

impl TerminalInterface {
    pub fn new(state: GameState) -> Result<TerminalInterface> {
        Ok(TerminalInterface {
            state,
            selection: Selection::new(),
            square_pattern: Regex::new(r"^(-?\d+)\s*[, ]\s*(-?\d+)$")?,
        })
    }

    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        self.print_board();
        for line in input.lines() {
            if !self.process_command(&line?) {
                break;
            }
        }

        Ok(())
    }

    /// Returns false once no further input should be read
    pub fn process_command(&mut self, cmd: &str) -> bool {
        debug!("Received cmd string '{cmd}'");
        let cmd = cmd.trim();

        match cmd {
            "quit" | "exit" => return false,
            "board" => {
                self.print_board();
                return true;
            }
            _ => {}
        }

        let Some(captures) = self.square_pattern.captures(cmd) else {
            println!("Enter a square as 'row,col', 'board' or 'quit'");
            return true;
        };

        let (Ok(row), Ok(col)) = (captures[1].parse::<i8>(), captures[2].parse::<i8>()) else {
            println!("Row and column must be between 0 and 7");
            return true;
        };

        match self.selection.click(&mut self.state, Square::new(row, col)) {
            Ok(ClickOutcome::Selected(square)) => {
                let destinations: Vec<String> = self
                    .selection
                    .destinations()
                    .iter()
                    .map(|s| format!("{},{}", s.row, s.col))
                    .collect();
                println!("Selected {},{}. Moves: {}", square.row, square.col, destinations.join(" "));
            }
            Ok(ClickOutcome::Moved(result)) => {
                self.print_board();
                if let Some(winner) = result.game_over {
                    info!("Game over, {winner} won. Final position {}", self.state.to_position());
                    println!("Game over. {winner} wins by capturing the king!");
                    return false;
                }
            }
            Ok(ClickOutcome::Cleared) => println!("Nothing selected"),
            Ok(ClickOutcome::Ignored) => {
                println!("The game is over");
                return false;
            }
            Err(e) => {
                error!("Rejected click on ({row}, {col}): {e}");
                println!("{e}");
            }
        }

        true
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn print_board(&self) {
        print!("{}", self.state.board);
        println!("{} to move", self.state.side_to_move);
    }
}
