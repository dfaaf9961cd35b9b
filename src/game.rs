use log::{debug, warn};

use crate::{
    board::{Board, Side, Square},
    error::{BoardError, ParseError},
    move_generator::{MoveList, legal_moves},
};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameStatus {
    InProgress,
    Concluded(Side),
}

/// Everything the engine needs to know about a game in progress. The engine keeps nothing between
/// calls, so whoever drives the game owns this and passes it in.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Side,
    /// Set to the winning side the moment a king is captured. No moves should be made after that.
    pub outcome: Option<Side>,
}

/// Result of [`attempt_move`]. `moved` is false when the destination was not legal and the state was left
/// untouched.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct AttemptResult {
    pub moved: bool,
    pub game_over: Option<Side>,
}

impl GameState {
    pub fn new() -> GameState {
        GameState {
            board: Board::initial_layout(),
            side_to_move: Side::White,
            outcome: None,
        }
    }

    /// Parses `"<piece placement> <w|b>"`, e.g. `"4k3/8/8/8/8/8/8/4K3 w"`.
    pub fn from_position(position: &str) -> Result<GameState, ParseError> {
        let parts: Vec<&str> = position.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(ParseError::BadFieldCount(parts.len()));
        }

        let board = Board::from_placement(parts[0])?;
        let side_to_move = match parts[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => return Err(ParseError::BadSide(other.to_string())),
        };

        Ok(GameState {
            board,
            side_to_move,
            outcome: None,
        })
    }

    pub fn to_position(&self) -> String {
        let side = match self.side_to_move {
            Side::White => 'w',
            Side::Black => 'b',
        };

        format!("{} {}", self.board.to_placement(), side)
    }

    pub fn status(&self) -> GameStatus {
        match self.outcome {
            Some(winner) => GameStatus::Concluded(winner),
            None => GameStatus::InProgress,
        }
    }

    pub fn is_concluded(&self) -> bool {
        self.outcome.is_some()
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

pub fn new_game() -> GameState {
    GameState::new()
}

/// Squares the piece on `square` may move to, for highlighting.
pub fn legal_destinations(state: &GameState, square: Square) -> Result<MoveList, BoardError> {
    legal_moves(state, square)
}

/// Checks `to` against the legal destinations of `from` before applying the move. Illegal attempts and
/// attempts after the game has concluded are rejected with `moved: false`, not an error.
pub fn attempt_move(state: &mut GameState, from: Square, to: Square) -> Result<AttemptResult, BoardError> {
    if !to.in_bounds() {
        return Err(BoardError::OutOfBounds(to));
    }

    if let Some(winner) = state.outcome {
        warn!("Move {:?} -> {:?} attempted after {} already won", from, to, winner);
        return Ok(AttemptResult::default());
    }

    let destinations = legal_destinations(state, from)?;
    if !destinations.contains(&to) {
        debug!("Rejected move {:?} -> {:?}, legal destinations are {:?}", from, to, destinations);
        return Ok(AttemptResult::default());
    }

    let outcome = state.apply_move(from, to)?;

    Ok(AttemptResult {
        moved: true,
        game_over: outcome.winner,
    })
}
