//! Rules engine for a chess variant where capturing the king wins and pawns always promote to a queen.
//! There is no check, checkmate, castling or en passant.

pub mod board;
pub mod error;
pub mod game;
pub mod move_generator;
pub mod moves;
pub mod perft;
pub mod selection;

pub use crate::{
    board::{Board, Piece, PieceKind, STARTING_PLACEMENT, Side, Square},
    error::{BoardError, ParseError},
    game::{AttemptResult, GameState, GameStatus, attempt_move, legal_destinations, new_game},
    move_generator::{MoveList, legal_moves},
    moves::MoveOutcome,
    perft::PerftStats,
    selection::{ClickOutcome, Selection},
};
