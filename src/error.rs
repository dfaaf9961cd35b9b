use std::fmt::{Display, Formatter};

use crate::board::Square;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BoardError {
    /// A square was read or written whose row or column lies outside `0..8`. The given [`Square`]
    /// is the offending coordinate pair, unclamped.
    OutOfBounds(Square),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::OutOfBounds(square) => {
                write!(f, "square ({}, {}) is outside the 8x8 board", square.row, square.col)
            }
        }
    }
}

impl std::error::Error for BoardError {}

#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Piece placement did not have 8 `/`-separated ranks. The given `usize` is the actual count.
    BadRankCount(usize),
    /// A rank described more or fewer than 8 squares. Holds the row index and the number of squares
    /// it described.
    BadRankLen(usize, usize),
    /// Encountered a character that is neither a piece letter nor a digit `1`-`8`.
    BadChar(char),
    /// The side to move was something other than `w` or `b`.
    BadSide(String),
    /// Tried to parse a position with the wrong number of space-delimited fields.
    BadFieldCount(usize),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::BadRankCount(count) => write!(f, "expected 8 ranks in piece placement but found {count}"),
            ParseError::BadRankLen(row, len) => write!(f, "rank for row {row} describes {len} squares, expected 8"),
            ParseError::BadChar(c) => write!(f, "unexpected character '{c}' in piece placement"),
            ParseError::BadSide(side) => write!(f, "unexpected side to move value '{side}'"),
            ParseError::BadFieldCount(count) => {
                write!(f, "expected placement and side to move separated by a space but found {count} fields")
            }
        }
    }
}

impl std::error::Error for ParseError {}
