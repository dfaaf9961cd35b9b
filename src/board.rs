use std::fmt::{Debug, Display};

use array_macro::array;

use crate::error::{BoardError, ParseError};

pub const BOARD_SIZE: i8 = 8;

pub static STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Row 0 is the top of the board where black starts, row 7 is white's back rank. Coordinates are
/// signed so that stepping off the board produces a square that can be rejected by [`Square::in_bounds`].
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Square {
        Square { row, col }
    }

    pub const fn in_bounds(&self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    pub const fn offset(&self, row_delta: i8, col_delta: i8) -> Square {
        Square {
            row: self.row.saturating_add(row_delta),
            col: self.col.saturating_add(col_delta),
        }
    }
}

impl From<(i8, i8)> for Square {
    fn from(value: (i8, i8)) -> Self {
        Square::new(value.0, value.1)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const fn opposite(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Piece {
        Piece { kind, side }
    }
}

pub fn piece_to_name(piece: Piece) -> char {
    let name = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match piece.side {
        Side::White => name.to_ascii_uppercase(),
        Side::Black => name,
    }
}

pub fn name_to_piece(name: char) -> Option<Piece> {
    let side = if name.is_ascii_uppercase() { Side::White } else { Side::Black };
    let kind = match name.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(kind, side))
}

/// The 8x8 grid. Writing a square replaces its occupant so there is never more than one piece on a
/// square, but nothing checks piece counts or that both kings are present.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Board {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    pub fn initial_layout() -> Board {
        Board {
            squares: array![row => array![col => starting_occupant(row, col); 8]; 8],
        }
    }

    /// Reads the piece placement field of a FEN string. The first rank listed is row 0.
    pub fn from_placement(placement: &str) -> Result<Board, ParseError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != BOARD_SIZE as usize {
            return Err(ParseError::BadRankCount(ranks.len()));
        }

        let mut board = Board::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col: usize = 0;
            for c in rank.chars() {
                match c {
                    '1'..='8' => {
                        col += c as usize - '0' as usize;
                    }
                    _ => {
                        let piece = name_to_piece(c).ok_or(ParseError::BadChar(c))?;
                        if col < BOARD_SIZE as usize {
                            board.squares[row][col] = Some(piece);
                        }
                        col += 1;
                    }
                }
            }

            if col != BOARD_SIZE as usize {
                return Err(ParseError::BadRankLen(row, col));
            }
        }

        Ok(board)
    }

    pub fn get(&self, square: Square) -> Result<Option<Piece>, BoardError> {
        if !square.in_bounds() {
            return Err(BoardError::OutOfBounds(square));
        }

        Ok(self.at(square))
    }

    pub fn get_mut(&mut self, square: Square) -> Result<Option<&mut Piece>, BoardError> {
        if !square.in_bounds() {
            return Err(BoardError::OutOfBounds(square));
        }

        Ok(self.squares[square.row as usize][square.col as usize].as_mut())
    }

    pub fn set(&mut self, square: Square, occupant: Option<Piece>) -> Result<(), BoardError> {
        if !square.in_bounds() {
            return Err(BoardError::OutOfBounds(square));
        }

        self.squares[square.row as usize][square.col as usize] = occupant;
        Ok(())
    }

    /// Empties the square and hands back whatever was on it.
    pub fn take(&mut self, square: Square) -> Result<Option<Piece>, BoardError> {
        if !square.in_bounds() {
            return Err(BoardError::OutOfBounds(square));
        }

        Ok(self.squares[square.row as usize][square.col as usize].take())
    }

    /// Callers must have checked [`Square::in_bounds`] first.
    #[inline]
    pub(crate) fn at(&self, square: Square) -> Option<Piece> {
        debug_assert!(square.in_bounds());
        self.squares[square.row as usize][square.col as usize]
    }

    /// Every occupied square in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, rank)| {
            rank.iter().enumerate().filter_map(move |(col, occupant)| {
                occupant.map(|piece| (Square::new(row as i8, col as i8), piece))
            })
        })
    }

    pub fn to_placement(&self) -> String {
        let mut result = String::new();
        for (row, rank) in self.squares.iter().enumerate() {
            if row > 0 {
                result.push('/');
            }

            let mut empty_run = 0;
            for occupant in rank {
                match occupant {
                    Some(piece) => {
                        if empty_run > 0 {
                            result.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        result.push(piece_to_name(*piece));
                    }
                    None => empty_run += 1,
                }
            }

            if empty_run > 0 {
                result.push_str(&empty_run.to_string());
            }
        }

        result
    }
}

fn starting_occupant(row: usize, col: usize) -> Option<Piece> {
    match row {
        0 => Some(Piece::new(BACK_RANK[col], Side::Black)),
        1 => Some(Piece::new(PieceKind::Pawn, Side::Black)),
        6 => Some(Piece::new(PieceKind::Pawn, Side::White)),
        7 => Some(Piece::new(BACK_RANK[col], Side::White)),
        _ => None,
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::initial_layout()
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("placement", &self.to_placement())
            .finish()
    }
}

/// Prints the grid with row and column indices so squares can be picked by coordinate.
impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for (row, rank) in self.squares.iter().enumerate() {
            write!(f, "{row}")?;
            for occupant in rank {
                let name = occupant.map_or('.', piece_to_name);
                write!(f, " {name}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
