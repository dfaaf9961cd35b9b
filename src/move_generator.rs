use log::trace;
use tinyvec::ArrayVec;

use crate::{
    board::{Board, PieceKind, Side, Square},
    error::BoardError,
    game::GameState,
};

/// A queen in the middle of an empty board reaches 27 squares, no piece reaches more
pub const MOVE_ARRAY_SIZE: usize = 32;

pub type MoveList = ArrayVec<[Square; MOVE_ARRAY_SIZE]>;

/// (row, col) steps for each piece's directions
#[rustfmt::skip]
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    ( 1, -2), ( 1, 2), ( 2, -1), ( 2, 1),
];
const BISHOP_OFFSETS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ROOK_OFFSETS: [(i8, i8); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
#[rustfmt::skip]
const ROYAL_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Rows advance towards black's back rank for white and towards white's for black
pub const fn pawn_direction(side: Side) -> i8 {
    match side {
        Side::White => -1,
        Side::Black => 1,
    }
}

pub const fn pawn_start_row(side: Side) -> i8 {
    match side {
        Side::White => 6,
        Side::Black => 1,
    }
}

pub const fn promotion_row(side: Side) -> i8 {
    match side {
        Side::White => 0,
        Side::Black => 7,
    }
}

/// Destinations for the piece on `square`. Empty when the square is empty or holds a piece of the side
/// that is not to move. Leaving the own king attackable is never considered.
pub fn legal_moves(state: &GameState, square: Square) -> Result<MoveList, BoardError> {
    let mut moves = MoveList::new();

    let Some(piece) = state.board.get(square)? else {
        return Ok(moves);
    };

    if piece.side != state.side_to_move {
        return Ok(moves);
    }

    let board = &state.board;
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, square, piece.side, &mut moves),
        PieceKind::Knight => generate_offset_moves(board, square, piece.side, &KNIGHT_OFFSETS, false, &mut moves),
        PieceKind::Bishop => generate_offset_moves(board, square, piece.side, &BISHOP_OFFSETS, true, &mut moves),
        PieceKind::Rook => generate_offset_moves(board, square, piece.side, &ROOK_OFFSETS, true, &mut moves),
        PieceKind::Queen => generate_offset_moves(board, square, piece.side, &ROYAL_OFFSETS, true, &mut moves),
        PieceKind::King => generate_offset_moves(board, square, piece.side, &ROYAL_OFFSETS, false, &mut moves),
    }

    trace!("{:?} on {:?} has {} moves: {:?}", piece, square, moves.len(), moves);

    Ok(moves)
}

fn generate_offset_moves(
    board: &Board,
    from: Square,
    side: Side,
    offsets: &[(i8, i8)],
    slides: bool,
    moves: &mut MoveList,
) {
    for (row_delta, col_delta) in offsets {
        let mut cur_pos = from;
        loop {
            cur_pos = cur_pos.offset(*row_delta, *col_delta);
            if !cur_pos.in_bounds() {
                break;
            }

            match board.at(cur_pos) {
                None => moves.push(cur_pos),
                Some(target_piece) => {
                    if target_piece.side != side {
                        moves.push(cur_pos);
                    }
                    break;
                }
            }

            if !slides {
                break;
            }
        }
    }
}

fn generate_pawn_moves(board: &Board, from: Square, side: Side, moves: &mut MoveList) {
    let direction = pawn_direction(side);

    let one_step = from.offset(direction, 0);
    if one_step.in_bounds() && board.at(one_step).is_none() {
        moves.push(one_step);

        // On starting rank?
        if from.row == pawn_start_row(side) {
            let two_step = one_step.offset(direction, 0);
            if two_step.in_bounds() && board.at(two_step).is_none() {
                moves.push(two_step);
            }
        }
    }

    for col_delta in [-1, 1] {
        let target_pos = from.offset(direction, col_delta);
        if !target_pos.in_bounds() {
            continue;
        }

        if let Some(target_piece) = board.at(target_pos) {
            if target_piece.side != side {
                moves.push(target_pos);
            }
        }
    }
}

#[cfg(test)]
mod move_generator_tests {
    use std::collections::HashSet;

    use super::*;

    fn destinations(position: &str, row: i8, col: i8) -> HashSet<(i8, i8)> {
        let state = GameState::from_position(position).unwrap();
        legal_moves(&state, Square::new(row, col))
            .unwrap()
            .iter()
            .map(|s| (s.row, s.col))
            .collect()
    }

    fn set_of(squares: &[(i8, i8)]) -> HashSet<(i8, i8)> {
        squares.iter().copied().collect()
    }

    #[test]
    pub fn empty_square_and_opponent_piece_have_no_moves() {
        let state = GameState::new();

        assert!(legal_moves(&state, Square::new(4, 4)).unwrap().is_empty());
        assert!(legal_moves(&state, Square::new(1, 4)).unwrap().is_empty());
        assert!(legal_moves(&state, Square::new(0, 1)).unwrap().is_empty());
    }

    #[test]
    pub fn out_of_bounds_origin_fails() {
        let state = GameState::new();

        assert_eq!(
            Err(BoardError::OutOfBounds(Square::new(8, 0))),
            legal_moves(&state, Square::new(8, 0))
        );
    }

    #[test]
    pub fn starting_position_moves() {
        let state = GameState::new();
        let mut total = 0;
        for (square, piece) in state.board.occupied() {
            let moves = legal_moves(&state, square).unwrap();
            if piece.side == Side::Black {
                assert!(moves.is_empty());
            }
            total += moves.len();
        }

        assert_eq!(20, total);
        assert_eq!(set_of(&[(5, 0), (5, 2)]), destinations("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w", 7, 1));
        assert!(destinations("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w", 7, 0).is_empty());
    }

    #[test]
    pub fn knight_in_center_of_empty_board() {
        let moves = destinations("8/8/8/8/4N3/8/8/8 w", 4, 4);

        assert_eq!(
            set_of(&[(2, 3), (2, 5), (3, 2), (3, 6), (5, 2), (5, 6), (6, 3), (6, 5)]),
            moves
        );
    }

    #[test]
    pub fn knight_skips_friendly_and_takes_enemy() {
        let moves = destinations("8/8/3p1P2/8/4N3/8/8/8 w", 4, 4);

        assert_eq!(7, moves.len());
        assert!(moves.contains(&(2, 3)));
        assert!(!moves.contains(&(2, 5)));
    }

    #[test]
    pub fn rook_blocked_by_friendly_piece() {
        let moves = destinations("8/8/8/8/8/8/P7/R7 w", 7, 0);

        assert_eq!(set_of(&[(7, 1), (7, 2), (7, 3), (7, 4), (7, 5), (7, 6), (7, 7)]), moves);
    }

    #[test]
    pub fn rook_captures_enemy_but_stops() {
        let moves = destinations("8/8/8/8/8/8/p7/R7 w", 7, 0);

        assert!(moves.contains(&(6, 0)));
        assert!(moves.iter().all(|(row, col)| *col != 0 || *row == 6));
        assert_eq!(8, moves.len());
    }

    #[test]
    pub fn bishop_slides_diagonally() {
        let moves = destinations("8/8/8/8/3B4/8/8/8 w", 4, 3);

        assert_eq!(13, moves.len());
        assert!(moves.iter().all(|(row, col)| (row - 4).abs() == (col - 3).abs()));
    }

    #[test]
    pub fn queen_in_center_of_empty_board() {
        assert_eq!(27, destinations("8/8/8/3Q4/8/8/8/8 w", 3, 3).len());
    }

    #[test]
    pub fn king_single_steps_into_attacked_squares() {
        let moves = destinations("8/8/8/8/3r4/8/4K3/8 w", 6, 4);

        assert_eq!(8, moves.len());
        // (5,3) and (6,3) are attacked by the rook and are still destinations
        assert!(moves.contains(&(5, 3)));
        assert!(moves.contains(&(6, 3)));
    }

    #[test]
    pub fn king_in_corner() {
        assert_eq!(set_of(&[(0, 1), (1, 0), (1, 1)]), destinations("k7/8/8/8/8/8/8/8 b", 0, 0));
    }

    #[test]
    pub fn white_pawn_double_step_from_start_row() {
        assert_eq!(set_of(&[(5, 3), (4, 3)]), destinations("8/8/8/8/8/8/3P4/8 w", 6, 3));
        assert_eq!(set_of(&[(4, 3)]), destinations("8/8/8/8/8/3P4/8/8 w", 5, 3));
    }

    #[test]
    pub fn black_pawn_moves_down() {
        assert_eq!(set_of(&[(2, 3), (3, 3)]), destinations("8/3p4/8/8/8/8/8/8 b", 1, 3));
        assert_eq!(set_of(&[(5, 6)]), destinations("8/8/8/8/6p1/8/8/8 b", 4, 6));
    }

    #[test]
    pub fn pawn_blocked() {
        assert!(destinations("8/8/8/8/8/3n4/3P4/8 w", 6, 3).is_empty());
        // Second square blocked only removes the double step
        assert_eq!(set_of(&[(5, 3)]), destinations("8/8/8/8/3n4/8/3P4/8 w", 6, 3));
    }

    #[test]
    pub fn pawn_captures_diagonally_only_enemies() {
        let moves = destinations("8/8/8/8/8/2p1N3/3P4/8 w", 6, 3);

        assert_eq!(set_of(&[(5, 3), (4, 3), (5, 2)]), moves);
    }

    #[test]
    pub fn pawn_on_edge_file_captures_one_side() {
        assert_eq!(set_of(&[(3, 0), (3, 1)]), destinations("8/8/8/1p6/P7/8/8/8 w", 4, 0));
    }
}
