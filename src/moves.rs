use log::{debug, error, info};

use crate::{
    board::{Piece, PieceKind, Side, Square},
    error::BoardError,
    game::GameState,
    move_generator::promotion_row,
};

/// What happened when a move was applied. `winner` is only set on the move that captured a king.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct MoveOutcome {
    pub captured: Option<Piece>,
    pub promoted: bool,
    pub winner: Option<Side>,
}

impl GameState {
    /// Moves the piece on `from` to `to`. `to` must come from [`crate::move_generator::legal_moves`] for
    /// `from` on this same state; that is not checked here.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, BoardError> {
        let captured = self.board.get(to)?;
        let Some(mut piece) = self.board.take(from)? else {
            error!("apply_move called for empty square {:?} -> {:?}. {:#?}", from, to, self);
            return Ok(MoveOutcome::default());
        };

        let mut outcome = MoveOutcome {
            captured,
            ..Default::default()
        };

        if let Some(target_piece) = captured {
            if target_piece.kind == PieceKind::King {
                outcome.winner = Some(self.side_to_move);
                self.outcome = Some(self.side_to_move);
            }
        }

        if piece.kind == PieceKind::Pawn && to.row == promotion_row(piece.side) {
            piece.kind = PieceKind::Queen;
            outcome.promoted = true;
        }

        self.board.set(to, Some(piece))?;

        if self.outcome.is_none() {
            self.side_to_move = self.side_to_move.opposite();
        } else {
            info!("{} wins by capturing the king on {:?}", piece.side, to);
        }

        debug!("applied {:?} -> {:?}: {:?}", from, to, outcome);

        Ok(outcome)
    }
}
