use log::trace;

use crate::{
    board::Square,
    error::BoardError,
    game::{AttemptResult, GameState, attempt_move, legal_destinations},
    move_generator::MoveList,
};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClickOutcome {
    /// The click was on a destination of the selected piece and the move was made
    Moved(AttemptResult),
    /// A piece of the side to move was selected. Its destinations are in [`Selection::destinations`].
    Selected(Square),
    /// Clicked on an empty square or an opponent piece with nothing to move there
    Cleared,
    /// The game is over
    Ignored,
}

/// Tracks which square is selected between clicks, the way a board UI does: click a piece, then click
/// one of its highlighted destinations.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    selected: Option<Square>,
    destinations: MoveList,
}

impl Selection {
    pub fn new() -> Selection {
        Selection::default()
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Squares to highlight for the selected piece. Empty when nothing is selected.
    pub fn destinations(&self) -> &[Square] {
        self.destinations.as_slice()
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.destinations.clear();
    }

    pub fn click(&mut self, state: &mut GameState, square: Square) -> Result<ClickOutcome, BoardError> {
        if state.is_concluded() {
            self.clear();
            return Ok(ClickOutcome::Ignored);
        }

        let clicked = state.board.get(square)?;

        if let Some(from) = self.selected {
            if self.destinations.contains(&square) {
                self.clear();
                let result = attempt_move(state, from, square)?;
                return Ok(ClickOutcome::Moved(result));
            }
        }

        match clicked {
            Some(piece) if piece.side == state.side_to_move => {
                self.selected = Some(square);
                self.destinations = legal_destinations(state, square)?;
                trace!("Selected {:?}, destinations {:?}", square, self.destinations);
                Ok(ClickOutcome::Selected(square))
            }
            _ => {
                self.clear();
                Ok(ClickOutcome::Cleared)
            }
        }
    }
}

#[cfg(test)]
mod selection_tests {
    use crate::board::Side;

    use super::*;

    #[test]
    pub fn select_then_move() {
        let mut state = GameState::new();
        let mut selection = Selection::new();

        assert_eq!(
            ClickOutcome::Selected(Square::new(6, 4)),
            selection.click(&mut state, Square::new(6, 4)).unwrap()
        );
        assert_eq!(Some(Square::new(6, 4)), selection.selected());
        assert_eq!(2, selection.destinations().len());

        let outcome = selection.click(&mut state, Square::new(4, 4)).unwrap();

        assert_eq!(
            ClickOutcome::Moved(AttemptResult {
                moved: true,
                game_over: None
            }),
            outcome
        );
        assert_eq!(None, selection.selected());
        assert!(selection.destinations().is_empty());
        assert_eq!(Side::Black, state.side_to_move);
    }

    #[test]
    pub fn clicking_empty_square_deselects() {
        let mut state = GameState::new();
        let mut selection = Selection::new();

        selection.click(&mut state, Square::new(7, 1)).unwrap();
        let outcome = selection.click(&mut state, Square::new(3, 3)).unwrap();

        assert_eq!(ClickOutcome::Cleared, outcome);
        assert_eq!(None, selection.selected());
        assert_eq!(GameState::new(), state);
    }

    #[test]
    pub fn clicking_opponent_piece_selects_nothing() {
        let mut state = GameState::new();
        let mut selection = Selection::new();

        assert_eq!(ClickOutcome::Cleared, selection.click(&mut state, Square::new(1, 1)).unwrap());
        assert_eq!(None, selection.selected());
    }

    #[test]
    pub fn clicking_another_own_piece_switches_selection() {
        let mut state = GameState::new();
        let mut selection = Selection::new();

        selection.click(&mut state, Square::new(6, 0)).unwrap();
        let outcome = selection.click(&mut state, Square::new(7, 6)).unwrap();

        assert_eq!(ClickOutcome::Selected(Square::new(7, 6)), outcome);
        assert!(selection.destinations().contains(&Square::new(5, 5)));
        assert!(selection.destinations().contains(&Square::new(5, 7)));
    }

    #[test]
    pub fn capture_through_clicks() {
        let mut state = GameState::from_position("4k3/8/8/3p4/4P3/8/8/4K3 w").unwrap();
        let mut selection = Selection::new();

        selection.click(&mut state, Square::new(4, 4)).unwrap();
        let outcome = selection.click(&mut state, Square::new(3, 3)).unwrap();

        assert!(matches!(outcome, ClickOutcome::Moved(AttemptResult { moved: true, .. })));
        assert_eq!(3, state.board.occupied().count());
    }

    #[test]
    pub fn clicks_ignored_after_king_capture() {
        let mut state = GameState::from_position("4k3/8/8/8/8/8/8/4R2K w").unwrap();
        let mut selection = Selection::new();

        selection.click(&mut state, Square::new(7, 4)).unwrap();
        let outcome = selection.click(&mut state, Square::new(0, 4)).unwrap();
        assert_eq!(
            ClickOutcome::Moved(AttemptResult {
                moved: true,
                game_over: Some(Side::White)
            }),
            outcome
        );

        let after = state.clone();
        assert_eq!(ClickOutcome::Ignored, selection.click(&mut state, Square::new(0, 4)).unwrap());
        assert_eq!(ClickOutcome::Ignored, selection.click(&mut state, Square::new(7, 7)).unwrap());
        assert_eq!(None, selection.selected());
        assert_eq!(after, state);
    }

    #[test]
    pub fn out_of_bounds_click_fails() {
        let mut state = GameState::new();
        let mut selection = Selection::new();

        assert_eq!(
            Err(BoardError::OutOfBounds(Square::new(0, 8))),
            selection.click(&mut state, Square::new(0, 8))
        );
    }
}
