//! Speculative move application with guaranteed rollback.
//!
//! Deciding whether a pseudo-legal move is actually legal requires applying
//! it to the shared board and asking whether the mover's king ends up
//! threatened. [`Speculation`] owns that mutate-then-restore cycle: it
//! snapshots exactly the state a move can touch and undoes all of it on
//! scope exit, so the board is observably unchanged however the safety test
//! concludes.

use crate::board::Board;
use crate::movement::{pseudo_move, MoveEffect};
use crate::piece::PieceId;
use chess_core::Square;

/// A pseudo-legal move applied to the board, pending rollback.
///
/// Created by [`Speculation::begin`], which fails without mutating anything
/// when the move is not pseudo-legal. While the guard lives, the board shows
/// the position after the move; dropping the guard restores the mover's
/// square and `moved` flag, the en passant slot, and any captured piece
/// (reinserted at its original roster index, so the board compares equal to
/// its prior value).
pub struct Speculation<'a> {
    board: &'a mut Board,
    id: PieceId,
    from: Square,
    was_moved: bool,
    prior_en_passant: Option<PieceId>,
    captured: Option<(PieceId, usize)>,
}

impl<'a> Speculation<'a> {
    /// Attempts the move and applies it speculatively.
    ///
    /// Returns `None`, with the board untouched, when the move is not
    /// pseudo-legal for the piece.
    pub fn begin(board: &'a mut Board, id: PieceId, to: Square) -> Option<Self> {
        let from = board.piece(id).square;
        let was_moved = board.piece(id).moved;
        let prior_en_passant = board.en_passant();

        let effect = pseudo_move(board, id, to)?;

        let captured = match effect {
            MoveEffect::Capture(victim) | MoveEffect::EnPassant(victim) => {
                let square = board.piece(victim).square;
                let roster_index = board.roster_remove(victim);
                board.clear(square);
                Some((victim, roster_index))
            }
            MoveEffect::Quiet | MoveEffect::DoubleStep => None,
        };
        board.clear(from);
        board.place(id, to);

        Some(Speculation {
            board,
            id,
            from,
            was_moved,
            prior_en_passant,
            captured,
        })
    }

    /// The board in its speculated state.
    pub fn board(&self) -> &Board {
        self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        let to = self.board.piece(self.id).square;
        self.board.clear(to);
        self.board.place(self.id, self.from);
        let piece = self.board.piece_mut(self.id);
        piece.square = self.from;
        piece.moved = self.was_moved;

        if let Some((victim, roster_index)) = self.captured {
            let square = self.board.piece(victim).square;
            self.board.roster_insert(victim, roster_index);
            self.board.place(victim, square);
        }
        self.board.set_en_passant(self.prior_en_passant);
    }
}

/// True iff the move is pseudo-legal and does not leave the mover's own king
/// in check afterward.
///
/// Kings take the same path as every other piece: the king is speculatively
/// moved and the threat test runs on the resulting position, which correctly
/// accounts for attack lines opened by the king vacating its square.
pub fn is_legal(board: &mut Board, id: PieceId, to: Square) -> bool {
    let mover = board.piece(id).color;
    match Speculation::begin(board, id, to) {
        Some(speculation) => !speculation.board().is_in_check(mover),
        None => false,
    }
}
