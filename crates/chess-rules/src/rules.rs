//! Check detection and checkmate/stalemate resolution.

use crate::board::Board;
use crate::movement::{can_block, moves, threatens};
use crate::piece::PieceId;
use crate::transient::is_legal;
use chess_core::Color;
use chess_core::Square;

impl Board {
    /// True iff any piece of the color opposing `defender` threatens `target`.
    pub fn square_threatened(&self, target: Square, defender: Color) -> bool {
        self.roster(defender.opposite())
            .iter()
            .any(|&id| threatens(self, id, target))
    }

    /// True iff that color's king is currently threatened.
    ///
    /// A board without a king of that color (possible mid-setup) is not in
    /// check.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king(color) {
            Some(king) => self.square_threatened(self.piece(king).square, color),
            None => false,
        }
    }

    /// The enemy pieces currently giving check to `color`'s king.
    pub fn checkers(&self, color: Color) -> Vec<PieceId> {
        let Some(king) = self.king(color) else {
            return Vec::new();
        };
        let target = self.piece(king).square;
        self.roster(color.opposite())
            .iter()
            .copied()
            .filter(|&id| threatens(self, id, target))
            .collect()
    }

    /// True iff at least one piece of that color has at least one legal move.
    ///
    /// Distinguishes checkmate and stalemate from ongoing play: no moves
    /// while in check is checkmate, no moves while not in check is stalemate.
    pub fn can_any_piece_move(&mut self, color: Color) -> bool {
        let roster: Vec<PieceId> = self.roster(color).to_vec();
        for id in roster {
            for destination in moves(self, id) {
                if is_legal(self, id, destination) {
                    return true;
                }
            }
        }
        false
    }

    /// Given that `color`'s king is in check by `checkers`, decides whether
    /// this is checkmate (`true`) or whether some escape exists (`false`).
    ///
    /// A legal king move always escapes. Under double check nothing else
    /// can: no single move blocks or captures away two threats at once.
    /// Under single check an ally may legally capture the checking piece or
    /// interpose on its line of attack.
    pub fn resolve_check(&mut self, checkers: &[PieceId], color: Color) -> bool {
        let Some(king) = self.king(color) else {
            return false;
        };
        for destination in moves(self, king) {
            if is_legal(self, king, destination) {
                return false;
            }
        }
        if checkers.len() >= 2 {
            return true;
        }
        let Some(&threat) = checkers.first() else {
            return true;
        };

        let threat_square = self.piece(threat).square;
        let allies: Vec<PieceId> = self
            .roster(color)
            .iter()
            .copied()
            .filter(|&id| id != king)
            .collect();
        for ally in allies {
            if threatens(self, ally, threat_square) && is_legal(self, ally, threat_square) {
                return false;
            }
            if can_block(self, ally, threat, king) {
                return false;
            }
        }
        true
    }

    /// True iff the side is in check with no legal move of any kind.
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.is_in_check(color) && !self.can_any_piece_move(color)
    }

    /// True iff the side is not in check but has no legal move of any kind.
    pub fn is_stalemate(&mut self, color: Color) -> bool {
        !self.is_in_check(color) && !self.can_any_piece_move(color)
    }
}
