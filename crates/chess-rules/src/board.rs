//! The board: grid, rosters, and move application.

use crate::movement::{pseudo_move, MoveEffect};
use crate::piece::{Piece, PieceId};
use crate::transient::is_legal;
use chess_core::{Color, PieceKind, Square};
use std::fmt;
use thiserror::Error;

/// Errors from registering pieces on a board under construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("square {0} is already occupied")]
    SquareOccupied(Square),

    #[error("{0} already has a king")]
    DuplicateKing(Color),
}

/// The 8x8 board, the two rosters of live pieces, and the en passant slot.
///
/// Pieces live in an append-only arena and are addressed by [`PieceId`];
/// capture removes a piece from its roster and the grid but leaves its arena
/// slot in place, so speculative rollback can reinstate it exactly. Rosters
/// hold exactly the live pieces of each color, and every roster member's
/// stored square matches the grid cell it occupies.
///
/// The board has no notion of whose turn it is; turn sequencing belongs to
/// the surrounding game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [Option<PieceId>; 64],
    arena: Vec<Piece>,
    rosters: [Vec<PieceId>; 2],
    kings: [Option<PieceId>; 2],
    en_passant: Option<PieceId>,
}

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

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board with the standard initial setup.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for column in 0..8u8 {
            if let (Some(white), Some(black)) = (Square::at(column, 1), Square::at(column, 6)) {
                let _ = board.register(PieceKind::Pawn, Color::White, white);
                let _ = board.register(PieceKind::Pawn, Color::Black, black);
            }
            let kind = BACK_RANK[column as usize];
            if let (Some(white), Some(black)) = (Square::at(column, 0), Square::at(column, 7)) {
                let _ = board.register(kind, Color::White, white);
                let _ = board.register(kind, Color::Black, black);
            }
        }
        board
    }

    /// Creates an empty board for composing positions via [`Board::add_piece`].
    pub fn empty() -> Self {
        Board {
            grid: [None; 64],
            arena: Vec::new(),
            rosters: [Vec::new(), Vec::new()],
            kings: [None, None],
            en_passant: None,
        }
    }

    /// Registers a new piece into play.
    ///
    /// Performs no move-legality checking; this is the setup and promotion
    /// primitive. It does reject registrations that would corrupt the board:
    /// occupying a filled square or adding a second king of one color.
    pub fn add_piece(
        &mut self,
        kind: PieceKind,
        color: Color,
        square: Square,
    ) -> Result<PieceId, SetupError> {
        if self.occupant(square).is_some() {
            return Err(SetupError::SquareOccupied(square));
        }
        if kind == PieceKind::King && self.kings[color.index()].is_some() {
            return Err(SetupError::DuplicateKing(color));
        }
        Ok(self.register(kind, color, square))
    }

    fn register(&mut self, kind: PieceKind, color: Color, square: Square) -> PieceId {
        let id = PieceId(self.arena.len() as u32);
        self.arena.push(Piece {
            kind,
            color,
            square,
            moved: false,
        });
        self.rosters[color.index()].push(id);
        if kind == PieceKind::King {
            self.kings[color.index()] = Some(id);
        }
        self.grid[square.index()] = Some(id);
        id
    }

    /// Returns the piece behind an id. Captured pieces remain addressable;
    /// see [`Board::is_live`].
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.arena[id.index()]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.arena[id.index()]
    }

    /// Returns the id occupying a square, if any.
    #[inline]
    pub fn occupant(&self, square: Square) -> Option<PieceId> {
        self.grid[square.index()]
    }

    /// Returns the piece occupying a square, if any.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.occupant(square).map(|id| self.piece(id))
    }

    /// Returns the color occupying a square, or `None` for an empty square.
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|p| p.color)
    }

    /// True if the square holds a piece.
    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupant(square).is_some()
    }

    /// Returns the live pieces of one color, in no particular order.
    #[inline]
    pub fn roster(&self, color: Color) -> &[PieceId] {
        &self.rosters[color.index()]
    }

    /// Returns the king of one color, if one has been registered.
    #[inline]
    pub fn king(&self, color: Color) -> Option<PieceId> {
        self.kings[color.index()]
    }

    /// True if the piece is still in play.
    pub fn is_live(&self, id: PieceId) -> bool {
        self.rosters[self.piece(id).color.index()].contains(&id)
    }

    /// The pawn that double-stepped on the immediately preceding move, if
    /// any. Cleared by every other successful move.
    #[inline]
    pub fn en_passant(&self) -> Option<PieceId> {
        self.en_passant
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, pawn: Option<PieceId>) {
        self.en_passant = pawn;
    }

    #[inline]
    pub(crate) fn clear(&mut self, square: Square) {
        self.grid[square.index()] = None;
    }

    #[inline]
    pub(crate) fn place(&mut self, id: PieceId, square: Square) {
        self.grid[square.index()] = Some(id);
    }

    /// Removes a piece from its roster, returning the index it held so a
    /// rollback can reinsert it in place and leave the board comparable.
    pub(crate) fn roster_remove(&mut self, id: PieceId) -> usize {
        let color = self.piece(id).color;
        let roster = &mut self.rosters[color.index()];
        let found = roster.iter().position(|&member| member == id);
        debug_assert!(found.is_some(), "removing a piece that is not in play");
        match found {
            Some(index) => {
                let _ = roster.remove(index);
                index
            }
            None => roster.len(),
        }
    }

    pub(crate) fn roster_insert(&mut self, id: PieceId, index: usize) {
        let color = self.piece(id).color;
        let roster = &mut self.rosters[color.index()];
        let index = index.min(roster.len());
        roster.insert(index, id);
    }

    /// Takes a captured piece out of play: off its roster and off the grid.
    pub(crate) fn remove_from_play(&mut self, id: PieceId) {
        let square = self.piece(id).square;
        let _ = self.roster_remove(id);
        self.clear(square);
    }

    /// Applies an already validated move to the grid and rosters.
    ///
    /// `pseudo_move` has run at this point: the mover's stored square is the
    /// destination and the en passant slot reflects the move. This finishes
    /// the job by updating occupancy, capturing, and promoting a pawn that
    /// reached its last row (`promotion` names the replacement kind, anything
    /// unrecognized yielding a queen).
    pub(crate) fn commit(&mut self, id: PieceId, from: Square, effect: MoveEffect, promotion: &str) {
        self.clear(from);
        if let MoveEffect::Capture(victim) | MoveEffect::EnPassant(victim) = effect {
            self.remove_from_play(victim);
        }
        let piece = *self.piece(id);
        self.place(id, piece.square);
        if piece.kind == PieceKind::Pawn && piece.square.row() == piece.color.promotion_row() {
            self.promote(id, promotion);
        }
    }

    /// Retires a pawn on its last row and registers its replacement.
    fn promote(&mut self, id: PieceId, promotion: &str) {
        let Piece { color, square, .. } = *self.piece(id);
        self.remove_from_play(id);
        let kind = PieceKind::from_promotion_name(promotion);
        let replacement = PieceId(self.arena.len() as u32);
        self.arena.push(Piece {
            kind,
            color,
            square,
            moved: true,
        });
        self.rosters[color.index()].push(replacement);
        self.place(replacement, square);
    }

    /// Attempts a move between two squares, the caller-facing legality gate.
    ///
    /// The move must be pseudo-legal for the occupant of `from` and must not
    /// leave the mover's king in check. On success the board is updated
    /// (including capture and promotion) and `true` is returned; otherwise
    /// `false` is returned and the board is left untouched.
    pub fn try_move(&mut self, from: Square, to: Square, promotion: &str) -> bool {
        let Some(id) = self.occupant(from) else {
            return false;
        };
        if !is_legal(self, id, to) {
            return false;
        }
        let Some(effect) = pseudo_move(self, id, to) else {
            return false;
        };
        self.commit(id, from, effect, promotion);
        true
    }

    /// [`Board::try_move`] with squares named algebraically.
    ///
    /// Uses the lenient, clamping parse of
    /// [`Square::from_algebraic_clamped`]; unparseable input returns `false`.
    pub fn try_move_algebraic(&mut self, from: &str, to: &str, promotion: &str) -> bool {
        let (Some(from), Some(to)) = (
            Square::from_algebraic_clamped(from),
            Square::from_algebraic_clamped(to),
        ) else {
            return false;
        };
        self.try_move(from, to, promotion)
    }

    /// True if the occupant of `from` may legally move to `to`.
    ///
    /// Purely a query: any number of calls leaves the board unchanged.
    pub fn is_move_legal(&mut self, from: Square, to: Square) -> bool {
        match self.occupant(from) {
            Some(id) => is_legal(self, id, to),
            None => false,
        }
    }
}

impl fmt::Display for Board {
    /// Renders rank 8 first, the rank digit trailing each line and the file
    /// letters beneath, with two-character piece cells ("wK", "bP", "--").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8u8).rev() {
            for column in 0..8u8 {
                match self.grid[(row * 8 + column) as usize] {
                    Some(id) => write!(f, "{} ", self.piece(id).label())?,
                    None => write!(f, "-- ")?,
                }
            }
            writeln!(f, "{}", row + 1)?;
        }
        for file in b'a'..=b'h' {
            write!(f, " {}", file as char)?;
            if file != b'h' {
                write!(f, " ")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn initial_setup() {
        let board = Board::new();
        assert_eq!(board.roster(Color::White).len(), 16);
        assert_eq!(board.roster(Color::Black).len(), 16);

        let king = board.piece_at(sq("e1")).unwrap();
        assert_eq!((king.kind, king.color), (PieceKind::King, Color::White));
        let queen = board.piece_at(sq("d8")).unwrap();
        assert_eq!((queen.kind, queen.color), (PieceKind::Queen, Color::Black));

        for column in 0..8 {
            let white = board.piece_at(Square::at(column, 1).unwrap()).unwrap();
            assert_eq!((white.kind, white.color), (PieceKind::Pawn, Color::White));
            let black = board.piece_at(Square::at(column, 6).unwrap()).unwrap();
            assert_eq!((black.kind, black.color), (PieceKind::Pawn, Color::Black));
        }

        assert!(board.king(Color::White).is_some());
        assert!(board.king(Color::Black).is_some());
        assert_eq!(board.en_passant(), None);
    }

    #[test]
    fn double_step_records_en_passant_pawn() {
        let mut board = Board::new();
        assert!(board.try_move(sq("e2"), sq("e4"), ""));

        let pawn_id = board.occupant(sq("e4")).unwrap();
        assert_eq!(board.en_passant(), Some(pawn_id));
        let pawn = board.piece(pawn_id);
        assert!(pawn.moved);
        assert_eq!(pawn.kind, PieceKind::Pawn);
        assert!(!board.is_occupied(sq("e2")));
    }

    #[test]
    fn single_step_clears_en_passant() {
        let mut board = Board::new();
        assert!(board.try_move(sq("e2"), sq("e4"), ""));
        assert!(board.try_move(sq("a7"), sq("a6"), ""));
        assert_eq!(board.en_passant(), None);
    }

    #[test]
    fn rejected_move_leaves_board_untouched() {
        let mut board = Board::new();
        let before = board.clone();
        // three squares forward is not a pawn move
        assert!(!board.try_move(sq("e2"), sq("e5"), ""));
        // sliding through the pawn wall
        assert!(!board.try_move(sq("d1"), sq("d5"), ""));
        // empty origin square
        assert!(!board.try_move(sq("e4"), sq("e5"), ""));
        assert_eq!(board, before);
    }

    #[test]
    fn capture_removes_roster_entry() {
        let mut board = Board::empty();
        let _ = board.add_piece(PieceKind::King, Color::White, sq("e1")).unwrap();
        let _ = board.add_piece(PieceKind::King, Color::Black, sq("e8")).unwrap();
        let _ = board.add_piece(PieceKind::Rook, Color::White, sq("a1")).unwrap();
        let pawn = board.add_piece(PieceKind::Pawn, Color::Black, sq("a7")).unwrap();

        assert!(board.try_move(sq("a1"), sq("a7"), ""));
        assert_eq!(board.roster(Color::Black).len(), 1);
        assert!(!board.is_live(pawn));
        let rook = board.piece_at(sq("a7")).unwrap();
        assert_eq!((rook.kind, rook.color), (PieceKind::Rook, Color::White));
    }

    #[test]
    fn en_passant_capture_vacates_passed_square() {
        let mut board = Board::new();
        assert!(board.try_move(sq("e2"), sq("e4"), ""));
        assert!(board.try_move(sq("a7"), sq("a6"), ""));
        assert!(board.try_move(sq("e4"), sq("e5"), ""));
        // black double-steps past the white pawn
        assert!(board.try_move(sq("d7"), sq("d5"), ""));
        assert_eq!(board.en_passant(), board.occupant(sq("d5")));

        assert!(board.try_move(sq("e5"), sq("d6"), ""));
        // the captured pawn's own square empties, not the destination
        assert!(!board.is_occupied(sq("d5")));
        let capturer = board.piece_at(sq("d6")).unwrap();
        assert_eq!(
            (capturer.kind, capturer.color),
            (PieceKind::Pawn, Color::White)
        );
        assert_eq!(board.roster(Color::Black).len(), 15);
        assert_eq!(board.en_passant(), None);
    }

    #[test]
    fn promotion_replaces_pawn_with_named_kind() {
        let mut board = Board::empty();
        let _ = board.add_piece(PieceKind::King, Color::White, sq("e1")).unwrap();
        let _ = board.add_piece(PieceKind::King, Color::Black, sq("h8")).unwrap();
        let pawn = board.add_piece(PieceKind::Pawn, Color::White, sq("a7")).unwrap();

        assert!(board.try_move(sq("a7"), sq("a8"), "knight"));
        let promoted = board.piece_at(sq("a8")).unwrap();
        assert_eq!(
            (promoted.kind, promoted.color),
            (PieceKind::Knight, Color::White)
        );
        assert!(!board.is_live(pawn));
        assert_eq!(board.roster(Color::White).len(), 2);
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let mut board = Board::empty();
        let _ = board.add_piece(PieceKind::King, Color::White, sq("e1")).unwrap();
        let _ = board.add_piece(PieceKind::King, Color::Black, sq("h8")).unwrap();
        let _ = board.add_piece(PieceKind::Pawn, Color::White, sq("b7")).unwrap();

        assert!(board.try_move(sq("b7"), sq("b8"), "no such piece"));
        assert_eq!(board.piece_at(sq("b8")).unwrap().kind, PieceKind::Queen);
    }

    #[test]
    fn capturing_promotion() {
        let mut board = Board::empty();
        let _ = board.add_piece(PieceKind::King, Color::White, sq("e1")).unwrap();
        let _ = board.add_piece(PieceKind::King, Color::Black, sq("h4")).unwrap();
        let _ = board.add_piece(PieceKind::Pawn, Color::White, sq("b7")).unwrap();
        let rook = board.add_piece(PieceKind::Rook, Color::Black, sq("c8")).unwrap();

        assert!(board.try_move(sq("b7"), sq("c8"), "rook"));
        assert!(!board.is_live(rook));
        let promoted = board.piece_at(sq("c8")).unwrap();
        assert_eq!(
            (promoted.kind, promoted.color),
            (PieceKind::Rook, Color::White)
        );
    }

    #[test]
    fn add_piece_rejects_occupied_square() {
        let mut board = Board::empty();
        let _ = board.add_piece(PieceKind::Rook, Color::White, sq("a1")).unwrap();
        assert_eq!(
            board.add_piece(PieceKind::Knight, Color::White, sq("a1")),
            Err(SetupError::SquareOccupied(sq("a1")))
        );
    }

    #[test]
    fn add_piece_rejects_second_king() {
        let mut board = Board::empty();
        let _ = board.add_piece(PieceKind::King, Color::White, sq("e1")).unwrap();
        assert_eq!(
            board.add_piece(PieceKind::King, Color::White, sq("d1")),
            Err(SetupError::DuplicateKing(Color::White))
        );
        // a black king is still fine
        assert!(board.add_piece(PieceKind::King, Color::Black, sq("e8")).is_ok());
    }

    #[test]
    fn algebraic_move_entry() {
        let mut board = Board::new();
        assert!(board.try_move_algebraic("e2", "e4", ""));
        assert!(board.is_occupied(sq("e4")));
        assert!(!board.try_move_algebraic("e9x", "e4", ""));
        assert!(!board.try_move_algebraic("", "e4", ""));
    }

    #[test]
    fn rendering_layout() {
        let board = Board::new();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "bR bN bB bQ bK bB bN bR 8");
        assert_eq!(lines[1], "bP bP bP bP bP bP bP bP 7");
        assert_eq!(lines[2], "-- -- -- -- -- -- -- -- 6");
        assert_eq!(lines[7], "wR wN wB wQ wK wB wN wR 1");
        assert_eq!(lines[8], " a  b  c  d  e  f  g  h");
    }
}
