//! Piece instances and their stable identity.

use chess_core::{Color, PieceKind, Square};

/// Stable identity of a piece for the lifetime of a [`Board`](crate::Board).
///
/// Ids index an append-only arena and are never reused, so comparing two ids
/// never depends on where the pieces currently stand. This matters during
/// speculative legality checks, where coordinates are transiently wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(pub(crate) u32);

impl PieceId {
    /// Returns the arena index backing this id.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A chess piece: what it is, whose it is, and where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// The kind of piece.
    pub kind: PieceKind,
    /// The owning side.
    pub color: Color,
    /// Current location. Kept in sync with the board grid by the board.
    pub square: Square,
    /// Whether the piece has moved. Gates the pawn double step; tracked
    /// uniformly for every kind so castling eligibility could build on it.
    pub moved: bool,
}

impl Piece {
    /// Two-character rendering used in the board dump, e.g. "wK" or "bP".
    pub fn label(&self) -> String {
        format!("{}{}", self.color.letter(), self.kind.letter())
    }
}
