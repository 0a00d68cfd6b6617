//! The two sides of the game.
//!
//! Beyond naming the players, `Color` carries the board orientation the
//! movement rules need: which way pawns advance and where they promote.

/// A side: White moves up the board, Black moves down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// The other side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into per-color tables such as rosters: 0 White, 1 Black.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The row delta of a pawn advance for this side.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The zero-based row where this side's pawns promote, the far edge in
    /// the pawn's direction of travel.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// The letter prefixing piece cells in the board dump.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for color in [Color::White, Color::Black] {
            assert_ne!(color.opposite(), color);
            assert_eq!(color.opposite().opposite(), color);
        }
    }

    #[test]
    fn board_orientation() {
        // the two sides advance toward each other's promotion rows
        for color in [Color::White, Color::Black] {
            assert_eq!(color.pawn_direction(), -color.opposite().pawn_direction());
            let toward = color.promotion_row() as i8 - 3;
            assert_eq!(toward.signum(), color.pawn_direction());
        }
        assert_eq!(Color::White.promotion_row(), 7);
        assert_eq!(Color::Black.promotion_row(), 0);
    }

    #[test]
    fn indices_are_distinct() {
        assert_eq!(Color::White.index(), 0);
        assert_eq!(Color::Black.index(), 1);
    }

    #[test]
    fn rendering() {
        assert_eq!(Color::White.letter(), 'w');
        assert_eq!(Color::Black.letter(), 'b');
        assert_eq!(Color::White.to_string(), "White");
        assert_eq!(Color::Black.to_string(), "Black");
    }
}
