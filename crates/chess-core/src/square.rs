//! Board square representation.

use std::fmt;
use thiserror::Error;

/// Errors from strict algebraic square parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareParseError {
    #[error("expected a file letter and a rank digit, got {0:?}")]
    Malformed(String),

    #[error("invalid file {0:?}, expected 'a'-'h'")]
    InvalidFile(char),

    #[error("invalid rank {0:?}, expected '1'-'8'")]
    InvalidRank(char),
}

/// A column of the board, file a through file h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// The files left to right from White's side.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// The file at a zero-based column index, `None` past file h.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Reads a file letter, either case.
    pub fn from_char(c: char) -> Option<Self> {
        let index = (c.to_ascii_lowercase() as i32) - ('a' as i32);
        u8::try_from(index).ok().and_then(Self::from_index)
    }

    /// The lowercase letter for this file.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

/// A row of the board, rank 1 (White's back rank) through rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// The ranks from White's side of the board to Black's.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// The rank at a zero-based row index, `None` past rank 8.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Reads a rank digit '1' through '8'.
    pub fn from_char(c: char) -> Option<Self> {
        let index = (c as i32) - ('1' as i32);
        u8::try_from(index).ok().and_then(Self::from_index)
    }

    /// The digit for this rank.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

/// A square on the board, packed as `row * 8 + column` (a1 = 0, h8 = 63).
///
/// Columns map to files a-h and rows to ranks 1-8, both zero-based.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from typed coordinates; infallible by construction.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square((rank as u8) * 8 + file as u8)
    }

    /// Creates a square from a zero-based (column, row) pair.
    ///
    /// Returns `None` when either coordinate is off the board, which doubles
    /// as the bounds check for callers working with raw coordinates.
    #[inline]
    pub const fn at(column: u8, row: u8) -> Option<Self> {
        match (File::from_index(column), Rank::from_index(row)) {
            (Some(file), Some(rank)) => Some(Square::new(file, rank)),
            _ => None,
        }
    }

    /// Returns the zero-based column (file) of this square.
    #[inline]
    pub const fn column(self) -> u8 {
        self.0 % 8
    }

    /// Returns the zero-based row (rank) of this square.
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        File::ALL[self.column() as usize]
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[self.row() as usize]
    }

    /// Returns the packed index (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Steps by the given column/row deltas, returning `None` off the board.
    ///
    /// This is the primitive used to walk sliding-piece rays.
    #[inline]
    pub fn offset(self, dc: i8, dr: i8) -> Option<Self> {
        let column = self.column() as i8 + dc;
        let row = self.row() as i8 + dr;
        if (0..8).contains(&column) && (0..8).contains(&row) {
            Square::at(column as u8, row as u8)
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g. "e4"), rejecting
    /// anything that is not exactly a file letter followed by a rank digit.
    pub fn from_algebraic(s: &str) -> Result<Self, SquareParseError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => {
                let file = File::from_char(f).ok_or(SquareParseError::InvalidFile(f))?;
                let rank = Rank::from_char(r).ok_or(SquareParseError::InvalidRank(r))?;
                Ok(Square::new(file, rank))
            }
            _ => Err(SquareParseError::Malformed(s.to_string())),
        }
    }

    /// Lenient parse used at the board's caller boundary.
    ///
    /// A file letter or rank digit that lands outside the board is clamped to
    /// the nearest edge square instead of being rejected, so "i9" resolves to
    /// h8. Returns `None` only when the input is shorter than two characters
    /// or the rank position holds no digit at all. Prefer
    /// [`Square::from_algebraic`] when invalid input must be reported.
    pub fn from_algebraic_clamped(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        let column = (file.to_ascii_lowercase() as i32 - 'a' as i32).clamp(0, 7) as u8;
        let row = (rank.to_digit(10)? as i32 - 1).clamp(0, 7) as u8;
        Square::at(column, row)
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file().to_char(), self.rank().to_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_vocabulary() {
        assert_eq!(File::from_index(0), Some(File::A));
        assert_eq!(File::from_index(7), Some(File::H));
        assert_eq!(File::from_index(8), None);
        assert_eq!(File::from_char('e'), Some(File::E));
        assert_eq!(File::from_char('E'), Some(File::E));
        assert_eq!(File::from_char('i'), None);
        for file in File::ALL {
            assert_eq!(File::from_char(file.to_char()), Some(file));
        }
    }

    #[test]
    fn rank_vocabulary() {
        assert_eq!(Rank::from_index(0), Some(Rank::R1));
        assert_eq!(Rank::from_index(7), Some(Rank::R8));
        assert_eq!(Rank::from_index(8), None);
        assert_eq!(Rank::from_char('4'), Some(Rank::R4));
        assert_eq!(Rank::from_char('9'), None);
        assert_eq!(Rank::from_char('x'), None);
        for rank in Rank::ALL {
            assert_eq!(Rank::from_char(rank.to_char()), Some(rank));
        }
    }

    #[test]
    fn typed_construction() {
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(Some(e4), Square::from_algebraic("e4").ok());
        assert_eq!((e4.file(), e4.rank()), (File::E, Rank::R4));
        assert_eq!(Square::new(File::A, Rank::R1).index(), 0);
        assert_eq!(Square::new(File::H, Rank::R8).index(), 63);
    }

    #[test]
    fn at_bounds() {
        let a1 = Square::at(0, 0).unwrap();
        assert_eq!(a1.index(), 0);
        let h8 = Square::at(7, 7).unwrap();
        assert_eq!(h8.index(), 63);
        assert_eq!(Square::at(8, 0), None);
        assert_eq!(Square::at(0, 8), None);
    }

    #[test]
    fn column_and_row() {
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(e4.column(), 4);
        assert_eq!(e4.row(), 3);
        assert_eq!(e4.index(), 28);
    }

    #[test]
    fn offsets() {
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(e4.offset(0, 1), Square::from_algebraic("e5").ok());
        assert_eq!(e4.offset(-1, -1), Square::from_algebraic("d3").ok());
        let a1 = Square::at(0, 0).unwrap();
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        let h8 = Square::at(7, 7).unwrap();
        assert_eq!(h8.offset(1, 0), None);
        assert_eq!(h8.offset(0, 1), None);
    }

    #[test]
    fn strict_parsing() {
        assert_eq!(Square::from_algebraic("a1").ok(), Square::at(0, 0));
        assert_eq!(Square::from_algebraic("h8").ok(), Square::at(7, 7));
        assert!(matches!(
            Square::from_algebraic("i1"),
            Err(SquareParseError::InvalidFile('i'))
        ));
        assert!(matches!(
            Square::from_algebraic("a9"),
            Err(SquareParseError::InvalidRank('9'))
        ));
        assert!(matches!(
            Square::from_algebraic(""),
            Err(SquareParseError::Malformed(_))
        ));
        assert!(matches!(
            Square::from_algebraic("e44"),
            Err(SquareParseError::Malformed(_))
        ));
    }

    #[test]
    fn clamped_parsing() {
        assert_eq!(
            Square::from_algebraic_clamped("e4"),
            Square::from_algebraic("e4").ok()
        );
        // off-board input clamps to the nearest edge
        assert_eq!(
            Square::from_algebraic_clamped("i9"),
            Square::from_algebraic("h8").ok()
        );
        assert_eq!(
            Square::from_algebraic_clamped("z1"),
            Square::from_algebraic("h1").ok()
        );
        assert_eq!(Square::from_algebraic_clamped("a"), None);
        assert_eq!(Square::from_algebraic_clamped("ax"), None);
    }

    #[test]
    fn algebraic_round_trip() {
        assert_eq!(Square::from_algebraic("a1").unwrap().to_algebraic(), "a1");
        assert_eq!(Square::from_algebraic("h8").unwrap().to_algebraic(), "h8");
        assert_eq!(Square::from_algebraic("e4").unwrap().to_algebraic(), "e4");
    }
}
