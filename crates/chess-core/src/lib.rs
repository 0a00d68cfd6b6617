//! Core types for the chess rules engine.
//!
//! This crate provides the fundamental vocabulary shared by the engine:
//! - [`Color`] for the two sides
//! - [`File`], [`Rank`], and [`Square`] for board coordinates, with strict
//!   and lenient parsing
//! - [`PieceKind`] for the six piece types and promotion selection
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, File, PieceKind, Rank, Square};
//!
//! let e4 = Square::from_algebraic("e4").unwrap();
//! assert_eq!(e4, Square::new(File::E, Rank::R4));
//! assert_eq!((e4.column(), e4.row()), (4, 3));
//! assert_eq!(PieceKind::from_promotion_name("Knight"), PieceKind::Knight);
//! assert_eq!(Color::White.opposite(), Color::Black);
//! ```

mod color;
mod piece;
mod square;

pub use color::Color;
pub use piece::PieceKind;
pub use square::{File, Rank, Square, SquareParseError};
