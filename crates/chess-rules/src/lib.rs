//! Mailbox chess rules engine.
//!
//! This crate is the authority on what a piece may legally do, whether a side
//! is in check, and whether checkmate or stalemate has occurred. It provides:
//! - [`Board`] - the 8x8 grid, per-color piece rosters, and move application
//! - [`threatens`], [`moves`], [`pseudo_move`] - per-kind movement geometry
//! - [`Speculation`] - speculative move application with guaranteed rollback
//! - Check detection and checkmate/stalemate resolution on [`Board`]
//!
//! A move is *pseudo-legal* when it obeys the piece's geometry, path
//! clearance, and capture rules. It is *legal* when, in addition, applying it
//! does not leave the mover's own king in check. The latter is decided by
//! speculatively applying the move to the shared board and rolling it back
//! through a scope-exit guard, so the board is observably unchanged by any
//! number of legality queries.
//!
//! Castling and draw-by-repetition/50-move accounting are not implemented.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Square};
//! use chess_rules::Board;
//!
//! let mut board = Board::new();
//! let from = Square::from_algebraic("e2").unwrap();
//! let to = Square::from_algebraic("e4").unwrap();
//! assert!(board.try_move(from, to, ""));
//! assert!(!board.is_in_check(Color::Black));
//! assert!(board.can_any_piece_move(Color::Black));
//! ```

mod board;
mod movement;
mod piece;
mod rules;
mod transient;

pub use board::{Board, SetupError};
pub use movement::{can_block, moves, pseudo_move, threatens, MoveEffect};
pub use piece::{Piece, PieceId};
pub use transient::{is_legal, Speculation};
