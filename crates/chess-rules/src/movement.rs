//! Per-kind movement geometry: threat tests, pseudo-legal move application,
//! and destination enumeration.
//!
//! Everything here is *pseudo-legal*: geometry, path clearance, and capture
//! color are enforced, but king safety is not. The transient machinery in
//! [`crate::transient`] layers king safety on top.

use crate::board::Board;
use crate::piece::{Piece, PieceId};
use crate::transient::Speculation;
use chess_core::{Color, PieceKind, Square};

/// What committing a validated move must do to board occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEffect {
    /// No capture, no special state.
    Quiet,
    /// Pawn double step; the mover became the en passant pawn.
    DoubleStep,
    /// The occupant of the destination square is captured.
    Capture(PieceId),
    /// En passant: the named pawn is captured on its own square, which is
    /// not the destination square.
    EnPassant(PieceId),
}

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const EVERY_DIRECTION: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// True iff the piece could capture on `target` on its next move, ignoring
/// whose turn it is and ignoring king safety.
///
/// The target square may be empty, hostile, or friendly; only geometry and
/// path clearance are considered. Pawn forward pushes are deliberately not
/// threats.
pub fn threatens(board: &Board, id: PieceId, target: Square) -> bool {
    let piece = board.piece(id);
    match piece.kind {
        PieceKind::Pawn => pawn_threatens(piece, target),
        PieceKind::Knight => knight_threatens(piece.square, target),
        PieceKind::Bishop => ray_threatens(board, piece.square, target, &DIAGONAL),
        PieceKind::Rook => ray_threatens(board, piece.square, target, &ORTHOGONAL),
        PieceKind::Queen => ray_threatens(board, piece.square, target, &EVERY_DIRECTION),
        PieceKind::King => king_threatens(piece.square, target),
    }
}

/// Validates and applies the piece-local part of a move.
///
/// On success the piece's stored square and `moved` flag are updated and the
/// board's en passant slot is set (on a double step) or cleared (any other
/// move); grid and roster bookkeeping is reported back as a [`MoveEffect`]
/// for the board to apply. Returns `None` with zero mutation on any rule
/// violation.
pub fn pseudo_move(board: &mut Board, id: PieceId, to: Square) -> Option<MoveEffect> {
    let piece = *board.piece(id);
    if piece.square == to {
        return None;
    }
    let effect = match piece.kind {
        PieceKind::Pawn => pawn_pseudo(board, &piece, to)?,
        PieceKind::Knight => {
            if !knight_threatens(piece.square, to) {
                return None;
            }
            capture_or_quiet(board, piece.color, to)?
        }
        PieceKind::Bishop => {
            if !ray_threatens(board, piece.square, to, &DIAGONAL) {
                return None;
            }
            capture_or_quiet(board, piece.color, to)?
        }
        PieceKind::Rook => {
            if !ray_threatens(board, piece.square, to, &ORTHOGONAL) {
                return None;
            }
            capture_or_quiet(board, piece.color, to)?
        }
        PieceKind::Queen => {
            if !ray_threatens(board, piece.square, to, &EVERY_DIRECTION) {
                return None;
            }
            capture_or_quiet(board, piece.color, to)?
        }
        PieceKind::King => {
            if !king_threatens(piece.square, to) {
                return None;
            }
            capture_or_quiet(board, piece.color, to)?
        }
    };

    board.set_en_passant(match effect {
        MoveEffect::DoubleStep => Some(id),
        _ => None,
    });
    let piece = board.piece_mut(id);
    piece.square = to;
    piece.moved = true;
    Some(effect)
}

/// Enumerates every square the piece could pseudo-legally move to.
///
/// Destinations are built constructively per kind rather than by probing all
/// 64 squares. King destinations exclude friendly squares but not attacked
/// ones; filtering those is the legality check's job.
pub fn moves(board: &Board, id: PieceId) -> Vec<Square> {
    let piece = board.piece(id);
    let mut out = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, piece, &mut out),
        PieceKind::Knight => step_moves(board, piece, &KNIGHT_JUMPS, &mut out),
        PieceKind::Bishop => ray_moves(board, piece, &DIAGONAL, &mut out),
        PieceKind::Rook => ray_moves(board, piece, &ORTHOGONAL, &mut out),
        PieceKind::Queen => ray_moves(board, piece, &EVERY_DIRECTION, &mut out),
        PieceKind::King => step_moves(board, piece, &EVERY_DIRECTION, &mut out),
    }
    out
}

/// True iff some legal move of this piece stops `threat` from threatening
/// `victim`'s square, by interposing on the line of attack or by capturing
/// the threat outright.
pub fn can_block(board: &mut Board, id: PieceId, threat: PieceId, victim: PieceId) -> bool {
    let victim_square = board.piece(victim).square;
    let mover = board.piece(id).color;
    for destination in moves(board, id) {
        let Some(speculation) = Speculation::begin(board, id, destination) else {
            continue;
        };
        let line_broken = !speculation.board().is_live(threat)
            || !threatens(speculation.board(), threat, victim_square);
        let safe = !speculation.board().is_in_check(mover);
        drop(speculation);
        if line_broken && safe {
            return true;
        }
    }
    false
}

fn pawn_threatens(piece: &Piece, target: Square) -> bool {
    let dr = target.row() as i8 - piece.square.row() as i8;
    let dc = (target.column() as i8 - piece.square.column() as i8).abs();
    dr == piece.color.pawn_direction() && dc == 1
}

fn knight_threatens(from: Square, target: Square) -> bool {
    let dc = (target.column() as i8 - from.column() as i8).abs();
    let dr = (target.row() as i8 - from.row() as i8).abs();
    (dc == 1 && dr == 2) || (dc == 2 && dr == 1)
}

fn king_threatens(from: Square, target: Square) -> bool {
    let dc = (target.column() as i8 - from.column() as i8).abs();
    let dr = (target.row() as i8 - from.row() as i8).abs();
    dc <= 1 && dr <= 1 && (dc, dr) != (0, 0)
}

/// Walks outward toward `target` along the matching permitted direction.
/// Reaching the target ends the walk with a hit, even onto an occupant; any
/// earlier occupant blocks the ray.
fn ray_threatens(board: &Board, from: Square, target: Square, directions: &[(i8, i8)]) -> bool {
    let dc = (target.column() as i8 - from.column() as i8).signum();
    let dr = (target.row() as i8 - from.row() as i8).signum();
    if (dc, dr) == (0, 0) || !directions.contains(&(dc, dr)) {
        return false;
    }
    let mut square = from;
    while let Some(next) = square.offset(dc, dr) {
        if next == target {
            return true;
        }
        if board.is_occupied(next) {
            return false;
        }
        square = next;
    }
    false
}

/// Rejects landing on a friend; reports an enemy occupant as a capture.
fn capture_or_quiet(board: &Board, mover: Color, to: Square) -> Option<MoveEffect> {
    match board.occupant(to) {
        Some(occupant) if board.piece(occupant).color == mover => None,
        Some(occupant) => Some(MoveEffect::Capture(occupant)),
        None => Some(MoveEffect::Quiet),
    }
}

fn pawn_pseudo(board: &Board, piece: &Piece, to: Square) -> Option<MoveEffect> {
    let direction = piece.color.pawn_direction();
    let from = piece.square;

    if to.column() == from.column() {
        // pushes require an empty destination
        if board.is_occupied(to) {
            return None;
        }
        if Some(to) == from.offset(0, direction) {
            return Some(MoveEffect::Quiet);
        }
        let intervening_clear = from
            .offset(0, direction)
            .is_some_and(|mid| !board.is_occupied(mid));
        if !piece.moved && intervening_clear && Some(to) == from.offset(0, 2 * direction) {
            return Some(MoveEffect::DoubleStep);
        }
        return None;
    }

    if !pawn_threatens(piece, to) {
        return None;
    }
    match board.occupant(to) {
        Some(occupant) if board.piece(occupant).color != piece.color => {
            Some(MoveEffect::Capture(occupant))
        }
        Some(_) => None,
        None => {
            // en passant: the recorded pawn stands beside us, the capture
            // square is behind it
            let pawn = board.en_passant()?;
            let target = board.piece(pawn);
            if target.color != piece.color
                && target.square.row() == from.row()
                && target.square.column() == to.column()
            {
                Some(MoveEffect::EnPassant(pawn))
            } else {
                None
            }
        }
    }
}

fn pawn_moves(board: &Board, piece: &Piece, out: &mut Vec<Square>) {
    let direction = piece.color.pawn_direction();

    if let Some(ahead) = piece.square.offset(0, direction) {
        if !board.is_occupied(ahead) {
            out.push(ahead);
            if !piece.moved {
                if let Some(two_ahead) = ahead.offset(0, direction) {
                    if !board.is_occupied(two_ahead) {
                        out.push(two_ahead);
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(diagonal) = piece.square.offset(dc, direction) {
            if board
                .color_at(diagonal)
                .is_some_and(|color| color != piece.color)
            {
                out.push(diagonal);
            }
        }
    }

    if let Some(pawn) = board.en_passant() {
        let target = board.piece(pawn);
        if target.color != piece.color && target.square.row() == piece.square.row() {
            let dc = target.square.column() as i8 - piece.square.column() as i8;
            if dc.abs() == 1 {
                if let Some(destination) = piece.square.offset(dc, direction) {
                    out.push(destination);
                }
            }
        }
    }
}

fn step_moves(board: &Board, piece: &Piece, steps: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(dc, dr) in steps {
        if let Some(next) = piece.square.offset(dc, dr) {
            if board.color_at(next) != Some(piece.color) {
                out.push(next);
            }
        }
    }
}

fn ray_moves(board: &Board, piece: &Piece, directions: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(dc, dr) in directions {
        let mut square = piece.square;
        while let Some(next) = square.offset(dc, dr) {
            match board.color_at(next) {
                None => out.push(next),
                Some(color) => {
                    if color != piece.color {
                        out.push(next);
                    }
                    break;
                }
            }
            square = next;
        }
    }
}
