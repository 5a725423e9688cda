//! Static evaluation functions.
//!
//! The evaluation is absolute: White is the maxing player, so a positive
//! centipawn score favors White and a negative score favors Black. It sums
//! per-piece material values and a per-square positional bonus read from the
//! piece-square tables below.
//!
//! Terminal positions are scored with a sentinel far outside any achievable
//! heuristic sum: checkmate counts against the side to move, stalemate is 0.

use crate::coretypes::{Cp, CpKind, PieceKind, SquareIndexable, NUM_SQUARES};
use crate::coretypes::{Color::*, PieceKind::*};
use crate::position::Position;

/// Scores beyond every reachable material and positional sum, with headroom
/// for arithmetic inside `CpKind`.
pub const INFINITY: Cp = Cp(1_000_000_000);

impl PieceKind {
    /// Default, independent value per piece.
    pub const fn centipawns(&self) -> Cp {
        Cp(match self {
            Pawn => 100,
            Knight => 320,
            Bishop => 330,
            Rook => 500,
            Queen => 900,
            King => 20_000,
        })
    }
}

/// Primary evaluate function for the engine.
///
/// Terminal positions score as checkmate or stalemate; everything else is
/// material plus piece placement.
pub fn evaluate(position: &Position) -> Cp {
    if position.is_terminal() {
        return terminal(position);
    }
    material(position) + piece_square(position)
}

/// Score a position with no legal moves: checkmate is a loss for the side to
/// move, stalemate is a draw.
pub fn terminal(position: &Position) -> Cp {
    if position.is_check() {
        match position.active_side() {
            White => -INFINITY,
            Black => INFINITY,
        }
    } else {
        Cp(0)
    }
}

/// Returns the relative material strength of the two sides.
/// A positive value is an advantage for White, 0 is even, negative is an
/// advantage for Black.
pub fn material(position: &Position) -> Cp {
    let w_piece_cp: Cp = PieceKind::iter()
        .map(|kind| kind.centipawns() * position.pieces[(White, kind)].count_squares())
        .fold(Cp::default(), |acc, value| acc + value);

    let b_piece_cp: Cp = PieceKind::iter()
        .map(|kind| kind.centipawns() * position.pieces[(Black, kind)].count_squares())
        .fold(Cp::default(), |acc, value| acc + value);

    w_piece_cp - b_piece_cp
}

/// Returns the value from looking up each piece's square in the tables.
///
/// Tables are written from White's viewpoint with rank 8 listed first, so a
/// White piece indexes through a vertical flip and a Black piece indexes
/// directly; Black's sum counts negatively.
pub fn piece_square(position: &Position) -> Cp {
    let mut total = Cp(0);
    for kind in PieceKind::iter() {
        let table = table_for(kind);
        for square in position.pieces[(White, kind)] {
            total += Cp(table[square.flip_rank().idx()]);
        }
        for square in position.pieces[(Black, kind)] {
            total -= Cp(table[square.idx()]);
        }
    }
    total
}

const fn table_for(kind: PieceKind) -> &'static [CpKind; NUM_SQUARES] {
    match kind {
        Pawn => &PAWN_TABLE,
        Knight => &KNIGHT_TABLE,
        Bishop => &BISHOP_TABLE,
        Rook => &ROOK_TABLE,
        Queen => &QUEEN_TABLE,
        King => &KING_TABLE,
    }
}

// Piece-square tables, from White's viewpoint, rank 8 listed first.
// These are the standard simplified evaluation tables.

#[rustfmt::skip]
const PAWN_TABLE: [CpKind; NUM_SQUARES] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [CpKind; NUM_SQUARES] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [CpKind; NUM_SQUARES] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [CpKind; NUM_SQUARES] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [CpKind; NUM_SQUARES] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

/// King middlegame table. Shelter in a corner behind pawns scores best.
#[rustfmt::skip]
const KING_TABLE: [CpKind; NUM_SQUARES] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];
