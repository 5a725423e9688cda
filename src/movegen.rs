//! Precalculated movement patterns used by the move generator, the movement
//! legality checks, and attack detection.
//!
//! All tables are generated at compile time. Knight and king patterns are
//! exact move/attack sets. Slider patterns are moves/attacks on an otherwise
//! empty board; occupancy is resolved at runtime with the `between` table.

use crate::bitboard::Bitboard;
use crate::coretypes::{Color, Square, SquareIndexable, NUM_SQUARES};

// Single piece, square indexed, symmetrical. Attacks == pseudo-legal moves.
const KNIGHT_PATTERN: [Bitboard; NUM_SQUARES] = generate_knight_patterns();
// Single piece, square indexed, symmetrical. Attacks == pseudo-legal moves.
const KING_PATTERN: [Bitboard; NUM_SQUARES] = generate_king_patterns();
// Single piece, square indexed, symmetrical. Attacks == pseudo-legal moves on empty board.
const ROOK_PATTERN: [Bitboard; NUM_SQUARES] = generate_rook_patterns();
// Single piece, square indexed, symmetrical. Attacks == pseudo-legal moves on empty board.
const BISHOP_PATTERN: [Bitboard; NUM_SQUARES] = generate_bishop_patterns();
// Squares strictly between two queen-aligned squares, empty otherwise.
static BETWEEN: [[Bitboard; NUM_SQUARES]; NUM_SQUARES] = generate_between();

/// Knight move/attack pattern for a square.
pub(crate) fn knight_pattern<I: SquareIndexable>(square: I) -> Bitboard {
    KNIGHT_PATTERN[square.idx()]
}

/// King move/attack pattern for a square, castling excluded.
pub(crate) fn king_pattern<I: SquareIndexable>(square: I) -> Bitboard {
    KING_PATTERN[square.idx()]
}

/// Rook move/attack pattern for a square on an empty board.
pub(crate) fn rook_pattern<I: SquareIndexable>(square: I) -> Bitboard {
    ROOK_PATTERN[square.idx()]
}

/// Bishop move/attack pattern for a square on an empty board.
pub(crate) fn bishop_pattern<I: SquareIndexable>(square: I) -> Bitboard {
    BISHOP_PATTERN[square.idx()]
}

/// Queen move/attack pattern for a square on an empty board.
pub(crate) fn queen_pattern<I: SquareIndexable>(square: I) -> Bitboard {
    Bitboard(ROOK_PATTERN[square.idx()].0 | BISHOP_PATTERN[square.idx()].0)
}

/// The squares strictly between two squares that share a rank, file, or
/// diagonal. Unaligned square pairs map to the empty bitboard, as do
/// adjacent squares. A slider's path from `from` to `to` is clear exactly
/// when this set has no overlap with the occupied set.
pub(crate) fn between(from: Square, to: Square) -> Bitboard {
    BETWEEN[from.idx()][to.idx()]
}

/// Generate pseudo-legal single push destinations for all pawns of a color.
/// Destination occupancy is the caller's concern.
pub(crate) fn pawn_single_pushes(pawns: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => pawns.to_north(),
        Color::Black => pawns.to_south(),
    }
}

/// Generate pseudo-legal double push destinations for pawns on their home rank.
pub(crate) fn pawn_double_pushes(pawns: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => (pawns & Bitboard::RANK_2).to_north().to_north(),
        Color::Black => (pawns & Bitboard::RANK_7).to_south().to_south(),
    }
}

/// Generate attack destinations for all pawns in a bitboard for a color.
pub(crate) fn pawn_attacks(pawns: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => pawns.to_north_east() | pawns.to_north_west(),
        Color::Black => pawns.to_south_east() | pawns.to_south_west(),
    }
}

/// Generates an array containing a knight attack/move pattern bitboard for
/// each square. Knights move/attack in an L shaped pattern.
const fn generate_knight_patterns() -> [Bitboard; NUM_SQUARES] {
    let mut pattern_arr = [Bitboard::EMPTY; NUM_SQUARES];
    let mut index = 0;
    while index < NUM_SQUARES {
        let origin = Bitboard(1u64 << index);
        let mut bb = Bitboard::EMPTY;

        bb.0 |= origin.to_north().to_north().to_east().0;
        bb.0 |= origin.to_north().to_east().to_east().0;
        bb.0 |= origin.to_south().to_east().to_east().0;
        bb.0 |= origin.to_south().to_south().to_east().0;
        bb.0 |= origin.to_south().to_south().to_west().0;
        bb.0 |= origin.to_south().to_west().to_west().0;
        bb.0 |= origin.to_north().to_west().to_west().0;
        bb.0 |= origin.to_north().to_north().to_west().0;

        pattern_arr[index] = bb;
        index += 1;
    }
    pattern_arr
}

/// Generates an array containing a king move/attack pattern bitboard for each
/// square. Kings move/attack all surrounding squares orthogonally and diagonally.
const fn generate_king_patterns() -> [Bitboard; NUM_SQUARES] {
    let mut pattern_arr = [Bitboard::EMPTY; NUM_SQUARES];
    let mut index = 0;
    while index < NUM_SQUARES {
        let mut origin = Bitboard(1u64 << index);
        let mut bb = Bitboard(origin.to_west().0 | origin.to_east().0);
        origin.0 |= bb.0;
        bb.0 |= origin.to_north().0;
        bb.0 |= origin.to_south().0;

        pattern_arr[index] = bb;
        index += 1;
    }
    pattern_arr
}

/// Generate an array containing a rook move/attack pattern bitboard for each
/// square on an otherwise empty chess board.
const fn generate_rook_patterns() -> [Bitboard; NUM_SQUARES] {
    let mut pattern_arr = [Bitboard::EMPTY; NUM_SQUARES];
    let mut index = 0;
    while index < NUM_SQUARES {
        let origin = Bitboard(1u64 << index);

        // Shift the origin seven times in each direction to cover the board.
        let mut north = origin.to_north();
        let mut south = origin.to_south();
        let mut east = origin.to_east();
        let mut west = origin.to_west();
        let mut step = 0;
        while step < 6 {
            north.0 |= north.to_north().0;
            south.0 |= south.to_south().0;
            east.0 |= east.to_east().0;
            west.0 |= west.to_west().0;
            step += 1;
        }

        pattern_arr[index] = Bitboard(north.0 | south.0 | east.0 | west.0);
        index += 1;
    }
    pattern_arr
}

/// Generate an array containing a bishop move/attack pattern bitboard for
/// each square on an otherwise empty chess board.
const fn generate_bishop_patterns() -> [Bitboard; NUM_SQUARES] {
    let mut pattern_arr = [Bitboard::EMPTY; NUM_SQUARES];
    let mut index = 0;
    while index < NUM_SQUARES {
        let origin = Bitboard(1u64 << index);

        let mut no_ea = origin.to_north_east();
        let mut so_ea = origin.to_south_east();
        let mut so_we = origin.to_south_west();
        let mut no_we = origin.to_north_west();
        let mut step = 0;
        while step < 6 {
            no_ea.0 |= no_ea.to_north_east().0;
            so_ea.0 |= so_ea.to_south_east().0;
            so_we.0 |= so_we.to_south_west().0;
            no_we.0 |= no_we.to_north_west().0;
            step += 1;
        }

        pattern_arr[index] = Bitboard(no_ea.0 | so_ea.0 | so_we.0 | no_we.0);
        index += 1;
    }
    pattern_arr
}

/// Generate the table of squares strictly between every pair of squares.
const fn generate_between() -> [[Bitboard; NUM_SQUARES]; NUM_SQUARES] {
    let mut table = [[Bitboard::EMPTY; NUM_SQUARES]; NUM_SQUARES];
    let mut from = 0;
    while from < NUM_SQUARES {
        let mut to = 0;
        while to < NUM_SQUARES {
            table[from][to] = between_exclusive(from, to);
            to += 1;
        }
        from += 1;
    }
    table
}

/// Squares strictly between two board indices, or empty when unaligned.
const fn between_exclusive(from: usize, to: usize) -> Bitboard {
    let (from_file, from_rank) = (from as i32 % 8, from as i32 / 8);
    let (to_file, to_rank) = (to as i32 % 8, to as i32 / 8);
    let file_delta = to_file - from_file;
    let rank_delta = to_rank - from_rank;

    let aligned = (file_delta == 0) != (rank_delta == 0)
        || (file_delta.abs() == rank_delta.abs() && file_delta != 0);
    if !aligned {
        return Bitboard::EMPTY;
    }

    let file_step = file_delta.signum();
    let rank_step = rank_delta.signum();
    let mut bb = Bitboard::EMPTY;
    let mut file = from_file + file_step;
    let mut rank = from_rank + rank_step;
    while file != to_file || rank != to_rank {
        bb.0 |= 1u64 << (rank * 8 + file);
        file += file_step;
        rank += rank_step;
    }
    bb
}
