//! Zobrist hashing.
//!
//! A position hash is formed by XOR-ing pseudorandom keys for each piece on
//! its square, the castling-rights mask, and the side to move. The half-move
//! and full-move counters and the stored en passant square take no part in
//! the hash, so transpositions that differ only in bookkeeping collide on
//! purpose.

use std::collections::HashSet;
use std::ops::Index;
use std::sync::OnceLock;

use rand::prelude::*;

use crate::boardrepr::PieceSets;
use crate::coretypes::{Castling, Color, Piece, PieceKind, Square, SquareIndexable};
use crate::coretypes::{NUM_PIECES, NUM_SQUARES};

/// HashKind is an alias for the underlying type of a Zobrist hash.
pub type HashKind = u64;

/// Fixed seed for the engine-wide table. Positions must hash identically
/// across runs and across processes, so the keys cannot come from entropy.
const TABLE_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

static TABLE: OnceLock<ZobristTable> = OnceLock::new();

/// The process-wide table every `Position` hashes against.
pub fn table() -> &'static ZobristTable {
    TABLE.get_or_init(|| ZobristTable::with_seed(TABLE_SEED))
}

/// ZobristTable contains unique, pseudo-randomly generated keys for
/// calculating the Zobrist hash of a chess position.
///
/// Each piece gets a unique number for each square.
/// Each possible combination of castling rights gets a unique number.
/// A single side to move gets a unique number.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ZobristTable {
    piece_hash: [[HashKind; NUM_SQUARES]; NUM_PIECES],
    castling_hash: [HashKind; Castling::ENUMERATIONS],
    player_hash: HashKind,
}

impl ZobristTable {
    /// Hashing the player key only when Black is to move lets a single XOR
    /// toggle the side between successive positions.
    const TOGGLE_PLAYER: Color = Color::Black;

    /// Returns a new ZobristTable with unique values generated from a seeded rng.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Returns a new ZobristTable with unique values generated from rng.
    fn with_rng(mut rng: StdRng) -> Self {
        // Ensure there are no duplicate keys in the table.
        let mut used_values = HashSet::new();

        let mut piece_hash = [[HashKind::default(); NUM_SQUARES]; NUM_PIECES];
        let mut castling_hash = [HashKind::default(); Castling::ENUMERATIONS];
        let mut player_hash = HashKind::default();

        for item in piece_hash
            .iter_mut()
            .flatten()
            .chain(castling_hash.iter_mut())
            .chain(std::iter::once(&mut player_hash))
        {
            // insert returns false if the value was already in the set.
            // Loop until a unique value is found.
            let mut new_unique_value: HashKind = rng.gen();
            while !used_values.insert(new_unique_value) {
                new_unique_value = rng.gen();
            }
            *item = new_unique_value;
        }

        Self {
            piece_hash,
            castling_hash,
            player_hash,
        }
    }

    /// Generate the hash of a board, side to move, and castling rights.
    pub fn generate_hash(
        &self,
        pieces: &PieceSets,
        side_to_move: Color,
        castling: Castling,
    ) -> HashKind {
        let mut hash = HashKind::default();

        // For each piece on the board, xor its key into the hash.
        for color in Color::iter() {
            for kind in PieceKind::iter() {
                let piece = Piece::new(color, kind);
                for square in pieces[piece] {
                    hash ^= self[(piece, square)];
                }
            }
        }

        // Hash castling rights. Every enumeration, even none, has a key.
        hash ^= self[castling];

        if side_to_move == Self::TOGGLE_PLAYER {
            hash ^= self.player_hash;
        }

        hash
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::with_seed(TABLE_SEED)
    }
}

/// Index used for accessing piece keys.
impl Index<(Piece, Square)> for ZobristTable {
    type Output = HashKind;
    fn index(&self, (piece, square): (Piece, Square)) -> &Self::Output {
        &self.piece_hash[piece.offset()][square.idx()]
    }
}

/// Index used for accessing castling keys.
impl Index<Castling> for ZobristTable {
    type Output = HashKind;
    fn index(&self, castling: Castling) -> &Self::Output {
        &self.castling_hash[castling.bits() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_tables_are_identical() {
        let a = ZobristTable::with_seed(42);
        let b = ZobristTable::with_seed(42);
        assert_eq!(a, b);

        let c = ZobristTable::with_seed(43);
        assert_ne!(a, c);
    }

    #[test]
    fn hash_is_stable_for_equal_inputs() {
        let table = ZobristTable::with_seed(7);
        let sets = PieceSets::start_position();
        let first = table.generate_hash(&sets, Color::White, Castling::ALL);
        let second = table.generate_hash(&sets, Color::White, Castling::ALL);
        assert_eq!(first, second);
    }

    #[test]
    fn hash_depends_on_every_component() {
        let table = ZobristTable::with_seed(7);
        let sets = PieceSets::start_position();
        let base = table.generate_hash(&sets, Color::White, Castling::ALL);

        let black_to_move = table.generate_hash(&sets, Color::Black, Castling::ALL);
        assert_ne!(base, black_to_move);

        let no_rights = table.generate_hash(&sets, Color::White, Castling::NONE);
        assert_ne!(base, no_rights);

        let mut moved = sets;
        moved[(Color::White, PieceKind::Pawn)].clear_square(Square::E2);
        moved[(Color::White, PieceKind::Pawn)].set_square(Square::E4);
        let pushed = table.generate_hash(&moved, Color::White, Castling::ALL);
        assert_ne!(base, pushed);
    }
}
