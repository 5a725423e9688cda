//! Search drivers.
//!
//! Three drivers share one alpha-beta core and one transposition table:
//! fixed-depth alpha-beta, iterative deepening, and MTD(f). Scores are
//! absolute, with White as the maxing player, so results compare directly
//! across drivers and depths.

mod alpha_beta;
mod ids;
mod mtdf;

pub use alpha_beta::*;
pub use ids::*;
pub use mtdf::*;

use std::fmt::{self, Display};
use std::time::Duration;

use crate::coretypes::{Color, Cp, Move};
use crate::transposition::TranspositionTable;

/// Default capacity of a search table, in entries.
pub const DEFAULT_TABLE_CAPACITY: usize = 1 << 18;

/// How a cached score relates to the true value of its node.
///
/// A node searched to completion inside its window caches an exact score.
/// A node that failed high caches a lower bound; one that failed low caches
/// an upper bound. Probes only short-circuit on exact entries, bounds merely
/// narrow the window.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Bound {
    #[default]
    Exact,
    Lower,
    Upper,
}

/// One cached search result, keyed by position hash in the table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct TableEntry {
    /// Absolute score of the node's subtree.
    pub score: Cp,
    /// Remaining depth the subtree was searched to.
    pub depth: u8,
    /// How `score` bounds the true value.
    pub bound: Bound,
}

/// The transposition table type shared by all search drivers.
pub type SearchTable = TranspositionTable<TableEntry>;

/// Returns a search table with the default capacity.
pub fn search_table() -> SearchTable {
    SearchTable::with_capacity(DEFAULT_TABLE_CAPACITY)
}

/// The results found from running a search on some root position.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SearchResult {
    /// The best move found for the root position.
    pub best_move: Move,
    /// The absolute centipawn score of making the best move (+White, -Black).
    pub score: Cp,
    /// Depth the root was searched to.
    pub depth: u8,
    /// Total number of nodes visited.
    pub nodes: u64,
    /// Wall-clock time from the start to the end of the search.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Converts the score into one relative to the given player.
    pub fn relative_score(&self, player: Color) -> Cp {
        self.score * player.sign()
    }

    /// Returns the color leading at the root, or None if dead even.
    pub fn leading(&self) -> Option<Color> {
        match self.score.signum() {
            1 => Some(Color::White),
            -1 => Some(Color::Black),
            _ => None,
        }
    }
}

impl Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "best {} score {} depth {} nodes {} elapsed {}.{:03}s",
            self.best_move,
            self.score,
            self.depth,
            self.nodes,
            self.elapsed.as_secs(),
            self.elapsed.subsec_millis(),
        )
    }
}
