//! Iterative deepening search.
//!
//! Runs alpha-beta at depths 1, 2, ... max_depth from the root with full
//! windows, keeping the deepest completed result. The transposition table is
//! never cleared between iterations, so deeper iterations reuse shallower
//! cached subtrees. Cancellation between iterations is the caller's concern:
//! each completed depth stands on its own.

use std::time::Instant;

use log::debug;

use crate::error::SearchError;
use crate::position::Position;
use crate::search::{alpha_beta, SearchResult, SearchTable};

/// Searches the game tree by iterative deepening up to `max_depth`.
///
/// Node and time totals cover all iterations; the move, score, and depth are
/// those of the deepest completed iteration.
pub fn ids(
    position: &Position,
    max_depth: u8,
    table: &mut SearchTable,
) -> Result<SearchResult, SearchError> {
    if max_depth == 0 {
        return Err(SearchError::ZeroDepth);
    }
    let instant = Instant::now();

    let mut result = alpha_beta(position, 1, table)?;
    let mut total_nodes = result.nodes;
    debug!("ids depth 1: {}", result);

    for depth in 2..=max_depth {
        result = alpha_beta(position, depth, table)?;
        total_nodes += result.nodes;
        debug!("ids depth {}: {}", depth, result);
    }

    result.nodes = total_nodes;
    result.elapsed = instant.elapsed();
    Ok(result)
}
