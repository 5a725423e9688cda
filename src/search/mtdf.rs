//! MTD(f): Memory-enhanced Test Driver.
//!
//! Converges on the minimax value of the root by repeated zero-window
//! alpha-beta calls that shrink an (upper, lower) envelope around a guess.
//! Each zero-window sweep revisits mostly the same subtrees, so the shared
//! transposition table is what makes the driver cheap.

use std::time::Instant;

use log::trace;

use crate::coretypes::Cp;
use crate::error::SearchError;
use crate::position::Position;
use crate::search::{alpha_beta_windowed, SearchResult, SearchTable};

/// MTD(f) to a fixed depth with a first guess of zero.
pub fn mtdf(
    position: &Position,
    depth: u8,
    table: &mut SearchTable,
) -> Result<SearchResult, SearchError> {
    mtdf_with_guess(position, depth, Cp(0), table)
}

/// MTD(f) to a fixed depth, starting from a caller-supplied guess.
///
/// A guess near the true value converges in fewer sweeps; iterative
/// deepening feeds the previous depth's score (see [`ids_mtdf`]).
pub fn mtdf_with_guess(
    position: &Position,
    depth: u8,
    first_guess: Cp,
    table: &mut SearchTable,
) -> Result<SearchResult, SearchError> {
    if depth == 0 {
        return Err(SearchError::ZeroDepth);
    }
    let instant = Instant::now();

    let mut guess = first_guess;
    let mut lower = Cp::MIN;
    let mut upper = Cp::MAX;
    let mut total_nodes = 0;

    loop {
        // Probe with a null window directly below beta.
        let beta = match guess == lower {
            true => guess + Cp(1),
            false => guess,
        };
        let probe = alpha_beta_windowed(position, depth, beta - Cp(1), beta, table)?;
        total_nodes += probe.nodes;
        guess = probe.score;
        trace!("mtdf probe beta {}: {}", beta, probe);

        if guess < beta {
            upper = guess;
        } else {
            lower = guess;
        }
        if lower >= upper {
            let mut result = probe;
            result.nodes = total_nodes;
            result.elapsed = instant.elapsed();
            return Ok(result);
        }
    }
}

/// Iterative deepening driven by MTD(f): each depth seeds the next sweep
/// with the score of the previous one.
pub fn ids_mtdf(
    position: &Position,
    max_depth: u8,
    table: &mut SearchTable,
) -> Result<SearchResult, SearchError> {
    if max_depth == 0 {
        return Err(SearchError::ZeroDepth);
    }
    let instant = Instant::now();

    let mut result = mtdf_with_guess(position, 1, Cp(0), table)?;
    let mut total_nodes = result.nodes;

    for depth in 2..=max_depth {
        let deeper = mtdf_with_guess(position, depth, result.score, table)?;
        total_nodes += deeper.nodes;
        result = deeper;
    }

    result.nodes = total_nodes;
    result.elapsed = instant.elapsed();
    Ok(result)
}
