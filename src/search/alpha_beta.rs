//! Minimax with alpha-beta pruning.
//!
//! The driver keeps two absolute scores: White maximizes, Black minimizes.
//! Cached results narrow or short-circuit repeated subtrees; probes only
//! trust entries searched to the same remaining depth, so a table never
//! changes the score a fixed-depth full-window search returns.

use std::cmp;
use std::time::Instant;

use crate::coretypes::Color::*;
use crate::coretypes::{Cp, Move};
use crate::error::SearchError;
use crate::eval;
use crate::position::Position;
use crate::search::{Bound, SearchResult, SearchTable, TableEntry};

/// Fixed-depth alpha-beta over the full window.
///
/// Searching a terminal root or to depth zero is a caller error, reported
/// distinctly so it is never confused with a mate score.
pub fn alpha_beta(
    position: &Position,
    depth: u8,
    table: &mut SearchTable,
) -> Result<SearchResult, SearchError> {
    alpha_beta_windowed(position, depth, Cp::MIN, Cp::MAX, table)
}

/// Fixed-depth alpha-beta inside an (alpha, beta) feasibility window.
/// The root additionally records which move produced the returned score.
pub fn alpha_beta_windowed(
    position: &Position,
    depth: u8,
    alpha: Cp,
    beta: Cp,
    table: &mut SearchTable,
) -> Result<SearchResult, SearchError> {
    if depth == 0 {
        return Err(SearchError::ZeroDepth);
    }
    let instant = Instant::now();
    let successors: Vec<(Move, Position)> = position.successors().collect();
    if successors.is_empty() {
        return Err(SearchError::TerminalRoot);
    }

    let mut nodes: u64 = 1;
    let (alpha_orig, beta_orig) = (alpha, beta);
    let (mut alpha, mut beta) = (alpha, beta);
    let maxing = position.active_side() == White;

    let mut best_move = successors[0].0;
    let mut best_score = match maxing {
        true => Cp::MIN,
        false => Cp::MAX,
    };
    for &(move_, ref child) in &successors {
        let score = alpha_beta_impl(child, depth - 1, alpha, beta, table, &mut nodes);
        if maxing {
            if score > best_score {
                best_score = score;
                best_move = move_;
            }
            alpha = cmp::max(alpha, best_score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = move_;
            }
            beta = cmp::min(beta, best_score);
        }
        if alpha >= beta {
            break;
        }
    }

    table.add(
        position.hash(),
        TableEntry {
            score: best_score,
            depth,
            bound: bound_for(best_score, alpha_orig, beta_orig),
        },
    );

    Ok(SearchResult {
        best_move,
        score: best_score,
        depth,
        nodes,
        elapsed: instant.elapsed(),
    })
}

/// The recursive alpha-beta core shared by every driver.
fn alpha_beta_impl(
    position: &Position,
    depth: u8,
    mut alpha: Cp,
    mut beta: Cp,
    table: &mut SearchTable,
    nodes: &mut u64,
) -> Cp {
    *nodes += 1;

    if depth == 0 {
        return eval::evaluate(position);
    }

    // Probe before expanding. Entries from a matching remaining depth
    // short-circuit when exact and tighten the window otherwise.
    if let Some(&entry) = table.get(position.hash()) {
        if entry.depth == depth {
            match entry.bound {
                Bound::Exact => return entry.score,
                Bound::Lower => alpha = cmp::max(alpha, entry.score),
                Bound::Upper => beta = cmp::min(beta, entry.score),
            }
            if alpha >= beta {
                return entry.score;
            }
        }
    }

    let successors: Vec<(Move, Position)> = position.successors().collect();
    if successors.is_empty() {
        return eval::terminal(position);
    }

    let (alpha_orig, beta_orig) = (alpha, beta);
    let maxing = position.active_side() == White;
    let mut best = match maxing {
        true => Cp::MIN,
        false => Cp::MAX,
    };
    for (_, child) in &successors {
        let score = alpha_beta_impl(child, depth - 1, alpha, beta, table, nodes);
        if maxing {
            best = cmp::max(best, score);
            alpha = cmp::max(alpha, best);
        } else {
            best = cmp::min(best, score);
            beta = cmp::min(beta, best);
        }
        if alpha >= beta {
            break;
        }
    }

    table.add(
        position.hash(),
        TableEntry {
            score: best,
            depth,
            bound: bound_for(best, alpha_orig, beta_orig),
        },
    );
    best
}

/// Classifies a fail-soft result against the window it was searched in.
fn bound_for(score: Cp, alpha: Cp, beta: Cp) -> Bound {
    if score <= alpha {
        Bound::Upper
    } else if score >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    }
}
