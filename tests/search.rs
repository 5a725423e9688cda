//! Search driver laws.
//!
//! Alpha-beta must agree with plain minimax, MTD(f) must agree with
//! alpha-beta, and a transposition table of any size must never change the
//! score of a fixed-depth search from a fixed root.

use skewer::coretypes::{Color::*, Cp, Move, Square::*};
use skewer::error::SearchError;
use skewer::eval;
use skewer::search::{alpha_beta, ids, ids_mtdf, mtdf, search_table, SearchTable};
use skewer::*;

/// Minimax with no pruning and no table: the reference the drivers must match.
fn minimax(position: &Position, depth: u8) -> Cp {
    if depth == 0 {
        return eval::evaluate(position);
    }
    let children: Vec<Position> = position.successors().map(|(_, child)| child).collect();
    if children.is_empty() {
        return eval::terminal(position);
    }
    let scores = children.iter().map(|child| minimax(child, depth - 1));
    let best = match position.active_side() {
        White => scores.max(),
        Black => scores.min(),
    };
    best.unwrap_or_else(|| eval::terminal(position))
}

const FIXTURES: [&str; 4] = [
    // Sparse endgames keep the reference minimax cheap.
    "q3k3/8/8/8/8/8/8/Q3K3 w - - 0 1",
    "4k3/8/8/3N4/8/2b5/8/4K3 b - - 0 1",
    "8/1p3Pkp/p5p1/8/3q4/1P4Q1/5PPP/r4RK1 b - - 0 33",
    "6k1/R7/1R6/8/8/8/8/6K1 w - - 0 1",
];

#[test]
fn alpha_beta_equals_minimax() {
    for fen in FIXTURES {
        let position = Position::parse_fen(fen).unwrap();
        for depth in 1..=3u8 {
            let expected = minimax(&position, depth);
            let mut table = search_table();
            let result = alpha_beta(&position, depth, &mut table).unwrap();
            assert_eq!(result.score, expected, "fen {} depth {}", fen, depth);
        }
    }
}

#[test]
fn mtdf_equals_alpha_beta() {
    for fen in FIXTURES {
        let position = Position::parse_fen(fen).unwrap();
        for depth in 1..=3u8 {
            let mut ab_table = search_table();
            let ab = alpha_beta(&position, depth, &mut ab_table).unwrap();
            let mut mtdf_table = search_table();
            let converged = mtdf(&position, depth, &mut mtdf_table).unwrap();
            assert_eq!(converged.score, ab.score, "fen {} depth {}", fen, depth);
        }
    }
}

#[test]
fn table_size_never_changes_the_score() {
    for fen in FIXTURES {
        let position = Position::parse_fen(fen).unwrap();
        let mut tiny = SearchTable::with_capacity(1);
        let mut small = SearchTable::with_capacity(64);
        let mut large = search_table();
        let with_tiny = alpha_beta(&position, 3, &mut tiny).unwrap();
        let with_small = alpha_beta(&position, 3, &mut small).unwrap();
        let with_large = alpha_beta(&position, 3, &mut large).unwrap();
        assert_eq!(with_tiny.score, with_small.score, "fen {}", fen);
        assert_eq!(with_small.score, with_large.score, "fen {}", fen);
    }
}

#[test]
fn reusing_a_table_across_searches_is_transparent() {
    let position = Position::parse_fen(FIXTURES[2]).unwrap();
    let mut fresh = search_table();
    let expected = alpha_beta(&position, 3, &mut fresh).unwrap().score;

    // A table warmed by shallower and repeated searches returns the same score.
    let mut warmed = search_table();
    for _ in 0..2 {
        for depth in 1..=3u8 {
            let result = alpha_beta(&position, depth, &mut warmed).unwrap();
            if depth == 3 {
                assert_eq!(result.score, expected);
            }
        }
    }
}

#[test]
fn ids_finds_the_fools_mate_defense() {
    // After 1.f3 e5 2.g4, Black mates with Qh4.
    let mut position = Position::start();
    for san in ["f3", "e5", "g4"] {
        let move_ = position.san_move(san).unwrap();
        position = position.apply(move_).unwrap();
    }
    let mut table = search_table();
    let result = ids(&position, 2, &mut table).unwrap();
    assert_eq!(result.best_move, Move::new(D8, H4, None));
    assert_eq!(result.score, -eval::INFINITY);
    assert_eq!(result.leading(), Some(Black));
}

#[test]
fn searching_a_finished_game_is_a_caller_error() {
    let mate = Position::parse_fen(
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    )
    .unwrap();
    let stale = Position::parse_fen("8/8/8/8/8/8/5kr1/7K w - - 0 1").unwrap();

    type Driver =
        fn(&Position, u8, &mut SearchTable) -> std::result::Result<SearchResult, SearchError>;
    let drivers: [Driver; 4] = [alpha_beta, mtdf, ids, ids_mtdf];

    let mut table = search_table();
    for driver in drivers {
        assert_eq!(
            driver(&mate, 3, &mut table).unwrap_err(),
            SearchError::TerminalRoot
        );
        assert_eq!(
            driver(&stale, 3, &mut table).unwrap_err(),
            SearchError::TerminalRoot
        );
        assert_eq!(
            driver(&Position::start(), 0, &mut table).unwrap_err(),
            SearchError::ZeroDepth
        );
    }
}

#[test]
fn drivers_agree_on_a_middlegame_position() {
    let position =
        Position::parse_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
            .unwrap();
    let depth = 3;

    let mut table = search_table();
    let ab = alpha_beta(&position, depth, &mut table).unwrap();
    let mut table = search_table();
    let deepened = ids(&position, depth, &mut table).unwrap();
    let mut table = search_table();
    let converged = mtdf(&position, depth, &mut table).unwrap();
    let mut table = search_table();
    let combined = ids_mtdf(&position, depth, &mut table).unwrap();

    assert_eq!(ab.score, deepened.score);
    assert_eq!(ab.score, converged.score);
    assert_eq!(ab.score, combined.score);

    // Relative scores flip sign with the viewpoint.
    assert_eq!(ab.relative_score(White), ab.score);
    assert_eq!(ab.relative_score(Black), -ab.score);
}
