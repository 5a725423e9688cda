//! Position, move generation, and FEN integration tests.
//!
//! These exercise full games of the public API: parsing, applying, and
//! interrogating positions the way a front-end would.

use skewer::coretypes::{CastleSide, Color::*, Move, PieceKind::*, Square::*};
use skewer::error::MoveError;
use skewer::fen::START_POSITION_FEN;
use skewer::*;

#[test]
fn start_position_parses_byte_for_byte() {
    let parsed = Position::parse_fen(START_POSITION_FEN).unwrap();
    assert_eq!(parsed, Position::start());
    assert_eq!(parsed.to_fen(), START_POSITION_FEN);
    assert_eq!(parsed.hash(), Position::start().hash());
}

#[test]
fn twenty_legal_moves_at_the_start() {
    let start = Position::start();
    let moves: Vec<Move> = start.legal_moves().collect();
    assert_eq!(moves.len(), 20);

    // 16 pawn moves and 4 knight moves, nothing else.
    let pawn_moves = moves
        .iter()
        .filter(|m| start.piece_on(m.from()).map(|p| p.kind()) == Some(Pawn))
        .count();
    assert_eq!(pawn_moves, 16);
    let knight_moves = moves
        .iter()
        .filter(|m| start.piece_on(m.from()).map(|p| p.kind()) == Some(Knight))
        .count();
    assert_eq!(knight_moves, 4);
}

#[test]
fn san_e4_advances_the_king_pawn() {
    let start = Position::start();
    let move_ = start.san_move("e4").unwrap();
    assert_eq!(move_, Move::new(E2, E4, None));

    let next = start.apply(move_).unwrap();
    assert_eq!(next.piece_on(E4).map(|p| p.kind()), Some(Pawn));
    assert_eq!(next.piece_on(E2), None);
    assert_eq!(next.halfmoves(), 0);
    assert_eq!(next.fullmoves(), 1);
    assert_eq!(next.active_side(), Black);
}

#[test]
fn fools_mate_ends_the_game() {
    let mut position = Position::start();
    for san in ["f3", "e5", "g4", "Qh4"] {
        let move_ = position.san_move(san).unwrap();
        position = position.apply(move_).unwrap();
    }
    assert!(position.is_checkmate());
    assert!(position.is_terminal());
    assert!(!position.is_stalemate());
    // White is the mated side.
    assert_eq!(position.active_side(), White);
    assert!(position.is_check());
    assert_eq!(position.legal_moves().count(), 0);
}

#[test]
fn double_advance_from_home_rank_only() {
    let position = Position::parse_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
    let moves: Vec<Move> = position.legal_moves().collect();
    assert!(moves.contains(&Move::new(E2, E4, None)));

    // March the pawn forward one square; it may never double-advance again.
    let position = position.apply(Move::new(E2, E3, None)).unwrap();
    let position = position.apply(Move::new(E8, D8, None)).unwrap();
    let moves: Vec<Move> = position.legal_moves().collect();
    assert!(moves.contains(&Move::new(E3, E4, None)));
    assert!(!moves.contains(&Move::new(E3, E5, None)));
    assert_eq!(
        position.apply(Move::new(E3, E5, None)),
        Err(MoveError::IllegalGeometry)
    );
}

#[test]
fn castling_scenario_both_wings() {
    let position = Position::parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let moves: Vec<Move> = position.legal_moves().collect();
    assert!(moves.contains(&Move::castle(CastleSide::Kingside, White)));
    assert!(moves.contains(&Move::castle(CastleSide::Queenside, White)));

    let short = position.san_move("O-O").unwrap();
    let castled = position.apply(short).unwrap();
    assert_eq!(castled.piece_on(G1).map(|p| p.kind()), Some(King));
    assert_eq!(castled.piece_on(F1).map(|p| p.kind()), Some(Rook));
    assert!(!castled.player(White).can_castle_kingside());
    assert!(!castled.player(White).can_castle_queenside());

    // Queenside from the same root.
    let long = position.apply(Move::castle(CastleSide::Queenside, White)).unwrap();
    assert_eq!(long.piece_on(C1).map(|p| p.kind()), Some(King));
    assert_eq!(long.piece_on(D1).map(|p| p.kind()), Some(Rook));
}

#[test]
fn stalemate_is_terminal_without_check() {
    let position = Position::parse_fen("8/8/8/8/8/8/5kr1/7K w - - 0 1").unwrap();
    assert!(position.is_stalemate());
    assert!(position.is_terminal());
    assert!(!position.is_check());
    assert!(!position.is_checkmate());
    assert_eq!(position.legal_moves().count(), 0);
}

#[test]
fn every_legal_move_applies_and_flips_the_side() {
    let fens = [
        START_POSITION_FEN,
        "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        "8/1p3Pkp/p5p1/8/3q4/1P4Q1/5PPP/r4RK1 b - - 0 33",
    ];
    for fen in fens {
        let position = Position::parse_fen(fen).unwrap();
        for move_ in position.legal_moves() {
            let next = position.apply(move_).expect("legal move must apply");
            assert_eq!(next.active_side(), position.opposing_side());
        }
    }
}

#[test]
fn illegal_moves_always_fail() {
    let position = Position::parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let legal: Vec<Move> = position.legal_moves().collect();

    // Sample the full move space: everything outside legal_moves is rejected.
    for from in skewer::coretypes::Square::iter() {
        for to in skewer::coretypes::Square::iter() {
            let move_ = Move::new(from, to, None);
            if legal.contains(&move_) {
                assert!(position.apply(move_).is_ok());
            } else {
                assert!(position.apply(move_).is_err());
            }
        }
    }
}

#[test]
fn fen_round_trips_through_play() {
    let mut position = Position::start();
    for san in ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Bxc6", "dxc6", "O-O"] {
        let move_ = position.san_move(san).unwrap();
        position = position.apply(move_).unwrap();

        let fen = position.to_fen();
        let reparsed = Position::parse_fen(&fen).unwrap();
        assert_eq!(position, reparsed);
        assert_eq!(position.hash(), reparsed.hash());
    }
    // The Ruy exchange line left White castled and Black's pawns doubled.
    assert_eq!(position.piece_on(G1).map(|p| p.kind()), Some(King));
    assert_eq!(position.piece_on(C6).map(|p| p.kind()), Some(Pawn));
}

#[test]
fn hashes_collide_only_for_equal_boards() {
    let start = Position::start();
    let e4 = start.apply(Move::new(E2, E4, None)).unwrap();
    let d4 = start.apply(Move::new(D2, D4, None)).unwrap();
    assert_ne!(start.hash(), e4.hash());
    assert_ne!(e4.hash(), d4.hash());

    // Transposing move orders reach the same hash.
    let via_e4 = e4
        .apply(Move::new(E7, E5, None))
        .and_then(|p| p.apply(Move::new(D2, D4, None)))
        .unwrap();
    let via_d4 = d4
        .apply(Move::new(E7, E5, None))
        .and_then(|p| p.apply(Move::new(E2, E4, None)))
        .unwrap();
    assert_eq!(via_e4.hash(), via_d4.hash());
}

#[test]
fn player_view_reports_occupancy_and_king() {
    let position = Position::parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let white = position.player(White);
    assert_eq!(white.occupied().count_squares(), 3);
    assert_eq!(white.king_square(), Some(E1));
    assert!(white.can_castle_kingside());

    let black = position.player(Black);
    assert_eq!(black.occupied().count_squares(), 3);
    assert_eq!(black.king_square(), Some(E8));
}
