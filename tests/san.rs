//! SAN parsing and disambiguation integration tests.

use skewer::coretypes::{CastleSide, Color::*, Move, PieceKind::*, Square::*};
use skewer::error::SanError;
use skewer::*;

/// Plays a sequence of SAN moves from the starting position.
fn play(sans: &[&str]) -> Position {
    let mut position = Position::start();
    for san in sans {
        let move_ = position
            .san_move(san)
            .unwrap_or_else(|err| panic!("{}: {}", san, err));
        position = position
            .apply(move_)
            .unwrap_or_else(|err| panic!("{}: {}", san, err));
    }
    position
}

#[test]
fn plays_an_opening_line() {
    let position = play(&["e4", "c5", "Nf3", "d6", "d4", "cxd4", "Nxd4", "Nf6", "Nc3"]);
    // Open Sicilian shape: White knights on d4 and c3.
    assert_eq!(position.piece_on(D4).map(|p| p.kind()), Some(Knight));
    assert_eq!(position.piece_on(C3).map(|p| p.kind()), Some(Knight));
    assert_eq!(position.piece_on(F6).map(|p| p.kind()), Some(Knight));
    assert_eq!(position.active_side(), Black);
}

#[test]
fn pawn_capture_requires_the_file_letter() {
    let position = play(&["e4", "d5"]);
    let capture = position.san_move("exd5").unwrap();
    assert_eq!(capture, Move::new(E4, D5, None));
    assert_eq!(capture.capture(), Some(true));
    // Source inference runs on movement possibility alone, so the bare
    // destination still resolves to the only pawn that can reach d5; it
    // just carries no capture token.
    let bare = position.san_move("d5").unwrap();
    assert_eq!(bare, Move::new(E4, D5, None));
    assert_eq!(bare.capture(), None);
}

#[test]
fn capture_flag_survives_through_apply() {
    let position = play(&["e4", "d5"]);
    let capture = position.san_move("exd5").unwrap();
    let next = position.apply(capture).unwrap();
    assert_eq!(next.piece_on(D5).map(|p| p.kind()), Some(Pawn));
    assert_eq!(next.halfmoves(), 0);
}

#[test]
fn knight_disambiguation_in_play() {
    // Two white knights both reach d2.
    let position = Position::parse_fen("4k3/8/8/8/8/5N2/8/1N2K3 w - - 0 1").unwrap();
    assert_eq!(position.san_move("Nd2"), Err(SanError::AmbiguousMove));
    assert_eq!(position.san_move("Nbd2").unwrap(), Move::new(B1, D2, None));
    assert_eq!(position.san_move("Nfd2").unwrap(), Move::new(F3, D2, None));
    assert_eq!(position.san_move("N1d2").unwrap(), Move::new(B1, D2, None));
    assert_eq!(position.san_move("N3d2").unwrap(), Move::new(F3, D2, None));
    assert_eq!(
        position.san_move("Nb1d2").unwrap(),
        Move::new(B1, D2, None)
    );
}

#[test]
fn castling_through_san() {
    let position = play(&["e4", "e5", "Nf3", "Nf6", "Bc4", "Bc5"]);
    let castle = position.san_move("O-O").unwrap();
    assert_eq!(castle, Move::castle(CastleSide::Kingside, White));
    let castled = position.apply(castle).unwrap();
    assert_eq!(castled.piece_on(G1).map(|p| p.kind()), Some(King));

    // Black can then castle too.
    let black_castle = castled.san_move("O-O").unwrap();
    assert_eq!(black_castle, Move::castle(CastleSide::Kingside, Black));
    assert!(castled.apply(black_castle).is_ok());
}

#[test]
fn promotion_with_capture_and_check_suffix() {
    let position = Position::parse_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    // Straight promotion.
    let push = position.san_move("a8=Q+").unwrap();
    assert_eq!(push, Move::new(A7, A8, Some(Queen)));
    // Capturing promotion onto b8.
    let take = position.san_move("axb8=N").unwrap();
    assert_eq!(take, Move::new(A7, B8, Some(Knight)));
    assert_eq!(take.capture(), Some(true));
    let next = position.apply(take).unwrap();
    assert_eq!(next.piece_on(B8), Some(Piece::new(White, Knight)));
}

#[test]
fn resolved_moves_can_still_fail_apply() {
    // The d2 pawn is pinned against the king by the bishop on a5.
    let position = Position::parse_fen("7k/8/8/b7/8/8/3P4/4K3 w - - 0 1").unwrap();
    let move_ = position.san_move("d3").unwrap();
    assert_eq!(move_, Move::new(D2, D3, None));
    assert!(position.apply(move_).is_err());
}

#[test]
fn empty_and_garbage_inputs_are_parse_errors() {
    let start = Position::start();
    for bad in ["", " ", "+", "#", "e", "99", "xx", "Ke9", "O-", "e2e4e6"] {
        assert_eq!(start.san_move(bad), Err(SanError::Parse), "input {:?}", bad);
    }
}
