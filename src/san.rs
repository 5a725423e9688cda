//! Standard Algebraic Notation parsing and move resolution.
//!
//! ```text
//! move      := moveDesc ('+' | '#')?
//! moveDesc  := castle | ordinary
//! castle    := 'O-O' | 'O-O-O'
//! ordinary  := pieceKind? source? 'x'? destination promo?
//! pieceKind := 'N' | 'B' | 'R' | 'Q' | 'K'
//! source    := FILE | RANK | square
//! promo     := '=' pieceKind
//! square    := FILE RANK
//! FILE      := [a-h]   RANK := [1-8]
//! ```
//!
//! A missing pieceKind means Pawn. A missing source must be uniquely
//! inferable from the position. The '+'/'#' suffix is accepted but not
//! validated against the resulting position.

use crate::coretypes::{CastleSide, File, Move, PieceKind, Rank, Square};
use crate::error::SanError;
use crate::position::Position;

impl Position {
    /// Parses a SAN string and binds it to a move in this position.
    ///
    /// The returned move is resolved by movement possibility only; it may
    /// still fail `apply`, for example when it would expose the king.
    pub fn san_move(&self, text: &str) -> Result<Move, SanError> {
        resolve(self, parse(text)?)
    }
}

/// The parsed pieces of one SAN production, before binding to a position.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct SanDesc {
    kind: PieceKind,
    source_file: Option<File>,
    source_rank: Option<Rank>,
    capture: bool,
    destination: Option<Square>,
    promotion: Option<PieceKind>,
    castle: Option<CastleSide>,
}

fn parse(text: &str) -> Result<SanDesc, SanError> {
    // At most one check or checkmate suffix; it carries no information here.
    let text = text
        .strip_suffix(|ch| ch == '+' || ch == '#')
        .unwrap_or(text);
    if text.is_empty() {
        return Err(SanError::Parse);
    }

    if let Some(side) = match text {
        "O-O" => Some(CastleSide::Kingside),
        "O-O-O" => Some(CastleSide::Queenside),
        _ => None,
    } {
        return Ok(SanDesc {
            kind: PieceKind::King,
            source_file: None,
            source_rank: None,
            capture: false,
            destination: None,
            promotion: None,
            castle: Some(side),
        });
    }

    let mut chars: Vec<char> = text.chars().collect();

    // promo := '=' pieceKind, at the very end. Promotion to a pawn or king
    // would violate the move model, so both are grammar errors.
    let mut promotion = None;
    if chars.len() >= 2 && chars[chars.len() - 2] == '=' {
        let kind = piece_kind_from_char(chars[chars.len() - 1]).ok_or(SanError::Parse)?;
        if !kind.is_promotion_target() {
            return Err(SanError::Parse);
        }
        promotion = Some(kind);
        chars.truncate(chars.len() - 2);
    }

    // The destination square is the final FILE RANK pair.
    let rank_ch = chars.pop().ok_or(SanError::Parse)?;
    let file_ch = chars.pop().ok_or(SanError::Parse)?;
    let destination = Square::from((File::try_from(file_ch)?, Rank::try_from(rank_ch)?));

    // Optional leading piece kind; absence means Pawn.
    let mut rest: &[char] = &chars;
    let kind = match rest.first().copied().and_then(piece_kind_from_char) {
        Some(kind) => {
            rest = &rest[1..];
            kind
        }
        None => PieceKind::Pawn,
    };

    // Optional 'x' directly before the destination.
    let capture = rest.last() == Some(&'x');
    if capture {
        rest = &rest[..rest.len() - 1];
    }

    // Whatever remains is the source disambiguator.
    let (source_file, source_rank) = match rest {
        [] => (None, None),
        [ch] if ch.is_ascii_digit() => (None, Some(Rank::try_from(*ch)?)),
        [ch] => (Some(File::try_from(*ch)?), None),
        [file, rank] => (Some(File::try_from(*file)?), Some(Rank::try_from(*rank)?)),
        _ => return Err(SanError::Parse),
    };

    Ok(SanDesc {
        kind,
        source_file,
        source_rank,
        capture,
        destination: Some(destination),
        promotion,
        castle: None,
    })
}

/// Binds a parsed description to this position's board.
///
/// Candidate sources are the active side's squares holding the declared
/// kind, narrowed by the disambiguator, then narrowed to squares with a
/// possible move onto the destination. Exactly one candidate must remain.
fn resolve(position: &Position, desc: SanDesc) -> Result<Move, SanError> {
    if let Some(side) = desc.castle {
        return Ok(Move::castle(side, position.active_side()));
    }
    let destination = desc.destination.ok_or(SanError::Parse)?;

    let mut candidates = position.pieces[(position.active_side(), desc.kind)];
    if let Some(file) = desc.source_file {
        candidates &= file.into();
    }
    if let Some(rank) = desc.source_rank {
        candidates &= rank.into();
    }

    let mut sources = candidates
        .into_iter()
        .filter(|&source| position.is_move_possible(source, destination));
    let source = sources.next().ok_or(SanError::NoSuchMove)?;
    if sources.next().is_some() {
        return Err(SanError::AmbiguousMove);
    }

    let move_ = Move::new(source, destination, desc.promotion);
    Ok(match desc.capture {
        true => move_.with_capture(true),
        false => move_,
    })
}

const fn piece_kind_from_char(ch: char) -> Option<PieceKind> {
    match ch {
        'N' => Some(PieceKind::Knight),
        'B' => Some(PieceKind::Bishop),
        'R' => Some(PieceKind::Rook),
        'Q' => Some(PieceKind::Queen),
        'K' => Some(PieceKind::King),
        _ => None,
    }
}
