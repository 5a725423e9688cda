//! Forsyth-Edwards Notation parsing and formatting.
//!
//! FEN ::=
//!       Piece Placement
//!   ' ' Side to move
//!   ' ' Castling ability
//!   ' ' En passant target square
//!   ' ' Halfmove clock
//!   ' ' Fullmove counter
//!
//! Exactly six fields are required. The en passant target is stored on the
//! parsed position so formatting round-trips, but the engine never acts on it.

use std::str::FromStr;

use crate::boardrepr::PieceSets;
use crate::coretypes::{Castling, Color, MoveCount, Piece, Rank, Square, NUM_FILES};
use crate::error::InvalidFen;
use crate::position::Position;

/// The standard chess starting position.
pub const START_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Types implementing Fen can round-trip through Forsyth-Edwards Notation.
pub trait Fen: Sized {
    /// Parse a FEN string, validating each of its six fields.
    fn parse_fen(fen: &str) -> Result<Self, InvalidFen>;

    /// Format self as a FEN string. `parse_fen(x.to_fen())` reproduces `x`.
    fn to_fen(&self) -> String;
}

impl Fen for Position {
    fn parse_fen(fen: &str) -> Result<Self, InvalidFen> {
        let mut fields = fen.split_whitespace();

        let placement = fields.next().ok_or(InvalidFen::MissingField("placement"))?;
        let pieces = parse_placement(placement)?;

        let side_to_move = match fields.next() {
            Some(field) if field.len() == 1 => {
                Color::try_from(field.chars().next().ok_or(InvalidFen::BadSideToMove)?)?
            }
            Some(_) => return Err(InvalidFen::BadSideToMove),
            None => return Err(InvalidFen::MissingField("side to move")),
        };

        let castling = fields
            .next()
            .ok_or(InvalidFen::MissingField("castling rights"))?
            .parse::<Castling>()?;

        let en_passant = match fields.next() {
            Some("-") => None,
            Some(field) => Some(Square::from_str(field).map_err(|_| InvalidFen::BadEnPassant)?),
            None => return Err(InvalidFen::MissingField("en passant target")),
        };

        let halfmoves = fields
            .next()
            .ok_or(InvalidFen::MissingField("halfmove clock"))?
            .parse::<MoveCount>()
            .map_err(|_| InvalidFen::BadCounter)?;

        let fullmoves = fields
            .next()
            .ok_or(InvalidFen::MissingField("fullmove number"))?
            .parse::<MoveCount>()
            .map_err(|_| InvalidFen::BadCounter)?;
        if fullmoves == 0 {
            return Err(InvalidFen::BadCounter);
        }

        if fields.next().is_some() {
            return Err(InvalidFen::ExtraField);
        }

        Ok(Position::from_parts(
            pieces,
            side_to_move,
            castling,
            en_passant,
            halfmoves,
            fullmoves,
        ))
    }

    fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(START_POSITION_FEN.len());

        // Piece placement, rank 8 down to rank 1.
        for rank_u8 in (0..8u8).rev() {
            let mut empty_run = 0;
            for file_u8 in 0..NUM_FILES as u8 {
                let square = match Square::from_u8(rank_u8 * NUM_FILES as u8 + file_u8) {
                    Some(square) => square,
                    None => continue,
                };
                match self.pieces.piece_on(square) {
                    Some(piece) => {
                        if empty_run > 0 {
                            fen.push((b'0' + empty_run) as char);
                            empty_run = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                fen.push((b'0' + empty_run) as char);
            }
            if rank_u8 > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(self.side_to_move.to_char());
        fen.push(' ');
        fen.push_str(&self.castling.to_string());
        fen.push(' ');
        match self.en_passant {
            Some(square) => fen.push_str(&square.to_string()),
            None => fen.push('-'),
        }
        fen.push_str(&format!(" {} {}", self.halfmoves, self.fullmoves));

        fen
    }
}

/// Parse the piece placement field: eight '/'-separated ranks from rank 8 to
/// rank 1, where digits 1-8 denote empty runs and letters denote pieces.
fn parse_placement(placement: &str) -> Result<PieceSets, InvalidFen> {
    let mut pieces = PieceSets::new();

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(InvalidFen::BadPlacement);
    }

    for (row, rank_fen) in ranks.iter().enumerate() {
        // The first row of the field is rank 8.
        let rank = Rank::from_u8(7 - row as u8).ok_or(InvalidFen::BadPlacement)?;
        let mut file: u8 = 0;

        for symbol in rank_fen.chars() {
            if file >= NUM_FILES as u8 {
                return Err(InvalidFen::BadPlacement);
            }
            match symbol {
                '1'..='8' => file += symbol as u8 - b'0',
                _ => {
                    let piece = Piece::try_from(symbol)?;
                    let square = Square::from((
                        crate::coretypes::File::from_u8(file).ok_or(InvalidFen::BadPlacement)?,
                        rank,
                    ));
                    if pieces.piece_on(square).is_some() {
                        return Err(InvalidFen::BadPlacement);
                    }
                    pieces[piece].set_square(square);
                    file += 1;
                }
            }
        }
        if file != NUM_FILES as u8 {
            return Err(InvalidFen::BadPlacement);
        }
    }

    // One king per side, no overlaps, no pawns on a last rank.
    if !pieces.is_valid() {
        return Err(InvalidFen::BadPlacement);
    }
    Ok(pieces)
}
