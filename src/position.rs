//! Holds the Position struct, the most important data structure for the engine.
//!
//! Position is an immutable value representing a legal chess position.
//! Applying a move never mutates the receiver; it validates the move and
//! produces a fresh successor, so callers holding an old Position always see
//! it unchanged.

use std::fmt::{self, Display};

use crate::bitboard::Bitboard;
use crate::boardrepr::PieceSets;
use crate::coretypes::{
    CastleSide, Castling, Color, File, Move, MoveCount, Piece, PieceKind, Rank, Square,
};
use crate::coretypes::{Color::*, PieceKind::*};
use crate::error::MoveError;
use crate::fen::Fen;
use crate::movegen as mg;
use crate::movelist::MoveList;
use crate::zobrist::{self, HashKind};

/// A complete data set that can represent any chess position.
///
/// # Members:
/// * pieces - a piece-centric setwise container of all basic chess piece positions.
/// * side_to_move - Color of the player whose turn it is.
/// * castling - castling rights for both players.
/// * en_passant - the square a double pawn push skipped, kept only so FEN
///   round-trips; the move rules never act on it.
/// * halfmoves - resets after a capture or pawn move, increments otherwise.
/// * fullmoves - starts at 1, increments after each Black move.
/// * hash - Zobrist hash over board, side to move, and castling rights,
///   derived once at construction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Position {
    pub(crate) pieces: PieceSets,
    pub(crate) side_to_move: Color,
    pub(crate) castling: Castling,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmoves: MoveCount,
    pub(crate) fullmoves: MoveCount,
    pub(crate) hash: HashKind,
}

/// A read-only view of one player's half of a position.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PlayerView {
    occupied: Bitboard,
    kingside: bool,
    queenside: bool,
    king: Option<Square>,
}

impl PlayerView {
    /// The set of squares occupied by this player's pieces.
    pub const fn occupied(&self) -> Bitboard {
        self.occupied
    }

    pub const fn can_castle_kingside(&self) -> bool {
        self.kingside
    }

    pub const fn can_castle_queenside(&self) -> bool {
        self.queenside
    }

    /// This player's king square. Positions built by `start`, `parse_fen`,
    /// or `apply` always hold one king per side.
    pub const fn king_square(&self) -> Option<Square> {
        self.king
    }
}

impl Position {
    /// Standard chess start position.
    pub fn start() -> Self {
        Self::from_parts(
            PieceSets::start_position(),
            Color::White,
            Castling::start_position(),
            None,
            0,
            1,
        )
    }

    /// Assembles a Position and derives its hash. The only constructor.
    pub(crate) fn from_parts(
        pieces: PieceSets,
        side_to_move: Color,
        castling: Castling,
        en_passant: Option<Square>,
        halfmoves: MoveCount,
        fullmoves: MoveCount,
    ) -> Self {
        let hash = zobrist::table().generate_hash(&pieces, side_to_move, castling);
        Self {
            pieces,
            side_to_move,
            castling,
            en_passant,
            halfmoves,
            fullmoves,
            hash,
        }
    }

    /// Const getters.
    pub const fn active_side(&self) -> Color {
        self.side_to_move
    }
    pub fn opposing_side(&self) -> Color {
        !self.side_to_move
    }
    pub const fn castling(&self) -> Castling {
        self.castling
    }
    pub const fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
    pub const fn halfmoves(&self) -> MoveCount {
        self.halfmoves
    }
    pub const fn fullmoves(&self) -> MoveCount {
        self.fullmoves
    }

    /// The position's Zobrist hash. Equal positions hash equally; the
    /// counters and the stored en passant square are not hashed.
    pub const fn hash(&self) -> HashKind {
        self.hash
    }

    /// Returns the piece on the square at (file, rank), if any.
    pub fn square(&self, file: File, rank: Rank) -> Option<Piece> {
        self.pieces.piece_on(Square::from((file, rank)))
    }

    /// Returns the piece on a square, if any.
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.pieces.piece_on(square)
    }

    /// Returns a read-only view of one player's occupied squares, castling
    /// rights, and king square.
    pub fn player(&self, color: Color) -> PlayerView {
        PlayerView {
            occupied: self.pieces.color_occupied(color),
            kingside: self
                .castling
                .has(Castling::right(color, CastleSide::Kingside)),
            queenside: self
                .castling
                .has(Castling::right(color, CastleSide::Queenside)),
            king: self.pieces.king_square(color),
        }
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        match self.pieces.king_square(self.side_to_move) {
            Some(king) => attacked(&self.pieces, king, !self.side_to_move),
            None => false,
        }
    }

    /// Returns true if the side to move has no legal moves.
    pub fn is_terminal(&self) -> bool {
        self.successors().next().is_none()
    }

    /// Terminal and in check: the side to move has lost.
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.is_terminal()
    }

    /// Terminal but not in check: the game is drawn.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.is_terminal()
    }

    /// Returns every legal move for the side to move. Ordering is not part
    /// of the contract; completeness and non-duplication are.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> {
        let legal: MoveList = self.successors().map(|(move_, _)| move_).collect();
        legal.into_iter()
    }

    /// Enumerates every (move, successor) pair reachable from this position.
    /// Candidates come from per-piece patterns and each is validated through
    /// `apply`, so every yielded successor is legal by construction.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Position)> + '_ {
        self.candidate_moves()
            .into_iter()
            .filter_map(move |move_| self.apply(move_).ok().map(|next| (move_, next)))
    }

    /// Returns true if a piece on `from` could move to `to` under its
    /// geometric movement rules with a clear path, ignoring castling and
    /// ignoring whether the move would leave its own king in check.
    pub(crate) fn is_move_possible(&self, from: Square, to: Square) -> bool {
        match self.pieces.piece_on(from) {
            Some(piece) => movement(&self.pieces, piece, from, to).is_ok(),
            None => false,
        }
    }

    /// Applies a move, producing the successor position or the first reason
    /// the move is illegal. All validation happens before any successor
    /// state is built.
    pub fn apply(&self, move_: Move) -> Result<Self, MoveError> {
        let piece = self
            .pieces
            .piece_on(move_.from)
            .ok_or(MoveError::SourceEmpty)?;
        if piece.color() != self.side_to_move {
            return Err(MoveError::WrongColor);
        }

        let destination = self.pieces.piece_on(move_.to);
        if destination.map_or(false, |p| p.color() == self.side_to_move) {
            return Err(MoveError::DestinationOccupiedBySelf);
        }

        // The declared promotion must agree with "pawn reaches its last rank"
        // and may only name Knight, Bishop, Rook, or Queen.
        let promotes = piece.kind() == Pawn && move_.to.rank() == promotion_rank(self.side_to_move);
        match move_.promotion {
            Some(kind) if !kind.is_promotion_target() => return Err(MoveError::PromotionMismatch),
            Some(_) if !promotes => return Err(MoveError::PromotionMismatch),
            None if promotes => return Err(MoveError::PromotionMismatch),
            _ => (),
        }

        // The advisory capture flag, when declared, must agree with
        // destination occupancy.
        if let Some(declared) = move_.capture {
            if declared != destination.is_some() {
                return Err(MoveError::CaptureFlagMismatch);
            }
        }

        // Movement legality.
        match move_.castle {
            Some(side) => self.validate_castle(side, &move_, piece)?,
            None => movement(&self.pieces, piece, move_.from, move_.to)?,
        }

        // Build the successor board.
        let mut pieces = self.pieces;
        if let Some(captured) = destination {
            pieces[captured].clear_square(move_.to);
        }
        pieces[piece].clear_square(move_.from);
        let placed = match move_.promotion {
            Some(kind) => Piece::new(self.side_to_move, kind),
            None => piece,
        };
        pieces[placed].set_square(move_.to);
        if let Some(side) = move_.castle {
            let (rook_from, rook_to) = rook_castle_squares(self.side_to_move, side);
            let rook = Piece::new(self.side_to_move, Rook);
            pieces[rook].clear_square(rook_from);
            pieces[rook].set_square(rook_to);
        }

        // Update castling rights: a king move clears both of the mover's
        // rights, a rook move from its home corner clears that wing, and a
        // rook captured on its home corner takes the victim's wing with it.
        let mut castling = self.castling;
        match piece.kind() {
            King => castling.clear_color(self.side_to_move),
            Rook => {
                if let Some(side) = rook_home_side(self.side_to_move, move_.from) {
                    castling.clear(Castling::right(self.side_to_move, side));
                }
            }
            _ => (),
        }
        if let Some(captured) = destination {
            if captured.kind() == Rook {
                if let Some(side) = rook_home_side(captured.color(), move_.to) {
                    castling.clear(Castling::right(captured.color(), side));
                }
            }
        }

        // Reject self-check on the tentative board.
        if let Some(king) = pieces.king_square(self.side_to_move) {
            if attacked(&pieces, king, !self.side_to_move) {
                return Err(MoveError::LeavesOwnKingInCheck);
            }
        }

        // A double pawn push records the skipped square so FEN round-trips.
        let en_passant = if piece.kind() == Pawn
            && (move_.to.rank_u8() as i8 - move_.from.rank_u8() as i8).abs() == 2
        {
            move_.from.shifted(0, forward(self.side_to_move))
        } else {
            None
        };

        let halfmoves = if piece.kind() == Pawn || destination.is_some() {
            0
        } else {
            self.halfmoves + 1
        };
        let fullmoves = match self.side_to_move {
            Black => self.fullmoves + 1,
            White => self.fullmoves,
        };

        Ok(Self::from_parts(
            pieces,
            !self.side_to_move,
            castling,
            en_passant,
            halfmoves,
            fullmoves,
        ))
    }

    /// Castle legality, excluding the generic checks `apply` already ran.
    /// Every failure is `CastlingNotAllowed`: the right must be live, the
    /// king and rook on their home squares, the span between them empty, and
    /// the king's source and destination squares free of enemy attack.
    fn validate_castle(
        &self,
        side: CastleSide,
        move_: &Move,
        piece: Piece,
    ) -> Result<(), MoveError> {
        let color = self.side_to_move;
        if piece.kind() != King || move_.from != king_home(color) {
            return Err(MoveError::CastlingNotAllowed);
        }
        if move_.to != Move::castle(side, color).to() {
            return Err(MoveError::CastlingNotAllowed);
        }
        if !self.castling.has(Castling::right(color, side)) {
            return Err(MoveError::CastlingNotAllowed);
        }
        let (rook_from, _) = rook_castle_squares(color, side);
        if !self.pieces[(color, Rook)].has_square(rook_from) {
            return Err(MoveError::CastlingNotAllowed);
        }
        if mg::between(move_.from, rook_from).has_any(self.pieces.occupied()) {
            return Err(MoveError::CastlingNotAllowed);
        }
        if attacked(&self.pieces, move_.from, !color) {
            return Err(MoveError::CastlingNotAllowed);
        }
        if attacked(&self.pieces, move_.to, !color) {
            return Err(MoveError::CastlingNotAllowed);
        }
        Ok(())
    }

    /// Candidate moves for the side to move: a geometric superset of the
    /// legal moves, cheap to produce from the pattern tables. `apply` is the
    /// single arbiter that filters it down.
    fn candidate_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        let color = self.side_to_move;
        let own = self.pieces.color_occupied(color);
        let enemy = self.pieces.color_occupied(!color);
        let empty = !(own | enemy);

        for from in self.pieces[(color, Pawn)] {
            let origin = Bitboard::from(from);
            let single = mg::pawn_single_pushes(origin, color) & empty;
            // A double push needs the skipped square clear too.
            let double = if single.is_empty() {
                Bitboard::EMPTY
            } else {
                mg::pawn_double_pushes(origin, color) & empty
            };
            let captures = mg::pawn_attacks(origin, color) & enemy;
            for to in single | double | captures {
                if to.rank() == promotion_rank(color) {
                    for kind in [Knight, Bishop, Rook, Queen] {
                        moves.push(Move::new(from, to, Some(kind)));
                    }
                } else {
                    moves.push(Move::new(from, to, None));
                }
            }
        }

        for from in self.pieces[(color, Knight)] {
            for to in mg::knight_pattern(from) & !own {
                moves.push(Move::new(from, to, None));
            }
        }
        for from in self.pieces[(color, Bishop)] {
            for to in mg::bishop_pattern(from) & !own {
                moves.push(Move::new(from, to, None));
            }
        }
        for from in self.pieces[(color, Rook)] {
            for to in mg::rook_pattern(from) & !own {
                moves.push(Move::new(from, to, None));
            }
        }
        for from in self.pieces[(color, Queen)] {
            for to in mg::queen_pattern(from) & !own {
                moves.push(Move::new(from, to, None));
            }
        }
        for from in self.pieces[(color, King)] {
            for to in mg::king_pattern(from) & !own {
                moves.push(Move::new(from, to, None));
            }
        }

        for side in CastleSide::iter() {
            if self.castling.has(Castling::right(color, side)) {
                moves.push(Move::castle(side, color));
            }
        }

        moves
    }
}

/// Defaults to the standard chess start position.
impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

/// Displays the FEN string representing the Position.
impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

/// White pawns move up the board, Black pawns move down.
pub(crate) const fn forward(color: Color) -> i8 {
    match color {
        White => 1,
        Black => -1,
    }
}

/// The rank a pawn promotes on.
pub(crate) const fn promotion_rank(color: Color) -> Rank {
    match color {
        White => Rank::R8,
        Black => Rank::R1,
    }
}

/// The home rank a pawn double-advances from.
const fn pawn_home_rank(color: Color) -> Rank {
    match color {
        White => Rank::R2,
        Black => Rank::R7,
    }
}

const fn king_home(color: Color) -> Square {
    match color {
        White => Square::E1,
        Black => Square::E8,
    }
}

/// The rook's source and destination squares for a castle.
const fn rook_castle_squares(color: Color, side: CastleSide) -> (Square, Square) {
    use Square::*;
    match (color, side) {
        (White, CastleSide::Kingside) => (H1, F1),
        (White, CastleSide::Queenside) => (A1, D1),
        (Black, CastleSide::Kingside) => (H8, F8),
        (Black, CastleSide::Queenside) => (A8, D8),
    }
}

/// The wing a rook standing on `square` guards, if `square` is one of the
/// color's home corners.
const fn rook_home_side(color: Color, square: Square) -> Option<CastleSide> {
    use Square::*;
    match (color, square) {
        (White, H1) | (Black, H8) => Some(CastleSide::Kingside),
        (White, A1) | (Black, A8) => Some(CastleSide::Queenside),
        _ => None,
    }
}

/// Movement legality of one piece from `from` to `to` on a board, ignoring
/// castling and self-check. Geometry failures and blocked paths are reported
/// apart so `apply` can surface the difference.
fn movement(pieces: &PieceSets, piece: Piece, from: Square, to: Square) -> Result<(), MoveError> {
    if from == to {
        return Err(MoveError::IllegalGeometry);
    }
    match piece.kind() {
        Knight => match mg::knight_pattern(from).has_square(to) {
            true => Ok(()),
            false => Err(MoveError::IllegalGeometry),
        },
        King => match mg::king_pattern(from).has_square(to) {
            true => Ok(()),
            false => Err(MoveError::IllegalGeometry),
        },
        Bishop => slider_movement(pieces, mg::bishop_pattern(from), from, to),
        Rook => slider_movement(pieces, mg::rook_pattern(from), from, to),
        Queen => slider_movement(pieces, mg::queen_pattern(from), from, to),
        Pawn => pawn_movement(pieces, piece.color(), from, to),
    }
}

fn slider_movement(
    pieces: &PieceSets,
    pattern: Bitboard,
    from: Square,
    to: Square,
) -> Result<(), MoveError> {
    if !pattern.has_square(to) {
        return Err(MoveError::IllegalGeometry);
    }
    match mg::between(from, to).has_any(pieces.occupied()) {
        true => Err(MoveError::BlockedPath),
        false => Ok(()),
    }
}

fn pawn_movement(
    pieces: &PieceSets,
    color: Color,
    from: Square,
    to: Square,
) -> Result<(), MoveError> {
    let file_delta = to.file_u8() as i8 - from.file_u8() as i8;
    let rank_delta = to.rank_u8() as i8 - from.rank_u8() as i8;
    let destination = pieces.piece_on(to);

    if file_delta == 0 {
        // Advances require an empty destination.
        if rank_delta == forward(color) {
            match destination {
                Some(_) => Err(MoveError::BlockedPath),
                None => Ok(()),
            }
        } else if rank_delta == 2 * forward(color) && from.rank() == pawn_home_rank(color) {
            let clear = !mg::between(from, to).has_any(pieces.occupied());
            match clear && destination.is_none() {
                true => Ok(()),
                false => Err(MoveError::BlockedPath),
            }
        } else {
            Err(MoveError::IllegalGeometry)
        }
    } else if file_delta.abs() == 1 && rank_delta == forward(color) {
        // Diagonal steps are captures; the destination must hold an enemy.
        match destination {
            Some(target) if target.color() != color => Ok(()),
            _ => Err(MoveError::IllegalGeometry),
        }
    } else {
        Err(MoveError::IllegalGeometry)
    }
}

/// Returns true if side `by` attacks `target`: some `by`-occupied square has
/// a possible move onto `target` under the piece movement rules.
pub(crate) fn attacked(pieces: &PieceSets, target: Square, by: Color) -> bool {
    pieces.color_occupied(by).into_iter().any(|from| {
        pieces
            .piece_on(from)
            .map_or(false, |piece| movement(pieces, piece, from, target).is_ok())
    })
}
