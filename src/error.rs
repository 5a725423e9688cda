//! Skewer engine error types.
//!
//! Every fallible operation in the crate returns a result whose error names
//! its failure kind, so callers can match on exactly what went wrong instead
//! of inspecting strings.

use std::error;
use std::fmt::{self, Display};
use std::result;

/// Skewer engine generic result type.
pub type Result<T> = result::Result<T, Error>;

/// Reasons a FEN string can be rejected.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum InvalidFen {
    /// One of the six mandatory fields is absent.
    MissingField(&'static str),
    /// More than six whitespace-separated fields were given.
    ExtraField,
    /// Piece placement field is malformed: bad rank count, a digit run that
    /// overshoots a rank, an unknown piece letter, or a missing king.
    BadPlacement,
    /// Active color field is not `w` or `b`.
    BadSideToMove,
    /// Castling field is not `-` or a subset of `KQkq`.
    BadCastling,
    /// En passant field is not `-` or a square.
    BadEnPassant,
    /// Halfmove clock or fullmove number failed to parse.
    BadCounter,
}

impl InvalidFen {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidFen::MissingField(field) => field,
            InvalidFen::ExtraField => "more than six fields",
            InvalidFen::BadPlacement => "malformed piece placement",
            InvalidFen::BadSideToMove => "active color is not w|b",
            InvalidFen::BadCastling => "castling rights are not -|[KQkq]+",
            InvalidFen::BadEnPassant => "en passant target is not -|square",
            InvalidFen::BadCounter => "malformed move counter",
        }
    }
}

impl Display for InvalidFen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidFen::MissingField(field) => write!(f, "invalid fen: missing {} field", field),
            _ => write!(f, "invalid fen: {}", self.as_str()),
        }
    }
}

impl error::Error for InvalidFen {}

/// Reasons a SAN string fails to produce a move for a position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SanError {
    /// The text does not match the SAN grammar. Empty input parses to this,
    /// never to a panic.
    Parse,
    /// More than one piece of the declared kind can reach the destination
    /// and the disambiguator does not single one out.
    AmbiguousMove,
    /// No piece of the declared kind can reach the destination.
    NoSuchMove,
}

impl SanError {
    pub fn as_str(&self) -> &'static str {
        match self {
            SanError::Parse => "text does not match san grammar",
            SanError::AmbiguousMove => "san move is ambiguous",
            SanError::NoSuchMove => "no piece can make the san move",
        }
    }
}

impl Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl error::Error for SanError {}

/// Reasons `Position::apply` rejects a move.
///
/// All checks run before any successor state is built, so a failed apply
/// leaves no observable trace.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MoveError {
    /// Source square holds no piece.
    SourceEmpty,
    /// Source square holds a piece of the side not to move.
    WrongColor,
    /// Destination square holds a piece of the moving side.
    DestinationOccupiedBySelf,
    /// The move's advisory capture flag disagrees with destination occupancy.
    CaptureFlagMismatch,
    /// Promotion was declared for a non-promoting move, omitted for a pawn
    /// reaching its promotion rank, or names Pawn or King.
    PromotionMismatch,
    /// Source to destination is not a shape the moving piece can make.
    IllegalGeometry,
    /// A sliding piece or a double pawn advance runs through or into an
    /// occupied square.
    BlockedPath,
    /// A castle was requested without a live right, with the rook missing,
    /// through occupied squares, out of check, or across an attacked square.
    CastlingNotAllowed,
    /// The move is well formed but exposes the mover's own king.
    LeavesOwnKingInCheck,
}

impl MoveError {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveError::SourceEmpty => "source square is empty",
            MoveError::WrongColor => "piece belongs to the side not to move",
            MoveError::DestinationOccupiedBySelf => "destination occupied by own piece",
            MoveError::CaptureFlagMismatch => "capture flag disagrees with destination",
            MoveError::PromotionMismatch => "promotion disagrees with move",
            MoveError::IllegalGeometry => "piece cannot move that way",
            MoveError::BlockedPath => "path is blocked",
            MoveError::CastlingNotAllowed => "castling is not allowed",
            MoveError::LeavesOwnKingInCheck => "move leaves own king in check",
        }
    }
}

impl Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl error::Error for MoveError {}

/// Caller contract violations of the search drivers.
///
/// These are kept distinct from any in-tree search condition so tests can
/// tell "the caller searched an unsearchable root" apart from "the search
/// found a mate".
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SearchError {
    /// The root position has no legal moves; there is no move to pick.
    TerminalRoot,
    /// A search to depth zero cannot produce a best move.
    ZeroDepth,
}

impl SearchError {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchError::TerminalRoot => "cannot search a terminal position",
            SearchError::ZeroDepth => "cannot search to depth zero",
        }
    }
}

impl Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl error::Error for SearchError {}

/// The primary and general error type for the Skewer engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error {
    Fen(InvalidFen),
    San(SanError),
    Move(MoveError),
    Search(SearchError),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Fen(err) => write!(f, "{}", err),
            Error::San(err) => write!(f, "{}", err),
            Error::Move(err) => write!(f, "{}", err),
            Error::Search(err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for Error {}

impl From<InvalidFen> for Error {
    fn from(err: InvalidFen) -> Self {
        Self::Fen(err)
    }
}

impl From<SanError> for Error {
    fn from(err: SanError) -> Self {
        Self::San(err)
    }
}

impl From<MoveError> for Error {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

impl From<SearchError> for Error {
    fn from(err: SearchError) -> Self {
        Self::Search(err)
    }
}
