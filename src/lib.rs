//! Skewer chess engine core library.
//!
//! The crate models legal chess positions, enumerates their successors,
//! parses moves in SAN and positions in FEN, and picks moves by minimax
//! search with alpha-beta pruning, iterative deepening, and MTD(f) over a
//! bounded LRU transposition table. The API is pure: nothing here performs
//! I/O, and applying a move never mutates the position it was applied to.

pub mod bitboard;
pub mod boardrepr;
pub mod coretypes;
pub mod error;
pub mod eval;
pub mod fen;
pub(crate) mod movegen;
pub mod movelist;
pub mod perft;
pub mod position;
pub mod san;
pub mod search;
pub mod transposition;
pub mod zobrist;

pub use coretypes::{CastleSide, Castling, Color, Cp, File, Move, Piece, PieceKind, Rank, Square};
pub use error::{Error, InvalidFen, MoveError, Result, SanError, SearchError};
pub use fen::{Fen, START_POSITION_FEN};
pub use position::{PlayerView, Position};
pub use search::{SearchResult, SearchTable};
pub use transposition::TranspositionTable;
