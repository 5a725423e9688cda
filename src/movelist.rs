//! MoveList type used in the Skewer engine.
//!
//! A chess position never has more than `MAX_MOVES` legal moves, so legal
//! move collections live in a fixed-capacity vector and never allocate.

use arrayvec::ArrayVec;

use crate::coretypes::{Move, MAX_MOVES};

/// MoveList is a container that can hold the legal moves of any chess position.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;
