//! Core chess types for position screening.
//!
//! This crate provides what is needed to vet a position before it is used:
//! - [`Piece`] and [`Color`] for piece representation
//! - FEN parsing and validation via [`FenParser`]
//! - [`Material`] tallies, whose total is a position's piece count

mod fen;
mod material;
mod piece;

pub use fen::{FenError, FenParser};
pub use material::Material;
pub use piece::{Color, Piece};
