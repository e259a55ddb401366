//! Material tallies for a piece placement.

use crate::{Color, Piece};

/// Number of pieces of each type and color on a board.
///
/// A tally knows nothing about square occupancy; it is built by
/// [`FenParser::material`](crate::FenParser::material) after the placement
/// has been validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Material {
    counts: [[u8; 6]; 2],
}

impl Material {
    /// Creates an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more piece.
    pub fn add(&mut self, piece: Piece, color: Color) {
        let slot = &mut self.counts[color.index()][piece.index()];
        *slot = slot.saturating_add(1);
    }

    /// Returns how many pieces of this type and color are on the board.
    #[inline]
    pub fn count(&self, piece: Piece, color: Color) -> u32 {
        u32::from(self.counts[color.index()][piece.index()])
    }

    /// Returns the number of pieces one side has, king included.
    pub fn side_total(&self, color: Color) -> u32 {
        self.counts[color.index()].iter().map(|&n| u32::from(n)).sum()
    }

    /// Returns the number of pieces on the board.
    pub fn total(&self) -> u32 {
        Color::ALL.iter().map(|&c| self.side_total(c)).sum()
    }
}

/// Formats the tally as a material signature such as `KRPvKR`.
///
/// Pieces are listed strongest first for each side, white before black.
impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, color) in Color::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, "v")?;
            }
            for piece in Piece::ALL.iter().rev() {
                let c = piece.to_fen_char(Color::White);
                for _ in 0..self.count(*piece, *color) {
                    write!(f, "{}", c)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_material() {
        let m = Material::new();
        assert_eq!(m.total(), 0);
        assert_eq!(m.to_string(), "v");
    }

    #[test]
    fn counts_by_side() {
        let mut m = Material::new();
        m.add(Piece::King, Color::White);
        m.add(Piece::Rook, Color::White);
        m.add(Piece::Pawn, Color::White);
        m.add(Piece::King, Color::Black);
        m.add(Piece::Rook, Color::Black);

        assert_eq!(m.side_total(Color::White), 3);
        assert_eq!(m.side_total(Color::Black), 2);
        assert_eq!(m.total(), 5);
        assert_eq!(m.count(Piece::Rook, Color::Black), 1);
        assert_eq!(m.count(Piece::Queen, Color::White), 0);
    }

    #[test]
    fn signature_orders_strongest_first() {
        let mut m = Material::new();
        m.add(Piece::Pawn, Color::White);
        m.add(Piece::King, Color::White);
        m.add(Piece::Queen, Color::White);
        m.add(Piece::Knight, Color::Black);
        m.add(Piece::King, Color::Black);
        assert_eq!(m.to_string(), "KQPvKN");
    }
}
