//! FEN (Forsyth-Edwards Notation) parsing and validation.

use thiserror::Error;

use crate::{Material, Piece};

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 1 to 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Parsed FEN data.
///
/// Only the piece placement is mandatory. Trailing fields may be left out,
/// as in EPD records, and take the values of a fresh game: white to move,
/// no castling, no en passant square, clocks `0` and `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Piece placement string (e.g., "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
    pub piece_placement: String,
    /// Active color ('w' or 'b')
    pub active_color: char,
    /// Castling availability (e.g., "KQkq", "-")
    pub castling: String,
    /// En passant target square (e.g., "e3", "-")
    pub en_passant: String,
    /// Halfmove clock (for 50-move rule)
    pub halfmove_clock: u64,
    /// Fullmove number
    pub fullmove_number: u64,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    const DEFAULTS: [&'static str; 5] = ["w", "-", "-", "0", "1"];

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.is_empty() || parts.len() > 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }
        let field = |i: usize| parts.get(i).copied().unwrap_or(Self::DEFAULTS[i - 1]);

        let piece_placement = parts[0];
        Self::validate_piece_placement(piece_placement)?;

        let active_color = match field(1) {
            "w" => 'w',
            "b" => 'b',
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = field(2);
        Self::validate_castling(castling)?;

        let en_passant = field(3);
        Self::validate_en_passant(en_passant)?;

        let halfmove_clock = field(4)
            .parse::<u64>()
            .map_err(|_| FenError::InvalidHalfmoveClock(field(4).to_string()))?;

        let fullmove_number = field(5)
            .parse::<u64>()
            .map_err(|_| FenError::InvalidFullmoveNumber(field(5).to_string()))?;

        Ok(FenParser {
            piece_placement: piece_placement.to_string(),
            active_color,
            castling: castling.to_string(),
            en_passant: en_passant.to_string(),
            halfmove_clock,
            fullmove_number,
        })
    }

    fn validate_piece_placement(placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        for (i, rank) in ranks.iter().enumerate() {
            let rank_no = 8 - i;
            let mut squares = 0;
            let mut previous_was_digit = false;
            for c in rank.chars() {
                if let Some(run) = c.to_digit(10) {
                    if !(1..=8).contains(&run) {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "empty run '{}' in rank {}",
                            c, rank_no
                        )));
                    }
                    if previous_was_digit {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "consecutive digits in rank {}",
                            rank_no
                        )));
                    }
                    squares += run;
                    previous_was_digit = true;
                } else if Piece::from_fen_char(c).is_some() {
                    squares += 1;
                    previous_was_digit = false;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c, rank_no
                    )));
                }
            }
            if squares != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank_no, squares
                )));
            }
        }

        Ok(())
    }

    /// Castling rights are up to two white letters followed by up to two
    /// black letters. Shredder/X-FEN rook files (`A`-`H`, `a`-`h`) count as
    /// letters alongside `KQ` and `kq`.
    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        let white = castling
            .chars()
            .take_while(|c| "KQABCDEFGH".contains(*c))
            .count();
        let black = castling
            .chars()
            .skip(white)
            .take_while(|c| "kqabcdefgh".contains(*c))
            .count();
        if white > 2 || black > 2 || white + black != castling.chars().count() {
            return Err(FenError::InvalidCastlingRights(castling.to_string()));
        }

        Ok(())
    }

    fn validate_en_passant(ep: &str) -> Result<(), FenError> {
        if ep == "-" {
            return Ok(());
        }

        let chars: Vec<char> = ep.chars().collect();
        if chars.len() != 2 || !('a'..='h').contains(&chars[0]) || !('1'..='8').contains(&chars[1])
        {
            return Err(FenError::InvalidEnPassantSquare(ep.to_string()));
        }

        Ok(())
    }

    /// Tallies the pieces in the placement.
    pub fn material(&self) -> Material {
        let mut material = Material::new();
        for (piece, color) in self.piece_placement.chars().filter_map(Piece::from_fen_char) {
            material.add(piece, color);
        }
        material
    }

    /// Returns the number of pieces on the board, kings included.
    pub fn piece_count(&self) -> u32 {
        self.material().total()
    }

    /// Converts the parsed FEN back to a full six-field FEN string.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.piece_placement,
            self.active_color,
            self.castling,
            self.en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl Default for FenParser {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
