//! Candidate positions and the pool they are sampled from.
//!
//! This is the validation boundary: every input line is run through
//! [`FenParser`], and only lines that parse become candidates. Rejected
//! lines are counted and logged but never reach the sampler.

use std::collections::BTreeMap;

use chess_core::{FenError, FenParser};
use tracing::{debug, trace};

/// A validated position tagged with its piece count.
///
/// The text is kept exactly as it appeared in the input (minus surrounding
/// whitespace), so output reproduces the input lines verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    fen: String,
    pieces: u32,
}

impl Candidate {
    /// Creates a candidate from text and a partition key without validating.
    pub fn new(fen: impl Into<String>, pieces: u32) -> Self {
        Self {
            fen: fen.into(),
            pieces,
        }
    }

    /// Validates a line of input and tags it with its piece count.
    ///
    /// # Errors
    ///
    /// Returns the [`FenError`] describing why the line is not a position.
    pub fn from_line(line: &str) -> Result<Self, FenError> {
        let fen = line.trim();
        let parsed = FenParser::parse(fen)?;
        let material = parsed.material();
        trace!(fen, %material, "accepted position");
        Ok(Self::new(fen, material.total()))
    }

    /// The position text.
    pub fn fen(&self) -> &str {
        &self.fen
    }

    /// The partition key: number of pieces on the board.
    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    /// Consumes the candidate, returning its text.
    pub fn into_fen(self) -> String {
        self.fen
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fen)
    }
}

/// Candidates grouped into partitions by piece count.
///
/// Partitions iterate in ascending piece-count order. Duplicate lines are
/// kept as separate candidates.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    partitions: BTreeMap<u32, Vec<Candidate>>,
    rejected: usize,
}

impl CandidatePool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pool from raw input lines.
    ///
    /// Blank lines are skipped. Lines that fail validation are dropped and
    /// counted in [`Self::rejected`].
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pool = Self::new();
        for (i, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            match Candidate::from_line(line) {
                Ok(candidate) => pool.push(candidate),
                Err(e) => {
                    debug!(line = i + 1, error = %e, "dropping malformed position");
                    pool.rejected += 1;
                }
            }
        }
        pool
    }

    /// Adds a candidate to the partition for its piece count.
    pub fn push(&mut self, candidate: Candidate) {
        self.partitions
            .entry(candidate.pieces())
            .or_default()
            .push(candidate);
    }

    /// Returns the number of candidates across all partitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    /// Returns true if the pool holds no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Returns the number of input lines that failed validation.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Returns the number of distinct piece counts.
    #[must_use]
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Returns the size of each partition, keyed by piece count.
    #[must_use]
    pub fn partition_sizes(&self) -> BTreeMap<u32, usize> {
        self.partitions
            .iter()
            .map(|(&pieces, group)| (pieces, group.len()))
            .collect()
    }

    /// Returns the candidates with the given piece count.
    #[must_use]
    pub fn partition(&self, pieces: u32) -> Option<&[Candidate]> {
        self.partitions.get(&pieces).map(|v| v.as_slice())
    }

    /// Consumes the pool, returning its partitions.
    pub fn into_partitions(self) -> BTreeMap<u32, Vec<Candidate>> {
        self.partitions
    }
}

impl FromIterator<Candidate> for CandidatePool {
    fn from_iter<T: IntoIterator<Item = Candidate>>(iter: T) -> Self {
        let mut pool = Self::new();
        for candidate in iter {
            pool.push(candidate);
        }
        pool
    }
}
