//! End-to-end tests: raw FEN lines in, sorted stratified selection out.

use std::collections::BTreeMap;
use std::io::Write;

use bench_picker::{select, CandidatePool, InputSource, PickError};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Builds a FEN with the given pieces on squares 0..64 (a8 first).
fn fen_with(pieces: &[(usize, char)]) -> String {
    let mut board = ['.'; 64];
    for &(sq, c) in pieces {
        board[sq] = c;
    }

    let ranks: Vec<String> = board
        .chunks(8)
        .map(|rank| {
            let mut out = String::new();
            let mut empty = 0;
            for &c in rank {
                if c == '.' {
                    empty += 1;
                } else {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(c);
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            out
        })
        .collect();

    format!("{} w - - 0 1", ranks.join("/"))
}

/// `n` distinct positions, each with `extra` white pawns besides the kings.
fn positions(n: usize, extra: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let mut pieces = vec![(i, 'k'), (63 - i, 'K')];
            pieces.extend((0..extra).map(|p| (16 + p, 'P')));
            fen_with(&pieces)
        })
        .collect()
}

fn piece_counts(fens: &[&str]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for fen in fens {
        let parsed = chess_core::FenParser::parse(fen).unwrap();
        *counts.entry(parsed.piece_count()).or_default() += 1;
    }
    counts
}

fn is_sorted(fens: &[&str]) -> bool {
    fens.windows(2).all(|w| w[0] <= w[1])
}

#[test]
fn test_two_per_piece_count() {
    let mut lines = positions(4, 0);
    lines.extend(positions(3, 1));
    lines.extend(positions(3, 3));
    let pool = CandidatePool::from_lines(&lines);
    assert_eq!(pool.len(), 10);

    for seed in 0..20 {
        let selection = select(pool.clone(), 6, &mut StdRng::seed_from_u64(seed)).unwrap();
        let fens: Vec<&str> = selection.positions().iter().map(|c| c.fen()).collect();

        assert_eq!(fens.len(), 6);
        assert!(is_sorted(&fens));
        let mut distinct = fens.clone();
        distinct.dedup();
        assert_eq!(distinct.len(), 6);
        assert!(fens.iter().all(|f| lines.iter().any(|l| l == f)));
        assert_eq!(
            piece_counts(&fens),
            BTreeMap::from([(2, 2), (3, 2), (5, 2)])
        );
        assert_eq!(selection.report().shortfall(), 0);
    }
}

#[test]
fn test_small_pool_returned_whole() {
    let lines: Vec<String> = (0..5).map(|i| fen_with(&[(i * 9, 'K')])).collect();
    let pool = CandidatePool::from_lines(&lines);

    let selection = select(pool, 100, &mut rand::thread_rng()).unwrap();
    let fens: Vec<&str> = selection.positions().iter().map(|c| c.fen()).collect();

    let mut expected: Vec<&str> = lines.iter().map(String::as_str).collect();
    expected.sort();
    assert_eq!(fens, expected);
}

#[test]
fn test_shortfall_filled_from_remainder() {
    let mut lines = positions(1, 0);
    lines.extend(positions(6, 2));
    let pool = CandidatePool::from_lines(&lines);

    for seed in 0..20 {
        let selection = select(pool.clone(), 4, &mut StdRng::seed_from_u64(seed)).unwrap();
        let fens: Vec<&str> = selection.positions().iter().map(|c| c.fen()).collect();

        assert_eq!(fens.len(), 4);
        assert!(is_sorted(&fens));
        assert_eq!(piece_counts(&fens), BTreeMap::from([(2, 1), (4, 3)]));

        let report = selection.report();
        assert_eq!(report.quotas, BTreeMap::from([(2, 2), (4, 2)]));
        assert_eq!(report.filled, BTreeMap::from([(4, 1)]));
    }
}

#[test]
fn test_malformed_lines_are_dropped() {
    let mut lines = positions(3, 0);
    lines.push("".to_string());
    lines.push("this is not a position".to_string());
    lines.push("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1".to_string());

    let pool = CandidatePool::from_lines(&lines);
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.rejected(), 2);

    let selection = select(pool, 10, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(selection.len(), 3);
}

#[test]
fn test_nothing_valid_is_fatal() {
    let pool = CandidatePool::from_lines(["", "garbage", "  "]);
    let err = select(pool, 100, &mut rand::thread_rng()).unwrap_err();
    assert!(matches!(err, PickError::NoValidPositions));
    assert_eq!(err.to_string(), "No valid FENs parsed.");
}

#[test]
fn test_pick_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let mut lines = positions(5, 0);
    lines.extend(positions(5, 4));
    for line in &lines {
        writeln!(file, "  {}  ", line).unwrap();
    }
    writeln!(file).unwrap();

    let source = InputSource::File(file.path().to_path_buf());
    let pool = CandidatePool::from_lines(source.read_lines().unwrap());
    assert_eq!(pool.len(), 10);
    assert_eq!(pool.rejected(), 0);

    let selection = select(pool, 4, &mut StdRng::seed_from_u64(99)).unwrap();
    let fens: Vec<&str> = selection.positions().iter().map(|c| c.fen()).collect();
    assert!(is_sorted(&fens));
    assert_eq!(piece_counts(&fens), BTreeMap::from([(2, 2), (6, 2)]));
    // Surrounding whitespace is not part of the output
    assert!(fens.iter().all(|f| f.trim() == *f));
}
