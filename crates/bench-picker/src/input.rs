//! Input line acquisition.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Read};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::PickError;

/// File read when no input is given and stdin is a terminal.
pub const FALLBACK_INPUT: &str = "fens.txt";

/// Where candidate lines are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Piped standard input.
    Stdin,
    /// A file of FEN lines.
    File(PathBuf),
}

impl InputSource {
    /// Picks the input for this process.
    ///
    /// An explicit path always wins. Otherwise piped stdin is used, and the
    /// fallback file only when stdin is an interactive terminal.
    pub fn detect(explicit: Option<PathBuf>, fallback: &Path) -> Self {
        Self::choose(explicit, io::stdin().is_terminal(), fallback)
    }

    fn choose(explicit: Option<PathBuf>, stdin_is_terminal: bool, fallback: &Path) -> Self {
        match explicit {
            Some(path) => InputSource::File(path),
            None if !stdin_is_terminal => InputSource::Stdin,
            None => InputSource::File(fallback.to_path_buf()),
        }
    }

    /// Reads every line from the source.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::Io`] if the source cannot be opened or read.
    pub fn read_lines(&self) -> Result<Vec<String>, PickError> {
        info!(input = %self, "reading positions");
        let result = match self {
            InputSource::Stdin => read_lines_from(io::stdin().lock()),
            InputSource::File(path) => {
                File::open(path).and_then(|f| read_lines_from(BufReader::new(f)))
            }
        };
        result.map_err(|source| PickError::Io {
            input: self.to_string(),
            source,
        })
    }
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Collects all lines from a reader.
///
/// Lines end at `\n`, `\r\n`, a lone `\r`, or any other Unicode line
/// boundary, so files saved with old Mac line endings still split.
pub fn read_lines_from<R: Read>(mut reader: R) -> io::Result<Vec<String>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(split_lines(&text).into_iter().map(str::to_string).collect())
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n'
            | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        if c == '\r' && matches!(chars.peek(), Some(&(_, '\n'))) {
            chars.next();
        }
        start = chars.peek().map_or(text.len(), |&(j, _)| j);
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
