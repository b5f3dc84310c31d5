use crate::libs::error::{RecombError, Result};

/// A sequence prepared for circular window extraction.
///
/// The input is lowercased once and stored twice in a row, so every window
/// starting in `[0, len]` is a contiguous slice of the doubled buffer and no
/// per-character modulo is needed.
///
/// ```
/// use recomb::libs::window::CircularSeq;
///
/// let circ = CircularSeq::new("AcGt");
/// assert_eq!(circ.len(), 4);
/// assert_eq!(circ.window(2, 4).unwrap(), &['g', 't', 'a', 'c']);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularSeq {
    doubled: Vec<char>,
    len: usize,
}

impl CircularSeq {
    pub fn new(seq: &str) -> Self {
        let lower: Vec<char> = seq.chars().map(lower_char).collect();
        let len = lower.len();

        let mut doubled = Vec::with_capacity(len * 2);
        doubled.extend_from_slice(&lower);
        doubled.extend_from_slice(&lower);

        Self { doubled, len }
    }

    /// Number of characters in the original sequence
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The lowercased sequence, without the wrapped copy
    pub fn as_slice(&self) -> &[char] {
        &self.doubled[..self.len]
    }

    /// Borrows the `length` characters starting at `start`, wrapping past the end.
    ///
    /// `start == len` is accepted and yields the same window as `start == 0`.
    pub fn window(&self, start: usize, length: usize) -> Result<&[char]> {
        if length > self.len {
            return Err(RecombError::invalid_argument(format!(
                "window length {} is longer than the sequence ({})",
                length, self.len
            )));
        }
        if start > self.len {
            return Err(RecombError::invalid_argument(format!(
                "start position {} is outside the sequence ({})",
                start, self.len
            )));
        }

        Ok(&self.doubled[start..start + length])
    }

    /// Same as [`CircularSeq::window`], collected into a `String`
    pub fn window_string(&self, start: usize, length: usize) -> Result<String> {
        Ok(self.window(start, length)?.iter().collect())
    }
}

/// Circular, case-insensitive substring of `seq`.
///
/// ```
/// assert_eq!(recomb::libs::window::window("acgt", 2, 4).unwrap(), "gtac");
/// assert_eq!(recomb::libs::window::window("AcGt", 0, 4).unwrap(), "acgt");
/// assert!(recomb::libs::window::window("acgt", 0, 5).is_err());
/// ```
pub fn window(seq: &str, start: usize, length: usize) -> Result<String> {
    CircularSeq::new(seq).window_string(start, length)
}

// Characters whose lowercase form expands to several chars keep the first one
fn lower_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
