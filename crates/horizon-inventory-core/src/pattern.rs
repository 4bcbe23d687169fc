//! Character patterns.
//!
//! A [`Pattern`] assigns a character to every cell of a pane. Pattern panes
//! bind items to characters, so every cell carrying the same character shows
//! the same item. Rows are measured in Unicode scalar values, not bytes.
//!
//! Resizing extends the repeating unit instead of padding with a default:
//! new rows copy the last row and new columns copy the last column.

use std::fmt;

use crate::error::{Error, Result};

/// Character used to pad a pattern that has nothing to repeat.
const FILLER: char = ' ';

/// An immutable rectangular grid of characters.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    rows: Vec<Vec<char>>,
    length: usize,
}

impl Pattern {
    /// Build a pattern from row strings.
    ///
    /// Fails with a load error when the rows differ in length.
    pub fn new<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows: Vec<Vec<char>> = rows
            .into_iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();

        let length = rows.first().map_or(0, Vec::len);

        for (index, row) in rows.iter().enumerate() {
            if row.len() != length {
                return Err(Error::load(format!(
                    "Rows have different lengths, row 1 has {length} characters, but row {} has {} characters",
                    index + 1,
                    row.len()
                )));
            }
        }

        Ok(Self { rows, length })
    }

    /// Number of columns.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// A copy of row `index`.
    pub fn row(&self, index: usize) -> Result<Vec<char>> {
        self.rows
            .get(index)
            .cloned()
            .ok_or_else(|| Error::precondition(format!("Index {index} exceeds pattern height")))
    }

    /// A copy of column `index`.
    pub fn column(&self, index: usize) -> Result<Vec<char>> {
        if index >= self.length {
            return Err(Error::precondition(format!(
                "Index {index} exceeds pattern length"
            )));
        }

        Ok(self.rows.iter().map(|row| row[index]).collect())
    }

    /// The character at `(x, y)`.
    pub fn character(&self, x: usize, y: usize) -> Result<char> {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .ok_or_else(|| Error::precondition(format!("Position {x}, {y} is out of range")))
    }

    /// Whether `character` occurs anywhere in the pattern.
    pub fn contains(&self, character: char) -> bool {
        self.rows.iter().any(|row| row.contains(&character))
    }

    /// A pattern with `height` rows; new rows repeat the last row.
    pub fn with_height(&self, height: usize) -> Self {
        let mut rows: Vec<Vec<char>> = self.rows.iter().take(height).cloned().collect();
        let last = rows
            .last()
            .cloned()
            .unwrap_or_else(|| vec![FILLER; self.length]);
        rows.resize(height, last);

        Self {
            rows,
            length: self.length,
        }
    }

    /// A pattern with `length` columns; new columns repeat each row's last character.
    pub fn with_length(&self, length: usize) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut new_row: Vec<char> = row.iter().take(length).copied().collect();
                let last = new_row.last().copied().unwrap_or(FILLER);
                new_row.resize(length, last);
                new_row
            })
            .collect();

        Self { rows, length }
    }

    /// The rows of this pattern as strings.
    pub fn to_rows(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().collect()).collect()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("rows", &self.to_rows())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_counted_in_code_points() {
        let pattern = Pattern::new(["a😀b", "xyz"]).unwrap();
        assert_eq!(pattern.length(), 3);
        assert_eq!(pattern.character(1, 0).unwrap(), '😀');
        assert!(pattern.contains('😀'));
        assert!(!pattern.contains('q'));
    }

    #[test]
    fn test_ragged_rows_name_both_lengths() {
        let error = Pattern::new(["abc", "ab"]).unwrap_err();
        assert!(error.is_load());
        let message = error.to_string();
        assert!(message.contains("row 1 has 3 characters"));
        assert!(message.contains("row 2 has 2 characters"));
    }

    #[test]
    fn test_out_of_range_access() {
        let pattern = Pattern::new(["ab"]).unwrap();
        assert!(pattern.character(2, 0).unwrap_err().is_precondition());
        assert!(pattern.row(1).unwrap_err().is_precondition());
        assert!(pattern.column(2).unwrap_err().is_precondition());
        assert_eq!(pattern.column(1).unwrap(), vec!['b']);
    }

    #[test]
    fn test_with_length_repeats_last_column() {
        let pattern = Pattern::new(["ab", "cd"]).unwrap();
        let wider = pattern.with_length(4);

        for y in 0..2 {
            assert_eq!(
                wider.character(3, y).unwrap(),
                pattern.character(1, y).unwrap()
            );
        }
        assert_eq!(wider.to_rows(), vec!["abbb", "cddd"]);
        assert_eq!(pattern.with_length(1).to_rows(), vec!["a", "c"]);
    }

    #[test]
    fn test_with_height_repeats_last_row() {
        let pattern = Pattern::new(["ab", "cd"]).unwrap();
        assert_eq!(pattern.with_height(3).to_rows(), vec!["ab", "cd", "cd"]);
        assert_eq!(pattern.with_height(1).to_rows(), vec!["ab"]);
    }

    #[test]
    fn test_growing_empty_pattern_uses_filler() {
        let pattern = Pattern::new(Vec::<String>::new()).unwrap();
        let grown = pattern.with_height(1).with_length(2);
        assert_eq!(grown.to_rows(), vec!["  "]);
    }
}
