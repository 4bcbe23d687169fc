//! Boolean placement masks.
//!
//! A [`Mask`] marks which cells of a pane may receive an item. Masks are
//! immutable; the resize operations return new values and pad with enabled
//! cells.
//!
//! ```
//! use horizon_inventory_core::Mask;
//!
//! let mask = Mask::new(["101", "010"]).unwrap();
//! assert_eq!(mask.enabled_count(), 3);
//! assert!(mask.is_enabled(1, 1));
//!
//! let taller = mask.with_height(3);
//! assert_eq!(taller.row(2).unwrap(), vec![true, true, true]);
//! ```

use std::fmt;

use crate::error::{Error, Result};

/// An immutable rectangular grid of enabled/disabled cells.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Mask {
    /// Row-major cells.
    cells: Vec<bool>,
    length: usize,
    height: usize,
}

impl Mask {
    /// Build a mask from row strings made of `0` and `1`.
    ///
    /// Fails with a load error when a row contains another character or when
    /// the rows differ in length.
    pub fn new<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells = Vec::new();
        let mut length = None;
        let mut height = 0;

        for row in rows {
            let row = row.as_ref();
            let row_length = row.chars().count();

            match length {
                None => length = Some(row_length),
                Some(expected) if expected != row_length => {
                    return Err(Error::load("Lengths of each string should be equal"));
                }
                Some(_) => {}
            }

            for character in row.chars() {
                match character {
                    '0' => cells.push(false),
                    '1' => cells.push(true),
                    _ => return Err(Error::load("Strings may only contain '0' and '1'")),
                }
            }

            height += 1;
        }

        Ok(Self {
            cells,
            length: length.unwrap_or(0),
            height,
        })
    }

    /// A mask of the given size with every cell enabled.
    pub fn filled(length: usize, height: usize) -> Self {
        Self {
            cells: vec![true; length * height],
            length,
            height,
        }
    }

    /// Number of columns.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of enabled cells.
    pub fn enabled_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// A copy of row `index`.
    pub fn row(&self, index: usize) -> Result<Vec<bool>> {
        if index >= self.height {
            return Err(Error::precondition(format!(
                "Index {index} exceeds mask height"
            )));
        }

        let start = index * self.length;
        Ok(self.cells[start..start + self.length].to_vec())
    }

    /// A copy of column `index`.
    pub fn column(&self, index: usize) -> Result<Vec<bool>> {
        if index >= self.length {
            return Err(Error::precondition(format!(
                "Index {index} exceeds mask length"
            )));
        }

        Ok((0..self.height)
            .map(|y| self.cells[y * self.length + index])
            .collect())
    }

    /// Whether the cell at `(x, y)` is enabled. Cells outside the mask are disabled.
    pub fn is_enabled(&self, x: usize, y: usize) -> bool {
        x < self.length && y < self.height && self.cells[y * self.length + x]
    }

    /// A mask with `height` rows; new rows are fully enabled.
    pub fn with_height(&self, height: usize) -> Self {
        let kept = height.min(self.height) * self.length;
        let mut cells = self.cells[..kept].to_vec();
        cells.resize(height * self.length, true);

        Self {
            cells,
            length: self.length,
            height,
        }
    }

    /// A mask with `length` columns; new columns are enabled.
    pub fn with_length(&self, length: usize) -> Self {
        let kept = length.min(self.length);
        let mut cells = Vec::with_capacity(length * self.height);

        for y in 0..self.height {
            let start = y * self.length;
            cells.extend_from_slice(&self.cells[start..start + kept]);
            cells.extend(std::iter::repeat_n(true, length - kept));
        }

        Self {
            cells,
            length,
            height: self.height,
        }
    }

    /// The rows of this mask as `0`/`1` strings.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                self.cells[y * self.length..(y + 1) * self.length]
                    .iter()
                    .map(|cell| if *cell { '1' } else { '0' })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mask").field("rows", &self.to_rows()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_characters() {
        let error = Mask::new(["102"]).unwrap_err();
        assert!(error.is_load());
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let error = Mask::new(["11", "1"]).unwrap_err();
        assert!(error.is_load());
    }

    #[test]
    fn test_empty_mask() {
        let mask = Mask::new(Vec::<&str>::new()).unwrap();
        assert_eq!(mask.length(), 0);
        assert_eq!(mask.height(), 0);
        assert_eq!(mask.enabled_count(), 0);
    }

    #[test]
    fn test_row_and_column() {
        let mask = Mask::new(["100", "011"]).unwrap();
        assert_eq!(mask.row(1).unwrap(), vec![false, true, true]);
        assert_eq!(mask.column(0).unwrap(), vec![true, false]);
        assert!(mask.row(2).unwrap_err().is_precondition());
        assert!(mask.column(3).unwrap_err().is_precondition());
    }

    #[test]
    fn test_with_height_grow_and_shrink() {
        let mask = Mask::new(["010", "000"]).unwrap();

        let grown = mask.with_height(4);
        assert_eq!(grown.height(), 4);
        assert_eq!(grown.row(0).unwrap(), mask.row(0).unwrap());
        assert_eq!(grown.row(1).unwrap(), mask.row(1).unwrap());
        assert_eq!(grown.row(2).unwrap(), vec![true; 3]);
        assert_eq!(grown.row(3).unwrap(), vec![true; 3]);

        let shrunk = mask.with_height(1);
        assert_eq!(shrunk.height(), 1);
        assert_eq!(shrunk.row(0).unwrap(), mask.row(0).unwrap());
    }

    #[test]
    fn test_with_length_grow_and_shrink() {
        let mask = Mask::new(["00", "01"]).unwrap();

        let grown = mask.with_length(4);
        assert_eq!(grown.to_rows(), vec!["0011", "0111"]);

        let shrunk = mask.with_length(1);
        assert_eq!(shrunk.to_rows(), vec!["0", "0"]);
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Mask::new(["11", "11"]).unwrap(), Mask::filled(2, 2));
        assert_ne!(Mask::new(["10"]).unwrap(), Mask::new(["01"]).unwrap());
    }

    #[test]
    fn test_is_enabled_outside_is_false() {
        let mask = Mask::filled(2, 2);
        assert!(mask.is_enabled(1, 1));
        assert!(!mask.is_enabled(2, 0));
        assert!(!mask.is_enabled(0, 2));
    }
}
