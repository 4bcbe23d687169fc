//! Slot addressing.
//!
//! A [`Slot`] describes a position inside a container of unknown length. It is
//! either a fixed pair of coordinates or a flattened index that is resolved
//! row-major once the container length is known.

use std::fmt;

use crate::error::{Error, Result};

/// A position resolvable to `(x, y)` given a container length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// Fixed coordinates, independent of the container length.
    XY { x: i32, y: i32 },
    /// A flattened row-major index.
    Indexed(i32),
}

impl Slot {
    /// Create a slot from explicit coordinates.
    pub const fn xy(x: i32, y: i32) -> Self {
        Self::XY { x, y }
    }

    /// Create a slot from a flattened index.
    pub const fn indexed(index: i32) -> Self {
        Self::Indexed(index)
    }

    /// Resolve this slot to `(x, y)` inside a container of `length` columns.
    ///
    /// Fails for [`Slot::Indexed`] when `length` is zero.
    pub fn resolve(&self, length: i32) -> Result<(i32, i32)> {
        match *self {
            Self::XY { x, y } => Ok((x, y)),
            Self::Indexed(_) if length == 0 => Err(Error::precondition("Length may not be zero")),
            Self::Indexed(index) => Ok((index % length, index / length)),
        }
    }

    /// The x coordinate inside a container of `length` columns.
    pub fn x(&self, length: i32) -> Result<i32> {
        self.resolve(length).map(|(x, _)| x)
    }

    /// The y coordinate inside a container of `length` columns.
    pub fn y(&self, length: i32) -> Result<i32> {
        self.resolve(length).map(|(_, y)| y)
    }

    /// Whether this slot resolves to `(x, y)` inside a container of `length` columns.
    pub fn is_at(&self, x: i32, y: i32, length: i32) -> bool {
        self.resolve(length) == Ok((x, y))
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::xy(0, 0)
    }
}

impl From<(i32, i32)> for Slot {
    fn from((x, y): (i32, i32)) -> Self {
        Self::xy(x, y)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::XY { x, y } => write!(f, "({x}, {y})"),
            Self::Indexed(index) => write!(f, "#{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xy_ignores_length() {
        let slot = Slot::xy(3, 4);
        assert_eq!(slot.resolve(9), Ok((3, 4)));
        assert_eq!(slot.resolve(0), Ok((3, 4)));
    }

    #[test]
    fn test_indexed_resolves_row_major() {
        assert_eq!(Slot::indexed(10).resolve(9), Ok((1, 1)));
        assert_eq!(Slot::indexed(8).resolve(9), Ok((8, 0)));
        assert_eq!(Slot::indexed(0).x(5), Ok(0));
        assert_eq!(Slot::indexed(7).y(5), Ok(1));
    }

    #[test]
    fn test_indexed_zero_length_fails() {
        let error = Slot::indexed(10).resolve(0).unwrap_err();
        assert!(error.is_precondition());
        assert_eq!(error.to_string(), "Length may not be zero");
    }

    #[test]
    fn test_is_at() {
        assert!(Slot::indexed(4).is_at(1, 1, 3));
        assert!(!Slot::indexed(4).is_at(1, 1, 0));
        assert!(Slot::xy(2, 0).is_at(2, 0, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Slot::xy(1, 2).to_string(), "(1, 2)");
        assert_eq!(Slot::indexed(5).to_string(), "#5");
    }
}
