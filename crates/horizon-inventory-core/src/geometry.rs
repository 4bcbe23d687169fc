//! Grid geometry shared by the pane layouts.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The primary direction in which a pane lays out its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Rows first, left to right.
    #[default]
    Horizontal,
    /// Columns first, top to bottom.
    Vertical,
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(Error::load(format!("Unknown orientation '{s}'"))),
        }
    }
}

/// Placement of a partially filled line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Items start at the first enabled cell.
    #[default]
    Begin,
    /// Items are centered between the enabled cells.
    Center,
}

impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "begin" => Ok(Self::Begin),
            "center" => Ok(Self::Center),
            _ => Err(Error::load(format!("Unknown alignment '{s}'"))),
        }
    }
}

/// Mirroring applied to a pane's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flip {
    /// Mirror along the vertical axis (x becomes `length - x - 1`).
    pub horizontal: bool,
    /// Mirror along the horizontal axis (y becomes `height - y - 1`).
    pub vertical: bool,
}

impl Flip {
    /// Apply the flip to a cell of a `length x height` area.
    pub fn apply(&self, x: i32, y: i32, length: i32, height: i32) -> (i32, i32) {
        let x = if self.horizontal { length - x - 1 } else { x };
        let y = if self.vertical { height - y - 1 } else { y };
        (x, y)
    }
}

/// A clockwise rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rotation(u16);

impl Rotation {
    /// No rotation.
    pub const NONE: Self = Self(0);

    /// Create a rotation from degrees.
    ///
    /// The value must be a multiple of 90; it is normalized into `0..360`, so
    /// `-90` is the same as `270`.
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        if degrees % 90 != 0 {
            return Err(Error::precondition("Rotation must be a multiple of 90"));
        }

        Ok(Self(degrees.rem_euclid(360) as u16))
    }

    /// The rotation in degrees, in `0..360`.
    pub fn degrees(self) -> i32 {
        i32::from(self.0)
    }

    /// Rotate a cell of a `length x height` area clockwise.
    pub fn apply(self, x: i32, y: i32, length: i32, height: i32) -> (i32, i32) {
        match self.0 {
            90 => (height - 1 - y, x),
            180 => (length - 1 - x, height - 1 - y),
            270 => (y, length - 1 - x),
            _ => (x, y),
        }
    }

    /// Rotate a cell counter-clockwise; the inverse of [`Rotation::apply`] on square areas.
    pub fn apply_counter_clockwise(self, x: i32, y: i32, length: i32, height: i32) -> (i32, i32) {
        Self((360 - self.0) % 360).apply(x, y, length, height)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Whether `(x, y)` lies inside a `length x height` area.
pub fn contains(x: i32, y: i32, length: i32, height: i32) -> bool {
    x >= 0 && x < length && y >= 0 && y < height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_normalizes() {
        assert_eq!(Rotation::from_degrees(450).unwrap().degrees(), 90);
        assert_eq!(Rotation::from_degrees(-90).unwrap().degrees(), 270);
        assert!(Rotation::from_degrees(45).unwrap_err().is_precondition());
    }

    #[test]
    fn test_clockwise_rotation_on_square() {
        let quarter = Rotation::from_degrees(90).unwrap();
        assert_eq!(quarter.apply(0, 0, 3, 3), (2, 0));
        assert_eq!(quarter.apply(2, 0, 3, 3), (2, 2));

        let half = Rotation::from_degrees(180).unwrap();
        assert_eq!(half.apply(0, 0, 3, 3), (2, 2));

        let three = Rotation::from_degrees(270).unwrap();
        assert_eq!(three.apply(0, 0, 3, 3), (0, 2));
    }

    #[test]
    fn test_counter_clockwise_inverts() {
        let quarter = Rotation::from_degrees(90).unwrap();
        let (x, y) = quarter.apply(1, 0, 3, 3);
        assert_eq!(quarter.apply_counter_clockwise(x, y, 3, 3), (1, 0));
    }

    #[test]
    fn test_flip() {
        let flip = Flip {
            horizontal: true,
            vertical: false,
        };
        assert_eq!(flip.apply(0, 1, 9, 3), (8, 1));

        let both = Flip {
            horizontal: true,
            vertical: true,
        };
        assert_eq!(both.apply(0, 0, 2, 2), (1, 1));
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("VERTICAL".parse::<Orientation>().unwrap(), Orientation::Vertical);
        assert_eq!("center".parse::<Alignment>().unwrap(), Alignment::Center);
        assert!("diagonal".parse::<Orientation>().unwrap_err().is_load());
    }
}
