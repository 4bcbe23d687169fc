//! Error types for Horizon Inventory.
//!
//! Errors fall into three groups:
//!
//! - **Precondition violations** ([`Error::OutOfBounds`], [`Error::Precondition`]):
//!   bad coordinates, bad ranges, zero-length slot resolution, out-of-range
//!   bar values. These surface immediately at the call site.
//! - **Malformed declarations** ([`Error::Load`]): mask and pattern shape
//!   errors and invalid XML documents, raised while a GUI is being built.
//! - **Unresolved references** ([`Error::Reflection`]): a declaration names an
//!   action, population hook or pane that was never registered.
//!
//! Failures of author-supplied click actions are not represented here; the
//! dispatch loop logs them and carries on.

/// Result type alias for inventory operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, rendering or loading GUIs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A grid coordinate lies outside of the grid.
    #[error(
        "Coordinates must be in-bounds: x = {x}, y = {y}; should be below {length} and {height}"
    )]
    OutOfBounds {
        x: i32,
        y: i32,
        length: i32,
        height: i32,
    },

    /// A caller-supplied argument violated an operation's precondition.
    #[error("{0}")]
    Precondition(String),

    /// A declaration (mask, pattern, XML document) is malformed.
    #[error("Failed to load declaration: {0}")]
    Load(String),

    /// A declaration references something that cannot be resolved.
    #[error("Failed to resolve declared reference: {0}")]
    Reflection(String),
}

impl Error {
    /// Create an out-of-bounds error.
    pub fn out_of_bounds(x: i32, y: i32, length: i32, height: i32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            length,
            height,
        }
    }

    /// Create a precondition error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Create a load error.
    pub fn load(message: impl Into<String>) -> Self {
        Self::Load(message.into())
    }

    /// Create a reflection error.
    pub fn reflection(message: impl Into<String>) -> Self {
        Self::Reflection(message.into())
    }

    /// Whether this error is a precondition violation.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::Precondition(_))
    }

    /// Whether this error was raised while loading a declaration.
    pub fn is_load(&self) -> bool {
        matches!(self, Self::Load(_))
    }

    /// Whether this error is an unresolved declared reference.
    pub fn is_reflection(&self) -> bool {
        matches!(self, Self::Reflection(_))
    }

    /// Re-classify a precondition violation as a load error.
    ///
    /// Used when a declaration feeds an invalid value into a setter; the
    /// message is kept.
    pub fn into_load(self) -> Self {
        match self {
            Self::Load(_) | Self::Reflection(_) => self,
            other => Self::Load(other.to_string()),
        }
    }
}
