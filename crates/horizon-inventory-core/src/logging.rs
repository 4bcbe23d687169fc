//! Logging facilities for Horizon Inventory.
//!
//! Horizon Inventory uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the host installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_inventory=debug")
//!         .init();
//! }
//! ```
//!
//! Failures of author-supplied click actions and GUI callbacks are reported
//! at `error` level under [`targets::ITEM`] and [`targets::GUI`]. Items clipped
//! while painting are reported at `trace` level under [`targets::PANE`].

/// Span names used throughout Horizon Inventory for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Rendering a component into its grid.
    pub const DISPLAY: &str = "horizon_inventory::display";
    /// Dispatching a click through the pane tree.
    pub const CLICK: &str = "horizon_inventory::click";
    /// Loading a declarative document.
    pub const LOAD: &str = "horizon_inventory::load";
    /// Processing deferred tasks.
    pub const TASK: &str = "horizon_inventory::task";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core model target.
    pub const CORE: &str = "horizon_inventory_core";
    /// Deferred task target.
    pub const TASK: &str = "horizon_inventory_core::task";
    /// Inventory component target.
    pub const COMPONENT: &str = "horizon_inventory::component";
    /// Pane layout target.
    pub const PANE: &str = "horizon_inventory::pane";
    /// Item action target.
    pub const ITEM: &str = "horizon_inventory::item";
    /// GUI glue target.
    pub const GUI: &str = "horizon_inventory::gui";
    /// Declarative loader target.
    pub const XML: &str = "horizon_inventory::xml";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a render or a click dispatch.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_inventory::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros with the core target.
#[macro_export]
macro_rules! inventory_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "horizon_inventory_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! inventory_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_inventory_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! inventory_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "horizon_inventory_core", $($arg)*)
    };
}
