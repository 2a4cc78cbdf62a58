//! Error types for the driver
//!
//! ## Error Types
//!
//! - [`Error`] - Runtime errors during display operations
//! - [`FramebufferError`] - Per-pixel and allocation errors, local to one call
//! - [`PathError`] - Coordinate list precondition violations
//! - [`BuilderError`] - Errors during configuration construction
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware
//!   communication errors
//!
//! Framebuffer and path errors are per-call and never invalidate the display;
//! an [`Error::Interface`] aborts the whole in-progress command sequence and
//! leaves the panel in an unknown electrical state, so the display should be
//! recreated after one.
//!
//! ## Example
//!
//! ```
//! use il3820::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(1000, 128); // Too many rows
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Maximum gate outputs (rows) supported by the panel class
///
/// The 2.9" module wires 296 gate lines.
pub const MAX_GATE_OUTPUTS: u16 = 296;

/// Maximum source outputs (columns) supported by the panel class
///
/// The 2.9" module wires 128 source lines.
pub const MAX_SOURCE_OUTPUTS: u16 = 128;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`]
    /// implementation, including the busy-wait timeout. The in-progress
    /// command sequence was aborted and is not resumable; the panel state is
    /// unknown.
    Interface(I::Error),
    /// Framebuffer error (out-of-range coordinate or allocation failure)
    Framebuffer(FramebufferError),
    /// The panel is already powered on
    ///
    /// Waking an active panel is refused rather than re-running the register
    /// programming sequence; no bus traffic occurs.
    AlreadyActive,
    /// A termination request was observed at a power checkpoint
    ///
    /// The panel has already been put back to deep sleep; the caller should
    /// proceed with process teardown.
    Terminated,
}

impl<I: DisplayInterface> From<FramebufferError> for Error<I> {
    fn from(err: FramebufferError) -> Self {
        Self::Framebuffer(err)
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::Framebuffer(e) => write!(f, "{e}"),
            Self::AlreadyActive => write!(f, "Panel is already powered on"),
            Self::Terminated => write!(f, "Termination requested, panel sent to sleep"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors raised by framebuffer operations
///
/// Always local to the failing call: an out-of-range pixel write has no side
/// effect and later drawing operations proceed normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferError {
    /// Coordinate outside the panel bounds
    OutOfRange {
        /// X coordinate that was requested
        x: u32,
        /// Y coordinate that was requested
        y: u32,
    },
    /// Buffer allocation failed at display creation
    OutOfMemory,
}

impl core::fmt::Display for FramebufferError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfRange { x, y } => {
                write!(f, "Coordinate ({x},{y}) outside panel bounds")
            }
            Self::OutOfMemory => write!(f, "Framebuffer allocation failed"),
        }
    }
}

impl core::error::Error for FramebufferError {}

/// Errors raised by [`Path`](crate::path::Path) operations
///
/// All are local precondition violations and leave the path unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// Coordinate exceeds the bounds captured at path creation
    OutOfRange {
        /// X coordinate that was requested
        x: u32,
        /// Y coordinate that was requested
        y: u32,
    },
    /// 1-based removal index outside the valid range
    InvalidIndex(usize),
    /// The traversal cursor has passed the last coordinate
    EndOfPath,
}

impl core::fmt::Display for PathError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfRange { x, y } => {
                write!(f, "Coordinate ({x},{y}) exceeds maximum dimensions")
            }
            Self::InvalidIndex(n) => write!(f, "No coordinate at index {n}"),
            Self::EndOfPath => write!(f, "Traversal reached the end of the path"),
        }
    }
}

impl core::error::Error for PathError {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is
/// created.
#[derive(Debug)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be
    /// called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for
    /// constraints.
    InvalidDimensions {
        /// Number of rows (height) requested
        rows: u16,
        /// Number of columns (width) requested
        cols: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "Invalid dimensions {rows}x{cols} (max {MAX_GATE_OUTPUTS}x{MAX_SOURCE_OUTPUTS}, cols must be multiple of 8)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
