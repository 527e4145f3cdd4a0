//! `TIMEPLOT` line protocol encoder
//!
//! Translates a registry of named, styled series into newline-delimited
//! plotting commands and batches them into one datagram-sized frame:
//!
//! ```text
//! {TIMEPLOT|SET|title=<text>}
//! {TIMEPLOT|SET|x-label=<text>}
//! {TIMEPLOT|SET|y-label=<text>}
//! {TIMEPLOT|STYLE|<series>:<color><line><width><marker>}
//! {TIMEPLOT|DATA|<series>|T|<value>}
//! ```
//!
//! Every frame is self-describing when it carries the metadata lines, so a
//! listener that joins mid-stream (or misses a packet) still ends up with a
//! styled plot after the next re-announcement.
//!
//! # Examples
//!
//! ```
//! use climacast_core::protocol::*;
//!
//! let mut registry = SeriesRegistry::new();
//! let style = SeriesStyle::new(Color::Red, LineStyle::Solid, 2, MarkerStyle::NoMarker);
//! registry.declare_series("Filtered Temperature", style).unwrap();
//!
//! let mut frame = registry.begin_frame();
//! frame.render_data("Filtered Temperature", Some(25.5)).unwrap();
//! let frame = frame.end_frame();
//!
//! assert_eq!(frame.as_str(), "{TIMEPLOT|DATA|Filtered Temperature|T|25.5}\n");
//! ```

use thiserror_no_std::Error;

mod frame;
mod registry;
mod style;

pub use frame::{Frame, FrameBuilder, INVALID_VALUE_MARKER, WireValue};
pub use registry::{Series, SeriesName, SeriesRegistry};
pub use style::{Color, LineStyle, MarkerStyle, SeriesStyle};

/// Largest UDP payload that fits a 1500-byte Ethernet MTU unfragmented
pub const MAX_FRAME_LEN: usize = 1472;

/// Upper bound for a single rendered line, including the newline
pub const MAX_LINE_LEN: usize = 160;

/// Maximum number of series a registry can hold
pub const MAX_SERIES: usize = 8;

/// Maximum length of a series name in bytes
pub const MAX_SERIES_NAME_LEN: usize = 32;

/// Maximum length of the title and axis labels in bytes
pub const MAX_LABEL_LEN: usize = 128;

/// Error types for protocol encoding
///
/// These are programming errors on the caller's side, not runtime conditions
/// of the transport or the sensor.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Data rendered for a series that was never declared
    #[error("Series was never declared")]
    UndeclaredSeries,

    /// Series declared twice with different styles
    #[error("Series already declared with a different style")]
    ConflictingStyle,

    /// Registry already holds `MAX_SERIES` series
    #[error("Series capacity exceeded (max: {max})")]
    SeriesCapacityExceeded {
        /// Maximum allowed series count
        max: usize,
    },

    /// Line width of zero
    #[error("Line width must be positive")]
    InvalidLineWidth,

    /// Text field is empty, too long, or contains a protocol delimiter
    #[error("Invalid {field}: empty, too long, or contains a reserved character")]
    InvalidText {
        /// Which field was rejected
        field: &'static str,
    },

    /// Line does not fit into the remaining frame capacity
    #[error("Frame capacity exceeded (max: {max} bytes)")]
    FrameOverflow {
        /// Maximum frame size in bytes
        max: usize,
    },
}

/// Result type for protocol operations
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Title and axis labels announced with the plot metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotLabels<'a> {
    /// Plot title
    pub title: &'a str,
    /// X-axis label
    pub x_label: &'a str,
    /// Y-axis label
    pub y_label: &'a str,
}

impl<'a> PlotLabels<'a> {
    /// Create a new set of labels
    pub const fn new(title: &'a str, x_label: &'a str, y_label: &'a str) -> Self {
        Self {
            title,
            x_label,
            y_label,
        }
    }
}

/// Characters that frame or separate protocol fields
const RESERVED: [char; 5] = ['{', '}', '|', '\n', '\r'];

/// Check that `text` can be embedded in a protocol field.
pub(crate) fn validate_text(text: &str, field: &'static str, max_len: usize) -> EncodeResult<()> {
    let valid = !text.is_empty()
        && text.len() <= max_len
        && !text.chars().any(|c| RESERVED.contains(&c));

    if valid {
        Ok(())
    } else {
        Err(EncodeError::InvalidText { field })
    }
}
