//! Ordered registry of declared series

use heapless::{String, Vec};
use log::debug;

use super::frame::FrameBuilder;
use super::{EncodeError, EncodeResult, MAX_SERIES, MAX_SERIES_NAME_LEN, SeriesStyle, validate_text};

/// Fixed-capacity series name
pub type SeriesName = String<MAX_SERIES_NAME_LEN>;

/// A named, styled telemetry channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    name: SeriesName,
    style: SeriesStyle,
}

impl Series {
    /// Series name as sent on the wire
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Display style announced in the metadata
    pub fn style(&self) -> SeriesStyle {
        self.style
    }
}

/// Set of declared series in declaration order
///
/// Declaration only records metadata; nothing is rendered until a frame asks
/// for it. The order is preserved so that every metadata re-announcement is
/// byte-identical.
#[derive(Debug, Default)]
pub struct SeriesRegistry {
    series: Vec<Series, MAX_SERIES>,
}

impl SeriesRegistry {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self { series: Vec::new() }
    }

    /// Register a series.
    ///
    /// Declaring an existing name again with the same style is a no-op.
    /// A different style for an existing name is rejected, since styles are
    /// fixed once announced.
    pub fn declare_series(&mut self, name: &str, style: SeriesStyle) -> EncodeResult<()> {
        validate_text(name, "series name", MAX_SERIES_NAME_LEN)?;
        if name.contains(':') {
            return Err(EncodeError::InvalidText {
                field: "series name",
            });
        }
        style.validate()?;

        if let Some(existing) = self.get(name) {
            return if existing.style == style {
                Ok(())
            } else {
                Err(EncodeError::ConflictingStyle)
            };
        }

        let mut owned = SeriesName::new();
        owned.push_str(name).map_err(|_| EncodeError::InvalidText {
            field: "series name",
        })?;

        self.series
            .push(Series { name: owned, style })
            .map_err(|_| EncodeError::SeriesCapacityExceeded { max: MAX_SERIES })?;

        debug!("Declared series '{}' with style {}", name, style);
        Ok(())
    }

    /// Look up a series by name
    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name.as_str() == name)
    }

    /// Whether `name` has been declared
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over the series in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    /// Number of declared series
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no series has been declared yet
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Start a new frame.
    ///
    /// The returned builder borrows the registry until
    /// [`FrameBuilder::end_frame`] releases the finished payload.
    pub fn begin_frame(&self) -> FrameBuilder<'_> {
        FrameBuilder::new(self)
    }
}
