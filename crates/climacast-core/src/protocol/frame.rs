//! Frame assembly for one outgoing datagram

use core::fmt::{self, Write};

use heapless::String;

use super::registry::SeriesRegistry;
use super::{
    EncodeError, EncodeResult, MAX_FRAME_LEN, MAX_LABEL_LEN, MAX_LINE_LEN, PlotLabels,
    validate_text,
};

/// Text sent in place of a missing or non-finite value
pub const INVALID_VALUE_MARKER: &str = "nan";

/// Numeric value as rendered on the wire
///
/// Finite values use `f32`'s `Display`: the shortest decimal string that
/// parses back to the same `f32`, never in exponent notation (`25.5`, `25`,
/// `-0.125`). Absent and non-finite values render as [`INVALID_VALUE_MARKER`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireValue(pub Option<f32>);

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) if value.is_finite() => write!(f, "{}", value),
            _ => f.write_str(INVALID_VALUE_MARKER),
        }
    }
}

/// Builder for a single frame
///
/// Obtained from [`SeriesRegistry::begin_frame`]. Lines are appended whole or
/// not at all, and the bytes only become visible once
/// [`end_frame`](Self::end_frame) hands out the finished [`Frame`].
pub struct FrameBuilder<'a> {
    registry: &'a SeriesRegistry,
    buffer: String<MAX_FRAME_LEN>,
    lines: usize,
}

impl<'a> FrameBuilder<'a> {
    pub(super) fn new(registry: &'a SeriesRegistry) -> Self {
        Self {
            registry,
            buffer: String::new(),
            lines: 0,
        }
    }

    /// Append the plot metadata: title, x-label, y-label, then one STYLE line
    /// per declared series in declaration order.
    pub fn render_metadata(&mut self, labels: &PlotLabels<'_>) -> EncodeResult<()> {
        validate_text(labels.title, "title", MAX_LABEL_LEN)?;
        validate_text(labels.x_label, "x-label", MAX_LABEL_LEN)?;
        validate_text(labels.y_label, "y-label", MAX_LABEL_LEN)?;

        self.push_line(format_args!("{{TIMEPLOT|SET|title={}}}\n", labels.title))?;
        self.push_line(format_args!("{{TIMEPLOT|SET|x-label={}}}\n", labels.x_label))?;
        self.push_line(format_args!("{{TIMEPLOT|SET|y-label={}}}\n", labels.y_label))?;

        let registry = self.registry;
        for series in registry.iter() {
            self.push_line(format_args!(
                "{{TIMEPLOT|STYLE|{}:{}}}\n",
                series.name(),
                series.style()
            ))?;
        }

        Ok(())
    }

    /// Append one time-series point for `name`.
    ///
    /// The consumer stamps the point with its arrival time, so no timestamp
    /// is sent. Fails with [`EncodeError::UndeclaredSeries`] if `name` was
    /// never declared.
    pub fn render_data(&mut self, name: &str, value: Option<f32>) -> EncodeResult<()> {
        let series = self
            .registry
            .get(name)
            .ok_or(EncodeError::UndeclaredSeries)?;

        self.push_line(format_args!(
            "{{TIMEPLOT|DATA|{}|T|{}}}\n",
            series.name(),
            WireValue(value)
        ))
    }

    /// Number of lines appended so far
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Finish the frame and release the payload
    pub fn end_frame(self) -> Frame {
        Frame {
            bytes: self.buffer,
            lines: self.lines,
        }
    }

    fn push_line(&mut self, args: fmt::Arguments<'_>) -> EncodeResult<()> {
        let mut line: String<MAX_LINE_LEN> = String::new();
        line.write_fmt(args)
            .map_err(|_| EncodeError::FrameOverflow { max: MAX_LINE_LEN })?;

        self.buffer
            .push_str(&line)
            .map_err(|_| EncodeError::FrameOverflow { max: MAX_FRAME_LEN })?;
        self.lines += 1;
        Ok(())
    }
}

/// A finished datagram payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: String<MAX_FRAME_LEN>,
    lines: usize,
}

impl Frame {
    /// Payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_bytes()
    }

    /// Payload as text
    pub fn as_str(&self) -> &str {
        self.bytes.as_str()
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the frame holds no lines
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of protocol lines in the frame
    pub fn line_count(&self) -> usize {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Color, LineStyle, MarkerStyle, SeriesStyle};
    use alloc::string::ToString;
    use alloc::vec::Vec;

    const LABELS: PlotLabels<'static> = PlotLabels::new("Climate", "Time", "Value");

    fn climate_registry() -> SeriesRegistry {
        let mut registry = SeriesRegistry::new();
        registry
            .declare_series(
                "Raw Temperature",
                SeriesStyle::new(Color::Red, LineStyle::NoLine, 2, MarkerStyle::Square),
            )
            .unwrap();
        registry
            .declare_series(
                "Raw Humidity",
                SeriesStyle::new(Color::Blue, LineStyle::NoLine, 2, MarkerStyle::Square),
            )
            .unwrap();
        registry
            .declare_series(
                "Filtered Temperature",
                SeriesStyle::new(Color::Red, LineStyle::Solid, 2, MarkerStyle::NoMarker),
            )
            .unwrap();
        registry
            .declare_series(
                "Filtered Humidity",
                SeriesStyle::new(Color::Blue, LineStyle::Solid, 2, MarkerStyle::NoMarker),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_metadata_lines_in_order() {
        let registry = climate_registry();
        let mut builder = registry.begin_frame();
        builder.render_metadata(&LABELS).unwrap();
        let frame = builder.end_frame();

        assert_eq!(frame.line_count(), 3 + 4);
        assert_eq!(
            frame.as_str(),
            "{TIMEPLOT|SET|title=Climate}\n\
             {TIMEPLOT|SET|x-label=Time}\n\
             {TIMEPLOT|SET|y-label=Value}\n\
             {TIMEPLOT|STYLE|Raw Temperature:rn2#}\n\
             {TIMEPLOT|STYLE|Raw Humidity:bn2#}\n\
             {TIMEPLOT|STYLE|Filtered Temperature:rs2n}\n\
             {TIMEPLOT|STYLE|Filtered Humidity:bs2n}\n"
        );
    }

    #[test]
    fn test_metadata_then_data_lines() {
        let registry = climate_registry();
        let mut builder = registry.begin_frame();
        builder.render_metadata(&LABELS).unwrap();
        builder.render_data("Raw Temperature", Some(30.0)).unwrap();
        builder.render_data("Raw Humidity", Some(61.25)).unwrap();
        builder.render_data("Filtered Temperature", Some(25.5)).unwrap();
        builder.render_data("Filtered Humidity", Some(51.125)).unwrap();
        let frame = builder.end_frame();

        let lines: Vec<&str> = frame.as_str().split_terminator('\n').collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(frame.line_count(), 11);
        assert!(frame.as_str().ends_with('\n'));
        assert!(lines.iter().all(|l| l.starts_with("{TIMEPLOT|") && l.ends_with('}')));
        assert_eq!(lines[7], "{TIMEPLOT|DATA|Raw Temperature|T|30}");
        assert_eq!(lines[8], "{TIMEPLOT|DATA|Raw Humidity|T|61.25}");
        assert_eq!(lines[10], "{TIMEPLOT|DATA|Filtered Humidity|T|51.125}");
    }

    #[test]
    fn test_filtered_value_data_line() {
        let registry = climate_registry();
        let mut builder = registry.begin_frame();
        builder.render_data("Filtered Temperature", Some(25.5)).unwrap();
        let frame = builder.end_frame();

        assert_eq!(
            frame.as_bytes(),
            b"{TIMEPLOT|DATA|Filtered Temperature|T|25.5}\n"
        );
    }

    #[test]
    fn test_invalid_value_uses_marker() {
        let registry = climate_registry();
        let mut builder = registry.begin_frame();
        builder.render_data("Raw Temperature", None).unwrap();
        builder.render_data("Raw Humidity", Some(f32::NAN)).unwrap();
        let frame = builder.end_frame();

        assert_eq!(
            frame.as_str(),
            "{TIMEPLOT|DATA|Raw Temperature|T|nan}\n{TIMEPLOT|DATA|Raw Humidity|T|nan}\n"
        );
    }

    #[test]
    fn test_wire_value_formatting() {
        assert_eq!(WireValue(Some(25.0)).to_string(), "25");
        assert_eq!(WireValue(Some(-0.125)).to_string(), "-0.125");
        assert_eq!(WireValue(Some(21.7)).to_string(), "21.7");
        assert_eq!(WireValue(Some(f32::INFINITY)).to_string(), INVALID_VALUE_MARKER);
        assert_eq!(WireValue(None).to_string(), INVALID_VALUE_MARKER);
    }

    #[test]
    fn test_undeclared_series_rejected() {
        let registry = climate_registry();
        let mut builder = registry.begin_frame();
        builder.render_data("Raw Temperature", Some(20.0)).unwrap();

        assert_eq!(
            builder.render_data("Pressure", Some(1013.0)),
            Err(EncodeError::UndeclaredSeries)
        );

        let frame = builder.end_frame();
        assert_eq!(frame.line_count(), 1);
        assert_eq!(frame.as_str(), "{TIMEPLOT|DATA|Raw Temperature|T|20}\n");
    }

    #[test]
    fn test_invalid_label_writes_nothing() {
        let registry = climate_registry();
        let mut builder = registry.begin_frame();
        let labels = PlotLabels::new("Climate", "Time", "a|b");

        assert_eq!(
            builder.render_metadata(&labels),
            Err(EncodeError::InvalidText { field: "y-label" })
        );
        assert!(builder.end_frame().is_empty());
    }

    #[test]
    fn test_empty_registry_metadata() {
        let registry = SeriesRegistry::new();
        let mut builder = registry.begin_frame();
        builder.render_metadata(&LABELS).unwrap();

        assert_eq!(builder.end_frame().line_count(), 3);
    }

    #[test]
    fn test_overflow_keeps_whole_lines() {
        let registry = climate_registry();
        let mut builder = registry.begin_frame();

        let mut accepted = 0;
        let error = loop {
            match builder.render_data("Filtered Temperature", Some(25.5)) {
                Ok(()) => accepted += 1,
                Err(e) => break e,
            }
        };

        assert_eq!(error, EncodeError::FrameOverflow { max: MAX_FRAME_LEN });

        let frame = builder.end_frame();
        let line = "{TIMEPLOT|DATA|Filtered Temperature|T|25.5}\n";
        assert_eq!(frame.line_count(), accepted);
        assert_eq!(frame.len(), accepted * line.len());
        assert!(frame.len() <= MAX_FRAME_LEN);
        assert!(frame.as_str().split_terminator('\n').all(|l| l.len() + 1 == line.len()));
    }
}
