//! The four climate series and the plot labels they are announced with

use crate::protocol::{
    Color, EncodeResult, LineStyle, MarkerStyle, PlotLabels, SeriesRegistry, SeriesStyle,
};

pub const RAW_TEMPERATURE: &str = "Raw Temperature";
pub const RAW_HUMIDITY: &str = "Raw Humidity";
pub const FILTERED_TEMPERATURE: &str = "Filtered Temperature";
pub const FILTERED_HUMIDITY: &str = "Filtered Humidity";

/// Title and axis labels of the climate plot
pub const CLIMATE_LABELS: PlotLabels<'static> =
    PlotLabels::new("Temperature & Humidity", "Time", "Celsius / %RH");

/// Series in announcement order with their styles.
///
/// Raw readings are drawn as unconnected squares, smoothed values as solid
/// lines in the same color.
pub const CLIMATE_SERIES: [(&str, SeriesStyle); 4] = [
    (
        RAW_TEMPERATURE,
        SeriesStyle::new(Color::Red, LineStyle::NoLine, 2, MarkerStyle::Square),
    ),
    (
        RAW_HUMIDITY,
        SeriesStyle::new(Color::Blue, LineStyle::NoLine, 2, MarkerStyle::Square),
    ),
    (
        FILTERED_TEMPERATURE,
        SeriesStyle::new(Color::Red, LineStyle::Solid, 2, MarkerStyle::NoMarker),
    ),
    (
        FILTERED_HUMIDITY,
        SeriesStyle::new(Color::Blue, LineStyle::Solid, 2, MarkerStyle::NoMarker),
    ),
];

/// Declare all climate series on `registry`
pub fn declare_climate_series(registry: &mut SeriesRegistry) -> EncodeResult<()> {
    for (name, style) in CLIMATE_SERIES {
        registry.declare_series(name, style)?;
    }
    Ok(())
}
