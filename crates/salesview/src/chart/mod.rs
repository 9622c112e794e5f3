//! Chart specifications and the per-view styling that produces them.

mod builder;
pub mod palette;
mod spec;

pub use builder::{ChartBuilder, format_thousands};
pub use palette::Palette;
pub use spec::{
    Axis, BarMode, BarSeries, ChartKind, ChartSpec, ColorMapping, ColorStop, Domain, Font,
    LineDash, Orientation, Outline, Overlay, PieSeries, Series, Title, TitleAnchor, WedgeText,
};
