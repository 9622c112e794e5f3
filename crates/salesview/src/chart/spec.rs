//! Declarative chart descriptions.
//!
//! A [`ChartSpec`] says what to draw for one view and carries all data points
//! it needs, so a renderer never looks back at the table.

use serde::Serialize;

/// Overall shape of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Donut,
    Bar,
    HorizontalBar,
    GroupedBar,
}

/// How several bar series share a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    Group,
    Stack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleAnchor {
    Default,
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    pub anchor: TitleAnchor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Title {
    /// Title with renderer defaults for placement and font.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            anchor: TitleAnchor::Default,
            font: None,
        }
    }

    pub fn styled(
        text: impl Into<String>,
        anchor: TitleAnchor,
        family: Option<&str>,
        color: &str,
        size: u32,
    ) -> Self {
        Self {
            text: text.into(),
            anchor,
            font: Some(Font {
                family: family.map(str::to_string),
                color: Some(color.to_string()),
                size,
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_angle: Option<i32>,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            tick_angle: None,
        }
    }

    pub fn with_tick_angle(mut self, angle: i32) -> Self {
        self.tick_angle = Some(angle);
        self
    }
}

/// One stop of a continuous colorscale, `position` in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: String,
}

/// How bar colors are chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ColorMapping {
    /// Same color for every bar.
    Fixed { color: String },
    /// One color per category, in category order.
    Categorical { colors: Vec<String> },
    /// Colors interpolated from the bar values, with a labelled color bar.
    Continuous { scale: Vec<ColorStop>, title: String },
}

/// Position of a pie within the plotting area, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Domain {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outline {
    pub color: String,
    pub width: f64,
}

/// Text drawn on pie wedges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WedgeText {
    LabelPercent,
    Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Inner radius as a fraction of the outer radius; 0 is a full pie.
    pub hole: f64,
    /// Per-wedge offset from the center; empty means none.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pull: Vec<f64>,
    pub colors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
    pub text: WedgeText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    pub orientation: Orientation,
    pub color: ColorMapping,
    /// Value labels drawn outside the bar ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Series {
    Pie(PieSeries),
    Bar(BarSeries),
}

impl Series {
    pub fn len(&self) -> usize {
        match self {
            Series::Pie(p) => p.values.len(),
            Series::Bar(b) => b.values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDash {
    Solid,
    Dash,
}

/// Annotations drawn on top of the series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Overlay {
    /// Lines and markers through the points of a bar series.
    TrendLine {
        name: String,
        categories: Vec<String>,
        values: Vec<f64>,
        color: String,
        width: f64,
        marker_size: f64,
    },
    /// Reference line across the category axis at `value` on the value axis.
    Threshold {
        value: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        color: String,
        width: f64,
        dash: LineDash,
    },
}

/// Everything a renderer needs to draw one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: Title,
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overlays: Vec<Overlay>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
    pub show_legend: bool,
    pub width: u32,
    pub height: u32,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: Title, width: u32, height: u32) -> Self {
        Self {
            kind,
            title,
            series: Vec::new(),
            overlays: Vec::new(),
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            bar_mode: None,
            show_legend: false,
            width,
            height,
        }
    }

    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn overlay(mut self, overlay: Overlay) -> Self {
        self.overlays.push(overlay);
        self
    }

    pub fn axes(mut self, x: Axis, y: Axis) -> Self {
        self.x_axis = x;
        self.y_axis = y;
        self
    }

    pub fn bar_mode(mut self, mode: BarMode) -> Self {
        self.bar_mode = Some(mode);
        self
    }

    pub fn legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    /// Number of categories on the category axis of the first series.
    pub fn category_count(&self) -> usize {
        self.series.first().map(Series::len).unwrap_or(0)
    }
}
