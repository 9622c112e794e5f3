//! Standalone HTML pages drawn with Plotly.js.

use std::fs;

use serde_json::{Map, Value, json};

use super::{Artifact, ChartRenderer};
use crate::chart::{
    BarMode, BarSeries, ChartSpec, ColorMapping, LineDash, Orientation, Overlay, PieSeries, Series, Title,
    TitleAnchor, WedgeText,
};
use crate::config::PlotlySource;
use crate::error::{Result, SalesviewError};
use crate::views::AggregateView;

/// How the page loads Plotly.js.
#[derive(Debug, Clone)]
enum Script {
    Src(String),
    Inline(String),
}

/// Renders a view as an interactive chart followed by its data table.
#[derive(Debug, Clone)]
pub struct PlotlyHtmlRenderer {
    script: Script,
}

impl PlotlyHtmlRenderer {
    /// Reference Plotly.js by URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            script: Script::Src(url.into()),
        }
    }

    /// Resolve the configured Plotly.js source, reading a local bundle once.
    pub fn from_source(source: &PlotlySource) -> Result<Self> {
        match source {
            PlotlySource::Cdn { url } => Ok(Self::from_url(url.clone())),
            PlotlySource::File { path } => {
                let code = fs::read_to_string(path).map_err(|e| {
                    SalesviewError::Config(format!(
                        "Failed to read Plotly.js bundle '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(Self {
                    script: Script::Inline(code),
                })
            }
        }
    }

    fn script_tag(&self) -> String {
        match &self.script {
            Script::Src(url) => format!(
                "<script src=\"{}\" charset=\"utf-8\"></script>",
                escape_html(url)
            ),
            Script::Inline(code) => {
                format!("<script>{}</script>", code.replace("</script", "<\\/script"))
            }
        }
    }
}

impl ChartRenderer for PlotlyHtmlRenderer {
    fn render(&self, view: &AggregateView, chart: &ChartSpec) -> Result<Artifact> {
        let figure = serde_json::to_string(&figure(chart))?.replace('<', "\\u003c");

        let mut page = String::with_capacity(4096);
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        page.push_str(&format!("<title>{}</title>\n", escape_html(&view.title)));
        page.push_str(&self.script_tag());
        page.push_str(STYLE);
        page.push_str("</head>\n<body>\n");
        page.push_str(&format!(
            "<div id=\"chart\" style=\"width:{}px;height:{}px;\"></div>\n",
            chart.width, chart.height
        ));
        page.push_str(&data_table(view));
        page.push_str(&format!(
            "<script>\nconst figure = {};\nPlotly.newPlot(\"chart\", figure.data, figure.layout, {{\"responsive\": true}});\n</script>\n",
            figure
        ));
        page.push_str("</body>\n</html>\n");

        Ok(Artifact {
            name: view.slug.clone(),
            extension: "html",
            contents: page,
        })
    }
}

const STYLE: &str = "
<style>
body { font-family: sans-serif; margin: 1.5rem; }
table.view-data { border-collapse: collapse; margin-top: 1.5rem; }
table.view-data th, table.view-data td { border: 1px solid #ccc; padding: 0.25rem 0.75rem; }
table.view-data td.num { text-align: right; }
</style>
";

fn data_table(view: &AggregateView) -> String {
    let mut html = String::from("<table class=\"view-data\">\n<thead><tr>");
    for header in view.headers() {
        html.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in view.table_rows() {
        html.push_str("<tr>");
        for cell in row {
            let class = if cell.parse::<f64>().is_ok() { " class=\"num\"" } else { "" };
            html.push_str(&format!("<td{}>{}</td>", class, escape_html(&cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Plotly figure (`data` and `layout`) for a chart.
pub fn figure(chart: &ChartSpec) -> Value {
    let mut data: Vec<Value> = chart
        .series
        .iter()
        .map(|s| match s {
            Series::Pie(pie) => pie_trace(pie),
            Series::Bar(bar) => bar_trace(bar),
        })
        .collect();

    let horizontal = chart.series.iter().any(|s| {
        matches!(
            s,
            Series::Bar(BarSeries {
                orientation: Orientation::Horizontal,
                ..
            })
        )
    });
    let span = chart.category_count() as f64 - 0.5;

    let mut shapes = Vec::new();
    let mut annotations = Vec::new();
    for overlay in &chart.overlays {
        match overlay {
            Overlay::TrendLine {
                name,
                categories,
                values,
                color,
                width,
                marker_size,
            } => data.push(json!({
                "type": "scatter",
                "name": name,
                "x": categories,
                "y": values,
                "mode": "lines+markers",
                "line": { "color": color, "width": width },
                "marker": { "color": color, "size": marker_size },
            })),
            Overlay::Threshold {
                value,
                label,
                color,
                width,
                dash,
            } => {
                let line = json!({
                    "color": color,
                    "width": width,
                    "dash": match dash {
                        LineDash::Solid => "solid",
                        LineDash::Dash => "dash",
                    },
                });
                let last = (chart.category_count().max(1) - 1) as f64;
                if horizontal {
                    shapes.push(json!({
                        "type": "line", "line": line,
                        "x0": value, "x1": value, "y0": -0.5, "y1": span,
                    }));
                } else {
                    shapes.push(json!({
                        "type": "line", "line": line,
                        "x0": -0.5, "x1": span, "y0": value, "y1": value,
                    }));
                }
                if let Some(text) = label {
                    let (x, y) = if horizontal { (*value, last) } else { (last, *value) };
                    annotations.push(json!({
                        "x": x, "y": y, "text": text,
                        "showarrow": false, "xanchor": "left",
                    }));
                }
            }
        }
    }

    if chart.series.iter().all(Series::is_empty) {
        annotations.push(json!({
            "text": "No data",
            "xref": "paper", "yref": "paper", "x": 0.5, "y": 0.5,
            "showarrow": false, "font": { "size": 20 },
        }));
    }

    let mut layout = Map::new();
    layout.insert("title".into(), title(&chart.title));
    layout.insert("width".into(), json!(chart.width));
    layout.insert("height".into(), json!(chart.height));
    layout.insert("showlegend".into(), json!(chart.show_legend));
    if let Some(mode) = chart.bar_mode {
        let mode = match mode {
            BarMode::Group => "group",
            BarMode::Stack => "stack",
        };
        layout.insert("barmode".into(), json!(mode));
    }
    for (key, axis) in [("xaxis", &chart.x_axis), ("yaxis", &chart.y_axis)] {
        let mut value = Map::new();
        if let Some(title) = &axis.title {
            value.insert("title".into(), json!({ "text": title }));
        }
        if let Some(angle) = axis.tick_angle {
            value.insert("tickangle".into(), json!(angle));
        }
        if !value.is_empty() {
            layout.insert(key.into(), Value::Object(value));
        }
    }
    if chart.show_legend && chart.series.iter().any(|s| matches!(s, Series::Pie(_))) {
        layout.insert(
            "legend".into(),
            json!({ "orientation": "v", "yanchor": "top", "y": 1, "xanchor": "left", "x": 1.02 }),
        );
    }
    if !shapes.is_empty() {
        layout.insert("shapes".into(), Value::Array(shapes));
    }
    if !annotations.is_empty() {
        layout.insert("annotations".into(), Value::Array(annotations));
    }

    json!({ "data": data, "layout": layout })
}

fn title(title: &Title) -> Value {
    let mut value = json!({ "text": title.text });
    let placement = match title.anchor {
        TitleAnchor::Default => None,
        TitleAnchor::Left => Some((0.02, "left")),
        TitleAnchor::Center => Some((0.5, "center")),
    };
    if let Some((x, anchor)) = placement {
        value["x"] = json!(x);
        value["xanchor"] = json!(anchor);
        value["y"] = json!(0.95);
        value["yanchor"] = json!("top");
    }
    if let Some(font) = &title.font {
        value["font"] = json!(font);
    }
    value
}

fn pie_trace(pie: &PieSeries) -> Value {
    let mut marker = json!({ "colors": pie.colors });
    if let Some(outline) = &pie.outline {
        marker["line"] = json!({ "color": outline.color, "width": outline.width });
    }

    let mut trace = json!({
        "type": "pie",
        "labels": pie.labels,
        "values": pie.values,
        "hole": pie.hole,
        "marker": marker,
        "textinfo": match pie.text {
            WedgeText::LabelPercent => "label+percent",
            WedgeText::Percent => "percent",
        },
        "textposition": "auto",
    });
    if let Some(name) = &pie.name {
        trace["name"] = json!(name);
    }
    if !pie.pull.is_empty() {
        trace["pull"] = json!(pie.pull);
    }
    if let Some(domain) = &pie.domain {
        trace["domain"] = json!({ "x": domain.x, "y": domain.y });
    }
    trace
}

fn bar_trace(bar: &BarSeries) -> Value {
    let marker = match &bar.color {
        ColorMapping::Fixed { color } => json!({ "color": color }),
        ColorMapping::Categorical { colors } => json!({ "color": colors }),
        ColorMapping::Continuous { scale, title } => json!({
            "color": bar.values,
            "colorscale": scale.iter().map(|s| json!([s.position, s.color])).collect::<Vec<_>>(),
            "showscale": true,
            "colorbar": { "title": { "text": title } },
        }),
    };

    let (x, y, orientation) = match bar.orientation {
        Orientation::Vertical => (json!(bar.categories), json!(bar.values), "v"),
        Orientation::Horizontal => (json!(bar.values), json!(bar.categories), "h"),
    };

    let mut trace = json!({
        "type": "bar",
        "x": x,
        "y": y,
        "orientation": orientation,
        "marker": marker,
    });
    if let Some(name) = &bar.name {
        trace["name"] = json!(name);
    }
    if let Some(labels) = &bar.labels {
        trace["text"] = json!(labels);
        trace["textposition"] = json!("outside");
    }
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Axis, ChartKind, ColorStop};
    use crate::views::{ValueEntry, ViewData, ViewKind};

    fn rating_view() -> AggregateView {
        AggregateView::new(
            ViewKind::MeanRating,
            "Mean Ratings of Each Brand",
            ViewData::Values {
                entries: vec![
                    ValueEntry {
                        label: "<Apple>".to_string(),
                        value: 4.5,
                    },
                    ValueEntry {
                        label: "Nokia".to_string(),
                        value: 3.9,
                    },
                ],
                cutoff: Some(4.0),
            },
        )
    }

    fn rating_chart() -> ChartSpec {
        ChartSpec::new(ChartKind::HorizontalBar, Title::plain("Mean Ratings"), 1200, 800)
            .series(Series::Bar(BarSeries {
                name: None,
                categories: vec!["<Apple>".to_string(), "Nokia".to_string()],
                values: vec![4.5, 3.9],
                orientation: Orientation::Horizontal,
                color: ColorMapping::Continuous {
                    scale: vec![
                        ColorStop {
                            position: 0.0,
                            color: "blue".to_string(),
                        },
                        ColorStop {
                            position: 1.0,
                            color: "red".to_string(),
                        },
                    ],
                    title: "Mean Rating".to_string(),
                },
                labels: Some(vec!["4.50".to_string(), "3.90".to_string()]),
            }))
            .overlay(Overlay::Threshold {
                value: 4.0,
                label: Some("Cutoff: 4.00".to_string()),
                color: "black".to_string(),
                width: 2.0,
                dash: LineDash::Dash,
            })
            .axes(Axis::titled("Mean Rating"), Axis::titled("Brands"))
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn test_horizontal_bar_figure() {
        let fig = figure(&rating_chart());
        let trace = &fig["data"][0];

        assert_eq!(trace["orientation"], "h");
        assert_eq!(trace["y"][1], "Nokia");
        assert_eq!(trace["marker"]["showscale"], true);
        assert_eq!(trace["marker"]["colorscale"][1][1], "red");
        assert_eq!(trace["textposition"], "outside");

        let shape = &fig["layout"]["shapes"][0];
        assert_eq!(shape["x0"], 4.0);
        assert_eq!(shape["y0"], -0.5);
        assert_eq!(shape["y1"], 1.5);
        assert_eq!(shape["line"]["dash"], "dash");
        assert_eq!(fig["layout"]["annotations"][0]["text"], "Cutoff: 4.00");
        assert_eq!(fig["layout"]["xaxis"]["title"]["text"], "Mean Rating");
    }

    #[test]
    fn test_empty_chart_gets_placeholder() {
        let chart = ChartSpec::new(ChartKind::Bar, Title::plain("Empty"), 100, 100).series(
            Series::Bar(BarSeries {
                name: None,
                categories: vec![],
                values: vec![],
                orientation: Orientation::Vertical,
                color: ColorMapping::Categorical { colors: vec![] },
                labels: None,
            }),
        );
        let fig = figure(&chart);
        assert_eq!(fig["layout"]["annotations"][0]["text"], "No data");
    }

    #[test]
    fn test_render_page() {
        let renderer = PlotlyHtmlRenderer::from_url("https://cdn.example/plotly.js");
        let artifact = renderer.render(&rating_view(), &rating_chart()).unwrap();

        assert_eq!(artifact.file_name(), "mean_ratings.html");
        let html = &artifact.contents;
        assert!(html.contains("<script src=\"https://cdn.example/plotly.js\""));
        assert!(html.contains("<title>Mean Ratings of Each Brand</title>"));
        assert!(html.contains("<td>&lt;Apple&gt;</td>"));
        assert!(html.contains("<td class=\"num\">4.50</td>"));
        assert!(html.contains("Plotly.newPlot(\"chart\""));
    }

    #[test]
    fn test_inline_bundle_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"window.Plotly = {};").unwrap();

        let source = PlotlySource::File {
            path: file.path().to_path_buf(),
        };
        let renderer = PlotlyHtmlRenderer::from_source(&source).unwrap();
        let artifact = renderer.render(&rating_view(), &rating_chart()).unwrap();

        assert!(artifact.contents.contains("<script>window.Plotly = {};</script>"));
    }

    #[test]
    fn test_missing_bundle_is_config_error() {
        let source = PlotlySource::File {
            path: "/nonexistent/plotly.min.js".into(),
        };
        assert!(matches!(
            PlotlyHtmlRenderer::from_source(&source),
            Err(SalesviewError::Config(_))
        ));
    }

    #[test]
    fn test_stacked_bar_mode() {
        let series = |name: &str, values: Vec<f64>| {
            Series::Bar(BarSeries {
                name: Some(name.to_string()),
                categories: vec!["Apple".to_string(), "Nokia".to_string()],
                values,
                orientation: Orientation::Vertical,
                color: ColorMapping::Fixed {
                    color: "crimson".to_string(),
                },
                labels: None,
            })
        };
        let chart = ChartSpec::new(ChartKind::Bar, Title::plain("Stacked"), 800, 600)
            .series(series("Selling", vec![60000.0, 9000.0]))
            .series(series("Discount", vec![9900.0, 1000.0]))
            .bar_mode(BarMode::Stack);

        let fig = figure(&chart);
        assert_eq!(fig["layout"]["barmode"], "stack");
        assert_eq!(fig["data"].as_array().unwrap().len(), 2);
        assert_eq!(fig["data"][1]["name"], "Discount");
    }

    #[test]
    fn test_figure_json_cannot_open_markup() {
        let mut view = rating_view();
        let mut chart = rating_chart();
        let label = "<!--<script>".to_string();
        if let ViewData::Values { entries, .. } = &mut view.data {
            entries[0].label = label.clone();
        }
        if let Series::Bar(bar) = &mut chart.series[0] {
            bar.categories[0] = label;
        }

        let renderer = PlotlyHtmlRenderer::from_url("https://cdn.example/plotly.js");
        let html = renderer.render(&view, &chart).unwrap().contents;

        assert!(!html.contains("<!--"));
        assert!(html.contains("\\u003c!--\\u003cscript>"));
        assert!(html.contains("<td>&lt;!--&lt;script&gt;</td>"));
    }
}
