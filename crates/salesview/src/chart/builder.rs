//! Maps each aggregate view to its chart.

use super::palette::{BLUES, GN_BU, GREENS, PLASMA, Palette, RD_YL_BU, VIRIDIS};
use super::spec::{
    Axis, BarMode, BarSeries, ChartKind, ChartSpec, ColorMapping, Domain, LineDash, Orientation,
    Outline, Overlay, PieSeries, Series, Title, TitleAnchor, WedgeText,
};
use crate::config::{ColorSettings, ViewSettings};
use crate::views::{AggregateView, CountEntry, ValueEntry, ViewData, ViewKind};

/// Builds the [`ChartSpec`] for a view from the run's display settings.
pub struct ChartBuilder<'a> {
    views: &'a ViewSettings,
    colors: &'a ColorSettings,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(views: &'a ViewSettings, colors: &'a ColorSettings) -> Self {
        Self { views, colors }
    }

    /// Chart for `view`. An empty view yields a chart with empty series.
    pub fn build(&self, view: &AggregateView) -> ChartSpec {
        match (&view.data, view.kind) {
            (ViewData::Counts { entries }, ViewKind::BrandDistribution) => {
                brand_pie(&view.title, entries)
            }
            (ViewData::Counts { entries }, ViewKind::ModelsPerBrand) => {
                models_with_trend(&view.title, entries)
            }
            (ViewData::Counts { entries }, ViewKind::TopProducts) => {
                let x = Axis::titled("Mobile Phone").with_tick_angle(45);
                let title =
                    Title::styled(&view.title, TitleAnchor::Center, None, "Blue", 16);
                count_bars(title, entries, &VIRIDIS, x, (1000, 800))
            }
            (ViewData::Counts { entries }, ViewKind::BrandModels) => {
                self.brand_model_bars(&view.title, entries)
            }
            (ViewData::Counts { entries }, ViewKind::TopColors) => {
                self.color_bars(&view.title, entries)
            }
            (ViewData::Counts { entries }, _) => count_bars(
                Title::plain(&view.title),
                entries,
                &VIRIDIS,
                Axis::default(),
                (1000, 700),
            ),
            (ViewData::BrandLeaders { .. }, _) => leaders_donut(view),
            (ViewData::Values { entries, cutoff }, kind) => {
                value_chart(&view.title, kind, entries, *cutoff)
            }
            (ViewData::Discounts { entries }, _) => {
                let names: Vec<String> = entries.iter().map(|e| e.mobile.clone()).collect();
                let bar = |name: &str, values: Vec<f64>, color: &str| {
                    Series::Bar(BarSeries {
                        name: Some(name.to_string()),
                        categories: names.clone(),
                        values,
                        orientation: Orientation::Vertical,
                        color: ColorMapping::Fixed {
                            color: color.to_string(),
                        },
                        labels: None,
                    })
                };

                ChartSpec::new(ChartKind::GroupedBar, Title::plain(&view.title), 1000, 800)
                    .series(bar(
                        "Original Price",
                        entries.iter().map(|e| e.original_price).collect(),
                        "crimson",
                    ))
                    .series(bar(
                        "Discount",
                        entries.iter().map(|e| e.discount).collect(),
                        "purple",
                    ))
                    .axes(
                        Axis::titled("Mobile").with_tick_angle(45),
                        Axis::titled("Price (₹)"),
                    )
                    .bar_mode(BarMode::Group)
                    .legend(true)
            }
        }
    }

    fn brand_model_bars(&self, title: &str, entries: &[CountEntry]) -> ChartSpec {
        let (labels, values) = split_counts(entries);
        ChartSpec::new(ChartKind::HorizontalBar, Title::plain(title), 1200, 800)
            .series(Series::Bar(BarSeries {
                name: None,
                labels: Some(count_labels(entries)),
                categories: labels,
                values,
                orientation: Orientation::Horizontal,
                color: ColorMapping::Categorical {
                    colors: BLUES.cycle(entries.len()),
                },
            }))
            .axes(
                Axis::titled("Count"),
                Axis::titled(format!("{} Models", self.views.focus_brand)),
            )
    }

    fn color_bars(&self, title: &str, entries: &[CountEntry]) -> ChartSpec {
        let (labels, values) = split_counts(entries);
        let colors = labels
            .iter()
            .map(|name| self.colors.resolve(name).to_string())
            .collect();

        ChartSpec::new(ChartKind::Bar, Title::plain(title), 1000, 700)
            .series(Series::Bar(BarSeries {
                name: None,
                labels: Some(count_labels(entries)),
                categories: labels,
                values,
                orientation: Orientation::Vertical,
                color: ColorMapping::Categorical { colors },
            }))
            .axes(
                Axis::titled("Colors").with_tick_angle(45),
                Axis::titled("Count"),
            )
    }
}

fn split_counts(entries: &[CountEntry]) -> (Vec<String>, Vec<f64>) {
    entries
        .iter()
        .map(|e| (e.label.clone(), e.count as f64))
        .unzip()
}

fn count_labels(entries: &[CountEntry]) -> Vec<String> {
    entries.iter().map(|e| e.count.to_string()).collect()
}

/// Wedge offsets by position: the two leading brands and the trailing
/// "Others" bucket stand out.
fn brand_pull(entries: &[CountEntry]) -> Vec<f64> {
    let mut pull = vec![0.0; entries.len()];
    let Some((others, ranked)) = entries.split_last() else {
        return pull;
    };
    for (slot, offset) in pull.iter_mut().take(ranked.len().min(2)).zip([0.1, 0.07]) {
        *slot = offset;
    }
    if let Some(slot) = pull.last_mut().filter(|_| others.count > 0) {
        *slot = 0.05;
    }
    pull
}

fn brand_pie(title: &str, entries: &[CountEntry]) -> ChartSpec {
    let (labels, values) = split_counts(entries);
    ChartSpec::new(
        ChartKind::Pie,
        Title::styled(title, TitleAnchor::Left, Some("serif"), "Blue", 16),
        900,
        600,
    )
    .series(Series::Pie(PieSeries {
        name: None,
        labels,
        values,
        hole: 0.0,
        pull: brand_pull(entries),
        colors: GN_BU.cycle(entries.len()),
        outline: Some(Outline {
            color: "#000000".to_string(),
            width: 2.0,
        }),
        text: WedgeText::LabelPercent,
        domain: None,
    }))
    .legend(true)
}

fn models_with_trend(title: &str, entries: &[CountEntry]) -> ChartSpec {
    let (labels, values) = split_counts(entries);
    ChartSpec::new(
        ChartKind::Bar,
        Title::styled(title, TitleAnchor::Left, Some("serif"), "Blue", 16),
        1200,
        700,
    )
    .series(Series::Bar(BarSeries {
        name: Some("Number of Models".to_string()),
        categories: labels.clone(),
        values: values.clone(),
        orientation: Orientation::Vertical,
        color: ColorMapping::Categorical {
            colors: VIRIDIS.cycle(entries.len()),
        },
        labels: None,
    }))
    .overlay(Overlay::TrendLine {
        name: "Trend Line".to_string(),
        categories: labels,
        values,
        color: "blue".to_string(),
        width: 2.0,
        marker_size: 8.0,
    })
    .axes(
        Axis::titled("Company").with_tick_angle(90),
        Axis::titled("Number of Models"),
    )
    .legend(true)
}

fn count_bars(
    title: Title,
    entries: &[CountEntry],
    palette: &Palette,
    x_axis: Axis,
    (width, height): (u32, u32),
) -> ChartSpec {
    let (labels, values) = split_counts(entries);
    ChartSpec::new(ChartKind::Bar, title, width, height)
        .series(Series::Bar(BarSeries {
            name: None,
            labels: Some(count_labels(entries)),
            categories: labels,
            values,
            orientation: Orientation::Vertical,
            color: ColorMapping::Categorical {
                colors: palette.cycle(entries.len()),
            },
        }))
        .axes(x_axis, Axis::titled("Count"))
}

/// Top models around the top brands: an outer ring and an inner pie.
fn leaders_donut(view: &AggregateView) -> ChartSpec {
    let leaders = view.leaders().unwrap_or_default();
    let n = leaders.len();

    let outer = PieSeries {
        name: Some("Top Models".to_string()),
        labels: leaders
            .iter()
            .map(|l| format!("{} {}", l.brand, l.model))
            .collect(),
        values: leaders.iter().map(|l| l.model_count as f64).collect(),
        hole: 0.6,
        pull: Vec::new(),
        colors: BLUES.cycle_reversed(n),
        outline: None,
        text: WedgeText::Percent,
        domain: Some(Domain {
            x: [0.0, 1.0],
            y: [0.0, 1.0],
        }),
    };
    let inner = PieSeries {
        name: Some("Top Brands".to_string()),
        labels: leaders.iter().map(|l| l.brand.clone()).collect(),
        values: leaders.iter().map(|l| l.brand_count as f64).collect(),
        hole: 0.3,
        pull: Vec::new(),
        colors: GREENS.cycle_reversed(n),
        outline: None,
        text: WedgeText::Percent,
        domain: Some(Domain {
            x: [0.25, 0.75],
            y: [0.25, 0.75],
        }),
    };

    ChartSpec::new(
        ChartKind::Donut,
        Title::styled(&view.title, TitleAnchor::Center, Some("serif"), "Purple", 16),
        1000,
        600,
    )
    .series(Series::Pie(outer))
    .series(Series::Pie(inner))
    .legend(true)
}

/// Horizontal bars colored by value, for the per-brand means and revenue.
fn value_chart(
    title: &str,
    kind: ViewKind,
    entries: &[ValueEntry],
    cutoff: Option<f64>,
) -> ChartSpec {
    let labels: Vec<String> = entries.iter().map(|e| e.label.clone()).collect();
    let values: Vec<f64> = entries.iter().map(|e| e.value).collect();

    if kind == ViewKind::Revenue {
        return ChartSpec::new(ChartKind::Bar, Title::plain(title), 1200, 800)
            .series(Series::Bar(BarSeries {
                name: None,
                labels: Some(values.iter().map(|v| format_thousands(*v)).collect()),
                categories: labels,
                values,
                orientation: Orientation::Vertical,
                color: ColorMapping::Categorical {
                    colors: PLASMA.cycle(entries.len()),
                },
            }))
            .axes(
                Axis::titled("Brands").with_tick_angle(45),
                Axis::titled("Revenue (₹)"),
            );
    }

    let (scale, scale_title, axis_title, decimals) = match kind {
        ViewKind::MeanRating => (RD_YL_BU.scale(true), "Mean Rating", "Mean Rating", 2),
        ViewKind::MeanDiscount => (VIRIDIS.scale(false), "Mean Discount", "Mean Discount (₹)", 0),
        _ => (
            BLUES.scale(false),
            "Mean Selling Price",
            "Mean Selling Price (₹)",
            0,
        ),
    };

    let mut spec = ChartSpec::new(ChartKind::HorizontalBar, Title::plain(title), 1200, 800)
        .series(Series::Bar(BarSeries {
            name: None,
            labels: Some(
                values
                    .iter()
                    .map(|v| format!("{:.*}", decimals, v))
                    .collect(),
            ),
            categories: labels,
            values,
            orientation: Orientation::Horizontal,
            color: ColorMapping::Continuous {
                scale,
                title: scale_title.to_string(),
            },
        }))
        .axes(Axis::titled(axis_title), Axis::titled("Brands"));

    if let Some(value) = cutoff {
        let label = (kind == ViewKind::MeanRating).then(|| format!("Cutoff: {:.2}", value));
        spec = spec.overlay(Overlay::Threshold {
            value,
            label,
            color: "black".to_string(),
            width: 2.0,
            dash: LineDash::Dash,
        });
    }
    spec
}

/// Whole number with `,` between groups of three digits.
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    for (i, digit) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if value < 0.0 && rounded != "0" {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{BrandLeader, DiscountEntry};

    fn count(label: &str, count: usize) -> CountEntry {
        CountEntry {
            label: label.to_string(),
            count,
        }
    }

    fn counts_view(kind: ViewKind, entries: Vec<CountEntry>) -> AggregateView {
        AggregateView::new(kind, "T", ViewData::Counts { entries })
    }

    fn build(view: &AggregateView) -> ChartSpec {
        let views = ViewSettings::default();
        let colors = ColorSettings::default();
        ChartBuilder::new(&views, &colors).build(view)
    }

    fn first_bar(spec: &ChartSpec) -> &BarSeries {
        match &spec.series[0] {
            Series::Bar(bar) => bar,
            other => panic!("Expected bar series, got {:?}", other),
        }
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(1234567.6), "1,234,568");
        assert_eq!(format_thousands(-25000.0), "-25,000");
    }

    #[test]
    fn test_brand_pull() {
        let entries = vec![count("A", 300), count("B", 200), count("C", 150), count("Others", 40)];
        assert_eq!(brand_pull(&entries), vec![0.1, 0.07, 0.0, 0.05]);

        let single = vec![count("A", 3), count("Others", 0)];
        assert_eq!(brand_pull(&single), vec![0.1, 0.0]);

        let bucket_only = vec![count("Others", 5)];
        assert_eq!(brand_pull(&bucket_only), vec![0.05]);
        assert!(brand_pull(&[]).is_empty());
    }

    #[test]
    fn test_brand_pie_cycles_palette() {
        let entries: Vec<_> = (0..12).map(|i| count(&format!("B{}", i), 200)).collect();
        let spec = build(&counts_view(ViewKind::BrandDistribution, entries));
        match &spec.series[0] {
            Series::Pie(pie) => {
                assert_eq!(pie.colors.len(), 12);
                assert_eq!(pie.colors[8], pie.colors[0]);
            }
            other => panic!("Expected pie series, got {:?}", other),
        }
        assert_eq!(spec.kind, ChartKind::Pie);
    }

    #[test]
    fn test_models_chart_has_trend_line() {
        let spec = build(&counts_view(
            ViewKind::ModelsPerBrand,
            vec![count("A", 3), count("B", 1)],
        ));
        assert!(matches!(spec.overlays[0], Overlay::TrendLine { .. }));
        assert_eq!(spec.x_axis.tick_angle, Some(90));
    }

    #[test]
    fn test_color_bars_use_lookup() {
        let spec = build(&counts_view(
            ViewKind::TopColors,
            vec![count("Black", 5), count("Mystic Bronze", 2)],
        ));
        match &first_bar(&spec).color {
            ColorMapping::Categorical { colors } => {
                assert_eq!(colors, &vec!["#000000".to_string(), "#888888".to_string()]);
            }
            other => panic!("Expected categorical colors, got {:?}", other),
        }
    }

    #[test]
    fn test_brand_models_axis_names_focus_brand() {
        let views = ViewSettings {
            focus_brand: "Samsung".to_string(),
            ..ViewSettings::default()
        };
        let colors = ColorSettings::default();
        let spec = ChartBuilder::new(&views, &colors)
            .build(&counts_view(ViewKind::BrandModels, vec![count("S1", 2)]));
        assert_eq!(spec.y_axis.title.as_deref(), Some("Samsung Models"));
        assert_eq!(first_bar(&spec).orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_rating_cutoff_is_labelled() {
        let view = AggregateView::new(
            ViewKind::MeanRating,
            "T",
            ViewData::Values {
                entries: vec![ValueEntry {
                    label: "A".to_string(),
                    value: 4.25,
                }],
                cutoff: Some(4.0),
            },
        );
        let spec = build(&view);

        assert_eq!(first_bar(&spec).labels, Some(vec!["4.25".to_string()]));
        match &spec.overlays[0] {
            Overlay::Threshold { value, label, .. } => {
                assert_eq!(*value, 4.0);
                assert_eq!(label.as_deref(), Some("Cutoff: 4.00"));
            }
            other => panic!("Expected threshold, got {:?}", other),
        }
    }

    #[test]
    fn test_discount_cutoff_has_no_label() {
        let view = AggregateView::new(
            ViewKind::MeanDiscount,
            "T",
            ViewData::Values {
                entries: vec![],
                cutoff: Some(100.0),
            },
        );
        let spec = build(&view);
        assert!(matches!(spec.overlays[0], Overlay::Threshold { label: None, .. }));
    }

    #[test]
    fn test_revenue_labels_use_thousands() {
        let view = AggregateView::new(
            ViewKind::Revenue,
            "T",
            ViewData::Values {
                entries: vec![ValueEntry {
                    label: "Apple".to_string(),
                    value: 1250000.0,
                }],
                cutoff: None,
            },
        );
        let spec = build(&view);
        assert_eq!(first_bar(&spec).labels, Some(vec!["1,250,000".to_string()]));
        assert!(spec.overlays.is_empty());
    }

    #[test]
    fn test_leaders_donut_rings() {
        let view = AggregateView::new(
            ViewKind::BrandLeaders,
            "T",
            ViewData::BrandLeaders {
                entries: vec![BrandLeader {
                    brand: "Apple".to_string(),
                    brand_count: 10,
                    model: "13".to_string(),
                    model_count: 4,
                }],
            },
        );
        let spec = build(&view);
        assert_eq!(spec.series.len(), 2);
        match (&spec.series[0], &spec.series[1]) {
            (Series::Pie(outer), Series::Pie(inner)) => {
                assert_eq!(outer.hole, 0.6);
                assert_eq!(outer.labels, vec!["Apple 13"]);
                assert_eq!(inner.hole, 0.3);
                assert_eq!(inner.values, vec![10.0]);
            }
            other => panic!("Expected two pies, got {:?}", other),
        }
    }

    #[test]
    fn test_discount_bars_grouped() {
        let view = AggregateView::new(
            ViewKind::TopDiscounts,
            "T",
            ViewData::Discounts {
                entries: vec![DiscountEntry {
                    mobile: "X".to_string(),
                    original_price: 100.0,
                    discount: 10.0,
                }],
            },
        );
        let spec = build(&view);
        assert_eq!(spec.kind, ChartKind::GroupedBar);
        assert_eq!(spec.bar_mode, Some(BarMode::Group));
        assert_eq!(spec.series.len(), 2);
    }
}
