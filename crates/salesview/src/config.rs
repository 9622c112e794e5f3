//! Run configuration, loadable from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SalesviewError};
use crate::input::ParserConfig;

/// Plotly.js build referenced by default.
pub const DEFAULT_PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Configuration for a reporting run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory that receives one artifact per view.
    pub output_dir: PathBuf,
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Per-view parameters.
    pub views: ViewSettings,
    /// Display colors for the color distribution view.
    pub colors: ColorSettings,
    /// Where artifacts load Plotly.js from.
    pub plotly_js: PlotlySource,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts"),
            parser: ParserConfig::default(),
            views: ViewSettings::default(),
            colors: ColorSettings::default(),
            plotly_js: PlotlySource::default(),
        }
    }
}

impl ReportConfig {
    /// Parse a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ReportConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            SalesviewError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject parameter values no view can honor.
    pub fn validate(&self) -> Result<()> {
        let v = &self.views;
        if v.brand_threshold < 0 {
            return Err(SalesviewError::InvalidThreshold(v.brand_threshold));
        }
        for (name, n) in [
            ("top_brands", v.top_brands),
            ("top_products", v.top_products),
            ("top_colors", v.top_colors),
            ("top_discounts", v.top_discounts),
        ] {
            if n == 0 {
                return Err(SalesviewError::Config(format!("views.{} must be at least 1", name)));
            }
        }
        if !v.rating_cutoff.is_finite() {
            return Err(SalesviewError::Config(
                "views.rating_cutoff must be a finite number".to_string(),
            ));
        }
        if v.focus_brand.is_empty() {
            return Err(SalesviewError::Config("views.focus_brand must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Parameters of the individual views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Brands with fewer rows than this are grouped as "Others".
    pub brand_threshold: i64,
    /// Brand whose model distribution is charted.
    pub focus_brand: String,
    /// Number of brands in the brand/leader view.
    pub top_brands: usize,
    /// Number of best-selling products.
    pub top_products: usize,
    /// Number of colors.
    pub top_colors: usize,
    /// Rows taken by discount before de-duplication.
    pub top_discounts: usize,
    /// Reference line on the mean rating chart.
    pub rating_cutoff: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            brand_threshold: 110,
            focus_brand: "Apple".to_string(),
            top_brands: 5,
            top_products: 10,
            top_colors: 10,
            top_discounts: 7,
            rating_cutoff: 4.0,
        }
    }
}

/// Mapping from color names in the data to display colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    /// Exact, case-sensitive name → CSS color.
    pub lookup: IndexMap<String, String>,
    /// Color for names not in `lookup`.
    pub unknown: String,
}

impl ColorSettings {
    /// Display color for a color name.
    pub fn resolve(&self, name: &str) -> &str {
        self.lookup.get(name).map(String::as_str).unwrap_or(self.unknown.as_str())
    }
}

impl Default for ColorSettings {
    fn default() -> Self {
        let lookup = [
            ("Black", "#000000"),
            ("Gold", "#FFD700"),
            ("White", "#F8F6F0"),
            ("Blue", "#0000FF"),
            ("Silver", "#BCC6CC"),
            ("Red", "#FF0000"),
            ("Grey", "#808080"),
            ("Midnight Black", "#00040D"),
            ("Space Grey", "#717378"),
            ("Rose Gold", "#B76E79"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            lookup,
            unknown: "#888888".to_string(),
        }
    }
}

/// Source of the Plotly.js bundle embedded in artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PlotlySource {
    /// `<script src=…>` pointing at a URL.
    Cdn { url: String },
    /// Inline the contents of a local file for offline viewing.
    File { path: PathBuf },
}

impl Default for PlotlySource {
    fn default() -> Self {
        PlotlySource::Cdn {
            url: DEFAULT_PLOTLY_CDN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = ReportConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("charts"));
        assert_eq!(config.views.brand_threshold, 110);
        assert_eq!(config.views.focus_brand, "Apple");
        assert_eq!(config.views.top_discounts, 7);
        assert_eq!(config.colors.lookup.len(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ReportConfig::from_toml_str(
            r##"
output_dir = "out"

[views]
brand_threshold = 50
focus_brand = "Samsung"

[colors]
unknown = "#123456"

[colors.lookup]
Black = "#111111"
"##,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.views.brand_threshold, 50);
        assert_eq!(config.views.focus_brand, "Samsung");
        assert_eq!(config.views.top_products, 10);
        assert_eq!(config.colors.resolve("Black"), "#111111");
        assert_eq!(config.colors.resolve("Gold"), "#123456");
    }

    #[test]
    fn test_plotly_file_source() {
        let config = ReportConfig::from_toml_str(
            "[plotly_js]\nsource = \"file\"\npath = \"vendor/plotly.min.js\"\n",
        )
        .unwrap();
        assert!(matches!(config.plotly_js, PlotlySource::File { .. }));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let result = ReportConfig::from_toml_str("[views]\nbrand_threshold = -1\n");
        assert!(matches!(result, Err(SalesviewError::InvalidThreshold(-1))));
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let result = ReportConfig::from_toml_str("[views]\ntop_colors = 0\n");
        assert!(matches!(result, Err(SalesviewError::Config(_))));
    }

    #[test]
    fn test_color_lookup_is_case_sensitive() {
        let colors = ColorSettings::default();
        assert_eq!(colors.resolve("Black"), "#000000");
        assert_eq!(colors.resolve("black"), "#888888");
    }
}
