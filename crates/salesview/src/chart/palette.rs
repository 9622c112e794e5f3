//! Sequential and diverging palettes.

use super::spec::ColorStop;

/// A named, ordered list of CSS colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [&'static str],
}

/// Eight-step green-blue ramp used for the brand pie.
pub const GN_BU: Palette = Palette {
    name: "GnBu",
    colors: &[
        "#f7fcf0", "#e0f3db", "#ccebc5", "#a8ddb5", "#7bccc4", "#4eb3d3", "#2b8cbe", "#08589e",
    ],
};

pub const VIRIDIS: Palette = Palette {
    name: "Viridis",
    colors: &[
        "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
        "#b5de2b", "#fde725",
    ],
};

pub const PLASMA: Palette = Palette {
    name: "Plasma",
    colors: &[
        "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953", "#fb9f3a",
        "#fdca26", "#f0f921",
    ],
};

pub const BLUES: Palette = Palette {
    name: "Blues",
    colors: &[
        "rgb(247,251,255)",
        "rgb(222,235,247)",
        "rgb(198,219,239)",
        "rgb(158,202,225)",
        "rgb(107,174,214)",
        "rgb(66,146,198)",
        "rgb(33,113,181)",
        "rgb(8,81,156)",
        "rgb(8,48,107)",
    ],
};

pub const GREENS: Palette = Palette {
    name: "Greens",
    colors: &[
        "rgb(247,252,245)",
        "rgb(229,245,224)",
        "rgb(199,233,192)",
        "rgb(161,217,155)",
        "rgb(116,196,118)",
        "rgb(65,171,93)",
        "rgb(35,139,69)",
        "rgb(0,109,44)",
        "rgb(0,68,27)",
    ],
};

pub const RD_YL_BU: Palette = Palette {
    name: "RdYlBu",
    colors: &[
        "rgb(165,0,38)",
        "rgb(215,48,39)",
        "rgb(244,109,67)",
        "rgb(253,174,97)",
        "rgb(254,224,144)",
        "rgb(255,255,191)",
        "rgb(224,243,248)",
        "rgb(171,217,233)",
        "rgb(116,173,209)",
        "rgb(69,117,180)",
        "rgb(49,54,149)",
    ],
};

impl Palette {
    /// `n` colors taken in order, wrapping around when `n` exceeds the palette.
    pub fn cycle(&self, n: usize) -> Vec<String> {
        self.colors
            .iter()
            .cycle()
            .take(n)
            .map(|c| c.to_string())
            .collect()
    }

    /// Like [`cycle`](Self::cycle), starting from the darkest end.
    pub fn cycle_reversed(&self, n: usize) -> Vec<String> {
        self.colors
            .iter()
            .rev()
            .cycle()
            .take(n)
            .map(|c| c.to_string())
            .collect()
    }

    /// Evenly spaced stops over the whole palette.
    pub fn scale(&self, reversed: bool) -> Vec<ColorStop> {
        let last = self.colors.len().saturating_sub(1).max(1) as f64;
        let ordered: Vec<&str> = if reversed {
            self.colors.iter().rev().copied().collect()
        } else {
            self.colors.to_vec()
        };

        ordered
            .into_iter()
            .enumerate()
            .map(|(i, color)| ColorStop {
                position: i as f64 / last,
                color: color.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        let colors = GN_BU.cycle(10);
        assert_eq!(colors.len(), 10);
        assert_eq!(colors[8], GN_BU.colors[0]);
        assert_eq!(colors[9], GN_BU.colors[1]);
    }

    #[test]
    fn test_cycle_reversed_starts_dark() {
        assert_eq!(BLUES.cycle_reversed(1), vec!["rgb(8,48,107)"]);
    }

    #[test]
    fn test_scale_spans_unit_interval() {
        let stops = RD_YL_BU.scale(true);
        assert_eq!(stops.len(), 11);
        assert_eq!(stops[0].position, 0.0);
        assert_eq!(stops[10].position, 1.0);
        assert_eq!(stops[0].color, "rgb(49,54,149)");
    }
}
