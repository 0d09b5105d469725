//! Depth legend
//!
//! The legend rows come straight from the depth scale; only the corner it
//! sits in is configurable.

use crate::encoding::{DepthScale, LegendInterval};
use serde::Serialize;

/// Map corner for a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl LegendPosition {
    /// Parse from property value; unknown values → BottomRight
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "topleft" => Self::TopLeft,
            "topright" => Self::TopRight,
            "bottomleft" => Self::BottomLeft,
            _ => Self::BottomRight,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "topleft",
            Self::TopRight => "topright",
            Self::BottomLeft => "bottomleft",
            Self::BottomRight => "bottomright",
        }
    }
}

/// Legend control contents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: LegendPosition,
    pub intervals: Vec<LegendInterval>,
}

impl Legend {
    pub fn from_scale(scale: &DepthScale, position: LegendPosition) -> Self {
        Legend {
            position,
            intervals: scale.legend_intervals(),
        }
    }

    /// Legend rows as HTML: a colored swatch and the range label per row
    ///
    /// Bounded rows end in a line break; the open-ended last row does not.
    pub fn rows_html(&self) -> String {
        self.intervals
            .iter()
            .map(|interval| {
                let br = if interval.upper_bound_km.is_some() { "<br>" } else { "" };
                format!(
                    "<i style=\"background: {}\"></i> {}{}",
                    interval.color, interval.label, br
                )
            })
            .collect()
    }

    /// Rows wrapped in the legend container
    pub fn to_html(&self) -> String {
        format!("<div class=\"info legend\">{}</div>", self.rows_html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::depth_to_color;

    #[test]
    fn test_position_parse() {
        assert_eq!(LegendPosition::parse("TopLeft"), LegendPosition::TopLeft);
        assert_eq!(LegendPosition::parse("bogus"), LegendPosition::BottomRight);
        assert_eq!(LegendPosition::BottomLeft.as_str(), "bottomleft");
    }

    #[test]
    fn test_legend_uses_scale_colors() {
        let legend = Legend::from_scale(DepthScale::standard(), LegendPosition::default());
        assert_eq!(legend.intervals.len(), 6);
        assert_eq!(legend.intervals[0].color, depth_to_color(0.0));
        assert_eq!(legend.intervals[5].color, depth_to_color(100.0));
    }

    #[test]
    fn test_legend_html() {
        let legend = Legend::from_scale(DepthScale::standard(), LegendPosition::BottomRight);
        let html = legend.to_html();
        assert!(html.starts_with("<div class=\"info legend\">"));
        assert!(html.contains("<i style=\"background: green\"></i> -10km - 10km<br>"));
        assert!(html.contains("<i style=\"background: #fc4903\"></i> 70km - 90km<br>"));
        assert!(html.ends_with("<i style=\"background: red\"></i> 90+</div>"));
    }

    #[test]
    fn test_no_break_after_open_ended_row() {
        let legend = Legend::from_scale(DepthScale::standard(), LegendPosition::BottomRight);
        let rows = legend.rows_html();
        assert_eq!(rows.matches("<br>").count(), 5);
        assert!(rows.ends_with("90+"));
    }
}
