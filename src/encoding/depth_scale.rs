//! Depth color scale shared by the markers and the legend
//!
//! The scale is an ordered table of (lower bound, color) stops. A depth takes
//! the color of the highest stop whose bound it strictly exceeds; depths that
//! exceed no bound fall into the first stop. The first stop's bound is only
//! used for the legend label.
//!
//! Both `depth_to_color` and `legend_intervals` read the same table, so the
//! legend always describes exactly what the markers show.

use super::color::{ColorToken, AMBER, DARK_ORANGE, GREEN, LIME, ORANGE_RED, RED};
use serde::Serialize;
use std::sync::OnceLock;

/// A single stop in the depth scale
#[derive(Debug, Clone, PartialEq)]
pub struct DepthStop {
    /// Depth in km the event must exceed to take this color
    pub lower_bound_km: f64,
    pub color: ColorToken,
}

/// One legend row: the depth range covered by a color
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendInterval {
    pub lower_bound_km: f64,
    /// None for the open-ended deepest interval
    pub upper_bound_km: Option<f64>,
    pub color: ColorToken,
    pub label: String,
}

/// Ordered depth → color table
#[derive(Debug, Clone, Default)]
pub struct DepthScale {
    /// Sorted by `lower_bound_km`, ascending
    stops: Vec<DepthStop>,
}

/// Label shown for the shallowest bucket; the bucket itself is open below.
const SHALLOW_LABEL_BOUND_KM: f64 = -10.0;

fn standard_stops() -> [DepthStop; 6] {
    [
        DepthStop { lower_bound_km: SHALLOW_LABEL_BOUND_KM, color: GREEN },
        DepthStop { lower_bound_km: 10.0, color: LIME },
        DepthStop { lower_bound_km: 30.0, color: AMBER },
        DepthStop { lower_bound_km: 50.0, color: DARK_ORANGE },
        DepthStop { lower_bound_km: 70.0, color: ORANGE_RED },
        DepthStop { lower_bound_km: 90.0, color: RED },
    ]
}

static STANDARD_SCALE: OnceLock<DepthScale> = OnceLock::new();

impl DepthScale {
    pub fn new() -> Self {
        DepthScale { stops: Vec::new() }
    }

    /// The six-bucket scale used for earthquake markers
    pub fn standard() -> &'static DepthScale {
        STANDARD_SCALE.get_or_init(|| {
            let mut scale = DepthScale::new();
            for stop in standard_stops() {
                scale.add_stop(stop.lower_bound_km, stop.color);
            }
            scale
        })
    }

    /// Add a stop and maintain sorted order (replaces a stop with the same bound)
    pub fn add_stop(&mut self, lower_bound_km: f64, color: ColorToken) {
        let stop = DepthStop { lower_bound_km, color };
        match self
            .stops
            .binary_search_by(|s| s.lower_bound_km.total_cmp(&lower_bound_km))
        {
            Ok(pos) => self.stops[pos] = stop,
            Err(pos) => self.stops.insert(pos, stop),
        }
    }

    pub fn stops(&self) -> &[DepthStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Index of the bucket a depth falls into (0 = shallowest)
    ///
    /// Stops are scanned from the deepest down and the first bound the depth
    /// strictly exceeds wins. The first stop has no lower limit, so negative
    /// depths and NaN land in bucket 0.
    pub fn bucket_index(&self, depth_km: f64) -> usize {
        self.stops
            .iter()
            .skip(1)
            .rposition(|stop| depth_km > stop.lower_bound_km)
            .map(|pos| pos + 1)
            .unwrap_or(0)
    }

    /// Color for a depth, or None when the scale has no stops
    pub fn color_for(&self, depth_km: f64) -> Option<&ColorToken> {
        self.stops
            .get(self.bucket_index(depth_km))
            .map(|stop| &stop.color)
    }

    /// Legend rows derived from the stops, shallowest first
    ///
    /// Labels follow the map's legend text: `"10km - 30km"` for closed
    /// intervals and `"90+"` for the deepest one.
    pub fn legend_intervals(&self) -> Vec<LegendInterval> {
        self.stops
            .iter()
            .enumerate()
            .map(|(i, stop)| {
                let upper_bound_km = self.stops.get(i + 1).map(|next| next.lower_bound_km);
                let label = match upper_bound_km {
                    Some(upper) => format!("{}km - {}km", stop.lower_bound_km, upper),
                    None => format!("{}+", stop.lower_bound_km),
                };
                LegendInterval {
                    lower_bound_km: stop.lower_bound_km,
                    upper_bound_km,
                    color: stop.color.clone(),
                    label,
                }
            })
            .collect()
    }
}

/// Marker fill color for an event depth
///
/// Total over all inputs: no clamping, negative depths map to green.
pub fn depth_to_color(depth_km: f64) -> ColorToken {
    DepthScale::standard()
        .color_for(depth_km)
        .cloned()
        .unwrap_or(GREEN)
}

/// Legend rows for the standard scale
pub fn legend_intervals() -> Vec<LegendInterval> {
    DepthScale::standard().legend_intervals()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_to_color_boundaries() {
        assert_eq!(depth_to_color(91.0), RED);
        assert_eq!(depth_to_color(90.0).as_str(), "#fc4903");
        assert_eq!(depth_to_color(71.0).as_str(), "#fc4903");
        assert_eq!(depth_to_color(70.0).as_str(), "#fc8403");
        assert_eq!(depth_to_color(50.5).as_str(), "#fc8403");
        assert_eq!(depth_to_color(50.0).as_str(), "#fcad03");
        assert_eq!(depth_to_color(30.0).as_str(), "#cafc03");
        assert_eq!(depth_to_color(10.01).as_str(), "#cafc03");
        assert_eq!(depth_to_color(10.0), GREEN);
        assert_eq!(depth_to_color(-5.0), GREEN);
    }

    #[test]
    fn test_depth_to_color_extremes() {
        assert_eq!(depth_to_color(700.0), RED);
        assert_eq!(depth_to_color(f64::INFINITY), RED);
        assert_eq!(depth_to_color(-3000.0), GREEN);
        assert_eq!(depth_to_color(f64::NEG_INFINITY), GREEN);
        assert_eq!(depth_to_color(f64::NAN), GREEN);
    }

    #[test]
    fn test_alarm_level_is_monotonic_in_depth() {
        let scale = DepthScale::standard();
        let depths: Vec<f64> = (-200..=2000).map(|d| d as f64 * 0.1).collect();
        for pair in depths.windows(2) {
            assert!(
                scale.bucket_index(pair[1]) >= scale.bucket_index(pair[0]),
                "bucket decreased between {} and {}",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(scale.bucket_index(-20.0), 0);
        assert_eq!(scale.bucket_index(200.0), 5);
    }

    #[test]
    fn test_legend_matches_scale() {
        let intervals = legend_intervals();
        let labels: Vec<&str> = intervals.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "-10km - 10km",
                "10km - 30km",
                "30km - 50km",
                "50km - 70km",
                "70km - 90km",
                "90+",
            ]
        );

        // Every legend row's color is what an event just inside that row gets
        for interval in &intervals[1..] {
            assert_eq!(depth_to_color(interval.lower_bound_km + 0.001), interval.color);
        }
        assert_eq!(depth_to_color(intervals[0].lower_bound_km), intervals[0].color);
        assert_eq!(intervals[5].upper_bound_km, None);
    }

    #[test]
    fn test_add_stop_keeps_order_and_replaces() {
        let mut scale = DepthScale::new();
        assert!(scale.is_empty());
        assert_eq!(scale.color_for(5.0), None);

        scale.add_stop(50.0, RED);
        scale.add_stop(0.0, GREEN);
        scale.add_stop(20.0, AMBER);
        scale.add_stop(20.0, LIME);

        let bounds: Vec<f64> = scale.stops().iter().map(|s| s.lower_bound_km).collect();
        assert_eq!(bounds, vec![0.0, 20.0, 50.0]);
        assert_eq!(scale.color_for(25.0), Some(&LIME));
        assert_eq!(scale.color_for(-1.0), Some(&GREEN));
    }
}
