//! Visual encoding of earthquake events
//!
//! - `color.rs`: color tokens and RGB conversion
//! - `depth_scale.rs`: depth → color table, shared with the legend
//! - `style.rs`: magnitude → radius and the full marker style

pub mod color;
pub mod depth_scale;
pub mod style;

pub use color::ColorToken;
pub use depth_scale::{depth_to_color, legend_intervals, DepthScale, DepthStop, LegendInterval};
pub use style::{build_style, magnitude_to_radius, StyleDescriptor};
