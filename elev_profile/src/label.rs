//! Chart titles, summary text and output names.

use crate::{Metadata, Statistics};

fn coord(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.4}", v))
}

/// Base title, followed by an endpoint line when metadata carries both points.
pub fn title(base: &str, metadata: Option<&Metadata>) -> String {
    match metadata.and_then(Metadata::endpoints) {
        Some((p1, p2)) => format!(
            "{}\nFrom ({}, {}) to ({}, {})",
            base,
            coord(p1.x),
            coord(p1.y),
            coord(p2.x),
            coord(p2.y)
        ),
        None => base.to_string(),
    }
}

pub fn summary(stats: &Statistics) -> String {
    format!(
        "Statistics:\n  Total Distance: {:.1} m\n  Min Elevation: {:.1} m\n  Max Elevation: {:.1} m\n  Elevation Gain: {:.1} m\n  Avg Elevation: {:.1} m",
        stats.total_distance,
        stats.min_elevation,
        stats.max_elevation,
        stats.elevation_gain,
        stats.mean_elevation
    )
}

pub fn simple_summary(stats: &Statistics) -> String {
    format!(
        "Min: {:.1}m\nMax: {:.1}m\nTotal Distance: {:.1}m",
        stats.min_elevation, stats.max_elevation, stats.total_distance
    )
}

pub fn gradient_label(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Filesystem-safe token from the metadata timestamp, or `unknown`.
pub fn timestamp_token(metadata: Option<&Metadata>) -> String {
    let Some(ts) = metadata.and_then(|m| m.timestamp.as_deref()) else {
        return "unknown".to_string();
    };
    let safe = ts.replace(':', "-").replace('T', "_");
    safe.split('.').next().unwrap_or("").to_string()
}

pub fn enhanced_file_name(token: &str) -> String {
    format!("elevation_profile_{}.png", token)
}
