use serde::{Deserialize, Serialize};

use crate::{Profile, ProfileError};

/// Summary of the valid samples in a profile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub min_elevation: f64,
    pub max_elevation: f64,
    pub mean_elevation: f64,
    pub elevation_gain: f64,
    /// Furthest distance reached, not the distance of the last sample.
    pub total_distance: f64,
    pub valid_count: usize,
}

impl Statistics {
    /// Compute statistics over `(distance, elevation)` points. `None` when empty.
    pub fn compute(points: &[(f64, f64)]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let min_elevation = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_elevation = points
            .iter()
            .map(|p| p.1)
            .fold(f64::NEG_INFINITY, f64::max);
        let total_distance = points
            .iter()
            .map(|p| p.0)
            .fold(f64::NEG_INFINITY, f64::max);
        let mean_elevation = points.iter().map(|p| p.1).sum::<f64>() / points.len() as f64;
        Some(Self {
            min_elevation,
            max_elevation,
            mean_elevation,
            elevation_gain: max_elevation - min_elevation,
            total_distance,
            valid_count: points.len(),
        })
    }
}

/// Percent slope of the segment ending at `distance`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientPoint {
    pub distance: f64,
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub points: Vec<(f64, f64)>,
    pub stats: Statistics,
    pub gradient: Vec<GradientPoint>,
}

impl Analysis {
    pub fn distances(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.0).collect()
    }

    pub fn elevations(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.1).collect()
    }
}

/// Samples with a usable elevation, in their original order.
pub fn valid_samples(profile: &Profile) -> Vec<(f64, f64)> {
    profile
        .iter()
        .filter(|s| s.is_valid())
        .filter_map(|s| s.elevation.map(|e| (s.distance, e)))
        .collect()
}

/// Gradient between consecutive points. Segments with a non-positive distance
/// step are dropped.
pub fn gradient_series(points: &[(f64, f64)]) -> Vec<GradientPoint> {
    points
        .windows(2)
        .filter_map(|w| {
            let (d0, e0) = w[0];
            let (d1, e1) = w[1];
            let dd = d1 - d0;
            if dd > 0.0 {
                Some(GradientPoint {
                    distance: d1,
                    percent: (e1 - e0) / dd * 100.0,
                })
            } else {
                None
            }
        })
        .collect()
}

pub fn analyze(profile: &Profile) -> Result<Analysis, ProfileError> {
    let points = valid_samples(profile);
    let stats = Statistics::compute(&points).ok_or(ProfileError::NoValidData)?;
    let gradient = gradient_series(&points);
    Ok(Analysis {
        points,
        stats,
        gradient,
    })
}
