//! Planisphere projections of the local sky onto a disk.
//!
//! The chart center is the zenith and the rim of the disk (radius `R`) is
//! the horizon. North is `+y`, east is `+x`, so a point's bearing measured
//! clockwise from `+y` is its azimuth.

use crate::catalog::StarRecord;
use crate::sky::HorizontalPosition;

use super::types::{ChartPoint, PlanePoint, ProjectionType};

pub const DEFAULT_MAX_STAR_RADIUS: f64 = 0.02;
pub const DEFAULT_MIN_STAR_RADIUS: f64 = 0.002;

/// Distance from the chart center for a given altitude.
///
/// Stereographic: `R tan(z / 2)`. Orthographic: `R sin(z)` above the
/// horizon and `R (2 - sin(z))` below it, so the mapping keeps growing
/// past the rim. `z` is the zenith distance. Both are strictly decreasing
/// in altitude and zero at the zenith.
pub fn radial_distance(altitude_deg: f64, chart_radius: f64, projection: ProjectionType) -> f64 {
    let zenith_distance = (90.0 - altitude_deg).to_radians();
    match projection {
        ProjectionType::Stereographic => chart_radius * (zenith_distance / 2.0).tan(),
        ProjectionType::Orthographic if altitude_deg >= 0.0 => chart_radius * zenith_distance.sin(),
        ProjectionType::Orthographic => chart_radius * (2.0 - zenith_distance.sin()),
    }
}

/// Position of a horizontal direction on the chart plane.
pub fn project(
    position: &HorizontalPosition,
    chart_radius: f64,
    projection: ProjectionType,
) -> PlanePoint {
    let r = radial_distance(position.altitude_deg, chart_radius, projection);
    let az = position.azimuth_deg.to_radians();
    PlanePoint {
        x: r * az.sin(),
        y: r * az.cos(),
    }
}

/// Projects catalog stars, sizing markers by magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    projection: ProjectionType,
    chart_radius: f64,
    max_star_radius: f64,
    min_star_radius: f64,
}

impl Projector {
    pub fn new(projection: ProjectionType, chart_radius: f64) -> Self {
        Self {
            projection,
            chart_radius,
            max_star_radius: DEFAULT_MAX_STAR_RADIUS,
            min_star_radius: DEFAULT_MIN_STAR_RADIUS,
        }
    }

    pub fn with_star_radii(mut self, max_star_radius: f64, min_star_radius: f64) -> Self {
        self.max_star_radius = max_star_radius;
        self.min_star_radius = min_star_radius;
        self
    }

    pub fn radial_distance(&self, altitude_deg: f64) -> f64 {
        radial_distance(altitude_deg, self.chart_radius, self.projection)
    }

    pub fn project(&self, position: &HorizontalPosition) -> PlanePoint {
        project(position, self.chart_radius, self.projection)
    }

    /// Marker radius: a magnitude-0 star gets `max_star_radius`, each
    /// 5 magnitudes fainter shrinks it tenfold (area follows flux).
    pub fn star_radius(&self, magnitude: f64) -> f64 {
        (self.max_star_radius * 10f64.powf(-magnitude / 5.0)).max(self.min_star_radius)
    }

    pub fn project_star(&self, star: &StarRecord, position: &HorizontalPosition) -> ChartPoint {
        let plane = self.project(position);
        ChartPoint {
            id: star.id.clone(),
            x: plane.x,
            y: plane.y,
            radius: self.star_radius(star.magnitude),
            magnitude: star.magnitude,
            below_horizon: !position.is_above_horizon(),
        }
    }
}
