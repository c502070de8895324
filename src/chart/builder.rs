use crate::catalog::Catalog;
use crate::sky::{FrameModel, MeanFrame, Observer, Refraction, Transformer};
use crate::timeframe::ObservationMoment;

use super::grid::{alt_az_grid, cardinal_labels};
use super::projection::{Projector, DEFAULT_MAX_STAR_RADIUS, DEFAULT_MIN_STAR_RADIUS};
use super::types::{BelowHorizonPolicy, ChartData, ChartMetadata, PlanePoint, ProjectionType};

pub const DEFAULT_LIMITING_MAGNITUDE: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    pub projection: ProjectionType,
    pub below_horizon: BelowHorizonPolicy,
    /// `None` disables refraction correction.
    pub refraction: Option<Refraction>,
    pub precession: bool,
    pub radius: f64,
    pub limiting_magnitude: f64,
    pub max_star_radius: f64,
    pub min_star_radius: f64,
    pub grid: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            projection: ProjectionType::default(),
            below_horizon: BelowHorizonPolicy::default(),
            refraction: None,
            precession: true,
            radius: 1.0,
            limiting_magnitude: DEFAULT_LIMITING_MAGNITUDE,
            max_star_radius: DEFAULT_MAX_STAR_RADIUS,
            min_star_radius: DEFAULT_MIN_STAR_RADIUS,
            grid: false,
        }
    }
}

/// Compute the chart for one observer and moment from a shared catalog.
pub fn build_chart(
    catalog: &Catalog,
    observer: &Observer,
    moment: &ObservationMoment,
    options: &ChartOptions,
) -> ChartData {
    let frame = MeanFrame {
        precession: options.precession,
    };
    let transformer = Transformer::new(options.precession, options.refraction);
    let projector = Projector::new(options.projection, options.radius)
        .with_star_radii(options.max_star_radius, options.min_star_radius);

    let mut points = Vec::new();
    let mut visible_count = 0;
    let mut below_horizon_count = 0;
    let mut fainter_than_limit_count = 0;

    for star in catalog.stars() {
        if star.magnitude > options.limiting_magnitude {
            fainter_than_limit_count += 1;
            continue;
        }

        let position = transformer.transform(star, observer, moment);
        let point = projector.project_star(star, &position);

        if point.below_horizon {
            below_horizon_count += 1;
            if options.below_horizon == BelowHorizonPolicy::Exclude {
                continue;
            }
        } else {
            visible_count += 1;
        }
        points.push(point);
    }

    points.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));

    log::debug!(
        "Chart for ({}, {}) at {}: {} visible, {} below horizon ({}), {} fainter than {}",
        observer.latitude_deg(),
        observer.longitude_deg(),
        moment.utc,
        visible_count,
        below_horizon_count,
        options.below_horizon,
        fainter_than_limit_count,
        options.limiting_magnitude
    );

    let metadata = ChartMetadata {
        radius: options.radius,
        center: PlanePoint { x: 0.0, y: 0.0 },
        projection_type: options.projection,
        below_horizon_policy: options.below_horizon,
        refraction_correction: options.refraction.is_some(),
        precession: options.precession,
        limiting_magnitude: options.limiting_magnitude,
        observer: *observer,
        moment: *moment,
        local_sidereal_time_deg: frame.local_sidereal_time_deg(moment, observer.longitude_deg()),
        cardinals: cardinal_labels(options.radius),
        grid: options.grid.then(|| alt_az_grid(&projector)),
        visible_count,
        below_horizon_count,
        fainter_than_limit_count,
    };

    ChartData { metadata, points }
}
