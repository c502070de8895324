use crate::sky::HorizontalPosition;

use super::projection::Projector;
use super::types::{CardinalLabel, ChartGrid, GridCircle, GridSpoke, PlanePoint};

const LABEL_OFFSET: f64 = 1.05;
const ALTITUDE_STEP_DEG: u32 = 15;
const AZIMUTH_STEP_DEG: u32 = 30;

/// N, E, S, W just outside the horizon rim.
pub fn cardinal_labels(chart_radius: f64) -> Vec<CardinalLabel> {
    [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)]
        .into_iter()
        .map(|(label, azimuth_deg)| CardinalLabel {
            label: label.to_string(),
            azimuth_deg,
            position: rim_point(chart_radius * LABEL_OFFSET, azimuth_deg),
        })
        .collect()
}

/// Altitude circles every 15° and azimuth spokes every 30°.
pub fn alt_az_grid(projector: &Projector) -> ChartGrid {
    let altitude_circles = (ALTITUDE_STEP_DEG..90)
        .step_by(ALTITUDE_STEP_DEG as usize)
        .map(f64::from)
        .map(|altitude_deg| {
            let radius = projector.radial_distance(altitude_deg);
            GridCircle {
                altitude_deg,
                radius,
                label: format!("{}°", altitude_deg),
                label_position: PlanePoint { x: 0.0, y: radius },
            }
        })
        .collect();

    let azimuth_spokes = (0..360)
        .step_by(AZIMUTH_STEP_DEG as usize)
        .map(f64::from)
        .map(|azimuth_deg| {
            let end = projector.project(&HorizontalPosition {
                altitude_deg: 0.0,
                azimuth_deg,
            });
            GridSpoke {
                azimuth_deg,
                end,
                label: format!("{}°", azimuth_deg),
                label_position: PlanePoint {
                    x: end.x * LABEL_OFFSET,
                    y: end.y * LABEL_OFFSET,
                },
            }
        })
        .collect();

    ChartGrid {
        altitude_circles,
        azimuth_spokes,
    }
}

fn rim_point(r: f64, azimuth_deg: f64) -> PlanePoint {
    let az = azimuth_deg.to_radians();
    PlanePoint {
        x: r * az.sin(),
        y: r * az.cos(),
    }
}
