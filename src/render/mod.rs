//! Boundary to the chart renderer. Pixel drawing happens outside this
//! crate; renderers here serialize chart data for it.

use std::io::Write;

use thiserror::Error;

use crate::chart::ChartData;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait ChartRenderer {
    fn render(&self, chart: &ChartData, out: &mut dyn Write) -> Result<(), RenderError>;
}

/// Writes chart data as JSON for an external drawing front-end.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub compact: bool,
}

impl ChartRenderer for JsonRenderer {
    fn render(&self, chart: &ChartData, out: &mut dyn Write) -> Result<(), RenderError> {
        if self.compact {
            serde_json::to_writer(&mut *out, chart)?;
        } else {
            serde_json::to_writer_pretty(&mut *out, chart)?;
        }
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, StarRecord};
    use crate::chart::{build_chart, ChartOptions};
    use crate::sky::Observer;
    use crate::timeframe::ObservationMoment;
    use chrono::{TimeZone, Utc};

    fn chart() -> ChartData {
        let catalog = Catalog::new(vec![StarRecord {
            id: "Vega".to_string(),
            right_ascension_deg: 279.2347,
            declination_deg: 38.7837,
            magnitude: 0.03,
        }]);
        build_chart(
            &catalog,
            &Observer::new(38.8, -77.0, None).unwrap(),
            &ObservationMoment::from_utc(Utc.with_ymd_and_hms(2024, 8, 1, 3, 0, 0).unwrap()),
            &ChartOptions::default(),
        )
    }

    #[test]
    fn compact_json_is_one_line() {
        let mut out = Vec::new();
        JsonRenderer { compact: true }.render(&chart(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["points"][0]["id"], "Vega");
    }

    #[test]
    fn pretty_json_round_trips_through_value() {
        let mut out = Vec::new();
        JsonRenderer::default().render(&chart(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["metadata"]["cardinals"][0]["label"], "N");
        assert!(value["metadata"]["observer"]["latitude_deg"].as_f64().is_some());
    }
}
