use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::chart::{BelowHorizonPolicy, ChartOptions, ProjectionType, DEFAULT_LIMITING_MAGNITUDE};
use crate::locate::{default_places, Gazetteer, Place};
use crate::sky::Refraction;

const ABSOLUTE_ZERO_C: f64 = -273.15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub refraction_correction: bool,
    pub below_horizon_policy: BelowHorizonPolicy,
    pub projection_type: ProjectionType,
    pub precession: bool,
    pub refraction: Refraction,
    pub chart: ChartConfig,
    pub gazetteer: GazetteerConfig,
    pub web: WebConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/bright_stars.csv"),
            refraction_correction: false,
            below_horizon_policy: BelowHorizonPolicy::default(),
            projection_type: ProjectionType::default(),
            precession: true,
            refraction: Refraction::default(),
            chart: ChartConfig::default(),
            gazetteer: GazetteerConfig::default(),
            web: WebConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub radius: f64,
    pub limiting_magnitude: f64,
    pub max_star_radius: f64,
    pub min_star_radius: f64,
    pub grid: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let options = ChartOptions::default();
        Self {
            radius: options.radius,
            limiting_magnitude: DEFAULT_LIMITING_MAGNITUDE,
            max_star_radius: options.max_star_radius,
            min_star_radius: options.min_star_radius,
            grid: options.grid,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GazetteerConfig {
    pub max_timezone_distance_km: f64,
    pub places: Vec<Place>,
}

impl Default for GazetteerConfig {
    fn default() -> Self {
        Self {
            max_timezone_distance_km: 500.0,
            places: default_places(),
        }
    }
}

/// Settings a single chart request (CLI flags or query string) may change.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChartOverrides {
    pub projection: Option<ProjectionType>,
    pub below_horizon: Option<BelowHorizonPolicy>,
    pub refraction: Option<bool>,
    pub grid: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        let chart = &self.chart;

        if !(chart.radius.is_finite() && chart.radius > 0.0) {
            return invalid(format!("chart.radius must be positive, got {}", chart.radius));
        }
        if !chart.limiting_magnitude.is_finite() {
            return invalid(format!(
                "chart.limiting_magnitude must be finite, got {}",
                chart.limiting_magnitude
            ));
        }
        for (name, value) in [
            ("chart.max_star_radius", chart.max_star_radius),
            ("chart.min_star_radius", chart.min_star_radius),
            (
                "gazetteer.max_timezone_distance_km",
                self.gazetteer.max_timezone_distance_km,
            ),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("{} must be a non-negative number, got {}", name, value));
            }
        }
        if chart.min_star_radius > chart.max_star_radius {
            return invalid(format!(
                "chart.min_star_radius {} exceeds chart.max_star_radius {}",
                chart.min_star_radius, chart.max_star_radius
            ));
        }

        let refraction = &self.refraction;
        if !(refraction.pressure_hpa.is_finite() && refraction.pressure_hpa > 0.0) {
            return invalid(format!(
                "refraction.pressure_hpa must be positive, got {}",
                refraction.pressure_hpa
            ));
        }
        if !(refraction.temperature_c.is_finite() && refraction.temperature_c > ABSOLUTE_ZERO_C) {
            return invalid(format!(
                "refraction.temperature_c must be above {}, got {}",
                ABSOLUTE_ZERO_C, refraction.temperature_c
            ));
        }

        for place in &self.gazetteer.places {
            if !(-90.0..=90.0).contains(&place.latitude_deg)
                || !(-180.0..=180.0).contains(&place.longitude_deg)
            {
                return invalid(format!(
                    "place {:?} has coordinates ({}, {}) out of range",
                    place.name, place.latitude_deg, place.longitude_deg
                ));
            }
        }
        Ok(())
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            projection: self.projection_type,
            below_horizon: self.below_horizon_policy,
            refraction: self.refraction_correction.then_some(self.refraction),
            precession: self.precession,
            radius: self.chart.radius,
            limiting_magnitude: self.chart.limiting_magnitude,
            max_star_radius: self.chart.max_star_radius,
            min_star_radius: self.chart.min_star_radius,
            grid: self.chart.grid,
        }
    }

    /// Chart options with per-request overrides applied on top.
    pub fn chart_options_with(&self, overrides: &ChartOverrides) -> ChartOptions {
        let mut options = self.chart_options();
        if let Some(projection) = overrides.projection {
            options.projection = projection;
        }
        if let Some(policy) = overrides.below_horizon {
            options.below_horizon = policy;
        }
        if let Some(enabled) = overrides.refraction {
            options.refraction = enabled.then_some(self.refraction);
        }
        if let Some(grid) = overrides.grid {
            options.grid = grid;
        }
        options
    }

    pub fn gazetteer(&self) -> Gazetteer {
        Gazetteer::new(
            self.gazetteer.places.clone(),
            self.gazetteer.max_timezone_distance_km,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::from_str("{}").unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("data/bright_stars.csv"));
        assert!(!config.refraction_correction);
        assert_eq!(config.below_horizon_policy, BelowHorizonPolicy::Exclude);
        assert_eq!(config.projection_type, ProjectionType::Stereographic);
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert!(!config.gazetteer.places.is_empty());
        assert_eq!(config.chart_options(), ChartOptions::default());
    }

    #[test]
    fn parses_all_recognized_options() {
        let yaml = r#"
catalog_path: /srv/stars/hipparcos.csv
refraction_correction: true
below_horizon_policy: include-flagged
projection_type: orthographic
precession: false
refraction:
  pressure_hpa: 800
  temperature_c: -5
chart:
  radius: 400
  limiting_magnitude: 4.5
  grid: true
gazetteer:
  max_timezone_distance_km: 100
  places:
    - name: Kitt Peak
      latitude: 31.9583
      longitude: -111.5967
      timezone: America/Phoenix
web:
  bind: 127.0.0.1:9000
"#;
        let config = Config::from_str(yaml).unwrap();
        let options = config.chart_options();
        assert_eq!(options.projection, ProjectionType::Orthographic);
        assert_eq!(options.below_horizon, BelowHorizonPolicy::IncludeFlagged);
        assert_eq!(
            options.refraction,
            Some(Refraction {
                pressure_hpa: 800.0,
                temperature_c: -5.0
            })
        );
        assert!(!options.precession);
        assert_eq!(options.radius, 400.0);
        assert_eq!(options.limiting_magnitude, 4.5);
        assert!(options.grid);
        assert_eq!(config.gazetteer().places().len(), 1);
        assert_eq!(config.web.bind, "127.0.0.1:9000");
    }

    #[test]
    fn refraction_settings_ignored_when_disabled() {
        let config = Config::from_str("refraction:\n  pressure_hpa: 700\n").unwrap();
        assert_eq!(config.chart_options().refraction, None);
    }

    #[test]
    fn overrides_take_precedence() {
        let config = Config::from_str(
            "projection_type: orthographic\nrefraction:\n  pressure_hpa: 900\n",
        )
        .unwrap();
        assert_eq!(
            config.chart_options_with(&ChartOverrides::default()),
            config.chart_options()
        );

        let options = config.chart_options_with(&ChartOverrides {
            projection: Some(ProjectionType::Stereographic),
            below_horizon: Some(BelowHorizonPolicy::IncludeFlagged),
            refraction: Some(true),
            grid: Some(true),
        });
        assert_eq!(options.projection, ProjectionType::Stereographic);
        assert_eq!(options.below_horizon, BelowHorizonPolicy::IncludeFlagged);
        assert_eq!(options.refraction.map(|r| r.pressure_hpa), Some(900.0));
        assert!(options.grid);
    }

    fn rejected(yaml: &str) -> String {
        match Config::from_str(yaml) {
            Err(ConfigError::Invalid(msg)) => msg,
            other => panic!("expected invalid config for {yaml:?}, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_positive_chart_radius() {
        assert!(rejected("chart:\n  radius: -1\n").contains("chart.radius"));
        assert!(rejected("chart:\n  radius: 0\n").contains("chart.radius"));
        assert!(rejected("chart:\n  radius: .nan\n").contains("chart.radius"));
    }

    #[test]
    fn rejects_unphysical_atmosphere() {
        assert!(rejected("refraction:\n  temperature_c: -273\n").contains("temperature_c"));
        assert!(rejected("refraction:\n  temperature_c: -300\n").contains("temperature_c"));
        assert!(rejected("refraction:\n  pressure_hpa: 0\n").contains("pressure_hpa"));
        assert!(Config::from_str("refraction:\n  temperature_c: -40\n").is_ok());
    }

    #[test]
    fn rejects_bad_star_radii_and_limits() {
        assert!(rejected("chart:\n  max_star_radius: -0.1\n").contains("max_star_radius"));
        assert!(rejected("chart:\n  min_star_radius: .nan\n").contains("min_star_radius"));
        assert!(rejected("chart:\n  max_star_radius: 0.01\n  min_star_radius: 0.05\n")
            .contains("exceeds"));
        assert!(rejected("chart:\n  limiting_magnitude: .nan\n").contains("limiting_magnitude"));
        assert!(rejected("gazetteer:\n  max_timezone_distance_km: -5\n")
            .contains("max_timezone_distance_km"));
    }

    #[test]
    fn rejects_places_out_of_range() {
        let yaml = "gazetteer:\n  places:\n    - name: Nowhere\n      latitude: 95\n      longitude: 0\n      timezone: UTC\n";
        assert!(rejected(yaml).contains("Nowhere"));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(Config::from_str("below_horizon_policy: hide").is_err());
    }

    #[test]
    fn bundled_example_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.yaml");
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("data/bright_stars.csv"));
    }
}
