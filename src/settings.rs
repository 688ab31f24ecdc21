use crate::error::Result;
use crate::utils::constants::*;
use crate::utils::projection::AlbersUsa;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use validator::Validate;

/// Tunables for the prepared dashboard data.
///
/// Layered from built-in defaults, an optional TOML/JSON/YAML file and
/// `WXDASH_*` environment variables, in that order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DashboardConfig {
    /// Maximum readings kept by the scatter view
    #[validate(range(min = 1))]
    pub scatter_limit: usize,

    #[validate(range(min = 1, max = 20))]
    pub legend_bins: usize,

    #[validate(range(min = 1.0))]
    pub map_scale: f64,

    pub map_translate_x: f64,
    pub map_translate_y: f64,

    /// Warn when a station's rows disagree on state or location
    pub check_metadata: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            scatter_limit: DEFAULT_SCATTER_LIMIT,
            legend_bins: DEFAULT_LEGEND_BINS,
            map_scale: SCATTER_MAP_SCALE,
            map_translate_x: SCATTER_MAP_TRANSLATE.0,
            map_translate_y: SCATTER_MAP_TRANSLATE.1,
            check_metadata: true,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("scatter_limit", defaults.scatter_limit as i64)?
            .set_default("legend_bins", defaults.legend_bins as i64)?
            .set_default("map_scale", defaults.map_scale)?
            .set_default("map_translate_x", defaults.map_translate_x)?
            .set_default("map_translate_y", defaults.map_translate_y)?
            .set_default("check_metadata", defaults.check_metadata)?;

        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn projection(&self) -> AlbersUsa {
        AlbersUsa::with_transform(self.map_scale, (self.map_translate_x, self.map_translate_y))
    }
}
