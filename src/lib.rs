pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod hills;
pub mod render;
pub mod rng;
pub mod synth;

use std::time::Instant;

pub use config::TerrainParameters;
pub use error::{ExportError, InvalidParameters};
pub use grid::ElevationGrid;
pub use synth::{HeightfieldSynthesizer, NORMALIZE_RANGE};

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

impl Timing {
    pub(crate) fn since(name: &'static str, start: Instant) -> Self {
        Self {
            name,
            ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

/// Validates `params` and grows a hill heightmap with values in [0, 255].
pub fn generate(params: &TerrainParameters) -> Result<ElevationGrid, InvalidParameters> {
    Ok(HeightfieldSynthesizer::new(params.clone())?.generate())
}

/// Like [`generate`], also reporting how long each phase took.
pub fn generate_timed(
    params: &TerrainParameters,
) -> Result<(ElevationGrid, Vec<Timing>), InvalidParameters> {
    Ok(HeightfieldSynthesizer::new(params.clone())?.generate_timed())
}
