use std::time::Instant;

use rayon::prelude::*;

use crate::Timing;
use crate::config::TerrainParameters;
use crate::error::InvalidParameters;
use crate::grid::{ElevationGrid, Grid};
use crate::hills::HillStamp;
use crate::rng::Rng;

/// Upper bound of the finished grid; cells land in [0, NORMALIZE_RANGE].
pub const NORMALIZE_RANGE: f32 = 255.0;

/// Grows terrain with the hill algorithm: random parabolic hills are summed
/// into a grid, the result is normalized, valleys are flattened by raising
/// each cell to a power, and the grid is rescaled to [0, 255].
#[derive(Clone, Debug)]
pub struct HeightfieldSynthesizer {
    params: TerrainParameters,
}

impl HeightfieldSynthesizer {
    pub fn new(params: TerrainParameters) -> Result<Self, InvalidParameters> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &TerrainParameters {
        &self.params
    }

    /// Builds a fresh grid. Repeated calls return identical grids.
    pub fn generate(&self) -> ElevationGrid {
        self.generate_timed().0
    }

    pub fn generate_timed(&self) -> (ElevationGrid, Vec<Timing>) {
        let params = &self.params;
        let mut timings = Vec::new();
        let total_start = Instant::now();

        tracing::info!(
            seed = params.seed,
            size = params.size,
            iterations = params.iterations,
            "growing hill heightmap"
        );

        let t = Instant::now();
        let mut grid = Grid::<f32>::new(params.size, params.size);
        let mut rng = Rng::new(params.seed);
        for _ in 0..params.iterations {
            HillStamp::draw(&mut rng, params).stamp(&mut grid);
        }
        timings.push(Timing::since("hills", t));

        let t = Instant::now();
        normalize(&mut grid, 1.0);
        timings.push(Timing::since("normalize", t));

        let t = Instant::now();
        flatten(&mut grid, params.flattening);
        timings.push(Timing::since("flatten", t));

        // Separate from the first pass: the power above must act on [0, 1].
        let t = Instant::now();
        normalize(&mut grid, NORMALIZE_RANGE);
        timings.push(Timing::since("rescale", t));

        timings.push(Timing::since("TOTAL", total_start));
        for timing in &timings {
            tracing::debug!(phase = timing.name, ms = timing.ms, "phase finished");
        }
        tracing::info!(seed = params.seed, "created heightmap using the hill algorithm");

        (ElevationGrid::from_grid(grid), timings)
    }
}

/// Linearly maps the grid onto [0, range]. A flat grid is left untouched.
pub fn normalize(grid: &mut Grid<f32>, range: f32) {
    let (min, max) = grid.min_max();
    if !(max > min) {
        return;
    }
    let span = max - min;
    grid.data
        .par_iter_mut()
        .for_each(|v| *v = (*v - min) / span * range);
}

/// Raises every cell to `power` by repeated multiplication. Values in [0, 1]
/// shrink faster the lower they are, which carves out the valleys.
pub fn flatten(grid: &mut Grid<f32>, power: u8) {
    if power <= 1 {
        return;
    }
    grid.data.par_iter_mut().for_each(|v| {
        let original = *v;
        let mut flat = 1.0f32;
        for _ in 0..power {
            flat *= original;
        }
        *v = flat;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(values: &[f32]) -> Grid<f32> {
        let side = (values.len() as f64).sqrt() as usize;
        let mut g = Grid::new(side, side);
        g.data.copy_from_slice(values);
        g
    }

    #[test]
    fn normalize_maps_to_unit_range() {
        let mut g = grid_of(&[2.0, 4.0, 6.0, 10.0]);
        normalize(&mut g, 1.0);
        assert_eq!(g.data, vec![0.0, 0.25, 0.5, 1.0]);
    }

    #[test]
    fn normalize_leaves_flat_grid_alone() {
        let mut g = grid_of(&[3.0; 9]);
        normalize(&mut g, 1.0);
        assert!(g.data.iter().all(|&v| v == 3.0));

        let mut zeros = grid_of(&[0.0; 4]);
        normalize(&mut zeros, NORMALIZE_RANGE);
        assert!(zeros.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn flatten_power_one_is_identity() {
        let mut g = grid_of(&[0.0, 0.3, 0.7, 1.0]);
        let before = g.data.clone();
        flatten(&mut g, 1);
        assert_eq!(g.data, before);
    }

    #[test]
    fn flatten_squares_and_cubes() {
        let mut g = grid_of(&[0.0, 0.5, 0.25, 1.0]);
        flatten(&mut g, 2);
        assert_eq!(g.data, vec![0.0, 0.25, 0.0625, 1.0]);

        let mut g = grid_of(&[0.5, 1.0, 0.0, 0.5]);
        flatten(&mut g, 3);
        assert_eq!(g.data, vec![0.125, 1.0, 0.0, 0.125]);
    }

    #[test]
    fn synthesizer_rejects_bad_params() {
        let params = TerrainParameters { flattening: 0, ..Default::default() };
        assert_eq!(
            HeightfieldSynthesizer::new(params).unwrap_err(),
            InvalidParameters::FlatteningBelowOne
        );
    }

    #[test]
    fn repeated_generation_is_identical() {
        let params = TerrainParameters {
            size: 32,
            iterations: 200,
            min_radius: 2.0,
            max_radius: 8.0,
            flattening: 2,
            seed: 11,
        };
        let synth = HeightfieldSynthesizer::new(params).unwrap();
        assert_eq!(synth.generate(), synth.generate());
    }

    #[test]
    fn timings_cover_every_phase() {
        let params = TerrainParameters { size: 16, iterations: 10, ..Default::default() };
        let (_, timings) = HeightfieldSynthesizer::new(params).unwrap().generate_timed();
        let names: Vec<_> = timings.iter().map(|t| t.name).collect();
        assert_eq!(names, ["hills", "normalize", "flatten", "rescale", "TOTAL"]);
    }
}
