use serde::{Deserialize, Serialize};

use crate::error::InvalidParameters;

/// All tunable parameters of the hill algorithm.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParameters {
    /// Side length of the square grid.
    pub size: usize,
    /// Number of hills to grow.
    pub iterations: u32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Power applied to every normalized cell; 1 means no flattening.
    pub flattening: u8,
    pub seed: u64,
}

impl Default for TerrainParameters {
    fn default() -> Self {
        Self {
            size: 257,
            iterations: 2000,
            min_radius: 5.0,
            max_radius: 20.0,
            flattening: 1,
            seed: 42,
        }
    }
}

impl TerrainParameters {
    pub fn new(
        size: usize,
        iterations: u32,
        min_radius: f32,
        max_radius: f32,
        flattening: u8,
        seed: u64,
    ) -> Result<Self, InvalidParameters> {
        let params = Self {
            size,
            iterations,
            min_radius,
            max_radius,
            flattening,
            seed,
        };
        params.validate()?;
        Ok(params)
    }

    /// Same parameters with a freshly drawn seed. The seed is kept so the
    /// resulting grid can be regenerated later.
    pub fn with_random_seed(mut self) -> Self {
        self.seed = rand::random();
        self
    }

    /// Checks every bound, reporting the first one violated.
    pub fn validate(&self) -> Result<(), InvalidParameters> {
        if self.size == 0 {
            return Err(InvalidParameters::ZeroSize);
        }
        if self.iterations == 0 {
            return Err(InvalidParameters::ZeroIterations);
        }
        // Negated comparisons so NaN is rejected too.
        if !(self.min_radius > 0.0) {
            return Err(InvalidParameters::NonPositiveMinRadius(self.min_radius));
        }
        if !(self.max_radius > 0.0) {
            return Err(InvalidParameters::NonPositiveMaxRadius(self.max_radius));
        }
        if !(self.min_radius < self.max_radius) {
            return Err(InvalidParameters::InvertedRadii {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if self.flattening < 1 {
            return Err(InvalidParameters::FlatteningBelowOne);
        }
        Ok(())
    }

    pub fn set_iterations(&mut self, iterations: u32) -> Result<(), InvalidParameters> {
        if iterations == 0 {
            return Err(InvalidParameters::ZeroIterations);
        }
        self.iterations = iterations;
        Ok(())
    }

    pub fn set_flattening(&mut self, flattening: u8) -> Result<(), InvalidParameters> {
        if flattening < 1 {
            return Err(InvalidParameters::FlatteningBelowOne);
        }
        self.flattening = flattening;
        Ok(())
    }

    /// Must stay strictly below the current maximum radius.
    pub fn set_min_radius(&mut self, min_radius: f32) -> Result<(), InvalidParameters> {
        if !(min_radius > 0.0) {
            return Err(InvalidParameters::NonPositiveMinRadius(min_radius));
        }
        if !(min_radius < self.max_radius) {
            return Err(InvalidParameters::InvertedRadii {
                min: min_radius,
                max: self.max_radius,
            });
        }
        self.min_radius = min_radius;
        Ok(())
    }

    /// Must stay strictly above the current minimum radius.
    pub fn set_max_radius(&mut self, max_radius: f32) -> Result<(), InvalidParameters> {
        if !(max_radius > 0.0) {
            return Err(InvalidParameters::NonPositiveMaxRadius(max_radius));
        }
        if !(self.min_radius < max_radius) {
            return Err(InvalidParameters::InvertedRadii {
                min: self.min_radius,
                max: max_radius,
            });
        }
        self.max_radius = max_radius;
        Ok(())
    }
}
