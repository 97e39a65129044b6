//! Normalized multi-octave fractal Brownian motion (fBm) over simplex noise.
//!
//! Composites several octaves of 2-D simplex noise and divides by the sum of
//! octave amplitudes, so the result stays in `[-1, 1]` for any octave count.

use noise::{NoiseFn, Simplex};

/// Configuration for the normalized fBm field.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseParams {
    /// World seed for deterministic generation.
    pub seed: u64,
    /// Number of noise octaves to composite.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
    /// World units per noise unit for the first octave. Default: 100.0.
    pub scale: f64,
    /// Added to world X before scaling, to pick a region of noise space.
    pub offset_x: f64,
    /// Added to world Y before scaling.
    pub offset_y: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 100.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Samples the normalized fBm field at world coordinates.
pub struct NoiseField {
    noise: Simplex,
    params: NoiseParams,
    max_amplitude: f64,
}

impl NoiseField {
    /// Create a new field. Parameters are assumed validated.
    pub fn new(params: NoiseParams) -> Self {
        let noise = Simplex::new(lattice_seed(params.seed));
        let max_amplitude = max_amplitude(params.octaves, params.persistence);
        Self {
            noise,
            params,
            max_amplitude,
        }
    }

    /// Sample the field at world `(x, y)`. Always within `[-1, 1]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let nx = (x + self.params.offset_x) / self.params.scale;
        let ny = (y + self.params.offset_y) / self.params.scale;

        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;

        for _ in 0..self.params.octaves {
            total += self.noise.get([nx * frequency, ny * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        (total / self.max_amplitude).clamp(-1.0, 1.0)
    }

    /// Sum of all octave amplitudes (geometric series), the normalizer.
    pub fn max_amplitude(&self) -> f64 {
        self.max_amplitude
    }

    /// Return a reference to the current parameters.
    pub fn params(&self) -> &NoiseParams {
        &self.params
    }
}

/// Folds the high half of the world seed into the 32-bit simplex seed.
fn lattice_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

fn max_amplitude(octaves: u32, persistence: f64) -> f64 {
    let mut sum = 0.0;
    let mut amp = 1.0;
    for _ in 0..octaves {
        sum += amp;
        amp *= persistence;
    }
    sum
}
