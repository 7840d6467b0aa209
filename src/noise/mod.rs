//! Noise generation module for terrain synthesis.
//!
//! Uses simdnoise for the seeded base simplex field.

mod fractal;

pub use fractal::{
    NoiseConfig, octave_amplitudes, rescale_unit, sample_base_noise, sample_fractal_noise,
};
