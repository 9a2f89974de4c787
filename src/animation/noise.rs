use crate::foundation::core::{Value, ValueType};
use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::math::mix;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug)]
struct Rng64 {
    state: u64,
}

impl Rng64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

/// Gradient in `[-1, 1)` attached to lattice point `i`.
fn gradient(seed: u64, i: i64) -> f64 {
    let mut rng = Rng64::new(seed ^ (i as u64).wrapping_mul(0xD6E8_FEB8_6659_FD93));
    rng.next_f64_01() * 2.0 - 1.0
}

/// Blend weight between two lattice points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolant {
    /// `t`
    Linear,
    /// `3t² - 2t³`
    Cubic,
    /// `6t⁵ - 15t⁴ + 10t³`
    #[default]
    Quintic,
}

impl Interpolant {
    #[inline]
    fn weight(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Cubic => t * t * (3.0 - 2.0 * t),
            Self::Quintic => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
        }
    }
}

/// Fractal 1D gradient noise driven by the clock.
///
/// Each octave is zero on its integer lattice. Octave `k` is scaled by `gain^k` and sampled
/// `lacunarity^k` times faster than the first.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Noise {
    /// Oscillations per second of the first octave.
    pub frequency: f64,
    pub amplitude: f64,
    pub octaves: u32,
    pub lacunarity: f64,
    pub gain: f64,
    pub seed: u32,
    pub interpolant: Interpolant,
}

impl Default for Noise {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            amplitude: 1.0,
            octaves: 3,
            lacunarity: 2.0,
            gain: 0.5,
            seed: 0,
            interpolant: Interpolant::Quintic,
        }
    }
}

impl Noise {
    pub const MAX_OCTAVES: u32 = 32;

    pub fn validate(&self) -> MotionResult<()> {
        for (name, v) in [
            ("frequency", self.frequency),
            ("amplitude", self.amplitude),
            ("lacunarity", self.lacunarity),
            ("gain", self.gain),
        ] {
            if !v.is_finite() {
                return Err(MotionError::validation(format!("noise {name} {v} is not finite")));
            }
        }
        if !(1..=Self::MAX_OCTAVES).contains(&self.octaves) {
            return Err(MotionError::validation(format!(
                "noise octaves must be in 1..={}, got {}",
                Self::MAX_OCTAVES,
                self.octaves
            )));
        }
        Ok(())
    }

    /// Largest magnitude any sample can reach.
    pub fn bound(&self) -> f64 {
        let mut total = 0.0;
        let mut amp = self.amplitude.abs();
        for _ in 0..self.octaves {
            total += amp;
            amp *= self.gain.abs();
        }
        total
    }

    /// Single octave at lattice coordinate `x`.
    fn octave(&self, seed: u64, x: f64) -> f64 {
        let i0 = x.floor();
        let f = x - i0;
        let i0 = i0 as i64;
        let a = gradient(seed, i0) * f;
        let b = gradient(seed, i0.wrapping_add(1)) * (f - 1.0);
        mix(a, b, self.interpolant.weight(f))
    }

    /// One noise channel at time `t`; channels differ by `seed`.
    pub fn sample(&self, seed: u32, t: f64) -> f64 {
        let mut x = t * self.frequency;
        let mut amp = self.amplitude;
        let mut sum = 0.0;
        for k in 0..self.octaves {
            sum += amp * self.octave((u64::from(seed) << 32) | u64::from(k), x);
            x *= self.lacunarity;
            amp *= self.gain;
        }
        sum
    }

    /// Value of type `ty` at time `t`, one channel per component.
    ///
    /// Component seeds are spread evenly over the `u32` range starting at [`Noise::seed`].
    pub fn evaluate(&self, ty: ValueType, t: f64) -> Value {
        let n = ty.arity();
        let stride = u32::MAX / n as u32;
        let mut c = [0.0; 4];
        let mut seed = self.seed;
        for slot in c.iter_mut().take(n) {
            *slot = self.sample(seed, t);
            seed = seed.wrapping_add(stride);
        }
        Value::from_padded(ty, c)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/noise.rs"]
mod tests;
