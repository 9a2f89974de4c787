use crate::animation::ease::Easing;
use crate::foundation::core::Quat;
use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::math::{linear2srgb, mix, quat_slerp, srgb2linear};

/// Interpolation contract for keyframe value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with eased factor `t` (usually in `[0, 1]`, may overshoot).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        mix(*a, *b, t)
    }
}

impl<const N: usize> Lerp for [f64; N] {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        std::array::from_fn(|i| mix(a[i], b[i], t))
    }
}

impl Lerp for Quat {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Quat(quat_slerp(a.0, b.0, t))
    }
}

/// sRGB-encoded RGBA key. RGB blends in linear light, alpha blends as stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorKey(pub [f64; 4]);

impl Lerp for ColorKey {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let (a, b) = (a.0, b.0);
        Self(std::array::from_fn(|i| {
            if i == 3 {
                mix(a[i], b[i], t)
            } else {
                linear2srgb(mix(srgb2linear(a[i]), srgb2linear(b[i]), t))
            }
        }))
    }
}

/// Rate of change for key types that live in a vector space.
pub trait Slope: Sized {
    /// `(b - a) * rate`.
    fn slope(a: &Self, b: &Self, rate: f64) -> Self;
    fn zero() -> Self;
}

impl Slope for f64 {
    fn slope(a: &Self, b: &Self, rate: f64) -> Self {
        (b - a) * rate
    }

    fn zero() -> Self {
        0.0
    }
}

impl<const N: usize> Slope for [f64; N] {
    fn slope(a: &Self, b: &Self, rate: f64) -> Self {
        std::array::from_fn(|i| (b[i] - a[i]) * rate)
    }

    fn zero() -> Self {
        [0.0; N]
    }
}

/// One keyframe: `value` reached at `time`, `easing` shaping the segment toward the next key.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe<T> {
    /// Time in seconds.
    pub time: f64,
    /// Value at `time`.
    pub value: T,
    /// Easing applied from this key to the next one.
    pub easing: Easing,
}

impl<T> Keyframe<T> {
    /// Keyframe with linear easing.
    pub fn new(time: f64, value: T) -> Self {
        Self {
            time,
            value,
            easing: Easing::LINEAR,
        }
    }

    /// Replace the outgoing easing.
    pub fn with_easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }
}

/// Immutable, validated keyframe sequence.
///
/// Keys are non-empty and strictly increasing in time. Sampling clamps outside the keyed
/// range and never extrapolates.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatedValue<T> {
    keys: Vec<Keyframe<T>>,
}

impl<T> AnimatedValue<T>
where
    T: Lerp + Clone,
{
    /// Validate and wrap `keys`.
    pub fn new(keys: Vec<Keyframe<T>>) -> MotionResult<Self> {
        if keys.is_empty() {
            return Err(MotionError::validation(
                "animation must have at least one keyframe",
            ));
        }
        if let Some((i, k)) = keys.iter().enumerate().find(|(_, k)| !k.time.is_finite()) {
            return Err(MotionError::validation(format!(
                "keyframe {i} has non-finite time {}",
                k.time
            )));
        }
        if let Some(i) = keys.windows(2).position(|w| w[0].time >= w[1].time) {
            return Err(MotionError::validation(format!(
                "keyframe times must be strictly increasing (key {} at {} follows {})",
                i + 1,
                keys[i + 1].time,
                keys[i].time
            )));
        }
        Ok(Self { keys })
    }

    /// Single-key animation: the same value at every time.
    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![Keyframe::new(0.0, value)],
        }
    }

    /// Keys in time order.
    pub fn keys(&self) -> &[Keyframe<T>] {
        &self.keys
    }

    /// Time of the first key.
    pub fn start_time(&self) -> f64 {
        self.keys[0].time
    }

    /// Time of the last key.
    pub fn end_time(&self) -> f64 {
        self.keys[self.keys.len() - 1].time
    }

    /// Sample at time `t` (seconds).
    pub fn evaluate(&self, t: f64) -> T {
        let idx = self.keys.partition_point(|k| k.time <= t);

        if idx == 0 {
            return self.keys[0].value.clone();
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value.clone();
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        if t == a.time {
            return a.value.clone();
        }

        let u = (t - a.time) / (b.time - a.time);
        let e = a.easing.apply(u);
        T::lerp(&a.value, &b.value, e)
    }
}

impl<T> AnimatedValue<T>
where
    T: Slope,
{
    /// Time derivative of [`AnimatedValue::evaluate`] at `t`, in units per second.
    ///
    /// Zero before the first key and from the last key on, where sampling is clamped.
    pub fn velocity(&self, t: f64) -> T {
        let idx = self.keys.partition_point(|k| k.time <= t);
        if idx == 0 || idx >= self.keys.len() {
            return T::zero();
        }
        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.time - a.time;
        let rate = a.easing.derivative((t - a.time) / span) / span;
        T::slope(&a.value, &b.value, rate)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
