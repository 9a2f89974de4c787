use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::math::{linear_norm, mix};
use std::f64::consts::{FRAC_PI_2, LN_2, PI, TAU};

/// How a base curve `f` is laid out across the unit interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `f(x)`
    In,
    /// `1 - f(1 - x)`
    Out,
    /// `In` on the first half, `Out` on the second.
    InOut,
    /// `Out` on the first half, `In` on the second.
    OutIn,
}

impl Direction {
    fn suffix(self) -> &'static str {
        match self {
            Self::In => "_in",
            Self::Out => "_out",
            Self::InOut => "_in_out",
            Self::OutIn => "_out_in",
        }
    }

    #[inline]
    fn apply(self, x: f64, f: impl Fn(f64) -> f64) -> f64 {
        match self {
            Self::In => f(x),
            Self::Out => 1.0 - f(1.0 - x),
            Self::InOut => {
                if x < 0.5 {
                    f(2.0 * x) / 2.0
                } else {
                    (2.0 - f(2.0 - 2.0 * x)) / 2.0
                }
            }
            Self::OutIn => {
                if x < 0.5 {
                    (1.0 - f(1.0 - 2.0 * x)) / 2.0
                } else {
                    (1.0 + f(2.0 * x - 1.0)) / 2.0
                }
            }
        }
    }

    /// Slope of [`Direction::apply`] given the base curve's derivative `df`.
    #[inline]
    fn slope(self, x: f64, df: impl Fn(f64) -> f64) -> f64 {
        match self {
            Self::In => df(x),
            Self::Out => df(1.0 - x),
            Self::InOut => {
                if x < 0.5 {
                    df(2.0 * x)
                } else {
                    df(2.0 - 2.0 * x)
                }
            }
            Self::OutIn => {
                if x < 0.5 {
                    df(1.0 - 2.0 * x)
                } else {
                    df(2.0 * x - 1.0)
                }
            }
        }
    }
}

pub(crate) const DEFAULT_EXP_BASE: f64 = 1024.0;
pub(crate) const DEFAULT_OVERSHOOT: f64 = 1.70158;
pub(crate) const DEFAULT_ELASTIC_AMPLITUDE: f64 = 0.1;
pub(crate) const DEFAULT_ELASTIC_PERIOD: f64 = 0.25;

/// Progress remapping curve. Shape parameters are carried inline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    /// `x`
    Linear,
    /// `x²`
    Quadratic(Direction),
    /// `x³`
    Cubic(Direction),
    /// `x⁴`
    Quartic(Direction),
    /// `x⁵`
    Quintic(Direction),
    /// `x^exponent`
    Power {
        /// Layout of the base curve.
        dir: Direction,
        /// Strictly positive exponent.
        exponent: f64,
    },
    /// `1 - cos(x·π/2)`
    Sinus(Direction),
    /// `(base^x - 1) / (base - 1)`
    Exp {
        /// Layout of the base curve.
        dir: Direction,
        /// Positive base, not 1.
        base: f64,
    },
    /// `1 - √(1 - x²)`
    Circular(Direction),
    /// Four decaying bounces. Only `In` and `Out` exist.
    Bounce {
        /// `In` or `Out`.
        dir: Direction,
        /// Bounce height factor.
        a: f64,
    },
    /// Exponentially growing oscillation. Only `In` and `Out` exist.
    Elastic {
        /// `In` or `Out`.
        dir: Direction,
        /// Oscillation amplitude; values below 1 are raised to 1.
        amplitude: f64,
        /// Oscillation period in progress units.
        period: f64,
    },
    /// Overshoots the target and settles back.
    Back {
        /// Layout of the base curve.
        dir: Direction,
        /// Overshoot amount.
        overshoot: f64,
    },
    /// `count` equal jumps; reaches 1 only at `x = 1`.
    Step {
        /// Number of steps, at least 1.
        count: u32,
    },
}

impl Ease {
    /// Resolve a snake-case easing name (`cubic_in_out`, `bounce_out`, `step`, ...) and its
    /// optional shape arguments.
    pub fn from_name(name: &str, args: &[f64]) -> MotionResult<Self> {
        let (family, dir) = split_direction(name);
        let max_args = match family {
            "linear" | "quadratic" | "cubic" | "quartic" | "quintic" | "sinus" | "circular" => 0,
            "power" | "exp" | "bounce" | "back" | "step" => 1,
            "elastic" => 2,
            _ => return Err(MotionError::validation(format!("unknown easing \"{name}\""))),
        };
        if args.len() > max_args {
            return Err(MotionError::validation(format!(
                "easing \"{name}\" takes at most {max_args} argument(s), got {}",
                args.len()
            )));
        }
        if let Some(bad) = args.iter().find(|a| !a.is_finite()) {
            return Err(MotionError::validation(format!(
                "easing \"{name}\" argument {bad} is not finite"
            )));
        }
        let arg = |i: usize, default: f64| args.get(i).copied().unwrap_or(default);

        let ease = match (family, dir) {
            ("linear", None) => Self::Linear,
            ("step", None) => {
                let count = arg(0, 1.0);
                if count < 1.0 || count.fract() != 0.0 || count > f64::from(u32::MAX) {
                    return Err(MotionError::validation(format!(
                        "step count must be a positive integer, got {count}"
                    )));
                }
                Self::Step {
                    count: count as u32,
                }
            }
            ("quadratic", Some(dir)) => Self::Quadratic(dir),
            ("cubic", Some(dir)) => Self::Cubic(dir),
            ("quartic", Some(dir)) => Self::Quartic(dir),
            ("quintic", Some(dir)) => Self::Quintic(dir),
            ("sinus", Some(dir)) => Self::Sinus(dir),
            ("circular", Some(dir)) => Self::Circular(dir),
            ("power", Some(dir)) => {
                let exponent = arg(0, 1.0);
                if exponent <= 0.0 {
                    return Err(MotionError::validation(format!(
                        "power exponent must be > 0, got {exponent}"
                    )));
                }
                Self::Power { dir, exponent }
            }
            ("exp", Some(dir)) => {
                let base = arg(0, DEFAULT_EXP_BASE);
                if base <= 0.0 || base == 1.0 {
                    return Err(MotionError::validation(format!(
                        "exp base must be > 0 and != 1, got {base}"
                    )));
                }
                Self::Exp { dir, base }
            }
            ("back", Some(dir)) => Self::Back {
                dir,
                overshoot: arg(0, DEFAULT_OVERSHOOT),
            },
            ("bounce", Some(dir @ (Direction::In | Direction::Out))) => Self::Bounce {
                dir,
                a: arg(0, DEFAULT_OVERSHOOT),
            },
            ("elastic", Some(dir @ (Direction::In | Direction::Out))) => {
                let period = arg(1, DEFAULT_ELASTIC_PERIOD);
                if period == 0.0 {
                    return Err(MotionError::validation("elastic period must be non-zero"));
                }
                Self::Elastic {
                    dir,
                    amplitude: arg(0, DEFAULT_ELASTIC_AMPLITUDE),
                    period,
                }
            }
            _ => return Err(MotionError::validation(format!("unknown easing \"{name}\""))),
        };
        Ok(ease)
    }

    /// Evaluate the raw curve at `x` (no clamping).
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::Quadratic(dir) => dir.apply(x, |x| x * x),
            Self::Cubic(dir) => dir.apply(x, |x| x * x * x),
            Self::Quartic(dir) => dir.apply(x, |x| x * x * x * x),
            Self::Quintic(dir) => dir.apply(x, |x| x * x * x * x * x),
            Self::Power { dir, exponent } => dir.apply(x, |x| x.powf(exponent)),
            Self::Sinus(dir) => dir.apply(x, |x| 1.0 - (x * FRAC_PI_2).cos()),
            Self::Exp { dir, base } => dir.apply(x, |x| linear_norm(1.0, base, base.powf(x))),
            Self::Circular(dir) => dir.apply(x, |x| 1.0 - (1.0 - x * x).sqrt()),
            Self::Bounce { dir, a } => match dir {
                Direction::In => 1.0 - bounce(1.0 - x, a),
                _ => bounce(x, a),
            },
            Self::Elastic {
                dir,
                amplitude,
                period,
            } => dir.apply(x, |x| elastic_in(x, amplitude, period)),
            Self::Back { dir, overshoot } => {
                dir.apply(x, |x| x * x * ((overshoot + 1.0) * x - overshoot))
            }
            Self::Step { count } => {
                if x >= 1.0 {
                    1.0
                } else {
                    let n = f64::from(count);
                    (x * n).floor() / n
                }
            }
        }
    }

    /// Derivative of [`Ease::eval`] at `x`. Steps are flat everywhere but at their jumps,
    /// where the slope is reported as 0 too.
    pub fn derivative(self, x: f64) -> f64 {
        match self {
            Self::Linear => 1.0,
            Self::Quadratic(dir) => dir.slope(x, |x| 2.0 * x),
            Self::Cubic(dir) => dir.slope(x, |x| 3.0 * x * x),
            Self::Quartic(dir) => dir.slope(x, |x| 4.0 * x * x * x),
            Self::Quintic(dir) => dir.slope(x, |x| 5.0 * x * x * x * x),
            Self::Power { dir, exponent } => {
                dir.slope(x, |x| exponent * x.powf(exponent - 1.0))
            }
            Self::Sinus(dir) => dir.slope(x, |x| (x * FRAC_PI_2).sin() * FRAC_PI_2),
            Self::Exp { dir, base } => {
                dir.slope(x, |x| base.ln() * base.powf(x) / (base - 1.0))
            }
            Self::Circular(dir) => dir.slope(x, |x| x / (1.0 - x * x).sqrt()),
            Self::Bounce { dir, a } => match dir {
                Direction::In => bounce_derivative(1.0 - x, a),
                _ => bounce_derivative(x, a),
            },
            Self::Elastic {
                dir,
                amplitude,
                period,
            } => dir.slope(x, |x| elastic_in_derivative(x, amplitude, period)),
            Self::Back { dir, overshoot } => dir.slope(x, |x| {
                3.0 * (overshoot + 1.0) * x * x - 2.0 * overshoot * x
            }),
            Self::Step { .. } => 0.0,
        }
    }

    /// Inverse of [`Ease::eval`] for the monotonic families.
    pub fn resolve(self, v: f64) -> Option<f64> {
        let t = match self {
            Self::Linear => v,
            Self::Quadratic(dir) => dir.apply(v, f64::sqrt),
            Self::Cubic(dir) => dir.apply(v, f64::cbrt),
            Self::Quartic(dir) => dir.apply(v, |v| v.powf(0.25)),
            Self::Quintic(dir) => dir.apply(v, |v| v.powf(0.2)),
            Self::Power { dir, exponent } => dir.apply(v, |v| v.powf(1.0 / exponent)),
            Self::Sinus(dir) => dir.apply(v, |v| (1.0 - v).acos() / PI * 2.0),
            Self::Exp { dir, base } => {
                dir.apply(v, |v| (v * (base - 1.0) + 1.0).log2() / base.log2())
            }
            Self::Circular(dir) => dir.apply(v, |v| (v * (2.0 - v)).sqrt()),
            Self::Bounce { .. } | Self::Elastic { .. } | Self::Back { .. } | Self::Step { .. } => {
                return None;
            }
        };
        Some(t)
    }
}

fn split_direction(name: &str) -> (&str, Option<Direction>) {
    for dir in [
        Direction::InOut,
        Direction::OutIn,
        Direction::In,
        Direction::Out,
    ] {
        if let Some(family) = name.strip_suffix(dir.suffix()) {
            return (family, Some(dir));
        }
    }
    (name, None)
}

fn bounce(t: f64, a: f64) -> f64 {
    if t == 1.0 {
        return 1.0;
    }
    if t < 4.0 / 11.0 {
        return 7.5625 * t * t;
    }
    let (t, floor) = if t < 8.0 / 11.0 {
        (t - 6.0 / 11.0, 0.75)
    } else if t < 10.0 / 11.0 {
        (t - 9.0 / 11.0, 0.9375)
    } else {
        (t - 21.0 / 22.0, 0.984375)
    };
    -a * (1.0 - (7.5625 * t * t + floor)) + 1.0
}

fn bounce_derivative(t: f64, a: f64) -> f64 {
    if t < 4.0 / 11.0 {
        return 2.0 * 7.5625 * t;
    }
    let t = if t < 8.0 / 11.0 {
        t - 6.0 / 11.0
    } else if t < 10.0 / 11.0 {
        t - 9.0 / 11.0
    } else {
        t - 21.0 / 22.0
    };
    a * 2.0 * 7.5625 * t
}

fn elastic_in(t: f64, amplitude: f64, period: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let (a, s) = if amplitude < 1.0 {
        (1.0, period / 4.0)
    } else {
        (amplitude, period / TAU * (1.0 / amplitude).asin())
    };
    -a * (10.0 * (t - 1.0)).exp2() * ((1.0 - t - s) * TAU / period).sin()
}

fn elastic_in_derivative(t: f64, amplitude: f64, period: f64) -> f64 {
    if t <= 0.0 || t >= 1.0 {
        return 0.0;
    }
    let (a, s) = if amplitude < 1.0 {
        (1.0, period / 4.0)
    } else {
        (amplitude, period / TAU * (1.0 / amplitude).asin())
    };
    let w = (1.0 - t - s) * TAU / period;
    -a * (10.0 * (t - 1.0)).exp2() * (10.0 * LN_2 * w.sin() - TAU / period * w.cos())
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Truncation {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
}

/// An [`Ease`] plus the optional domain adjustments a keyframe can apply to it.
///
/// - `interval` restricts the curve to `[start, end]` of the segment, holding 0 before and 1
///   after.
/// - `truncation` only uses the `[x0, x1]` window of the curve, rescaled so the result still
///   runs from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Easing {
    ease: Ease,
    interval: Option<(f64, f64)>,
    truncation: Option<Truncation>,
}

impl Default for Easing {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl From<Ease> for Easing {
    fn from(ease: Ease) -> Self {
        Self::new(ease)
    }
}

impl Easing {
    /// Plain linear easing.
    pub const LINEAR: Self = Self {
        ease: Ease::Linear,
        interval: None,
        truncation: None,
    };

    /// Wrap `ease` with no domain adjustments.
    pub fn new(ease: Ease) -> Self {
        Self {
            ease,
            interval: None,
            truncation: None,
        }
    }

    /// Underlying curve.
    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Restrict the curve to `[start, end]` of the unit interval.
    pub fn with_interval(mut self, start: f64, end: f64) -> MotionResult<Self> {
        if !(0.0 <= start && start < end && end <= 1.0) {
            return Err(MotionError::validation(format!(
                "easing interval must satisfy 0 <= start < end <= 1, got [{start}, {end}]"
            )));
        }
        self.interval = Some((start, end));
        Ok(self)
    }

    /// Use only the `[x0, x1]` window of the curve.
    pub fn with_truncation(mut self, x0: f64, x1: f64) -> MotionResult<Self> {
        if !(0.0 <= x0 && x0 < x1 && x1 <= 1.0) {
            return Err(MotionError::validation(format!(
                "truncation offsets must satisfy 0 <= x0 < x1 <= 1, got [{x0}, {x1}]"
            )));
        }
        let y0 = self.ease.eval(x0);
        let y1 = self.ease.eval(x1);
        if y0 == y1 || !y0.is_finite() || !y1.is_finite() {
            return Err(MotionError::validation(format!(
                "truncation window [{x0}, {x1}] maps to degenerate boundaries ({y0}, {y1})"
            )));
        }
        self.truncation = Some(Truncation { x0, x1, y0, y1 });
        Ok(self)
    }

    /// Map progress `u` (clamped to `[0, 1]`) to eased progress.
    pub fn apply(&self, u: f64) -> f64 {
        let mut u = u.clamp(0.0, 1.0);
        if let Some((start, end)) = self.interval {
            u = linear_norm(start, end, u).clamp(0.0, 1.0);
        }
        match self.truncation {
            Some(t) => linear_norm(t.y0, t.y1, self.ease.eval(mix(t.x0, t.x1, u))),
            None => self.ease.eval(u),
        }
    }

    /// Slope of [`Easing::apply`] at progress `u`; 0 wherever the output is held.
    pub fn derivative(&self, u: f64) -> f64 {
        if !(0.0..=1.0).contains(&u) {
            return 0.0;
        }
        let mut u = u;
        let mut scale = 1.0;
        if let Some((start, end)) = self.interval {
            if u < start || u > end {
                return 0.0;
            }
            u = linear_norm(start, end, u);
            scale /= end - start;
        }
        match self.truncation {
            Some(t) => {
                scale * self.ease.derivative(mix(t.x0, t.x1, u)) * (t.x1 - t.x0) / (t.y1 - t.y0)
            }
            None => scale * self.ease.derivative(u),
        }
    }

    /// Progress `u` at which [`Easing::apply`] yields `v`, if the curve is invertible.
    pub fn solve(&self, v: f64) -> Option<f64> {
        let v = match self.truncation {
            Some(t) => mix(t.y0, t.y1, v),
            None => v,
        };
        let mut u = self.ease.resolve(v)?;
        if let Some(t) = self.truncation {
            u = linear_norm(t.x0, t.x1, u);
        }
        if let Some((start, end)) = self.interval {
            u = mix(start, end, u);
        }
        Some(u)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
