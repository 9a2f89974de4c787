use crate::animation::ease::Easing;
use crate::animation::keyframes::{AnimatedValue, ColorKey, Keyframe};
use crate::foundation::core::{Quat, Value, ValueType};
use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::math::{hsl2srgb, hsv2srgb};
use serde::{Deserialize, Serialize};

/// How color key components are read. Keys are stored sRGB-encoded whatever the input space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// `[r, g, b, a]`, sRGB-encoded.
    #[default]
    Srgb,
    /// `[hue, saturation, lightness, a]`, hue in turns.
    Hsl,
    /// `[hue, saturation, value, a]`, hue in turns.
    Hsv,
}

impl ColorSpace {
    /// Convert one `space` color to sRGB-encoded RGBA.
    pub fn to_srgb(self, c: [f64; 4]) -> [f64; 4] {
        let [r, g, b] = match self {
            Self::Srgb => return c,
            Self::Hsl => hsl2srgb(c[0], c[1], c[2]),
            Self::Hsv => hsv2srgb(c[0], c[1], c[2]),
        };
        [r, g, b, c[3]]
    }
}

/// A keyframed parameter of any [`ValueType`].
#[derive(Clone, Debug, PartialEq)]
pub enum AnimatedParam {
    /// Scalar keys.
    Float(AnimatedValue<f64>),
    /// 2D vector keys.
    Vec2(AnimatedValue<[f64; 2]>),
    /// 3D vector keys.
    Vec3(AnimatedValue<[f64; 3]>),
    /// 4D vector keys.
    Vec4(AnimatedValue<[f64; 4]>),
    /// sRGB color keys, blended in linear light.
    Color(AnimatedValue<ColorKey>),
    /// Orientation keys, slerped along the shortest arc.
    Quat(AnimatedValue<Quat>),
}

impl AnimatedParam {
    /// Build from `(time, components, easing)` triples, checking each key's arity against `ty`.
    pub fn from_keys(ty: ValueType, keys: &[(f64, Vec<f64>, Easing)]) -> MotionResult<Self> {
        Self::from_keys_in(ty, ColorSpace::Srgb, keys)
    }

    /// [`AnimatedParam::from_keys`] with color keys read in `space`.
    pub fn from_keys_in(
        ty: ValueType,
        space: ColorSpace,
        keys: &[(f64, Vec<f64>, Easing)],
    ) -> MotionResult<Self> {
        if space != ColorSpace::Srgb && ty != ValueType::Color {
            return Err(MotionError::validation(format!(
                "a color space only applies to color keys, not {ty}"
            )));
        }
        for (i, (_, c, _)) in keys.iter().enumerate() {
            if c.len() != ty.arity() {
                return Err(MotionError::validation(format!(
                    "keyframe {i} has {} component(s), {ty} expects {}",
                    c.len(),
                    ty.arity()
                )));
            }
        }

        fn collect<T>(
            keys: &[(f64, Vec<f64>, Easing)],
            conv: impl Fn(&[f64]) -> T,
        ) -> Vec<Keyframe<T>> {
            keys.iter()
                .map(|(time, c, easing)| Keyframe {
                    time: *time,
                    value: conv(c),
                    easing: *easing,
                })
                .collect()
        }

        Ok(match ty {
            ValueType::Float => Self::Float(AnimatedValue::new(collect(keys, |c| c[0]))?),
            ValueType::Vec2 => Self::Vec2(AnimatedValue::new(collect(keys, |c| [c[0], c[1]]))?),
            ValueType::Vec3 => {
                Self::Vec3(AnimatedValue::new(collect(keys, |c| [c[0], c[1], c[2]]))?)
            }
            ValueType::Vec4 => Self::Vec4(AnimatedValue::new(collect(keys, quad))?),
            ValueType::Color => Self::Color(AnimatedValue::new(collect(keys, |c| {
                ColorKey(space.to_srgb(quad(c)))
            }))?),
            ValueType::Quat => {
                Self::Quat(AnimatedValue::new(collect(keys, |c| Quat(quad(c))))?)
            }
        })
    }

    /// Value type produced by [`AnimatedParam::evaluate`].
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Float(_) => ValueType::Float,
            Self::Vec2(_) => ValueType::Vec2,
            Self::Vec3(_) => ValueType::Vec3,
            Self::Vec4(_) => ValueType::Vec4,
            Self::Color(_) => ValueType::Color,
            Self::Quat(_) => ValueType::Quat,
        }
    }

    /// Sample at time `t`.
    pub fn evaluate(&self, t: f64) -> Value {
        match self {
            Self::Float(a) => Value::Float(a.evaluate(t)),
            Self::Vec2(a) => Value::Vec2(a.evaluate(t)),
            Self::Vec3(a) => Value::Vec3(a.evaluate(t)),
            Self::Vec4(a) => Value::Vec4(a.evaluate(t)),
            Self::Color(a) => Value::Color(a.evaluate(t).0),
            Self::Quat(a) => Value::Quat(a.evaluate(t).0),
        }
    }
}

/// Keyed curve whose time derivative is defined: floats and plain vectors.
#[derive(Clone, Debug, PartialEq)]
pub enum VelocityParam {
    Float(AnimatedValue<f64>),
    Vec2(AnimatedValue<[f64; 2]>),
    Vec3(AnimatedValue<[f64; 3]>),
    Vec4(AnimatedValue<[f64; 4]>),
}

impl TryFrom<AnimatedParam> for VelocityParam {
    type Error = MotionError;

    fn try_from(param: AnimatedParam) -> MotionResult<Self> {
        Ok(match param {
            AnimatedParam::Float(a) => Self::Float(a),
            AnimatedParam::Vec2(a) => Self::Vec2(a),
            AnimatedParam::Vec3(a) => Self::Vec3(a),
            AnimatedParam::Vec4(a) => Self::Vec4(a),
            other => {
                return Err(MotionError::validation(format!(
                    "velocity needs a float or vector animation, got {}",
                    other.value_type()
                )));
            }
        })
    }
}

impl VelocityParam {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Float(_) => ValueType::Float,
            Self::Vec2(_) => ValueType::Vec2,
            Self::Vec3(_) => ValueType::Vec3,
            Self::Vec4(_) => ValueType::Vec4,
        }
    }

    /// Rate of change of the keyed curve at time `t`.
    pub fn evaluate(&self, t: f64) -> Value {
        match self {
            Self::Float(a) => Value::Float(a.velocity(t)),
            Self::Vec2(a) => Value::Vec2(a.velocity(t)),
            Self::Vec3(a) => Value::Vec3(a.velocity(t)),
            Self::Vec4(a) => Value::Vec4(a.velocity(t)),
        }
    }
}

fn quad(c: &[f64]) -> [f64; 4] {
    [c[0], c[1], c[2], c[3]]
}
