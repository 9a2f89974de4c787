pub use kurbo::{Point, Vec2};

/// Kind of value a node resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Single scalar.
    Float,
    /// Two components (`x`, `y`).
    Vec2,
    /// Three components (`x`, `y`, `z`).
    Vec3,
    /// Four components (`x`, `y`, `z`, `w`).
    Vec4,
    /// RGBA color, four components (`r`, `g`, `b`, `a`).
    Color,
    /// Orientation quaternion stored as `x`, `y`, `z`, `w`.
    Quat,
}

impl ValueType {
    /// Number of scalar components.
    pub fn arity(self) -> usize {
        match self {
            Self::Float => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 | Self::Color | Self::Quat => 4,
        }
    }

    /// Snake-case name used in scene descriptions and messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Color => "color",
            Self::Quat => "quat",
        }
    }

    /// Positional index of a single-letter component selector.
    ///
    /// `x/y/z/w` and `r/g/b/a` are interchangeable; scalars have no components.
    pub fn component_index(self, selector: char) -> Option<usize> {
        if self == Self::Float {
            return None;
        }
        let idx = match selector {
            'x' | 'r' => 0,
            'y' | 'g' => 1,
            'z' | 'b' => 2,
            'w' | 'a' => 3,
            _ => return None,
        };
        (idx < self.arity()).then_some(idx)
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unit quaternion used for orientation keyframes, components in `x, y, z, w` order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat(pub [f64; 4]);

impl Quat {
    /// Identity rotation.
    pub const IDENTITY: Self = Self([0.0, 0.0, 0.0, 1.0]);
}

/// A resolved parameter value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// Scalar.
    Float(f64),
    /// 2D vector.
    Vec2([f64; 2]),
    /// 3D vector.
    Vec3([f64; 3]),
    /// 4D vector.
    Vec4([f64; 4]),
    /// RGBA color.
    Color([f64; 4]),
    /// Orientation quaternion (`x, y, z, w`).
    Quat([f64; 4]),
}

impl Value {
    /// Type tag of this value.
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

    /// Scalar components in declaration order.
    pub fn components(&self) -> &[f64] {
        match self {
            Self::Float(v) => std::slice::from_ref(v),
            Self::Vec2(v) => v,
            Self::Vec3(v) => v,
            Self::Vec4(v) | Self::Color(v) | Self::Quat(v) => v,
        }
    }

    /// Component `idx`, if in range.
    pub fn component(&self, idx: usize) -> Option<f64> {
        self.components().get(idx).copied()
    }

    /// Scalar payload of a [`Value::Float`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Build a value of type `ty` from exactly `ty.arity()` components.
    pub fn from_components(ty: ValueType, c: &[f64]) -> Option<Self> {
        if c.len() != ty.arity() {
            return None;
        }
        Some(match ty {
            ValueType::Float => Self::Float(c[0]),
            ValueType::Vec2 => Self::Vec2([c[0], c[1]]),
            ValueType::Vec3 => Self::Vec3([c[0], c[1], c[2]]),
            ValueType::Vec4 => Self::Vec4([c[0], c[1], c[2], c[3]]),
            ValueType::Color => Self::Color([c[0], c[1], c[2], c[3]]),
            ValueType::Quat => Self::Quat([c[0], c[1], c[2], c[3]]),
        })
    }

    /// Build a value of type `ty` from the leading components of `c`.
    pub(crate) fn from_padded(ty: ValueType, c: [f64; 4]) -> Self {
        match ty {
            ValueType::Float => Self::Float(c[0]),
            ValueType::Vec2 => Self::Vec2([c[0], c[1]]),
            ValueType::Vec3 => Self::Vec3([c[0], c[1], c[2]]),
            ValueType::Vec4 => Self::Vec4(c),
            ValueType::Color => Self::Color(c),
            ValueType::Quat => Self::Quat(c),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Point> for Value {
    fn from(p: Point) -> Self {
        Self::Vec2([p.x, p.y])
    }
}

impl From<Quat> for Value {
    fn from(q: Quat) -> Self {
        Self::Quat(q.0)
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Float(v) => serializer.serialize_f64(*v),
            other => serde::Serialize::serialize(other.components(), serializer),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
