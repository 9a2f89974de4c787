use crate::animation::noise::Noise;
use crate::animation::param::ColorSpace;
use crate::eval::gate::{AfterPolicy, BeforePolicy};
use crate::foundation::core::{Point, ValueType};
use crate::path::curve::PathMode;
use crate::scene::settings::EvalSettings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declarative scene description: a flat list of nodes wired together by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDef {
    #[serde(default)]
    pub settings: EvalSettings,
    /// Id of the node every pass starts from.
    pub root: String,
    pub nodes: Vec<NodeDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
    pub id: String,
    pub kind: NodeKindDef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKindDef {
    /// Static value. `type` may be omitted for floats and plain vectors.
    Constant {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        ty: Option<ValueType>,
        value: ValueDef,
    },
    /// The frame clock as a float.
    Time,
    Animated {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        ty: Option<ValueType>,
        keys: Vec<KeyDef>,
        /// How color key components are read.
        #[serde(default, skip_serializing_if = "is_default")]
        space: ColorSpace,
        #[serde(default, skip_serializing_if = "is_zero")]
        time_offset: f64,
    },
    /// Time derivative of the curve keyed by an `animated` node, which keeps its time offset.
    Velocity {
        animation: String,
    },
    /// Fractal gradient noise of the clock, one channel per component.
    Noise {
        #[serde(rename = "type", default = "default_float")]
        ty: ValueType,
        #[serde(flatten)]
        noise: Noise,
        #[serde(default, skip_serializing_if = "is_zero")]
        time_offset: f64,
    },
    /// Point on a path at keyframed progress `[0, 1]`.
    Path {
        path: PathDef,
        progress: Vec<KeyDef>,
        #[serde(default)]
        mode: PathMode,
        #[serde(default, skip_serializing_if = "is_zero")]
        time_offset: f64,
    },
    Expr {
        #[serde(rename = "type", default = "default_float")]
        ty: ValueType,
        expr: ExprDef,
        /// Resource name to node id.
        #[serde(default)]
        resources: BTreeMap<String, String>,
    },
    Group {
        children: Vec<String>,
    },
    TimeRange {
        child: String,
        start: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<f64>,
        #[serde(default)]
        before: BeforePolicy,
        #[serde(default)]
        after: AfterPolicy,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        render_time: Option<f64>,
    },
}

fn default_float() -> ValueType {
    ValueType::Float
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

fn is_default<T: Default + PartialEq>(v: &T) -> bool {
    *v == T::default()
}

/// Bare number for scalars, array of components otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueDef {
    Scalar(f64),
    List(Vec<f64>),
}

impl ValueDef {
    pub fn components(&self) -> &[f64] {
        match self {
            Self::Scalar(v) => std::slice::from_ref(v),
            Self::List(v) => v,
        }
    }

    /// Value type implied by the component count when none is declared.
    pub(crate) fn implied_type(&self) -> Option<ValueType> {
        match self.components().len() {
            1 => Some(ValueType::Float),
            2 => Some(ValueType::Vec2),
            3 => Some(ValueType::Vec3),
            4 => Some(ValueType::Vec4),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDef {
    pub time: f64,
    pub value: ValueDef,
    /// Easing from this key to the next. Linear when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<EasingDef>,
}

/// Easing by name, or by name with shape arguments and domain adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EasingDef {
    Name(String),
    Full {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        interval: Option<[f64; 2]>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        truncate: Option<[f64; 2]>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vec2Def {
    pub x: f64,
    pub y: f64,
}

impl<'de> Deserialize<'de> for Vec2Def {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 2]),
            Obj { x: f64, y: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y]) | Repr::Obj { x, y } => Ok(Self { x, y }),
        }
    }
}

impl From<Vec2Def> for Point {
    fn from(v: Vec2Def) -> Self {
        Point::new(v.x, v.y)
    }
}

/// SVG path data, an explicit segment list, or anchors of a smooth spline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathDef {
    Svg(String),
    Segments(Vec<SegmentDef>),
    Smooth(SmoothPathDef),
}

/// One path command. Quad and cubic list their control points before the end point.
///
/// Point counts are checked when the graph is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentDef {
    Move(Vec2Def),
    Line(Vec2Def),
    Quad(Vec<Vec2Def>),
    Cubic(Vec<Vec2Def>),
    Close,
}

/// Catmull-Rom spline through `points`, drawn as cubic curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothPathDef {
    pub points: Vec<Vec2Def>,
    /// Neighbour of the first anchor; the first anchor itself when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control1: Option<Vec2Def>,
    /// Neighbour of the last anchor; the last anchor itself when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control2: Option<Vec2Def>,
    #[serde(default = "default_tension")]
    pub tension: f64,
}

fn default_tension() -> f64 {
    0.5
}

/// One expression for every component, or one per component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExprDef {
    One(String),
    Many(Vec<String>),
}

impl ExprDef {
    pub fn sources(&self) -> &[String] {
        match self {
            Self::One(s) => std::slice::from_ref(s),
            Self::Many(v) => v,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
