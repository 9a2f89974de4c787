//! Motiongraph resolves the animated parameters of a node-based motion graphics scene.
//!
//! A scene is a directed acyclic graph of value nodes (constants, keyframed values and their
//! velocities, noise, paths, expressions) and structural nodes (groups and time-range gates). Resolution is pure:
//!
//! - Describe a scene as a [`SceneDef`] (usually JSON) and build a [`Graph`]
//! - Call [`Graph::evaluate`] with a clock value to get a [`Snapshot`]
//! - Batch many clock values with [`Graph::evaluate_many`]
//!
//! The same graph and clock always produce the same snapshot, bit for bit.
#![forbid(unsafe_code)]

pub(crate) mod animation;
pub(crate) mod eval;
pub(crate) mod expression;
pub(crate) mod foundation;
pub(crate) mod path;
pub(crate) mod scene;

pub use crate::foundation::core::{Point, Quat, Value, ValueType, Vec2};
pub use crate::foundation::error::{MotionError, MotionResult};
pub use crate::foundation::ids::NodeIdx;

pub use crate::animation::ease::{Direction, Ease, Easing};
pub use crate::animation::keyframes::{AnimatedValue, ColorKey, Keyframe, Lerp, Slope};
pub use crate::animation::noise::{Interpolant, Noise};
pub use crate::animation::param::{AnimatedParam, ColorSpace, VelocityParam};

pub use crate::path::curve::{MAX_NEWTON_ITERATIONS, Path, PathMode, Sampling};
pub use crate::path::segment::{
    PathSegment, SegmentKind, segments_from_catmull_rom, segments_from_svg,
};

pub use crate::expression::{CompiledExpr, ExprError, ExprStage, VectorExpr, compile};

pub use crate::eval::fingerprint::Fingerprint;
pub use crate::eval::gate::{AfterPolicy, BeforePolicy, Gate, GateResolution, GateState, TimeRange};
pub use crate::eval::snapshot::{GateReport, Snapshot, SnapshotReport};

pub use crate::scene::graph::Graph;
pub use crate::scene::model::{
    EasingDef, ExprDef, KeyDef, NodeDef, NodeKindDef, PathDef, SceneDef, SegmentDef,
    SmoothPathDef, ValueDef, Vec2Def,
};
pub use crate::scene::settings::EvalSettings;
