use crate::animation::keyframes::AnimatedValue;
use crate::animation::noise::Noise;
use crate::animation::param::{AnimatedParam, VelocityParam};
use crate::eval::gate::Gate;
use crate::expression::VectorExpr;
use crate::foundation::core::{Value, ValueType};
use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::ids::NodeIdx;
use crate::path::curve::{Path, PathMode};
use crate::scene::model::SceneDef;
use crate::scene::settings::EvalSettings;
use anyhow::Context;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Built node payload. Every reference is an index into the owning [`Graph`].
#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Constant(Value),
    Time,
    Animated {
        param: AnimatedParam,
        time_offset: f64,
    },
    Velocity {
        param: VelocityParam,
        time_offset: f64,
    },
    Noise {
        noise: Noise,
        ty: ValueType,
        time_offset: f64,
    },
    Path {
        path: Path,
        progress: AnimatedValue<f64>,
        mode: PathMode,
        time_offset: f64,
    },
    Expr {
        expr: VectorExpr,
        resources: SmallVec<[NodeIdx; 4]>,
    },
    Group {
        children: SmallVec<[NodeIdx; 4]>,
    },
    TimeRange {
        child: NodeIdx,
        gate: Gate,
    },
}

impl NodeKind {
    /// Type of the value this node resolves to; `None` for structural nodes.
    pub(crate) fn output(&self) -> Option<ValueType> {
        match self {
            Self::Constant(v) => Some(v.value_type()),
            Self::Time => Some(ValueType::Float),
            Self::Animated { param, .. } => Some(param.value_type()),
            Self::Velocity { param, .. } => Some(param.value_type()),
            Self::Noise { ty, .. } => Some(*ty),
            Self::Path { .. } => Some(ValueType::Vec2),
            Self::Expr { expr, .. } => Some(expr.value_type()),
            Self::Group { .. } | Self::TimeRange { .. } => None,
        }
    }

    /// Outgoing edges in declaration order.
    pub(crate) fn edges(&self) -> &[NodeIdx] {
        match self {
            Self::Expr { resources, .. } => resources,
            Self::Group { children } => children,
            Self::TimeRange { child, .. } => std::slice::from_ref(child),
            Self::Constant(_)
            | Self::Time
            | Self::Animated { .. }
            | Self::Velocity { .. }
            | Self::Noise { .. }
            | Self::Path { .. } => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) id: String,
    pub(crate) kind: NodeKind,
}

/// Immutable, validated scene graph. Evaluation entry points live in [`crate::eval`].
///
/// Nodes sit in an arena addressed by [`NodeIdx`]; construction guarantees every reference
/// resolves, the reference graph is acyclic, and expressions are bound.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) by_id: HashMap<String, NodeIdx>,
    pub(crate) root: NodeIdx,
    pub(crate) settings: EvalSettings,
}

impl Graph {
    /// Validate and build `def`.
    pub fn build(def: &SceneDef) -> MotionResult<Self> {
        crate::scene::build::build_graph(def)
    }

    /// Parse a JSON scene description and build it.
    pub fn from_json(json: &str) -> MotionResult<Self> {
        let def: SceneDef =
            serde_json::from_str(json).map_err(|e| MotionError::serde(e.to_string()))?;
        Self::build(&def)
    }

    /// Read, parse and build a JSON scene description file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> MotionResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read scene {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> NodeIdx {
        self.root
    }

    pub fn settings(&self) -> EvalSettings {
        self.settings
    }

    pub fn node_idx(&self, id: &str) -> Option<NodeIdx> {
        self.by_id.get(id).copied()
    }

    /// Id of `idx`. Panics if `idx` came from another graph and is out of range.
    pub fn node_id(&self, idx: NodeIdx) -> &str {
        &self.nodes[idx.index()].id
    }

    /// Value type `idx` resolves to, `None` for groups and time ranges.
    pub fn output_type(&self, idx: NodeIdx) -> Option<ValueType> {
        self.nodes.get(idx.index()).and_then(|n| n.kind.output())
    }

    pub(crate) fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.index()]
    }
}
