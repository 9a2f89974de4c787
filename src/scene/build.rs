use crate::animation::ease::{Ease, Easing};
use crate::animation::keyframes::{AnimatedValue, Keyframe};
use crate::animation::param::{AnimatedParam, VelocityParam};
use crate::eval::gate::{Gate, TimeRange};
use crate::expression::{VectorExpr, compile};
use crate::foundation::core::{Point, Value, ValueType};
use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::ids::NodeIdx;
use crate::path::curve::{Path, Sampling};
use crate::path::segment::{PathSegment, SegmentKind, segments_from_catmull_rom};
use crate::scene::graph::{Graph, Node, NodeKind};
use crate::scene::model::{
    EasingDef, KeyDef, NodeDef, NodeKindDef, PathDef, SceneDef, SegmentDef, ValueDef,
};
use smallvec::{SmallVec, smallvec};
use std::collections::HashMap;

const SCENE: &str = "<scene>";

pub(crate) fn build_graph(def: &SceneDef) -> MotionResult<Graph> {
    def.settings.validate()?;
    let sampling = def.settings.sampling();

    let mut by_id = HashMap::<String, NodeIdx>::with_capacity(def.nodes.len());
    for (i, n) in def.nodes.iter().enumerate() {
        if n.id.is_empty() {
            return Err(MotionError::construction(
                format!("#{i}"),
                "id",
                "node id must not be empty",
            ));
        }
        let idx = NodeIdx(
            u32::try_from(i).map_err(|_| MotionError::validation("too many nodes"))?,
        );
        if by_id.insert(n.id.clone(), idx).is_some() {
            return Err(MotionError::construction(&n.id, "id", "duplicate node id"));
        }
    }

    // Output types first: expressions bind against nodes declared after them too.
    let outputs = def
        .nodes
        .iter()
        .map(|n| declared_output(n, &def.nodes, &by_id))
        .collect::<MotionResult<Vec<_>>>()?;

    let cx = BuildCx {
        by_id: &by_id,
        outputs: &outputs,
        defs: &def.nodes,
        sampling,
    };
    let nodes = def
        .nodes
        .iter()
        .map(|n| {
            Ok(Node {
                id: n.id.clone(),
                kind: cx.build_kind(n)?,
            })
        })
        .collect::<MotionResult<Vec<_>>>()?;

    let root = by_id.get(&def.root).copied().ok_or_else(|| {
        MotionError::construction(SCENE, "root", format!("unknown node \"{}\"", def.root))
    })?;

    if let Some(cycle) = find_cycle(&nodes) {
        return Err(MotionError::Cycle {
            path: cycle.into_iter().map(|i| nodes[i.index()].id.clone()).collect(),
        });
    }

    tracing::debug!(
        nodes = nodes.len(),
        root = %def.root,
        path_precision = sampling.precision,
        "built scene graph"
    );

    Ok(Graph {
        nodes,
        by_id,
        root,
        settings: def.settings,
    })
}

fn declared_output(
    n: &NodeDef,
    defs: &[NodeDef],
    by_id: &HashMap<String, NodeIdx>,
) -> MotionResult<Option<ValueType>> {
    let infer = |declared: Option<ValueType>, sample: Option<&ValueDef>, field: &str| {
        if let Some(ty) = declared {
            return Ok(ty);
        }
        let Some(sample) = sample else {
            return Err(MotionError::construction(
                &n.id,
                field,
                "animation must have at least one keyframe",
            ));
        };
        sample.implied_type().ok_or_else(|| {
            MotionError::construction(
                &n.id,
                field,
                format!(
                    "cannot infer a type from {} components; set \"type\"",
                    sample.components().len()
                ),
            )
        })
    };

    Ok(match &n.kind {
        NodeKindDef::Constant { ty, value } => Some(infer(*ty, Some(value), "value")?),
        NodeKindDef::Time => Some(ValueType::Float),
        NodeKindDef::Animated { ty, keys, .. } => {
            Some(infer(*ty, keys.first().map(|k| &k.value), "keys")?)
        }
        NodeKindDef::Velocity { animation } => {
            let target = animated_target(&n.id, animation, defs, by_id)?;
            declared_output(target, defs, by_id)?
        }
        NodeKindDef::Noise { ty, .. } => Some(*ty),
        NodeKindDef::Path { .. } => Some(ValueType::Vec2),
        NodeKindDef::Expr { ty, .. } => Some(*ty),
        NodeKindDef::Group { .. } | NodeKindDef::TimeRange { .. } => None,
    })
}

/// The `animated` node a velocity node differentiates.
fn animated_target<'d>(
    node: &str,
    target: &str,
    defs: &'d [NodeDef],
    by_id: &HashMap<String, NodeIdx>,
) -> MotionResult<&'d NodeDef> {
    let def = by_id
        .get(target)
        .map(|i| &defs[i.index()])
        .ok_or_else(|| {
            MotionError::construction(node, "animation", format!("unknown node \"{target}\""))
        })?;
    match def.kind {
        NodeKindDef::Animated { .. } => Ok(def),
        _ => Err(MotionError::construction(
            node,
            "animation",
            format!("\"{target}\" is not an animated node"),
        )),
    }
}

struct BuildCx<'a> {
    by_id: &'a HashMap<String, NodeIdx>,
    outputs: &'a [Option<ValueType>],
    defs: &'a [NodeDef],
    sampling: Sampling,
}

impl BuildCx<'_> {
    fn resolve(&self, node: &str, field: &str, target: &str) -> MotionResult<NodeIdx> {
        self.by_id.get(target).copied().ok_or_else(|| {
            MotionError::construction(node, field, format!("unknown node \"{target}\""))
        })
    }

    fn build_kind(&self, n: &NodeDef) -> MotionResult<NodeKind> {
        let id = n.id.as_str();
        let own_type = || {
            self.by_id
                .get(id)
                .and_then(|i| self.outputs[i.index()])
                .unwrap_or(ValueType::Float)
        };

        Ok(match &n.kind {
            NodeKindDef::Constant { value, .. } => {
                let ty = own_type();
                let value = Value::from_components(ty, value.components()).ok_or_else(|| {
                    MotionError::construction(
                        id,
                        "value",
                        format!(
                            "{ty} expects {} component(s), got {}",
                            ty.arity(),
                            value.components().len()
                        ),
                    )
                })?;
                NodeKind::Constant(value)
            }
            NodeKindDef::Time => NodeKind::Time,
            NodeKindDef::Animated { .. } => {
                let (param, time_offset) = self.animated(n, own_type())?;
                NodeKind::Animated { param, time_offset }
            }
            NodeKindDef::Velocity { animation } => {
                let target = animated_target(id, animation, self.defs, self.by_id)?;
                let (param, time_offset) = self.animated(target, own_type())?;
                NodeKind::Velocity {
                    param: VelocityParam::try_from(param)
                        .map_err(|e| e.in_node(id, "animation"))?,
                    time_offset,
                }
            }
            NodeKindDef::Noise {
                ty,
                noise,
                time_offset,
            } => {
                if matches!(ty, ValueType::Color | ValueType::Quat) {
                    return Err(MotionError::construction(
                        id,
                        "type",
                        format!("noise produces float or vector values, not {ty}"),
                    ));
                }
                noise.validate().map_err(|e| e.in_node(id, "noise"))?;
                NodeKind::Noise {
                    noise: *noise,
                    ty: *ty,
                    time_offset: finite(*time_offset, id, "time_offset")?,
                }
            }
            NodeKindDef::Path {
                path,
                progress,
                mode,
                time_offset,
            } => NodeKind::Path {
                path: self.build_path(path).map_err(|e| e.in_node(id, "path"))?,
                progress: scalar_keys(progress).map_err(|e| e.in_node(id, "progress"))?,
                mode: *mode,
                time_offset: finite(*time_offset, id, "time_offset")?,
            },
            NodeKindDef::Expr {
                ty,
                expr,
                resources,
            } => {
                let mut decl = Vec::<(&str, ValueType)>::with_capacity(resources.len());
                let mut edges = SmallVec::<[NodeIdx; 4]>::new();
                for (name, target) in resources {
                    if !is_identifier(name) {
                        return Err(MotionError::construction(
                            id,
                            "resources",
                            format!("resource name \"{name}\" is not an identifier"),
                        ));
                    }
                    let idx = self.resolve(id, "resources", target)?;
                    let Some(rty) = self.outputs[idx.index()] else {
                        return Err(MotionError::construction(
                            id,
                            "resources",
                            format!(
                                "resource \"{name}\" refers to \"{}\", which produces no value",
                                self.defs[idx.index()].id
                            ),
                        ));
                    };
                    decl.push((name.as_str(), rty));
                    edges.push(idx);
                }

                let sources = expr.sources();
                let single = sources.len() == 1;
                let compiled = sources
                    .iter()
                    .enumerate()
                    .map(|(i, src)| {
                        compile(src, &decl).map_err(|e| {
                            let field = if single {
                                "expr".to_owned()
                            } else {
                                format!("expr[{i}]")
                            };
                            MotionError::expression(id, field, e)
                        })
                    })
                    .collect::<MotionResult<Vec<_>>>()?;
                NodeKind::Expr {
                    expr: VectorExpr::new(*ty, compiled).map_err(|e| e.in_node(id, "expr"))?,
                    resources: edges,
                }
            }
            NodeKindDef::Group { children } => NodeKind::Group {
                children: children
                    .iter()
                    .map(|c| self.resolve(id, "children", c))
                    .collect::<MotionResult<_>>()?,
            },
            NodeKindDef::TimeRange {
                child,
                start,
                end,
                before,
                after,
                render_time,
            } => {
                let range = TimeRange::new(*start, *end).map_err(|e| e.in_node(id, "range"))?;
                NodeKind::TimeRange {
                    child: self.resolve(id, "child", child)?,
                    gate: Gate::new(range, *before, *after, *render_time)
                        .map_err(|e| e.in_node(id, "render_time"))?,
                }
            }
        })
    }

    /// Keyed curve and time offset of an `animated` node, typed as `ty`.
    fn animated(&self, n: &NodeDef, ty: ValueType) -> MotionResult<(AnimatedParam, f64)> {
        let id = n.id.as_str();
        let NodeKindDef::Animated {
            keys,
            space,
            time_offset,
            ..
        } = &n.kind
        else {
            return Err(MotionError::construction(id, "kind", "not an animated node"));
        };
        let triples = keys
            .iter()
            .enumerate()
            .map(|(i, k)| {
                let easing = easing_from_def(k.ease.as_ref())
                    .map_err(|e| e.in_node(id, &format!("keys[{i}].ease")))?;
                Ok((k.time, k.value.components().to_vec(), easing))
            })
            .collect::<MotionResult<Vec<_>>>()?;
        let param =
            AnimatedParam::from_keys_in(ty, *space, &triples).map_err(|e| e.in_node(id, "keys"))?;
        Ok((param, finite(*time_offset, id, "time_offset")?))
    }

    fn build_path(&self, def: &PathDef) -> MotionResult<Path> {
        match def {
            PathDef::Svg(d) => Path::from_svg(d, self.sampling),
            PathDef::Smooth(smooth) => {
                let points = smooth
                    .points
                    .iter()
                    .map(|&p| Point::from(p))
                    .collect::<Vec<_>>();
                let control1 = smooth
                    .control1
                    .map(Point::from)
                    .or_else(|| points.first().copied())
                    .unwrap_or(Point::ORIGIN);
                let control2 = smooth
                    .control2
                    .map(Point::from)
                    .or_else(|| points.last().copied())
                    .unwrap_or(Point::ORIGIN);
                let segments =
                    segments_from_catmull_rom(&points, control1, control2, smooth.tension)?;
                Path::new(segments, self.sampling)
            }
            PathDef::Segments(segs) => {
                let segments = segs
                    .iter()
                    .map(|s| {
                        let (kind, pts): (SegmentKind, SmallVec<[Point; 3]>) = match s {
                            SegmentDef::Move(p) => (SegmentKind::Move, smallvec![Point::from(*p)]),
                            SegmentDef::Line(p) => (SegmentKind::Line, smallvec![Point::from(*p)]),
                            SegmentDef::Quad(p) => {
                                (SegmentKind::Quad, p.iter().map(|&v| Point::from(v)).collect())
                            }
                            SegmentDef::Cubic(p) => {
                                (SegmentKind::Cubic, p.iter().map(|&v| Point::from(v)).collect())
                            }
                            SegmentDef::Close => (SegmentKind::Close, SmallVec::new()),
                        };
                        PathSegment::from_points(kind, &pts)
                    })
                    .collect::<MotionResult<Vec<_>>>()?;
                Path::new(segments, self.sampling)
            }
        }
    }
}

fn easing_from_def(def: Option<&EasingDef>) -> MotionResult<Easing> {
    match def {
        None => Ok(Easing::LINEAR),
        Some(EasingDef::Name(name)) => Ok(Easing::new(Ease::from_name(name, &[])?)),
        Some(EasingDef::Full {
            name,
            args,
            interval,
            truncate,
        }) => {
            let mut easing = Easing::new(Ease::from_name(name, args)?);
            if let Some([start, end]) = *interval {
                easing = easing.with_interval(start, end)?;
            }
            if let Some([x0, x1]) = *truncate {
                easing = easing.with_truncation(x0, x1)?;
            }
            Ok(easing)
        }
    }
}

fn scalar_keys(keys: &[KeyDef]) -> MotionResult<AnimatedValue<f64>> {
    let keys = keys
        .iter()
        .enumerate()
        .map(|(i, k)| match k.value.components() {
            [v] => Ok(Keyframe::new(k.time, *v).with_easing(easing_from_def(k.ease.as_ref())?)),
            other => Err(MotionError::validation(format!(
                "keyframe {i} has {} components, progress is a float",
                other.len()
            ))),
        })
        .collect::<MotionResult<Vec<_>>>()?;
    AnimatedValue::new(keys)
}

fn finite(v: f64, node: &str, field: &str) -> MotionResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(MotionError::construction(node, field, format!("{v} is not finite")))
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// First reference cycle found by DFS coloring in declaration order, as a closed index path.
fn find_cycle(nodes: &[Node]) -> Option<Vec<NodeIdx>> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Color {
        White,
        Grey,
        Black,
    }

    fn dfs(
        v: NodeIdx,
        nodes: &[Node],
        color: &mut [Color],
        stack: &mut Vec<NodeIdx>,
    ) -> Option<Vec<NodeIdx>> {
        color[v.index()] = Color::Grey;
        stack.push(v);
        for &to in nodes[v.index()].kind.edges() {
            match color[to.index()] {
                Color::White => {
                    if let Some(c) = dfs(to, nodes, color, stack) {
                        return Some(c);
                    }
                }
                Color::Grey => {
                    let pos = stack.iter().position(|&x| x == to).unwrap_or(0);
                    let mut cycle = stack[pos..].to_vec();
                    cycle.push(to);
                    return Some(cycle);
                }
                Color::Black => {}
            }
        }
        stack.pop();
        color[v.index()] = Color::Black;
        None
    }

    let mut color = vec![Color::White; nodes.len()];
    let mut stack = Vec::new();
    for i in 0..nodes.len() {
        // indices were range-checked when the id table was built
        let v = NodeIdx(i as u32);
        if color[i] == Color::White
            && let Some(c) = dfs(v, nodes, &mut color, &mut stack)
        {
            return Some(c);
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/scene/build.rs"]
mod tests;
