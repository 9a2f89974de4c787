use crate::eval::cache::FrameCache;
use crate::eval::snapshot::Snapshot;
use crate::foundation::core::Value;
use crate::foundation::error::{MotionError, MotionResult};
use crate::foundation::ids::NodeIdx;
use crate::scene::graph::{Graph, NodeKind};
use rayon::prelude::*;
use smallvec::SmallVec;

/// One depth-first resolution pass at one clock value.
///
/// The memo lives exactly as long as the pass. Shared nodes resolve once per distinct clock,
/// so every parent sees the same value within a frame.
struct Pass<'g> {
    graph: &'g Graph,
    cache: FrameCache,
    snapshot: Snapshot,
}

impl<'g> Pass<'g> {
    fn new(graph: &'g Graph, t: f64) -> Self {
        Self {
            graph,
            cache: FrameCache::new(graph.len()),
            snapshot: Snapshot::new(t, graph.len()),
        }
    }

    /// Walk the subtree under `idx`. Gates decide which clock, if any, their child sees.
    fn visit(&mut self, idx: NodeIdx, clock: f64) {
        let graph = self.graph;
        match &graph.node(idx).kind {
            NodeKind::Group { children } => {
                for &child in children {
                    self.visit(child, clock);
                }
            }
            NodeKind::TimeRange { child, gate } => {
                let res = gate.resolve(clock);
                let slot = &mut self.snapshot.gates[idx.index()];
                if slot.is_none() {
                    *slot = Some(res);
                }
                match res.clock {
                    Some(c) => self.visit(*child, c),
                    None => tracing::trace!(
                        gate = graph.node_id(idx),
                        state = ?res.state,
                        clock,
                        "subtree excluded"
                    ),
                }
            }
            _ => {
                self.resolve(idx, clock);
            }
        }
    }

    /// Value of `idx` at `clock`, computing and memoizing it on first request.
    fn resolve(&mut self, idx: NodeIdx, clock: f64) -> Value {
        if let Some(v) = self.cache.get(idx, clock) {
            return v;
        }
        let graph = self.graph;
        let value = match &graph.node(idx).kind {
            NodeKind::Constant(v) => *v,
            NodeKind::Time => Value::Float(clock),
            NodeKind::Animated { param, time_offset } => param.evaluate(clock - time_offset),
            NodeKind::Velocity { param, time_offset } => param.evaluate(clock - time_offset),
            NodeKind::Noise {
                noise,
                ty,
                time_offset,
            } => noise.evaluate(*ty, clock - time_offset),
            NodeKind::Path {
                path,
                progress,
                mode,
                time_offset,
            } => Value::from(path.evaluate(progress.evaluate(clock - time_offset), *mode)),
            NodeKind::Expr { expr, resources } => {
                let args = resources
                    .iter()
                    .map(|&r| self.resolve(r, clock))
                    .collect::<SmallVec<[Value; 4]>>();
                expr.evaluate(&args)
            }
            NodeKind::Group { .. } | NodeKind::TimeRange { .. } => {
                unreachable!("structural node \"{}\" has no value", graph.node_id(idx))
            }
        };
        self.cache.insert(idx, clock, value);
        self.snapshot.eval_counts[idx.index()] += 1;
        let slot = &mut self.snapshot.values[idx.index()];
        if slot.is_none() {
            *slot = Some(value);
        }
        value
    }
}

impl Graph {
    /// Resolve the whole graph from the root at clock `t`.
    #[tracing::instrument(skip(self), fields(nodes = self.len()))]
    pub fn evaluate(&self, t: f64) -> Snapshot {
        let mut pass = Pass::new(self, t);
        pass.visit(self.root, t);
        pass.snapshot
    }

    /// Resolve one value node and only what it depends on. Gates are not consulted.
    pub fn evaluate_one(&self, node: NodeIdx, t: f64) -> MotionResult<Value> {
        if node.index() >= self.len() {
            return Err(MotionError::validation(format!(
                "node index {} out of range",
                node.index()
            )));
        }
        if self.output_type(node).is_none() {
            return Err(MotionError::validation(format!(
                "node \"{}\" produces no value",
                self.node_id(node)
            )));
        }
        Ok(Pass::new(self, t).resolve(node, t))
    }

    /// [`Graph::evaluate_one`] by node id.
    pub fn evaluate_id(&self, id: &str, t: f64) -> MotionResult<Value> {
        let idx = self
            .node_idx(id)
            .ok_or_else(|| MotionError::validation(format!("unknown node \"{id}\"")))?;
        self.evaluate_one(idx, t)
    }

    /// Independent passes for each clock value, run in parallel. Output order follows `times`.
    #[tracing::instrument(skip(self, times), fields(frames = times.len()))]
    pub fn evaluate_many(&self, times: &[f64]) -> Vec<Snapshot> {
        times.par_iter().map(|&t| self.evaluate(t)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/walker.rs"]
mod tests;
