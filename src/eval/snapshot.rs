use crate::eval::fingerprint::{Fingerprint, fingerprint_snapshot};
use crate::eval::gate::{GateResolution, GateState};
use crate::foundation::core::Value;
use crate::foundation::ids::NodeIdx;
use crate::scene::graph::Graph;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything one pass resolved at one clock value.
///
/// Value and gate slots are indexed by [`NodeIdx`]. A slot is empty when the node was not
/// reached, either because an enclosing gate excluded it or because nothing under the root
/// references it.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub(crate) time: f64,
    pub(crate) values: Vec<Option<Value>>,
    pub(crate) gates: Vec<Option<GateResolution>>,
    pub(crate) eval_counts: Vec<u32>,
}

impl Snapshot {
    pub(crate) fn new(time: f64, nodes: usize) -> Self {
        Self {
            time,
            values: vec![None; nodes],
            gates: vec![None; nodes],
            eval_counts: vec![0; nodes],
        }
    }

    /// Clock the pass was asked for.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn value(&self, node: NodeIdx) -> Option<&Value> {
        self.values.get(node.index()).and_then(Option::as_ref)
    }

    /// Value of the node called `id` in `graph`.
    pub fn get(&self, graph: &Graph, id: &str) -> Option<&Value> {
        graph.node_idx(id).and_then(|i| self.value(i))
    }

    /// Resolution of a time-range node, if the pass reached it.
    pub fn gate(&self, node: NodeIdx) -> Option<GateResolution> {
        self.gates.get(node.index()).copied().flatten()
    }

    /// Whether a value node resolved during the pass.
    pub fn is_included(&self, node: NodeIdx) -> bool {
        self.value(node).is_some()
    }

    /// How many times `node` was computed (cache misses) during the pass.
    pub fn eval_count(&self, node: NodeIdx) -> u32 {
        self.eval_counts.get(node.index()).copied().unwrap_or(0)
    }

    /// Resolved values in node order.
    pub fn values(&self) -> impl Iterator<Item = (NodeIdx, &Value)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (NodeIdx(i as u32), v)))
    }

    /// Stable digest of the resolved values and gate states; the clock itself is not hashed.
    pub fn fingerprint(&self) -> Fingerprint {
        fingerprint_snapshot(self)
    }

    /// Id-keyed view for printing and serialization.
    pub fn report(&self, graph: &Graph) -> SnapshotReport {
        SnapshotReport {
            time: self.time,
            values: self
                .values()
                .map(|(i, v)| (graph.node_id(i).to_owned(), *v))
                .collect(),
            gates: self
                .gates
                .iter()
                .enumerate()
                .filter_map(|(i, g)| {
                    let g = (*g)?;
                    let id = graph.node_id(NodeIdx(i as u32)).to_owned();
                    Some((
                        id,
                        GateReport {
                            state: g.state,
                            included: g.is_included(),
                            clock: g.clock,
                        },
                    ))
                })
                .collect(),
        }
    }
}

/// Serializable, id-keyed form of a [`Snapshot`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SnapshotReport {
    pub time: f64,
    pub values: BTreeMap<String, Value>,
    pub gates: BTreeMap<String, GateReport>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GateReport {
    pub state: GateState,
    pub included: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock: Option<f64>,
}
