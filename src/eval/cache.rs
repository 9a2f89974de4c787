use crate::foundation::core::Value;
use crate::foundation::ids::NodeIdx;
use smallvec::SmallVec;

/// Per-pass memo of resolved node values, keyed by node and the clock it was resolved at.
///
/// Most nodes resolve at exactly one clock per pass, so each slot keeps its entries inline.
#[derive(Debug)]
pub(crate) struct FrameCache {
    slots: Vec<SmallVec<[(u64, Value); 1]>>,
}

impl FrameCache {
    pub(crate) fn new(nodes: usize) -> Self {
        Self {
            slots: vec![SmallVec::new(); nodes],
        }
    }

    pub(crate) fn get(&self, node: NodeIdx, clock: f64) -> Option<Value> {
        let bits = clock.to_bits();
        self.slots[node.index()]
            .iter()
            .find(|(b, _)| *b == bits)
            .map(|(_, v)| *v)
    }

    pub(crate) fn insert(&mut self, node: NodeIdx, clock: f64, value: Value) {
        self.slots[node.index()].push((clock.to_bits(), value));
    }
}
