/// Stable index of a node inside a built [`Graph`](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub(crate) u32);

impl NodeIdx {
    /// Position in declaration order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
