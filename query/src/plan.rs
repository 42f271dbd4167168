use crate::graph::EdgeId;

/// Receives the output edges of a compiled statement as execution targets.
pub trait Plan {
    fn add_target(&mut self, edge: EdgeId);
}

impl Plan for Vec<EdgeId> {
    fn add_target(&mut self, edge: EdgeId) {
        self.push(edge);
    }
}
