use std::fmt::{Display, Formatter};

use super::EdgeId;

/// Fans in one input per source into a single output.
#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    /// One input per source, in source declaration order.
    pub inputs: Vec<EdgeId>,
    pub output: EdgeId,
}

impl Merge {
    pub fn new(output: EdgeId) -> Self {
        Self {
            inputs: vec![],
            output,
        }
    }

    pub fn with_capacity(output: EdgeId, capacity: usize) -> Self {
        Self {
            inputs: Vec::with_capacity(capacity),
            output,
        }
    }

    pub fn add_input(&mut self, edge: EdgeId) {
        self.inputs.push(edge);
    }
}

impl Display for Merge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "merge")
    }
}
