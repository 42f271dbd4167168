use std::fmt::{Display, Formatter};

use super::EdgeId;

/// Removes duplicate values from its input.
#[derive(Debug, Clone, PartialEq)]
pub struct Distinct {
    pub input: EdgeId,
    pub output: EdgeId,
}

impl Display for Distinct {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "distinct()")
    }
}
