use std::fmt::{Display, Formatter};

use influxql_ast::ast::VarRef;

use super::EdgeId;

/// Selects the `limit` largest (`top`) or smallest (`bottom`) points, optionally
/// partitioned by additional tags.
#[derive(Debug, Clone, PartialEq)]
pub struct TopBottomSelector {
    pub name: String,
    pub dimensions: Vec<VarRef>,
    pub limit: i64,
    pub input: EdgeId,
    pub output: EdgeId,
}

impl TopBottomSelector {
    pub fn is_top(&self) -> bool {
        self.name == "top"
    }
}

impl Display for TopBottomSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for dim in self.dimensions.iter() {
            write!(f, "{}, ", dim)?;
        }
        write!(f, "{})", self.limit)
    }
}
