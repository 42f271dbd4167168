use std::fmt::{Display, Formatter};

use influxql_ast::ast::Expr;

use super::EdgeId;

/// A single-input aggregate or selector such as `mean()` or `max()`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    /// Literal arguments following the field, e.g. the `N` of `percentile(value, N)`.
    pub args: Vec<Expr>,
    pub input: EdgeId,
    pub output: EdgeId,
}

impl FunctionCall {
    pub fn new<S: Into<String>>(name: S, input: EdgeId, output: EdgeId) -> Self {
        Self {
            name: name.into(),
            args: vec![],
            input,
            output,
        }
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
