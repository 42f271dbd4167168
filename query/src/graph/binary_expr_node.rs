use std::fmt::{Display, Formatter};

use influxql_ast::ast::{Expr, Operator};

use super::EdgeId;

/// One side of a binary expression. Literals are evaluated in place and never get an
/// edge of their own.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Edge(EdgeId),
    Literal(Expr),
}

impl Operand {
    pub fn edge(&self) -> Option<EdgeId> {
        match self {
            Operand::Edge(e) => Some(*e),
            Operand::Literal(_) => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Operand::Literal(_))
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Edge(e) => write!(f, "{}", e),
            Operand::Literal(lit) => write!(f, "{}", lit),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: Operator,
    pub lhs: Operand,
    pub rhs: Operand,
    pub output: EdgeId,
}

impl Display for BinaryExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}
