use std::fmt::{Display, Formatter};

use influxql_ast::ast::{Measurement, VarRef};

use super::{AuxiliarySlot, EdgeId};

/// Reads a single field or tag from one measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafSource {
    /// The column to read. `None` means the columns are resolved at runtime, either through
    /// the auxiliary fields or through wildcard expansion.
    pub reference: Option<VarRef>,
    /// The statement's auxiliary fields, so raw values can be requested alongside the
    /// reference even when this leaf feeds an aggregate.
    pub auxiliary_fields: AuxiliarySlot,
    pub measurement: Measurement,
    pub output: EdgeId,
}

impl Display for LeafSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.reference {
            Some(r) => write!(f, "leaf({} from {})", r, self.measurement),
            None => write!(f, "leaf(<auxiliary> from {})", self.measurement),
        }
    }
}
