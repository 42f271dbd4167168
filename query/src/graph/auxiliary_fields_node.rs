use std::fmt::{Display, Formatter};
use std::sync::{Arc, OnceLock};

use influxql_ast::ast::VarRef;

use super::{EdgeId, NodeId};

/// A raw field or tag passed through the auxiliary fields node.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxiliaryField {
    /// `None` for wildcard and regex fields, which are resolved on expansion.
    pub reference: Option<VarRef>,
    pub output: EdgeId,
}

/// Passes raw field and tag values through unmodified, either on their own or attached
/// to the row chosen by a selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuxiliaryFields {
    /// Set once when the node is linked into the graph.
    pub input: Option<EdgeId>,
    /// Carries the selector's own value when the node sits behind a selector.
    pub output: Option<EdgeId>,
    pub fields: Vec<AuxiliaryField>,
}

impl AuxiliaryFields {
    pub fn add_field(&mut self, reference: Option<VarRef>, output: EdgeId) {
        self.fields.push(AuxiliaryField { reference, output });
    }

    /// Iterates over the named references. Wildcard entries are skipped.
    pub fn references(&self) -> impl Iterator<Item = &VarRef> {
        self.fields.iter().filter_map(|f| f.reference.as_ref())
    }

    pub fn has_wildcard(&self) -> bool {
        self.fields.iter().any(|f| f.reference.is_none())
    }
}

impl Display for AuxiliaryFields {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "auxiliary(")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match &field.reference {
                Some(r) => write!(f, "{}", r)?,
                None => write!(f, "*")?,
            }
        }
        write!(f, ")")
    }
}

/// Write-once handle to a statement's auxiliary fields node. Empty until the first field
/// requires auxiliary values; every clone observes the same node afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuxiliarySlot(Arc<OnceLock<NodeId>>);

impl AuxiliarySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<NodeId> {
        self.0.get().copied()
    }

    pub fn is_set(&self) -> bool {
        self.0.get().is_some()
    }

    pub fn get_or_init<F: FnOnce() -> NodeId>(&self, f: F) -> NodeId {
        *self.0.get_or_init(f)
    }
}
