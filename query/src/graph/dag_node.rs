use std::fmt::{Display, Formatter};

use super::{
    AuxiliaryFields, BinaryExpr, Distinct, EdgeId, FunctionCall, LeafSource, Merge,
    TopBottomSelector,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Merge(Merge),
    LeafSource(LeafSource),
    FunctionCall(FunctionCall),
    Distinct(Distinct),
    TopBottomSelector(TopBottomSelector),
    BinaryExpr(BinaryExpr),
    AuxiliaryFields(AuxiliaryFields),
}

impl Node {
    pub const fn kind(&self) -> &'static str {
        match self {
            Node::Merge(_) => "merge",
            Node::LeafSource(_) => "leaf",
            Node::FunctionCall(_) => "call",
            Node::Distinct(_) => "distinct",
            Node::TopBottomSelector(_) => "top_bottom",
            Node::BinaryExpr(_) => "binary",
            Node::AuxiliaryFields(_) => "auxiliary",
        }
    }

    /// The edges this node reads from.
    pub fn inputs(&self) -> Vec<EdgeId> {
        match self {
            Node::Merge(node) => node.inputs.clone(),
            Node::LeafSource(_) => vec![],
            Node::FunctionCall(node) => vec![node.input],
            Node::Distinct(node) => vec![node.input],
            Node::TopBottomSelector(node) => vec![node.input],
            Node::BinaryExpr(node) => [&node.lhs, &node.rhs]
                .iter()
                .filter_map(|op| op.edge())
                .collect(),
            Node::AuxiliaryFields(node) => node.input.into_iter().collect(),
        }
    }

    /// The edges this node writes to.
    pub fn outputs(&self) -> Vec<EdgeId> {
        match self {
            Node::Merge(node) => vec![node.output],
            Node::LeafSource(node) => vec![node.output],
            Node::FunctionCall(node) => vec![node.output],
            Node::Distinct(node) => vec![node.output],
            Node::TopBottomSelector(node) => vec![node.output],
            Node::BinaryExpr(node) => vec![node.output],
            Node::AuxiliaryFields(node) => node
                .output
                .into_iter()
                .chain(node.fields.iter().map(|f| f.output))
                .collect(),
        }
    }

    /// Replaces the output edge `old` with `new`. Returns false if `old` is not an output
    /// of this node.
    pub(crate) fn replace_output(&mut self, old: EdgeId, new: EdgeId) -> bool {
        let slot = match self {
            Node::Merge(node) => Some(&mut node.output),
            Node::LeafSource(node) => Some(&mut node.output),
            Node::FunctionCall(node) => Some(&mut node.output),
            Node::Distinct(node) => Some(&mut node.output),
            Node::TopBottomSelector(node) => Some(&mut node.output),
            Node::BinaryExpr(node) => Some(&mut node.output),
            Node::AuxiliaryFields(node) => {
                if node.output == Some(old) {
                    node.output = Some(new);
                    return true;
                }
                node.fields
                    .iter_mut()
                    .find(|f| f.output == old)
                    .map(|f| &mut f.output)
            }
        };
        match slot {
            Some(edge) if *edge == old => {
                *edge = new;
                true
            }
            _ => false,
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Merge(node) => write!(f, "{}", node),
            Node::LeafSource(node) => write!(f, "{}", node),
            Node::FunctionCall(node) => write!(f, "{}", node),
            Node::Distinct(node) => write!(f, "{}", node),
            Node::TopBottomSelector(node) => write!(f, "{}", node),
            Node::BinaryExpr(node) => write!(f, "{}", node),
            Node::AuxiliaryFields(node) => write!(f, "{}", node),
        }
    }
}

macro_rules! impl_from_node {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Node {
                fn from(node: $variant) -> Self {
                    Node::$variant(node)
                }
            }
        )*
    };
}

impl_from_node!(
    Merge,
    LeafSource,
    FunctionCall,
    Distinct,
    TopBottomSelector,
    BinaryExpr,
    AuxiliaryFields
);
