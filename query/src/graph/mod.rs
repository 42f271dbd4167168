//! The operator graph produced by the compiler.
//!
//! Nodes and edges live in a [`Graph`] arena and refer to each other by index, so a
//! node can be wired to an edge whose other end is not known yet.

pub use arena::*;
pub use auxiliary_fields_node::*;
pub use binary_expr_node::*;
pub use dag_node::*;
pub use distinct_node::*;
pub use edge::*;
pub use function_call_node::*;
pub use leaf_source_node::*;
pub use merge_node::*;
pub use top_bottom_node::*;

mod arena;
mod auxiliary_fields_node;
mod binary_expr_node;
mod dag_node;
mod distinct_node;
mod edge;
mod function_call_node;
mod leaf_source_node;
mod merge_node;
mod top_bottom_node;
