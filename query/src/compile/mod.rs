//! Compiles a `SELECT` statement into an operator [`Graph`](crate::graph::Graph).
//!
//! Fields are compiled one at a time, in declaration order, against a shared
//! [`CompiledStatement`]. Each field may register function calls, mark the statement as
//! containing aggregates, or request the shared auxiliary fields node. The rules that
//! depend on all fields (selector exclusivity, mixing raw fields with functions) are
//! checked once every field has been compiled.

use tracing::{field, trace, trace_span};

use influxql_ast::ast::{Expr, SelectStatement};

pub use dimensions::*;
pub use functions::{is_selector_function, is_top_bottom_function};
pub use options::*;
pub use statement::*;
pub use wildcard::*;

use crate::CompileResult;

mod dimensions;
mod field_compiler;
mod functions;
mod options;
mod statement;
mod wildcard;


use field_compiler::FieldCompiler;

/// Compiles `stmt` into an operator graph.
pub fn compile(stmt: &SelectStatement, options: CompileOptions) -> CompileResult<CompiledStatement> {
    let span = trace_span!(
        "compile",
        fields = stmt.fields.len(),
        function_calls = field::Empty,
        nodes = field::Empty
    )
    .entered();

    let mut c = CompiledStatement::new(stmt.sources.clone(), options);
    c.compile_dimensions(&stmt.dimensions)?;

    c.fields = Vec::with_capacity(stmt.fields.len());
    for f in stmt.fields.iter() {
        // time is returned with every row and is not a column of its own
        if let Expr::VarRef(r) = &f.expr {
            if r.name == "time" {
                continue;
            }
        }

        let name = f.name();
        trace!(field = name.as_str(), "compiling field");

        let out = c.graph.add_edge(None, None);
        let mut compiler = FieldCompiler::new(&mut c);
        compiler.compile_expr(&f.expr, out)?;
        let wildcard = compiler.into_wildcard();

        c.fields.push(CompiledField {
            field: f.clone(),
            name,
            output: out,
            wildcard,
        });
    }

    c.validate_fields()?;
    c.link_auxiliary_fields()?;
    c.check_graph()?;

    span.record("function_calls", c.function_calls.len());
    span.record("nodes", c.graph.node_count());
    Ok(c)
}
