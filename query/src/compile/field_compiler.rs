use tracing::trace;

use influxql_ast::ast::{self, Call, Expr, RegexLiteral, VarRef};

use crate::compile::functions::{
    expected_arg_count, is_selector_function, is_top_bottom_function, wildcard_type_exclusion,
};
use crate::compile::{CompiledStatement, WildcardDescriptor};
use crate::graph::{BinaryExpr, Distinct, EdgeId, FunctionCall, Operand, TopBottomSelector};
use crate::{CompileError, CompileResult};

/// Compiles the expression of a single field into the shared statement graph.
pub(super) struct FieldCompiler<'a> {
    global: &'a mut CompiledStatement,
    wildcard: Option<WildcardDescriptor>,
}

impl<'a> FieldCompiler<'a> {
    pub(super) fn new(global: &'a mut CompiledStatement) -> Self {
        Self {
            global,
            wildcard: None,
        }
    }

    pub(super) fn into_wildcard(self) -> Option<WildcardDescriptor> {
        self.wildcard
    }

    /// Creates the node computing `expr` and makes it the producer of `out`.
    pub(super) fn compile_expr(&mut self, expr: &Expr, out: EdgeId) -> CompileResult<()> {
        match expr {
            Expr::VarRef(r) => self.global.add_auxiliary_field(Some(r.clone()), out),
            Expr::Wildcard(_) => {
                // assume at least one expansion
                self.wildcard();
                self.global.add_auxiliary_field(None, out)
            }
            Expr::Regex(re) => {
                self.wildcard_filter(re.clone());
                self.global.add_auxiliary_field(None, out)
            }
            Expr::Call(call) => match call.name.as_str() {
                "distinct" => self.compile_distinct(call, out, false),
                name if is_top_bottom_function(name) => self.compile_top_bottom(call, out),
                _ => self.compile_function(call, out),
            },
            Expr::Distinct(d) => self.compile_distinct(&d.to_call(), out, false),
            Expr::Binary(b) => self.compile_binary_expr(b, out),
            Expr::Paren(inner) => self.compile_expr(inner, out),
            _ => Err(CompileError::Unimplemented(format!(
                "selecting the literal {}",
                expr
            ))),
        }
    }

    fn compile_function(&mut self, call: &Call, out: EdgeId) -> CompileResult<()> {
        let name = call.name.as_str();
        let expected = expected_arg_count(name);
        if call.args.len() != expected {
            return Err(CompileError::InvalidArgCount {
                name: call.name.clone(),
                expected,
                got: call.args.len(),
            });
        }

        let input = self.global.graph.add_edge(None, None);
        let mut node = FunctionCall::new(name, input, out);
        node.args = function_literal_args(call)?;
        self.global.graph.add_node(node);
        self.global.register_function_call(out);
        trace!(function = name, "registered function call");

        if !is_selector_function(name) {
            self.global.only_selectors = false;
        }

        // count() accepts distinct() as its argument
        if name == "count" {
            match &call.args[0] {
                Expr::Call(inner) if inner.name == "distinct" => {
                    return self.compile_distinct(inner, input, true)
                }
                Expr::Distinct(d) => return self.compile_distinct(&d.to_call(), input, true),
                _ => {}
            }
        }

        match &call.args[0] {
            Expr::VarRef(r) => self.global.compile_var_ref(Some(r), input),
            Expr::Wildcard(_) => {
                self.wildcard_function(name);
                self.global.compile_var_ref(None, input)
            }
            Expr::Regex(re) => {
                self.wildcard_function_filter(name, re.clone());
                self.global.compile_var_ref(None, input)
            }
            _ => Err(CompileError::ExpectedFieldArgument(call.name.clone())),
        }
    }

    /// `nested` is set for `count(distinct(x))`, where only the outer call is registered.
    fn compile_distinct(&mut self, call: &Call, out: EdgeId, nested: bool) -> CompileResult<()> {
        match call.args.len() {
            0 => return Err("distinct function requires at least one argument".into()),
            1 => {}
            _ => return Err("distinct function can only have one argument".into()),
        }

        let Expr::VarRef(arg0) = &call.args[0] else {
            return Err(CompileError::ExpectedFieldArgument("distinct".to_string()));
        };

        let input = self.global.graph.add_edge(None, None);
        self.global.graph.add_node(Distinct { input, output: out });
        if !nested {
            self.global.register_function_call(out);
            trace!(function = "distinct", "registered function call");
        }

        self.global.compile_var_ref(Some(arg0), input)
    }

    fn compile_top_bottom(&mut self, call: &Call, out: EdgeId) -> CompileResult<()> {
        if let Some(existing) = &self.global.top_bottom_function {
            return Err(CompileError::SelectorConflict(existing.clone()));
        }
        if !self.global.function_calls.is_empty() {
            return Err(CompileError::SelectorConflict(call.name.clone()));
        }

        let got = call.args.len();
        if got < 2 {
            return Err(CompileError::TooFewArgs {
                name: call.name.clone(),
                min: 2,
                got,
            });
        }

        let Expr::VarRef(field) = &call.args[0] else {
            return Err(CompileError::ExpectedFieldArgument(call.name.clone()));
        };

        let mut dimensions: Vec<VarRef> = Vec::with_capacity(got - 2);
        for arg in &call.args[1..got - 1] {
            match arg {
                Expr::VarRef(r) => dimensions.push(r.clone()),
                _ => {
                    return Err(CompileError::InvalidArgument(format!(
                        "only fields or tags are allowed in {}(), found {}",
                        call.name, arg
                    )))
                }
            }
        }

        let limit = match &call.args[got - 1] {
            Expr::Integer(limit) => *limit,
            other => {
                return Err(CompileError::InvalidArgument(format!(
                    "expected integer as last argument in {}(), found {}",
                    call.name, other
                )))
            }
        };
        if limit <= 0 {
            return Err(CompileError::InvalidLimit {
                name: call.name.clone(),
                limit,
            });
        }
        self.global.top_bottom_function = Some(call.name.clone());

        let input = self.global.graph.add_edge(None, None);
        self.global.graph.add_node(TopBottomSelector {
            name: call.name.clone(),
            dimensions,
            limit,
            input,
            output: out,
        });
        self.global.register_function_call(out);
        trace!(function = call.name.as_str(), limit, "registered selector");

        self.global.compile_var_ref(Some(field), input)
    }

    /// Literal operands are kept on the node. Only the other side gets a subgraph.
    fn compile_binary_expr(&mut self, expr: &ast::BinaryExpr, out: EdgeId) -> CompileResult<()> {
        let lhs = expr.lhs.unparen();
        let rhs = expr.rhs.unparen();

        match (lhs.is_literal(), rhs.is_literal()) {
            (true, true) => Err(CompileError::Unimplemented(format!(
                "binary expression with two literals: {}",
                expr
            ))),
            (true, false) => {
                let rhs_edge = self.global.graph.add_edge(None, None);
                self.global.graph.add_node(BinaryExpr {
                    op: expr.op,
                    lhs: Operand::Literal(lhs.clone()),
                    rhs: Operand::Edge(rhs_edge),
                    output: out,
                });
                self.compile_expr(rhs, rhs_edge)
            }
            (false, true) => {
                let lhs_edge = self.global.graph.add_edge(None, None);
                self.global.graph.add_node(BinaryExpr {
                    op: expr.op,
                    lhs: Operand::Edge(lhs_edge),
                    rhs: Operand::Literal(rhs.clone()),
                    output: out,
                });
                self.compile_expr(lhs, lhs_edge)
            }
            (false, false) => {
                let lhs_edge = self.global.graph.add_edge(None, None);
                let rhs_edge = self.global.graph.add_edge(None, None);
                self.global.graph.add_node(BinaryExpr {
                    op: expr.op,
                    lhs: Operand::Edge(lhs_edge),
                    rhs: Operand::Edge(rhs_edge),
                    output: out,
                });
                self.compile_expr(lhs, lhs_edge)?;
                self.compile_expr(rhs, rhs_edge)
            }
        }
    }

    fn wildcard(&mut self) -> &mut WildcardDescriptor {
        self.wildcard.get_or_insert_with(WildcardDescriptor::new)
    }

    fn wildcard_filter(&mut self, filter: RegexLiteral) {
        self.wildcard().add_name_filter(filter);
    }

    fn wildcard_function(&mut self, name: &str) {
        let wildcard = self.wildcard();
        if let Some(data_type) = wildcard_type_exclusion(name) {
            wildcard.exclude_type(data_type);
        }
    }

    fn wildcard_function_filter(&mut self, name: &str, filter: RegexLiteral) {
        self.wildcard_function(name);
        self.wildcard_filter(filter);
    }
}

/// Validates and returns the literal arguments following the field argument.
fn function_literal_args(call: &Call) -> CompileResult<Vec<Expr>> {
    match call.name.as_str() {
        "percentile" => match &call.args[1] {
            lit @ (Expr::Integer(_) | Expr::Number(_)) => Ok(vec![lit.clone()]),
            other => Err(CompileError::InvalidArgument(format!(
                "expected float argument in percentile(), found {}",
                other
            ))),
        },
        "sample" => match &call.args[1] {
            Expr::Integer(n) if *n <= 1 => Err(CompileError::InvalidArgument(format!(
                "sample window must be greater than 1, got {}",
                n
            ))),
            lit @ Expr::Integer(_) => Ok(vec![lit.clone()]),
            other => Err(CompileError::InvalidArgument(format!(
                "expected integer argument in sample(), found {}",
                other
            ))),
        },
        _ => Ok(vec![]),
    }
}
