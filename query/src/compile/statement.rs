use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use influxql_ast::ast::{Field, Source, VarRef};

use crate::compile::{CompileOptions, Interval, WildcardDescriptor};
use crate::graph::{
    AuxiliaryFields, AuxiliarySlot, EdgeId, Graph, LeafSource, Merge, NodeId,
};
use crate::{CompileError, CompileResult, Plan};

/// A field of the statement after compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledField {
    /// The field as written in the statement.
    pub field: Field,
    /// The resolved column name.
    pub name: String,
    /// The edge carrying this field's values to the plan.
    pub output: EdgeId,
    /// Set when the field contains a wildcard or regex and must be expanded.
    pub wildcard: Option<WildcardDescriptor>,
}

/// State accumulated while compiling a statement, and the resulting graph.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStatement {
    /// The sources this statement reads from.
    pub(crate) sources: Vec<Source>,

    /// The tag dimensions of the statement.
    pub(crate) dimensions: Vec<String>,

    /// The time grouping interval.
    pub(crate) interval: Interval,

    /// The output edge of every registered function call.
    pub(crate) function_calls: Vec<EdgeId>,

    /// True as long as no aggregate function has been seen.
    pub(crate) only_selectors: bool,

    /// Set to `top` or `bottom` when one of those is used.
    pub(crate) top_bottom_function: Option<String>,

    /// The shared auxiliary fields node, created on first use.
    pub(crate) auxiliary_fields: AuxiliarySlot,

    pub(crate) fields: Vec<CompiledField>,

    /// Reference time for `now()`, fixed for the whole compilation.
    pub(crate) now: DateTime<Utc>,

    pub(crate) graph: Graph,
}

impl CompiledStatement {
    pub(crate) fn new(sources: Vec<Source>, options: CompileOptions) -> Self {
        Self {
            sources,
            dimensions: vec![],
            interval: Interval::default(),
            function_calls: vec![],
            only_selectors: true,
            top_bottom_function: None,
            auxiliary_fields: AuxiliarySlot::new(),
            fields: vec![],
            now: options.resolve_now(),
            graph: Graph::new(),
        }
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    pub fn function_calls(&self) -> &[EdgeId] {
        &self.function_calls
    }

    pub fn only_selectors(&self) -> bool {
        self.only_selectors
    }

    pub fn top_bottom_function(&self) -> Option<&str> {
        self.top_bottom_function.as_deref()
    }

    /// The auxiliary fields node, if any field required one.
    pub fn auxiliary_fields(&self) -> Option<&AuxiliaryFields> {
        self.auxiliary_fields
            .get()
            .and_then(|id| self.graph.auxiliary_fields(id))
    }

    pub fn fields(&self) -> &[CompiledField] {
        &self.fields
    }

    /// Column names in field order.
    pub fn columns(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Registers the output of every field with `plan`, in field order, and returns them.
    pub fn select<P: Plan + ?Sized>(&self, plan: &mut P) -> Vec<EdgeId> {
        let mut out = Vec::with_capacity(self.fields.len());
        for f in self.fields.iter() {
            plan.add_target(f.output);
            out.push(f.output);
        }
        out
    }

    pub(super) fn register_function_call(&mut self, output: EdgeId) {
        self.function_calls.push(output);
    }

    /// Returns the auxiliary fields node, creating it on first use. Creating it early lets
    /// incompatible statements fail before any type information is requested.
    pub(super) fn require_auxiliary_fields(&mut self) -> NodeId {
        let graph = &mut self.graph;
        self.auxiliary_fields.get_or_init(|| {
            trace!("creating auxiliary fields node");
            graph.add_node(AuxiliaryFields::default())
        })
    }

    /// Routes a raw field (or a wildcard when `reference` is `None`) from the auxiliary
    /// fields node to `out`.
    pub(super) fn add_auxiliary_field(
        &mut self,
        reference: Option<VarRef>,
        out: EdgeId,
    ) -> CompileResult<()> {
        let id = self.require_auxiliary_fields();
        let aux = self
            .graph
            .auxiliary_fields_mut(id)
            .ok_or_else(|| CompileError::Internal(format!("{} is not auxiliary fields", id)))?;
        aux.add_field(reference, out);
        self.graph.bind_producer(out, id);
        Ok(())
    }

    /// Reads `reference` from every source and merges the results into `out`. A `None`
    /// reference reads whatever the auxiliary fields ask for at runtime.
    pub(crate) fn compile_var_ref(
        &mut self,
        reference: Option<&VarRef>,
        out: EdgeId,
    ) -> CompileResult<()> {
        let mut merge = Merge::with_capacity(out, self.sources.len());
        for source in self.sources.iter() {
            match source {
                Source::Measurement(m) => {
                    let edge = self.graph.add_edge(None, None);
                    self.graph.add_node(LeafSource {
                        reference: reference.cloned(),
                        auxiliary_fields: self.auxiliary_fields.clone(),
                        measurement: m.clone(),
                        output: edge,
                    });
                    merge.add_input(edge);
                }
                other => {
                    return Err(CompileError::Unimplemented(format!(
                        "{} sources",
                        other.kind()
                    )))
                }
            }
        }
        self.graph.add_node(merge);
        Ok(())
    }

    /// Rejects top/bottom combined with any other function call.
    pub(super) fn validate_fields(&self) -> CompileResult<()> {
        if let Some(name) = &self.top_bottom_function {
            if self.function_calls.len() > 1 {
                return Err(CompileError::SelectorConflict(name.clone()));
            }
        }
        Ok(())
    }

    /// Connects the auxiliary fields node, if any, to the rest of the graph.
    pub(super) fn link_auxiliary_fields(&mut self) -> CompileResult<()> {
        let Some(id) = self.auxiliary_fields.get() else {
            if self.function_calls.is_empty() {
                return Err(CompileError::NoFields);
            }
            return Ok(());
        };

        if !self.only_selectors {
            return Err(CompileError::MixedAggregate);
        } else if self.function_calls.len() > 1 {
            return Err(CompileError::MixedSelectors);
        }

        if let Some(&call) = self.function_calls.first() {
            // raw fields ride along with the row chosen by the selector
            let (input, output) = self.graph.insert(call, id);
            let aux = self.aux_node_mut(id)?;
            aux.input = Some(input);
            aux.output = Some(output);
            debug!(%call, "auxiliary fields attached to selector");
        } else {
            let input = self.graph.add_edge(None, Some(id));
            self.aux_node_mut(id)?.input = Some(input);
            self.compile_var_ref(None, input)?;
            debug!("auxiliary fields read directly from sources");
        }
        Ok(())
    }

    fn aux_node_mut(&mut self, id: NodeId) -> CompileResult<&mut AuxiliaryFields> {
        self.graph
            .auxiliary_fields_mut(id)
            .ok_or_else(|| CompileError::Internal(format!("{} is not auxiliary fields", id)))
    }

    /// Every edge must have a producer, and a consumer unless it is a field output.
    pub(super) fn check_graph(&self) -> CompileResult<()> {
        let targets: Vec<EdgeId> = self.fields.iter().map(|f| f.output).collect();
        let dangling = self.graph.dangling_edges(&targets);
        if dangling.is_empty() {
            return Ok(());
        }
        let edges: Vec<String> = dangling.iter().map(|e| e.to_string()).collect();
        Err(CompileError::Internal(format!(
            "dangling edges after compilation: {}",
            edges.join(", ")
        )))
    }
}
