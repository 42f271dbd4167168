use std::fmt::{Display, Formatter};

use super::{AuxiliaryFields, Edge, EdgeId, Node, NodeId};

/// Arena holding every node and edge of a compiled statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an edge. Either end may be left unbound and bound later.
    pub fn add_edge(&mut self, producer: Option<NodeId>, consumer: Option<NodeId>) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(producer, consumer));
        id
    }

    pub fn bind_producer(&mut self, edge: EdgeId, node: NodeId) {
        let e = &mut self.edges[edge.0];
        debug_assert!(
            e.producer.is_none() || e.producer == Some(node),
            "edge {edge} already has a producer"
        );
        e.producer = Some(node);
    }

    pub fn bind_consumer(&mut self, edge: EdgeId, node: NodeId) {
        let e = &mut self.edges[edge.0];
        debug_assert!(
            e.consumer.is_none() || e.consumer == Some(node),
            "edge {edge} already has a consumer"
        );
        e.consumer = Some(node);
    }

    /// Adds a node and binds it as the consumer of its inputs and the producer of its
    /// outputs.
    pub fn add_node<N: Into<Node>>(&mut self, node: N) -> NodeId {
        let node = node.into();
        let id = NodeId(self.nodes.len());
        for edge in node.inputs() {
            self.bind_consumer(edge, id);
        }
        for edge in node.outputs() {
            self.bind_producer(edge, id);
        }
        self.nodes.push(node);
        id
    }

    /// Splices `node` into `edge`. The existing edge keeps its consumer and becomes the
    /// output of `node`; a new edge connects the former producer to `node`.
    ///
    /// Returns `(input, output)` for `node`. The caller records them on the node.
    pub fn insert(&mut self, edge: EdgeId, node: NodeId) -> (EdgeId, EdgeId) {
        let producer = self.edges[edge.0].producer;
        let input = self.add_edge(producer, Some(node));
        if let Some(p) = producer {
            self.nodes[p.0].replace_output(edge, input);
        }
        self.edges[edge.0].producer = Some(node);
        (input, edge)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// Returns the node writing to `edge`, if bound.
    pub fn producer(&self, edge: EdgeId) -> Option<&Node> {
        self.get_edge(edge)
            .and_then(|e| e.producer)
            .map(|id| self.node(id))
    }

    /// Returns the node reading from `edge`, if bound.
    pub fn consumer(&self, edge: EdgeId) -> Option<&Node> {
        self.get_edge(edge)
            .and_then(|e| e.consumer)
            .map(|id| self.node(id))
    }

    pub fn auxiliary_fields(&self, id: NodeId) -> Option<&AuxiliaryFields> {
        match self.nodes.get(id.0) {
            Some(Node::AuxiliaryFields(aux)) => Some(aux),
            _ => None,
        }
    }

    pub fn auxiliary_fields_mut(&mut self, id: NodeId) -> Option<&mut AuxiliaryFields> {
        match self.nodes.get_mut(id.0) {
            Some(Node::AuxiliaryFields(aux)) => Some(aux),
            _ => None,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the edges missing a producer, or missing a consumer without being one of
    /// `targets`. Targets are read by the plan rather than by a node.
    pub fn dangling_edges(&self, targets: &[EdgeId]) -> Vec<EdgeId> {
        self.edges()
            .filter(|(id, e)| {
                e.producer.is_none() || (e.consumer.is_none() && !targets.contains(id))
            })
            .map(|(id, _)| id)
            .collect()
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (id, node) in self.nodes() {
            write!(f, "{}: {} [", id, node)?;
            for (i, edge) in node.inputs().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", edge)?;
            }
            write!(f, "] -> [")?;
            for (i, edge) in node.outputs().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", edge)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use influxql_ast::ast::Measurement;

    use crate::graph::{AuxiliarySlot, Distinct, FunctionCall, LeafSource, Merge};

    use super::*;

    fn leaf(graph: &mut Graph, name: &str) -> EdgeId {
        let out = graph.add_edge(None, None);
        graph.add_node(LeafSource {
            reference: None,
            auxiliary_fields: AuxiliarySlot::new(),
            measurement: Measurement::new(name),
            output: out,
        });
        out
    }

    #[test]
    fn test_add_node_binds_edges() {
        let mut graph = Graph::new();
        let out = graph.add_edge(None, None);
        let a = leaf(&mut graph, "a");
        let b = leaf(&mut graph, "b");

        let mut merge = Merge::new(out);
        merge.add_input(a);
        merge.add_input(b);
        let id = graph.add_node(merge);

        assert_eq!(graph.edge(a).consumer(), Some(id));
        assert_eq!(graph.edge(b).consumer(), Some(id));
        assert_eq!(graph.edge(out).producer(), Some(id));
        assert_eq!(graph.edge(out).consumer(), None);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.dangling_edges(&[out]), vec![]);
        assert_eq!(graph.dangling_edges(&[]), vec![out]);
    }

    #[test]
    fn test_edge_bound_in_either_order() {
        let mut graph = Graph::new();
        let edge = graph.add_edge(None, None);
        assert!(!graph.edge(edge).is_bound());

        let out = graph.add_edge(None, None);
        let consumer = graph.add_node(Distinct { input: edge, output: out });
        assert_eq!(graph.edge(edge).consumer(), Some(consumer));
        assert_eq!(graph.edge(edge).producer(), None);

        let producer = graph.add_node(Merge::new(edge));
        assert!(graph.edge(edge).is_bound());
        assert_eq!(graph.edge(edge).producer(), Some(producer));
    }

    #[test]
    fn test_insert() {
        let mut graph = Graph::new();
        let out = graph.add_edge(None, None);
        let input = leaf(&mut graph, "cpu");
        let call = graph.add_node(FunctionCall::new("max", input, out));

        let aux = graph.add_node(AuxiliaryFields::default());
        let (aux_in, aux_out) = graph.insert(out, aux);
        {
            let node = graph.auxiliary_fields_mut(aux).unwrap();
            node.input = Some(aux_in);
            node.output = Some(aux_out);
        }

        assert_eq!(aux_out, out);
        assert_eq!(graph.edge(aux_in).producer(), Some(call));
        assert_eq!(graph.edge(aux_in).consumer(), Some(aux));
        assert_eq!(graph.edge(out).producer(), Some(aux));
        match graph.node(call) {
            Node::FunctionCall(node) => assert_eq!(node.output, aux_in),
            other => panic!("expected function call, got {}", other),
        }
        assert_eq!(graph.dangling_edges(&[out]), vec![]);
    }

    #[test]
    fn test_display() {
        let mut graph = Graph::new();
        let out = graph.add_edge(None, None);
        let input = leaf(&mut graph, "cpu");
        graph.add_node(FunctionCall::new("mean", input, out));

        assert_eq!(
            graph.to_string(),
            "n0: leaf(<auxiliary> from cpu) [] -> [e1]\nn1: mean() [e1] -> [e0]\n"
        );
    }
}
