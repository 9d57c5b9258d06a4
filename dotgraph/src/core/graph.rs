//! This module contains the Graph data-structure, which is the in-memory form
//! of a DOT file. The parser builds it and the printer writes it back out.
//!
//! Nodes are stored once, on the root graph, and are indexed by their ID.
//! Edges refer to their endpoints by ID, and subgraphs refer to their nodes
//! by ID and to their edges by index into the root edge list.

use super::attrs::{Attributes, EdgeAttributes, GraphAttributes, NodeAttributes};
use super::subgraph::{Subgraph, SubgraphBuilder};
use crate::adt::map::OrderedMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    pub attrs: NodeAttributes,
}

impl Node {
    pub fn new(id: &str) -> Self {
        Self::with_attributes(id, NodeAttributes::default())
    }

    pub fn with_attributes(id: &str, attrs: NodeAttributes) -> Self {
        Self {
            id: id.to_string(),
            attrs,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A connection between two nodes. Parallel edges and self-loops are
/// allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    from: String,
    to: String,
    pub attrs: EdgeAttributes,
}

impl Edge {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            attrs: EdgeAttributes::default(),
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }
}

/// The root of a DOT document.
///
/// The graph is not synchronized. Callers that share it between threads need
/// to serialize the mutation themselves.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    directed: bool,
    strict: bool,
    name: Option<String>,
    /// Graph-level attributes ('graph [...]' and 'key=value' statements).
    pub attrs: GraphAttributes,
    /// The template that 'node [...]' statements update.
    pub node_defaults: NodeAttributes,
    /// The template that 'edge [...]' statements update. It is applied to
    /// every edge that add_edge creates.
    pub edge_defaults: EdgeAttributes,
    pub(crate) nodes: OrderedMap<String, Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) subgraphs: Vec<Subgraph>,
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            ..Default::default()
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<&str>) {
        self.name = name.map(|x| x.to_string());
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Adds \p node to the graph. If a node with the same ID exists it is
    /// replaced, and keeps its place in the node order.
    pub fn add_node(&mut self, node: Node) -> &mut Node {
        let id = node.id.clone();
        let slot = self.nodes.get_or_insert_with(&id, || Node::new(&id));
        *slot = node;
        slot
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(&id.to_string())
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(&id.to_string())
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.has(&id.to_string())
    }

    /// Returns the nodes in the order in which they were first added.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Creates a new edge from \p from to \p to. Endpoints that are not in the
    /// graph yet are added to the end of the node list. The edge starts with
    /// the default edge attributes, then each template in \p templates is
    /// merged on top, in order.
    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        templates: &[&EdgeAttributes],
    ) -> &mut Edge {
        let idx = self.connect(from, to, templates);
        &mut self.edges[idx]
    }

    /// Same as add_edge, but returns the index of the new edge.
    pub(crate) fn connect(
        &mut self,
        from: &str,
        to: &str,
        templates: &[&EdgeAttributes],
    ) -> usize {
        for id in [from, to] {
            let key = id.to_string();
            self.nodes.get_or_insert_with(&key, || Node::new(id));
        }

        let mut edge = Edge::new(from, to);
        edge.attrs.merge(&self.edge_defaults);
        for template in templates {
            edge.attrs.merge(template);
        }
        self.edges.push(edge);
        self.edges.len() - 1
    }

    /// Returns the node \p id, creating it from \p template if it does not
    /// exist.
    pub(crate) fn ensure_node(
        &mut self,
        id: &str,
        template: &NodeAttributes,
    ) -> &mut Node {
        self.nodes.get_or_insert_with(&id.to_string(), || {
            Node::with_attributes(id, template.clone())
        })
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn subgraphs(&self) -> &[Subgraph] {
        &self.subgraphs
    }

    /// Creates a subgraph named \p name (an empty name creates an anonymous
    /// subgraph) and calls \p build to populate it. Nodes and edges added
    /// through the builder are registered on this graph as well. The new
    /// subgraph is appended to the list of top-level subgraphs.
    pub fn subgraph<F>(&mut self, name: &str, build: F) -> &mut Subgraph
    where
        F: FnOnce(&mut SubgraphBuilder<'_>),
    {
        let mut builder = SubgraphBuilder::new(self, name);
        build(&mut builder);
        let sub = builder.finish();
        self.subgraphs.push(sub);
        let last = self.subgraphs.len() - 1;
        &mut self.subgraphs[last]
    }

    /// Returns the nodes that \p sub declares directly, in declaration order.
    pub fn subgraph_nodes<'a>(
        &'a self,
        sub: &'a Subgraph,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        sub.node_ids().iter().filter_map(move |id| self.node(id))
    }

    /// Returns the edges that were created inside \p sub.
    pub fn subgraph_edges<'a>(
        &'a self,
        sub: &'a Subgraph,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        sub.edge_indices()
            .iter()
            .filter_map(move |idx| self.edges.get(*idx))
    }
}

#[test]
fn test_add_node_replaces_in_place() {
    let mut g = Graph::new(true);
    g.add_node(Node::new("a"));
    g.add_node(Node::new("b"));
    g.add_node(Node::new("c"));

    let mut attrs = NodeAttributes::default();
    attrs.label = Some("new b".to_string());
    g.add_node(Node::with_attributes("b", attrs));

    let ids: Vec<&str> = g.nodes().map(|n| n.id()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(g.node("b").unwrap().attrs.label.as_deref(), Some("new b"));
    assert_eq!(g.num_nodes(), 3);
}

#[test]
fn test_add_edge_registers_nodes() {
    let mut g = Graph::new(false);
    g.add_node(Node::new("x"));
    g.add_edge("y", "x", &[]);
    g.add_edge("y", "x", &[]);
    g.add_edge("z", "z", &[]);

    let ids: Vec<&str> = g.nodes().map(|n| n.id()).collect();
    assert_eq!(ids, vec!["x", "y", "z"]);
    assert_eq!(g.num_edges(), 3);
    assert_eq!(g.edges()[2].from(), "z");
    assert_eq!(g.edges()[2].to(), "z");
}

#[test]
fn test_add_edge_template_order() {
    let mut g = Graph::new(true);
    g.edge_defaults.color = Some("grey".to_string());
    g.edge_defaults.label = Some("default".to_string());

    let mut first = EdgeAttributes::default();
    first.color = Some("red".to_string());
    first.weight = Some(2.);
    let mut second = EdgeAttributes::default();
    second.color = Some("blue".to_string());

    let e = g.add_edge("a", "b", &[&first, &second]);
    assert_eq!(e.attrs.color.as_deref(), Some("blue"));
    assert_eq!(e.attrs.label.as_deref(), Some("default"));
    assert_eq!(e.attrs.weight, Some(2.));
}
