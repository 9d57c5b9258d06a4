//! Subgraphs and clusters.
//!
//! A subgraph does not own nodes or edges. It records the IDs of the nodes
//! that were declared inside it and the indices of the edges that were
//! created inside it; the values themselves live on the root Graph.
//! Subgraphs are populated through a SubgraphBuilder, which holds the root
//! graph for the duration of the construction.

use super::attrs::{EdgeAttributes, NodeAttributes, SubgraphAttributes};
use super::graph::{Edge, Graph, Node};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subgraph {
    name: String,
    pub attrs: SubgraphAttributes,
    nodes: Vec<String>,
    edges: Vec<usize>,
    subgraphs: Vec<Subgraph>,
}

impl Subgraph {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Returns the name, or None for anonymous subgraphs.
    pub fn name(&self) -> Option<&str> {
        if self.name.is_empty() {
            return None;
        }
        Some(self.name.as_str())
    }

    /// Clusters are subgraphs whose name starts with "cluster".
    pub fn is_cluster(&self) -> bool {
        self.name.starts_with("cluster")
    }

    /// The IDs of the nodes declared directly in this subgraph.
    pub fn node_ids(&self) -> &[String] {
        &self.nodes
    }

    /// Indices into the root graph's edge list.
    pub fn edge_indices(&self) -> &[usize] {
        &self.edges
    }

    pub fn subgraphs(&self) -> &[Subgraph] {
        &self.subgraphs
    }

    /// Returns true if \p id is declared here or in a nested subgraph.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|x| x == id)
            || self.subgraphs.iter().any(|s| s.contains_node(id))
    }

    /// Returns every node of the subgraph: the nodes declared directly,
    /// followed by the nodes of the nested subgraphs, without duplicates.
    /// This is the node set a subgraph stands for when it is used as an
    /// edge endpoint.
    pub fn member_ids(&self) -> Vec<String> {
        let mut result = Vec::new();
        self.collect_members(&mut result);
        result
    }

    fn collect_members(&self, result: &mut Vec<String>) {
        for id in &self.nodes {
            if !result.contains(id) {
                result.push(id.clone());
            }
        }
        for sub in &self.subgraphs {
            sub.collect_members(result);
        }
    }

    fn register_node(&mut self, id: &str) {
        if !self.nodes.iter().any(|x| x == id) {
            self.nodes.push(id.to_string());
        }
    }
}

/// Populates a new subgraph while keeping the root graph up to date.
pub struct SubgraphBuilder<'g> {
    root: &'g mut Graph,
    subgraph: Subgraph,
}

impl<'g> SubgraphBuilder<'g> {
    pub(crate) fn new(root: &'g mut Graph, name: &str) -> Self {
        Self {
            root,
            subgraph: Subgraph::new(name),
        }
    }

    pub(crate) fn finish(self) -> Subgraph {
        self.subgraph
    }

    pub(crate) fn root_mut(&mut self) -> &mut Graph {
        &mut *self.root
    }

    pub fn attributes_mut(&mut self) -> &mut SubgraphAttributes {
        &mut self.subgraph.attrs
    }

    /// Adds \p node to the root graph (replacing a node with the same ID in
    /// place) and declares it in this subgraph.
    pub fn add_node(&mut self, node: Node) -> &mut Node {
        self.subgraph.register_node(node.id());
        self.root.add_node(node)
    }

    /// Declares the node \p id in this subgraph. A node that is not in the
    /// root graph yet is created from \p template.
    pub(crate) fn declare_node(
        &mut self,
        id: &str,
        template: &NodeAttributes,
    ) -> &mut Node {
        self.subgraph.register_node(id);
        self.root.ensure_node(id, template)
    }

    /// Creates an edge on the root graph and records it in this subgraph.
    /// Endpoints that don't belong to this subgraph (or to one of its nested
    /// subgraphs) become members of it.
    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        templates: &[&EdgeAttributes],
    ) -> &mut Edge {
        let idx = self.connect(from, to, templates);
        &mut self.root.edges[idx]
    }

    pub(crate) fn connect(
        &mut self,
        from: &str,
        to: &str,
        templates: &[&EdgeAttributes],
    ) -> usize {
        for id in [from, to] {
            if !self.subgraph.contains_node(id) {
                self.subgraph.register_node(id);
            }
        }
        let idx = self.root.connect(from, to, templates);
        self.subgraph.edges.push(idx);
        idx
    }

    /// Creates a nested subgraph and appends it to this one.
    pub fn subgraph<F>(&mut self, name: &str, build: F) -> &mut Subgraph
    where
        F: FnOnce(&mut SubgraphBuilder<'_>),
    {
        let mut child = SubgraphBuilder::new(&mut *self.root, name);
        build(&mut child);
        let sub = child.finish();
        self.attach(sub)
    }

    /// Appends an already built subgraph as a child of this one.
    pub(crate) fn attach(&mut self, sub: Subgraph) -> &mut Subgraph {
        self.subgraph.subgraphs.push(sub);
        let last = self.subgraph.subgraphs.len() - 1;
        &mut self.subgraph.subgraphs[last]
    }
}

#[test]
fn test_subgraph_registers_on_root() {
    let mut g = Graph::new(true);
    g.add_node(Node::new("outside"));
    let sub = g.subgraph("cluster_a", |sg| {
        sg.add_node(Node::new("a1"));
        sg.add_edge("a1", "a2", &[]);
        sg.subgraph("inner", |inner| {
            inner.add_node(Node::new("deep"));
        });
    });
    assert!(sub.is_cluster());
    assert_eq!(sub.node_ids(), &["a1".to_string(), "a2".to_string()]);
    assert_eq!(sub.edge_indices(), &[0]);
    assert_eq!(sub.subgraphs().len(), 1);
    assert_eq!(sub.subgraphs()[0].name(), Some("inner"));
    assert!(!sub.subgraphs()[0].is_cluster());
    assert!(sub.contains_node("deep"));

    let ids: Vec<&str> = g.nodes().map(|n| n.id()).collect();
    assert_eq!(ids, vec!["outside", "a1", "a2", "deep"]);
    assert_eq!(g.num_edges(), 1);
    // Only the direct child is a top-level subgraph.
    assert_eq!(g.subgraphs().len(), 1);
}

#[test]
fn test_member_ids() {
    let mut g = Graph::new(true);
    let sub = g.subgraph("", |sg| {
        sg.add_node(Node::new("a"));
        sg.subgraph("", |inner| {
            inner.add_node(Node::new("b"));
            inner.add_node(Node::new("a"));
        });
        sg.add_node(Node::new("c"));
    });
    assert_eq!(sub.name(), None);
    assert_eq!(sub.member_ids(), vec!["a", "c", "b"]);
}
