//! Writes a Graph back out in the DOT format.
//!
//! The output is deterministic: attributes are sorted by key, nodes and edges
//! keep their insertion order, and every identifier is quoted. Parsing the
//! output and printing it again yields the same text.

use crate::core::attrs::Attributes;
use crate::core::graph::{Edge, Graph, Node};
use crate::core::subgraph::Subgraph;
use std::collections::HashSet;
use std::fmt::{self, Write};
use std::io;

/// Escapes \p text so that it can be placed between double quotes. This is
/// the inverse of the string unescaping that the lexer performs.
pub fn escape_dot_string(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            _ => result.push(ch),
        }
    }
    result
}

fn quote(text: &str) -> String {
    format!("\"{}\"", escape_dot_string(text))
}

/// Writes \p graph to \p writer in the DOT format. Only the errors of the
/// writer are returned.
pub fn write_dot<W: io::Write>(graph: &Graph, writer: W) -> io::Result<()> {
    let mut adapter = IoAdapter {
        inner: writer,
        error: None,
    };
    let result = DotPrinter::new(graph, &mut adapter).print();
    match result {
        Ok(()) => Ok(()),
        Err(_) => Err(adapter.error.take().unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::Other, "formatter error")
        })),
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        DotPrinter::new(self, f).print()
    }
}

// Forwards the formatted text to an io::Write and keeps the first io error.
struct IoAdapter<W: io::Write> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> Write for IoAdapter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

struct DotPrinter<'a, W: Write + ?Sized> {
    graph: &'a Graph,
    out: &'a mut W,
    // Nodes and edges that are written inside some subgraph.
    claimed_nodes: HashSet<&'a str>,
    claimed_edges: HashSet<usize>,
    // The 'node [...]' and 'edge [...]' entries.
    node_defaults: Vec<(String, String)>,
    edge_defaults: Vec<(String, String)>,
}

// Drops the entries that \p defaults provides. Parsing the output applies the
// defaults to every node and edge, so only the differences are written.
fn without_defaults(
    entries: Vec<(String, String)>,
    defaults: &[(String, String)],
) -> Vec<(String, String)> {
    entries
        .into_iter()
        .filter(|entry| !defaults.contains(entry))
        .collect()
}

impl<'a, W: Write + ?Sized> DotPrinter<'a, W> {
    fn new(graph: &'a Graph, out: &'a mut W) -> Self {
        let mut printer = Self {
            graph,
            out,
            claimed_nodes: HashSet::new(),
            claimed_edges: HashSet::new(),
            node_defaults: graph.node_defaults.entries(),
            edge_defaults: graph.edge_defaults.entries(),
        };
        for sub in graph.subgraphs() {
            printer.claim(sub);
        }
        printer
    }

    fn claim(&mut self, sub: &'a Subgraph) {
        for id in sub.node_ids() {
            self.claimed_nodes.insert(id);
        }
        for idx in sub.edge_indices() {
            self.claimed_edges.insert(*idx);
        }
        for child in sub.subgraphs() {
            self.claim(child);
        }
    }

    fn indent(&mut self, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            self.out.write_char('\t')?;
        }
        Ok(())
    }

    // [a="1", b="2"]
    fn print_attribute_list(
        &mut self,
        entries: &[(String, String)],
    ) -> fmt::Result {
        self.out.write_char('[')?;
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            write!(self.out, "{}={}", key, quote(value))?;
        }
        self.out.write_char(']')
    }

    // One 'key="value";' line per attribute.
    fn print_assignments(
        &mut self,
        entries: &[(String, String)],
        depth: usize,
    ) -> fmt::Result {
        for (key, value) in entries {
            self.indent(depth)?;
            writeln!(self.out, "{}={};", key, quote(value))?;
        }
        Ok(())
    }

    // node [...]; or edge [...];
    fn print_defaults(
        &mut self,
        keyword: &str,
        entries: &[(String, String)],
    ) -> fmt::Result {
        if entries.is_empty() {
            return Ok(());
        }
        self.indent(1)?;
        write!(self.out, "{} ", keyword)?;
        self.print_attribute_list(entries)?;
        self.out.write_str(";\n")
    }

    fn print_node(&mut self, node: &Node, depth: usize) -> fmt::Result {
        self.indent(depth)?;
        self.out.write_str(&quote(node.id()))?;
        let entries = without_defaults(node.attrs.entries(), &self.node_defaults);
        if !entries.is_empty() {
            self.out.write_char(' ')?;
            self.print_attribute_list(&entries)?;
        }
        self.out.write_str(";\n")
    }

    fn print_edge(&mut self, edge: &Edge, depth: usize) -> fmt::Result {
        let op = if self.graph.is_directed() { "->" } else { "--" };
        self.indent(depth)?;
        write!(self.out, "{} {} {}", quote(edge.from()), op, quote(edge.to()))?;
        let entries = without_defaults(edge.attrs.entries(), &self.edge_defaults);
        if !entries.is_empty() {
            self.out.write_char(' ')?;
            self.print_attribute_list(&entries)?;
        }
        self.out.write_str(";\n")
    }

    fn print_subgraph(&mut self, sub: &Subgraph, depth: usize) -> fmt::Result {
        self.indent(depth)?;
        match sub.name() {
            Some(name) => writeln!(self.out, "subgraph {} {{", quote(name))?,
            None => self.out.write_str("subgraph {\n")?,
        }

        self.print_assignments(&sub.attrs.entries(), depth + 1)?;
        let graph = self.graph;
        for node in graph.subgraph_nodes(sub) {
            self.print_node(node, depth + 1)?;
        }
        for child in sub.subgraphs() {
            self.print_subgraph(child, depth + 1)?;
        }
        for edge in graph.subgraph_edges(sub) {
            self.print_edge(edge, depth + 1)?;
        }

        self.indent(depth)?;
        self.out.write_str("}\n")
    }

    fn print(&mut self) -> fmt::Result {
        let graph = self.graph;

        if graph.is_strict() {
            self.out.write_str("strict ")?;
        }
        let kind = if graph.is_directed() { "digraph" } else { "graph" };
        self.out.write_str(kind)?;
        if let Some(name) = graph.name() {
            write!(self.out, " {}", quote(name))?;
        }
        self.out.write_str(" {\n")?;

        self.print_assignments(&graph.attrs.entries(), 1)?;
        let node_defaults = self.node_defaults.clone();
        let edge_defaults = self.edge_defaults.clone();
        self.print_defaults("node", &node_defaults)?;
        self.print_defaults("edge", &edge_defaults)?;

        for sub in graph.subgraphs() {
            self.print_subgraph(sub, 1)?;
        }
        for node in graph.nodes() {
            if !self.claimed_nodes.contains(node.id()) {
                self.print_node(node, 1)?;
            }
        }
        for (idx, edge) in graph.edges().iter().enumerate() {
            if !self.claimed_edges.contains(&idx) {
                self.print_edge(edge, 1)?;
            }
        }
        self.out.write_char('}')
    }
}

#[cfg(test)]
use crate::core::attrs::{EdgeAttributes, NodeAttributes};
#[cfg(test)]
use crate::core::style::{EdgeStyle, Shape};

#[test]
fn test_escape_dot_string() {
    assert_eq!(escape_dot_string("plain"), "plain");
    assert_eq!(escape_dot_string("path\\to\\file"), "path\\\\to\\\\file");
    assert_eq!(escape_dot_string("say \"hi\"\nbye"), "say \\\"hi\\\"\\nbye");
    // Backslashes are escaped before the quotes.
    assert_eq!(escape_dot_string("\\\""), "\\\\\\\"");
}

#[test]
fn test_empty_graphs() {
    let mut g = Graph::new(true);
    g.set_strict(true);
    g.set_name(Some("G"));
    assert_eq!(g.to_string(), "strict digraph \"G\" {\n}");

    let g = Graph::new(false);
    assert_eq!(g.to_string(), "graph {\n}");
}

#[test]
fn test_print_nodes_and_edges() {
    let mut g = Graph::new(true);
    g.attrs.label = Some("title".to_string());
    g.node_defaults.shape = Some(Shape::Box);
    let mut attrs = NodeAttributes::default();
    attrs.label = Some("A".to_string());
    attrs.font_size = Some(14.);
    g.add_node(Node::with_attributes("a", attrs));
    let mut bold = EdgeAttributes::default();
    bold.weight = Some(0.5);
    g.add_edge("a", "b", &[&bold]);

    let expected = "digraph {\n\
                    \tlabel=\"title\";\n\
                    \tnode [shape=\"box\"];\n\
                    \t\"a\" [fontsize=\"14\", label=\"A\"];\n\
                    \t\"b\";\n\
                    \t\"a\" -> \"b\" [weight=\"0.5\"];\n\
                    }";
    assert_eq!(g.to_string(), expected);
}

#[test]
fn test_print_subgraphs() {
    let mut g = Graph::new(false);
    g.add_node(Node::new("root"));
    g.subgraph("cluster_x", |sg| {
        sg.attributes_mut().color = Some("blue".to_string());
        sg.add_node(Node::new("x1"));
        sg.subgraph("", |inner| {
            inner.add_node(Node::new("x2"));
        });
        sg.add_edge("x1", "x2", &[]);
    });
    g.add_edge("root", "x1", &[]);

    let expected = "graph {\n\
                    \tsubgraph \"cluster_x\" {\n\
                    \t\tcolor=\"blue\";\n\
                    \t\t\"x1\";\n\
                    \t\tsubgraph {\n\
                    \t\t\t\"x2\";\n\
                    \t\t}\n\
                    \t\t\"x1\" -- \"x2\";\n\
                    \t}\n\
                    \t\"root\";\n\
                    \t\"root\" -- \"x1\";\n\
                    }";
    assert_eq!(g.to_string(), expected);
}

#[test]
fn test_write_dot_matches_display() {
    let mut g = Graph::new(true);
    g.add_edge("a\"b", "c", &[]);
    let mut buffer: Vec<u8> = Vec::new();
    write_dot(&g, &mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), g.to_string());
}

#[test]
fn test_default_entries_are_not_repeated() {
    let mut g = Graph::new(true);
    g.add_edge("a", "b", &[]);
    g.node_defaults.color = Some("red".to_string());
    g.edge_defaults.style = Some(EdgeStyle::Dashed);
    let mut attrs = NodeAttributes::default();
    attrs.color = Some("red".to_string());
    attrs.label = Some("C".to_string());
    g.add_node(Node::with_attributes("c", attrs));
    let mut solid = EdgeAttributes::default();
    solid.style = Some(EdgeStyle::Solid);
    g.add_edge("c", "a", &[&solid]);

    let expected = "digraph {\n\
                    \tnode [color=\"red\"];\n\
                    \tedge [style=\"dashed\"];\n\
                    \t\"a\";\n\
                    \t\"b\";\n\
                    \t\"c\" [label=\"C\"];\n\
                    \t\"a\" -> \"b\";\n\
                    \t\"c\" -> \"a\" [style=\"solid\"];\n\
                    }";
    assert_eq!(g.to_string(), expected);
}
