/*!
This crate provides a library for reading and writing GraphViz DOT files. It
parses DOT text into an in-memory graph of nodes, edges and (possibly nested)
subgraphs, and writes such a graph back out as canonical DOT text. Attributes
are stored in typed fields where the crate knows their meaning, and verbatim
otherwise. This crate also provides an API for constructing graphs.

For more specific details on the API, see the documentation for the specific
sub modules.

The project also comes with a command line utility that checks and
reformats .DOT files.

# Parser example: parse a dot file

This crate provides an API for parsing DOT files. For example,
to parse a graph and print it back out:

```rust
    use dotgraph::gv;

    let contents = "digraph { a -> b [label=\"foo\"]; }";

    match gv::parse_string(contents) {
        Result::Err(err) => {
            println!("{}", gv::error_context(contents, &err));
            println!("{}", err);
        }

        Result::Ok(g) => {
            assert_eq!(g.num_nodes(), 2);
            println!("{}", g);
        }
    }
```

The example above would print the graph in canonical form, or a readable
error message, such as:

```txt
digraph { a -> ; }
               ^
parse error at 1:16: expected a node or a subgraph, found ';'
```


# Graph Builder example: create a new graph

This crate provides an API for creating graphs. For example, this code builds
a graph with a cluster and two nodes that are connected with an edge.

```rust
fn simple_graph() {
    use dotgraph::core::attrs::EdgeAttributes;
    use dotgraph::core::graph::{Graph, Node};
    use dotgraph::core::style::Shape;
    use dotgraph::core::utils::save_to_file;

    // Create a new directed graph:
    let mut g = Graph::new(true);
    g.set_name(Some("G"));

    // Printed as a 'node [shape="box"];' statement.
    g.node_defaults.shape = Some(Shape::Box);

    // Add the nodes to a cluster.
    g.subgraph("cluster_0", |sg| {
        sg.attributes_mut().label = Some("group".to_string());
        sg.add_node(Node::new("one"));
        sg.add_node(Node::new("two"));
    });

    // Add an edge between the nodes.
    let mut look = EdgeAttributes::default();
    look.label = Some("123".to_string());
    g.add_edge("one", "two", &[&look]);

    // Save the output.
    let _ = save_to_file("/tmp/graph.dot", &g.to_string());
}
```

*/

pub mod adt;
pub mod core;
pub mod error;
pub mod gv;
