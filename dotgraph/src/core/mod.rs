//! A module that contains the graph data-structures (graphs, subgraphs, nodes,
//! edges and their attributes) that are shared by the parser and the printer.

pub mod attrs;
pub mod graph;
pub mod style;
pub mod subgraph;
pub mod utils;
