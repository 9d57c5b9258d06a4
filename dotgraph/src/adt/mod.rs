//! Generic data structures used by the graph model.

pub mod map;
