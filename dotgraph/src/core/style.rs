//! This module represents the enumerated attribute values of the DOT language
//! (node shapes, edge styles, arrow heads, rank direction, etc).
//!
//! Each enum knows the common GraphViz keywords and keeps anything else in
//! an `Other` variant, so a value read from a file is always written back
//! unchanged.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Box,
    Rect,
    Square,
    Ellipse,
    Oval,
    Circle,
    DoubleCircle,
    Point,
    Egg,
    Triangle,
    InvTriangle,
    Diamond,
    Trapezium,
    Parallelogram,
    House,
    Pentagon,
    Hexagon,
    Octagon,
    Plain,
    PlainText,
    None,
    Note,
    Tab,
    Folder,
    Box3d,
    Component,
    Cylinder,
    Star,
    Underline,
    Record,
    MRecord,
    Other(String),
}

impl Shape {
    pub fn from_name(name: &str) -> Self {
        match name {
            "box" => Shape::Box,
            "rect" => Shape::Rect,
            "square" => Shape::Square,
            "ellipse" => Shape::Ellipse,
            "oval" => Shape::Oval,
            "circle" => Shape::Circle,
            "doublecircle" => Shape::DoubleCircle,
            "point" => Shape::Point,
            "egg" => Shape::Egg,
            "triangle" => Shape::Triangle,
            "invtriangle" => Shape::InvTriangle,
            "diamond" => Shape::Diamond,
            "trapezium" => Shape::Trapezium,
            "parallelogram" => Shape::Parallelogram,
            "house" => Shape::House,
            "pentagon" => Shape::Pentagon,
            "hexagon" => Shape::Hexagon,
            "octagon" => Shape::Octagon,
            "plain" => Shape::Plain,
            "plaintext" => Shape::PlainText,
            "none" => Shape::None,
            "note" => Shape::Note,
            "tab" => Shape::Tab,
            "folder" => Shape::Folder,
            "box3d" => Shape::Box3d,
            "component" => Shape::Component,
            "cylinder" => Shape::Cylinder,
            "star" => Shape::Star,
            "underline" => Shape::Underline,
            "record" => Shape::Record,
            "Mrecord" => Shape::MRecord,
            _ => Shape::Other(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Shape::Box => "box",
            Shape::Rect => "rect",
            Shape::Square => "square",
            Shape::Ellipse => "ellipse",
            Shape::Oval => "oval",
            Shape::Circle => "circle",
            Shape::DoubleCircle => "doublecircle",
            Shape::Point => "point",
            Shape::Egg => "egg",
            Shape::Triangle => "triangle",
            Shape::InvTriangle => "invtriangle",
            Shape::Diamond => "diamond",
            Shape::Trapezium => "trapezium",
            Shape::Parallelogram => "parallelogram",
            Shape::House => "house",
            Shape::Pentagon => "pentagon",
            Shape::Hexagon => "hexagon",
            Shape::Octagon => "octagon",
            Shape::Plain => "plain",
            Shape::PlainText => "plaintext",
            Shape::None => "none",
            Shape::Note => "note",
            Shape::Tab => "tab",
            Shape::Folder => "folder",
            Shape::Box3d => "box3d",
            Shape::Component => "component",
            Shape::Cylinder => "cylinder",
            Shape::Star => "star",
            Shape::Underline => "underline",
            Shape::Record => "record",
            Shape::MRecord => "Mrecord",
            Shape::Other(name) => name,
        }
    }
}

/// The line style of an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeStyle {
    Solid,
    Dashed,
    Dotted,
    Bold,
    Invis,
    Tapered,
    Other(String),
}

impl EdgeStyle {
    pub fn from_name(name: &str) -> Self {
        match name {
            "solid" => EdgeStyle::Solid,
            "dashed" => EdgeStyle::Dashed,
            "dotted" => EdgeStyle::Dotted,
            "bold" => EdgeStyle::Bold,
            "invis" => EdgeStyle::Invis,
            "tapered" => EdgeStyle::Tapered,
            _ => EdgeStyle::Other(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EdgeStyle::Solid => "solid",
            EdgeStyle::Dashed => "dashed",
            EdgeStyle::Dotted => "dotted",
            EdgeStyle::Bold => "bold",
            EdgeStyle::Invis => "invis",
            EdgeStyle::Tapered => "tapered",
            EdgeStyle::Other(name) => name,
        }
    }
}

/// The marker drawn at either end of an edge (arrowhead, arrowtail).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrowType {
    Normal,
    Inv,
    Dot,
    InvDot,
    ODot,
    InvODot,
    None,
    Tee,
    Empty,
    InvEmpty,
    Diamond,
    ODiamond,
    EDiamond,
    Crow,
    Box,
    OBox,
    Open,
    HalfOpen,
    Vee,
    Other(String),
}

impl ArrowType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "normal" => ArrowType::Normal,
            "inv" => ArrowType::Inv,
            "dot" => ArrowType::Dot,
            "invdot" => ArrowType::InvDot,
            "odot" => ArrowType::ODot,
            "invodot" => ArrowType::InvODot,
            "none" => ArrowType::None,
            "tee" => ArrowType::Tee,
            "empty" => ArrowType::Empty,
            "invempty" => ArrowType::InvEmpty,
            "diamond" => ArrowType::Diamond,
            "odiamond" => ArrowType::ODiamond,
            "ediamond" => ArrowType::EDiamond,
            "crow" => ArrowType::Crow,
            "box" => ArrowType::Box,
            "obox" => ArrowType::OBox,
            "open" => ArrowType::Open,
            "halfopen" => ArrowType::HalfOpen,
            "vee" => ArrowType::Vee,
            _ => ArrowType::Other(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ArrowType::Normal => "normal",
            ArrowType::Inv => "inv",
            ArrowType::Dot => "dot",
            ArrowType::InvDot => "invdot",
            ArrowType::ODot => "odot",
            ArrowType::InvODot => "invodot",
            ArrowType::None => "none",
            ArrowType::Tee => "tee",
            ArrowType::Empty => "empty",
            ArrowType::InvEmpty => "invempty",
            ArrowType::Diamond => "diamond",
            ArrowType::ODiamond => "odiamond",
            ArrowType::EDiamond => "ediamond",
            ArrowType::Crow => "crow",
            ArrowType::Box => "box",
            ArrowType::OBox => "obox",
            ArrowType::Open => "open",
            ArrowType::HalfOpen => "halfopen",
            ArrowType::Vee => "vee",
            ArrowType::Other(name) => name,
        }
    }
}

/// The direction in which ranks are laid out ('rankdir').
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankDir {
    TopToBottom,
    LeftToRight,
    BottomToTop,
    RightToLeft,
    Other(String),
}

impl RankDir {
    pub fn from_name(name: &str) -> Self {
        match name {
            "TB" => RankDir::TopToBottom,
            "LR" => RankDir::LeftToRight,
            "BT" => RankDir::BottomToTop,
            "RL" => RankDir::RightToLeft,
            _ => RankDir::Other(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RankDir::TopToBottom => "TB",
            RankDir::LeftToRight => "LR",
            RankDir::BottomToTop => "BT",
            RankDir::RightToLeft => "RL",
            RankDir::Other(name) => name,
        }
    }
}

/// Controls how edges are drawn ('splines').
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Splines {
    None,
    Line,
    Polyline,
    Curved,
    Ortho,
    Spline,
    Other(String),
}

impl Splines {
    pub fn from_name(name: &str) -> Self {
        match name {
            "none" => Splines::None,
            "line" => Splines::Line,
            "polyline" => Splines::Polyline,
            "curved" => Splines::Curved,
            "ortho" => Splines::Ortho,
            "spline" => Splines::Spline,
            _ => Splines::Other(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Splines::None => "none",
            Splines::Line => "line",
            Splines::Polyline => "polyline",
            Splines::Curved => "curved",
            Splines::Ortho => "ortho",
            Splines::Spline => "spline",
            Splines::Other(name) => name,
        }
    }
}

/// Rank constraint of the nodes of a subgraph ('rank').
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rank {
    Same,
    Min,
    Max,
    Source,
    Sink,
    Other(String),
}

impl Rank {
    pub fn from_name(name: &str) -> Self {
        match name {
            "same" => Rank::Same,
            "min" => Rank::Min,
            "max" => Rank::Max,
            "source" => Rank::Source,
            "sink" => Rank::Sink,
            _ => Rank::Other(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Rank::Same => "same",
            Rank::Min => "min",
            Rank::Max => "max",
            Rank::Source => "source",
            Rank::Sink => "sink",
            Rank::Other(name) => name,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for EdgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ArrowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for RankDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Splines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[test]
fn test_keyword_names() {
    assert_eq!(Shape::from_name("box"), Shape::Box);
    assert_eq!(Shape::from_name("Mrecord").name(), "Mrecord");
    assert_eq!(
        Shape::from_name("BOX"),
        Shape::Other("BOX".to_string()),
        "names are case sensitive"
    );
    assert_eq!(EdgeStyle::from_name("dashed").to_string(), "dashed");
    assert_eq!(ArrowType::from_name("vee"), ArrowType::Vee);
    assert_eq!(RankDir::from_name("RL"), RankDir::RightToLeft);
    assert_eq!(Splines::from_name("ortho"), Splines::Ortho);
    assert_eq!(Rank::from_name("sink").name(), "sink");
}

#[test]
fn test_unknown_values_round_trip() {
    let s = Splines::from_name("true");
    assert_eq!(s.to_string(), "true");
    let a = ArrowType::from_name("lnormal");
    assert_eq!(a.name(), "lnormal");
}
