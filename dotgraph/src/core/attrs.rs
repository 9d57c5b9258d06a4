//! Attribute sets for nodes, edges, graphs and subgraphs.
//!
//! Every typed field is an `Option`: `None` means the attribute was never
//! configured, `Some` means it was set explicitly, even when the value is
//! empty or zero. Merging copies only the `Some` fields, which lets a partial
//! set be used as a template on top of an existing one.
//!
//! Attributes that have no typed field live in the `custom` map. Typed and
//! custom storage are independent: `label` and `custom["label"]` can both be
//! present. When a set is written out, the typed value shadows the custom one.

use super::style::{ArrowType, EdgeStyle, Rank, RankDir, Shape, Splines};
use crate::error::AttrError;
use std::collections::BTreeMap;

/// Operations shared by all of the attribute sets.
pub trait Attributes {
    /// Assigns the attribute \p key from its textual DOT value. Recognized
    /// keys are converted into their typed field, everything else is stored
    /// verbatim in the custom map.
    fn set(&mut self, key: &str, value: &str) -> Result<(), AttrError>;

    /// Copies every explicitly-set attribute of \p other onto self.
    fn merge(&mut self, other: &Self);

    /// Returns the set attributes as (key, value) text pairs, sorted by key.
    fn entries(&self) -> Vec<(String, String)>;

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Returns the textual value that would be written for \p key.
    fn get(&self, key: &str) -> Option<String> {
        self.entries()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Formats a number in its shortest form: 14.0 is "14", 0.5 is "0.5".
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

fn parse_number(key: &str, value: &str) -> Result<f64, AttrError> {
    match value.trim().parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(AttrError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AttrError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(AttrError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

fn merge_field<T: Clone>(dest: &mut Option<T>, src: &Option<T>) {
    if let Some(val) = src {
        *dest = Some(val.clone());
    }
}

fn merge_custom(
    dest: &mut BTreeMap<String, String>,
    src: &BTreeMap<String, String>,
) {
    for (k, v) in src {
        dest.insert(k.clone(), v.clone());
    }
}

/// Collects the typed and the custom attributes into one sorted list.
fn collect_entries(
    typed: Vec<(&str, Option<String>)>,
    custom: &BTreeMap<String, String>,
) -> Vec<(String, String)> {
    let mut result: Vec<(String, String)> = typed
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
        .collect();

    for (k, v) in custom {
        if result.iter().any(|(key, _)| key == k) {
            continue;
        }
        result.push((k.clone(), v.clone()));
    }
    result.sort_by(|a, b| a.0.cmp(&b.0));
    result
}

fn text<T: ToString>(val: &Option<T>) -> Option<String> {
    val.as_ref().map(|x| x.to_string())
}

fn number(val: &Option<f64>) -> Option<String> {
    val.map(format_number)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeAttributes {
    pub shape: Option<Shape>,
    pub label: Option<String>,
    pub color: Option<String>,
    pub fill_color: Option<String>,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub custom: BTreeMap<String, String>,
}

impl Attributes for NodeAttributes {
    fn set(&mut self, key: &str, value: &str) -> Result<(), AttrError> {
        match key {
            "shape" => self.shape = Some(Shape::from_name(value)),
            "label" => self.label = Some(value.to_string()),
            "color" => self.color = Some(value.to_string()),
            "fillcolor" => self.fill_color = Some(value.to_string()),
            "fontname" => self.font_name = Some(value.to_string()),
            "fontsize" => self.font_size = Some(parse_number(key, value)?),
            _ => {
                self.custom.insert(key.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    fn merge(&mut self, other: &Self) {
        merge_field(&mut self.shape, &other.shape);
        merge_field(&mut self.label, &other.label);
        merge_field(&mut self.color, &other.color);
        merge_field(&mut self.fill_color, &other.fill_color);
        merge_field(&mut self.font_name, &other.font_name);
        merge_field(&mut self.font_size, &other.font_size);
        merge_custom(&mut self.custom, &other.custom);
    }

    fn entries(&self) -> Vec<(String, String)> {
        let typed = vec![
            ("shape", text(&self.shape)),
            ("label", self.label.clone()),
            ("color", self.color.clone()),
            ("fillcolor", self.fill_color.clone()),
            ("fontname", self.font_name.clone()),
            ("fontsize", number(&self.font_size)),
        ];
        collect_entries(typed, &self.custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeAttributes {
    pub label: Option<String>,
    pub color: Option<String>,
    pub style: Option<EdgeStyle>,
    pub arrow_head: Option<ArrowType>,
    pub arrow_tail: Option<ArrowType>,
    pub weight: Option<f64>,
    pub custom: BTreeMap<String, String>,
}

impl Attributes for EdgeAttributes {
    fn set(&mut self, key: &str, value: &str) -> Result<(), AttrError> {
        match key {
            "label" => self.label = Some(value.to_string()),
            "color" => self.color = Some(value.to_string()),
            "style" => self.style = Some(EdgeStyle::from_name(value)),
            "arrowhead" => self.arrow_head = Some(ArrowType::from_name(value)),
            "arrowtail" => self.arrow_tail = Some(ArrowType::from_name(value)),
            "weight" => self.weight = Some(parse_number(key, value)?),
            _ => {
                self.custom.insert(key.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    fn merge(&mut self, other: &Self) {
        merge_field(&mut self.label, &other.label);
        merge_field(&mut self.color, &other.color);
        merge_field(&mut self.style, &other.style);
        merge_field(&mut self.arrow_head, &other.arrow_head);
        merge_field(&mut self.arrow_tail, &other.arrow_tail);
        merge_field(&mut self.weight, &other.weight);
        merge_custom(&mut self.custom, &other.custom);
    }

    fn entries(&self) -> Vec<(String, String)> {
        let typed = vec![
            ("label", self.label.clone()),
            ("color", self.color.clone()),
            ("style", text(&self.style)),
            ("arrowhead", text(&self.arrow_head)),
            ("arrowtail", text(&self.arrow_tail)),
            ("weight", number(&self.weight)),
        ];
        collect_entries(typed, &self.custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphAttributes {
    pub label: Option<String>,
    pub rank_dir: Option<RankDir>,
    pub bg_color: Option<String>,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub splines: Option<Splines>,
    pub node_sep: Option<f64>,
    pub rank_sep: Option<f64>,
    pub compound: Option<bool>,
    pub custom: BTreeMap<String, String>,
}

impl Attributes for GraphAttributes {
    fn set(&mut self, key: &str, value: &str) -> Result<(), AttrError> {
        match key {
            "label" => self.label = Some(value.to_string()),
            "rankdir" => self.rank_dir = Some(RankDir::from_name(value)),
            "bgcolor" => self.bg_color = Some(value.to_string()),
            "fontname" => self.font_name = Some(value.to_string()),
            "fontsize" => self.font_size = Some(parse_number(key, value)?),
            "splines" => self.splines = Some(Splines::from_name(value)),
            "nodesep" => self.node_sep = Some(parse_number(key, value)?),
            "ranksep" => self.rank_sep = Some(parse_number(key, value)?),
            "compound" => self.compound = Some(parse_bool(key, value)?),
            _ => {
                self.custom.insert(key.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    fn merge(&mut self, other: &Self) {
        merge_field(&mut self.label, &other.label);
        merge_field(&mut self.rank_dir, &other.rank_dir);
        merge_field(&mut self.bg_color, &other.bg_color);
        merge_field(&mut self.font_name, &other.font_name);
        merge_field(&mut self.font_size, &other.font_size);
        merge_field(&mut self.splines, &other.splines);
        merge_field(&mut self.node_sep, &other.node_sep);
        merge_field(&mut self.rank_sep, &other.rank_sep);
        merge_field(&mut self.compound, &other.compound);
        merge_custom(&mut self.custom, &other.custom);
    }

    fn entries(&self) -> Vec<(String, String)> {
        let typed = vec![
            ("label", self.label.clone()),
            ("rankdir", text(&self.rank_dir)),
            ("bgcolor", self.bg_color.clone()),
            ("fontname", self.font_name.clone()),
            ("fontsize", number(&self.font_size)),
            ("splines", text(&self.splines)),
            ("nodesep", number(&self.node_sep)),
            ("ranksep", number(&self.rank_sep)),
            ("compound", text(&self.compound)),
        ];
        collect_entries(typed, &self.custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubgraphAttributes {
    pub label: Option<String>,
    pub color: Option<String>,
    pub fill_color: Option<String>,
    pub bg_color: Option<String>,
    pub style: Option<String>,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub rank: Option<Rank>,
    pub custom: BTreeMap<String, String>,
}

impl Attributes for SubgraphAttributes {
    fn set(&mut self, key: &str, value: &str) -> Result<(), AttrError> {
        match key {
            "label" => self.label = Some(value.to_string()),
            "color" => self.color = Some(value.to_string()),
            "fillcolor" => self.fill_color = Some(value.to_string()),
            "bgcolor" => self.bg_color = Some(value.to_string()),
            "style" => self.style = Some(value.to_string()),
            "fontname" => self.font_name = Some(value.to_string()),
            "fontsize" => self.font_size = Some(parse_number(key, value)?),
            "rank" => self.rank = Some(Rank::from_name(value)),
            _ => {
                self.custom.insert(key.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    fn merge(&mut self, other: &Self) {
        merge_field(&mut self.label, &other.label);
        merge_field(&mut self.color, &other.color);
        merge_field(&mut self.fill_color, &other.fill_color);
        merge_field(&mut self.bg_color, &other.bg_color);
        merge_field(&mut self.style, &other.style);
        merge_field(&mut self.font_name, &other.font_name);
        merge_field(&mut self.font_size, &other.font_size);
        merge_field(&mut self.rank, &other.rank);
        merge_custom(&mut self.custom, &other.custom);
    }

    fn entries(&self) -> Vec<(String, String)> {
        let typed = vec![
            ("label", self.label.clone()),
            ("color", self.color.clone()),
            ("fillcolor", self.fill_color.clone()),
            ("bgcolor", self.bg_color.clone()),
            ("style", self.style.clone()),
            ("fontname", self.font_name.clone()),
            ("fontsize", number(&self.font_size)),
            ("rank", text(&self.rank)),
        ];
        collect_entries(typed, &self.custom)
    }
}

#[test]
fn test_merge_keeps_unset_fields() {
    let mut dest = NodeAttributes {
        label: Some("keep me".to_string()),
        ..Default::default()
    };
    let template = NodeAttributes {
        color: Some("red".to_string()),
        ..Default::default()
    };
    dest.merge(&template);
    assert_eq!(dest.label.as_deref(), Some("keep me"));
    assert_eq!(dest.color.as_deref(), Some("red"));
    assert_eq!(dest.shape, None);

    // Later templates win for the fields they set.
    let second = NodeAttributes {
        color: Some("blue".to_string()),
        ..Default::default()
    };
    dest.merge(&second);
    assert_eq!(dest.color.as_deref(), Some("blue"));
}

#[test]
fn test_zero_values_are_set() {
    let mut attrs = EdgeAttributes::default();
    assert!(attrs.is_empty());
    attrs.weight = Some(0.);
    attrs.label = Some(String::new());
    assert!(!attrs.is_empty());
    assert_eq!(
        attrs.entries(),
        vec![
            ("label".to_string(), "".to_string()),
            ("weight".to_string(), "0".to_string())
        ]
    );
}

#[test]
fn test_typed_and_custom_are_independent() {
    let mut attrs = NodeAttributes::default();
    attrs.set("label", "typed").unwrap();
    attrs.custom.insert("label".to_string(), "custom".to_string());
    attrs.set("tooltip", "hi").unwrap();
    assert_eq!(attrs.label.as_deref(), Some("typed"));
    assert_eq!(attrs.custom.get("label").map(|s| s.as_str()), Some("custom"));
    assert_eq!(attrs.get("label").as_deref(), Some("typed"));
    assert_eq!(attrs.get("tooltip").as_deref(), Some("hi"));

    attrs.label = None;
    assert_eq!(attrs.get("label").as_deref(), Some("custom"));
}

#[test]
fn test_coercion() {
    let mut attrs = GraphAttributes::default();
    attrs.set("nodesep", "0.25").unwrap();
    attrs.set("fontsize", "14").unwrap();
    attrs.set("compound", "True").unwrap();
    attrs.set("rankdir", "LR").unwrap();
    assert_eq!(attrs.node_sep, Some(0.25));
    assert_eq!(attrs.compound, Some(true));
    assert_eq!(attrs.rank_dir, Some(RankDir::LeftToRight));
    assert_eq!(attrs.get("fontsize").as_deref(), Some("14"));
    assert_eq!(attrs.get("compound").as_deref(), Some("true"));

    assert!(matches!(
        attrs.set("ranksep", "wide"),
        Err(AttrError::InvalidNumber { .. })
    ));
    assert!(matches!(
        attrs.set("ranksep", "inf"),
        Err(AttrError::InvalidNumber { .. })
    ));
    assert!(matches!(
        attrs.set("compound", "yes"),
        Err(AttrError::InvalidBool { .. })
    ));
    // A failed conversion leaves the field alone.
    assert_eq!(attrs.rank_sep, None);
    assert_eq!(attrs.compound, Some(true));
}

#[test]
fn test_entries_sorted() {
    let mut attrs = SubgraphAttributes::default();
    attrs.set("style", "filled").unwrap();
    attrs.set("zorder", "1").unwrap();
    attrs.set("color", "lightgrey").unwrap();
    attrs.set("rank", "same").unwrap();
    let keys: Vec<String> = attrs.entries().into_iter().map(|e| e.0).collect();
    assert_eq!(keys, vec!["color", "rank", "style", "zorder"]);
}

#[test]
fn test_format_number() {
    assert_eq!(format_number(14.), "14");
    assert_eq!(format_number(0.5), "0.5");
    assert_eq!(format_number(-2.75), "-2.75");
}
