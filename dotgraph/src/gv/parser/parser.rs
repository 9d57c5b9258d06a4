//! A recursive-descent parser for the DOT language. The parser builds the
//! Graph data-structure directly, without an intermediate syntax tree.
//!
//! Two inputs can make parsing expensive. An edge statement whose endpoints
//! are subgraphs creates one edge for every pair of nodes of the two sides,
//! so a chain of subgraphs multiplies the number of edges. Nested subgraphs
//! are parsed recursively, so the stack depth grows with the brace nesting of
//! the input. Neither is limited.

use super::lexer::{Lexer, Token, TokenKind};
use crate::core::attrs::{Attributes, EdgeAttributes, NodeAttributes};
use crate::core::graph::{Graph, Node};
use crate::core::subgraph::{Subgraph, SubgraphBuilder};
use crate::error::{AttrError, ParseError};

// key=value, and the location of the value.
#[derive(Debug, Clone)]
struct AttrEntry {
    key: String,
    value: String,
    line: usize,
    col: usize,
}

// [a=b; c=d; ... ]
#[derive(Debug, Clone, Default)]
struct AttributeList {
    list: Vec<AttrEntry>,
}

impl AttributeList {
    fn add_attr(&mut self, key: &str, value: &Token) {
        self.list.push(AttrEntry {
            key: key.to_string(),
            value: value.value.clone(),
            line: value.line,
            col: value.col,
        });
    }

    /// Converts the list into the typed attribute set \p A.
    fn build<A: Attributes + Default>(&self) -> Result<A, ParseError> {
        let mut attrs = A::default();
        self.apply(|key, value| attrs.set(key, value))?;
        Ok(attrs)
    }

    /// Calls \p setter on every entry. Conversion errors are reported at the
    /// location of the value.
    fn apply<F>(&self, mut setter: F) -> Result<(), ParseError>
    where
        F: FnMut(&str, &str) -> Result<(), AttrError>,
    {
        for entry in &self.list {
            setter(&entry.key, &entry.value).map_err(|err| {
                ParseError::new(err.to_string(), entry.line, entry.col)
            })?;
        }
        Ok(())
    }
}

/// The default attribute templates that 'node [...]' and 'edge [...]'
/// statements update. The state is passed explicitly through the parsing
/// functions. Statements inside subgraphs update the same templates as the
/// statements of the root graph.
#[derive(Debug, Clone, Default)]
struct Defaults {
    node: NodeAttributes,
    edge: EdgeAttributes,
}

/// The side of an edge operator.
#[derive(Debug, Clone)]
enum Endpoint {
    // node_id : ID [ ':' port ]
    Node { id: String, port: Option<String> },
    // The member nodes of a subgraph.
    Group(Vec<String>),
}

impl Endpoint {
    fn ids(&self) -> Vec<&str> {
        match self {
            Endpoint::Node { id, .. } => vec![id.as_str()],
            Endpoint::Group(ids) => ids.iter().map(|x| x.as_str()).collect(),
        }
    }

    fn port(&self) -> Option<&str> {
        match self {
            Endpoint::Node { port, .. } => port.as_deref(),
            Endpoint::Group(_) => None,
        }
    }
}

/// The graph or subgraph that statements are added to.
trait Scope {
    fn root(&mut self) -> &mut Graph;
    fn declare_node(&mut self, id: &str, template: &NodeAttributes) -> &mut Node;
    fn connect(&mut self, from: &str, to: &str, templates: &[&EdgeAttributes]);
    fn attach(&mut self, sub: Subgraph);
    fn set_attribute(&mut self, key: &str, value: &str) -> Result<(), AttrError>;
}

impl Scope for Graph {
    fn root(&mut self) -> &mut Graph {
        self
    }
    fn declare_node(&mut self, id: &str, template: &NodeAttributes) -> &mut Node {
        self.ensure_node(id, template)
    }
    fn connect(&mut self, from: &str, to: &str, templates: &[&EdgeAttributes]) {
        Graph::connect(self, from, to, templates);
    }
    fn attach(&mut self, sub: Subgraph) {
        self.subgraphs.push(sub);
    }
    fn set_attribute(&mut self, key: &str, value: &str) -> Result<(), AttrError> {
        self.attrs.set(key, value)
    }
}

impl Scope for SubgraphBuilder<'_> {
    fn root(&mut self) -> &mut Graph {
        self.root_mut()
    }
    fn declare_node(&mut self, id: &str, template: &NodeAttributes) -> &mut Node {
        SubgraphBuilder::declare_node(self, id, template)
    }
    fn connect(&mut self, from: &str, to: &str, templates: &[&EdgeAttributes]) {
        SubgraphBuilder::connect(self, from, to, templates);
    }
    fn attach(&mut self, sub: Subgraph) {
        SubgraphBuilder::attach(self, sub);
    }
    fn set_attribute(&mut self, key: &str, value: &str) -> Result<(), AttrError> {
        self.attributes_mut().set(key, value)
    }
}

#[derive(Debug, Clone)]
pub struct DotParser {
    lexer: Lexer,
    tok: Token,
}

impl DotParser {
    pub fn new(input: &str) -> Self {
        let mut lexer = Lexer::from_string(input);
        let tok = lexer.next_token();
        Self { lexer, tok }
    }

    fn lex(&mut self) {
        self.tok = self.lexer.next_token();
    }

    /// Creates an error at the current token, saying that \p expected was
    /// expected.
    fn unexpected(&self, expected: &str) -> ParseError {
        let found = match self.tok.kind {
            TokenKind::Illegal => {
                return self.error(&format!(
                    "unexpected character '{}'",
                    self.tok.value
                ));
            }
            TokenKind::Identifier
            | TokenKind::String
            | TokenKind::Number
            | TokenKind::Html => {
                format!("{} \"{}\"", self.tok.kind, self.tok.value)
            }
            _ => self.tok.kind.to_string(),
        };
        self.error(&format!("expected {}, found {}", expected, found))
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError::new(message, self.tok.line, self.tok.col)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if !self.tok.is(kind) {
            return Err(self.unexpected(&kind.to_string()));
        }
        self.lex();
        Ok(())
    }

    /// Returns true if the current token is a name (of a graph or subgraph).
    fn at_name(&self) -> bool {
        matches!(
            self.tok.kind,
            TokenKind::Identifier | TokenKind::String | TokenKind::Number
        )
    }

    /// Returns true if the current token starts a subgraph: 'subgraph'
    /// followed by a name or a '{', or an anonymous '{ ... }' block.
    fn at_subgraph(&mut self) -> bool {
        if self.tok.is(TokenKind::LBrace) {
            return true;
        }
        if !self.tok.is_keyword("subgraph") {
            return false;
        }
        let next = self.lexer.peek_token();
        matches!(
            next.kind,
            TokenKind::LBrace
                | TokenKind::Identifier
                | TokenKind::String
                | TokenKind::Number
        )
    }

    /// Parses dot files, as specified here:
    /// <https://graphviz.org/doc/info/lang.html>
    ///
    /// graph : [ strict ] (graph | digraph) [ ID ] '{' stmt_list '}'
    pub fn parse_graph(&mut self) -> Result<Graph, ParseError> {
        let mut graph = Graph::new(false);

        // Consume the 'strict' keyword.
        if self.tok.is_keyword("strict") {
            graph.set_strict(true);
            self.lex();
        }

        if self.tok.is_keyword("digraph") {
            graph.set_directed(true);
        } else if !self.tok.is_keyword("graph") {
            return Err(self.unexpected("'graph' or 'digraph'"));
        }
        self.lex();

        // Consume the optional graph name.
        if self.at_name() {
            graph.set_name(Some(self.tok.value.as_str()));
            self.lex();
        }

        self.expect(TokenKind::LBrace)?;
        let mut defaults = Defaults::default();
        self.parse_stmt_list(&mut graph, &mut defaults)?;

        if !self.tok.is(TokenKind::Eof) {
            return Err(self.unexpected("end of input"));
        }

        graph.node_defaults = defaults.node;
        graph.edge_defaults = defaults.edge;

        #[cfg(feature = "log")]
        log::debug!(
            "Parsed graph {:?}: {} nodes, {} edges, {} subgraphs",
            graph.name().unwrap_or(""),
            graph.num_nodes(),
            graph.num_edges(),
            graph.subgraphs().len()
        );
        Ok(graph)
    }

    // stmt_list : [ stmt [ ';' ] stmt_list ] '}'
    fn parse_stmt_list(
        &mut self,
        scope: &mut dyn Scope,
        defaults: &mut Defaults,
    ) -> Result<(), ParseError> {
        loop {
            while self.tok.is(TokenKind::Semicolon) {
                self.lex();
            }

            if self.tok.is(TokenKind::RBrace) {
                // Consume the '}' and exit.
                self.lex();
                return Ok(());
            }
            self.parse_stmt(scope, defaults)?;
        }
    }

    // stmt : node_stmt | edge_stmt | attr_stmt | ID '=' ID | subgraph
    fn parse_stmt(
        &mut self,
        scope: &mut dyn Scope,
        defaults: &mut Defaults,
    ) -> Result<(), ParseError> {
        // attr_stmt : (graph | node | edge) attr_list
        if self.lexer.peek_token().is(TokenKind::LBracket) {
            if self.tok.is_keyword("graph") {
                self.lex();
                let list = self.parse_attr_list()?;
                return list.apply(|k, v| scope.set_attribute(k, v));
            }
            if self.tok.is_keyword("node") {
                self.lex();
                let list = self.parse_attr_list()?;
                return list.apply(|k, v| defaults.node.set(k, v));
            }
            if self.tok.is_keyword("edge") {
                self.lex();
                let list = self.parse_attr_list()?;
                return list.apply(|k, v| defaults.edge.set(k, v));
            }
        }

        if self.at_subgraph() {
            let members = self.parse_subgraph(scope, defaults)?;
            if self.tok.is(TokenKind::Arrow) {
                return self.parse_edge_stmt(
                    scope,
                    defaults,
                    Endpoint::Group(members),
                );
            }
            return Ok(());
        }

        if !self.tok.is_id() {
            return Err(self.unexpected("a statement"));
        }

        let key_tok = self.tok.clone();
        let (id, port) = self.parse_node_id()?;

        if self.tok.is(TokenKind::Equal) {
            if port.is_some() {
                return Err(ParseError::new(
                    "can't assign into a port",
                    key_tok.line,
                    key_tok.col,
                ));
            }
            return self.parse_assignment(scope, &id);
        }

        if self.tok.is(TokenKind::Arrow) {
            scope.declare_node(&id, &defaults.node);
            let first = Endpoint::Node { id, port };
            return self.parse_edge_stmt(scope, defaults, first);
        }

        // node_stmt : node_id [ attr_list ]
        let attrs: NodeAttributes = self.parse_attr_list()?.build()?;
        if let Some(_port) = &port {
            #[cfg(feature = "log")]
            log::debug!("Ignoring port \"{}\" of node \"{}\"", _port, id);
        }
        let node = scope.declare_node(&id, &defaults.node);
        node.attrs.merge(&attrs);
        Ok(())
    }

    // ID '=' ID
    fn parse_assignment(
        &mut self,
        scope: &mut dyn Scope,
        key: &str,
    ) -> Result<(), ParseError> {
        self.expect(TokenKind::Equal)?;
        if !self.tok.is_id() {
            return Err(self.unexpected("a value"));
        }
        let mut list = AttributeList::default();
        list.add_attr(key, &self.tok);
        self.lex();
        list.apply(|k, v| scope.set_attribute(k, v))
    }

    // subgraph : [ subgraph [ ID ] ] '{' stmt_list '}'
    // Returns the member nodes of the new subgraph.
    fn parse_subgraph(
        &mut self,
        scope: &mut dyn Scope,
        defaults: &mut Defaults,
    ) -> Result<Vec<String>, ParseError> {
        let mut name = String::new();

        // Consume the 'subgraph' keyword and the optional name.
        if self.tok.is_keyword("subgraph") {
            self.lex();
            if self.at_name() {
                name = self.tok.value.clone();
                self.lex();
            }
        }

        self.expect(TokenKind::LBrace)?;

        let mut child = SubgraphBuilder::new(scope.root(), &name);
        self.parse_stmt_list(&mut child, defaults)?;
        let sub = child.finish();
        let members = sub.member_ids();
        scope.attach(sub);
        Ok(members)
    }

    // (node_id | subgraph)
    fn parse_endpoint(
        &mut self,
        scope: &mut dyn Scope,
        defaults: &mut Defaults,
    ) -> Result<Endpoint, ParseError> {
        if self.at_subgraph() {
            let members = self.parse_subgraph(scope, defaults)?;
            return Ok(Endpoint::Group(members));
        }
        if !self.tok.is_id() {
            return Err(self.unexpected("a node or a subgraph"));
        }
        let (id, port) = self.parse_node_id()?;
        scope.declare_node(&id, &defaults.node);
        Ok(Endpoint::Node { id, port })
    }

    // edge_stmt : (node_id | subgraph) edgeRHS [ attr_list ]
    // edgeRHS : edgeop (node_id | subgraph) [ edgeRHS ]
    fn parse_edge_stmt(
        &mut self,
        scope: &mut dyn Scope,
        defaults: &mut Defaults,
        first: Endpoint,
    ) -> Result<(), ParseError> {
        let mut chain = vec![first];

        while self.tok.is(TokenKind::Arrow) {
            // Consume the arrow.
            self.lex();
            let endpoint = self.parse_endpoint(scope, defaults)?;
            chain.push(endpoint);
        }

        // Parse the optional attribute list.
        let attrs: EdgeAttributes = self.parse_attr_list()?.build()?;

        for pair in chain.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            let mut ports = EdgeAttributes::default();
            if let Some(port) = left.port() {
                ports.custom.insert("tailport".to_string(), port.to_string());
            }
            if let Some(port) = right.port() {
                ports.custom.insert("headport".to_string(), port.to_string());
            }

            let from_ids = left.ids();
            let to_ids = right.ids();
            #[cfg(feature = "log")]
            {
                let count = from_ids.len() * to_ids.len();
                if count > 1 {
                    log::debug!("Expanding edge statement into {} edges", count);
                }
            }
            for from in &from_ids {
                for to in &to_ids {
                    scope.connect(from, to, &[&defaults.edge, &ports, &attrs]);
                }
            }
        }
        Ok(())
    }

    //node_id : ID [ ':' port [ ':' compass_pt ] ]
    fn parse_node_id(&mut self) -> Result<(String, Option<String>), ParseError> {
        if !self.tok.is_id() {
            return Err(self.unexpected("a node name"));
        }
        let name = self.tok.value.clone();
        // Consume the node name.
        self.lex();

        if !self.tok.is(TokenKind::Colon) {
            return Ok((name, None));
        }
        // Consume the colon.
        self.lex();
        if !self.tok.is_id() {
            return Err(self.unexpected("a port name"));
        }
        let mut port = self.tok.value.clone();
        self.lex();

        if self.tok.is(TokenKind::Colon) {
            self.lex();
            if !self.tok.is_id() {
                return Err(self.unexpected("a compass point"));
            }
            port.push(':');
            port.push_str(&self.tok.value);
            self.lex();
        }
        Ok((name, Some(port)))
    }

    // attr_list : '[' [ a_list ] ']' [ attr_list ]
    // a_list : ID '=' ID [ (';' | ',') ] [ a_list ]
    // An empty list is returned when the current token is not '['.
    fn parse_attr_list(&mut self) -> Result<AttributeList, ParseError> {
        let mut lst = AttributeList::default();

        while self.tok.is(TokenKind::LBracket) {
            self.lex();

            while !self.tok.is(TokenKind::RBracket) {
                if !matches!(
                    self.tok.kind,
                    TokenKind::Identifier | TokenKind::String
                ) {
                    return Err(self.unexpected("an attribute name"));
                }
                let key = self.tok.value.clone();
                // Consume the property name.
                self.lex();

                self.expect(TokenKind::Equal)?;

                if !self.tok.is_id() {
                    return Err(self.unexpected("an attribute value"));
                }
                lst.add_attr(&key, &self.tok);
                // Consume the value.
                self.lex();

                // Skip the separator.
                if self.tok.is(TokenKind::Comma) || self.tok.is(TokenKind::Semicolon)
                {
                    self.lex();
                }
            }
            // Consume the ']'.
            self.lex();
        }
        Ok(lst)
    }
}

/// Renders the source line that \p err points to, with a marker under the
/// column of the error. Returns an empty string for errors that don't have a
/// location.
pub fn error_context(source: &str, err: &ParseError) -> String {
    if !err.has_location() || err.line == 0 {
        return String::new();
    }
    let line = match source.lines().nth(err.line - 1) {
        Some(line) => line,
        None => return String::new(),
    };
    // Keep the tabs so that the marker lines up with the text.
    let padding: String = line
        .chars()
        .take(err.col.saturating_sub(1))
        .map(|ch| if ch == '\t' { '\t' } else { ' ' })
        .collect();
    format!("{}\n{}^", line, padding)
}

#[test]
fn test_error_context() {
    let source = "digraph {\n\ta -> ;\n}";
    let err = DotParser::new(source).parse_graph().unwrap_err();
    assert_eq!((err.line, err.col), (2, 7));
    assert_eq!(error_context(source, &err), "\ta -> ;\n\t     ^");
    assert_eq!(error_context(source, &ParseError::unlocated("x")), "");
}

#[test]
fn test_attribute_list_forms() {
    let mut parser = DotParser::new("[a=1; b=2, c=3 d=4][\"e\"=<x>]");
    let list = parser.parse_attr_list().unwrap();
    let keys: Vec<&str> = list.list.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["a", "b", "c", "d", "e"]);
    assert_eq!(list.list[4].value, "x");
    assert!(parser.tok.is(TokenKind::Eof));
}
