use dotgraph::core::graph::Graph;

#[cfg(test)]
fn edge_pairs(g: &Graph) -> Vec<(String, String)> {
    g.edges()
        .iter()
        .map(|e| (e.from().to_string(), e.to().to_string()))
        .collect()
}

#[cfg(test)]
fn node_ids(g: &Graph) -> Vec<String> {
    g.nodes().map(|n| n.id().to_string()).collect()
}

#[cfg(test)]
mod tests {

    use super::{edge_pairs, node_ids};
    use dotgraph::core::attrs::Attributes;
    use dotgraph::core::graph::{Graph, Node};
    use dotgraph::core::style::{EdgeStyle, RankDir, Shape};
    use dotgraph::gv;
    use dotgraph::gv::parser::TokenKind;
    use dotgraph::gv::DotParser;
    use dotgraph::gv::Lexer;
    use dotgraph::gv::Token;
    use pretty_assertions::assert_eq;

    fn is_identifier(t: Token, target: &str) -> bool {
        t.is(TokenKind::Identifier) && t.value == target
    }

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    fn parse_ok(program: &str) -> Graph {
        match gv::parse_string(program) {
            Result::Ok(g) => g,
            Result::Err(err) => {
                println!("{}", gv::error_context(program, &err));
                panic!("Error: {}", err);
            }
        }
    }

    fn get_sample_program2() -> String {
        r##"/* ancestor graph from Caroline Bouvier Kennedy */
        graph G {
            I5 [shape=ellipse,color=red,style=bold,label="Caroline Bouvier Kennedy\nb. 27.11.1957 New York",image="images/165px-Caroline_Kennedy.jpg",labelloc=b];
            I1 [shape=box,color=blue,style=bold,label="John Fitzgerald Kennedy\nb. 29.5.1917 Brookline\nd. 22.11.1963 Dallas",image="images/kennedyface.jpg",labelloc=b];
            I6 [shape=box,color=blue,style=bold,label="John Fitzgerald Kennedy\nb. 25.11.1960 Washington\nd. 16.7.1999 over the Atlantic Ocean, near Aquinnah, MA, USA",image="images/180px-JFKJr2.jpg",labelloc=b];
            I7 [shape=box,color=blue,style=bold,label="Patrick Bouvier Kennedy\nb. 7.8.1963\nd. 9.8.1963"];
            I2 [shape=ellipse,color=red,style=bold,label="Jaqueline Lee Bouvier\nb. 28.7.1929 Southampton\nd. 19.5.1994 New York City",image="images/jacqueline-kennedy-onassis.jpg",labelloc=b];
            I8 [shape=box,color=blue,style=bold,label="Joseph Patrick Kennedy\nb. 6.9.1888 East Boston\nd. 16.11.1969 Hyannis Port",image="images/1025901671.jpg",labelloc=b];
            I10 [shape=box,color=blue,style=bold,label="Joseph Patrick Kennedy Jr\nb. 1915\nd. 1944"];
            I11 [shape=ellipse,color=red,style=bold,label="Rosemary Kennedy\nb. 13.9.1918\nd. 7.1.2005",image="images/rosemary.jpg",labelloc=b];
            I12 [shape=ellipse,color=red,style=bold,label="Kathleen Kennedy\nb. 1920\nd. 1948"];
            I13 [shape=ellipse,color=red,style=bold,label="Eunice Mary Kennedy\nb. 10.7.1921 Brookline"];
            I9 [shape=ellipse,color=red,style=bold,label="Rose Elizabeth Fitzgerald\nb. 22.7.1890 Boston\nd. 22.1.1995 Hyannis Port",image="images/Rose_kennedy.JPG",labelloc=b];
            I15 [shape=box,color=blue,style=bold,label="Aristotle Onassis"];
            I3 [shape=box,color=blue,style=bold,label="John Vernou Bouvier III\nb. 1891\nd. 1957",image="images/BE037819.jpg",labelloc=b];
            I4 [shape=ellipse,color=red,style=bold,label="Janet Norton Lee\nb. 2.10.1877\nd. 3.1.1968",image="images/n48862003257_1275276_1366.jpg",labelloc=b];
             I1 -- I5  [style=bold,color=blue];
             I1 -- I6  [style=bold,color=orange];
             I2 -- I6  [style=bold,color=orange];
             I1 -- I7  [style=bold,color=orange];
             I2 -- I7  [style=bold,color=orange];
             I1 -- I2  [style=bold,color=violet];
             I8 -- I1  [style=bold,color=blue];
             I8 -- I10  [style=bold,color=orange];
             I9 -- I10  [style=bold,color=orange];
             I8 -- I11  [style=bold,color=orange];
             I9 -- I11  [style=bold,color=orange];
             I8 -- I12  [style=bold,color=orange];
             I9 -- I12  [style=bold,color=orange];
             I8 -- I13  [style=bold,color=orange];
             I9 -- I13  [style=bold,color=orange];
             I8 -- I9  [style=bold,color=violet];
             I9 -- I1  [style=bold,color=red];
             I2 -- I5  [style=bold,color=red];
             I2 -- I15  [style=bold,color=violet];
             I3 -- I2  [style=bold,color=blue];
             I3 -- I4  [style=bold,color=violet];
             I4 -- I2  [style=bold,color=red];
            }
        "##
        .to_string()
    }

    #[test]
    fn simple() {
        let mut lexer = Lexer::from_string("a -> b");
        let t0 = lexer.next_token();
        let t1 = lexer.next_token();
        let t2 = lexer.next_token();
        println!("{:?}", t0);
        println!("{:?}", t1);
        println!("{:?}", t2);
        assert!(is_identifier(t0, "a"));
        assert!(t1.is(TokenKind::Arrow));
        assert!(is_identifier(t2, "b"));
    }

    #[test]
    fn simple_number() {
        let mut lexer = Lexer::from_string("-12345");
        let t0 = lexer.next_token();
        let t1 = lexer.next_token();
        assert!(t0.is(TokenKind::Number));
        assert_eq!(t0.value, "-12345");
        assert!(t1.is(TokenKind::Eof));
    }

    #[test]
    fn simple_float_number() {
        let mut lexer = Lexer::from_string("1.12");
        let t0 = lexer.next_token();
        let t1 = lexer.next_token();
        assert!(t0.is(TokenKind::Number));
        assert_eq!(t0.value, "1.12");
        assert!(t1.is(TokenKind::Eof));
    }

    #[test]
    fn simple_program() {
        let mut lexer = Lexer::from_string("digraph { a -> b; } ");
        assert!(lexer.next_token().is_keyword("digraph"));
        assert!(lexer.next_token().is(TokenKind::LBrace));
        assert!(lexer.next_token().is(TokenKind::Identifier));
        assert!(lexer.next_token().is(TokenKind::Arrow));
        assert!(lexer.next_token().is(TokenKind::Identifier));
        assert!(lexer.next_token().is(TokenKind::Semicolon));
        assert!(lexer.next_token().is(TokenKind::RBrace));
        assert!(lexer.next_token().is(TokenKind::Eof));
    }

    #[test]
    fn lex_program() {
        let program = get_sample_program2();
        let mut lexer = Lexer::from_string(&program[..]);
        let mut tok = lexer.next_token();
        let mut counter = 1;
        while !tok.is(TokenKind::Eof) {
            assert!(!tok.is(TokenKind::Illegal), "{:?}", tok);
            tok = lexer.next_token();
            counter += 1;
        }
        assert_eq!(counter, 629);
    }

    #[test]
    fn parse_program0() {
        let g = parse_ok("graph { a -> b; b -> c;}");
        assert!(!g.is_directed());
        assert_eq!(node_ids(&g), vec!["a", "b", "c"]);
        assert_eq!(edge_pairs(&g), pairs(&[("a", "b"), ("b", "c")]));
    }

    #[test]
    fn parse_program1() {
        // Edge chains, without a trailing semicolon.
        let g = parse_ok("graph { a -- b -- c }");
        assert_eq!(edge_pairs(&g), pairs(&[("a", "b"), ("b", "c")]));
    }

    #[test]
    fn parse_program2() {
        let program = get_sample_program2();
        let g = parse_ok(&program);
        assert_eq!(g.name(), Some("G"));
        assert_eq!(g.num_nodes(), 14);
        assert_eq!(g.num_edges(), 22);

        let i5 = g.node("I5").unwrap();
        assert_eq!(i5.attrs.shape, Some(Shape::Ellipse));
        assert_eq!(
            i5.attrs.label.as_deref(),
            Some("Caroline Bouvier Kennedy\nb. 27.11.1957 New York")
        );
        assert_eq!(i5.attrs.custom.get("labelloc").map(|x| x.as_str()), Some("b"));

        let e = &g.edges()[0];
        assert_eq!(e.attrs.style, Some(EdgeStyle::Bold));
        assert_eq!(e.attrs.color.as_deref(), Some("blue"));
    }

    #[test]
    fn parse_program_fail() {
        let err = gv::parse_string("graph { } s").unwrap_err();
        assert_eq!((err.line, err.col), (1, 11));
        assert!(err.message.contains("end of input"), "{}", err);
    }

    #[test]
    fn scenario_simple_edge() {
        let g = parse_ok("digraph G { A -> B; }");
        assert!(g.is_directed());
        assert!(!g.is_strict());
        assert_eq!(g.name(), Some("G"));
        assert_eq!(g.num_nodes(), 2);
        assert_eq!(edge_pairs(&g), pairs(&[("A", "B")]));
    }

    #[test]
    fn scenario_cluster_endpoint() {
        let g = parse_ok("digraph { subgraph cluster_0 { A; B; } -> C; }");
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(edge_pairs(&g), pairs(&[("A", "C"), ("B", "C")]));
        let sub = &g.subgraphs()[0];
        assert!(sub.is_cluster());
        assert_eq!(sub.name(), Some("cluster_0"));
    }

    #[test]
    fn scenario_escaped_id() {
        let mut g = Graph::new(true);
        g.add_node(Node::new("path\\to\\file"));
        assert_eq!(g.to_string(), "digraph {\n\t\"path\\\\to\\\\file\";\n}");
    }

    #[test]
    fn scenario_strict_empty() {
        let g = parse_ok("strict digraph G { }");
        assert_eq!(g.to_string(), "strict digraph \"G\" {\n}");
    }

    #[test]
    fn scenario_typed_attributes() {
        let g = parse_ok("digraph { A [shape=box, label=\"Node A\", color=red]; }");
        let a = g.node("A").unwrap();
        assert_eq!(a.attrs.shape, Some(Shape::Box));
        assert_eq!(a.attrs.label.as_deref(), Some("Node A"));
        assert_eq!(a.attrs.color.as_deref(), Some("red"));
        assert!(a.attrs.custom.is_empty());
    }

    #[test]
    fn cartesian_expansion() {
        let g = parse_ok("digraph { subgraph { A; B; } -> subgraph { C; D; } }");
        assert_eq!(
            edge_pairs(&g),
            pairs(&[("A", "C"), ("A", "D"), ("B", "C"), ("B", "D")])
        );
        assert_eq!(g.subgraphs().len(), 2);
        assert_eq!(g.subgraphs()[0].name(), None);
    }

    #[test]
    fn nested_subgraph_endpoint() {
        let g = parse_ok("digraph { x -> { a; { b; a; } } }");
        assert_eq!(edge_pairs(&g), pairs(&[("x", "a"), ("x", "b")]));
    }

    #[test]
    fn mixed_chain_expands_pairwise() {
        let g = parse_ok("digraph { a -> {b c} -> d }");
        assert_eq!(
            edge_pairs(&g),
            pairs(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")])
        );
        assert_eq!(node_ids(&g), vec!["a", "b", "c", "d"]);

        let g = parse_ok("digraph { {a b} -> {c d} -> e }");
        assert_eq!(
            edge_pairs(&g),
            pairs(&[
                ("a", "c"),
                ("a", "d"),
                ("b", "c"),
                ("b", "d"),
                ("c", "e"),
                ("d", "e"),
            ])
        );
        assert!(g.has_node("e"));
        assert!(!g.has_node("f"));
    }

    #[test]
    fn ports_become_attributes() {
        let g = parse_ok("digraph { a:p1 -> b:p2:ne; c:q [label=C]; }");
        let e = &g.edges()[0];
        assert_eq!(e.attrs.custom.get("tailport").unwrap(), "p1");
        assert_eq!(e.attrs.custom.get("headport").unwrap(), "p2:ne");
        assert_eq!(g.node("c").unwrap().attrs.label.as_deref(), Some("C"));
    }

    #[test]
    fn defaults_apply_to_later_statements() {
        let program = r#"digraph {
            a;
            node [shape=circle];
            edge [color=grey];
            b -> c [color=red];
            c -> a;
        }"#;
        let g = parse_ok(program);
        assert_eq!(g.node("a").unwrap().attrs.shape, None);
        assert_eq!(g.node("b").unwrap().attrs.shape, Some(Shape::Circle));
        assert_eq!(g.edges()[0].attrs.color.as_deref(), Some("red"));
        assert_eq!(g.edges()[1].attrs.color.as_deref(), Some("grey"));
        assert_eq!(g.node_defaults.shape, Some(Shape::Circle));
        assert_eq!(g.edge_defaults.color.as_deref(), Some("grey"));
    }

    #[test]
    fn subgraph_defaults_leak_to_root() {
        let g = parse_ok("digraph { subgraph s { node [color=red]; x; } y; }");
        assert_eq!(g.node("y").unwrap().attrs.color.as_deref(), Some("red"));
        assert_eq!(g.node_defaults.color.as_deref(), Some("red"));
    }

    #[test]
    fn graph_and_subgraph_attributes() {
        let g = parse_ok(
            "digraph { rankdir=LR; graph [compound=true]; \
             subgraph cluster_a { label=\"A\"; graph [rank=same]; a } }",
        );
        assert_eq!(g.attrs.rank_dir, Some(RankDir::LeftToRight));
        assert_eq!(g.attrs.compound, Some(true));
        let sub = &g.subgraphs()[0];
        assert_eq!(sub.attrs.label.as_deref(), Some("A"));
        assert_eq!(sub.attrs.get("rank").as_deref(), Some("same"));
        assert_eq!(g.attrs.label, None);
    }

    #[test]
    fn tri_state_merge() {
        let g = parse_ok("digraph { a [label=\"x\", color=red]; a [color=\"\"]; }");
        let a = g.node("a").unwrap();
        assert_eq!(a.attrs.label.as_deref(), Some("x"));
        assert_eq!(a.attrs.color.as_deref(), Some(""));
        assert_eq!(a.attrs.fill_color, None);

        // Clearing every field leaves an empty set that prints bare.
        let mut g = g;
        let a = g.node_mut("a").unwrap();
        a.attrs.label = None;
        a.attrs.color = None;
        assert!(a.attrs.is_empty());
        assert_eq!(g.to_string(), "digraph {\n\t\"a\";\n}");
    }

    #[test]
    fn node_order_is_stable() {
        let g = parse_ok("digraph { a; b; c; b [label=B]; a -> c; }");
        assert_eq!(node_ids(&g), vec!["a", "b", "c"]);
    }

    #[test]
    fn keywords_in_quotes_are_ids() {
        let g = parse_ok("digraph { \"node\"; \"edge\" -> \"graph\"; }");
        assert_eq!(node_ids(&g), vec!["node", "edge", "graph"]);
    }

    #[test]
    fn html_and_comments() {
        let program = "# generated\n\
                       graph { // comment\n\
                       a [label=<<b>bold</b>>] /* more */ }";
        let g = parse_ok(program);
        assert_eq!(
            g.node("a").unwrap().attrs.label.as_deref(),
            Some("<b>bold</b>")
        );
    }

    #[test]
    fn parse_from_reader() {
        let g = gv::parse("strict graph \"my graph\" { a }".as_bytes()).unwrap();
        assert!(g.is_strict());
        assert_eq!(g.name(), Some("my graph"));
    }

    #[test]
    fn canonical_output() {
        let program = r#"digraph G {
            rankdir=LR;
            node [shape=box];
            edge [color=grey];
            subgraph cluster_0 { label="one"; a; b; a -> b; }
            c [label="say \"hi\""];
            a -> c:n [weight=2];
            c -- d;
        }"#;
        let expected = "digraph \"G\" {\n\
                        \trankdir=\"LR\";\n\
                        \tnode [shape=\"box\"];\n\
                        \tedge [color=\"grey\"];\n\
                        \tsubgraph \"cluster_0\" {\n\
                        \t\tlabel=\"one\";\n\
                        \t\t\"a\";\n\
                        \t\t\"b\";\n\
                        \t\t\"a\" -> \"b\";\n\
                        \t}\n\
                        \t\"c\" [label=\"say \\\"hi\\\"\"];\n\
                        \t\"d\";\n\
                        \t\"a\" -> \"c\" [headport=\"n\", weight=\"2\"];\n\
                        \t\"c\" -> \"d\";\n\
                        }";
        let first = parse_ok(program).to_string();
        assert_eq!(first, expected);

        // Printing is a fixed point after the first parse.
        let second = parse_ok(&first).to_string();
        assert_eq!(second, first);
    }

    // Printing, parsing the text and printing again must give the same text.
    fn assert_stable_output(g: &Graph) {
        let first = g.to_string();
        let second = parse_ok(&first).to_string();
        assert_eq!(second, first);
    }

    #[test]
    fn late_defaults_round_trip() {
        let g = parse_ok("digraph { a -> b; edge [color=red]; }");
        assert_eq!(g.edges()[0].attrs.color, None);
        assert_stable_output(&g);

        let g = parse_ok("digraph { a; node [shape=box]; b [shape=circle]; }");
        assert_eq!(g.node("a").unwrap().attrs.shape, None);
        assert_stable_output(&g);

        let g = parse_ok(
            "digraph { x -> y; \
             subgraph s { node [color=red]; edge [style=dashed]; z -> x; } }",
        );
        assert_stable_output(&g);
    }

    #[test]
    fn programmatic_defaults_round_trip() {
        use dotgraph::core::attrs::{EdgeAttributes, NodeAttributes};

        let mut g = Graph::new(true);
        g.node_defaults.shape = Some(Shape::Box);
        g.add_node(Node::new("a"));
        let mut round = NodeAttributes::default();
        round.shape = Some(Shape::Circle);
        g.add_node(Node::with_attributes("b", round));
        g.add_edge("a", "b", &[]);
        g.edge_defaults.color = Some("grey".to_string());
        let mut red = EdgeAttributes::default();
        red.color = Some("red".to_string());
        g.add_edge("b", "a", &[&red]);
        g.subgraph("cluster_0", |sg| {
            sg.add_node(Node::new("c"));
            sg.add_edge("c", "a", &[]);
        });

        let expected = "digraph {\n\
                        \tnode [shape=\"box\"];\n\
                        \tedge [color=\"grey\"];\n\
                        \tsubgraph \"cluster_0\" {\n\
                        \t\t\"c\";\n\
                        \t\t\"a\";\n\
                        \t\t\"c\" -> \"a\";\n\
                        \t}\n\
                        \t\"b\" [shape=\"circle\"];\n\
                        \t\"a\" -> \"b\";\n\
                        \t\"b\" -> \"a\" [color=\"red\"];\n\
                        }";
        assert_eq!(g.to_string(), expected);
        assert_stable_output(&g);
    }

    #[test]
    fn escaping_is_inverse_of_lexing() {
        let ids = ["path\\to\\file", "quote\"d", "multi\nline", "\\\"", "tab\there"];
        let mut g = Graph::new(false);
        for id in ids {
            g.add_node(Node::new(id));
        }
        let reparsed = parse_ok(&g.to_string());
        assert_eq!(node_ids(&reparsed), node_ids(&g));
    }

    #[test]
    fn error_missing_brace() {
        let err = gv::parse_string("digraph { a -> b;").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("end of input"), "{}", err);

        let err = gv::parse_string("digraph a -> b; }").unwrap_err();
        assert_eq!(err.message, "expected '{', found edge operator");
    }

    #[test]
    fn error_wrong_closing_token() {
        let err = gv::parse_string("digraph { a [color=red } }").unwrap_err();
        assert_eq!((err.line, err.col), (1, 24));
        assert_eq!(err.message, "expected an attribute name, found '}'");
    }

    #[test]
    fn error_bad_attribute_value() {
        let err = gv::parse_string("digraph {\n  a [fontsize=big];\n}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error at 2:15: invalid value \"big\" for attribute \"fontsize\": expected a number"
        );

        let err = gv::parse_string("graph { compound=maybe }").unwrap_err();
        assert!(err.message.contains("expected a boolean"), "{}", err);
    }

    #[test]
    fn error_illegal_character() {
        let err = gv::parse_string("digraph { a -> @; }").unwrap_err();
        assert_eq!(err.message, "unexpected character '@'");
        assert_eq!((err.line, err.col), (1, 16));
    }

    #[test]
    fn error_lone_dash() {
        let err = gv::parse_string("digraph { a - b; }").unwrap_err();
        assert_eq!(err.message, "unexpected character '-'");
        assert_eq!((err.line, err.col), (1, 13));
    }

    #[test]
    fn error_missing_header() {
        let mut parser = DotParser::new("{ a }");
        let err = parser.parse_graph().unwrap_err();
        assert_eq!(err.message, "expected 'graph' or 'digraph', found '{'");
    }

    #[test]
    fn parse_file_missing() {
        let err = gv::parse_file("/nonexistent/dir/missing.dot").unwrap_err();
        assert!(err.message.contains("failed to open file"), "{}", err);
        assert!(!err.has_location());
    }

    #[test]
    fn parse_file_roundtrip() {
        use dotgraph::core::utils::save_to_file;

        let mut g = Graph::new(true);
        g.set_name(Some("saved"));
        g.add_edge("a", "b", &[]);
        let path = std::env::temp_dir().join("dotgraph_parse_file_roundtrip.dot");
        let path = path.to_str().unwrap().to_string();
        save_to_file(&path, &g.to_string()).unwrap();

        let loaded = gv::parse_file(&path).unwrap();
        assert_eq!(loaded.to_string(), g.to_string());
        let _ = std::fs::remove_file(&path);
    }
}
