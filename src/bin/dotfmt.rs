//! This is the command line tool that loads '.dot' files, checks them, and
//! saves them back out in canonical form.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{Arg, ArgAction, ArgMatches, Command};
use dotgraph::core::attrs::Attributes;
use dotgraph::core::graph::Graph;
use dotgraph::core::subgraph::Subgraph;
use dotgraph::core::utils::save_to_file;
use dotgraph::gv;
use log::LevelFilter;
use std::io;
use std::process::ExitCode;

#[derive(Debug, PartialEq, Eq)]
struct CLIOptions {
    input_path: String,
    output_path: Option<String>,
    summary: bool,
    check_only: bool,
    debug_mode: bool,
}

impl CLIOptions {
    pub fn new() -> Self {
        Self {
            input_path: String::new(),
            output_path: None,
            summary: false,
            check_only: false,
            debug_mode: false,
        }
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        let mut cli = CLIOptions::new();
        cli.debug_mode = matches.get_flag("debug");
        cli.summary = matches.get_flag("summary");
        cli.check_only = matches.get_flag("check");
        cli.output_path = matches.get_one::<String>("output").cloned();
        if let Some(input) = matches.get_one::<String>("INPUT") {
            cli.input_path = input.clone();
        }
        cli
    }
}

fn build_cli() -> Command {
    Command::new("dotfmt")
        .version("1.x")
        .about("Checks and reformats GraphViz DOT files")
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enables debug logging"),
        )
        .arg(
            Arg::new("summary")
                .short('s')
                .long("summary")
                .action(ArgAction::SetTrue)
                .help("Log the structure of the graph"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .action(ArgAction::SetTrue)
                .help("Only parse the input, don't write any output"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file (default: stdout)"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use ('-' for stdin)")
                .required(true)
                .index(1),
        )
}

fn log_subgraph(graph: &Graph, sub: &Subgraph, indent: usize) {
    let kind = if sub.is_cluster() { "Cluster" } else { "Subgraph" };
    log::info!(
        "{}{} {:?}: {} nodes, {} edges, {} attributes",
        " ".repeat(indent),
        kind,
        sub.name().unwrap_or(""),
        graph.subgraph_nodes(sub).count(),
        sub.edge_indices().len(),
        sub.attrs.entries().len()
    );
    for child in sub.subgraphs() {
        log_subgraph(graph, child, indent + 2);
    }
}

fn log_summary(graph: &Graph) {
    let kind = if graph.is_directed() { "digraph" } else { "graph" };
    log::info!(
        "{}{} {:?}: {} nodes, {} edges, {} subgraphs",
        if graph.is_strict() { "strict " } else { "" },
        kind,
        graph.name().unwrap_or(""),
        graph.num_nodes(),
        graph.num_edges(),
        graph.subgraphs().len()
    );
    for sub in graph.subgraphs() {
        log_subgraph(graph, sub, 2);
    }
}

fn read_input(input_path: &str) -> Result<String, io::Error> {
    if input_path == "-" {
        let mut contents = String::new();
        io::Read::read_to_string(&mut io::stdin(), &mut contents)?;
        return Ok(contents);
    }
    std::fs::read_to_string(input_path)
}

fn write_output(graph: &Graph, options: &CLIOptions) -> Result<(), io::Error> {
    match &options.output_path {
        Some(path) => save_to_file(path, &format!("{}\n", graph)),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            gv::write_dot(graph, &mut handle)?;
            io::Write::write_all(&mut handle, b"\n")
        }
    }
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    let cli = CLIOptions::from_matches(&matches);

    let mut logger = env_logger::builder();
    logger.format_timestamp(None);
    logger.filter_level(LevelFilter::Info);
    logger.parse_default_env();
    if cli.debug_mode {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let contents = match read_input(&cli.input_path) {
        Ok(contents) => contents,
        Err(err) => {
            log::error!("Could not read the file {}", cli.input_path);
            log::error!("Error {}", err);
            return ExitCode::FAILURE;
        }
    };

    let graph = match gv::parse_string(&contents) {
        Ok(graph) => graph,
        Err(err) => {
            let context = gv::error_context(&contents, &err);
            if !context.is_empty() {
                log::error!("\n{}", context);
            }
            log::error!("{}: {}", cli.input_path, err);
            return ExitCode::FAILURE;
        }
    };

    if cli.summary {
        log_summary(&graph);
    }

    if cli.check_only {
        log::info!("{}: ok", cli.input_path);
        return ExitCode::SUCCESS;
    }

    if let Err(err) = write_output(&graph, &cli) {
        log::error!("Could not write the output");
        log::error!("Error {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[test]
fn test_cli_options() {
    let matches = build_cli()
        .try_get_matches_from(["dotfmt", "-d", "--check", "in.dot"])
        .unwrap();
    let cli = CLIOptions::from_matches(&matches);
    assert_eq!(cli.input_path, "in.dot");
    assert!(cli.debug_mode);
    assert!(cli.check_only);
    assert!(!cli.summary);
    assert_eq!(cli.output_path, None);

    let matches = build_cli()
        .try_get_matches_from(["dotfmt", "-s", "-o", "out.dot", "-"])
        .unwrap();
    let cli = CLIOptions::from_matches(&matches);
    assert_eq!(cli.input_path, "-");
    assert_eq!(cli.output_path.as_deref(), Some("out.dot"));
    assert!(cli.summary);

    // The input is required.
    assert!(build_cli().try_get_matches_from(["dotfmt"]).is_err());
}
