//! flowviz CLI entry point.

use std::fs;
use std::io::{self, Read, Write};
use std::process;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use log::{LevelFilter, debug};

use flowviz::{Graph, LayoutConfig, extract_code_block, layout, parse, sanitize, serialize};

/// What to print once the input is read.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Normalized flowchart DSL
    Dsl,
    /// Graph JSON
    Graph,
    /// Laid-out diagram JSON
    Layout,
    /// Sanitizer output only
    Sanitized,
}

/// Flowchart DSL to typed graph round-trip: sanitize, parse, lay out, serialize.
#[derive(Parser, Debug)]
#[command(name = "flowviz", version, about)]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Output form
    #[arg(long = "emit", value_enum, default_value_t = Emit::Dsl)]
    emit: Emit,

    /// Treat the input as a full assistant reply and pull the diagram out of it
    #[arg(long = "extract")]
    extract: bool,

    /// Input is a graph JSON document instead of DSL text
    #[arg(long = "from-json", conflicts_with = "extract")]
    from_json: bool,

    /// Layout config file (JSON); missing fields keep their defaults
    #[arg(long = "config")]
    config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

fn read_input(path: Option<&str>) -> String {
    match path {
        Some(path) => fs::read_to_string(path)
            .unwrap_or_else(|e| fail(format_args!("cannot read '{path}': {e}"))),
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                fail(format_args!("cannot read stdin: {e}"));
            }
            buf
        }
    }
}

fn load_config(path: Option<&str>) -> LayoutConfig {
    let Some(path) = path else {
        return LayoutConfig::default();
    };
    let text = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format_args!("cannot read '{path}': {e}")));
    LayoutConfig::from_json(&text)
        .unwrap_or_else(|e| fail(format_args!("invalid config '{path}': {e}")))
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(mut json) => {
            json.push('\n');
            json
        }
        Err(e) => fail(e),
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    let text = read_input(cli.input.as_deref());
    let config = load_config(cli.config.as_deref());

    let graph: Graph = if cli.from_json {
        serde_json::from_str(&text).unwrap_or_else(|e| fail(format_args!("invalid graph JSON: {e}")))
    } else {
        let clean = if cli.extract {
            extract_code_block(&text)
        } else {
            sanitize(&text)
        };
        if cli.emit == Emit::Sanitized {
            write_output(cli.output.as_deref(), &format!("{clean}\n"));
            return;
        }
        parse(&clean).unwrap_or_else(|e| fail(e))
    };
    debug!(nodes = graph.node_count(), edges = graph.edge_count(); "Graph ready");

    let rendered = match cli.emit {
        Emit::Dsl => serialize(&graph),
        Emit::Graph => to_json(&graph),
        Emit::Layout => to_json(&layout(&graph, &config)),
        Emit::Sanitized => format!("{}\n", sanitize(&serialize(&graph))),
    };
    write_output(cli.output.as_deref(), &rendered);
}

fn write_output(path: Option<&str>, rendered: &str) {
    match path {
        Some(path) => {
            if let Err(e) = fs::write(path, rendered) {
                fail(format_args!("cannot write '{path}': {e}"));
            }
        }
        None => {
            print!("{rendered}");
            if let Err(e) = io::stdout().flush() {
                fail(format_args!("cannot flush stdout: {e}"));
            }
        }
    }
}
