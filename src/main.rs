use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use netviz::circuit::WireFamily;
use netviz::graph::{DotGraph, GraphSink, RenderConfig, emit};
use std::path::PathBuf;

/// Draw a boolean gate network with graphviz
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The circuit description to read
    #[arg(default_value = "input")]
    input: PathBuf,

    /// Where to write the DOT source; the rendering lands next to it
    #[arg(short, long, default_value = "graph.gv")]
    output: PathBuf,

    /// The graphviz output format
    #[arg(long, default_value = "pdf")]
    format: String,

    /// The graphviz layout engine
    #[arg(long, default_value = "dot")]
    engine: String,

    /// Only write the DOT source
    #[arg(long)]
    source_only: bool,

    /// Print wire counts and check the circuit as an adder
    #[arg(long)]
    summary: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn summarize(netlist: &netviz::netlist::Netlist) {
    println!(
        "x bits: {}, y bits: {}, z bits: {}",
        netlist.family_count(WireFamily::X),
        netlist.family_count(WireFamily::Y),
        netlist.family_count(WireFamily::Z)
    );

    match netviz::simulate::check_adder(netlist) {
        Ok(report) if report.is_correct() => {
            println!("{} + {} = {}", report.x, report.y, report.actual);
        }
        Ok(report) => {
            println!(
                "expected {} but got {}; wrong bits: {:?}",
                report.expected,
                report.actual,
                report.mismatched_bits()
            );
        }
        Err(e) => warn!("cannot check adder: {e}"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::new().parse_filters("debug").init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let netlist = netviz::parse::parse_file(&args.input)
        .with_context(|| format!("Failed to parse circuit in {}", args.input.display()))?;

    if args.summary {
        summarize(&netlist);
    }

    let mut graph = DotGraph::new(RenderConfig {
        engine: args.engine,
        format: args.format,
        source_only: args.source_only,
    });
    emit(&netlist, &mut graph);
    let out = graph
        .render(&args.output)
        .with_context(|| format!("Failed to render {}", args.output.display()))?;
    println!("{}", out.display());

    Ok(())
}
