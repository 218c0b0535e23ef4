/*!

  Turning a netlist into a graph: emitting nodes and edges to a rendering
  backend, and analyses over the gate network.

*/

use crate::circuit::Gate;
use crate::error::{Error, Result};
use crate::netlist::Netlist;
use log::info;
use petgraph::algo::toposort;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A common trait of analyses than can be performed on a netlist.
/// An analysis becomes stale when the netlist is modified.
pub trait Analysis<'a>
where
    Self: Sized + 'a,
{
    /// Construct the analysis to the current state of the netlist.
    fn build(netlist: &'a Netlist) -> Result<Self>;
}

/// A backend that collects graph nodes and edges and renders them to a file.
pub trait GraphSink {
    /// Adds a node. Adding an id that already exists is a no-op.
    fn add_node(&mut self, id: &str);

    /// Adds a directed edge between two node ids
    fn add_edge(&mut self, from: &str, to: &str);

    /// Lays out the graph and writes it under `path`, returning the path of
    /// the final artifact.
    fn render(&mut self, path: &Path) -> Result<PathBuf>;
}

/// Returns the display label of a gate node: both inputs around the operator.
/// Distinct gates with the same inputs and operator share a label.
pub fn gate_label(gate: &Gate) -> String {
    format!("{} {} {}", gate.get_a(), gate.get_op(), gate.get_b())
}

/// Emits one node per wire, one node per gate label, and the edges
/// `a -> label`, `b -> label`, `label -> out` for every gate.
pub fn emit(netlist: &Netlist, sink: &mut impl GraphSink) {
    for (wire, _) in netlist.wires() {
        sink.add_node(wire);
    }
    for gate in netlist.gates() {
        let label = gate_label(gate);
        sink.add_node(&label);
        sink.add_edge(gate.get_a(), &label);
        sink.add_edge(gate.get_b(), &label);
        sink.add_edge(&label, gate.get_output());
    }
}

/// Options for running the layout engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// The graphviz executable, e.g. `dot` or `neato`
    pub engine: String,
    /// The output format passed as `-T`, e.g. `pdf` or `svg`
    pub format: String,
    /// Only write the DOT source and skip the layout engine
    pub source_only: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            engine: "dot".to_string(),
            format: "pdf".to_string(),
            source_only: false,
        }
    }
}

/// What an edge in a [DotGraph] connects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Any edge added through [GraphSink::add_edge]
    Wire,
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edge::Wire => write!(f, "wire"),
        }
    }
}

/// A [GraphSink] that builds a petgraph [DiGraph] and renders it with graphviz.
///
/// Nodes are identified by their label, so repeated ids collapse into one
/// node. Edges are not deduplicated.
#[derive(Debug, Clone, Default)]
pub struct DotGraph {
    graph: DiGraph<String, Edge>,
    mapping: HashMap<String, NodeIndex>,
    config: RenderConfig,
}

impl DotGraph {
    /// Creates an empty graph that renders with `config`
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Return a reference to the graph constructed so far
    pub fn get_graph(&self) -> &DiGraph<String, Edge> {
        &self.graph
    }

    /// Returns the index of the node with `id`, creating it if needed
    fn node(&mut self, id: &str) -> NodeIndex {
        match self.mapping.entry(id.to_string()) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => *e.insert(self.graph.add_node(id.to_string())),
        }
    }

    /// Returns the index of the node with `id`, if it exists
    pub fn find_node(&self, id: &str) -> Option<NodeIndex> {
        self.mapping.get(id).copied()
    }

    /// Returns the number of edges from `from` to `to`
    pub fn edges_between(&self, from: &str, to: &str) -> usize {
        match (self.find_node(from), self.find_node(to)) {
            (Some(s), Some(t)) => self.graph.edges_connecting(s, t).count(),
            _ => 0,
        }
    }

    /// Returns the graph as DOT source
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }

    /// Writes the DOT source to `path`
    pub fn write_source(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_dot()).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl GraphSink for DotGraph {
    fn add_node(&mut self, id: &str) {
        self.node(id);
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        let s = self.node(from);
        let t = self.node(to);
        self.graph.add_edge(s, t, Edge::Wire);
    }

    /// Writes the DOT source to `path`, then runs the layout engine to produce
    /// `<path>.<format>` next to it.
    fn render(&mut self, path: &Path) -> Result<PathBuf> {
        self.write_source(path)?;
        if self.config.source_only {
            info!("wrote {}", path.display());
            return Ok(path.to_path_buf());
        }

        let mut out = path.as_os_str().to_owned();
        out.push(".");
        out.push(&self.config.format);
        let out = PathBuf::from(out);

        let status = Command::new(&self.config.engine)
            .arg(format!("-T{}", self.config.format))
            .arg(path)
            .arg("-o")
            .arg(&out)
            .status()
            .map_err(|e| Error::Render(format!("could not run {}: {e}", self.config.engine)))?;
        if !status.success() {
            return Err(Error::Render(format!(
                "{} exited with {status}",
                self.config.engine
            )));
        }

        info!(
            "rendered {} nodes and {} edges to {}",
            self.graph.node_count(),
            self.graph.edge_count(),
            out.display()
        );
        Ok(out)
    }
}

/// A table that maps wires to the gates reading and driving them
pub struct FanOutTable<'a> {
    // A reference to the underlying netlist
    _netlist: &'a Netlist,
    // Maps a wire to the gates it feeds
    users: HashMap<&'a str, Vec<&'a Gate>>,
    // Maps a wire to the gates that drive it
    drivers: HashMap<&'a str, Vec<&'a Gate>>,
}

impl<'a> FanOutTable<'a> {
    /// Returns an iterator to the gates that read `wire`.
    pub fn get_wire_users(&self, wire: &str) -> impl Iterator<Item = &'a Gate> {
        self.users
            .get(wire)
            .into_iter()
            .flat_map(|users| users.iter().copied())
    }

    /// Returns an iterator to the gates that drive `wire`.
    pub fn get_wire_drivers(&self, wire: &str) -> impl Iterator<Item = &'a Gate> {
        self.drivers
            .get(wire)
            .into_iter()
            .flat_map(|drivers| drivers.iter().copied())
    }

    /// Returns `true` if any gate reads the wire
    pub fn wire_has_uses(&self, wire: &str) -> bool {
        self.users.get(wire).is_some_and(|u| !u.is_empty())
    }

    /// Returns the wires driven by more than one gate, sorted
    pub fn multiply_driven_wires(&self) -> Vec<&'a str> {
        let mut wires: Vec<&'a str> = self
            .drivers
            .iter()
            .filter(|(_, d)| d.len() > 1)
            .map(|(w, _)| *w)
            .collect();
        wires.sort_unstable();
        wires
    }
}

impl<'a> Analysis<'a> for FanOutTable<'a> {
    fn build(netlist: &'a Netlist) -> Result<Self> {
        let mut users: HashMap<&'a str, Vec<&'a Gate>> = HashMap::new();
        let mut drivers: HashMap<&'a str, Vec<&'a Gate>> = HashMap::new();

        for gate in netlist.gates() {
            for input in gate.inputs() {
                users.entry(input).or_default().push(gate);
            }
            drivers.entry(gate.get_output()).or_default().push(gate);
        }

        Ok(FanOutTable {
            _netlist: netlist,
            users,
            drivers,
        })
    }
}

/// Computes the logic level of every wire.
/// Undriven wires sit at level 0 and a gate output sits one above its
/// deepest input. Fails if the network has a combinational loop.
pub struct SimpleCombDepth<'a> {
    // A reference to the underlying netlist
    _netlist: &'a Netlist,
    // Maps a wire to its logic level
    comb_depth: HashMap<&'a str, usize>,
    /// The maximum depth of the circuit
    max_depth: usize,
}

impl SimpleCombDepth<'_> {
    /// Returns the logic level of a wire.
    pub fn get_comb_depth(&self, wire: &str) -> Option<usize> {
        self.comb_depth.get(wire).cloned()
    }

    /// Returns the maximum logic level of the circuit.
    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }
}

impl<'a> Analysis<'a> for SimpleCombDepth<'a> {
    fn build(netlist: &'a Netlist) -> Result<Self> {
        let mut graph: DiGraph<&'a str, ()> = DiGraph::new();
        let mut mapping = HashMap::new();
        for (wire, _) in netlist.wires() {
            mapping.insert(wire, graph.add_node(wire));
        }

        let mut drivers: HashMap<&'a str, Vec<&'a Gate>> = HashMap::new();
        for gate in netlist.gates() {
            let out = *mapping
                .get(gate.get_output())
                .ok_or_else(|| Error::MissingWire(gate.get_output().to_string()))?;
            for input in gate.inputs() {
                let i = *mapping
                    .get(input)
                    .ok_or_else(|| Error::MissingWire(input.to_string()))?;
                graph.add_edge(i, out, ());
            }
            drivers.entry(gate.get_output()).or_default().push(gate);
        }

        let order = toposort(&graph, None).map_err(|c| Error::Cycle(graph[c.node_id()].to_string()))?;

        let mut comb_depth: HashMap<&'a str, usize> = HashMap::new();
        for node in order {
            let wire = graph[node];
            let depth = drivers
                .get(wire)
                .into_iter()
                .flatten()
                .flat_map(|g| g.inputs())
                .filter_map(|i| comb_depth.get(i))
                .max()
                .map(|d| d + 1)
                .unwrap_or(0);
            comb_depth.insert(wire, depth);
        }

        let max_depth = comb_depth.values().max().cloned().unwrap_or(0);

        Ok(SimpleCombDepth {
            _netlist: netlist,
            comb_depth,
            max_depth,
        })
    }
}
