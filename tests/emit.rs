use netviz::graph::{DotGraph, GraphSink, RenderConfig, emit, gate_label};
use netviz::parse::parse_str;
use std::path::{Path, PathBuf};

/// Records every call so emission can be inspected without graphviz
#[derive(Default)]
struct Recorder {
    nodes: Vec<String>,
    edges: Vec<(String, String)>,
    rendered: Vec<PathBuf>,
}

impl GraphSink for Recorder {
    fn add_node(&mut self, id: &str) {
        self.nodes.push(id.to_string());
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        self.edges.push((from.to_string(), to.to_string()));
    }

    fn render(&mut self, path: &Path) -> netviz::error::Result<PathBuf> {
        self.rendered.push(path.to_path_buf());
        Ok(path.to_path_buf())
    }
}

fn edge(from: &str, to: &str) -> (String, String) {
    (from.to_string(), to.to_string())
}

#[test]
fn test_single_gate_emission() {
    let netlist = parse_str("x00: 1\ny00: 0\nx00 AND y00 -> z00\n");
    let mut rec = Recorder::default();
    emit(&netlist, &mut rec);

    assert_eq!(rec.nodes, ["x00", "y00", "z00", "x00 AND y00"]);
    assert_eq!(
        rec.edges,
        [
            edge("x00", "x00 AND y00"),
            edge("y00", "x00 AND y00"),
            edge("x00 AND y00", "z00"),
        ]
    );
    assert!(rec.rendered.is_empty());
}

#[test]
fn test_label_collision() {
    let netlist = parse_str("aaa AND bbb -> ccc\naaa AND bbb -> ddd\n");
    let mut graph = DotGraph::default();
    emit(&netlist, &mut graph);

    let g = graph.get_graph();
    // aaa, bbb, ccc, ddd and one shared gate node
    assert_eq!(g.node_count(), 5);
    assert_eq!(g.edge_count(), 6);
    assert_eq!(graph.edges_between("aaa AND bbb", "ccc"), 1);
    assert_eq!(graph.edges_between("aaa AND bbb", "ddd"), 1);
    assert_eq!(graph.edges_between("aaa", "aaa AND bbb"), 2);
}

#[test]
fn test_label_format() {
    let netlist = parse_str("kjc XOR fst -> rvg");
    let gate = netlist.gates().next().unwrap();
    assert_eq!(gate_label(gate), "kjc XOR fst");
}

#[test]
fn test_dot_source() {
    let netlist = parse_str("x00: 1\ny00: 1\nx00 XOR y00 -> z00\n");
    let mut graph = DotGraph::default();
    emit(&netlist, &mut graph);
    let dot = graph.to_dot();
    assert!(dot.starts_with("digraph"));
    for label in ["x00", "y00", "z00", "x00 XOR y00"] {
        assert!(dot.contains(&format!("\"{label}\"")), "{label} missing from {dot}");
    }
}

#[test]
fn test_render_source_only() {
    let netlist = parse_str("x00 OR y00 -> z00");
    let mut graph = DotGraph::new(RenderConfig {
        source_only: true,
        ..RenderConfig::default()
    });
    emit(&netlist, &mut graph);

    let path = std::env::temp_dir().join(format!("netviz-graph-{}.gv", std::process::id()));
    let out = graph.render(&path).unwrap();
    assert_eq!(out, path);
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(written, graph.to_dot());
}

#[test]
fn test_render_missing_engine() {
    let netlist = parse_str("x00 OR y00 -> z00");
    let mut graph = DotGraph::new(RenderConfig {
        engine: "netviz-no-such-layout-engine".to_string(),
        ..RenderConfig::default()
    });
    emit(&netlist, &mut graph);

    let path = std::env::temp_dir().join(format!("netviz-missing-{}.gv", std::process::id()));
    let err = graph.render(&path).unwrap_err();
    let _ = std::fs::remove_file(&path);
    assert!(matches!(err, netviz::error::Error::Render(_)));
}
