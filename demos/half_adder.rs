use netviz::circuit::WireFamily;
use netviz::graph::{DotGraph, RenderConfig, emit};
use netviz::parse::parse_str;
use netviz::simulate::check_adder;

fn main() {
    let netlist = parse_str(
        "x00: 1
         y00: 1

         x00 XOR y00 -> z00
         x00 AND y00 -> z01",
    );

    // Two inputs, two outputs
    assert_eq!(netlist.family_count(WireFamily::X), 1);
    assert_eq!(netlist.family_count(WireFamily::Z), 2);

    let report = check_adder(&netlist).unwrap();
    eprintln!("{} + {} = {}", report.x, report.y, report.actual);

    // Print the DOT source instead of invoking graphviz
    let mut graph = DotGraph::new(RenderConfig::default());
    emit(&netlist, &mut graph);
    println!("{}", graph.to_dot());
}
