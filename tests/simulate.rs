use netviz::circuit::WireFamily;
use netviz::error::Error;
use netviz::parse::parse_str;
use netviz::simulate::{check_adder, simulate};

const LARGER_EXAMPLE: &str = "x00: 1
x01: 0
x02: 1
x03: 1
x04: 0
y00: 1
y01: 1
y02: 1
y03: 1
y04: 1

ntg XOR fgs -> mjb
y02 OR x01 -> tnw
kwq OR kpj -> z05
x00 OR x03 -> fst
tgd XOR rvg -> z01
vdt OR tnw -> bfw
bfw AND frj -> z10
ffh OR nrd -> bqk
y00 AND y03 -> djm
y03 OR y00 -> psh
bqk OR frj -> z08
tnw OR fst -> frj
gnj AND tgd -> z11
bfw XOR mjb -> z00
x03 OR x00 -> vdt
gnj AND wpb -> z02
x04 AND y00 -> kjc
djm OR pbm -> qhw
nrd AND vdt -> hwm
kjc AND fst -> rvg
y04 OR y02 -> fgs
y01 AND x02 -> pbm
ntg OR kjc -> kwq
psh XOR fgs -> tgd
qhw XOR tgd -> z09
pbm OR djm -> kpj
x03 XOR y03 -> ffh
x00 XOR y04 -> ntg
bfw OR bqk -> z06
nrd XOR fgs -> wpb
frj XOR qhw -> z04
bqk OR frj -> z07
y03 OR x01 -> nrd
hwm AND bqk -> z03
tgd XOR rvg -> z12
tnw OR pbm -> gnj
";

/// A two bit ripple carry adder. `swap` exchanges the outputs of the
/// carry-out gates so the circuit adds incorrectly.
fn two_bit_adder(x: u8, y: u8, swap: bool) -> String {
    let (c, z) = if swap { ("z02", "c01") } else { ("c01", "z02") };
    format!(
        "x00: {}\nx01: {}\ny00: {}\ny01: {}\n\n\
         x00 XOR y00 -> z00\n\
         x00 AND y00 -> c00\n\
         x01 XOR y01 -> s01\n\
         s01 XOR c00 -> z01\n\
         x01 AND y01 -> {c}\n\
         s01 AND c00 -> d01\n\
         {c} OR d01 -> {z}\n",
        x & 1,
        (x >> 1) & 1,
        y & 1,
        (y >> 1) & 1,
    )
}

#[test]
fn test_larger_example() {
    let netlist = parse_str(LARGER_EXAMPLE);
    assert_eq!(netlist.gate_count(), 36);
    let eval = simulate(&netlist).unwrap();
    assert_eq!(eval.bus(WireFamily::Z).unwrap().to_u128(), Some(2024));
    assert_eq!(eval.unresolved().count(), 0);
}

#[test]
fn test_half_adder() {
    let netlist = parse_str("x00: 1\ny00: 1\n\nx00 XOR y00 -> z00\nx00 AND y00 -> z01\n");
    assert_eq!(netlist.wire_count(), 4);
    assert_eq!(netlist.gate_count(), 2);
    let report = check_adder(&netlist).unwrap();
    assert!(report.is_correct());
    assert_eq!(report.actual.to_u128(), Some(2));
    assert_eq!(report.actual.to_string(), "2'b10");
}

#[test]
fn test_ripple_adder() {
    for x in 0..4 {
        for y in 0..4 {
            let netlist = parse_str(&two_bit_adder(x, y, false));
            let report = check_adder(&netlist).unwrap();
            assert!(report.is_correct(), "{x} + {y}");
            assert_eq!(report.actual.to_u128(), Some(u128::from(x + y)));
        }
    }
}

#[test]
fn test_swapped_outputs() {
    // 2 + 2: the carry lands on z02 directly, the OR output feeds nothing
    let netlist = parse_str(&two_bit_adder(2, 2, true));
    let report = check_adder(&netlist).unwrap();
    assert_eq!(report.expected.to_u128(), Some(4));
    assert!(report.is_correct());

    // 3 + 1: the only carry comes through d01, which z02 no longer sees
    let netlist = parse_str(&two_bit_adder(3, 1, true));
    let report = check_adder(&netlist).unwrap();
    assert_eq!(report.expected.to_u128(), Some(4));
    assert_eq!(report.actual.to_u128(), Some(0));
    assert_eq!(report.mismatched_bits(), [2]);
}

#[test]
fn test_unresolved_wire() {
    let netlist = parse_str("x00: 1\nx00 AND abc -> z00\n");
    let eval = simulate(&netlist).unwrap();
    assert_eq!(eval.value("z00"), None);
    assert_eq!(eval.unresolved().collect::<Vec<_>>(), ["abc", "z00"]);
    assert!(matches!(
        eval.bus(WireFamily::Z),
        Err(Error::Unresolved(w)) if w == "z00"
    ));
}

#[test]
fn test_unknown_operator() {
    let netlist = parse_str("x00: 1\ny00: 1\nx00 NAND y00 -> z00\n");
    assert!(matches!(
        simulate(&netlist),
        Err(Error::UnknownOperator(op)) if op == "NAND"
    ));
}
