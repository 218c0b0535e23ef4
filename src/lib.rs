#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs, unreachable_pub)]
/*!

`netviz`

Reads boolean gate networks written as wire initializations (`x00: 1`) and
gate definitions (`x00 AND y00 -> z00`), and draws them with graphviz. Every
wire becomes a node, every gate becomes a node labelled with its inputs and
operator, and edges run from the input wires through the gate to its output.

The netlist can also be simulated and checked as an adder of its `x` and `y`
buses into `z`.

*/
#![doc = "## Simple Example\n```no_run"]
#![doc = include_str!("../demos/half_adder.rs")]
#![doc = "\n```"]

pub mod circuit;
pub mod error;
pub mod graph;
pub mod netlist;
pub mod parse;
pub mod simulate;
pub mod util;
