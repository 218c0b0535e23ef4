/*!

  Evaluating a gate network from its initial wire values, and checking
  whether it behaves as an adder of its `x` and `y` buses.

*/

use crate::circuit::{Bus, Gate, Operator, WireFamily};
use crate::error::{Error, Result};
use crate::netlist::Netlist;
use bitvec::vec::BitVec;
use log::{debug, trace};
use std::collections::HashMap;

/// The wire values reached after simulating a netlist
#[derive(Debug, Clone)]
pub struct Evaluation<'a> {
    netlist: &'a Netlist,
    values: HashMap<&'a str, u8>,
}

impl<'a> Evaluation<'a> {
    /// Returns the value of a wire, or `None` if it never resolved
    pub fn value(&self, wire: &str) -> Option<u8> {
        self.values.get(wire).copied()
    }

    /// Returns the wires of the netlist that never received a value
    pub fn unresolved(&self) -> impl Iterator<Item = &'a str> {
        self.netlist
            .wires()
            .map(|(w, _)| w)
            .filter(move |w| !self.values.contains_key(w))
    }

    /// Reads every wire of `family` as a bus, least significant bit first.
    pub fn bus(&self, family: WireFamily) -> Result<Bus> {
        let mut bits = BitVec::new();
        for wire in self.netlist.family_wires(family) {
            let v = self
                .value(wire)
                .ok_or_else(|| Error::Unresolved(wire.to_string()))?;
            bits.push(v != 0);
        }
        Ok(Bus::new(bits))
    }
}

/// Fires every gate whose inputs are known, repeating until nothing changes.
///
/// ```
/// use netviz::{circuit::WireFamily, parse::parse_str, simulate::simulate};
///
/// let netlist = parse_str("x00: 1\ny00: 1\nx00 AND y00 -> z00\nx00 XOR y00 -> z01\n");
/// let eval = simulate(&netlist).unwrap();
/// assert_eq!(eval.bus(WireFamily::Z).unwrap().to_u128(), Some(1));
/// ```
pub fn simulate(netlist: &Netlist) -> Result<Evaluation<'_>> {
    let mut values: HashMap<&str, u8> = netlist
        .wires()
        .filter_map(|(w, v)| v.map(|v| (w, v)))
        .collect();

    let mut pending: Vec<(&Gate, Operator)> = netlist
        .gates()
        .map(|g| g.operator().map(|op| (g, op)))
        .collect::<Result<_>>()?;

    let mut rounds = 0;
    loop {
        let before = pending.len();
        pending.retain(|(gate, op)| {
            let (Some(a), Some(b)) = (values.get(gate.get_a()), values.get(gate.get_b())) else {
                return true;
            };
            let v = op.apply(*a, *b);
            trace!("{gate} = {v}");
            values.insert(gate.get_output(), v);
            false
        });
        rounds += 1;
        if pending.is_empty() || pending.len() == before {
            break;
        }
    }

    debug!(
        "simulation settled after {rounds} rounds, {} gates never fired",
        pending.len()
    );

    Ok(Evaluation { netlist, values })
}

/// Compares the simulated `z` bus against `x + y`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdderReport {
    /// The `x` operand
    pub x: Bus,
    /// The `y` operand
    pub y: Bus,
    /// The sum the circuit should produce
    pub expected: Bus,
    /// The `z` bus the circuit produced
    pub actual: Bus,
}

impl AdderReport {
    /// Returns the bit positions where `z` differs from `x + y`
    pub fn mismatched_bits(&self) -> Vec<usize> {
        let width = self.expected.width().max(self.actual.width());
        (0..width)
            .filter(|&i| self.expected.bit(i) != self.actual.bit(i))
            .collect()
    }

    /// Returns `true` if the circuit added its inputs correctly
    pub fn is_correct(&self) -> bool {
        self.mismatched_bits().is_empty()
    }
}

/// Simulates the netlist and checks it as an adder of `x` and `y` into `z`.
pub fn check_adder(netlist: &Netlist) -> Result<AdderReport> {
    let eval = simulate(netlist)?;
    let x = eval.bus(WireFamily::X)?;
    let y = eval.bus(WireFamily::Y)?;
    let actual = eval.bus(WireFamily::Z)?;
    let expected = x.add(&y);
    Ok(AdderReport {
        x,
        y,
        expected,
        actual,
    })
}
