/*!

  The netlist container: a wire map plus a set of gates.

*/

use crate::{
    circuit::{Gate, WireFamily, WireValue},
    error::{Error, Result},
    graph::Analysis,
};
use std::collections::{BTreeSet, HashMap};

/// A boolean gate network as read from a circuit description.
///
/// Wires are kept in the order they were first seen. Every wire referenced
/// by a gate is present in the wire map, possibly with an unknown value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Netlist {
    /// Wire names and values, in first-insertion order
    wires: Vec<(String, WireValue)>,
    /// Maps a wire name to its position in `wires`
    index: HashMap<String, usize>,
    /// The gates, duplicates collapsed
    gates: BTreeSet<Gate>,
}

impl Netlist {
    /// Creates an empty netlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a wire, inserting it if needed. A later assignment
    /// overwrites an earlier one.
    pub fn set_wire(&mut self, name: &str, value: WireValue) {
        match self.index.get(name) {
            Some(&i) => self.wires[i].1 = value,
            None => {
                self.index.insert(name.to_string(), self.wires.len());
                self.wires.push((name.to_string(), value));
            }
        }
    }

    /// Inserts a wire with an unknown value, unless it already exists.
    /// Returns `true` if the wire was inserted.
    pub fn ensure_wire(&mut self, name: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.set_wire(name, None);
        true
    }

    /// Inserts a gate and all of the wires it touches.
    /// Returns `false` if an identical gate was already present.
    pub fn insert_gate(&mut self, gate: Gate) -> bool {
        for w in gate.wires() {
            self.ensure_wire(w);
        }
        self.gates.insert(gate)
    }

    /// Returns `true` if the wire is in the wire map
    pub fn contains_wire(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the value of a wire, or `None` if the wire does not exist.
    /// A wire that exists but is unset yields `Some(None)`.
    pub fn get_wire(&self, name: &str) -> Option<WireValue> {
        self.index.get(name).map(|&i| self.wires[i].1)
    }

    /// Returns an iterator over wire names and values in first-insertion order
    pub fn wires(&self) -> impl Iterator<Item = (&str, WireValue)> {
        self.wires.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Returns an iterator over the gates
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.iter()
    }

    /// Returns the number of wires
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Returns the number of distinct gates
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Returns the number of wires belonging to `family`
    pub fn family_count(&self, family: WireFamily) -> usize {
        self.wires
            .iter()
            .filter(|(n, _)| WireFamily::of(n) == family)
            .count()
    }

    /// Returns the names of the wires of `family`, sorted
    pub fn family_wires(&self, family: WireFamily) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .wires
            .iter()
            .map(|(n, _)| n.as_str())
            .filter(|n| WireFamily::of(n) == family)
            .collect();
        names.sort_unstable();
        names
    }

    /// Checks that every wire referenced by a gate is in the wire map.
    pub fn verify(&self) -> Result<()> {
        for gate in &self.gates {
            if let Some(w) = gate.wires().into_iter().find(|w| !self.contains_wire(w)) {
                return Err(Error::MissingWire(w.to_string()));
            }
        }
        Ok(())
    }

    /// Builds an analysis over the current state of the netlist.
    pub fn get_analysis<'a, A: Analysis<'a>>(&'a self) -> Result<A> {
        A::build(self)
    }

    #[cfg(feature = "serde")]
    /// Serializes the netlist as json to a writer.
    pub fn serialize(&self, writer: impl std::io::Write) -> Result<()> {
        serde::netlist_serialize(self, writer)
    }

    #[cfg(feature = "serde")]
    /// Deserializes a netlist from json and verifies it.
    pub fn deserialize(reader: impl std::io::Read) -> Result<Self> {
        serde::netlist_deserialize(reader)
    }
}

impl std::fmt::Display for Netlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, value) in self.wires.iter() {
            if let Some(v) = value {
                writeln!(f, "{name}: {v}")?;
            }
        }
        writeln!(f)?;
        for gate in self.gates.iter() {
            writeln!(f, "{gate}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
/// Serde support for netlists
pub mod serde {
    use super::Netlist;
    use crate::{
        circuit::{Gate, WireValue},
        error::Result,
    };
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct SerdeNetlist {
        /// Wire names and values, in first-insertion order
        wires: Vec<(String, WireValue)>,
        /// The gates
        gates: Vec<Gate>,
    }

    impl From<&Netlist> for SerdeNetlist {
        fn from(value: &Netlist) -> Self {
            SerdeNetlist {
                wires: value.wires.clone(),
                gates: value.gates.iter().cloned().collect(),
            }
        }
    }

    impl From<SerdeNetlist> for Netlist {
        fn from(value: SerdeNetlist) -> Self {
            let mut netlist = Netlist::new();
            for (name, v) in value.wires {
                netlist.set_wire(&name, v);
            }
            // Bypass insert_gate so that verify() sees the gates as stored
            netlist.gates = value.gates.into_iter().collect();
            netlist
        }
    }

    /// Serialize the netlist into the writer.
    pub fn netlist_serialize(netlist: &Netlist, writer: impl std::io::Write) -> Result<()> {
        let sobj = SerdeNetlist::from(netlist);
        serde_json::to_writer_pretty(writer, &sobj)?;
        Ok(())
    }

    /// Deserialize a netlist from the reader.
    pub fn netlist_deserialize(reader: impl std::io::Read) -> Result<Netlist> {
        let sobj: SerdeNetlist = serde_json::from_reader(reader)?;
        let netlist = Netlist::from(sobj);
        netlist.verify()?;
        Ok(netlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(a: &str, op: &str, b: &str, out: &str) -> Gate {
        Gate::new(a.into(), b.into(), op.into(), out.into())
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut netlist = Netlist::new();
        netlist.set_wire("y00", Some(1));
        netlist.insert_gate(gate("x00", "AND", "y00", "z00"));
        netlist.set_wire("x00", Some(0));
        let names: Vec<_> = netlist.wires().map(|(n, _)| n).collect();
        assert_eq!(names, ["y00", "x00", "z00"]);
        assert_eq!(netlist.get_wire("x00"), Some(Some(0)));
        assert_eq!(netlist.get_wire("z00"), Some(None));
        assert_eq!(netlist.get_wire("q00"), None);
    }

    #[test]
    fn duplicate_gates_collapse() {
        let mut netlist = Netlist::new();
        assert!(netlist.insert_gate(gate("a00", "OR", "b00", "c00")));
        assert!(!netlist.insert_gate(gate("a00", "OR", "b00", "c00")));
        assert_eq!(netlist.gate_count(), 1);
        assert!(netlist.verify().is_ok());
    }
}
