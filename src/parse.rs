/*!

  Reads circuit descriptions made of wire initializations (`x00: 1`) and
  gate definitions (`x00 AND y00 -> z00`).

*/

use crate::{
    circuit::Gate,
    error::{Error, Result},
    netlist::Netlist,
};
use log::{debug, info};
use regex::Regex;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Matches `NAME: DIGIT`
const WIRE_PATTERN: &str = r"^(\w\w\w): (\d)";
/// Matches `NAME OP NAME -> NAME`
const GATE_PATTERN: &str = r"^(\w\w\w) (\D+) (\w\w\w) -> (\w\w\w)";

/// A classified line of a circuit description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Sets the initial value of a wire
    Wire(String, u8),
    /// Defines a gate
    Gate(Gate),
    /// Matches neither shape
    Ignored,
}

/// Counts of what a parse consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Wire initialization lines
    pub wire_lines: usize,
    /// Gate definition lines
    pub gate_lines: usize,
    /// Non-blank lines matching neither shape
    pub ignored_lines: usize,
}

/// Line classifier for circuit descriptions.
///
/// ```
/// use netviz::parse::Parser;
///
/// let (netlist, stats) = Parser::new().parse_str("x00: 1\ny00: 0\n\nx00 XOR y00 -> z00\n");
/// assert_eq!(netlist.wire_count(), 3);
/// assert_eq!(netlist.gate_count(), 1);
/// assert_eq!(stats.ignored_lines, 0);
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    wire_re: Regex,
    gate_re: Regex,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Creates a parser
    pub fn new() -> Self {
        Self {
            wire_re: Regex::new(WIRE_PATTERN).expect("wire pattern is valid"),
            gate_re: Regex::new(GATE_PATTERN).expect("gate pattern is valid"),
        }
    }

    /// Classifies a single line. Surrounding whitespace is ignored, and so is
    /// anything trailing a recognized statement.
    pub fn parse_line(&self, line: &str) -> Line {
        let line = line.trim();
        if let Some(caps) = self.wire_re.captures(line) {
            // Non-ASCII digits match `\d` but carry no value
            if let Ok(value) = caps[2].parse::<u8>() {
                return Line::Wire(caps[1].to_string(), value);
            }
        }
        if let Some(caps) = self.gate_re.captures(line) {
            return Line::Gate(Gate::new(
                caps[1].to_string(),
                caps[3].to_string(),
                caps[2].to_string(),
                caps[4].to_string(),
            ));
        }
        Line::Ignored
    }

    /// Adds one line to the netlist, updating `stats`
    fn consume(&self, line: &str, netlist: &mut Netlist, stats: &mut ParseStats) {
        if line.trim().is_empty() {
            return;
        }
        match self.parse_line(line) {
            Line::Wire(name, value) => {
                stats.wire_lines += 1;
                netlist.set_wire(&name, Some(value));
            }
            Line::Gate(gate) => {
                stats.gate_lines += 1;
                netlist.insert_gate(gate);
            }
            Line::Ignored => {
                stats.ignored_lines += 1;
                debug!("skipping unrecognized line {:?}", line.trim());
            }
        }
    }

    /// Parses a whole description held in memory
    pub fn parse_str(&self, text: &str) -> (Netlist, ParseStats) {
        let mut netlist = Netlist::new();
        let mut stats = ParseStats::default();
        for line in text.lines() {
            self.consume(line, &mut netlist, &mut stats);
        }
        (netlist, stats)
    }

    /// Parses a description from a buffered reader. `origin` names the source
    /// in errors.
    pub fn parse_reader(
        &self,
        reader: impl BufRead,
        origin: &Path,
    ) -> Result<(Netlist, ParseStats)> {
        let mut netlist = Netlist::new();
        let mut stats = ParseStats::default();
        for line in reader.lines() {
            let line = line.map_err(|source| Error::Io {
                path: origin.to_path_buf(),
                source,
            })?;
            self.consume(&line, &mut netlist, &mut stats);
        }
        info!(
            "parsed {}: {} wires, {} gates, {} lines ignored",
            origin.display(),
            netlist.wire_count(),
            netlist.gate_count(),
            stats.ignored_lines
        );
        Ok((netlist, stats))
    }

    /// Parses the description stored at `path`
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Netlist, ParseStats)> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_reader(BufReader::new(file), path)
    }
}

/// Parses the description stored at `path` with a default parser.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Netlist> {
    Parser::new().parse_file(path).map(|(netlist, _)| netlist)
}

/// Parses a description held in memory with a default parser.
pub fn parse_str(text: &str) -> Netlist {
    Parser::new().parse_str(text).0
}
