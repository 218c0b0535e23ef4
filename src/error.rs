/*!

  Errors produced while parsing, analyzing, simulating, and rendering circuits.

*/

use std::path::PathBuf;

/// The error type for every fallible operation in this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The circuit description could not be read.
    #[error("failed to read circuit from {path}")]
    Io {
        /// The path that was being read or written
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// The layout engine could not be run or exited unsuccessfully.
    #[error("failed to render graph: {0}")]
    Render(String),
    /// A gate references a wire that is missing from the wire map.
    #[error("gate references undeclared wire {0}")]
    MissingWire(String),
    /// The gate network contains a combinational loop.
    #[error("combinational cycle through wire {0}")]
    Cycle(String),
    /// A gate uses an operator that cannot be evaluated.
    #[error("unknown operator {0}")]
    UnknownOperator(String),
    /// A wire never received a value during simulation.
    #[error("wire {0} has no value after simulation")]
    Unresolved(String),
    /// A netlist could not be (de)serialized.
    #[cfg(feature = "serde")]
    #[error("encountered json error while (de)serializing netlist")]
    Json(#[from] serde_json::Error),
}

/// A specialized result type for circuit operations.
pub type Result<T> = std::result::Result<T, Error>;
