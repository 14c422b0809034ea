//! Error types used by the crate.

use thiserror::Error;

use crate::geometry_type::GeometryKind;

/// Result type with [`GeometryError`] as the error.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Error enum.
///
/// Every variant describes a precondition violation detected at the API boundary. Since all
/// "mutating" operations build new values, the receiver of a failed call is always unchanged.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// A vertex or part id has the wrong number of components for the geometry kind.
    #[error("vertex id for {kind} must have length {expected}, got {actual:?}")]
    Arity {
        /// Kind of the geometry the id was applied to.
        kind: GeometryKind,
        /// Human readable expected length.
        expected: &'static str,
        /// The id that was given.
        actual: Vec<isize>,
    },
    /// Ring, part or vertex index is out of range.
    #[error("{what} index must be between 0 and {count} not {index}")]
    Range {
        /// What was indexed ("ring", "part", "vertex").
        what: &'static str,
        /// The requested index.
        index: isize,
        /// Number of available items.
        count: usize,
    },
    /// The operation would leave a geometry with fewer vertices than its kind requires.
    #[error("{0}")]
    StructuralMinimum(String),
    /// A geometry cannot be viewed or converted as another kind.
    #[error("cannot convert {from} to {to}")]
    KindMismatch {
        /// Kind of the source geometry.
        from: GeometryKind,
        /// Requested kind.
        to: GeometryKind,
    },
    /// A flat coordinate array length is not a multiple of the axis count.
    #[error("expecting a multiple of {axis_count} coordinates, got {len}")]
    Coordinates {
        /// Number of values per vertex.
        axis_count: usize,
        /// Length of the given array.
        len: usize,
    },
    /// Linear ring is not closed.
    #[error("linear ring must be closed, first vertex {first:?} != last vertex {last:?}")]
    NotClosed {
        /// XY of the first vertex.
        first: [f64; 2],
        /// XY of the last vertex.
        last: [f64; 2],
    },
    /// A computation has no finite result, e.g. intersection of parallel lines.
    #[error("{context}")]
    NotRepresentable {
        /// Description of the inputs that failed.
        context: String,
        /// Underlying failure.
        #[source]
        source: NotRepresentable,
    },
    /// Text could not be parsed.
    #[error("failed to parse text")]
    Parse(#[from] ParseError),
    /// No projection operation is available between two coordinate systems.
    #[error("cannot project from srid {source_srid} to srid {target_srid}")]
    Projection {
        /// SRID of the source geometry.
        source_srid: i32,
        /// SRID of the target factory.
        target_srid: i32,
    },
    /// External service failed.
    #[error("collaborator failed: {0}")]
    Collaborator(String),
}

/// Failure of a homogeneous coordinate computation.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("result is not representable")]
pub struct NotRepresentable;

/// Error in a text representation of a bounding box.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} at position {position}")]
pub struct ParseError {
    /// Byte offset in the input where parsing failed.
    pub position: usize,
    /// What the parser expected.
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}
