//! Error type shared by the derivative engine and its collaborators.

use thiserror::Error;

use crate::order::Order;

pub type Result<T> = std::result::Result<T, ZModelError>;

#[derive(Error, Debug)]
pub enum ZModelError {
    /// The surface metric lost positive definiteness at a node.
    #[error("degenerate surface at node ({i}, {j}): deth = {deth:e}")]
    DegenerateGeometry { i: isize, j: isize, deth: f64 },

    /// A field does not match the node layout of the engine's mesh.
    #[error("field `{field}` does not match the mesh layout: expected {expected}, found {found}")]
    LayoutMismatch {
        field: String,
        expected: String,
        found: String,
    },

    /// Failure reported by a halo, boundary or far-field collaborator.
    #[error("collaborator failed: {0}")]
    Collaborator(String),

    #[error("{order:?} order requires a far-field solver")]
    MissingFarFieldSolver { order: Order },

    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("invalid boundary configuration: {0}")]
    InvalidBoundary(String),
}
