//! Ghost-cell boundary conditions on the edges of the local domain.

use serde::Deserialize;

use crate::error::{Result, ZModelError};
use crate::mesh::{Mesh, NodeField};

/// Condition on one edge of the surface.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryType {
    /// Ghosts come from the opposite edge through the halo exchange.
    Periodic,
    /// Odd reflection about the edge node: `f(-k) = 2 f(0) - f(k)`.
    Fixed,
    /// Linear extrapolation: `f(-k) = (k+1) f(0) - k f(1)`.
    Free,
}

/// What a field holds. Position ghosts across a periodic seam need the
/// period added back to the wrapped coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Position,
    Vorticity,
    Scalar,
}

/// Ghost-cell fill applied after the halo exchange.
///
/// Must be called on a freshly gathered field: periodic position offsets are
/// added to the wrapped ghost values, not assigned.
pub trait Boundary: Send + Sync {
    fn apply(&self, mesh: &Mesh, kind: FieldKind, field: &mut NodeField) -> Result<()>;

    /// Checks the operator against the mesh before any stepping.
    fn validate(&self, _mesh: &Mesh) -> Result<()> {
        Ok(())
    }
}

/// Per-edge boundary types, ordered `[x_low, x_high, y_low, y_high]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCondition {
    pub boundary_type: [BoundaryType; 4],
}

impl BoundaryCondition {
    pub fn new(boundary_type: [BoundaryType; 4]) -> Self {
        Self { boundary_type }
    }

    pub fn periodic() -> Self {
        Self::new([BoundaryType::Periodic; 4])
    }

    /// Fills the `halo` ghosts beyond `edge`, walking away from the interior
    /// (`inward` is +1 on a low edge, -1 on a high edge). `at` maps the index
    /// along the axis to a node.
    fn fill_edge(
        kind: BoundaryType,
        field: &mut NodeField,
        halo: isize,
        edge: isize,
        inward: isize,
        at: impl Fn(isize) -> (isize, isize),
    ) {
        if kind == BoundaryType::Periodic {
            return;
        }
        let (ei, ej) = at(edge);
        let (ni, nj) = at(edge + inward);
        for k in 1..=halo {
            let (gi, gj) = at(edge - inward * k);
            let (ri, rj) = at(edge + inward * k);
            for c in 0..field.ncomp() {
                let f0 = field.get(ei, ej, c);
                let v = match kind {
                    BoundaryType::Fixed => 2.0 * f0 - field.get(ri, rj, c),
                    _ => (k + 1) as f64 * f0 - k as f64 * field.get(ni, nj, c),
                };
                field.set(gi, gj, c, v);
            }
        }
    }
}

impl Boundary for BoundaryCondition {
    /// Periodic edges must sit on periodic mesh axes and vice versa,
    /// otherwise the ghosts would never be filled.
    fn validate(&self, mesh: &Mesh) -> Result<()> {
        for axis in 0..2 {
            let pair = [self.boundary_type[2 * axis], self.boundary_type[2 * axis + 1]];
            let wants = pair.iter().filter(|t| **t == BoundaryType::Periodic).count();
            let periodic = mesh.periodic()[axis];
            if (wants == 2) != periodic || wants == 1 {
                return Err(ZModelError::InvalidBoundary(format!(
                    "axis {axis}: edges {:?} on a {} mesh axis",
                    pair,
                    if periodic { "periodic" } else { "bounded" }
                )));
            }
        }
        Ok(())
    }

    fn apply(&self, mesh: &Mesh, kind: FieldKind, field: &mut NodeField) -> Result<()> {
        field.check_layout(mesh, field.ncomp())?;
        let h = mesh.halo_width() as isize;
        let (nx, ny) = (mesh.nx() as isize, mesh.ny() as isize);
        let extent = [mesh.lx(), mesh.ly()];
        let [x_lo, x_hi, y_lo, y_hi] = self.boundary_type;

        // x edges first over every padded row, then y edges over every padded
        // column, so the corners end up consistent with both.
        for j in -h..ny + h {
            Self::fill_edge(x_lo, field, h, 0, 1, |i| (i, j));
            Self::fill_edge(x_hi, field, h, nx - 1, -1, |i| (i, j));
        }
        if kind == FieldKind::Position && x_lo == BoundaryType::Periodic {
            for j in -h..ny + h {
                for k in 1..=h {
                    let lo = field.get(-k, j, 0) - extent[0];
                    field.set(-k, j, 0, lo);
                    let hi = field.get(nx - 1 + k, j, 0) + extent[0];
                    field.set(nx - 1 + k, j, 0, hi);
                }
            }
        }

        for i in -h..nx + h {
            Self::fill_edge(y_lo, field, h, 0, 1, |jj| (i, jj));
            Self::fill_edge(y_hi, field, h, ny - 1, -1, |jj| (i, jj));
        }
        if kind == FieldKind::Position && y_lo == BoundaryType::Periodic {
            for i in -h..nx + h {
                for k in 1..=h {
                    let lo = field.get(i, -k, 1) - extent[1];
                    field.set(i, -k, 1, lo);
                    let hi = field.get(i, ny - 1 + k, 1) + extent[1];
                    field.set(i, ny - 1 + k, 1, hi);
                }
            }
        }
        Ok(())
    }
}
