use crate::mesh::{Mesh, NodeField};
use crate::operators::laplace;

/// Stabilising correction added to each vorticity-derivative component.
///
/// Reads the gathered vorticity `w` around `(i, j)`; `component` is 0 for the
/// x direction and 1 for y.
pub trait Dissipation: Send + Sync {
    fn correction(&self, mesh: &Mesh, i: isize, j: isize, w: &NodeField, component: usize) -> f64;
}

/// Artificial viscosity `mu * ∇²w` with the 9-point Laplacian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtificialViscosity {
    pub mu: f64,
}

impl ArtificialViscosity {
    pub fn new(mu: f64) -> Self {
        Self { mu }
    }
}

impl Dissipation for ArtificialViscosity {
    #[inline]
    fn correction(&self, mesh: &Mesh, i: isize, j: isize, w: &NodeField, component: usize) -> f64 {
        if self.mu == 0.0 {
            return 0.0;
        }
        let (hx, hy) = mesh.spacing();
        self.mu * laplace(w, i, j, component, hx, hy)
    }
}
