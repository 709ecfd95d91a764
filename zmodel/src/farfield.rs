//! Far-field interface velocity.

use log::trace;
use rayon::prelude::*;

use crate::error::Result;
use crate::mesh::{Mesh, NodeField};
use crate::operators::birkhoff_rott;

/// Full interface velocity from position and vorticity.
///
/// Called with gathered `z` (3 components) and `w` (2 components); must write
/// every owned node of `out` (3 components) and be deterministic.
pub trait FarFieldSolver: Send {
    fn velocity(
        &mut self,
        mesh: &Mesh,
        z: &NodeField,
        w: &NodeField,
        out: &mut NodeField,
    ) -> Result<()>;
}

/// Direct O(N²) Birkhoff–Rott sum over every owned node and its periodic
/// images.
#[derive(Debug, Clone)]
pub struct BirkhoffRott {
    /// Desingularisation added to `|r|²`.
    pub epsilon: f64,
    /// Image tiles in each periodic direction (`0` = none).
    pub images: usize,
}

impl BirkhoffRott {
    pub fn new(epsilon: f64, images: usize) -> Self {
        Self { epsilon, images }
    }

    fn offsets(&self, mesh: &Mesh) -> Vec<[f64; 3]> {
        let span = |periodic: bool| -> isize {
            if periodic {
                self.images as isize
            } else {
                0
            }
        };
        let [px, py] = mesh.periodic();
        let (sx, sy) = (span(px), span(py));
        let mut v = Vec::new();
        for q in -sy..=sy {
            for p in -sx..=sx {
                v.push([p as f64 * mesh.lx(), q as f64 * mesh.ly(), 0.0]);
            }
        }
        v
    }
}

impl FarFieldSolver for BirkhoffRott {
    fn velocity(
        &mut self,
        mesh: &Mesh,
        z: &NodeField,
        w: &NodeField,
        out: &mut NodeField,
    ) -> Result<()> {
        z.check_layout(mesh, 3)?;
        w.check_layout(mesh, 2)?;
        out.check_layout(mesh, 3)?;
        let offsets = self.offsets(mesh);
        let spacing = mesh.spacing();
        let epsilon = self.epsilon;
        let (nx, ny) = (mesh.nx() as isize, mesh.ny() as isize);

        out.par_rows_mut().for_each(|mut row| {
            let j = row.j();
            for i in 0..nx {
                let target = z.vec3(i, j);
                let mut u = [0.0; 3];
                for offset in &offsets {
                    for l in 0..ny {
                        for k in 0..nx {
                            if k == i && l == j && offset[0] == 0.0 && offset[1] == 0.0 {
                                continue;
                            }
                            let du =
                                birkhoff_rott(w, z, target, k, l, *offset, epsilon, spacing, 1.0);
                            for d in 0..3 {
                                u[d] += du[d];
                            }
                        }
                    }
                }
                row.node_mut(i).copy_from_slice(&u);
            }
        });
        trace!("birkhoff-rott sum over {} image tiles", offsets.len());
        Ok(())
    }
}
