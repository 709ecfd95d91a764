//! Derivative assembler for the Z-model interface equations.
//!
//! For position `z` and vorticity `w` on the surface, one call produces
//!
//! ```text
//! dz/dt = u(z, w)                                  (formulation specific)
//! dw/dt = A ∇V + D(w)
//! V     = zndot² − ¼ (h22 w1² − 2 h12 w1 w2 + h11 w2²) / deth − 2 g z₃
//! ```
//!
//! with `h` the first fundamental form of the surface, `A` the Atwood number
//! and `D` the dissipation operator.

use log::debug;
use rayon::prelude::*;

use crate::boundary::{Boundary, BoundaryCondition, BoundaryType, FieldKind};
use crate::dissipation::{ArtificialViscosity, Dissipation};
use crate::error::{Result, ZModelError};
use crate::farfield::FarFieldSolver;
use crate::fourier::FourierSolver;
use crate::geometry::SurfaceGeometry;
use crate::mesh::{Halo, Mesh, NodeField};
use crate::operators::{dx, dy};
use crate::order::Order;
use crate::velocity::finalize;

/// Derivative engine. The formulation and the physical constants are fixed
/// at construction; working buffers are allocated once and reused.
pub struct ZModel {
    mesh: Mesh,
    order: Order,
    atwood: f64,
    gravity: f64,
    halo: Box<dyn Halo>,
    boundary: Box<dyn Boundary>,
    dissipation: Box<dyn Dissipation>,
    far_field: Option<Box<dyn FarFieldSolver>>,
    fourier: Option<FourierSolver>,
    ubar: Option<NodeField>,
    ufar: Option<NodeField>,
    v: NodeField,
}

impl ZModel {
    pub fn builder(mesh: Mesh, order: Order) -> ZModelBuilder {
        ZModelBuilder {
            mesh,
            order,
            atwood: 1.0,
            gravity: 0.0,
            halo: None,
            boundary: None,
            dissipation: None,
            far_field: None,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn atwood(&self) -> f64 {
        self.atwood
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Fourier normal-velocity proxy from the last call (Low/Medium only).
    pub fn ubar(&self) -> Option<&NodeField> {
        self.ubar.as_ref()
    }

    /// Reduced scalar `V` from the last call.
    pub fn reduced(&self) -> &NodeField {
        &self.v
    }

    /// Computes `zdot` (3 components) and `wdot` (2 components) on every
    /// owned node from `z` (3 components) and `w` (2 components).
    ///
    /// Only ghost layers of `z` and `w` are written. Ghosts of the outputs
    /// are left untouched. On error the outputs are partially written and
    /// must be discarded.
    pub fn compute_derivatives(
        &mut self,
        z: &mut NodeField,
        w: &mut NodeField,
        zdot: &mut NodeField,
        wdot: &mut NodeField,
    ) -> Result<()> {
        z.check_layout(&self.mesh, 3)?;
        w.check_layout(&self.mesh, 2)?;
        zdot.check_layout(&self.mesh, 3)?;
        wdot.check_layout(&self.mesh, 2)?;

        // Ghosts first: the far-field solve differentiates z at every source.
        self.halo.gather(z)?;
        self.boundary.apply(&self.mesh, FieldKind::Position, z)?;
        self.halo.gather(w)?;
        self.boundary.apply(&self.mesh, FieldKind::Vorticity, w)?;
        let (z, w) = (&*z, &*w);

        if let (Some(fourier), Some(ubar)) = (self.fourier.as_mut(), self.ubar.as_mut()) {
            fourier.solve(w, ubar)?;
        }
        if let (Some(solver), Some(ufar)) = (self.far_field.as_mut(), self.ufar.as_mut()) {
            solver.velocity(&self.mesh, z, w, ufar)?;
        }

        let order = self.order;
        let g = self.gravity;
        let spacing = self.mesh.spacing();
        let nx = self.mesh.nx() as isize;
        let ubar = self.ubar.as_ref();
        let ufar = self.ufar.as_ref();
        zdot.par_rows_mut()
            .zip(self.v.par_rows_mut())
            .try_for_each(|(mut zrow, mut vrow)| -> Result<()> {
                let j = zrow.j();
                for i in 0..nx {
                    let geom = SurfaceGeometry::at(z, i, j, spacing)?;
                    let ub = ubar.map_or(0.0, |f| f.get(i, j, 0));
                    let far = ufar.map_or([0.0; 3], |f| f.vec3(i, j));
                    let node = finalize(order, &geom, ub, far);
                    zrow.node_mut(i).copy_from_slice(&node.velocity);

                    let (w1, w2) = (w.get(i, j, 0), w.get(i, j, 1));
                    let stretch =
                        geom.h22 * w1 * w1 - 2.0 * geom.h12 * w1 * w2 + geom.h11 * w2 * w2;
                    vrow.node_mut(i)[0] = node.zndot * node.zndot
                        - 0.25 * stretch / geom.deth
                        - 2.0 * g * z.get(i, j, 2);
                }
                Ok(())
            })?;

        self.halo.gather(&mut self.v)?;
        self.boundary.apply(&self.mesh, FieldKind::Scalar, &mut self.v)?;

        let a = self.atwood;
        let (hx, hy) = spacing;
        let v = &self.v;
        let mesh = &self.mesh;
        let dissipation = &*self.dissipation;
        wdot.par_rows_mut().for_each(|mut row| {
            let j = row.j();
            for i in 0..nx {
                let out = row.node_mut(i);
                out[0] = a * dx(v, i, j, 0, hx) + dissipation.correction(mesh, i, j, w, 0);
                out[1] = a * dy(v, i, j, 0, hy) + dissipation.correction(mesh, i, j, w, 1);
            }
        });

        debug!(
            "z-model derivatives ({:?}): max |zdot| = {:.3e}, max |wdot| = {:.3e}",
            order,
            zdot.max_norm(),
            wdot.max_norm()
        );
        Ok(())
    }
}

/// Collects the collaborators of a [`ZModel`]. Missing halo and boundary
/// operators default to the mesh's own exchange and a boundary condition
/// matching its periodicity (free edges elsewhere); dissipation defaults to
/// zero viscosity.
pub struct ZModelBuilder {
    mesh: Mesh,
    order: Order,
    atwood: f64,
    gravity: f64,
    halo: Option<Box<dyn Halo>>,
    boundary: Option<Box<dyn Boundary>>,
    dissipation: Option<Box<dyn Dissipation>>,
    far_field: Option<Box<dyn FarFieldSolver>>,
}

impl ZModelBuilder {
    pub fn atwood(mut self, atwood: f64) -> Self {
        self.atwood = atwood;
        self
    }

    pub fn gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn halo(mut self, halo: impl Halo + 'static) -> Self {
        self.halo = Some(Box::new(halo));
        self
    }

    pub fn boundary(mut self, boundary: impl Boundary + 'static) -> Self {
        self.boundary = Some(Box::new(boundary));
        self
    }

    pub fn dissipation(mut self, dissipation: impl Dissipation + 'static) -> Self {
        self.dissipation = Some(Box::new(dissipation));
        self
    }

    pub fn far_field(mut self, solver: impl FarFieldSolver + 'static) -> Self {
        self.far_field = Some(Box::new(solver));
        self
    }

    pub fn build(self) -> Result<ZModel> {
        let Self {
            mesh,
            order,
            atwood,
            gravity,
            halo,
            boundary,
            dissipation,
            far_field,
        } = self;

        let far_field = match (order.uses_far_field(), far_field) {
            (true, None) => return Err(ZModelError::MissingFarFieldSolver { order }),
            (true, solver) => solver,
            (false, _) => None,
        };
        let boundary: Box<dyn Boundary> = match boundary {
            Some(b) => b,
            None => {
                let edge = |p: bool| if p { BoundaryType::Periodic } else { BoundaryType::Free };
                let [px, py] = mesh.periodic();
                Box::new(BoundaryCondition::new([edge(px), edge(px), edge(py), edge(py)]))
            }
        };
        boundary.validate(&mesh)?;
        if order.uses_fourier() && mesh.periodic() != [true, true] {
            return Err(ZModelError::InvalidMesh(format!(
                "{:?} order needs a doubly periodic mesh for the Fourier solve, got {:?}",
                order,
                mesh.periodic()
            )));
        }
        let halo: Box<dyn Halo> = match halo {
            Some(h) => h,
            None => Box::new(mesh.clone()),
        };
        let dissipation: Box<dyn Dissipation> = match dissipation {
            Some(d) => d,
            None => Box::new(ArtificialViscosity::new(0.0)),
        };

        let (fourier, ubar) = if order.uses_fourier() {
            (Some(FourierSolver::new(&mesh)), Some(mesh.node_field("ubar", 1)))
        } else {
            (None, None)
        };
        let ufar = far_field.as_ref().map(|_| mesh.node_field("ufar", 3));
        let v = mesh.node_field("V", 1);

        debug!(
            "z-model {:?} order on {}x{} nodes, A = {}, g = {}",
            order,
            mesh.nx(),
            mesh.ny(),
            atwood,
            gravity
        );
        Ok(ZModel {
            mesh,
            order,
            atwood,
            gravity,
            halo,
            boundary,
            dissipation,
            far_field,
            fourier,
            ubar,
            ufar,
            v,
        })
    }
}
