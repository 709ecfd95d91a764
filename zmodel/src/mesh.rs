//! Structured 2D node mesh with ghost layers, node-centred fields and the
//! single-partition halo exchange.

use rayon::prelude::*;

use crate::error::{Result, ZModelError};
use crate::utils::{idx, pid};

/// Local view of a uniform 2D node mesh.
///
/// Owned nodes are `0..nx` × `0..ny`. Every field carries `halo` ghost layers
/// on each side, addressed with negative or past-the-end indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    nx: usize,
    ny: usize,
    lx: f64,
    ly: f64,
    origin: [f64; 2],
    halo: usize,
    periodic: [bool; 2],
}

impl Mesh {
    pub fn new(
        nx: usize,
        ny: usize,
        lx: f64,
        ly: f64,
        halo: usize,
        periodic: [bool; 2],
    ) -> Result<Self> {
        if halo < 2 {
            return Err(ZModelError::InvalidMesh(format!(
                "halo width {halo} is below the stencil half-width 2"
            )));
        }
        if nx <= halo || ny <= halo {
            return Err(ZModelError::InvalidMesh(format!(
                "{nx}x{ny} nodes cannot back a halo of width {halo}"
            )));
        }
        if !(lx > 0.0 && ly > 0.0) {
            return Err(ZModelError::InvalidMesh(format!(
                "extents must be positive, got ({lx}, {ly})"
            )));
        }
        Ok(Self {
            nx,
            ny,
            lx,
            ly,
            origin: [0.0, 0.0],
            halo,
            periodic,
        })
    }

    pub fn with_origin(mut self, origin: [f64; 2]) -> Self {
        self.origin = origin;
        self
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    #[inline]
    pub fn lx(&self) -> f64 {
        self.lx
    }

    #[inline]
    pub fn ly(&self) -> f64 {
        self.ly
    }

    #[inline]
    pub fn halo_width(&self) -> usize {
        self.halo
    }

    #[inline]
    pub fn periodic(&self) -> [bool; 2] {
        self.periodic
    }

    /// Node spacing `(dx, dy)`. Node `nx` coincides with node `0` on a
    /// periodic axis.
    #[inline]
    pub fn spacing(&self) -> (f64, f64) {
        (self.lx / self.nx as f64, self.ly / self.ny as f64)
    }

    /// Node counts including ghost layers.
    #[inline]
    pub fn padded_dims(&self) -> (usize, usize) {
        (self.nx + 2 * self.halo, self.ny + 2 * self.halo)
    }

    /// Physical coordinates of node `(i, j)`; ghost indices extrapolate.
    pub fn coordinates(&self, i: isize, j: isize) -> [f64; 2] {
        let (dx, dy) = self.spacing();
        [
            self.origin[0] + i as f64 * dx,
            self.origin[1] + j as f64 * dy,
        ]
    }

    pub fn owned_nodes(&self) -> impl Iterator<Item = (isize, isize)> {
        let (nx, ny) = (self.nx as isize, self.ny as isize);
        (0..ny).flat_map(move |j| (0..nx).map(move |i| (i, j)))
    }

    /// Allocates a zeroed field with `ncomp` components per node.
    pub fn node_field(&self, name: &str, ncomp: usize) -> NodeField {
        let (px, py) = self.padded_dims();
        NodeField {
            name: name.to_string(),
            ncomp,
            nx: self.nx,
            ny: self.ny,
            halo: self.halo,
            data: vec![0.0; px * py * ncomp],
        }
    }
}

/// Halo exchange. Fills ghost layers from neighbour-owned values so that
/// stencils centred on owned nodes read valid data.
///
/// Implementations block until the exchange is complete.
pub trait Halo: Send + Sync {
    fn gather(&self, field: &mut NodeField) -> Result<()>;
}

/// Single-partition exchange: along periodic axes the local domain is its
/// own neighbour, so ghosts wrap around. Non-periodic axes are left to the
/// boundary condition.
impl Halo for Mesh {
    fn gather(&self, field: &mut NodeField) -> Result<()> {
        field.check_layout(self, field.ncomp)?;
        let h = self.halo as isize;
        let (nx, ny) = (self.nx as isize, self.ny as isize);
        if self.periodic[0] {
            for j in -h..ny + h {
                for i in (-h..0).chain(nx..nx + h) {
                    field.copy_node((pid(i, self.nx) as isize, j), (i, j));
                }
            }
        }
        if self.periodic[1] {
            for j in (-h..0).chain(ny..ny + h) {
                for i in -h..nx + h {
                    field.copy_node((i, pid(j, self.ny) as isize), (i, j));
                }
            }
        }
        Ok(())
    }
}

/// Node-centred field over the padded layout of a [`Mesh`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeField {
    name: String,
    ncomp: usize,
    nx: usize,
    ny: usize,
    halo: usize,
    data: Vec<f64>,
}

impl NodeField {
    #[inline]
    fn offset(&self, i: isize, j: isize, c: usize) -> usize {
        let h = self.halo as isize;
        debug_assert!(i >= -h && i < self.nx as isize + h);
        debug_assert!(j >= -h && j < self.ny as isize + h);
        debug_assert!(c < self.ncomp);
        idx((i + h) as usize, (j + h) as usize, self.nx + 2 * self.halo) * self.ncomp + c
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ncomp(&self) -> usize {
        self.ncomp
    }

    #[inline]
    pub fn get(&self, i: isize, j: isize, c: usize) -> f64 {
        self.data[self.offset(i, j, c)]
    }

    #[inline]
    pub fn set(&mut self, i: isize, j: isize, c: usize, v: f64) {
        let k = self.offset(i, j, c);
        self.data[k] = v;
    }

    /// All components of node `(i, j)`.
    #[inline]
    pub fn node(&self, i: isize, j: isize) -> &[f64] {
        let k = self.offset(i, j, 0);
        &self.data[k..k + self.ncomp]
    }

    /// First three components of node `(i, j)` as a vector.
    #[inline]
    pub fn vec3(&self, i: isize, j: isize) -> [f64; 3] {
        let n = self.node(i, j);
        [n[0], n[1], n[2]]
    }

    pub fn fill(&mut self, v: f64) {
        self.data.fill(v);
    }

    fn copy_node(&mut self, from: (isize, isize), to: (isize, isize)) {
        let src = self.offset(from.0, from.1, 0);
        let dst = self.offset(to.0, to.1, 0);
        self.data.copy_within(src..src + self.ncomp, dst);
    }

    /// Fails unless the field has `ncomp` components on the node layout of
    /// `mesh`.
    pub fn check_layout(&self, mesh: &Mesh, ncomp: usize) -> Result<()> {
        if self.nx == mesh.nx
            && self.ny == mesh.ny
            && self.halo == mesh.halo
            && self.ncomp == ncomp
        {
            return Ok(());
        }
        Err(ZModelError::LayoutMismatch {
            field: self.name.clone(),
            expected: format!("{}x{}+{} x{}", mesh.nx, mesh.ny, mesh.halo, ncomp),
            found: format!("{}x{}+{} x{}", self.nx, self.ny, self.halo, self.ncomp),
        })
    }

    /// Mutable owned rows for node-parallel passes. Each row only exposes
    /// its own nodes, so writes cannot alias across rows.
    pub fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = RowMut<'_>> + '_ {
        let halo = self.halo;
        let ncomp = self.ncomp;
        let stride = (self.nx + 2 * halo) * ncomp;
        self.data
            .par_chunks_mut(stride)
            .enumerate()
            .skip(halo)
            .take(self.ny)
            .map(move |(pj, data)| RowMut {
                j: pj as isize - halo as isize,
                halo,
                ncomp,
                data,
            })
    }

    /// Overwrites owned nodes with `sum(a * field)` over `terms`.
    /// Ghost values are left stale.
    pub fn assign_combination(&mut self, terms: &[(f64, &NodeField)]) {
        let (nx, ny) = (self.nx as isize, self.ny as isize);
        for j in 0..ny {
            for i in 0..nx {
                for c in 0..self.ncomp {
                    let v = terms.iter().map(|(a, f)| a * f.get(i, j, c)).sum();
                    self.set(i, j, c, v);
                }
            }
        }
    }

    /// Largest Euclidean norm of a node vector over owned nodes.
    pub fn max_norm(&self) -> f64 {
        let (nx, ny) = (self.nx as isize, self.ny as isize);
        let mut m: f64 = 0.0;
        for j in 0..ny {
            for i in 0..nx {
                let s = self.node(i, j).iter().map(|v| v * v).sum::<f64>().sqrt();
                m = m.max(s);
            }
        }
        m
    }

    /// Minimum and maximum of component `c` over owned nodes.
    pub fn component_range(&self, c: usize) -> (f64, f64) {
        let (nx, ny) = (self.nx as isize, self.ny as isize);
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for j in 0..ny {
            for i in 0..nx {
                let v = self.get(i, j, c);
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
        (lo, hi)
    }
}

/// One owned row of a [`NodeField`], handed out by
/// [`NodeField::par_rows_mut`].
pub struct RowMut<'a> {
    j: isize,
    halo: usize,
    ncomp: usize,
    data: &'a mut [f64],
}

impl RowMut<'_> {
    #[inline]
    pub fn j(&self) -> isize {
        self.j
    }

    #[inline]
    pub fn node_mut(&mut self, i: isize) -> &mut [f64] {
        let k = (i + self.halo as isize) as usize * self.ncomp;
        &mut self.data[k..k + self.ncomp]
    }
}
