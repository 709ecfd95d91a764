//! Surface differential geometry from the position field.

use crate::error::{Result, ZModelError};
use crate::mesh::NodeField;
use crate::operators::{dx3, dy3};
use crate::utils::{cross, dot};

/// Tangents, first fundamental form and unit normal at one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub dx_z: [f64; 3],
    pub dy_z: [f64; 3],
    pub h11: f64,
    pub h12: f64,
    pub h22: f64,
    pub deth: f64,
    pub normal: [f64; 3],
}

impl SurfaceGeometry {
    /// Evaluates the geometry of the gathered position field `z` at `(i, j)`.
    ///
    /// Fails when the metric determinant is not strictly positive; the
    /// surface is then folded or collapsed at that node.
    pub fn at(z: &NodeField, i: isize, j: isize, (hx, hy): (f64, f64)) -> Result<Self> {
        let dx_z = dx3(z, i, j, hx);
        let dy_z = dy3(z, i, j, hy);
        let h11 = dot(&dx_z, &dx_z);
        let h12 = dot(&dx_z, &dy_z);
        let h22 = dot(&dy_z, &dy_z);
        let deth = h11 * h22 - h12 * h12;
        if !(deth > 0.0 && deth.is_finite()) {
            return Err(ZModelError::DegenerateGeometry { i, j, deth });
        }
        let n = cross(&dx_z, &dy_z);
        let s = deth.sqrt();
        Ok(Self {
            dx_z,
            dy_z,
            h11,
            h12,
            h22,
            deth,
            normal: [n[0] / s, n[1] / s, n[2] / s],
        })
    }
}
