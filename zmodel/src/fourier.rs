//! Fourier approximation of the interface normal velocity.
//!
//! The two vorticity components are transformed, combined mode by mode with
//! the Riesz kernel `-i k / |k|`, and transformed back:
//!
//! ```text
//! ubar = F^-1[ -i (kx W1 + ky W2) / |k| ],   ubar_hat(0) = 0
//! ```
//!
//! The mean mode is dropped since the sheet's mean normal velocity is not
//! constrained by the vorticity.

use std::f64::consts::PI;
use std::sync::Arc;

use log::trace;
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};

use crate::error::Result;
use crate::mesh::{Mesh, NodeField};
use crate::utils::{idx, mode};

/// Owns the FFT plans and the two transform buffers. Buffers are sized once
/// from the mesh and reused every call.
///
/// The transform treats both axes as periodic with periods `lx` and `ly`;
/// the engine only builds it on doubly periodic meshes.
pub struct FourierSolver {
    mesh: Mesh,
    fwd_x: Arc<dyn Fft<f64>>,
    fwd_y: Arc<dyn Fft<f64>>,
    inv_x: Arc<dyn Fft<f64>>,
    inv_y: Arc<dyn Fft<f64>>,
    w1: Vec<Complex64>,
    w2: Vec<Complex64>,
    cols: Vec<Complex64>,
    scratch: Vec<Complex64>,
}

impl FourierSolver {
    pub fn new(mesh: &Mesh) -> Self {
        let (nx, ny) = (mesh.nx(), mesh.ny());
        let mut planner = FftPlanner::<f64>::new();
        let fwd_x = planner.plan_fft_forward(nx);
        let fwd_y = planner.plan_fft_forward(ny);
        let inv_x = planner.plan_fft_inverse(nx);
        let inv_y = planner.plan_fft_inverse(ny);
        let scratch_len = [&fwd_x, &fwd_y, &inv_x, &inv_y]
            .iter()
            .map(|f| f.get_inplace_scratch_len())
            .max()
            .unwrap_or(0);
        let zero = Complex64::new(0.0, 0.0);
        Self {
            mesh: mesh.clone(),
            fwd_x,
            fwd_y,
            inv_x,
            inv_y,
            w1: vec![zero; nx * ny],
            w2: vec![zero; nx * ny],
            cols: vec![zero; nx * ny],
            scratch: vec![zero; scratch_len],
        }
    }

    /// Writes the Riesz normal-velocity proxy of vorticity `w` (2 components)
    /// into the owned nodes of `ubar` (1 component).
    pub fn solve(&mut self, w: &NodeField, ubar: &mut NodeField) -> Result<()> {
        w.check_layout(&self.mesh, 2)?;
        ubar.check_layout(&self.mesh, 1)?;
        let (nx, ny) = (self.mesh.nx(), self.mesh.ny());
        let (lx, ly) = (self.mesh.lx(), self.mesh.ly());
        let Self {
            fwd_x,
            fwd_y,
            inv_x,
            inv_y,
            w1,
            w2,
            cols,
            scratch,
            ..
        } = self;

        for j in 0..ny {
            for i in 0..nx {
                let k = idx(i, j, nx);
                w1[k] = Complex64::new(w.get(i as isize, j as isize, 0), 0.0);
                w2[k] = Complex64::new(w.get(i as isize, j as isize, 1), 0.0);
            }
        }

        transform_2d(w1, cols, scratch, &**fwd_x, &**fwd_y, nx, ny);
        transform_2d(w2, cols, scratch, &**fwd_x, &**fwd_y, nx, ny);

        // Both transforms are unscaled; fold the 1/N of the round trip in here.
        let norm = 1.0 / (nx * ny) as f64;
        for my in 0..ny {
            let ky = 2.0 * PI * mode(my, ny) / ly;
            for mx in 0..nx {
                let kx = 2.0 * PI * mode(mx, nx) / lx;
                let k = idx(mx, my, nx);
                let len = (kx * kx + ky * ky).sqrt();
                w1[k] = if len == 0.0 {
                    Complex64::new(0.0, 0.0)
                } else {
                    let (a, b) = (w1[k], w2[k]);
                    let s = norm / len;
                    Complex64::new(
                        (kx * a.im + ky * b.im) * s,
                        -(kx * a.re + ky * b.re) * s,
                    )
                };
            }
        }

        transform_2d(w1, cols, scratch, &**inv_x, &**inv_y, nx, ny);

        for j in 0..ny {
            for i in 0..nx {
                ubar.set(i as isize, j as isize, 0, w1[idx(i, j, nx)].re);
            }
        }
        trace!("fourier velocity solve on {}x{} modes", nx, ny);
        Ok(())
    }
}

/// In-place 2D transform of a row-major `nx * ny` buffer: rows along x, then
/// columns along y through the transposed `cols` buffer.
fn transform_2d(
    buf: &mut [Complex64],
    cols: &mut [Complex64],
    scratch: &mut [Complex64],
    fx: &dyn Fft<f64>,
    fy: &dyn Fft<f64>,
    nx: usize,
    ny: usize,
) {
    fx.process_with_scratch(buf, scratch);
    for j in 0..ny {
        for i in 0..nx {
            cols[idx(j, i, ny)] = buf[idx(i, j, nx)];
        }
    }
    fy.process_with_scratch(cols, scratch);
    for j in 0..ny {
        for i in 0..nx {
            buf[idx(i, j, nx)] = cols[idx(j, i, ny)];
        }
    }
}
