#![allow(dead_code)]

use zmodel::boundary::{Boundary, BoundaryCondition, FieldKind};
use zmodel::config::{InitialConditionCfg, VorticityCfg};
use zmodel::mesh::{Halo, Mesh, NodeField};
use zmodel::shapes::{init_position, init_vorticity};

pub fn periodic_mesh(n: usize) -> Mesh {
    Mesh::new(n, n, 1.0, 1.0, 2, [true, true]).expect("periodic mesh")
}

/// `z = (x, y, a sin(2πx))`
pub fn sine_surface(mesh: &Mesh, amplitude: f64) -> NodeField {
    let cfg = InitialConditionCfg::Sine { amplitude, mode_x: 1, mode_y: 0 };
    init_position(&cfg, mesh)
}

pub fn flat_surface(mesh: &Mesh) -> NodeField {
    init_position(&InitialConditionCfg::Flat, mesh)
}

pub fn sine_vorticity(mesh: &Mesh, amplitude: f64, mode_x: u32, mode_y: u32) -> NodeField {
    init_vorticity(&VorticityCfg::Sine { amplitude, mode_x, mode_y }, mesh)
}

/// Halo exchange followed by the periodic boundary condition.
pub fn fill_ghosts(mesh: &Mesh, kind: FieldKind, field: &mut NodeField) {
    mesh.gather(field).expect("gather");
    BoundaryCondition::periodic()
        .apply(mesh, kind, field)
        .expect("boundary condition");
}
