mod common;

use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use zmodel::fourier::FourierSolver;
use zmodel::mesh::{Mesh, NodeField};

use common::periodic_mesh;

fn solve(mesh: &Mesh, w: &NodeField) -> NodeField {
    let mut solver = FourierSolver::new(mesh);
    let mut ubar = mesh.node_field("ubar", 1);
    solver.solve(w, &mut ubar).expect("fourier solve");
    ubar
}

#[test]
fn zero_vorticity_gives_zero_ubar() {
    let mesh = periodic_mesh(8);
    let w = mesh.node_field("w", 2);
    let ubar = solve(&mesh, &w);
    for (i, j) in mesh.owned_nodes() {
        assert_eq!(ubar.get(i, j, 0), 0.0);
    }
}

#[test]
fn uniform_vorticity_has_no_normal_velocity() {
    let mesh = periodic_mesh(8);
    let mut w = mesh.node_field("w", 2);
    for (i, j) in mesh.owned_nodes() {
        w.set(i, j, 0, 1.3);
        w.set(i, j, 1, -0.7);
    }
    let ubar = solve(&mesh, &w);
    for (i, j) in mesh.owned_nodes() {
        assert_abs_diff_eq!(ubar.get(i, j, 0), 0.0, epsilon = 1e-12);
    }
}

#[test]
fn riesz_kernel_maps_cosine_to_sine_along_x() {
    let mesh = periodic_mesh(16);
    let mut w = mesh.node_field("w", 2);
    for (i, j) in mesh.owned_nodes() {
        let [x, _] = mesh.coordinates(i, j);
        w.set(i, j, 0, (2.0 * PI * x).cos());
    }
    let ubar = solve(&mesh, &w);
    for (i, j) in mesh.owned_nodes() {
        let [x, _] = mesh.coordinates(i, j);
        assert_abs_diff_eq!(ubar.get(i, j, 0), (2.0 * PI * x).sin(), epsilon = 1e-12);
    }
}

#[test]
fn riesz_kernel_maps_cosine_to_sine_along_y() {
    let mesh = Mesh::new(8, 16, 1.0, 2.0, 2, [true, true]).expect("mesh");
    let mut w = mesh.node_field("w", 2);
    for (i, j) in mesh.owned_nodes() {
        let [_, y] = mesh.coordinates(i, j);
        w.set(i, j, 1, 0.5 * (2.0 * PI * 3.0 * y / 2.0).cos());
    }
    let ubar = solve(&mesh, &w);
    for (i, j) in mesh.owned_nodes() {
        let [_, y] = mesh.coordinates(i, j);
        let expected = 0.5 * (2.0 * PI * 3.0 * y / 2.0).sin();
        assert_abs_diff_eq!(ubar.get(i, j, 0), expected, epsilon = 1e-12);
    }
}

#[test]
fn repeated_solves_reuse_buffers_without_carrying_state() {
    let mesh = periodic_mesh(8);
    let mut solver = FourierSolver::new(&mesh);
    let mut w = common::sine_vorticity(&mesh, 0.2, 1, 1);
    let mut first = mesh.node_field("ubar", 1);
    solver.solve(&w, &mut first).expect("first solve");

    // An unrelated solve in between must not leak into the next result.
    let mut other = mesh.node_field("ubar", 1);
    w.fill(0.0);
    solver.solve(&w, &mut other).expect("zero solve");

    let w = common::sine_vorticity(&mesh, 0.2, 1, 1);
    let mut second = mesh.node_field("ubar", 1);
    solver.solve(&w, &mut second).expect("second solve");
    assert_eq!(first, second);
}

#[test]
fn solve_rejects_mismatched_fields() {
    let mesh = periodic_mesh(8);
    let mut solver = FourierSolver::new(&mesh);
    let w = mesh.node_field("w", 3);
    let mut ubar = mesh.node_field("ubar", 1);
    assert!(solver.solve(&w, &mut ubar).is_err());
}
