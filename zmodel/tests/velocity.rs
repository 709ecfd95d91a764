use approx::assert_abs_diff_eq;
use zmodel::geometry::SurfaceGeometry;
use zmodel::order::Order;
use zmodel::velocity::finalize;

/// Tilted plane with tangents (1, 0, 0.5) and (0, 2, 0).
fn tilted() -> SurfaceGeometry {
    let dx_z = [1.0, 0.0, 0.5];
    let dy_z = [0.0, 2.0, 0.0];
    let h11 = 1.25;
    let h12 = 0.0;
    let h22 = 4.0;
    let deth: f64 = h11 * h22 - h12 * h12;
    let s = deth.sqrt();
    SurfaceGeometry {
        dx_z,
        dy_z,
        h11,
        h12,
        h22,
        deth,
        normal: [-1.0 / s, 0.0, 2.0 / s],
    }
}

#[test]
fn low_order_moves_along_the_normal_only() {
    let g = tilted();
    let v = finalize(Order::Low, &g, 2.5, [9.0, 9.0, 9.0]);
    assert_abs_diff_eq!(v.zndot, 2.5 / g.deth, epsilon = 1e-15);
    for d in 0..3 {
        assert_abs_diff_eq!(v.velocity[d], v.zndot * g.normal[d], epsilon = 1e-15);
    }
}

#[test]
fn medium_order_takes_the_far_field_velocity() {
    let g = tilted();
    let far = [0.1, -0.2, 0.3];
    let v = finalize(Order::Medium, &g, 2.5, far);
    assert_abs_diff_eq!(v.zndot, 2.5 / g.deth, epsilon = 1e-15);
    assert_eq!(v.velocity, far);
}

#[test]
fn high_order_projects_the_far_field_velocity_on_the_normal() {
    let g = tilted();
    let far = [0.1, -0.2, 0.3];
    let v = finalize(Order::High, &g, 123.0, far);
    let expected = far[0] * g.normal[0] + far[1] * g.normal[1] + far[2] * g.normal[2];
    assert_abs_diff_eq!(v.zndot, expected, epsilon = 1e-15);
    assert_eq!(v.velocity, far);
}

#[test]
fn formulations_agree_when_the_far_field_is_the_normal_fourier_velocity() {
    let g = tilted();
    let ubar = 0.8;
    let s = ubar / g.deth;
    let far = [s * g.normal[0], s * g.normal[1], s * g.normal[2]];
    let low = finalize(Order::Low, &g, ubar, [0.0; 3]);
    let medium = finalize(Order::Medium, &g, ubar, far);
    let high = finalize(Order::High, &g, ubar, far);
    assert_abs_diff_eq!(low.zndot, medium.zndot, epsilon = 1e-15);
    assert_abs_diff_eq!(low.zndot, high.zndot, epsilon = 1e-14);
    for d in 0..3 {
        assert_abs_diff_eq!(low.velocity[d], medium.velocity[d], epsilon = 1e-15);
        assert_abs_diff_eq!(low.velocity[d], high.velocity[d], epsilon = 1e-15);
    }
}

#[test]
fn order_flags_select_the_velocity_paths() {
    assert!(Order::Low.uses_fourier() && !Order::Low.uses_far_field());
    assert!(Order::Medium.uses_fourier() && Order::Medium.uses_far_field());
    assert!(!Order::High.uses_fourier() && Order::High.uses_far_field());
}
