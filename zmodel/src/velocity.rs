use crate::geometry::SurfaceGeometry;
use crate::order::Order;
use crate::utils::dot;

/// Normal speed and interface velocity at one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeVelocity {
    pub zndot: f64,
    pub velocity: [f64; 3],
}

/// Combines the Fourier proxy `ubar` and the far-field velocity `far` into
/// the node's final velocity. Low reads only `ubar`, High only `far`.
#[inline]
pub fn finalize(order: Order, geom: &SurfaceGeometry, ubar: f64, far: [f64; 3]) -> NodeVelocity {
    let n = geom.normal;
    match order {
        Order::Low => {
            let zndot = ubar / geom.deth;
            NodeVelocity {
                zndot,
                velocity: [zndot * n[0], zndot * n[1], zndot * n[2]],
            }
        }
        Order::Medium => NodeVelocity {
            zndot: ubar / geom.deth,
            velocity: far,
        },
        Order::High => NodeVelocity {
            zndot: dot(&n, &far),
            velocity: far,
        },
    }
}
