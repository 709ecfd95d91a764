//! 界面上の差分ステンシルと Birkhoff–Rott 核。
//!
//! 1 階微分には 4 次精度の中心差分を用いる。参照は `(i, j)` から 2 節点以内に
//! 収まるため，格子には 2 層以上のゴースト層が必要となる。

use std::f64::consts::PI;

use crate::mesh::NodeField;
use crate::utils::cross;

/// オフセット `-2..=2` に対する 4 次精度中心差分の重み。
const C4: [f64; 5] = [1.0 / 12.0, -8.0 / 12.0, 0.0, 8.0 / 12.0, -1.0 / 12.0];

/// `(i, j)` における成分 `c` の ∂f/∂x。
#[inline]
pub fn dx(f: &NodeField, i: isize, j: isize, c: usize, h: f64) -> f64 {
    let mut acc = 0.0;
    for s in -2..=2isize {
        if s != 0 {
            acc += C4[(s + 2) as usize] * f.get(i + s, j, c);
        }
    }
    acc / h
}

/// `(i, j)` における成分 `c` の ∂f/∂y。
#[inline]
pub fn dy(f: &NodeField, i: isize, j: isize, c: usize, h: f64) -> f64 {
    let mut acc = 0.0;
    for s in -2..=2isize {
        if s != 0 {
            acc += C4[(s + 2) as usize] * f.get(i, j + s, c);
        }
    }
    acc / h
}

/// ∂z/∂x for a 3-component field.
#[inline]
pub fn dx3(f: &NodeField, i: isize, j: isize, h: f64) -> [f64; 3] {
    [dx(f, i, j, 0, h), dx(f, i, j, 1, h), dx(f, i, j, 2, h)]
}

/// ∂z/∂y for a 3-component field.
#[inline]
pub fn dy3(f: &NodeField, i: isize, j: isize, h: f64) -> [f64; 3] {
    [dy(f, i, j, 0, h), dy(f, i, j, 1, h), dy(f, i, j, 2, h)]
}

/// 9 点ラプラシアン。辺方向の隣接点は 1/2，対角は 1/4 の重みを持つ。
#[inline]
pub fn laplace(f: &NodeField, i: isize, j: isize, c: usize, hx: f64, hy: f64) -> f64 {
    let edges = f.get(i + 1, j, c) + f.get(i - 1, j, c) + f.get(i, j + 1, c) + f.get(i, j - 1, c);
    let diags = f.get(i + 1, j + 1, c)
        + f.get(i + 1, j - 1, c)
        + f.get(i - 1, j + 1, c)
        + f.get(i - 1, j - 1, c);
    (0.5 * edges + 0.25 * diags - 3.0 * f.get(i, j, c)) / (hx * hy)
}

/// Velocity induced at `target` by the sheet element at source node `(k, l)`,
/// shifted by `offset` for periodic images.
///
/// `epsilon` desingularises the kernel and enters unsquared. `weight` is the
/// quadrature weight of the source node.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn birkhoff_rott(
    w: &NodeField,
    z: &NodeField,
    target: [f64; 3],
    k: isize,
    l: isize,
    offset: [f64; 3],
    epsilon: f64,
    (hx, hy): (f64, f64),
    weight: f64,
) -> [f64; 3] {
    let zx = dx3(z, k, l, hx);
    let zy = dy3(z, k, l, hy);
    let (w1, w2) = (w.get(k, l, 0), w.get(k, l, 1));
    let mut omega = [0.0; 3];
    let mut r = [0.0; 3];
    let mut r2 = 0.0;
    for d in 0..3 {
        omega[d] = w2 * zx[d] - w1 * zy[d];
        r[d] = target[d] - (z.get(k, l, d) + offset[d]);
        r2 += r[d] * r[d];
    }
    let scale = (r2 + epsilon).powf(1.5);
    for rd in r.iter_mut() {
        *rd /= scale;
    }
    let u = cross(&omega, &r);
    let s = hx * hy * weight / (-4.0 * PI);
    [u[0] * s, u[1] * s, u[2] * s]
}
