use std::f64::consts::PI;

use crate::config::{InitialConditionCfg, VorticityCfg};
use crate::mesh::{Mesh, NodeField};

/// 自節点上の界面位置 `(x, y, h(x, y))` を生成する。
pub fn init_position(cfg: &InitialConditionCfg, mesh: &Mesh) -> NodeField {
    let mut z = mesh.node_field("z", 3);
    let (lx, ly) = (mesh.lx(), mesh.ly());
    for (i, j) in mesh.owned_nodes() {
        let [x, y] = mesh.coordinates(i, j);
        let h = match cfg {
            InitialConditionCfg::Flat => 0.0,
            InitialConditionCfg::Sine { amplitude, mode_x, mode_y } => {
                amplitude * (2.0 * PI * (*mode_x as f64 * x / lx + *mode_y as f64 * y / ly)).sin()
            }
            InitialConditionCfg::Gaussian { amplitude, center_x, center_y, radius } => {
                let r2 = (x - center_x) * (x - center_x) + (y - center_y) * (y - center_y);
                amplitude * (-r2 / (radius * radius)).exp()
            }
        };
        z.set(i, j, 0, x);
        z.set(i, j, 1, y);
        z.set(i, j, 2, h);
    }
    z
}

/// 自節点上の初期渦シート強度を生成する。
pub fn init_vorticity(cfg: &VorticityCfg, mesh: &Mesh) -> NodeField {
    let mut w = mesh.node_field("w", 2);
    if let VorticityCfg::Sine { amplitude, mode_x, mode_y } = cfg {
        let (lx, ly) = (mesh.lx(), mesh.ly());
        for (i, j) in mesh.owned_nodes() {
            let [x, y] = mesh.coordinates(i, j);
            let theta = 2.0 * PI * (*mode_x as f64 * x / lx + *mode_y as f64 * y / ly);
            w.set(i, j, 0, amplitude * theta.cos());
            w.set(i, j, 1, amplitude * theta.sin());
        }
    }
    w
}
