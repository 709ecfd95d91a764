use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::boundary::{BoundaryCondition, BoundaryType};
use crate::dissipation::ArtificialViscosity;
use crate::farfield::BirkhoffRott;
use crate::mesh::Mesh;
use crate::order::Order;
use crate::zmodel::ZModel;

/// 計算全体の設定を保持するトップレベル構造体。
///
/// `config.yaml` から読み込まれ，格子・モデル・初期条件を組み立てる。
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    pub mesh: MeshCfg,
    pub model: ModelCfg,
    pub initial_condition: InitialConditionCfg,
    #[serde(default)]
    pub initial_vorticity: VorticityCfg,
    pub simulation: SimulationCfg,
}

impl Config {
    pub fn from_path<P: AsRef<Path>>(p: P) -> Result<Self> {
        let s = fs::read_to_string(&p)
            .with_context(|| format!("failed to read {}", p.as_ref().display()))?;
        let cfg: Config = serde_yaml::from_str(&s).with_context(|| "YAML parse error")?;
        Ok(cfg)
    }

    /// ログ出力用の簡易サマリを返す。
    pub fn summary(&self) -> String {
        format!(
            "order={:?}, N=({},{}) L=({},{}) A={} g={} mu={} dt={} steps={} bc={:?}",
            self.model.order,
            self.mesh.nx,
            self.mesh.ny,
            self.mesh.lx,
            self.mesh.ly,
            self.model.atwood,
            self.model.gravity,
            self.model.mu,
            self.simulation.dt,
            self.simulation.steps,
            self.mesh.boundary
        )
    }

    /// 格子を生成する。両端が周期境界の軸のみ周期軸とする。
    pub fn build_mesh(&self) -> Result<Mesh> {
        let b = &self.mesh.boundary;
        let periodic = [
            b[0] == BoundaryType::Periodic && b[1] == BoundaryType::Periodic,
            b[2] == BoundaryType::Periodic && b[3] == BoundaryType::Periodic,
        ];
        let mesh = Mesh::new(
            self.mesh.nx,
            self.mesh.ny,
            self.mesh.lx,
            self.mesh.ly,
            self.mesh.halo_width,
            periodic,
        )
        .with_context(|| "invalid mesh section")?;
        Ok(mesh.with_origin(self.mesh.origin))
    }

    /// 標準の境界条件・人工粘性・遠方場ソルバで微分エンジンを組み立てる。
    pub fn build_engine(&self, mesh: &Mesh) -> Result<ZModel> {
        let m = &self.model;
        let mut builder = ZModel::builder(mesh.clone(), m.order)
            .atwood(m.atwood)
            .gravity(m.gravity)
            .boundary(BoundaryCondition::new(self.mesh.boundary))
            .dissipation(ArtificialViscosity::new(m.mu));
        if let Some(ff) = &m.far_field {
            builder = builder.far_field(BirkhoffRott::new(ff.epsilon, ff.images));
        }
        let engine = builder.build().with_context(|| "invalid model section")?;
        Ok(engine)
    }
}

/// 界面格子の節点数，領域サイズ，各辺の境界条件。
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct MeshCfg {
    pub nx: usize,
    pub ny: usize,
    pub lx: f64,
    pub ly: f64,
    #[serde(default)]
    pub origin: [f64; 2],
    #[serde(default = "default_halo_width")]
    pub halo_width: usize,
    /// `[x_low, x_high, y_low, y_high]`
    pub boundary: [BoundaryType; 4],
}

/// 定式化の次数と物理定数。
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct ModelCfg {
    #[serde(default)]
    pub order: Order,
    pub atwood: f64,
    pub gravity: f64,
    /// 人工粘性係数
    #[serde(default)]
    pub mu: f64,
    /// `medium` と `high` では必須
    #[serde(default)]
    pub far_field: Option<FarFieldCfg>,
}

/// Birkhoff–Rott 直接和のパラメータ。
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct FarFieldCfg {
    pub epsilon: f64,
    #[serde(default)]
    pub images: usize,
}

/// 初期界面高さ `z₃(x, y)` の形状。`z₁, z₂` は節点座標をそのまま用いる。
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum InitialConditionCfg {
    Flat,
    /// `a sin(2π (mx x / lx + my y / ly))`
    Sine {
        amplitude: f64,
        mode_x: u32,
        mode_y: u32,
    },
    /// 中心まわりのガウス型の盛り上がり `a exp(-r² / radius²)`
    Gaussian {
        amplitude: f64,
        center_x: f64,
        center_y: f64,
        radius: f64,
    },
}

/// 初期渦シート強度。
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum VorticityCfg {
    #[default]
    Zero,
    /// `a (cos θ, sin θ)` with `θ = 2π (mx x / lx + my y / ly)`
    Sine {
        amplitude: f64,
        mode_x: u32,
        mode_y: u32,
    },
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct SimulationCfg {
    pub dt: f64,
    pub steps: usize,
    #[serde(default)]
    pub time_integrator: TimeIntegrator,
    /// `log_stride` ステップごとに進捗を出力する（0 で無効）
    #[serde(default)]
    pub log_stride: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
/// Strong-stability-preserving Runge–Kutta time integrators.
/// - `SspRk3`: 3-stage 3rd-order scheme of Shu & Osher (1989).
pub enum TimeIntegrator {
    /// SSPRK(3,3)
    #[default]
    SspRk3,
}

fn default_halo_width() -> usize {
    2
}
