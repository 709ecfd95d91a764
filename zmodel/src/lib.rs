pub mod boundary;
pub mod config;
pub mod dissipation;
pub mod error;
pub mod farfield;
pub mod fourier;
pub mod geometry;
pub mod mesh;
pub mod operators;
pub mod order;
pub mod shapes;
pub mod sim;
pub mod utils;
pub mod velocity;
pub mod zmodel;

pub use boundary::{Boundary, BoundaryCondition, BoundaryType, FieldKind};
pub use dissipation::{ArtificialViscosity, Dissipation};
pub use error::{Result, ZModelError};
pub use farfield::{BirkhoffRott, FarFieldSolver};
pub use fourier::FourierSolver;
pub use geometry::SurfaceGeometry;
pub use mesh::{Halo, Mesh, NodeField};
pub use order::Order;
pub use velocity::{finalize, NodeVelocity};
pub use zmodel::{ZModel, ZModelBuilder};
