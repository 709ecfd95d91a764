use serde::Deserialize;

/// Z-model formulation. Fixed for the lifetime of an engine.
///
/// - `Low`: Fourier (Riesz) normal velocity only, pure normal motion.
/// - `Medium`: Fourier normal speed, far-field interface velocity.
/// - `High`: far-field velocity for both, normal speed by projection.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    Low,
    Medium,
    High,
}

impl Order {
    /// Whether the Fourier velocity solve runs for this formulation.
    pub fn uses_fourier(self) -> bool {
        matches!(self, Order::Low | Order::Medium)
    }

    /// Whether a far-field (Birkhoff–Rott) solver must be supplied.
    pub fn uses_far_field(self) -> bool {
        matches!(self, Order::Medium | Order::High)
    }
}

impl Default for Order {
    fn default() -> Self {
        Order::Low
    }
}
