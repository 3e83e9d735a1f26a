//! Configuration for overlap allocation.

use serde::{Deserialize, Serialize};

/// Default tolerance below which a claim is treated as zero.
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Configuration for [`ExclusiveAllocator`](super::ExclusiveAllocator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Claims at or below this amount are not recorded. Residue left behind
    /// is swept up by the singleton pass.
    pub epsilon: f64,

    /// Check after every symbol that no fund kept unclaimed weight.
    pub verify_conservation: bool,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            verify_conservation: true,
        }
    }
}

impl AllocatorConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the claim tolerance.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Enables or disables the per-symbol conservation check.
    #[must_use]
    pub fn with_conservation_check(mut self, enabled: bool) -> Self {
        self.verify_conservation = enabled;
        self
    }
}
