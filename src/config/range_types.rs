use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Maximum number of agent moves per run, constrained to [1, 1_000_000]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
pub struct StepBudget(u32);

impl StepBudget {
    const MIN: u32 = 1;
    const MAX: u32 = 1_000_000;

    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        // Deserialized values bypass `new`
        self.0.clamp(Self::MIN, Self::MAX)
    }
}

impl Default for StepBudget {
    fn default() -> Self {
        Self::new(10_000)
    }
}
