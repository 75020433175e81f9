use crate::config::range_types::StepBudget;
use crate::errors::{WayfinderError, WayfinderResult};
use crate::terrain::coordinates::GridCoord;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct WayfinderConfig {
    pub settings: WorldSettings,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Validate)]
#[serde(default)]
// NOTE: When adding new fields, update `Default` and the config round-trip test
pub struct WorldSettings {
    /// Seed for the first generated world
    pub seed: u32,
    #[validate(range(min = 1, max = 4096))]
    pub width: u32,
    #[validate(range(min = 1, max = 4096))]
    pub height: u32,
    /// Where the agent starts on the first world
    pub agent_start: GridCoord,
    /// Upper bound on agent moves for a single run
    pub step_budget: StepBudget,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            seed: 1234,
            width: 256,
            height: 256,
            agent_start: GridCoord::new(128, 128),
            step_budget: StepBudget::default(),
        }
    }
}

impl WorldSettings {
    /// Check field ranges and that the agent start lies on the map
    pub fn check(&self) -> WayfinderResult<()> {
        self.validate().map_err(|validation_errors| {
            let error_details = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    format!("{field}: {}", error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            WayfinderError::InvalidConfig {
                reason: format!("World settings validation failed: {error_details}"),
            }
        })?;

        if !self.agent_start.is_within(self.width, self.height) {
            return Err(WayfinderError::InvalidConfig {
                reason: format!(
                    "Agent start {} lies outside the {}x{} map",
                    self.agent_start, self.width, self.height
                ),
            });
        }

        Ok(())
    }
}
