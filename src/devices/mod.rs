//! Concrete device profiles.

pub mod sleepy_plant_sensor;

pub use sleepy_plant_sensor::sleepy_plant_sensor;

use crate::error::Result;
use crate::profile::ProfileRegistry;

/// Register every built-in profile into the given registry.
pub fn register_all(registry: &ProfileRegistry) -> Result<()> {
    registry.register(sleepy_plant_sensor())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all() {
        let registry = ProfileRegistry::new();
        register_all(&registry).unwrap();
        assert!(registry.match_model("SleepyPlantSensor").is_some());
    }
}
