//! Process-wide profile registration table.

use super::DeviceProfile;
use crate::error::{ProfileError, Result};
use log::info;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of device profiles keyed by reported zigbee model string.
///
/// Populated once at startup and shared with the bridge for the process
/// lifetime; there is no teardown.
#[derive(Default)]
pub struct ProfileRegistry {
    by_model: RwLock<HashMap<String, Arc<DeviceProfile>>>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile under each of its zigbee model strings.
    pub fn register(&self, profile: DeviceProfile) -> Result<Arc<DeviceProfile>> {
        let profile = Arc::new(profile);
        let mut table = self.by_model.write();

        for model in profile.zigbee_models() {
            if table.contains_key(model) {
                return Err(ProfileError::DuplicateModel(model.clone()));
            }
        }
        for model in profile.zigbee_models() {
            table.insert(model.clone(), Arc::clone(&profile));
        }

        info!(
            "Registered device profile {} ({})",
            profile.model(),
            profile.vendor()
        );
        Ok(profile)
    }

    /// Look up the profile matching a device-reported model string.
    pub fn match_model(&self, reported: &str) -> Option<Arc<DeviceProfile>> {
        self.by_model.read().get(reported).cloned()
    }

    /// Number of registered model strings.
    pub fn len(&self) -> usize {
        self.by_model.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_model.read().is_empty()
    }
}
