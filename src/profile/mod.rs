//! Device profile records.
//!
//! A [`DeviceProfile`] is built once at startup and immutable afterwards:
//! identity, endpoint topology, composed capabilities, custom conversion
//! rules, exposure metadata and an optional one-time setup routine. The
//! registry indexes profiles by the model string devices report when they
//! join.

pub mod registry;

pub use registry::ProfileRegistry;

use crate::capability::Capability;
use crate::convert::{ConversionRule, DeviceMeta};
use crate::error::{ProfileError, Result};
use crate::exposes::ExposedMetric;
use crate::zigbee::{BindTarget, Device, EndpointId};
use async_trait::async_trait;
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Logical endpoint name to numeric endpoint id.
///
/// Ids are unique per device and stable for its lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointMap {
    by_name: BTreeMap<String, EndpointId>,
}

impl EndpointMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map endpoint ids under their own decimal names ("11" -> 11).
    pub fn from_numeric(ids: impl IntoIterator<Item = u8>) -> Self {
        let mut map = Self::new();
        for id in ids {
            map.by_name.insert(id.to_string(), EndpointId(id));
        }
        map
    }

    /// Insert a named mapping; rejects an id already mapped under another name.
    pub fn insert(&mut self, name: impl Into<String>, id: u8) -> Result<()> {
        let name = name.into();
        let id = EndpointId(id);
        if self
            .by_name
            .iter()
            .any(|(existing, &existing_id)| existing_id == id && *existing != name)
        {
            return Err(ProfileError::DuplicateEndpoint(id));
        }
        self.by_name.insert(name, id);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<EndpointId> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, id: EndpointId) -> Option<&str> {
        self.by_name
            .iter()
            .find(|&(_, &existing)| existing == id)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, EndpointId)> {
        self.by_name.iter().map(|(name, &id)| (name.as_str(), id))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// One-time device configuration run after commissioning.
///
/// Implementations bind clusters and push reporting policy to the joined
/// device, strictly sequentially. Failures propagate unchanged; retry policy
/// belongs to the caller. Re-running is safe because binding and reporting
/// configuration are idempotent at the protocol level.
#[async_trait]
pub trait SetupRoutine: Send + Sync {
    async fn configure(&self, device: &dyn Device, coordinator: &BindTarget) -> Result<()>;
}

/// Declarative profile for one device model.
pub struct DeviceProfile {
    zigbee_models: Vec<String>,
    model: String,
    vendor: String,
    description: String,
    endpoints: EndpointMap,
    capability_names: Vec<&'static str>,
    capability_rules: Vec<ConversionRule>,
    capability_exposes: Vec<ExposedMetric>,
    custom_rules: Vec<ConversionRule>,
    custom_exposes: Vec<ExposedMetric>,
    meta: DeviceMeta,
    setup: Option<Arc<dyn SetupRoutine>>,
}

impl DeviceProfile {
    /// Start a profile. The model string doubles as the default zigbee model
    /// used for registry matching.
    pub fn new(
        model: impl Into<String>,
        vendor: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let model = model.into();
        Self {
            zigbee_models: vec![model.clone()],
            model,
            vendor: vendor.into(),
            description: description.into(),
            endpoints: EndpointMap::new(),
            capability_names: Vec::new(),
            capability_rules: Vec::new(),
            capability_exposes: Vec::new(),
            custom_rules: Vec::new(),
            custom_exposes: Vec::new(),
            meta: DeviceMeta::default(),
            setup: None,
        }
    }

    /// Override the zigbee model strings this profile matches.
    pub fn with_zigbee_models(
        mut self,
        models: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.zigbee_models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_endpoints(mut self, endpoints: EndpointMap) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Compose a capability: its rules and exposed metrics are registered
    /// into this profile ahead of any custom rules.
    pub fn with_capability(mut self, capability: impl Capability) -> Self {
        debug!("{}: composing capability {}", self.model, capability.name());
        self.capability_names.push(capability.name());
        self.capability_rules.extend(capability.rules());
        self.capability_exposes.extend(capability.exposes());
        self
    }

    pub fn with_rule(mut self, rule: ConversionRule) -> Self {
        self.custom_rules.push(rule);
        self
    }

    pub fn with_expose(mut self, metric: ExposedMetric) -> Self {
        self.custom_exposes.push(metric);
        self
    }

    pub fn with_meta(mut self, meta: DeviceMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_setup(mut self, setup: impl SetupRoutine + 'static) -> Self {
        self.setup = Some(Arc::new(setup));
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn zigbee_models(&self) -> &[String] {
        &self.zigbee_models
    }

    pub fn endpoints(&self) -> &EndpointMap {
        &self.endpoints
    }

    pub fn capabilities(&self) -> &[&'static str] {
        &self.capability_names
    }

    pub fn meta(&self) -> &DeviceMeta {
        &self.meta
    }

    /// All conversion rules, capability rules first.
    pub fn rules(&self) -> impl Iterator<Item = &ConversionRule> {
        self.capability_rules.iter().chain(self.custom_rules.iter())
    }

    /// All exposed metrics, capability metrics first.
    pub fn exposes(&self) -> impl Iterator<Item = &ExposedMetric> {
        self.capability_exposes
            .iter()
            .chain(self.custom_exposes.iter())
    }

    /// Whether a device-reported model string matches this profile.
    pub fn matches_model(&self, reported: &str) -> bool {
        self.zigbee_models.iter().any(|model| model == reported)
    }

    pub fn has_setup(&self) -> bool {
        self.setup.is_some()
    }

    /// Run the setup routine, if the profile declares one.
    pub async fn configure(&self, device: &dyn Device, coordinator: &BindTarget) -> Result<()> {
        match &self.setup {
            Some(setup) => setup.configure(device, coordinator).await,
            None => Ok(()),
        }
    }
}
