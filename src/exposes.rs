//! Exposure metadata for downstream consumers.
//!
//! An [`ExposedMetric`] describes the public shape of a published metric
//! (key name, unit, bounds) so a UI or API can render it without knowing
//! anything about the raw protocol. Descriptors are purely informational
//! and carry no behavior; declared bounds are not enforced by conversion
//! rules unless the device options ask for clamping.

use serde::{Deserialize, Serialize};

/// Access level of an exposed metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Published in device state only.
    State,
    /// Published and readable on demand.
    StateGet,
    /// Published and writable.
    StateSet,
}

/// Descriptor of one published metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposedMetric {
    pub name: String,
    pub access: Access,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_max: Option<f64>,
}

impl ExposedMetric {
    /// A numeric metric with no unit or bounds yet.
    pub fn numeric(name: impl Into<String>, access: Access) -> Self {
        Self {
            name: name.into(),
            access,
            unit: None,
            description: None,
            value_min: None,
            value_max: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_value_min(mut self, min: f64) -> Self {
        self.value_min = Some(min);
        self
    }

    pub fn with_value_max(mut self, max: f64) -> Self {
        self.value_max = Some(max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_chain() {
        let metric = ExposedMetric::numeric("soil_moisture", Access::State)
            .with_unit("%")
            .with_description("Soil moisture")
            .with_value_min(0.0)
            .with_value_max(100.0);

        assert_eq!(metric.name, "soil_moisture");
        assert_eq!(metric.unit.as_deref(), Some("%"));
        assert_eq!(metric.value_min, Some(0.0));
        assert_eq!(metric.value_max, Some(100.0));
    }

    #[test]
    fn test_schema_omits_unset_fields() {
        let metric = ExposedMetric::numeric("battery", Access::State).with_unit("%");
        let json = serde_json::to_value(&metric).unwrap();

        assert_eq!(json["name"], "battery");
        assert_eq!(json["access"], "state");
        assert_eq!(json["unit"], "%");
        assert_eq!(json.get("value_min"), None);
        assert_eq!(json.get("description"), None);
        assert_eq!(json, json!({"name": "battery", "access": "state", "unit": "%"}));
    }
}
