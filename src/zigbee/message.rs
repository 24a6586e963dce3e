//! Inbound attribute report messages.
//!
//! An [`AttributeReport`] is the validated form of an unsolicited report or
//! read response from a device: endpoint, cluster, message type and the
//! attribute values it carried. Conversion rules only ever see this type;
//! a missing attribute is an explicit `None` from the typed accessors, not
//! a property probe on an untyped blob.

use super::{Cluster, EndpointId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// How an attribute value arrived from the device.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum MessageType {
    /// Unsolicited or scheduled report pushed by the device.
    #[strum(serialize = "attributeReport")]
    #[serde(rename = "attributeReport")]
    AttributeReport,

    /// Response to an explicit attribute read.
    #[strum(serialize = "readResponse")]
    #[serde(rename = "readResponse")]
    ReadResponse,
}

/// Attribute name to value map carried by a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeValues(BTreeMap<String, Value>);

impl AttributeValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute value (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Read an attribute as an integer. `None` if absent or not an integer.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.0.get(name).and_then(Value::as_i64)
    }

    /// Read an attribute as a float; integer values are widened.
    /// `None` if absent or non-numeric.
    pub fn float(&self, name: &str) -> Option<f64> {
        self.0.get(name).and_then(Value::as_f64)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A validated inbound report from one endpoint of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeReport {
    pub endpoint: EndpointId,
    pub cluster: Cluster,
    pub message_type: MessageType,
    pub values: AttributeValues,
}

impl AttributeReport {
    pub fn new(endpoint: impl Into<EndpointId>, cluster: Cluster, message_type: MessageType) -> Self {
        Self {
            endpoint: endpoint.into(),
            cluster,
            message_type,
            values: AttributeValues::new(),
        }
    }

    /// Add an attribute value (builder style).
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values = self.values.with(name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors() {
        let values = AttributeValues::new()
            .with("presentValue", 423)
            .with("calibration", 1.5);

        assert_eq!(values.integer("presentValue"), Some(423));
        assert_eq!(values.float("presentValue"), Some(423.0));
        assert_eq!(values.float("calibration"), Some(1.5));
        // Floats do not silently truncate to integers
        assert_eq!(values.integer("calibration"), None);
    }

    #[test]
    fn test_missing_attribute_is_none() {
        let values = AttributeValues::new().with("presentValue", 10);
        assert!(!values.contains("measuredValue"));
        assert_eq!(values.integer("measuredValue"), None);
        assert_eq!(values.float("measuredValue"), None);
    }

    #[test]
    fn test_report_builder() {
        let report = AttributeReport::new(11, Cluster::GenAnalogInput, MessageType::AttributeReport)
            .with_value("presentValue", 755);

        assert_eq!(report.endpoint, EndpointId(11));
        assert_eq!(report.cluster, Cluster::GenAnalogInput);
        assert_eq!(report.values.integer("presentValue"), Some(755));
    }

    #[test]
    fn test_report_serializes_with_wire_names() {
        let report = AttributeReport::new(11, Cluster::GenAnalogInput, MessageType::ReadResponse);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["cluster"], "genAnalogInput");
        assert_eq!(json["message_type"], "readResponse");
        assert_eq!(json["endpoint"], 11);
    }
}
