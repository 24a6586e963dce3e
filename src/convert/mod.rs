//! Conversion rules: pure attribute-report to partial-state functions.
//!
//! A [`ConversionRule`] pairs a cluster/message-type match with a pure
//! function computing a [`StateUpdate`] from a validated report. Rules hold
//! no state across invocations; two calls with the same report yield the
//! same result. A rule that does not apply returns `None`, never an error.

pub mod dispatch;

pub use dispatch::dispatch;

use crate::zigbee::{AttributeReport, Cluster, MessageType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Round to `decimals` decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Partial state update returned by a conversion rule.
///
/// The dispatcher merges updates from all matching rules and hands the
/// result to the bridge's publish callback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate(BTreeMap<String, Value>);

impl StateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// An update carrying a single metric.
    pub fn single(key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut update = Self::new();
        update.set(key, value);
        update
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Merge another update into this one; later values win on key clashes.
    pub fn merge(&mut self, other: StateUpdate) {
        self.0.extend(other.0);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Per-device converter options supplied by bridge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Clamp percentage metrics into their declared bounds instead of
    /// passing out-of-range readings through.
    pub clamp_percentages: bool,

    /// Decimal places for scaled measurement metrics.
    pub precision: u32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            clamp_percentages: false,
            precision: 1,
        }
    }
}

/// Profile metadata flags handed to conversion rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceMeta {
    /// Device exposes more than one functional endpoint.
    pub multi_endpoint: bool,
}

type ConvertFn =
    dyn Fn(&AttributeReport, &ConvertOptions, &DeviceMeta) -> Option<StateUpdate> + Send + Sync;

/// A conversion rule: matched cluster, matched message types, and the pure
/// function computing a partial state update from a matching report.
#[derive(Clone)]
pub struct ConversionRule {
    cluster: Cluster,
    message_types: Vec<MessageType>,
    convert: Arc<ConvertFn>,
}

impl ConversionRule {
    pub fn new<F>(
        cluster: Cluster,
        message_types: impl IntoIterator<Item = MessageType>,
        convert: F,
    ) -> Self
    where
        F: Fn(&AttributeReport, &ConvertOptions, &DeviceMeta) -> Option<StateUpdate>
            + Send
            + Sync
            + 'static,
    {
        Self {
            cluster,
            message_types: message_types.into_iter().collect(),
            convert: Arc::new(convert),
        }
    }

    pub fn cluster(&self) -> Cluster {
        self.cluster
    }

    /// Whether this rule applies to the report's cluster and message type.
    pub fn matches(&self, report: &AttributeReport) -> bool {
        report.cluster == self.cluster && self.message_types.contains(&report.message_type)
    }

    /// Run the rule. `None` when the rule does not apply to this report.
    pub fn convert(
        &self,
        report: &AttributeReport,
        options: &ConvertOptions,
        meta: &DeviceMeta,
    ) -> Option<StateUpdate> {
        if !self.matches(report) {
            return None;
        }
        (self.convert)(report, options, meta)
    }
}

impl fmt::Debug for ConversionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRule")
            .field("cluster", &self.cluster)
            .field("message_types", &self.message_types)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(42.34, 1), 42.3);
        assert_eq!(round_to(42.35, 1), 42.4);
        assert_eq!(round_to(100.0, 1), 100.0);
        assert_eq!(round_to(0.25, 0), 0.0);
    }

    #[test]
    fn test_state_update_merge() {
        let mut update = StateUpdate::single("temperature", 25.5);
        update.merge(StateUpdate::single("humidity", 55.5));
        update.merge(StateUpdate::single("temperature", 26.0));

        assert_eq!(update.len(), 2);
        assert_eq!(update.get("temperature"), Some(&json!(26.0)));
        assert_eq!(update.get("humidity"), Some(&json!(55.5)));
    }

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert!(!options.clamp_percentages);
        assert_eq!(options.precision, 1);
    }

    #[test]
    fn test_options_deserialize_partial() {
        let options: ConvertOptions =
            serde_json::from_value(json!({"clamp_percentages": true})).unwrap();
        assert!(options.clamp_percentages);
        assert_eq!(options.precision, 1);
    }

    #[test]
    fn test_rule_matching() {
        use crate::zigbee::Cluster;

        let rule = ConversionRule::new(
            Cluster::GenAnalogInput,
            [MessageType::AttributeReport],
            |report, _options, _meta| {
                report
                    .values
                    .integer("presentValue")
                    .map(|raw| StateUpdate::single("raw", raw))
            },
        );

        let report =
            AttributeReport::new(11, Cluster::GenAnalogInput, MessageType::AttributeReport)
                .with_value("presentValue", 7);
        assert!(rule.matches(&report));
        assert_eq!(
            rule.convert(&report, &ConvertOptions::default(), &DeviceMeta::default()),
            Some(StateUpdate::single("raw", 7))
        );

        // Wrong message type never reaches the function
        let read = AttributeReport::new(11, Cluster::GenAnalogInput, MessageType::ReadResponse)
            .with_value("presentValue", 7);
        assert!(!rule.matches(&read));
        assert_eq!(
            rule.convert(&read, &ConvertOptions::default(), &DeviceMeta::default()),
            None
        );
    }
}
