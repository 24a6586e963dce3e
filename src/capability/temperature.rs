//! Temperature measurement capability (msTemperatureMeasurement).
//!
//! `measuredValue` arrives in hundredths of a degree Celsius, so 2550 means
//! 25.5 degrees.

use super::{Capability, endpoint_allowed};
use crate::convert::{ConversionRule, StateUpdate, round_to};
use crate::exposes::{Access, ExposedMetric};
use crate::zigbee::{Cluster, EndpointId, MessageType};
use log::debug;

/// Temperature capability, optionally restricted to specific endpoints.
#[derive(Debug, Clone, Default)]
pub struct Temperature {
    endpoints: Vec<EndpointId>,
}

impl Temperature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only convert reports coming from the given endpoints.
    pub fn with_endpoints(mut self, endpoints: impl IntoIterator<Item = u8>) -> Self {
        self.endpoints = endpoints.into_iter().map(EndpointId).collect();
        self
    }
}

impl Capability for Temperature {
    fn name(&self) -> &'static str {
        "temperature"
    }

    fn exposes(&self) -> Vec<ExposedMetric> {
        vec![
            ExposedMetric::numeric("temperature", Access::State)
                .with_unit("°C")
                .with_description("Measured temperature"),
        ]
    }

    fn rules(&self) -> Vec<ConversionRule> {
        let endpoints = self.endpoints.clone();
        vec![ConversionRule::new(
            Cluster::MsTemperatureMeasurement,
            [MessageType::AttributeReport, MessageType::ReadResponse],
            move |report, options, _meta| {
                if !endpoint_allowed(&endpoints, report.endpoint) {
                    return None;
                }
                let raw = report.values.float("measuredValue")?;
                let celsius = round_to(raw / 100.0, options.precision);
                debug!("temperature raw={raw}, converted={celsius}");
                Some(StateUpdate::single("temperature", celsius))
            },
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{ConvertOptions, DeviceMeta};
    use crate::zigbee::AttributeReport;
    use serde_json::json;

    fn convert(capability: &Temperature, report: &AttributeReport) -> Option<StateUpdate> {
        capability.rules()[0].convert(report, &ConvertOptions::default(), &DeviceMeta::default())
    }

    #[test]
    fn test_scaling() {
        let capability = Temperature::new();
        let report = AttributeReport::new(
            10,
            Cluster::MsTemperatureMeasurement,
            MessageType::AttributeReport,
        )
        .with_value("measuredValue", 2550);

        let update = convert(&capability, &report).unwrap();
        assert_eq!(update.get("temperature"), Some(&json!(25.5)));
    }

    #[test]
    fn test_endpoint_restriction() {
        let capability = Temperature::new().with_endpoints([10]);

        let allowed = AttributeReport::new(
            10,
            Cluster::MsTemperatureMeasurement,
            MessageType::ReadResponse,
        )
        .with_value("measuredValue", -500);
        let update = convert(&capability, &allowed).unwrap();
        assert_eq!(update.get("temperature"), Some(&json!(-5.0)));

        let blocked = AttributeReport::new(
            9,
            Cluster::MsTemperatureMeasurement,
            MessageType::ReadResponse,
        )
        .with_value("measuredValue", -500);
        assert_eq!(convert(&capability, &blocked), None);
    }

    #[test]
    fn test_missing_attribute() {
        let capability = Temperature::new();
        let report = AttributeReport::new(
            10,
            Cluster::MsTemperatureMeasurement,
            MessageType::AttributeReport,
        );
        assert_eq!(convert(&capability, &report), None);
    }
}
