//! Relative humidity capability (msRelativeHumidity).
//!
//! `measuredValue` arrives in hundredths of a percent. Readings outside
//! [0, 100] are sensor glitches and are dropped, unless the device options
//! request clamping instead.

use super::{Capability, endpoint_allowed};
use crate::convert::{ConversionRule, StateUpdate, round_to};
use crate::exposes::{Access, ExposedMetric};
use crate::zigbee::{Cluster, EndpointId, MessageType};
use log::{debug, warn};

/// Humidity capability, optionally restricted to specific endpoints.
#[derive(Debug, Clone, Default)]
pub struct Humidity {
    endpoints: Vec<EndpointId>,
}

impl Humidity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only convert reports coming from the given endpoints.
    pub fn with_endpoints(mut self, endpoints: impl IntoIterator<Item = u8>) -> Self {
        self.endpoints = endpoints.into_iter().map(EndpointId).collect();
        self
    }
}

impl Capability for Humidity {
    fn name(&self) -> &'static str {
        "humidity"
    }

    fn exposes(&self) -> Vec<ExposedMetric> {
        vec![
            ExposedMetric::numeric("humidity", Access::State)
                .with_unit("%")
                .with_description("Measured relative humidity")
                .with_value_min(0.0)
                .with_value_max(100.0),
        ]
    }

    fn rules(&self) -> Vec<ConversionRule> {
        let endpoints = self.endpoints.clone();
        vec![ConversionRule::new(
            Cluster::MsRelativeHumidity,
            [MessageType::AttributeReport, MessageType::ReadResponse],
            move |report, options, _meta| {
                if !endpoint_allowed(&endpoints, report.endpoint) {
                    return None;
                }
                let raw = report.values.float("measuredValue")?;
                let mut percent = raw / 100.0;
                if !(0.0..=100.0).contains(&percent) {
                    if options.clamp_percentages {
                        percent = percent.clamp(0.0, 100.0);
                    } else {
                        warn!("humidity reading out of range, dropped: raw={raw}");
                        return None;
                    }
                }
                let percent = round_to(percent, options.precision);
                debug!("humidity raw={raw}, converted={percent}");
                Some(StateUpdate::single("humidity", percent))
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

    fn report(endpoint: u8, raw: i64) -> AttributeReport {
        AttributeReport::new(
            endpoint,
            Cluster::MsRelativeHumidity,
            MessageType::AttributeReport,
        )
        .with_value("measuredValue", raw)
    }

    fn convert(capability: &Humidity, report: &AttributeReport) -> Option<StateUpdate> {
        capability.rules()[0].convert(report, &ConvertOptions::default(), &DeviceMeta::default())
    }

    #[test]
    fn test_scaling() {
        let capability = Humidity::new();
        let update = convert(&capability, &report(10, 5550)).unwrap();
        assert_eq!(update.get("humidity"), Some(&json!(55.5)));
    }

    #[test]
    fn test_out_of_range_dropped_by_default() {
        let capability = Humidity::new();
        assert_eq!(convert(&capability, &report(10, 10100)), None);
        assert_eq!(convert(&capability, &report(10, -50)), None);
    }

    #[test]
    fn test_out_of_range_clamped_when_requested() {
        let capability = Humidity::new();
        let options = ConvertOptions {
            clamp_percentages: true,
            ..Default::default()
        };
        let update = capability.rules()[0]
            .convert(&report(10, 10100), &options, &DeviceMeta::default())
            .unwrap();
        assert_eq!(update.get("humidity"), Some(&json!(100.0)));
    }

    #[test]
    fn test_endpoint_restriction() {
        let capability = Humidity::new().with_endpoints([10]);
        assert!(convert(&capability, &report(10, 5000)).is_some());
        assert_eq!(convert(&capability, &report(11, 5000)), None);
    }
}
