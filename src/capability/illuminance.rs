//! Illuminance measurement capability (msIlluminanceMeasurement).
//!
//! `measuredValue` is logarithmic: `10000 * log10(lux) + 1`, with 0 meaning
//! "too low to measure".

use super::{Capability, endpoint_allowed};
use crate::convert::{ConversionRule, StateUpdate};
use crate::exposes::{Access, ExposedMetric};
use crate::zigbee::{Cluster, EndpointId, MessageType};
use log::debug;

/// Illuminance capability, optionally restricted to specific endpoints.
#[derive(Debug, Clone, Default)]
pub struct Illuminance {
    endpoints: Vec<EndpointId>,
}

impl Illuminance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only convert reports coming from the given endpoints.
    pub fn with_endpoints(mut self, endpoints: impl IntoIterator<Item = u8>) -> Self {
        self.endpoints = endpoints.into_iter().map(EndpointId).collect();
        self
    }
}

impl Capability for Illuminance {
    fn name(&self) -> &'static str {
        "illuminance"
    }

    fn exposes(&self) -> Vec<ExposedMetric> {
        vec![
            ExposedMetric::numeric("illuminance", Access::State)
                .with_unit("lx")
                .with_description("Measured illuminance")
                .with_value_min(0.0),
        ]
    }

    fn rules(&self) -> Vec<ConversionRule> {
        let endpoints = self.endpoints.clone();
        vec![ConversionRule::new(
            Cluster::MsIlluminanceMeasurement,
            [MessageType::AttributeReport, MessageType::ReadResponse],
            move |report, _options, _meta| {
                if !endpoint_allowed(&endpoints, report.endpoint) {
                    return None;
                }
                let raw = report.values.float("measuredValue")?;
                let lux = if raw <= 0.0 {
                    0.0
                } else {
                    10f64.powf((raw - 1.0) / 10000.0).round()
                };
                debug!("illuminance raw={raw}, converted={lux} lx");
                Some(StateUpdate::single("illuminance", lux))
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

    fn convert(raw: i64) -> Option<StateUpdate> {
        let report = AttributeReport::new(
            9,
            Cluster::MsIlluminanceMeasurement,
            MessageType::AttributeReport,
        )
        .with_value("measuredValue", raw);
        Illuminance::new().rules()[0].convert(
            &report,
            &ConvertOptions::default(),
            &DeviceMeta::default(),
        )
    }

    #[test]
    fn test_log_scale() {
        // raw = 10000 * log10(lux) + 1
        assert_eq!(convert(1).unwrap().get("illuminance"), Some(&json!(1.0)));
        assert_eq!(
            convert(10001).unwrap().get("illuminance"),
            Some(&json!(10.0))
        );
        assert_eq!(
            convert(30001).unwrap().get("illuminance"),
            Some(&json!(1000.0))
        );
    }

    #[test]
    fn test_zero_means_dark() {
        assert_eq!(convert(0).unwrap().get("illuminance"), Some(&json!(0.0)));
    }
}
