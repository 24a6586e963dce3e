//! Battery status capability (genPowerCfg).

use super::Capability;
use crate::convert::{ConversionRule, StateUpdate, round_to};
use crate::exposes::{Access, ExposedMetric};
use crate::zigbee::{Cluster, MessageType};
use log::debug;

/// 0xFF means "unknown" for both battery attributes.
const BATTERY_UNKNOWN: i64 = 0xFF;

/// Battery capability: percentage and voltage from the power configuration
/// cluster. Not endpoint-restricted; battery state is per-device.
#[derive(Debug, Clone, Default)]
pub struct Battery;

impl Battery {
    pub fn new() -> Self {
        Self
    }
}

impl Capability for Battery {
    fn name(&self) -> &'static str {
        "battery"
    }

    fn exposes(&self) -> Vec<ExposedMetric> {
        vec![
            ExposedMetric::numeric("battery", Access::State)
                .with_unit("%")
                .with_description("Remaining battery")
                .with_value_min(0.0)
                .with_value_max(100.0),
            ExposedMetric::numeric("voltage", Access::State)
                .with_unit("mV")
                .with_description("Battery voltage"),
        ]
    }

    fn rules(&self) -> Vec<ConversionRule> {
        vec![ConversionRule::new(
            Cluster::GenPowerCfg,
            [MessageType::AttributeReport, MessageType::ReadResponse],
            |report, options, _meta| {
                let mut update = StateUpdate::new();

                // Percentage remaining is reported in half-percent steps.
                if let Some(raw) = report.values.integer("batteryPercentageRemaining")
                    && raw != BATTERY_UNKNOWN
                {
                    let percent = round_to(raw as f64 / 2.0, options.precision);
                    debug!("battery raw={raw}, converted={percent}%");
                    update.set("battery", percent);
                }

                // Voltage is reported in units of 100 mV.
                if let Some(raw) = report.values.integer("batteryVoltage")
                    && raw != BATTERY_UNKNOWN
                {
                    update.set("voltage", raw * 100);
                }

                if update.is_empty() { None } else { Some(update) }
            },
        )]
    }
}
