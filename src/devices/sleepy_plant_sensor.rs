//! Sleepy plant sensor profile.
//!
//! Battery-powered multi-endpoint sensor: illuminance, temperature and
//! humidity on the climate endpoint, and a soil moisture probe wired to a
//! generic analog input on endpoint 11. The probe reports tenths of a
//! percent, so a raw `presentValue` of 423 publishes as 42.3 %.
//!
//! The device sleeps most of the time, so the setup routine binds the
//! analog-input cluster and pushes a reporting policy to the device itself;
//! afterwards the device wakes on its own schedule to report.

use crate::capability::{Battery, Humidity, Illuminance, Temperature};
use crate::convert::{ConversionRule, DeviceMeta, StateUpdate, round_to};
use crate::error::{ProfileError, Result};
use crate::exposes::{Access, ExposedMetric};
use crate::profile::{DeviceProfile, EndpointMap, SetupRoutine};
use crate::zigbee::{BindTarget, Cluster, Device, EndpointId, MessageType, ReportingConfig};
use async_trait::async_trait;
use log::debug;

/// Endpoint carrying the soil moisture analog input.
const MOISTURE_ENDPOINT: EndpointId = EndpointId(11);

/// Endpoint carrying temperature and humidity.
const CLIMATE_ENDPOINT: u8 = 10;

/// Raw analog-input readings are tenths of a percent.
const MOISTURE_DIVISOR: f64 = 10.0;

/// Reporting policy for the moisture attribute: at most every 5 minutes, at
/// least every hour, and only when the raw value moved by a full unit.
const MOISTURE_REPORT_MIN_SECS: u16 = 300;
const MOISTURE_REPORT_MAX_SECS: u16 = 3600;
const MOISTURE_REPORTABLE_CHANGE: i64 = 1;

/// Soil moisture conversion: `presentValue` on endpoint 11, scaled to a
/// percentage with one decimal. Reports from other endpoints on the same
/// cluster belong to other roles and produce nothing.
///
/// Out-of-range readings pass through unclamped unless the device options
/// set `clamp_percentages`; the declared [0, 100] bounds are informational.
fn soil_moisture_rule() -> ConversionRule {
    ConversionRule::new(
        Cluster::GenAnalogInput,
        [MessageType::AttributeReport, MessageType::ReadResponse],
        |report, options, _meta| {
            debug!("analog input report on endpoint {}", report.endpoint);
            if report.endpoint != MOISTURE_ENDPOINT {
                return None;
            }
            let raw = report.values.float("presentValue")?;
            let mut moisture = round_to(raw / MOISTURE_DIVISOR, 1);
            if options.clamp_percentages {
                moisture = moisture.clamp(0.0, 100.0);
            }
            debug!("soil moisture raw={raw}, converted={moisture}");
            Some(StateUpdate::single("soil_moisture", moisture))
        },
    )
}

/// One-time binding and reporting setup for the moisture endpoint.
///
/// Binding must complete before reporting configuration is attempted; a
/// failed bind aborts the routine and the error propagates to the caller.
struct SleepyPlantSensorSetup;

#[async_trait]
impl SetupRoutine for SleepyPlantSensorSetup {
    async fn configure(&self, device: &dyn Device, coordinator: &BindTarget) -> Result<()> {
        let endpoint = device
            .endpoint(MOISTURE_ENDPOINT)
            .ok_or(ProfileError::EndpointNotFound(MOISTURE_ENDPOINT))?;

        endpoint.bind(Cluster::GenAnalogInput, coordinator).await?;
        endpoint
            .configure_reporting(
                Cluster::GenAnalogInput,
                &[ReportingConfig::new(
                    "presentValue",
                    MOISTURE_REPORT_MIN_SECS,
                    MOISTURE_REPORT_MAX_SECS,
                    MOISTURE_REPORTABLE_CHANGE,
                )],
            )
            .await?;
        Ok(())
    }
}

/// Build the sleepy plant sensor profile.
pub fn sleepy_plant_sensor() -> DeviceProfile {
    DeviceProfile::new(
        "SleepyPlantSensor",
        "LarsvdLee",
        "Sleepy plant sensor with illuminance, climate and soil moisture probes",
    )
    .with_endpoints(EndpointMap::from_numeric([9, CLIMATE_ENDPOINT, MOISTURE_ENDPOINT.0]))
    .with_capability(Illuminance::new())
    .with_capability(Temperature::new().with_endpoints([CLIMATE_ENDPOINT]))
    .with_capability(Battery::new())
    .with_capability(Humidity::new().with_endpoints([CLIMATE_ENDPOINT]))
    .with_rule(soil_moisture_rule())
    .with_expose(
        ExposedMetric::numeric("soil_moisture", Access::State)
            .with_unit("%")
            .with_description("Soil moisture")
            .with_value_min(0.0)
            .with_value_max(100.0),
    )
    .with_meta(DeviceMeta {
        multi_endpoint: true,
    })
    .with_setup(SleepyPlantSensorSetup)
}
