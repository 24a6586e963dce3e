//! Typed Zigbee wire model.
//!
//! Clusters, endpoints and attribute reports as explicit tagged types. The
//! bridge validates inbound traffic into an [`AttributeReport`] before any
//! conversion rule runs, so a malformed message never reaches profile code.

pub mod endpoint;
pub mod message;

pub use endpoint::{BindTarget, Device, DeviceEndpoint, ReportingConfig};
pub use message::{AttributeReport, AttributeValues, MessageType};

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};

/// Zigbee clusters understood by the profiles in this crate.
///
/// `Display`/`FromStr` use the zigbee-herdsman wire names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Cluster {
    /// Generic analog input (0x000C), used here for soil moisture probes.
    #[strum(serialize = "genAnalogInput")]
    #[serde(rename = "genAnalogInput")]
    GenAnalogInput,

    /// Illuminance measurement (0x0400).
    #[strum(serialize = "msIlluminanceMeasurement")]
    #[serde(rename = "msIlluminanceMeasurement")]
    MsIlluminanceMeasurement,

    /// Temperature measurement (0x0402).
    #[strum(serialize = "msTemperatureMeasurement")]
    #[serde(rename = "msTemperatureMeasurement")]
    MsTemperatureMeasurement,

    /// Relative humidity measurement (0x0405).
    #[strum(serialize = "msRelativeHumidity")]
    #[serde(rename = "msRelativeHumidity")]
    MsRelativeHumidity,

    /// Power configuration (0x0001), battery status.
    #[strum(serialize = "genPowerCfg")]
    #[serde(rename = "genPowerCfg")]
    GenPowerCfg,
}

/// Logical sub-address on a physical device exposing one functional role.
///
/// Ids are unique per device instance and stable for the device's lifetime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EndpointId(pub u8);

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for EndpointId {
    fn from(id: u8) -> Self {
        EndpointId(id)
    }
}
