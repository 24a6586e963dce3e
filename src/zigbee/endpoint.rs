//! Device I/O seams.
//!
//! The network stack hands setup routines opaque endpoint handles that can
//! bind clusters and push reporting configuration to the physical device.
//! Both calls go over the air, so they are async and can fail; profiles
//! propagate those failures unchanged and leave retry policy to the caller.

use super::{Cluster, EndpointId};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Where bound reports should be delivered, normally the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindTarget {
    pub ieee_address: String,
    pub endpoint: EndpointId,
}

impl BindTarget {
    pub fn new(ieee_address: impl Into<String>, endpoint: impl Into<EndpointId>) -> Self {
        Self {
            ieee_address: ieee_address.into(),
            endpoint: endpoint.into(),
        }
    }

    /// The coordinator's first endpoint, the usual report sink.
    pub fn coordinator(ieee_address: impl Into<String>) -> Self {
        Self::new(ieee_address, 1)
    }
}

/// Per-attribute reporting policy pushed to the device during setup.
///
/// Intervals are in seconds. The device itself enforces the policy once
/// configured; this software never re-checks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingConfig {
    pub attribute: String,
    pub minimum_report_interval: u16,
    pub maximum_report_interval: u16,
    pub reportable_change: i64,
}

impl ReportingConfig {
    pub fn new(
        attribute: impl Into<String>,
        minimum_report_interval: u16,
        maximum_report_interval: u16,
        reportable_change: i64,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            minimum_report_interval,
            maximum_report_interval,
            reportable_change,
        }
    }
}

/// One endpoint of a joined device, as provided by the network stack.
#[async_trait]
pub trait DeviceEndpoint: Send + Sync {
    /// Direct the device to send reports for `cluster` to `target`.
    async fn bind(&self, cluster: Cluster, target: &BindTarget) -> Result<()>;

    /// Push attribute reporting configuration for `cluster` to the device.
    async fn configure_reporting(
        &self,
        cluster: Cluster,
        configs: &[ReportingConfig],
    ) -> Result<()>;
}

/// A joined device, as seen by a profile's setup routine.
pub trait Device: Send + Sync {
    fn endpoint(&self, id: EndpointId) -> Option<&dyn DeviceEndpoint>;
}
