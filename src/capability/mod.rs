//! Standard sensor capabilities.
//!
//! Each capability is an independent module contributing its own exposed
//! metrics and conversion rules over the shared device state record. A
//! profile composes capabilities explicitly via
//! [`DeviceProfile::with_capability`](crate::profile::DeviceProfile::with_capability);
//! there is no runtime mixing.

pub mod battery;
pub mod humidity;
pub mod illuminance;
pub mod temperature;

pub use battery::Battery;
pub use humidity::Humidity;
pub use illuminance::Illuminance;
pub use temperature::Temperature;

use crate::convert::ConversionRule;
use crate::exposes::ExposedMetric;
use crate::zigbee::EndpointId;

/// A self-contained sensor capability.
pub trait Capability: Send + Sync {
    /// Stable name for logging and debugging.
    fn name(&self) -> &'static str;

    /// Metrics this capability publishes.
    fn exposes(&self) -> Vec<ExposedMetric>;

    /// Conversion rules mapping raw reports to those metrics.
    fn rules(&self) -> Vec<ConversionRule>;
}

/// Endpoint restriction shared by the measurement capabilities: an empty
/// restriction list accepts every endpoint.
pub(crate) fn endpoint_allowed(restrict: &[EndpointId], endpoint: EndpointId) -> bool {
    restrict.is_empty() || restrict.contains(&endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_allowed() {
        assert!(endpoint_allowed(&[], EndpointId(3)));
        assert!(endpoint_allowed(&[EndpointId(10)], EndpointId(10)));
        assert!(!endpoint_allowed(&[EndpointId(10)], EndpointId(11)));
    }
}
