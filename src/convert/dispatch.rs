//! Inbound report dispatch.
//!
//! Runs every matching rule of a profile against a validated report, merges
//! the partial updates and hands the merged state to the bridge's publish
//! callback. A report no rule claims produces nothing and is only visible
//! at debug level.

use super::{ConvertOptions, StateUpdate};
use crate::profile::DeviceProfile;
use crate::zigbee::AttributeReport;
use log::debug;

/// Convert one inbound report through a profile.
///
/// Capability rules run before the profile's custom rules; later updates win
/// on key clashes. `publish` is invoked once with the merged update, and only
/// when at least one rule produced a value.
pub fn dispatch<F>(
    profile: &DeviceProfile,
    report: &AttributeReport,
    options: &ConvertOptions,
    mut publish: F,
) -> Option<StateUpdate>
where
    F: FnMut(&StateUpdate),
{
    let mut merged = StateUpdate::new();
    for rule in profile.rules() {
        if let Some(update) = rule.convert(report, options, profile.meta()) {
            merged.merge(update);
        }
    }

    if merged.is_empty() {
        debug!(
            "{}: no rule matched {} {} on endpoint {}",
            profile.model(),
            report.cluster,
            report.message_type,
            report.endpoint
        );
        return None;
    }

    publish(&merged);
    Some(merged)
}
