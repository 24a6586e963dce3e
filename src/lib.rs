//! Zigbee device profile library.
//!
//! This library provides declarative device profiles for a zigbee2mqtt-style
//! bridge. A profile describes one device model: its endpoint topology, the
//! metrics it exposes, the conversion rules turning raw attribute reports
//! into published state, and a one-time setup routine run after the device
//! joins the network.
//!
//! The surrounding bridge (MQTT publishing, Zigbee network stack, message
//! routing) is an external collaborator reached through the traits in
//! [`zigbee`].

pub mod capability;
pub mod convert;
pub mod devices;
pub mod error;
pub mod exposes;
pub mod profile;
pub mod zigbee;
