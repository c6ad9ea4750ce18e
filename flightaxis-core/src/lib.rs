#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::unescaped_backticks)]

//! Core traits and types for the FlightAxis bridge.

/// Wall-clock time sources.
pub mod clock;
/// Airframe configuration flags.
pub mod frame;
/// Kinematic output types and conversions.
pub mod kinematics;
/// Aircraft state snapshots.
pub mod state;
/// Byte-stream transport to the simulator.
pub mod transport;
