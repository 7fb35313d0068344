#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Frame composition for the two camera mounting configurations.
pub mod frames;

/// Bulk point and direction transforms.
pub mod linalg;

/// Point cloud container and rigid transforms over it.
pub mod pointcloud;

/// Calibration pose collection state machine.
pub mod session;
