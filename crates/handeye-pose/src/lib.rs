#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Euler (roll-pitch-yaw) angles in four rotation conventions.
pub mod euler;

/// Reading and writing pose files.
pub mod io;

/// Quaternion representation of rotations.
pub mod quaternion;

/// Axis-angle and rotation-vector representations of rotations.
pub mod rotation;

/// Rigid 4x4 homogeneous transforms.
pub mod transform;
