//! Pose persistence.
//!
//! Robot and calibration transforms travel as small structured text files
//! (a named matrix block with `rows`/`cols`/`data` fields, as written by
//! OpenCV). [`pose`] reads and writes that format.

/// The pose matrix file format: parse, format, read, write.
pub mod pose;
