use std::path::Path;

use crate::transform::{RigidTransform, TransformError};

/// Error types for pose file reading and writing.
#[derive(Debug, thiserror::Error)]
pub enum PoseIoError {
    /// Error reading or writing file
    #[error("error reading or writing file")]
    Io(#[from] std::io::Error),

    /// A required field is missing from the pose block
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// The flattened data length does not match the declared shape
    #[error("data length {len} does not match declared shape {rows}x{cols}")]
    ShapeMismatch {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
        /// Number of values found in `data`.
        len: usize,
    },

    /// The block is not the 4x4 matrix a rigid transform requires
    #[error("expected a 4x4 pose matrix, got {rows}x{cols}")]
    NotHomogeneous {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
    },

    /// The 4x4 block is not a valid homogeneous transform
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// A named numeric block read from a pose file: shape plus flattened
/// row-major data.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row-major values, `rows * cols` of them.
    pub data: Vec<f64>,
}

impl PoseMatrix {
    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Interpret a 3x1 (or 1x3) block as a pure translation.
    pub fn as_translation(&self) -> Option<[f64; 3]> {
        if self.rows * self.cols == 3 && (self.rows == 1 || self.cols == 1) {
            Some([self.data[0], self.data[1], self.data[2]])
        } else {
            None
        }
    }
}

impl TryFrom<&PoseMatrix> for RigidTransform {
    type Error = PoseIoError;

    fn try_from(pose: &PoseMatrix) -> Result<Self, Self::Error> {
        if pose.rows != 4 || pose.cols != 4 {
            return Err(PoseIoError::NotHomogeneous {
                rows: pose.rows,
                cols: pose.cols,
            });
        }
        let mut matrix = [[0.0; 4]; 4];
        for (i, row) in matrix.iter_mut().enumerate() {
            row.copy_from_slice(&pose.data[i * 4..(i + 1) * 4]);
        }
        Ok(RigidTransform::from_homogeneous(&matrix)?)
    }
}

fn parse_value(s: &str) -> Result<f64, PoseIoError> {
    s.parse::<f64>()
        .map_err(|e| PoseIoError::Parse(format!("{}: {}", s, e)))
}

fn parse_field(s: &str) -> Result<usize, PoseIoError> {
    s.trim()
        .parse::<usize>()
        .map_err(|e| PoseIoError::Parse(format!("{}: {}", s.trim(), e)))
}

/// Parse a pose document into its matrix block.
///
/// The document is a named mapping (`PoseState`, possibly tagged
/// `!!opencv-matrix`) with `rows`, `cols`, an ignored `dt` element type, and
/// a flat row-major `data` list that may span multiple lines. OpenCV writes
/// these files with a legacy `%YAML:1.0` first line that standard structured
/// parsers reject, so that token is normalized (`:` replaced by a space)
/// before scanning.
///
/// # Arguments
///
/// * `text` - The document contents.
///
/// # Returns
///
/// The matrix block with its declared shape.
///
/// # Errors
///
/// [`PoseIoError`] when a field is missing, a value does not parse, or the
/// data length does not match `rows * cols`.
///
/// Example:
///
/// ```
/// use handeye_pose::io::pose::parse_pose;
///
/// let text = "%YAML:1.0\n---\nPoseState: !!opencv-matrix\n   rows: 3\n   cols: 1\n   dt: d\n   data: [ 1., 2., 3. ]\n";
/// let pose = parse_pose(text).unwrap();
/// assert_eq!(pose.as_translation(), Some([1.0, 2.0, 3.0]));
/// ```
pub fn parse_pose(text: &str) -> Result<PoseMatrix, PoseIoError> {
    // normalize the legacy OpenCV header before structured parsing
    let normalized = match text.lines().next() {
        Some(first_line) if first_line.contains("%YAML:1.0") => {
            let rest = &text[first_line.len()..];
            format!("{}{}", first_line.replace(':', " "), rest)
        }
        _ => text.to_string(),
    };

    let mut rows = None;
    let mut cols = None;
    let mut data_buf: Option<String> = None;
    let mut in_data = false;

    for line in normalized.lines() {
        let line = line.trim();
        if in_data {
            let buf = data_buf.as_mut().ok_or(PoseIoError::MissingField("data"))?;
            buf.push(' ');
            buf.push_str(line);
            in_data = !line.contains(']');
        } else if let Some(rest) = line.strip_prefix("rows:") {
            rows = Some(parse_field(rest)?);
        } else if let Some(rest) = line.strip_prefix("cols:") {
            cols = Some(parse_field(rest)?);
        } else if let Some(rest) = line.strip_prefix("data:") {
            in_data = !rest.contains(']');
            data_buf = Some(rest.to_string());
        }
    }

    let rows = rows.ok_or(PoseIoError::MissingField("rows"))?;
    let cols = cols.ok_or(PoseIoError::MissingField("cols"))?;
    let data_buf = data_buf.ok_or(PoseIoError::MissingField("data"))?;

    let data = data_buf
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_value)
        .collect::<Result<Vec<_>, _>>()?;

    if data.len() != rows * cols {
        return Err(PoseIoError::ShapeMismatch {
            rows,
            cols,
            len: data.len(),
        });
    }

    Ok(PoseMatrix { rows, cols, data })
}

/// Read a pose document from a file.
///
/// # Errors
///
/// [`PoseIoError`] on I/O failure or any [`parse_pose`] error.
pub fn read_pose(path: impl AsRef<Path>) -> Result<PoseMatrix, PoseIoError> {
    parse_pose(&std::fs::read_to_string(path)?)
}

/// Read a rigid transform from a pose file, requiring a valid 4x4 block.
///
/// # Errors
///
/// [`PoseIoError`] on I/O failure, parse failure, a non-4x4 block, or an
/// invalid bottom row.
pub fn read_rigid_transform(path: impl AsRef<Path>) -> Result<RigidTransform, PoseIoError> {
    RigidTransform::try_from(&read_pose(path)?)
}

/// Format a rigid transform as a pose document.
///
/// Writes the legacy-header variant (`%YAML:1.0`, element type `d` for f64)
/// so that the output is accepted both by [`parse_pose`] and by OpenCV.
/// Values are printed with Rust's shortest round-trip float formatting, so
/// `parse_pose(format_pose(t))` recovers `t` exactly.
pub fn format_pose(pose: &RigidTransform) -> String {
    let values = pose
        .to_row_major()
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "%YAML:1.0\n---\nPoseState: !!opencv-matrix\n   rows: 4\n   cols: 4\n   dt: d\n   data: [ {} ]\n",
        values
    )
}

/// Write a rigid transform to a pose file.
///
/// # Errors
///
/// [`PoseIoError::Io`] on I/O failure.
pub fn write_pose(path: impl AsRef<Path>, pose: &RigidTransform) -> Result<(), PoseIoError> {
    std::fs::write(path, format_pose(pose))?;
    Ok(())
}

/// Parse a robot pose entered as one line of 16 whitespace-separated values
/// describing a row-major 4x4 homogeneous matrix.
///
/// # Errors
///
/// [`PoseIoError::Parse`] when a value does not parse,
/// [`PoseIoError::ShapeMismatch`] when there are not exactly 16 values, and
/// [`PoseIoError::Transform`] when the bottom row is not `[0, 0, 0, 1]`.
pub fn parse_pose_line(line: &str) -> Result<RigidTransform, PoseIoError> {
    let values = line
        .split_whitespace()
        .map(parse_value)
        .collect::<Result<Vec<_>, _>>()?;
    let values: [f64; 16] = values
        .try_into()
        .map_err(|v: Vec<f64>| PoseIoError::ShapeMismatch {
            rows: 4,
            cols: 4,
            len: v.len(),
        })?;
    Ok(RigidTransform::from_row_major(&values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::euler::{euler_to_rotation_matrix, RotationConvention};

    const LEGACY_DOC: &str = "%YAML:1.0\n---\nPoseState: !!opencv-matrix\n   rows: 4\n   cols: 4\n   dt: d\n   data: [ 1., 0., 0., 10., 0., 1., 0., 20., 0., 0.,\n       1., 30., 0., 0., 0., 1. ]\n";

    #[test]
    fn test_parse_legacy_header_document() -> Result<(), PoseIoError> {
        let pose = parse_pose(LEGACY_DOC)?;
        assert_eq!(pose.rows, 4);
        assert_eq!(pose.cols, 4);
        assert_eq!(pose.get(0, 3), 10.0);
        assert_eq!(pose.get(2, 2), 1.0);

        let transform = RigidTransform::try_from(&pose)?;
        assert_eq!(transform.translation, [10.0, 20.0, 30.0]);
        Ok(())
    }

    #[test]
    fn test_parse_without_legacy_header() -> Result<(), PoseIoError> {
        let text = "PoseState:\n   rows: 4\n   cols: 4\n   dt: d\n   data: [ 1., 0., 0., 0., 0., 1., 0., 0., 0., 0., 1., 0., 0., 0., 0., 1. ]\n";
        let transform = RigidTransform::try_from(&parse_pose(text)?)?;
        assert_eq!(transform, RigidTransform::IDENTITY);
        Ok(())
    }

    #[test]
    fn test_format_parse_roundtrip_is_exact() -> Result<(), PoseIoError> {
        let rotation =
            euler_to_rotation_matrix(RotationConvention::XyzIntrinsic, &[0.31, -0.77, 2.1]);
        let transform = RigidTransform::new(rotation, [12.5, -1e-7, 987.654321]);
        let back = RigidTransform::try_from(&parse_pose(&format_pose(&transform))?)?;
        // bit-exact, not approximately equal
        assert_eq!(back, transform);
        Ok(())
    }

    #[test]
    fn test_translation_block() -> Result<(), PoseIoError> {
        let text = "PoseState:\n   rows: 3\n   cols: 1\n   dt: d\n   data: [ 5., -6., 7. ]\n";
        let pose = parse_pose(text)?;
        assert_eq!(pose.as_translation(), Some([5.0, -6.0, 7.0]));
        assert!(matches!(
            RigidTransform::try_from(&pose),
            Err(PoseIoError::NotHomogeneous { rows: 3, cols: 1 })
        ));
        Ok(())
    }

    #[test]
    fn test_missing_rows_rejected() {
        let text = "PoseState:\n   cols: 4\n   data: [ 1. ]\n";
        assert!(matches!(
            parse_pose(text),
            Err(PoseIoError::MissingField("rows"))
        ));
    }

    #[test]
    fn test_data_length_mismatch_rejected() {
        let text = "PoseState:\n   rows: 4\n   cols: 4\n   data: [ 1., 2., 3. ]\n";
        assert!(matches!(
            parse_pose(text),
            Err(PoseIoError::ShapeMismatch {
                rows: 4,
                cols: 4,
                len: 3
            })
        ));
    }

    #[test]
    fn test_garbage_value_rejected() {
        let text = "PoseState:\n   rows: 1\n   cols: 1\n   data: [ abc ]\n";
        assert!(matches!(parse_pose(text), Err(PoseIoError::Parse(_))));
    }

    #[test]
    fn test_file_roundtrip() -> Result<(), PoseIoError> {
        let dir = std::env::temp_dir().join("handeye-pose-io-test");
        std::fs::create_dir_all(&dir)?;
        let path = dir.join("RobotTransform.yaml");

        let transform = RigidTransform::new(
            euler_to_rotation_matrix(RotationConvention::ZyxIntrinsic, &[1.2, 0.3, -0.4]),
            [100.0, 200.0, 300.0],
        );
        write_pose(&path, &transform)?;
        let back = read_rigid_transform(&path)?;
        std::fs::remove_file(&path)?;
        assert_eq!(back, transform);
        Ok(())
    }

    #[test]
    fn test_parse_pose_line() -> Result<(), PoseIoError> {
        let line = "1 0 0 10  0 1 0 20  0 0 1 30  0 0 0 1";
        let transform = parse_pose_line(line)?;
        assert_eq!(transform.translation, [10.0, 20.0, 30.0]);

        assert!(matches!(
            parse_pose_line("1 2 3"),
            Err(PoseIoError::ShapeMismatch { len: 3, .. })
        ));
        Ok(())
    }
}
