use crate::rotation::{skew, ConversionError};

/// A rotation quaternion with `w` as the scalar (real) part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    /// Vector part, x component.
    pub x: f64,
    /// Vector part, y component.
    pub y: f64,
    /// Vector part, z component.
    pub z: f64,
    /// Scalar (real) part.
    pub w: f64,
}

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// L2 norm of the quaternion.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Return the unit-norm quaternion describing the same rotation.
    ///
    /// Quaternions read back from files or converted from captured matrices
    /// drift from unit norm, so every consumer renormalizes first.
    ///
    /// # Errors
    ///
    /// [`ConversionError::ZeroNormQuaternion`] for the zero quaternion.
    pub fn normalized(&self) -> Result<Self, ConversionError> {
        let norm = self.norm();
        if norm < 1e-10 {
            return Err(ConversionError::ZeroNormQuaternion);
        }
        Ok(Self {
            x: self.x / norm,
            y: self.y / norm,
            z: self.z / norm,
            w: self.w / norm,
        })
    }
}

/// Extract the quaternion from a rotation matrix.
///
/// `w = sqrt(1 + trace(R)) / 2`, vector parts from the off-diagonal
/// differences over `4w`.
///
/// Known limitation: the formula is numerically unstable for rotations near
/// 180 degrees, where `w` approaches zero; the result degrades and is NaN at
/// exactly 180 degrees. This matches the reference behavior and is not
/// guarded here. Prefer [`crate::rotation::rotation_matrix_to_axis_angle`]
/// near half turns.
///
/// # Arguments
///
/// * `rotation` - A 3x3 rotation matrix, row-major.
///
/// # Returns
///
/// The unit quaternion of the rotation (for `rotation` away from 180 degrees).
///
/// Example:
///
/// ```
/// use handeye_pose::quaternion::rotation_matrix_to_quaternion;
///
/// let identity = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
/// let q = rotation_matrix_to_quaternion(&identity);
/// assert!((q.w - 1.0).abs() < 1e-12);
/// ```
pub fn rotation_matrix_to_quaternion(rotation: &[[f64; 3]; 3]) -> Quaternion {
    let w = (1.0 + rotation[0][0] + rotation[1][1] + rotation[2][2]).sqrt() / 2.0;
    Quaternion {
        x: (rotation[2][1] - rotation[1][2]) / (4.0 * w),
        y: (rotation[0][2] - rotation[2][0]) / (4.0 * w),
        z: (rotation[1][0] - rotation[0][1]) / (4.0 * w),
        w,
    }
}

/// Compute the rotation matrix of a quaternion.
///
/// The quaternion is renormalized first, then
/// `R = I + 2 * skew(q_xyz)^2 + 2 * w * skew(q_xyz)`.
///
/// # Arguments
///
/// * `quaternion` - The quaternion to convert; need not be unit norm.
///
/// # Returns
///
/// The 3x3 rotation matrix, row-major.
///
/// # Errors
///
/// [`ConversionError::ZeroNormQuaternion`] for the zero quaternion.
///
/// Example:
///
/// ```
/// use handeye_pose::quaternion::{quaternion_to_rotation_matrix, Quaternion};
///
/// let rotation = quaternion_to_rotation_matrix(&Quaternion::IDENTITY).unwrap();
/// assert_eq!(rotation, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
/// ```
pub fn quaternion_to_rotation_matrix(
    quaternion: &Quaternion,
) -> Result<[[f64; 3]; 3], ConversionError> {
    let q = quaternion.normalized()?;
    let k = skew(&[q.x, q.y, q.z]);

    let mut rotation = [[0.0; 3]; 3];
    for (i, row) in rotation.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            let identity = if i == j { 1.0 } else { 0.0 };
            let k_squared = k[i][0] * k[0][j] + k[i][1] * k[1][j] + k[i][2] * k[2][j];
            *val = identity + 2.0 * k_squared + 2.0 * q.w * k[i][j];
        }
    }
    Ok(rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::{axis_angle_to_rotation_matrix, AxisAngle};
    use approx::assert_relative_eq;
    use rand::Rng;

    #[test]
    fn test_quarter_turn_about_z() {
        let rotation = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let q = rotation_matrix_to_quaternion(&rotation);
        let half = std::f64::consts::FRAC_PI_4;
        assert_relative_eq!(q.w, half.cos(), epsilon = 1e-12);
        assert_relative_eq!(q.z, half.sin(), epsilon = 1e-12);
        assert_relative_eq!(q.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(q.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_roundtrip_random() -> Result<(), crate::rotation::ConversionError> {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let raw: [f64; 3] = [
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            ];
            let norm = (raw[0] * raw[0] + raw[1] * raw[1] + raw[2] * raw[2]).sqrt();
            let axis_angle = AxisAngle {
                axis: [raw[0] / norm, raw[1] / norm, raw[2] / norm],
                // away from the w ~ 0 singularity at pi
                angle: rng.random_range(0.0..2.5),
            };
            let rotation = axis_angle_to_rotation_matrix(&axis_angle)?;
            let back = quaternion_to_rotation_matrix(&rotation_matrix_to_quaternion(&rotation))?;
            for i in 0..3 {
                for j in 0..3 {
                    assert_relative_eq!(back[i][j], rotation[i][j], epsilon = 1e-6);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_normalized_rescales() -> Result<(), crate::rotation::ConversionError> {
        let q = Quaternion {
            x: 0.0,
            y: 0.0,
            z: 2.0,
            w: 0.0,
        };
        let n = q.normalized()?;
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_zero_quaternion_rejected() {
        let q = Quaternion {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 0.0,
        };
        assert_eq!(
            quaternion_to_rotation_matrix(&q),
            Err(ConversionError::ZeroNormQuaternion)
        );
    }
}
