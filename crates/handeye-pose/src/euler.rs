use crate::rotation::mat3_mul;

/// Rotation convention for a roll-pitch-yaw triple.
///
/// The same three numbers describe a different physical rotation under each
/// convention, so the convention is a required parameter on every Euler
/// conversion; there is no default.
///
/// Intrinsic conventions store the angles in application order (the first
/// element is applied first, about the body frame); extrinsic conventions
/// store the reversed vector and compose in reversed order (about the fixed
/// frame). `XyzIntrinsic` and `ZyxExtrinsic` therefore share the same matrix
/// form, as do `ZyxIntrinsic` and `XyzExtrinsic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationConvention {
    /// Body-frame rotations about x, then y, then z.
    XyzIntrinsic,
    /// Body-frame rotations about z, then y, then x.
    ZyxIntrinsic,
    /// Fixed-frame rotations about x, then y, then z.
    XyzExtrinsic,
    /// Fixed-frame rotations about z, then y, then x.
    ZyxExtrinsic,
}

impl RotationConvention {
    /// All four conventions, in a stable order for iteration and display.
    pub const ALL: [Self; 4] = [
        Self::XyzIntrinsic,
        Self::ZyxIntrinsic,
        Self::XyzExtrinsic,
        Self::ZyxExtrinsic,
    ];
}

impl std::fmt::Display for RotationConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::XyzIntrinsic => "XYZ_Intrinsic",
            Self::ZyxIntrinsic => "ZYX_Intrinsic",
            Self::XyzExtrinsic => "XYZ_Extrinsic",
            Self::ZyxExtrinsic => "ZYX_Extrinsic",
        };
        write!(f, "{}", name)
    }
}

/// Rotation matrix about the x axis (right-handed).
pub fn x_rotation(angle: f64) -> [[f64; 3]; 3] {
    let (s, c) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
}

/// Rotation matrix about the y axis (right-handed).
pub fn y_rotation(angle: f64) -> [[f64; 3]; 3] {
    let (s, c) = angle.sin_cos();
    [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

/// Rotation matrix about the z axis (right-handed).
pub fn z_rotation(angle: f64) -> [[f64; 3]; 3] {
    let (s, c) = angle.sin_cos();
    [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]
}

/// Compose a rotation matrix from roll-pitch-yaw angles.
///
/// # Arguments
///
/// * `convention` - Which of the four conventions `angles` is expressed in.
/// * `angles` - The three angles in radians, ordered per the convention.
///
/// # Returns
///
/// The 3x3 rotation matrix, row-major.
///
/// Example:
///
/// ```
/// use handeye_pose::euler::{euler_to_rotation_matrix, z_rotation, RotationConvention};
///
/// let only_yaw = euler_to_rotation_matrix(RotationConvention::ZyxIntrinsic, &[0.7, 0.0, 0.0]);
/// assert_eq!(only_yaw, z_rotation(0.7));
/// ```
pub fn euler_to_rotation_matrix(
    convention: RotationConvention,
    angles: &[f64; 3],
) -> [[f64; 3]; 3] {
    match convention {
        RotationConvention::XyzIntrinsic => mat3_mul(
            &mat3_mul(&x_rotation(angles[0]), &y_rotation(angles[1])),
            &z_rotation(angles[2]),
        ),
        RotationConvention::ZyxIntrinsic => mat3_mul(
            &mat3_mul(&z_rotation(angles[0]), &y_rotation(angles[1])),
            &x_rotation(angles[2]),
        ),
        RotationConvention::ZyxExtrinsic => mat3_mul(
            &mat3_mul(&x_rotation(angles[2]), &y_rotation(angles[1])),
            &z_rotation(angles[0]),
        ),
        RotationConvention::XyzExtrinsic => mat3_mul(
            &mat3_mul(&z_rotation(angles[2]), &y_rotation(angles[1])),
            &x_rotation(angles[0]),
        ),
    }
}

// Below this the pitch entry counts as +/-1 and the decomposition switches to
// the gimbal-lock branch.
const GIMBAL_EPS: f64 = 1e-9;

/// Extract roll-pitch-yaw angles from a rotation matrix.
///
/// Exact left-inverse of [`euler_to_rotation_matrix`]: recomposing the
/// returned angles under the same convention reproduces the input matrix,
/// including at gimbal lock.
///
/// At gimbal lock (pitch at +/-90 degrees) the remaining two angles are not
/// uniquely separable; the convention fixes one of them to zero and recovers
/// only the combined angle in the other.
///
/// # Arguments
///
/// * `convention` - The convention the returned angles are expressed in.
/// * `rotation` - A 3x3 rotation matrix, row-major.
///
/// # Returns
///
/// The three angles in radians, ordered per the convention. Pitch is on the
/// principal branch `[-pi/2, pi/2]`.
///
/// Example:
///
/// ```
/// use handeye_pose::euler::{rotation_matrix_to_euler, x_rotation, RotationConvention};
///
/// let angles = rotation_matrix_to_euler(RotationConvention::XyzIntrinsic, &x_rotation(0.4));
/// assert!((angles[0] - 0.4).abs() < 1e-12);
/// assert!(angles[1].abs() < 1e-12 && angles[2].abs() < 1e-12);
/// ```
pub fn rotation_matrix_to_euler(
    convention: RotationConvention,
    rotation: &[[f64; 3]; 3],
) -> [f64; 3] {
    match convention {
        // matrix form Rx(first) * Ry(pitch) * Rz(last)
        RotationConvention::XyzIntrinsic | RotationConvention::ZyxExtrinsic => {
            let sin_pitch = rotation[0][2];
            let (first, pitch, last) = if sin_pitch.abs() >= 1.0 - GIMBAL_EPS {
                let sign = sin_pitch.signum();
                // only first + sign * last is observable; put it all in first
                (
                    f64::atan2(sign * rotation[1][0], rotation[1][1]),
                    sign * std::f64::consts::FRAC_PI_2,
                    0.0,
                )
            } else {
                (
                    f64::atan2(-rotation[1][2], rotation[2][2]),
                    sin_pitch.asin(),
                    f64::atan2(-rotation[0][1], rotation[0][0]),
                )
            };
            match convention {
                RotationConvention::XyzIntrinsic => [first, pitch, last],
                _ => [last, pitch, first],
            }
        }
        // matrix form Rz(first) * Ry(pitch) * Rx(last)
        RotationConvention::ZyxIntrinsic | RotationConvention::XyzExtrinsic => {
            let sin_pitch = -rotation[2][0];
            let (first, pitch, last) = if sin_pitch.abs() >= 1.0 - GIMBAL_EPS {
                (
                    0.0,
                    sin_pitch.signum() * std::f64::consts::FRAC_PI_2,
                    f64::atan2(-rotation[1][2], rotation[1][1]),
                )
            } else {
                (
                    f64::atan2(rotation[1][0], rotation[0][0]),
                    sin_pitch.asin(),
                    f64::atan2(rotation[2][1], rotation[2][2]),
                )
            };
            match convention {
                RotationConvention::ZyxIntrinsic => [first, pitch, last],
                _ => [last, pitch, first],
            }
        }
    }
}
