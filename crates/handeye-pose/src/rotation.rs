/// Error types for rotation-representation conversions.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    /// The rotation axis is undefined because the skew-symmetric part of the
    /// matrix has zero norm (rotation angle is 0 or π).
    #[error("rotation axis is undefined: zero skew norm (rotation angle is 0 or pi)")]
    UndefinedAxis,

    /// The input vector has zero norm and encodes no rotation axis.
    #[error("cannot compute rotation from a zero vector")]
    ZeroVector,

    /// The quaternion has zero norm and cannot be normalized.
    #[error("cannot normalize a zero-norm quaternion")]
    ZeroNormQuaternion,
}

/// A rotation described by a unit axis and an angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngle {
    /// Unit rotation axis.
    pub axis: [f64; 3],
    /// Rotation angle in radians.
    pub angle: f64,
}

/// Compute the skew-symmetric cross-product matrix of a 3-vector.
///
/// `skew(u) * v == u x v` for any vector `v`.
///
/// Example:
///
/// ```
/// use handeye_pose::rotation::skew;
///
/// let m = skew(&[1.0, 2.0, 3.0]);
/// assert_eq!(m, [[0.0, -3.0, 2.0], [3.0, 0.0, -1.0], [-2.0, 1.0, 0.0]]);
/// ```
pub fn skew(v: &[f64; 3]) -> [[f64; 3]; 3] {
    [
        [0.0, -v[2], v[1]],
        [v[2], 0.0, -v[0]],
        [-v[1], v[0], 0.0],
    ]
}

/// Multiply two 3x3 row-major matrices.
pub fn mat3_mul(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    out
}

/// Transpose a 3x3 row-major matrix.
pub fn mat3_transpose(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in m.iter().enumerate() {
        for (j, val) in row.iter().enumerate() {
            out[j][i] = *val;
        }
    }
    out
}

/// Multiply a 3x3 matrix with a 3-vector.
pub fn mat3_vec_mul(m: &[[f64; 3]; 3], v: &[f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn vec3_norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Extract the axis-angle representation from a rotation matrix.
///
/// Takes the skew-symmetric part `A = (R - R^T) / 2`, whose off-diagonal
/// entries give a vector `rho` aligned with the rotation axis with norm
/// `sin(angle)`. The angle comes from `atan2(|rho|, (trace(R) - 1) / 2)`.
///
/// # Arguments
///
/// * `rotation` - A 3x3 rotation matrix, row-major.
///
/// # Returns
///
/// The axis and angle of the rotation.
///
/// # Errors
///
/// [`ConversionError::UndefinedAxis`] when the skew norm is zero, which
/// happens both for the identity (angle 0) and for half-turn rotations
/// (angle π). The caller must special-case those two rotations.
///
/// Example:
///
/// ```
/// use handeye_pose::rotation::rotation_matrix_to_axis_angle;
///
/// // 90 degrees about z
/// let rotation = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
/// let axis_angle = rotation_matrix_to_axis_angle(&rotation).unwrap();
/// assert!((axis_angle.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// assert!((axis_angle.axis[2] - 1.0).abs() < 1e-12);
/// ```
pub fn rotation_matrix_to_axis_angle(
    rotation: &[[f64; 3]; 3],
) -> Result<AxisAngle, ConversionError> {
    // rho picks the (2,1), (0,2), (1,0) entries of the skew part
    let rho = [
        (rotation[2][1] - rotation[1][2]) / 2.0,
        (rotation[0][2] - rotation[2][0]) / 2.0,
        (rotation[1][0] - rotation[0][1]) / 2.0,
    ];
    let s = vec3_norm(&rho);
    let c = (rotation[0][0] + rotation[1][1] + rotation[2][2] - 1.0) / 2.0;

    if s < 1e-10 {
        return Err(ConversionError::UndefinedAxis);
    }

    Ok(AxisAngle {
        axis: [rho[0] / s, rho[1] / s, rho[2] / s],
        angle: s.atan2(c),
    })
}

/// Compute the rotation matrix of an axis-angle rotation (Rodrigues' formula).
///
/// `R = I cos(a) + u u^T (1 - cos(a)) + skew(u) sin(a)` for unit axis `u`.
/// A non-unit axis is normalized first.
///
/// # Arguments
///
/// * `axis_angle` - The axis and angle of the rotation.
///
/// # Returns
///
/// The 3x3 rotation matrix, row-major.
///
/// # Errors
///
/// [`ConversionError::ZeroVector`] when the axis has zero norm.
///
/// Example:
///
/// ```
/// use handeye_pose::rotation::{axis_angle_to_rotation_matrix, AxisAngle};
///
/// let axis_angle = AxisAngle { axis: [1.0, 0.0, 0.0], angle: std::f64::consts::FRAC_PI_2 };
/// let rotation = axis_angle_to_rotation_matrix(&axis_angle).unwrap();
/// assert!((rotation[1][2] - -1.0).abs() < 1e-12);
/// assert!((rotation[2][1] - 1.0).abs() < 1e-12);
/// ```
pub fn axis_angle_to_rotation_matrix(
    axis_angle: &AxisAngle,
) -> Result<[[f64; 3]; 3], ConversionError> {
    let magnitude = vec3_norm(&axis_angle.axis);
    if magnitude < 1e-10 {
        return Err(ConversionError::ZeroVector);
    }
    let u = [
        axis_angle.axis[0] / magnitude,
        axis_angle.axis[1] / magnitude,
        axis_angle.axis[2] / magnitude,
    ];

    let c = axis_angle.angle.cos();
    let s = axis_angle.angle.sin();
    let k = skew(&u);

    let mut rotation = [[0.0; 3]; 3];
    for (i, row) in rotation.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            let identity = if i == j { 1.0 } else { 0.0 };
            *val = identity * c + u[i] * u[j] * (1.0 - c) + k[i][j] * s;
        }
    }
    Ok(rotation)
}

/// Split a rotation vector (axis scaled by angle) into axis and angle.
///
/// # Errors
///
/// [`ConversionError::ZeroVector`] for the zero vector; the caller must treat
/// it as the identity rotation explicitly instead of dividing by zero here.
pub fn rotation_vector_to_axis_angle(
    rotation_vector: &[f64; 3],
) -> Result<AxisAngle, ConversionError> {
    let angle = vec3_norm(rotation_vector);
    if angle < 1e-10 {
        return Err(ConversionError::ZeroVector);
    }
    Ok(AxisAngle {
        axis: [
            rotation_vector[0] / angle,
            rotation_vector[1] / angle,
            rotation_vector[2] / angle,
        ],
        angle,
    })
}

/// Collapse an axis-angle rotation into a rotation vector (axis scaled by angle).
pub fn axis_angle_to_rotation_vector(axis_angle: &AxisAngle) -> [f64; 3] {
    [
        axis_angle.axis[0] * axis_angle.angle,
        axis_angle.axis[1] * axis_angle.angle,
        axis_angle.axis[2] * axis_angle.angle,
    ]
}

/// Compute the rotation matrix of a rotation vector.
///
/// # Errors
///
/// [`ConversionError::ZeroVector`] for the zero vector.
pub fn rotation_vector_to_rotation_matrix(
    rotation_vector: &[f64; 3],
) -> Result<[[f64; 3]; 3], ConversionError> {
    axis_angle_to_rotation_matrix(&rotation_vector_to_axis_angle(rotation_vector)?)
}

/// Extract the rotation vector from a rotation matrix.
///
/// # Errors
///
/// [`ConversionError::UndefinedAxis`] for rotations of angle 0 or π, where
/// the matrix alone does not determine the axis.
pub fn rotation_matrix_to_rotation_vector(
    rotation: &[[f64; 3]; 3],
) -> Result<[f64; 3], ConversionError> {
    Ok(axis_angle_to_rotation_vector(
        &rotation_matrix_to_axis_angle(rotation)?,
    ))
}
