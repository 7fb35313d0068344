use std::ops::Mul;

use crate::rotation::{mat3_mul, mat3_transpose, mat3_vec_mul};

/// Error types for rigid-transform construction.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TransformError {
    /// The bottom row of the homogeneous matrix is not `[0, 0, 0, 1]`.
    #[error("invalid homogeneous matrix: bottom row is {0:?}, expected [0, 0, 0, 1]")]
    InvalidBottomRow([f64; 4]),
}

/// A rigid transform: a 3x3 rotation block and a translation vector, the
/// upper part of a 4x4 homogeneous matrix with bottom row `[0, 0, 0, 1]`.
///
/// The rotation block is expected to be orthonormal with determinant +1
/// within floating tolerance; the translation is in the same length unit as
/// the point data it is applied to (millimeters in the camera sample sets).
///
/// Values are immutable; all operations return new transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    /// 3x3 rotation block, row-major.
    pub rotation: [[f64; 3]; 3],
    /// Translation vector.
    pub translation: [f64; 3],
}

impl RigidTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        translation: [0.0, 0.0, 0.0],
    };

    /// Create a transform from a rotation block and a translation vector.
    pub fn new(rotation: [[f64; 3]; 3], translation: [f64; 3]) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Create a transform from a 4x4 homogeneous matrix, row-major.
    ///
    /// # Errors
    ///
    /// [`TransformError::InvalidBottomRow`] when the bottom row is not
    /// exactly `[0, 0, 0, 1]`.
    pub fn from_homogeneous(matrix: &[[f64; 4]; 4]) -> Result<Self, TransformError> {
        if matrix[3] != [0.0, 0.0, 0.0, 1.0] {
            return Err(TransformError::InvalidBottomRow(matrix[3]));
        }
        let mut rotation = [[0.0; 3]; 3];
        for (i, row) in rotation.iter_mut().enumerate() {
            row.copy_from_slice(&matrix[i][..3]);
        }
        Ok(Self {
            rotation,
            translation: [matrix[0][3], matrix[1][3], matrix[2][3]],
        })
    }

    /// The 4x4 homogeneous matrix of this transform, row-major.
    pub fn to_homogeneous(&self) -> [[f64; 4]; 4] {
        let r = &self.rotation;
        let t = &self.translation;
        [
            [r[0][0], r[0][1], r[0][2], t[0]],
            [r[1][0], r[1][1], r[1][2], t[1]],
            [r[2][0], r[2][1], r[2][2], t[2]],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }

    /// Create a transform from 16 row-major values of a homogeneous matrix.
    ///
    /// This is the layout robot controllers and pose files hand over as a
    /// flat list.
    ///
    /// # Errors
    ///
    /// [`TransformError::InvalidBottomRow`] when the last four values are not
    /// `[0, 0, 0, 1]`.
    pub fn from_row_major(values: &[f64; 16]) -> Result<Self, TransformError> {
        let mut matrix = [[0.0; 4]; 4];
        for (i, row) in matrix.iter_mut().enumerate() {
            row.copy_from_slice(&values[i * 4..(i + 1) * 4]);
        }
        Self::from_homogeneous(&matrix)
    }

    /// The 16 row-major values of the homogeneous matrix.
    pub fn to_row_major(&self) -> [f64; 16] {
        let matrix = self.to_homogeneous();
        let mut values = [0.0; 16];
        for (i, row) in matrix.iter().enumerate() {
            values[i * 4..(i + 1) * 4].copy_from_slice(row);
        }
        values
    }

    /// Compose with another transform: `self` applied after `other`.
    ///
    /// Frame-wise, if `self` maps frame B to frame A and `other` maps frame C
    /// to frame B, the result maps frame C to frame A. Composition is not
    /// commutative; the multiplication order follows the homogeneous matrix
    /// product `self * other`.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: mat3_mul(&self.rotation, &other.rotation),
            translation: {
                let rotated = mat3_vec_mul(&self.rotation, &other.translation);
                [
                    rotated[0] + self.translation[0],
                    rotated[1] + self.translation[1],
                    rotated[2] + self.translation[2],
                ]
            },
        }
    }

    /// The inverse transform, computed analytically as `(R^T, -R^T t)`.
    pub fn inverse(&self) -> Self {
        let rotation = mat3_transpose(&self.rotation);
        let rotated = mat3_vec_mul(&rotation, &self.translation);
        Self {
            rotation,
            translation: [-rotated[0], -rotated[1], -rotated[2]],
        }
    }

    /// Transform a point: rotate, then translate.
    pub fn transform_point(&self, point: [f64; 3]) -> [f64; 3] {
        let rotated = mat3_vec_mul(&self.rotation, &point);
        [
            rotated[0] + self.translation[0],
            rotated[1] + self.translation[1],
            rotated[2] + self.translation[2],
        ]
    }

    /// Transform a direction: rotate only, no translation.
    ///
    /// Use this for normals and other direction vectors.
    pub fn transform_vector(&self, vector: [f64; 3]) -> [f64; 3] {
        mat3_vec_mul(&self.rotation, &vector)
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for RigidTransform {
    type Output = RigidTransform;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}
