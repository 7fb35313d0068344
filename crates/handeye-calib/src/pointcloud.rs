use handeye_pose::transform::RigidTransform;

use crate::linalg::{rotate_vectors3d, transform_points3d, LinalgError};

/// A point cloud with points and optional per-point colors and normals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    // The points in the point cloud.
    points: Vec<[f64; 3]>,
    // The colors of the points.
    colors: Option<Vec<[u8; 3]>>,
    // The normals of the points.
    normals: Option<Vec<[f64; 3]>>,
}

impl PointCloud {
    /// Create a new point cloud from points, colors (optional), and normals (optional).
    pub fn new(
        points: Vec<[f64; 3]>,
        colors: Option<Vec<[u8; 3]>>,
        normals: Option<Vec<[f64; 3]>>,
    ) -> Self {
        Self {
            points,
            colors,
            normals,
        }
    }

    /// Get the number of points in the point cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get as reference the points in the point cloud.
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Get as reference the colors of the points in the point cloud.
    pub fn colors(&self) -> Option<&[[u8; 3]]> {
        self.colors.as_deref()
    }

    /// Get as reference the normals of the points in the point cloud.
    pub fn normals(&self) -> Option<&[[f64; 3]]> {
        self.normals.as_deref()
    }

    /// Apply a rigid transform, producing a new point cloud.
    ///
    /// Points get the full transform; normals are rotated only, since
    /// directions are unaffected by translation. Colors are copied.
    ///
    /// # Errors
    ///
    /// [`LinalgError`] is propagated from the bulk transforms (cannot occur
    /// for a well-formed cloud, whose buffers match in length by
    /// construction).
    pub fn transform(&self, pose: &RigidTransform) -> Result<Self, LinalgError> {
        let mut points = vec![[0.0; 3]; self.points.len()];
        transform_points3d(&self.points, &pose.rotation, &pose.translation, &mut points)?;

        let normals = match &self.normals {
            Some(normals) => {
                let mut rotated = vec![[0.0; 3]; normals.len()];
                rotate_vectors3d(normals, &pose.rotation, &mut rotated)?;
                Some(rotated)
            }
            None => None,
        };

        Ok(Self {
            points,
            colors: self.colors.clone(),
            normals,
        })
    }

    /// Scale all point coordinates by a uniform factor, e.g. `0.001` to go
    /// from millimeters to meters. Normals keep unit length and are copied
    /// unchanged.
    pub fn scaled(&self, factor: f64) -> Self {
        let points = self
            .points
            .iter()
            .map(|p| [p[0] * factor, p[1] * factor, p[2] * factor])
            .collect();
        Self {
            points,
            colors: self.colors.clone(),
            normals: self.normals.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_cloud() -> PointCloud {
        PointCloud::new(
            vec![[1.0, 0.0, 0.0], [0.0, 2.0, 0.0]],
            Some(vec![[255, 0, 0], [0, 255, 0]]),
            Some(vec![[0.0, 0.0, 1.0], [0.0, 0.0, 1.0]]),
        )
    }

    #[test]
    fn test_transform_moves_points_and_rotates_normals() -> Result<(), LinalgError> {
        // 90 degrees about x plus translation along z
        let pose = RigidTransform::new(
            [[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]],
            [0.0, 0.0, 100.0],
        );
        let transformed = sample_cloud().transform(&pose)?;

        assert_relative_eq!(transformed.points()[1][2], 102.0, epsilon = 1e-12);
        // normal picked up the rotation but not the translation
        let normal = transformed.normals().unwrap()[0];
        assert_relative_eq!(normal[1], -1.0, epsilon = 1e-12);
        assert_relative_eq!(normal[2], 0.0, epsilon = 1e-12);
        // colors ride along unchanged
        assert_eq!(transformed.colors(), sample_cloud().colors());
        Ok(())
    }

    #[test]
    fn test_identity_transform_is_noop() -> Result<(), LinalgError> {
        let cloud = sample_cloud();
        assert_eq!(cloud.transform(&RigidTransform::IDENTITY)?, cloud);
        Ok(())
    }

    #[test]
    fn test_scaled_millimeters_to_meters() {
        let scaled = sample_cloud().scaled(0.001);
        assert_relative_eq!(scaled.points()[1][1], 0.002, epsilon = 1e-12);
        // normals keep unit length
        assert_eq!(scaled.normals(), sample_cloud().normals());
    }
}
