/// Error types for bulk transforms.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LinalgError {
    /// Source and destination slices differ in length
    #[error("source and destination length mismatch ({src} != {dst})")]
    LengthMismatch {
        /// Source point count.
        src: usize,
        /// Destination point count.
        dst: usize,
    },
}

/// Transform a set of points using a rotation and translation.
///
/// # Arguments
///
/// * `src_points` - Points to transform.
/// * `dst_r_src` - Rotation from the source to the destination frame.
/// * `dst_t_src` - Translation from the source to the destination frame.
/// * `dst_points` - Pre-allocated output slice of the same length as the source.
///
/// # Errors
///
/// [`LinalgError::LengthMismatch`] when the slices differ in length.
///
/// Example:
///
/// ```
/// use handeye_calib::linalg::transform_points3d;
///
/// let src_points = vec![[2.0, 2.0, 2.0], [3.0, 4.0, 5.0]];
/// let rotation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
/// let translation = [1.0, 0.0, 0.0];
/// let mut dst_points = vec![[0.0; 3]; src_points.len()];
/// transform_points3d(&src_points, &rotation, &translation, &mut dst_points).unwrap();
/// assert_eq!(dst_points[0], [3.0, 2.0, 2.0]);
/// ```
pub fn transform_points3d(
    src_points: &[[f64; 3]],
    dst_r_src: &[[f64; 3]; 3],
    dst_t_src: &[f64; 3],
    dst_points: &mut [[f64; 3]],
) -> Result<(), LinalgError> {
    rotate_vectors3d(src_points, dst_r_src, dst_points)?;

    for point in dst_points.iter_mut() {
        point[0] += dst_t_src[0];
        point[1] += dst_t_src[1];
        point[2] += dst_t_src[2];
    }
    Ok(())
}

/// Rotate a set of direction vectors, without translation.
///
/// Use this for normals, which are unaffected by the translation part of a
/// rigid transform.
///
/// # Arguments
///
/// * `src_vectors` - Vectors to rotate.
/// * `dst_r_src` - Rotation from the source to the destination frame.
/// * `dst_vectors` - Pre-allocated output slice of the same length as the source.
///
/// # Errors
///
/// [`LinalgError::LengthMismatch`] when the slices differ in length.
pub fn rotate_vectors3d(
    src_vectors: &[[f64; 3]],
    dst_r_src: &[[f64; 3]; 3],
    dst_vectors: &mut [[f64; 3]],
) -> Result<(), LinalgError> {
    if src_vectors.len() != dst_vectors.len() {
        return Err(LinalgError::LengthMismatch {
            src: src_vectors.len(),
            dst: dst_vectors.len(),
        });
    }

    let dst_r_src_mat = faer::mat::from_row_major_slice(dst_r_src.as_flattened(), 3, 3);

    // each column of the 3xN views is one point; a row-major Nx3 slice is the
    // same memory as a column-major 3xN matrix
    let vectors_in_src =
        faer::mat::from_row_major_slice(src_vectors.as_flattened(), src_vectors.len(), 3);
    let n_vectors = dst_vectors.len();
    let mut vectors_in_dst =
        faer::mat::from_column_major_slice_mut(dst_vectors.as_flattened_mut(), 3, n_vectors);

    faer::linalg::matmul::matmul(
        &mut vectors_in_dst,
        dst_r_src_mat,
        vectors_in_src.transpose(),
        None,
        1.0,
        faer::Parallelism::None,
    );
    Ok(())
}
