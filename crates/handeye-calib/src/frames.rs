use handeye_pose::transform::RigidTransform;

/// How the camera is mounted relative to the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMount {
    /// Camera fixed in the environment, observing the robot. The calibration
    /// solver yields the camera pose in the robot base frame directly.
    EyeToHand,
    /// Camera mounted on the robot flange (end-effector), moving with it.
    /// The calibration solver yields the camera pose in the flange frame,
    /// which must be combined with the current robot pose at use time.
    EyeInHand,
}

/// Error types for frame composition.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FrameError {
    /// Eye-in-hand composition needs the current robot pose
    #[error("eye-in-hand composition requires the current robot pose (base from flange)")]
    MissingRobotPose,
}

/// Camera pose in the robot base frame for an eye-in-hand installation.
///
/// `base_from_camera = base_from_flange * flange_from_camera`: the current
/// robot-reported pose on the left, the fixed calibration result on the
/// right. Both orders produce plausible-looking matrices, only this one is
/// correct.
///
/// # Arguments
///
/// * `base_from_flange` - Current flange pose in the base frame, read from
///   the robot controller.
/// * `flange_from_camera` - Camera pose in the flange frame, the eye-in-hand
///   calibration result (independent of robot motion).
///
/// # Returns
///
/// The camera pose in the robot base frame for the current robot position.
pub fn eye_in_hand_base_from_camera(
    base_from_flange: &RigidTransform,
    flange_from_camera: &RigidTransform,
) -> RigidTransform {
    base_from_flange.compose(flange_from_camera)
}

/// Resolve the camera pose in the robot base frame for either mount.
///
/// # Arguments
///
/// * `mount` - The camera mounting configuration.
/// * `calibration` - The hand-eye calibration result: `base_from_camera` for
///   [`CameraMount::EyeToHand`], `flange_from_camera` for
///   [`CameraMount::EyeInHand`].
/// * `base_from_flange` - Current robot pose; required for eye-in-hand,
///   ignored for eye-to-hand.
///
/// # Errors
///
/// [`FrameError::MissingRobotPose`] for eye-in-hand without a robot pose.
pub fn base_from_camera(
    mount: CameraMount,
    calibration: &RigidTransform,
    base_from_flange: Option<&RigidTransform>,
) -> Result<RigidTransform, FrameError> {
    match mount {
        CameraMount::EyeToHand => Ok(*calibration),
        CameraMount::EyeInHand => base_from_flange
            .map(|robot_pose| eye_in_hand_base_from_camera(robot_pose, calibration))
            .ok_or(FrameError::MissingRobotPose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handeye_pose::euler::{euler_to_rotation_matrix, RotationConvention};

    #[test]
    fn test_eye_in_hand_identity_calibration_pins_order() {
        // with an identity flange_from_camera the composition must equal the
        // robot pose bit for bit; a swapped multiplication order fails this
        let base_from_flange = RigidTransform::new(
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            [100.0, -50.0, 25.0],
        );
        let result =
            eye_in_hand_base_from_camera(&base_from_flange, &RigidTransform::IDENTITY);
        assert_eq!(result, base_from_flange);
    }

    #[test]
    fn test_eye_in_hand_matches_manual_product() {
        let base_from_flange = RigidTransform::new(
            euler_to_rotation_matrix(RotationConvention::ZyxIntrinsic, &[0.5, 0.1, -0.2]),
            [400.0, 0.0, 250.0],
        );
        let flange_from_camera = RigidTransform::new(
            euler_to_rotation_matrix(RotationConvention::XyzIntrinsic, &[0.0, 0.0, 1.5]),
            [0.0, 60.0, 80.0],
        );
        let composed = eye_in_hand_base_from_camera(&base_from_flange, &flange_from_camera);
        assert_eq!(composed, base_from_flange * flange_from_camera);
        // and the wrong order differs
        assert_ne!(composed, flange_from_camera * base_from_flange);
    }

    #[test]
    fn test_base_from_camera_dispatch() {
        let calibration = RigidTransform::new(
            [[1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, -1.0]],
            [-50.2, 368.5, 1205.3],
        );
        // eye-to-hand: passthrough, robot pose ignored
        assert_eq!(
            base_from_camera(CameraMount::EyeToHand, &calibration, None),
            Ok(calibration)
        );

        // eye-in-hand: robot pose required
        assert_eq!(
            base_from_camera(CameraMount::EyeInHand, &calibration, None),
            Err(FrameError::MissingRobotPose)
        );
        let robot_pose = RigidTransform::new(
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            [0.0, 0.0, 500.0],
        );
        assert_eq!(
            base_from_camera(CameraMount::EyeInHand, &calibration, Some(&robot_pose)),
            Ok(robot_pose * calibration)
        );
    }
}
