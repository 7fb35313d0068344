use handeye_pose::transform::RigidTransform;

use crate::frames::CameraMount;

/// Fewest robot poses a calibration can be attempted with. Solvers typically
/// require more and will say so through [`CalibrationFailure`].
pub const MIN_POSES: usize = 2;

/// One robot pose paired with the board detection captured at that pose.
///
/// The detection type `D` is opaque to this crate; it is whatever the
/// external board detector produced for the capture.
#[derive(Debug, Clone)]
pub struct HandEyeInput<D> {
    /// Capture index, assigned in collection order starting at 0.
    pub index: u32,
    /// Robot pose (`base_from_flange`) reported by the controller at capture
    /// time.
    pub robot_pose: RigidTransform,
    /// Calibration-board detection result for this capture.
    pub detection: D,
}

/// Output of the external hand-eye solver.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationResult {
    /// The solved transform: camera pose in the robot base frame for
    /// [`CameraMount::EyeToHand`], camera pose in the flange frame for
    /// [`CameraMount::EyeInHand`].
    pub transform: RigidTransform,
    /// Per-capture residuals reported by the solver, if any; same order as
    /// the inputs.
    pub residuals: Vec<f64>,
}

/// A calibration attempt the solver rejected.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("hand-eye calibration failed: {reason}")]
pub struct CalibrationFailure {
    /// Solver-provided description of the failure.
    pub reason: String,
}

/// The external hand-eye solver boundary.
///
/// Implemented over whatever SDK or algorithm actually solves the hand-eye
/// problem; this crate only routes inputs to it and owns the session state
/// around it.
pub trait HandEyeSolver<D> {
    /// Solve for the camera pose from the collected inputs.
    ///
    /// # Errors
    ///
    /// [`CalibrationFailure`] when the solver rejects the input set.
    fn calibrate(
        &self,
        mount: CameraMount,
        inputs: &[HandEyeInput<D>],
    ) -> Result<CalibrationResult, CalibrationFailure>;
}

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting `add_pose` commands.
    CollectingPoses,
    /// A solver call is in flight.
    Calibrating,
    /// Calibration succeeded; the result is available.
    Done,
}

/// Error types for session commands.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// A pose was added outside the collection phase
    #[error("cannot add poses once calibration has run")]
    NotCollecting,

    /// Calibrate was called twice
    #[error("calibration already completed")]
    AlreadyCalibrated,

    /// Too few poses collected to attempt calibration
    #[error("need at least {min} poses to calibrate, have {have}")]
    NotEnoughPoses {
        /// Minimum accepted by the session.
        min: usize,
        /// Poses collected so far.
        have: usize,
    },

    /// The solver rejected the input set
    #[error(transparent)]
    Calibration(#[from] CalibrationFailure),
}

/// Interactive hand-eye calibration, decoupled from any input source.
///
/// The session is an explicit state machine (`CollectingPoses` ->
/// `Calibrating` -> `Done`) driven by discrete commands, so a console loop, a
/// network endpoint, or a test can drive it the same way. A failed detection
/// discards that capture only, never the whole run; a failed solve returns
/// the session to `CollectingPoses` so more poses can be added and the solve
/// retried.
#[derive(Debug, Clone)]
pub struct CalibrationSession<D> {
    state: SessionState,
    inputs: Vec<HandEyeInput<D>>,
    next_index: u32,
    result: Option<CalibrationResult>,
}

impl<D> Default for CalibrationSession<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> CalibrationSession<D> {
    /// Create an empty session in the collection phase.
    pub fn new() -> Self {
        Self {
            state: SessionState::CollectingPoses,
            inputs: Vec::new(),
            next_index: 0,
            result: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The accepted captures, in collection order.
    pub fn inputs(&self) -> &[HandEyeInput<D>] {
        &self.inputs
    }

    /// The calibration result, available once the session is `Done`.
    pub fn result(&self) -> Option<&CalibrationResult> {
        self.result.as_ref()
    }

    /// Add one capture: a robot pose and the detection attempt made at it.
    ///
    /// A failed detection is logged and the capture discarded; the session
    /// stays in the collection phase either way. Returns whether the capture
    /// was accepted.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotCollecting`] when calibration has already run.
    pub fn add_pose<E: std::fmt::Display>(
        &mut self,
        robot_pose: RigidTransform,
        detection: Result<D, E>,
    ) -> Result<bool, SessionError> {
        if self.state != SessionState::CollectingPoses {
            return Err(SessionError::NotCollecting);
        }
        match detection {
            Ok(detection) => {
                log::info!("capture {} accepted", self.next_index);
                self.inputs.push(HandEyeInput {
                    index: self.next_index,
                    robot_pose,
                    detection,
                });
                self.next_index += 1;
                Ok(true)
            }
            Err(error) => {
                // discard this capture only; the pose id is not consumed
                log::warn!("capture {} discarded: {}", self.next_index, error);
                Ok(false)
            }
        }
    }

    /// Run the solver over the collected poses.
    ///
    /// On success the session moves to `Done` and the result is stored; on
    /// solver failure it returns to `CollectingPoses` so the caller can add
    /// more poses and retry.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyCalibrated`], [`SessionError::NotEnoughPoses`],
    /// or the solver's [`CalibrationFailure`].
    pub fn calibrate<S: HandEyeSolver<D>>(
        &mut self,
        mount: CameraMount,
        solver: &S,
    ) -> Result<&CalibrationResult, SessionError> {
        match self.state {
            SessionState::CollectingPoses => {}
            SessionState::Calibrating | SessionState::Done => {
                return Err(SessionError::AlreadyCalibrated)
            }
        }
        if self.inputs.len() < MIN_POSES {
            return Err(SessionError::NotEnoughPoses {
                min: MIN_POSES,
                have: self.inputs.len(),
            });
        }

        self.state = SessionState::Calibrating;
        log::info!(
            "calibrating ({:?}) with {} poses",
            mount,
            self.inputs.len()
        );
        match solver.calibrate(mount, &self.inputs) {
            Ok(result) => {
                self.state = SessionState::Done;
                Ok(&*self.result.insert(result))
            }
            Err(failure) => {
                log::warn!("{}", failure);
                self.state = SessionState::CollectingPoses;
                Err(failure.into())
            }
        }
    }
}
