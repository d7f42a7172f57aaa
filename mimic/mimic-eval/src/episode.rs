//! Episode evaluation: driving one looped pass over a motion against a live
//! simulation.

use mimic_reward::{frame_reward, RewardConfig};
use mimic_types::{ImitationError, Motion, Result, Robot, Simulation};
use tracing::{debug, info};

use crate::metrics::EpisodeMetrics;

/// Lifecycle of an episode evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpisodeState {
    /// No step has been taken yet.
    #[default]
    NotStarted,
    /// The episode is being stepped.
    Running,
    /// The looped motion timeline has been exhausted.
    Done,
}

impl EpisodeState {
    /// Check whether no step has been taken yet.
    #[must_use]
    pub fn is_not_started(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Check whether the episode is mid-evaluation.
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Check whether the episode has completed.
    #[must_use]
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Result of one evaluation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// Simulated time of this step, seconds.
    pub time: f64,
    /// Reward computed this step, or `None` on the step that detected
    /// completion (no frame is evaluated on that call).
    pub reward: Option<f64>,
    /// Whether the episode has completed.
    pub completed: bool,
}

/// Drives one full pass (or several looped passes) over a motion's timeline
/// against a live simulation, accumulating reward into a normalized score.
///
/// Stepping strictly alternates actuation, simulation advance, and reward
/// computation; each step depends on the physical state produced by the
/// previous one. Any failure from the robot or simulation propagates
/// unchanged and ends the episode.
///
/// # Example
///
/// ```ignore
/// use mimic_eval::EpisodeEvaluator;
/// use mimic_reward::RewardConfig;
///
/// let mut evaluator = EpisodeEvaluator::new(&motion, RewardConfig::default()).with_loops(2);
/// let score = evaluator.run(&mut robot, &mut simulation)?;
/// println!("episode score: {score}");
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeEvaluator<'m> {
    motion: &'m Motion,
    config: RewardConfig,
    loops: u32,
    state: EpisodeState,
    timestep: f64,
    steps: u64,
    previous_positions: Option<Vec<f64>>,
    metrics: EpisodeMetrics,
}

impl<'m> EpisodeEvaluator<'m> {
    /// Create an evaluator for one pass over `motion`.
    #[must_use]
    pub fn new(motion: &'m Motion, config: RewardConfig) -> Self {
        Self {
            motion,
            config,
            loops: 1,
            state: EpisodeState::NotStarted,
            timestep: 0.0,
            steps: 0,
            previous_positions: None,
            metrics: EpisodeMetrics::new(),
        }
    }

    /// Repeat the motion `loops` times within the episode. A loop count of
    /// zero is treated as one.
    #[must_use]
    pub fn with_loops(mut self, loops: u32) -> Self {
        self.loops = loops.max(1);
        self
    }

    /// Seed the previous-frame joint positions for an episode that resumes
    /// against an already-advanced simulation. By default the previous frame
    /// is absent and the first stabilization term is zero.
    #[must_use]
    pub fn with_previous_positions(mut self, positions: Vec<f64>) -> Self {
        self.previous_positions = Some(positions);
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> EpisodeState {
        self.state
    }

    /// The reward configuration in use.
    #[must_use]
    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Metrics accumulated so far.
    #[must_use]
    pub fn metrics(&self) -> &EpisodeMetrics {
        &self.metrics
    }

    /// The final normalized score, once the episode is done.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.state.is_done().then(|| self.final_score())
    }

    /// Execute one evaluation step.
    ///
    /// This performs:
    /// 1. On the first call: read and validate the simulation timestep
    /// 2. Termination check against the looped motion duration
    /// 3. Command the robot's joints toward the current frame's targets
    /// 4. Advance the simulation by one timestep
    /// 5. Compute and accumulate the frame reward
    /// 6. Record the frame's joint targets as the previous frame
    ///
    /// Calling `step` after completion reports completion again without
    /// touching the robot or simulation.
    ///
    /// # Errors
    ///
    /// - [`ImitationError::InvalidTimestep`] if the simulation reports a
    ///   non-positive or non-finite timestep
    /// - Reward failure modes
    ///   ([`ImitationError::NoContributingEffectors`], ...), surfaced for
    ///   malformed motion data
    /// - [`ImitationError::Actuation`] / [`ImitationError::SimulationStep`]
    ///   from the external collaborators, propagated unchanged
    #[allow(clippy::cast_precision_loss)]
    pub fn step<R, S>(&mut self, robot: &mut R, sim: &mut S) -> Result<StepResult>
    where
        R: Robot + ?Sized,
        S: Simulation + ?Sized,
    {
        match self.state {
            EpisodeState::Done => {
                return Ok(StepResult {
                    time: self.steps as f64 * self.timestep,
                    reward: None,
                    completed: true,
                });
            }
            EpisodeState::NotStarted => {
                let dt = sim.timestep();
                if !dt.is_finite() || dt <= 0.0 {
                    return Err(ImitationError::InvalidTimestep(dt));
                }
                self.timestep = dt;
                self.state = EpisodeState::Running;
                debug!(
                    "episode started: duration {:.3}s x{} at dt {:.4}s",
                    self.motion.duration(),
                    self.loops,
                    dt
                );
            }
            EpisodeState::Running => {}
        }

        let time = self.steps as f64 * self.timestep;
        if time > self.motion.duration() * f64::from(self.loops) {
            self.state = EpisodeState::Done;
            let score = self.final_score();
            info!(
                "episode complete: {} frames, score {:.6}",
                self.metrics.frames_evaluated, score
            );
            return Ok(StepResult {
                time,
                reward: None,
                completed: true,
            });
        }

        let frame = self.motion.frame_at(time);
        robot.apply_joint_targets(self.motion.joints(), &frame.joint_targets)?;
        sim.advance()?;

        let terms = frame_reward(
            self.motion,
            robot,
            frame,
            self.previous_positions.as_deref(),
            &self.config,
        )?;
        let reward = terms.total(&self.config);
        self.metrics.record(reward);
        self.previous_positions = Some(frame.joint_targets.clone());
        self.steps += 1;
        debug!(
            "t = {:.4}: tracking {:.6}, stabilization {:.6}, reward {:.6}",
            time, terms.tracking, terms.stabilization, reward
        );

        Ok(StepResult {
            time,
            reward: Some(reward),
            completed: false,
        })
    }

    /// Run the episode to completion and return the final score.
    ///
    /// # Errors
    ///
    /// Propagates the failure modes of [`step`](EpisodeEvaluator::step); on
    /// failure the episode is abandoned and the partial score discarded.
    pub fn run<R, S>(&mut self, robot: &mut R, sim: &mut S) -> Result<f64>
    where
        R: Robot + ?Sized,
        S: Simulation + ?Sized,
    {
        while !self.step(robot, sim)?.completed {}
        Ok(self.final_score())
    }

    /// Accumulated reward divided by the frame count expected over the full
    /// looped duration, making scores comparable across episode lengths.
    fn final_score(&self) -> f64 {
        self.metrics.reward_sum / self.expected_frames()
    }

    fn expected_frames(&self) -> f64 {
        (self.motion.duration() / self.timestep * f64::from(self.loops)).ceil()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mimic_types::{
        EffectorReference, EffectorTable, EffectorTarget, EffectorWeight, Frame, Keyframe,
        NameRegistry, Point3, Pose,
    };

    /// Fixed-timestep simulation that counts advances and can be told to
    /// fail.
    struct CountingSim {
        dt: f64,
        advances: u64,
        fail_on: Option<u64>,
    }

    impl CountingSim {
        fn new(dt: f64) -> Self {
            Self {
                dt,
                advances: 0,
                fail_on: None,
            }
        }

        fn failing_on(dt: f64, advance: u64) -> Self {
            Self {
                dt,
                advances: 0,
                fail_on: Some(advance),
            }
        }
    }

    impl Simulation for CountingSim {
        fn timestep(&self) -> f64 {
            self.dt
        }

        fn advance(&mut self) -> Result<()> {
            self.advances += 1;
            if self.fail_on == Some(self.advances) {
                return Err(ImitationError::simulation_step("solver diverged"));
            }
            Ok(())
        }
    }

    /// Robot frozen at fixed link poses; records applied joint targets.
    struct FrozenRobot {
        hand: Pose,
        applied: Vec<Vec<f64>>,
    }

    impl FrozenRobot {
        fn with_hand_at(position: Point3<f64>) -> Self {
            Self {
                hand: Pose::from_position(position),
                applied: Vec::new(),
            }
        }
    }

    impl Robot for FrozenRobot {
        fn root_link(&self) -> &str {
            "torso"
        }

        fn link_pose(&self, link: &str) -> Option<Pose> {
            match link {
                "torso" => Some(Pose::identity()),
                "l_hand" => Some(self.hand),
                _ => None,
            }
        }

        fn apply_joint_targets(
            &mut self,
            _joints: &NameRegistry,
            targets: &[f64],
        ) -> Result<()> {
            self.applied.push(targets.to_vec());
            Ok(())
        }
    }

    fn static_motion() -> Motion {
        let joints = NameRegistry::from_names(["hip"]).unwrap();
        let effectors = EffectorTable::new(
            NameRegistry::from_names(["l_hand"]).unwrap(),
            vec![EffectorReference::world()],
            vec![EffectorWeight::default()],
        )
        .unwrap();
        let target = EffectorTarget::location(Point3::origin());
        Motion::new(
            joints,
            effectors,
            vec![
                Keyframe::new(0.0, Frame::new(vec![0.0], vec![target])),
                Keyframe::new(1.0, Frame::new(vec![0.0], vec![target])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_state_transitions() {
        let motion = static_motion();
        let mut evaluator = EpisodeEvaluator::new(&motion, RewardConfig::default());
        assert!(evaluator.state().is_not_started());
        assert_eq!(evaluator.score(), None);

        let mut robot = FrozenRobot::with_hand_at(Point3::origin());
        let mut sim = CountingSim::new(0.5);

        evaluator.step(&mut robot, &mut sim).unwrap();
        assert!(evaluator.state().is_running());

        while !evaluator.step(&mut robot, &mut sim).unwrap().completed {}
        assert!(evaluator.state().is_done());
        assert!(evaluator.score().is_some());
    }

    #[test]
    fn test_perfect_tracking_scores_zero() {
        let motion = static_motion();
        let mut evaluator = EpisodeEvaluator::new(&motion, RewardConfig::default());
        let mut robot = FrozenRobot::with_hand_at(Point3::origin());
        let mut sim = CountingSim::new(0.5);

        let score = evaluator.run(&mut robot, &mut sim).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_protocol_order_and_counts() {
        let motion = static_motion();
        let mut evaluator = EpisodeEvaluator::new(&motion, RewardConfig::default());
        let mut robot = FrozenRobot::with_hand_at(Point3::origin());
        let mut sim = CountingSim::new(0.5);

        evaluator.run(&mut robot, &mut sim).unwrap();
        // Steps at t = 0, 0.5, 1.0; termination detected at t = 1.5.
        assert_eq!(robot.applied.len(), 3);
        assert_eq!(sim.advances, 3);
        assert_eq!(evaluator.metrics().frames_evaluated, 3);
    }

    #[test]
    fn test_constant_offset_score_matches_normalization() {
        let motion = static_motion();
        let mut evaluator = EpisodeEvaluator::new(&motion, RewardConfig::default());
        let mut robot = FrozenRobot::with_hand_at(Point3::new(1.0, 0.0, 0.0));
        let mut sim = CountingSim::new(0.5);

        let score = evaluator.run(&mut robot, &mut sim).unwrap();
        // Every evaluated frame rewards 1 - e; 3 frames evaluated, expected
        // frame count ceil(1.0 / 0.5) = 2.
        let per_frame = 1.0 - std::f64::consts::E;
        assert_relative_eq!(score, per_frame * 3.0 / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_timestep_is_rejected() {
        let motion = static_motion();
        let mut robot = FrozenRobot::with_hand_at(Point3::origin());

        for dt in [0.0, -0.1, f64::NAN] {
            let mut evaluator = EpisodeEvaluator::new(&motion, RewardConfig::default());
            let mut sim = CountingSim::new(dt);
            let err = evaluator.step(&mut robot, &mut sim).unwrap_err();
            assert!(matches!(err, ImitationError::InvalidTimestep(_)));
            assert!(evaluator.state().is_not_started());
        }
    }

    #[test]
    fn test_simulation_failure_propagates() {
        let motion = static_motion();
        let mut evaluator = EpisodeEvaluator::new(&motion, RewardConfig::default());
        let mut robot = FrozenRobot::with_hand_at(Point3::origin());
        let mut sim = CountingSim::failing_on(0.5, 2);

        let err = evaluator.run(&mut robot, &mut sim).unwrap_err();
        assert_eq!(err, ImitationError::simulation_step("solver diverged"));
        assert_eq!(evaluator.score(), None);
    }

    #[test]
    fn test_step_after_done_is_idempotent() {
        let motion = static_motion();
        let mut evaluator = EpisodeEvaluator::new(&motion, RewardConfig::default());
        let mut robot = FrozenRobot::with_hand_at(Point3::origin());
        let mut sim = CountingSim::new(0.5);

        evaluator.run(&mut robot, &mut sim).unwrap();
        let advances_before = sim.advances;

        let result = evaluator.step(&mut robot, &mut sim).unwrap();
        assert!(result.completed);
        assert_eq!(result.reward, None);
        assert_eq!(sim.advances, advances_before);
    }

    #[test]
    fn test_seeded_previous_positions_penalize_first_frame() {
        let motion = static_motion();
        let config = RewardConfig::default();
        let mut robot = FrozenRobot::with_hand_at(Point3::origin());

        // Unseeded: first frame has no stabilization penalty.
        let mut sim = CountingSim::new(0.5);
        let mut unseeded = EpisodeEvaluator::new(&motion, config);
        let first = unseeded.step(&mut robot, &mut sim).unwrap();
        assert_eq!(first.reward, Some(0.0));

        // Seeded with different positions: first frame is penalized.
        let mut sim = CountingSim::new(0.5);
        let mut seeded =
            EpisodeEvaluator::new(&motion, config).with_previous_positions(vec![1.0]);
        let first = seeded.step(&mut robot, &mut sim).unwrap();
        assert!(first.reward.unwrap() < 0.0);
    }
}
