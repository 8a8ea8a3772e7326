//! Per-frame animation of positionables along a trajectory.
//!
//! Every object `i` travels from trajectory point `P[i]` toward `P[i + 1]` over
//! `steps` frames. When the phase wraps, all objects snap back onto their own
//! anchor point and the cycle starts again, which reads as a wave running
//! through the attractor.
//!
//! Each frame is processed in up to two passes (snap, then interpolate). Every
//! pass fans out over the [`ChunkPlan`] and joins before the next one starts,
//! so by the time [`Animator::advance`] returns every position is final.

use glam::Vec3;

use crate::attractor::Trajectory;
use crate::chunk::{plan, ChunkPlan};

/// Something the animator can move.
///
/// Implemented by whatever backend draws the points. The animator only
/// writes positions and never reads them back.
pub trait Positionable {
    fn set_position(&mut self, position: Vec3);
}

impl Positionable for Vec3 {
    #[inline]
    fn set_position(&mut self, position: Vec3) {
        *self = position;
    }
}

/// Interpolation cycle state: `step` runs from 1 to `steps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationPhase {
    step: u32,
    steps: u32,
}

impl AnimationPhase {
    /// Start a cycle of `steps` frames. Zero is raised to one.
    pub fn new(steps: u32) -> Self {
        Self {
            step: 1,
            steps: steps.max(1),
        }
    }

    /// Current sub-frame counter.
    #[inline]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Frames between two consecutive trajectory points.
    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Read-only view handed to workers.
    #[inline]
    pub fn snapshot(&self) -> FramePhase {
        FramePhase {
            step: self.step,
            steps: self.steps,
        }
    }

    /// Reset to 1 if the cycle is complete. Returns whether it wrapped.
    fn wrap(&mut self) -> bool {
        if self.step >= self.steps {
            self.step = 1;
            true
        } else {
            false
        }
    }
}

impl Default for AnimationPhase {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Phase as seen by the workers during one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePhase {
    pub step: u32,
    pub steps: u32,
}

impl FramePhase {
    /// Interpolation factor `step / steps`.
    #[inline]
    pub fn fraction(&self) -> f32 {
        self.step as f32 / self.steps as f32
    }
}

/// What a call to [`Animator::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// A snap pass ran before interpolation.
    pub snapped: bool,
    /// Step used for this frame's interpolation.
    pub step: u32,
}

/// Linear interpolation from `from` toward `to`.
#[inline]
pub fn interpolate(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from + (to - from) * t
}

/// Drives positionables along a fixed trajectory.
#[derive(Debug, Clone)]
pub struct Animator {
    trajectory: Trajectory,
    chunks: ChunkPlan,
    phase: AnimationPhase,
}

impl Animator {
    /// Build an animator over `trajectory`, splitting each pass across `threads`
    /// workers and interpolating over `steps` frames.
    pub fn new(trajectory: Trajectory, threads: usize, steps: u32) -> Self {
        let chunks = plan(trajectory.len(), threads);
        Self {
            trajectory,
            chunks,
            phase: AnimationPhase::new(steps),
        }
    }

    #[inline]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    #[inline]
    pub fn chunks(&self) -> &ChunkPlan {
        &self.chunks
    }

    #[inline]
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Put every target exactly on its trajectory point without touching the phase.
    pub fn place_all<T: Positionable + Send>(&self, targets: &mut [T]) {
        self.snap_pass(targets);
    }

    /// Advance one frame.
    ///
    /// Snaps everything back onto its anchor when the cycle is complete, then
    /// interpolates every target except the last toward its successor, then
    /// bumps the step. Both passes are joined before this returns.
    pub fn advance<T: Positionable + Send>(&mut self, targets: &mut [T]) -> FrameReport {
        debug_assert_eq!(targets.len(), self.trajectory.len());

        let snapped = self.phase.wrap();
        if snapped {
            log::debug!("animation phase wrapped after {} steps", self.phase.steps);
            self.snap_pass(targets);
        }

        let frame = self.phase.snapshot();
        self.interpolate_pass(targets, frame);
        self.phase.step += 1;

        FrameReport {
            snapped,
            step: frame.step,
        }
    }

    /// Set every target to exactly its own trajectory point.
    pub fn snap_pass<T: Positionable + Send>(&self, targets: &mut [T]) {
        let points = self.trajectory.points();
        self.chunks.for_each_mut(targets, |start, chunk| {
            for (target, &p) in chunk.iter_mut().zip(&points[start..]) {
                target.set_position(p);
            }
        });
    }

    /// Move every target with a successor to `frame.fraction()` of the way there.
    ///
    /// The final target has no successor and is left untouched.
    pub fn interpolate_pass<T: Positionable + Send>(&self, targets: &mut [T], frame: FramePhase) {
        let points = self.trajectory.points();
        let t = frame.fraction();
        self.chunks.for_each_mut(targets, |start, chunk| {
            for (offset, target) in chunk.iter_mut().enumerate() {
                let i = start + offset;
                if let (Some(&p), Some(&next)) = (points.get(i), points.get(i + 1)) {
                    target.set_position(interpolate(p, next, t));
                }
            }
        });
    }
}
